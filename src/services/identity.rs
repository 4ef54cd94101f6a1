// src/services/identity.rs

use std::sync::Arc;

use async_trait::async_trait;
use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AuthUserStore,
    models::auth::{AuthUser, Claims, IdentitySession},
};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Provedor de identidade: valida credenciais e emite/revoga sessões.
///
/// O resto do sistema só conversa com este trait; nenhuma regra de token
/// vaza para o coordenador.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    // Token inválido, expirado ou revogado => Ok(None)
    async fn get_current_session(&self, token: &str) -> Result<Option<IdentitySession>, AppError>;

    async fn get_current_user(&self, token: &str) -> Result<Option<AuthUser>, AppError> {
        Ok(self.get_current_session(token).await?.map(|session| session.user))
    }

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession, AppError>;

    async fn sign_out(&self, token: &str) -> Result<(), AppError>;

    async fn update_password(&self, user_id: Uuid, new_password: &str) -> Result<(), AppError>;
}

// Implementação local: bcrypt + JWT HS256 + lista de revogação no banco
#[derive(Clone)]
pub struct JwtIdentityProvider {
    users: Arc<dyn AuthUserStore>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl JwtIdentityProvider {
    pub fn new(users: Arc<dyn AuthUserStore>, jwt_secret: String, token_ttl: Duration) -> Self {
        Self { users, jwt_secret, token_ttl }
    }

    pub async fn hash_password(password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        // bcrypt é caro: roda fora do executor
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    fn decode_claims(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .ok()
    }

    fn create_token(&self, user_id: Uuid) -> Result<(String, Claims), AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?;
        Ok((token, claims))
    }
}

fn expiry_of(claims: &Claims) -> DateTime<Utc> {
    Utc.timestamp_opt(claims.exp as i64, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn get_current_session(&self, token: &str) -> Result<Option<IdentitySession>, AppError> {
        let Some(claims) = self.decode_claims(token) else {
            return Ok(None);
        };

        if self.users.is_token_revoked(claims.jti).await? {
            return Ok(None);
        }

        let session = self.users.find_by_id(claims.sub).await?.map(|user| IdentitySession {
            access_token: token.to_string(),
            token_id: claims.jti,
            expires_at: expiry_of(&claims),
            user,
        });
        Ok(session)
    }

    async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession, AppError> {
        // Conta inexistente e senha errada dão o mesmo erro
        let record = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = record.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
                .unwrap_or(false);

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = AuthUser::from(record);
        let (access_token, claims) = self.create_token(user.id)?;
        tracing::info!(user_id = %user.id, "🔑 Sessão emitida");

        Ok(IdentitySession {
            access_token,
            token_id: claims.jti,
            expires_at: expiry_of(&claims),
            user,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), AppError> {
        // Token ilegível ou já expirado: não há sessão para encerrar
        let Some(claims) = self.decode_claims(token) else {
            return Ok(());
        };
        self.users
            .revoke_token(claims.jti, claims.sub, expiry_of(&claims))
            .await?;
        tracing::info!(user_id = %claims.sub, "👋 Sessão revogada");
        Ok(())
    }

    async fn update_password(&self, user_id: Uuid, new_password: &str) -> Result<(), AppError> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        let hashed = Self::hash_password(new_password).await?;
        self.users.update_password_hash(user_id, &hashed).await
    }
}
