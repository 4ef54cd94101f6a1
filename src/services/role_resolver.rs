// src/services/role_resolver.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::AdminUserStore,
    models::admin::{AdminIdentity, AdminRole, AdminUser, RoleParseError, DEFAULT_ADMIN_NAME},
};

// Traduz um usuário do provedor de identidade no papel/nome do painel.
// Nunca falha: qualquer problema cai no papel padrão.
#[derive(Clone)]
pub struct RoleResolver {
    admins: Arc<dyn AdminUserStore>,
}

impl RoleResolver {
    pub fn new(admins: Arc<dyn AdminUserStore>) -> Self {
        Self { admins }
    }

    pub async fn find_admin(&self, auth_user_id: Uuid) -> Option<AdminUser> {
        match self.admins.find_by_auth_user_id(auth_user_id).await {
            Ok(admin) => admin,
            Err(e) => {
                tracing::warn!(%auth_user_id, "Falha ao buscar admin_users: {:?}", e);
                None
            }
        }
    }

    pub async fn resolve(&self, auth_user_id: Uuid) -> AdminIdentity {
        match self.find_admin(auth_user_id).await {
            Some(admin) => identity_of(&admin),
            None => AdminIdentity::fallback(),
        }
    }
}

pub fn identity_of(admin: &AdminUser) -> AdminIdentity {
    let name = if admin.name.trim().is_empty() {
        DEFAULT_ADMIN_NAME.to_string()
    } else {
        admin.name.clone()
    };

    AdminIdentity {
        admin_user_id: Some(admin.id),
        name,
        role: canonical_role(admin),
    }
}

fn canonical_role(admin: &AdminUser) -> AdminRole {
    match admin.role.parse::<AdminRole>() {
        Ok(role) => role,
        Err(RoleParseError::Legacy(label)) => {
            tracing::warn!(admin_id = %admin.id, label = %label, "⚠️ Papel legado no admin_users, usando o padrão");
            AdminRole::default()
        }
        Err(RoleParseError::Unknown(label)) => {
            tracing::warn!(admin_id = %admin.id, label = %label, "⚠️ Papel desconhecido no admin_users, usando o padrão");
            AdminRole::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryAdminUsers;

    fn resolver() -> (RoleResolver, Arc<MemoryAdminUsers>) {
        let admins = Arc::new(MemoryAdminUsers::default());
        (RoleResolver::new(admins.clone()), admins)
    }

    #[tokio::test]
    async fn known_admin_gets_stored_role_and_name() {
        let (resolver, admins) = resolver();
        let auth_id = Uuid::new_v4();
        let row = admins.add(auth_id, "Meera", "cashier");

        let identity = resolver.resolve(auth_id).await;
        assert_eq!(identity.role, AdminRole::Cashier);
        assert_eq!(identity.name, "Meera");
        assert_eq!(identity.admin_user_id, Some(row.id));
    }

    #[tokio::test]
    async fn missing_row_defaults_to_employee() {
        let (resolver, _) = resolver();
        let identity = resolver.resolve(Uuid::new_v4()).await;
        assert_eq!(identity, AdminIdentity::fallback());
        assert_eq!(identity.role, AdminRole::Employee);
        assert_eq!(identity.name, "Admin User");
    }

    #[tokio::test]
    async fn store_failure_takes_the_default_path() {
        let (resolver, admins) = resolver();
        let auth_id = Uuid::new_v4();
        admins.add(auth_id, "Meera", "super_admin");
        admins.fail(true);

        assert_eq!(resolver.resolve(auth_id).await, AdminIdentity::fallback());
        assert!(resolver.find_admin(auth_id).await.is_none());
    }

    #[tokio::test]
    async fn legacy_and_empty_values_are_normalized() {
        let (resolver, admins) = resolver();
        let manager = Uuid::new_v4();
        admins.add(manager, "", "manager");
        let owner = Uuid::new_v4();
        admins.add(owner, "Kiran", "owner");

        let identity = resolver.resolve(manager).await;
        assert_eq!(identity.role, AdminRole::Employee);
        assert_eq!(identity.name, "Admin User");
        assert!(identity.admin_user_id.is_some());

        assert_eq!(resolver.resolve(owner).await.role, AdminRole::Employee);
    }
}
