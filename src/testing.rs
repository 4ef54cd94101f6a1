// src/testing.rs
//
// Implementações em memória dos stores, do stream de mudanças e dos alertas.
// Só compiladas nos testes.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AdminSessionStore, AdminUserStore, AuthUserStore, EmployeeStore, GalleryStore, NotificationStore},
    models::{
        admin::AdminUser,
        auth::{AuthUser, AuthUserRecord},
        employee::{Employee, NewEmployee},
        gallery::{GalleryCategory, GalleryImage},
        notification::Notification,
        session::{AdminSession, NewAdminSession, SESSION_ACTIVE, SESSION_LOGGED_OUT},
    },
    services::{
        alerts::{AlertError, AlertSink},
        change_stream::{ChangeEvent, ChangeHandler, ChangeKind, ChangeStream, Subscription},
    },
};

fn injected() -> AppError {
    AppError::InternalServerError(anyhow::anyhow!("falha injetada"))
}

// ---------- identidade ----------

#[derive(Default)]
pub struct MemoryAuthUsers {
    users: Mutex<Vec<AuthUserRecord>>,
    revoked: Mutex<HashSet<Uuid>>,
    revoke_failures: AtomicUsize,
    revoke_attempts: AtomicUsize,
}

impl MemoryAuthUsers {
    pub fn insert(&self, email: &str, password_hash: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users.lock().unwrap().push(AuthUserRecord {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        });
        id
    }

    pub fn revoked_count(&self) -> usize {
        self.revoked.lock().unwrap().len()
    }

    // As próximas `n` revogações falham
    pub fn fail_revocations(&self, n: usize) {
        self.revoke_failures.store(n, Ordering::SeqCst);
    }

    pub fn revoke_attempts(&self) -> usize {
        self.revoke_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthUserStore for MemoryAuthUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUserRecord>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(AuthUser::from))
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users.iter_mut().find(|u| u.id == id).ok_or(AppError::NotFound("Usuário"))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn revoke_token(&self, token_id: Uuid, _user_id: Uuid, _expires_at: DateTime<Utc>) -> Result<(), AppError> {
        self.revoke_attempts.fetch_add(1, Ordering::SeqCst);
        let pending = self.revoke_failures.load(Ordering::SeqCst);
        if pending > 0 {
            self.revoke_failures.store(pending - 1, Ordering::SeqCst);
            return Err(injected());
        }
        self.revoked.lock().unwrap().insert(token_id);
        Ok(())
    }

    async fn is_token_revoked(&self, token_id: Uuid) -> Result<bool, AppError> {
        Ok(self.revoked.lock().unwrap().contains(&token_id))
    }
}

// ---------- admin_users ----------

#[derive(Default)]
pub struct MemoryAdminUsers {
    rows: Mutex<Vec<AdminUser>>,
    failing: AtomicBool,
}

impl MemoryAdminUsers {
    pub fn add(&self, auth_user_id: Uuid, name: &str, role: &str) -> AdminUser {
        let row = AdminUser {
            id: Uuid::new_v4(),
            auth_user_id,
            name: name.to_string(),
            role: role.to_string(),
            status: "active".to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    pub fn fail(&self, on: bool) {
        self.failing.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl AdminUserStore for MemoryAdminUsers {
    async fn find_by_auth_user_id(&self, auth_user_id: Uuid) -> Result<Option<AdminUser>, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(injected());
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.auth_user_id == auth_user_id)
            .cloned())
    }
}

// ---------- admin_sessions ----------

#[derive(Default)]
pub struct MemorySessions {
    rows: Mutex<Vec<AdminSession>>,
    failing: AtomicBool,
}

impl MemorySessions {
    pub fn fail(&self, on: bool) {
        self.failing.store(on, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<AdminSession> {
        self.rows.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(injected())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AdminSessionStore for MemorySessions {
    async fn open(&self, session: NewAdminSession) -> Result<AdminSession, AppError> {
        self.check()?;
        let row = AdminSession {
            id: Uuid::new_v4(),
            admin_user_id: session.admin_user_id,
            login_at: session.login_at,
            logout_at: None,
            status: SESSION_ACTIVE.to_string(),
            device_info: session.device_info,
            ip_address: session.ip_address,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn close_latest_active(
        &self,
        admin_user_id: Uuid,
        logout_at: DateTime<Utc>,
    ) -> Result<Option<AdminSession>, AppError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let latest = rows
            .iter_mut()
            .filter(|s| s.admin_user_id == admin_user_id && s.status == SESSION_ACTIVE)
            .max_by_key(|s| s.login_at);
        Ok(latest.map(|session| {
            session.status = SESSION_LOGGED_OUT.to_string();
            session.logout_at = Some(logout_at);
            session.clone()
        }))
    }

    async fn list_for_admin(&self, admin_user_id: Uuid, limit: i64) -> Result<Vec<AdminSession>, AppError> {
        self.check()?;
        let mut sessions: Vec<AdminSession> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.admin_user_id == admin_user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.login_at.cmp(&a.login_at));
        sessions.truncate(limit.max(0) as usize);
        Ok(sessions)
    }
}

// ---------- admin_notifications ----------

// Quanto menor o número do id, mais recente a notificação
pub fn stored_notification(id: Uuid, is_read: bool) -> Notification {
    let age = (id.as_u128() % 100_000) as i64;
    Notification {
        id,
        title: "Low stock".to_string(),
        message: "Milk is running low".to_string(),
        kind: "system".to_string(),
        order_id: None,
        is_read,
        created_at: Utc::now() - Duration::minutes(age + 1),
    }
}

// Linha de 'orders' como o trigger publica
pub fn order_row(id: Uuid, table_number: i32, total_price: i64) -> Value {
    json!({
        "id": id,
        "table_number": table_number,
        "total_price": total_price,
        "status": "pending",
        "created_at": Utc::now(),
    })
}

#[derive(Default)]
pub struct MemoryNotifications {
    rows: Mutex<Vec<Notification>>,
    failing: AtomicBool,
    read_writes: AtomicUsize,
}

impl MemoryNotifications {
    pub fn seed(&self, rows: Vec<Notification>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn fail(&self, on: bool) {
        self.failing.store(on, Ordering::SeqCst);
    }

    // Tentativas de gravação de leitura, incluindo as que falharam
    pub fn read_writes(&self) -> usize {
        self.read_writes.load(Ordering::SeqCst)
    }

    pub fn is_read(&self, id: Uuid) -> bool {
        self.rows.lock().unwrap().iter().any(|n| n.id == id && n.is_read)
    }
}

#[async_trait]
impl NotificationStore for MemoryNotifications {
    async fn recent(&self, limit: i64) -> Result<Vec<Notification>, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(injected());
        }
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), AppError> {
        self.read_writes.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(injected());
        }
        // Alerta ao vivo não tem linha: zero linhas afetadas não é erro
        for row in self.rows.lock().unwrap().iter_mut().filter(|n| n.id == id) {
            row.is_read = true;
        }
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), AppError> {
        self.read_writes.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(injected());
        }
        for row in self.rows.lock().unwrap().iter_mut() {
            row.is_read = true;
        }
        Ok(())
    }
}

// ---------- employees ----------

#[derive(Default)]
pub struct MemoryEmployees {
    rows: Mutex<Vec<Employee>>,
}

impl MemoryEmployees {
    pub fn rows(&self) -> Vec<Employee> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployees {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        let mut rows = self.rows();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn employee_id_exists(&self, employee_id: &str) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().iter().any(|e| e.employee_id == employee_id))
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|e| e.employee_id == employee.employee_id) {
            return Err(AppError::EmployeeIdTaken);
        }
        let row = Employee {
            id: Uuid::new_v4(),
            employee_id: employee.employee_id,
            password_hash: employee.password_hash,
            name: employee.name,
            role: employee.role.as_str().to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn toggle_active(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|e| e.id == id).map(|e| {
            e.is_active = !e.is_active;
            e.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| e.id != id);
        Ok(rows.len() != before)
    }
}

// ---------- gallery ----------

#[derive(Clone)]
struct StoredImage {
    id: Uuid,
    image_url: String,
    alt_text: String,
    category_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct MemoryGallery {
    categories: Mutex<Vec<GalleryCategory>>,
    images: Mutex<Vec<StoredImage>>,
}

impl MemoryGallery {
    fn resolve(&self, image: &StoredImage) -> GalleryImage {
        let category = image.category_id.and_then(|id| {
            self.categories.lock().unwrap().iter().find(|c| c.id == id).cloned()
        });
        GalleryImage {
            id: image.id,
            image_url: image.image_url.clone(),
            alt_text: image.alt_text.clone(),
            category_id: image.category_id,
            category,
            created_at: image.created_at,
        }
    }
}

#[async_trait]
impl GalleryStore for MemoryGallery {
    async fn list_categories(&self) -> Result<Vec<GalleryCategory>, AppError> {
        let mut categories = self.categories.lock().unwrap().clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_images(&self, category_id: Option<Uuid>) -> Result<Vec<GalleryImage>, AppError> {
        let mut images: Vec<StoredImage> = self
            .images
            .lock()
            .unwrap()
            .iter()
            .filter(|i| category_id.is_none() || i.category_id == category_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images.iter().map(|i| self.resolve(i)).collect())
    }

    async fn insert_image(
        &self,
        image_url: &str,
        alt_text: &str,
        category_id: Option<Uuid>,
    ) -> Result<GalleryImage, AppError> {
        if let Some(id) = category_id {
            if !self.categories.lock().unwrap().iter().any(|c| c.id == id) {
                return Err(AppError::NotFound("Categoria"));
            }
        }
        let image = StoredImage {
            id: Uuid::new_v4(),
            image_url: image_url.to_string(),
            alt_text: alt_text.to_string(),
            category_id,
            created_at: Utc::now(),
        };
        self.images.lock().unwrap().push(image.clone());
        Ok(self.resolve(&image))
    }

    async fn insert_category(&self, name: &str) -> Result<GalleryCategory, AppError> {
        let category = GalleryCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn delete_image(&self, id: Uuid) -> Result<bool, AppError> {
        let mut images = self.images.lock().unwrap();
        let before = images.len();
        images.retain(|i| i.id != id);
        Ok(images.len() != before)
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, AppError> {
        if self.images.lock().unwrap().iter().any(|i| i.category_id == Some(id)) {
            return Err(AppError::CategoryInUse);
        }
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() != before)
    }
}

// ---------- stream de mudanças ----------

type Subscribers = HashMap<u64, (String, ChangeKind, ChangeHandler)>;

#[derive(Default)]
pub struct MemoryChangeStream {
    subscribers: Arc<Mutex<Subscribers>>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

impl MemoryChangeStream {
    pub fn fail(&self, on: bool) {
        self.failing.store(on, Ordering::SeqCst);
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    // Entrega síncrona para cada assinante da tabela/tipo
    pub fn publish(&self, table: &str, kind: ChangeKind, row: Value) {
        let handlers: Vec<ChangeHandler> = self
            .subscribers
            .lock()
            .unwrap()
            .values()
            .filter(|(t, k, _)| t == table && *k == kind)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(ChangeEvent {
                table: table.to_string(),
                kind,
                row: row.clone(),
            });
        }
    }
}

#[async_trait]
impl ChangeStream for MemoryChangeStream {
    async fn subscribe(
        &self,
        table: &str,
        kind: ChangeKind,
        handler: ChangeHandler,
    ) -> Result<Subscription, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(injected());
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.subscribers
            .lock()
            .unwrap()
            .insert(id, (table.to_string(), kind, handler));

        let subscribers = Arc::clone(&self.subscribers);
        Ok(Subscription::new(format!("{}_{}", table, kind.as_str()), move || {
            subscribers.lock().unwrap().remove(&id);
        }))
    }
}

// ---------- alertas ----------

#[derive(Default)]
pub struct RecordingAlerts {
    chimes: AtomicUsize,
    toasts: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    chime_fails: AtomicBool,
}

impl RecordingAlerts {
    pub fn fail_chime(&self, on: bool) {
        self.chime_fails.store(on, Ordering::SeqCst);
    }

    pub fn chimes(&self) -> usize {
        self.chimes.load(Ordering::SeqCst)
    }

    pub fn toasts(&self) -> Vec<String> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn chime(&self) -> Result<(), AlertError> {
        if self.chime_fails.load(Ordering::SeqCst) {
            return Err(AlertError::NoListeners);
        }
        self.chimes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn toast(&self, message: &str) {
        self.toasts.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
