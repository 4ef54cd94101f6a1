pub mod stores;
pub use stores::{
    AdminSessionStore, AdminUserStore, AuthUserStore, EmployeeStore, GalleryStore, NotificationStore,
};
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod admin_user_repo;
pub use admin_user_repo::AdminUserRepository;
pub mod session_repo;
pub use session_repo::SessionRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod gallery_repo;
pub use gallery_repo::GalleryRepository;
