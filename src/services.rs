pub mod admin_shell;
pub mod alerts;
pub mod change_stream;
pub mod employee_service;
pub mod gallery_service;
pub mod identity;
pub mod navigation;
pub mod notification_feed;
pub mod role_resolver;
pub mod session_lifecycle;
