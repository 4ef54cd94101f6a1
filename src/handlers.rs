pub mod auth;
pub mod employees;
pub mod gallery;
pub mod notifications;
pub mod shell;
