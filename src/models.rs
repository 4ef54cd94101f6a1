pub mod admin;
pub mod auth;
pub mod employee;
pub mod gallery;
pub mod navigation;
pub mod notification;
pub mod session;
