pub mod credentials;
pub mod error;
