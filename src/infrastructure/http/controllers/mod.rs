pub mod auth;
pub mod files;
pub mod tokens;
pub mod user;
