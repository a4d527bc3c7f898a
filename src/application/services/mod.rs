pub mod api_token_service;
pub mod auth_service;
pub mod file_service;
pub mod identity_resolver;
pub mod session_service;

pub use api_token_service::ApiTokenService;
pub use auth_service::AuthService;
pub use file_service::FileService;
pub use identity_resolver::IdentityResolver;
pub use session_service::SessionService;
