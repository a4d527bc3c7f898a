pub mod api_token_repository;
pub mod file_repository;
pub mod session_provider;
pub mod session_repository;
pub mod time_service;
pub mod token_store;
pub mod user_repository;
