//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod file_token_store;
pub mod http_auth_repository;
pub mod http_upload_repository;
