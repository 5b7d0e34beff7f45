//! HTTP Auth Repository Implementation
//!
//! AuthRepositoryのHTTP（JSON）実装

use async_trait::async_trait;
use std::sync::Arc;

use crate::adapter::http::client::{ApiClient, LOGIN_ENDPOINT, REGISTER_ENDPOINT};
use crate::adapter::http::models::TokenResponse;
use crate::adapter::http::response::read_json;
use crate::domain::error::ClientError;
use crate::domain::repositories::auth_repository::{AuthRepository, Credentials};

pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// HTTP認証リポジトリ
pub struct HttpAuthRepository {
    client: Arc<ApiClient>,
}

impl HttpAuthRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn request_token(
        &self,
        endpoint: &str,
        credentials: &Credentials,
        fallback: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .client
            .send(self.client.post(endpoint).json(credentials))
            .await?;

        let body: TokenResponse = read_json(response, fallback).await?;
        body.into_token()
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn register(&self, credentials: &Credentials) -> Result<String, ClientError> {
        self.request_token(REGISTER_ENDPOINT, credentials, REGISTRATION_FAILED_MESSAGE)
            .await
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, ClientError> {
        self.request_token(LOGIN_ENDPOINT, credentials, LOGIN_FAILED_MESSAGE)
            .await
    }
}
