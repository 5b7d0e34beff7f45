use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, RequestBuilder, Response};

use crate::domain::error::ClientError;

pub const REGISTER_ENDPOINT: &str = "register/";
pub const LOGIN_ENDPOINT: &str = "login/";
pub const UPLOAD_ENDPOINT: &str = "upload/";
pub const UPLOAD_CHUNK_ENDPOINT: &str = "upload-chunk/";

/// Thin wrapper over `reqwest::Client` that knows the service base URL
/// and how to authorize a request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("dataclean/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub fn post(&self, endpoint: &str) -> RequestBuilder {
        self.http.post(self.endpoint_url(endpoint))
    }

    pub fn authorized_post(&self, endpoint: &str, token: &str) -> RequestBuilder {
        self.post(endpoint)
            .header(reqwest::header::AUTHORIZATION, authorization_value(token))
    }

    /// Send a request. Anything that stops the request from completing is a
    /// `Transport` error; the status code is interpreted by the caller.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(describe_send_error(&e)))?;

        debug!(
            "{} responded with {}",
            response.url().path(),
            response.status()
        );
        Ok(response)
    }
}

pub fn authorization_value(token: &str) -> String {
    format!("Token {}", token)
}

fn describe_send_error(error: &reqwest::Error) -> String {
    if error.is_connect() {
        "could not connect to the server".to_string()
    } else if error.is_timeout() {
        "the request timed out".to_string()
    } else {
        error.to_string()
    }
}
