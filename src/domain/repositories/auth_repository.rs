//! # Auth Repository Trait
//!
//! ユーザー登録とログインを抽象化

use async_trait::async_trait;
use serde::Serialize;

#[cfg(test)]
use mockall::automock;

use crate::domain::error::ClientError;

/// ログイン資格情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// ユーザー名とパスワードの両方が入力されているか
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// 認証リポジトリ
///
/// 資格情報と引き換えに認証トークンを取得する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// ユーザーを登録してトークンを取得
    async fn register(&self, credentials: &Credentials) -> Result<String, ClientError>;

    /// ログインしてトークンを取得
    async fn login(&self, credentials: &Credentials) -> Result<String, ClientError>;
}
