//! # Authenticate Use Case
//!
//! ユーザー登録、ログイン、ログアウト

use std::sync::Arc;

use log::info;

use crate::application::session_manager::SessionManager;
use crate::domain::error::ClientError;
use crate::domain::repositories::auth_repository::{AuthRepository, Credentials};
use crate::domain::repositories::token_store::TokenStore;

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please enter both username and password.";

/// 認証ユースケース
///
/// 取得したトークンは `SessionManager` 経由でのみ保存する
pub struct AuthenticateUseCase<A: AuthRepository, S: TokenStore> {
    auth_repository: Arc<A>,
    session: Arc<SessionManager<S>>,
}

impl<A: AuthRepository, S: TokenStore> AuthenticateUseCase<A, S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `auth_repository` - 認証リポジトリ
    /// * `session` - セッションマネージャー
    pub fn new(auth_repository: Arc<A>, session: Arc<SessionManager<S>>) -> Self {
        Self {
            auth_repository,
            session,
        }
    }

    /// ユーザーを登録し、返されたトークンでセッションを開始する
    ///
    /// # Errors
    ///
    /// ユーザー名かパスワードが空なら `Validation`、通信失敗は `Transport`
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        Self::check_credentials(credentials)?;

        let token = self.auth_repository.register(credentials).await?;
        self.session.set_token(&token).await;
        info!("Registered user {}", credentials.username);

        Ok(())
    }

    /// ログインする
    ///
    /// ログインフローに入った時点で古いトークンは破棄される
    ///
    /// # Errors
    ///
    /// ユーザー名かパスワードが空なら `Validation`、通信失敗は `Transport`
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.session.clear().await;
        Self::check_credentials(credentials)?;

        let token = self.auth_repository.login(credentials).await?;
        self.session.set_token(&token).await;
        info!("Logged in as {}", credentials.username);

        Ok(())
    }

    /// ログアウトする
    pub async fn logout(&self) {
        self.session.clear().await;
        info!("Logged out");
    }

    fn check_credentials(credentials: &Credentials) -> Result<(), ClientError> {
        if credentials.is_complete() {
            Ok(())
        } else {
            Err(ClientError::Validation(
                MISSING_CREDENTIALS_MESSAGE.to_string(),
            ))
        }
    }
}
