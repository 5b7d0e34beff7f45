//! # Client Error
//!
//! クライアント操作のエラー分類

use thiserror::Error;

/// クライアントエラー
///
/// 各操作の境界でユーザー向けメッセージに変換される
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// ネットワークに到達する前の検証エラー（不正な形式、サイズ超過など）
    #[error("validation failed: {0}")]
    Validation(String),

    /// リクエストが完了しなかった、または失敗ステータスが返された
    #[error("request failed: {0}")]
    Transport(String),

    /// 成功ステータスだがレスポンスが契約に違反している
    #[error("unexpected response: {0}")]
    Protocol(String),

    /// トークンが必要な操作でトークンが存在しない
    #[error("not authenticated")]
    Auth,
}

impl ClientError {
    /// ユーザーに表示するメッセージを返す
    ///
    /// # 例
    ///
    /// ```
    /// use dataclean::domain::error::ClientError;
    ///
    /// let err = ClientError::Transport("Upload failed".to_string());
    /// assert_eq!(err.user_message(), "Error: Upload failed");
    ///
    /// assert_eq!(ClientError::Auth.user_message(), "Please log in first.");
    /// ```
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Transport(message) => format!("Error: {}", message),
            Self::Protocol(message) => format!("Error: invalid server response ({})", message),
            Self::Auth => "Please log in first.".to_string(),
        }
    }

    /// 認証エラーかどうか（ログイン画面へのリダイレクトが必要）
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Auth)
    }
}
