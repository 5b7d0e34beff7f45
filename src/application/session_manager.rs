//! # Session Manager
//!
//! セッショントークンの唯一の所有者
//!
//! 状態遷移（`SessionState::apply`）と永続化（`TokenStore`）を分離し、
//! 必要なコンポーネントへ明示的に注入して使う

use std::sync::{Arc, RwLock};

use log::{info, warn};

use crate::domain::error::ClientError;
use crate::domain::repositories::token_store::TokenStore;

/// 状態遷移に伴う永続化操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistAction {
    /// トークンを保存
    Save(String),
    /// トークンのエントリを削除
    Remove,
}

/// セッション状態（純粋な値）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    token: String,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// トークンが空でなければ認証済み
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// 新しいトークンを適用し、必要な永続化操作を返す
    ///
    /// # 例
    ///
    /// ```
    /// use dataclean::application::session_manager::{PersistAction, SessionState};
    ///
    /// let mut state = SessionState::new();
    /// assert_eq!(state.apply("abc"), PersistAction::Save("abc".to_string()));
    /// assert!(state.is_authenticated());
    ///
    /// assert_eq!(state.apply(""), PersistAction::Remove);
    /// assert_eq!(state.token(), "");
    /// ```
    pub fn apply(&mut self, new_token: &str) -> PersistAction {
        if new_token.is_empty() {
            self.token.clear();
            PersistAction::Remove
        } else {
            self.token = new_token.to_string();
            PersistAction::Save(self.token.clone())
        }
    }
}

/// セッションマネージャー
///
/// メモリ上の値が常に正。永続化はベストエフォートで、失敗してもログに残すだけ
pub struct SessionManager<S: TokenStore> {
    store: Arc<S>,
    state: RwLock<SessionState>,
}

impl<S: TokenStore> SessionManager<S> {
    /// 空のセッションで作成
    ///
    /// # Arguments
    ///
    /// * `store` - トークンの永続化先
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::new()),
        }
    }

    /// 永続ストレージからトークンを読み込む（起動時に1回だけ呼ぶ）
    pub async fn initialize(&self) {
        let token = match self.store.load().await {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to read stored session token: {:#}", e);
                String::new()
            }
        };

        if token.is_empty() {
            info!("No stored session token found");
        } else {
            info!("Restored session token from storage");
        }

        self.write_state().apply(&token);
    }

    /// トークンを設定する。空文字列ならセッションを破棄する
    pub async fn set_token(&self, new_token: &str) {
        let action = self.write_state().apply(new_token);
        self.persist(action).await;
    }

    /// ログアウト
    pub async fn clear(&self) {
        self.set_token("").await;
    }

    /// 現在のトークン（未認証なら空文字列）
    pub fn token(&self) -> String {
        self.read_state().token().to_string()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated()
    }

    /// トークンを返す。未認証なら `ClientError::Auth`
    pub fn require_token(&self) -> Result<String, ClientError> {
        let state = self.read_state();
        if state.is_authenticated() {
            Ok(state.token().to_string())
        } else {
            Err(ClientError::Auth)
        }
    }

    async fn persist(&self, action: PersistAction) {
        let result = match &action {
            PersistAction::Save(token) => self.store.save(token).await,
            PersistAction::Remove => self.store.remove().await,
        };

        match (result, action) {
            (Ok(()), PersistAction::Save(_)) => info!("Saved session token"),
            (Ok(()), PersistAction::Remove) => info!("Removed session token"),
            (Err(e), _) => warn!("Failed to persist session token: {:#}", e),
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
