//! # Token Store Trait
//!
//! セッショントークンの永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

/// 永続ストレージ上でトークンを保持するキー
pub const TOKEN_KEY: &str = "token";

/// トークンストア
///
/// 単一のトークンスロットを永続化するアダプターのインターフェース
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// 保存されているトークンを読み込む
    ///
    /// # Returns
    ///
    /// 保存されていない場合は `None`
    ///
    /// # Errors
    ///
    /// ストレージの読み込みに失敗した場合にエラーを返す
    async fn load(&self) -> Result<Option<String>>;

    /// トークンを保存する
    ///
    /// # Arguments
    ///
    /// * `token` - 保存するトークン（空でない）
    ///
    /// # Errors
    ///
    /// ストレージの書き込みに失敗した場合にエラーを返す
    async fn save(&self, token: &str) -> Result<()>;

    /// トークンのエントリを削除する
    ///
    /// # Errors
    ///
    /// ストレージの書き込みに失敗した場合にエラーを返す
    async fn remove(&self) -> Result<()>;
}
