//! File Token Store Implementation
//!
//! TokenStoreのJSONファイル実装（ブラウザの localStorage 相当のキー・バリューを保持）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::repositories::token_store::{TokenStore, TOKEN_KEY};

/// JSONファイルベースのトークンストア
///
/// ファイルはキー・バリューのオブジェクトで、トークンは `token` キーに入る
pub struct FileTokenStore {
    path: PathBuf,
}

/// ストレージファイルの内部表現
type StorageEntries = BTreeMap<String, String>;

impl FileTokenStore {
    /// 新しいストアを作成（`~` は展開される）
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルから全エントリを読み込む（同期処理）
    fn read_entries(path: &Path) -> Result<StorageEntries> {
        if !path.exists() {
            return Ok(StorageEntries::new());
        }

        let content = fs::read_to_string(path).context("Failed to read token storage file")?;
        let entries: StorageEntries =
            serde_json::from_str(&content).context("Failed to parse token storage JSON")?;

        Ok(entries)
    }

    /// 書き込み前の読み込み。壊れたファイルは空として扱い上書きする
    fn read_entries_for_update(path: &Path) -> StorageEntries {
        Self::read_entries(path).unwrap_or_else(|e| {
            warn!("Discarding unreadable token storage: {:#}", e);
            StorageEntries::new()
        })
    }

    /// 全エントリを書き込む（同期処理）
    fn write_entries(path: &Path, entries: &StorageEntries) -> Result<()> {
        if entries.is_empty() {
            if path.exists() {
                fs::remove_file(path).context("Failed to remove token storage file")?;
            }
            return Ok(());
        }

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create token storage directory")?;
        }

        let json =
            serde_json::to_string_pretty(entries).context("Failed to serialize token storage")?;
        fs::write(path, json).context("Failed to write token storage file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .context("Failed to restrict token storage permissions")?;
        }

        Ok(())
    }

    fn load_sync(path: &Path) -> Result<Option<String>> {
        let entries = Self::read_entries(path)?;
        Ok(entries
            .get(TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .cloned())
    }

    fn save_sync(path: &Path, token: &str) -> Result<()> {
        let mut entries = Self::read_entries_for_update(path);
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        Self::write_entries(path, &entries)?;

        info!("Saved session token to {}", path.display());
        Ok(())
    }

    fn remove_sync(path: &Path) -> Result<()> {
        let mut entries = Self::read_entries_for_update(path);
        if entries.remove(TOKEN_KEY).is_none() && !path.exists() {
            return Ok(());
        }
        Self::write_entries(path, &entries)?;

        info!("Removed session token from {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn save(&self, token: &str) -> Result<()> {
        let path = self.path.clone();
        let token = token.to_string();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &token))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn remove(&self) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::remove_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}
