//! # Upload Repository Trait
//!
//! ファイルとチャンクのアップロードを抽象化

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::dataset::UploadedDataset;
use crate::domain::entities::selected_file::SelectedFile;
use crate::domain::entities::upload_job::FileChunk;
use crate::domain::error::ClientError;

/// バイト単位の転送進捗コールバック `(送信済みバイト数, 総バイト数)`
pub type TransferProgress = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// チャンクアップロードの応答
///
/// 応答形式は寛容に扱う。最終チャンクの応答がデータセットを含む場合のみ `dataset` が入る
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkAck {
    pub dataset: Option<UploadedDataset>,
}

impl ChunkAck {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_dataset(dataset: UploadedDataset) -> Self {
        Self {
            dataset: Some(dataset),
        }
    }
}

/// アップロードリポジトリ
///
/// 認証付きでファイルをリモートに送信する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// ファイル全体を1リクエストでアップロード
    ///
    /// # Arguments
    ///
    /// * `file` - アップロードするファイル
    /// * `token` - 認証トークン
    /// * `progress` - バイト単位の進捗コールバック
    ///
    /// # Returns
    ///
    /// サーバーが解析したデータセット
    ///
    /// # Errors
    ///
    /// 通信失敗は `Transport`、応答形式の不正は `Protocol`
    async fn upload_file(
        &self,
        file: &SelectedFile,
        token: &str,
        progress: TransferProgress,
    ) -> Result<UploadedDataset, ClientError>;

    /// チャンクを1つアップロード
    ///
    /// # Arguments
    ///
    /// * `chunk` - 送信するチャンク
    /// * `token` - 認証トークン
    ///
    /// # Errors
    ///
    /// 通信失敗は `Transport`、応答形式の不正は `Protocol`
    async fn upload_chunk(&self, chunk: &FileChunk, token: &str) -> Result<ChunkAck, ClientError>;
}
