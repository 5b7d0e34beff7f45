//! HTTP Upload Repository Implementation
//!
//! UploadRepositoryのHTTP（multipart）実装

use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::sync::Arc;

use crate::adapter::http::client::{ApiClient, UPLOAD_CHUNK_ENDPOINT, UPLOAD_ENDPOINT};
use crate::adapter::http::models::{chunk_ack_from_value, DatasetResponse};
use crate::adapter::http::response::read_json;
use crate::adapter::http::transfer::progress_part;
use crate::domain::entities::dataset::UploadedDataset;
use crate::domain::entities::selected_file::SelectedFile;
use crate::domain::entities::upload_job::FileChunk;
use crate::domain::error::ClientError;
use crate::domain::repositories::upload_repository::{
    ChunkAck, TransferProgress, UploadRepository,
};

pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";
pub const CHUNK_UPLOAD_FAILED_MESSAGE: &str = "Chunk upload failed";

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// HTTPアップロードリポジトリ
pub struct HttpUploadRepository {
    client: Arc<ApiClient>,
}

impl HttpUploadRepository {
    /// 新しいリポジトリを作成
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// ファイル全体を読み込む（ブロッキングI/Oは別スレッドで実行）
    async fn read_all(file: &SelectedFile) -> Result<Vec<u8>, ClientError> {
        let source = file.source();
        let size = file.size;
        tokio::task::spawn_blocking(move || source.read_range(0..size))
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to spawn blocking task: {}", e)))?
            .map_err(|e| ClientError::Transport(format!("Failed to read {}: {}", file.name, e)))
    }

    fn declared_mime(file: &SelectedFile) -> &str {
        if file.mime_type.trim().is_empty() {
            FALLBACK_MIME_TYPE
        } else {
            &file.mime_type
        }
    }

    /// チャンク送信用のフォーム（`file`, `chunkIndex`, `totalChunks`, `fileName`）
    fn chunk_form(chunk: &FileChunk) -> Form {
        let part = Part::bytes(chunk.data.clone()).file_name(chunk.file_name.clone());
        Form::new()
            .part("file", part)
            .text("chunkIndex", chunk.index.to_string())
            .text("totalChunks", chunk.total_chunks.to_string())
            .text("fileName", chunk.file_name.clone())
    }
}

#[async_trait]
impl UploadRepository for HttpUploadRepository {
    async fn upload_file(
        &self,
        file: &SelectedFile,
        token: &str,
        progress: TransferProgress,
    ) -> Result<UploadedDataset, ClientError> {
        let data = Self::read_all(file).await?;
        let total = data.len() as u64;

        let part = progress_part(data, progress.clone())
            .file_name(file.name.clone())
            .mime_str(Self::declared_mime(file))
            .map_err(|e| {
                ClientError::Validation(format!("Invalid MIME type {:?}: {}", file.mime_type, e))
            })?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .send(
                self.client
                    .authorized_post(UPLOAD_ENDPOINT, token)
                    .multipart(form),
            )
            .await?;

        let body: DatasetResponse = read_json(response, UPLOAD_FAILED_MESSAGE).await?;
        let dataset = body.into_dataset()?;

        // Body fully accepted
        progress(total, total);
        Ok(dataset)
    }

    async fn upload_chunk(&self, chunk: &FileChunk, token: &str) -> Result<ChunkAck, ClientError> {
        let response = self
            .client
            .send(
                self.client
                    .authorized_post(UPLOAD_CHUNK_ENDPOINT, token)
                    .multipart(Self::chunk_form(chunk)),
            )
            .await?;

        let body: Value = read_json(response, CHUNK_UPLOAD_FAILED_MESSAGE).await?;
        debug!(
            "Chunk {}/{} acknowledged: {}",
            chunk.index + 1,
            chunk.total_chunks,
            body
        );

        Ok(chunk_ack_from_value(body))
    }
}
