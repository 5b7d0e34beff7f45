//! # Upload File Use Case
//!
//! ファイルの検証、転送戦略の選択、アップロードの実行

use std::ops::Range;
use std::sync::Arc;

use log::{info, warn};

use crate::application::dto::upload_outcome::UploadOutcome;
use crate::domain::entities::dataset::UploadedDataset;
use crate::domain::entities::selected_file::SelectedFile;
use crate::domain::entities::upload_job::{percent, ChunkPlan, FileChunk, UploadStrategy};
use crate::domain::error::ClientError;
use crate::domain::repositories::upload_repository::{TransferProgress, UploadRepository};
use crate::domain::services::file_validation::FileValidationService;
use crate::domain::services::progress::{ProgressObserver, ProgressTracker};

pub const NO_FILE_SELECTED_MESSAGE: &str = "Please select a file first.";

/// アップロードコーディネーター
///
/// 選択中のファイルと最後に公開されたデータセットを保持する。
/// `upload` は `&mut self` を取るため、同じコーディネーターで同時に2つのアップロードは走らない
pub struct UploadCoordinator<U: UploadRepository> {
    upload_repository: Arc<U>,
    observer: Arc<dyn ProgressObserver>,
    tracker: ProgressTracker,
    selected: Option<SelectedFile>,
    dataset: Option<UploadedDataset>,
}

impl<U: UploadRepository> UploadCoordinator<U> {
    /// 新しいコーディネーターを作成
    ///
    /// # Arguments
    ///
    /// * `upload_repository` - アップロードリポジトリ
    /// * `observer` - 進捗の通知先
    pub fn new(upload_repository: Arc<U>, observer: Arc<dyn ProgressObserver>) -> Self {
        Self {
            upload_repository,
            tracker: ProgressTracker::new(observer.clone()),
            observer,
            selected: None,
            dataset: None,
        }
    }

    /// ファイルを検証し、選択中のファイルにする
    ///
    /// # Errors
    ///
    /// 検証に失敗した場合は `ClientError::Validation`。その場合、選択状態は変わらない
    pub fn validate_selection(&mut self, candidate: SelectedFile) -> Result<(), ClientError> {
        FileValidationService::validate(&candidate)?;
        info!(
            "Selected {} ({} bytes, type {:?})",
            candidate.name, candidate.size, candidate.mime_type
        );
        self.selected = Some(candidate);
        Ok(())
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// 最後に公開されたデータセット
    pub fn dataset(&self) -> Option<&UploadedDataset> {
        self.dataset.as_ref()
    }

    /// 現在のアップロード進捗（%）
    pub fn progress(&self) -> u8 {
        self.tracker.percent()
    }

    /// 選択中のファイルをアップロードする
    ///
    /// 10 MiB 以下なら一括、超えると 5 MiB ずつ順番に送信する。
    /// チャンクが1つでも失敗すると残りは送らず、進捗はその時点の値のまま残る
    ///
    /// # Arguments
    ///
    /// * `token` - 認証トークン
    ///
    /// # Errors
    ///
    /// - ファイル未選択: `ClientError::Validation`
    /// - トークンが空: `ClientError::Auth`
    /// - 通信失敗または応答不正: `Transport` / `Protocol`
    pub async fn upload(&mut self, token: &str) -> Result<UploadOutcome, ClientError> {
        let file = self
            .selected
            .clone()
            .ok_or_else(|| ClientError::Validation(NO_FILE_SELECTED_MESSAGE.to_string()))?;

        if token.is_empty() {
            return Err(ClientError::Auth);
        }

        self.tracker = ProgressTracker::new(self.observer.clone());

        let strategy = UploadStrategy::for_size(file.size);
        info!(
            "Uploading {} ({} bytes) using {} strategy",
            file.name,
            file.size,
            strategy.label()
        );

        match strategy {
            UploadStrategy::SingleShot => self.upload_single(&file, token).await,
            UploadStrategy::Chunked(plan) => self.upload_chunked(&file, plan, token).await,
        }
    }

    async fn upload_single(
        &mut self,
        file: &SelectedFile,
        token: &str,
    ) -> Result<UploadOutcome, ClientError> {
        let tracker = self.tracker.clone();
        let progress: TransferProgress =
            Arc::new(move |loaded, total| tracker.report(percent(loaded, total)));

        let dataset = self
            .upload_repository
            .upload_file(file, token, progress)
            .await
            .inspect_err(|e| warn!("Upload of {} failed: {}", file.name, e))?;

        info!(
            "Upload of {} complete: {} rows, {} typed columns",
            file.name,
            dataset.row_count(),
            dataset.columns().len()
        );
        self.dataset = Some(dataset);

        Ok(UploadOutcome {
            strategy: UploadStrategy::SingleShot,
            requests_sent: 1,
            dataset_published: true,
            final_progress: self.tracker.percent(),
        })
    }

    async fn upload_chunked(
        &mut self,
        file: &SelectedFile,
        plan: ChunkPlan,
        token: &str,
    ) -> Result<UploadOutcome, ClientError> {
        let total_chunks = plan.total_chunks();
        let mut completed: u32 = 0;
        let mut final_dataset = None;

        for range in plan.ranges() {
            let data = read_bytes(file, range.start..range.end).await?;
            let chunk = FileChunk::new(&range, file.name.clone(), data);

            info!(
                "Uploading chunk {}/{} of {} ({} bytes)",
                range.index + 1,
                total_chunks,
                file.name,
                range.len()
            );

            let ack = self
                .upload_repository
                .upload_chunk(&chunk, token)
                .await
                .inspect_err(|e| {
                    warn!(
                        "Chunk {}/{} of {} failed, aborting: {}",
                        range.index + 1,
                        total_chunks,
                        file.name,
                        e
                    )
                })?;

            completed += 1;
            self.tracker
                .report(percent(u64::from(completed), u64::from(total_chunks)));

            if range.is_last() {
                final_dataset = ack.dataset;
            }
        }

        let dataset_published = match final_dataset {
            Some(dataset) => {
                info!(
                    "Chunked upload of {} complete: {} rows, {} typed columns",
                    file.name,
                    dataset.row_count(),
                    dataset.columns().len()
                );
                self.dataset = Some(dataset);
                true
            }
            None => {
                warn!(
                    "Chunked upload of {} complete, but the final response carried no dataset",
                    file.name
                );
                false
            }
        };

        Ok(UploadOutcome {
            strategy: UploadStrategy::Chunked(plan),
            requests_sent: completed,
            dataset_published,
            final_progress: self.tracker.percent(),
        })
    }
}

/// ファイルの指定範囲を読み出す（ブロッキングI/Oは別スレッドで実行）
async fn read_bytes(file: &SelectedFile, range: Range<u64>) -> Result<Vec<u8>, ClientError> {
    let source = file.source();
    tokio::task::spawn_blocking(move || source.read_range(range))
        .await
        .map_err(|e| ClientError::Transport(format!("Failed to spawn blocking task: {}", e)))?
        .map_err(|e| ClientError::Transport(format!("Failed to read {}: {}", file.name, e)))
}
