//! # Upload Outcome DTO
//!
//! アップロード結果のData Transfer Object

use crate::domain::entities::upload_job::UploadStrategy;

/// アップロード結果のサマリー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// 使用した転送戦略
    pub strategy: UploadStrategy,
    /// 送信したリクエスト数
    pub requests_sent: u32,
    /// データセットが公開されたかどうか
    pub dataset_published: bool,
    /// 最終的な進捗（%）
    pub final_progress: u8,
}

impl UploadOutcome {
    /// 表示用の一行サマリー
    ///
    /// # 例
    ///
    /// ```
    /// use dataclean::application::dto::upload_outcome::UploadOutcome;
    /// use dataclean::domain::entities::upload_job::UploadStrategy;
    ///
    /// let outcome = UploadOutcome {
    ///     strategy: UploadStrategy::SingleShot,
    ///     requests_sent: 1,
    ///     dataset_published: true,
    ///     final_progress: 100,
    /// };
    /// assert_eq!(outcome.describe(), "single-shot upload, 1 request(s), 100%");
    /// ```
    pub fn describe(&self) -> String {
        format!(
            "{} upload, {} request(s), {}%",
            self.strategy.label(),
            self.requests_sent,
            self.final_progress
        )
    }
}
