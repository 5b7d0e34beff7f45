//! # Progress Tracking
//!
//! 進捗の単調性を保証して表示層へ通知する

use std::sync::{Arc, Mutex};

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::upload_job::UploadProgress;

/// 進捗の通知先（表示層）
#[cfg_attr(test, automock)]
pub trait ProgressObserver: Send + Sync {
    /// 進捗が前進したときに呼ばれる
    fn on_progress(&self, percent: u8);
}

/// 何もしない通知先
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_progress(&self, _percent: u8) {}
}

/// 進捗トラッカー
///
/// 転送コールバックから共有されるため内部可変性を持つ
#[derive(Clone)]
pub struct ProgressTracker {
    progress: Arc<Mutex<UploadProgress>>,
    observer: Arc<dyn ProgressObserver>,
}

impl ProgressTracker {
    pub fn new(observer: Arc<dyn ProgressObserver>) -> Self {
        Self {
            progress: Arc::new(Mutex::new(UploadProgress::new())),
            observer,
        }
    }

    /// 現在の進捗（%）
    pub fn percent(&self) -> u8 {
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .percent()
    }

    /// 進捗を更新する。前進した場合のみ通知する
    pub fn report(&self, percent: u8) {
        let advanced = self
            .progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .advance_to(percent);
        if advanced {
            self.observer.on_progress(percent.min(100));
        }
    }
}
