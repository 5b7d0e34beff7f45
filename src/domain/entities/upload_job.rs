//! # Upload Job Value Objects
//!
//! 転送戦略の選択とチャンク分割、進捗計算

/// 1 MiB
pub const MIB: u64 = 1024 * 1024;

/// この値以下なら一括アップロード、超えるとチャンクアップロード
pub const FILE_SIZE_THRESHOLD: u64 = 10 * MIB;

/// チャンク1つあたりのバイト数
pub const CHUNK_SIZE: u64 = 5 * MIB;

/// 転送戦略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStrategy {
    /// ファイル全体を1リクエストで送信
    SingleShot,
    /// 固定サイズのバイト範囲を順番に送信
    Chunked(ChunkPlan),
}

impl UploadStrategy {
    /// ファイルサイズから転送戦略を選ぶ
    ///
    /// # 例
    ///
    /// ```
    /// use dataclean::domain::entities::upload_job::{UploadStrategy, FILE_SIZE_THRESHOLD, MIB};
    ///
    /// assert_eq!(UploadStrategy::for_size(FILE_SIZE_THRESHOLD), UploadStrategy::SingleShot);
    ///
    /// match UploadStrategy::for_size(23 * MIB) {
    ///     UploadStrategy::Chunked(plan) => assert_eq!(plan.total_chunks(), 5),
    ///     UploadStrategy::SingleShot => panic!("expected chunked upload"),
    /// }
    /// ```
    pub fn for_size(file_size: u64) -> Self {
        if file_size <= FILE_SIZE_THRESHOLD {
            Self::SingleShot
        } else {
            Self::Chunked(ChunkPlan::new(file_size))
        }
    }

    /// ログ表示用の名前
    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleShot => "single-shot",
            Self::Chunked(_) => "chunked",
        }
    }
}

/// チャンク分割計画
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    file_size: u64,
    chunk_size: u64,
}

impl ChunkPlan {
    /// 標準のチャンクサイズで分割計画を作成
    pub fn new(file_size: u64) -> Self {
        Self::with_chunk_size(file_size, CHUNK_SIZE)
    }

    /// チャンクサイズを指定して分割計画を作成
    ///
    /// `chunk_size` が0の場合はファイル全体を1チャンクとして扱う
    pub fn with_chunk_size(file_size: u64, chunk_size: u64) -> Self {
        let chunk_size = if chunk_size == 0 {
            file_size.max(1)
        } else {
            chunk_size
        };
        Self {
            file_size,
            chunk_size,
        }
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// `ceil(file_size / chunk_size)`
    pub fn total_chunks(&self) -> u32 {
        self.file_size.div_ceil(self.chunk_size) as u32
    }

    /// `index` 番目のチャンクのバイト範囲
    pub fn range(&self, index: u32) -> Option<ChunkRange> {
        if index >= self.total_chunks() {
            return None;
        }
        let start = u64::from(index) * self.chunk_size;
        let end = (start + self.chunk_size).min(self.file_size);
        Some(ChunkRange {
            index,
            total_chunks: self.total_chunks(),
            start,
            end,
        })
    }

    /// 全チャンクの範囲を先頭から順に返す
    pub fn ranges(&self) -> impl Iterator<Item = ChunkRange> + '_ {
        (0..self.total_chunks()).filter_map(move |index| self.range(index))
    }
}

/// 1チャンク分のバイト範囲 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub index: u32,
    pub total_chunks: u32,
    pub start: u64,
    pub end: u64,
}

impl ChunkRange {
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total_chunks
    }
}

/// 送信するチャンク
///
/// バイト範囲の内容と、サーバーがファイルを組み立てるためのメタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChunk {
    pub index: u32,
    pub total_chunks: u32,
    pub file_name: String,
    pub data: Vec<u8>,
}

impl FileChunk {
    pub fn new(range: &ChunkRange, file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            index: range.index,
            total_chunks: range.total_chunks,
            file_name: file_name.into(),
            data,
        }
    }
}

/// `round(done * 100 / total)` を整数演算で計算する（0.5は切り上げ）
///
/// `total` が0の場合は100を返す
pub fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let done = done.min(total) as u128;
    let total = total as u128;
    ((done * 200 + total) / (total * 2)) as u8
}

/// アップロード進捗（0〜100、単調非減少）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadProgress {
    percent: u8,
}

impl UploadProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// 進捗を進める。値が前進した場合のみ `true` を返す
    pub fn advance_to(&mut self, percent: u8) -> bool {
        let percent = percent.min(100);
        if percent > self.percent {
            self.percent = percent;
            true
        } else {
            false
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}
