//! # SelectedFile Entity
//!
//! ユーザーが選択したアップロード対象ファイル

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// ファイル内容の読み出し元
///
/// 選択されたファイルのバイト列を範囲指定で読み出す。
/// ローカルファイルやメモリ上のバッファなど、実装は Adapter 層が提供する
pub trait ByteSource: Send + Sync {
    /// `range` のバイト列を読み出す
    fn read_range(&self, range: Range<u64>) -> std::io::Result<Vec<u8>>;
}

impl ByteSource for Vec<u8> {
    fn read_range(&self, range: Range<u64>) -> std::io::Result<Vec<u8>> {
        let start = range.start as usize;
        let end = range.end as usize;
        self.get(start..end).map(<[u8]>::to_vec).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("range {}..{} out of bounds ({} bytes)", start, end, self.len()),
            )
        })
    }
}

/// 選択されたファイル
///
/// 名前、バイト長、MIMEタイプと内容の読み出し元を持つ。
/// 再選択されると丸ごと置き換えられる
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    source: Arc<dyn ByteSource>,
}

impl SelectedFile {
    /// 新しい選択ファイルを作成
    ///
    /// # Arguments
    ///
    /// * `name` - ファイル名
    /// * `mime_type` - 宣言されたMIMEタイプ（空文字列も可）
    /// * `size` - バイト長
    /// * `source` - 内容の読み出し元
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        source: Arc<dyn ByteSource>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            source,
        }
    }

    /// メモリ上のバイト列から作成
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self::new(name, mime_type, size, Arc::new(bytes))
    }

    /// 拡張子（最後の `.` 以降、小文字化）を返す
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// 内容の読み出し元を返す
    pub fn source(&self) -> Arc<dyn ByteSource> {
        self.source.clone()
    }

    /// 指定範囲を読み出す
    pub fn read_range(&self, range: Range<u64>) -> std::io::Result<Vec<u8>> {
        self.source.read_range(range)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
