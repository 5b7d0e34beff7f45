//! # File Validation Service
//!
//! アップロード前のファイル検証

use crate::domain::entities::selected_file::SelectedFile;
use crate::domain::entities::upload_job::MIB;
use crate::domain::error::ClientError;

/// 受け付けるファイルサイズの上限（100 MiB）
pub const MAX_FILE_SIZE: u64 = 100 * MIB;

/// 受け付ける拡張子
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["csv", "xlsx"];

/// 受け付けるMIMEタイプ
pub const ACCEPTED_MIME_TYPES: [&str; 2] = [
    "text/csv",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Only CSV or XLSX files are supported.";
pub const FILE_TOO_LARGE_MESSAGE: &str = "File size exceeds the 100 MB limit.";

/// ファイル検証サービス
pub struct FileValidationService;

impl FileValidationService {
    /// 拡張子とMIMEタイプのどちらかが許可されていれば `true`
    pub fn is_supported_type(file: &SelectedFile) -> bool {
        let extension_ok = file
            .extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));
        let mime_ok = ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str());
        extension_ok || mime_ok
    }

    /// ファイルを検証する
    ///
    /// # Errors
    ///
    /// 形式が不正、またはサイズが上限を超える場合に `ClientError::Validation`
    pub fn validate(file: &SelectedFile) -> Result<(), ClientError> {
        if !Self::is_supported_type(file) {
            return Err(ClientError::Validation(UNSUPPORTED_TYPE_MESSAGE.to_string()));
        }
        if file.size > MAX_FILE_SIZE {
            return Err(ClientError::Validation(FILE_TOO_LARGE_MESSAGE.to_string()));
        }
        Ok(())
    }
}
