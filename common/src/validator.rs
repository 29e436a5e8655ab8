//! アップロード前のファイル検証
//!
//! 宣言されたMIMEタイプとバイトサイズのみで判定する（中身は見ない）。

use crate::error::ValidationError;
use crate::types::{CandidateFile, MediaType};

/// 最大アップロードサイズ（20 MiB）
pub const MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// 受け付けるMIMEタイプ
pub const ACCEPTED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/jpg",
];

/// ファイル選択ダイアログの `accept` 属性
pub const ACCEPT_ATTRIBUTE: &str = "application/pdf,image/png,image/jpeg,image/jpg";

/// MIME文字列を受け付け可能なメディアタイプに変換
pub fn media_type_for(mime_type: &str) -> Option<MediaType> {
    match mime_type.trim().to_ascii_lowercase().as_str() {
        "application/pdf" => Some(MediaType::Pdf),
        "image/png" => Some(MediaType::Png),
        "image/jpeg" | "image/jpg" => Some(MediaType::Jpeg),
        _ => None,
    }
}

/// 宣言タイプとサイズを検証
///
/// タイプ → サイズの順に判定する。
pub fn validate(mime_type: &str, size_bytes: u64) -> Result<MediaType, ValidationError> {
    let media_type = media_type_for(mime_type)
        .ok_or_else(|| ValidationError::UnsupportedType(mime_type.to_string()))?;

    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge { size_bytes });
    }

    Ok(media_type)
}

pub fn validate_candidate<H>(file: &CandidateFile<H>) -> Result<MediaType, ValidationError> {
    validate(&file.mime_type, file.size_bytes)
}
