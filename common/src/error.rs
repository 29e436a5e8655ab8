//! エラー型定義

use thiserror::Error;

/// 汎用の失敗メッセージ（サーバーが詳細を返さなかった場合）
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze blueprint. Please try again.";

/// タイムアウト時のメッセージ
pub const TIMEOUT_MESSAGE: &str =
    "Analysis timed out. The server took too long to respond, please try again.";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// レスポンスボディを結果型に変換できない
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// ローカル検証エラー（ネットワークには到達しない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported file type \"{0}\". Please upload a PDF, PNG or JPEG file")]
    UnsupportedType(String),

    #[error("File too large ({}). Maximum size is 20 MB", format_mib(.size_bytes))]
    TooLarge { size_bytes: u64 },
}

fn format_mib(size_bytes: &u64) -> String {
    format!("{:.1} MB", *size_bytes as f64 / (1024.0 * 1024.0))
}

/// 解析リクエストの失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Server error {status}: {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    Server { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Could not read file: {0}")]
    Read(String),
}

impl AnalysisError {
    /// 通知に出すメッセージ（サーバーの `detail` はそのまま使う）
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
            AnalysisError::Server { detail: Some(detail), .. } => detail.clone(),
            AnalysisError::Read(reason) => format!("Could not read the selected file: {}", reason),
            AnalysisError::Server { detail: None, .. }
            | AnalysisError::Transport(_)
            | AnalysisError::InvalidResponse(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AnalysisError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let error = Error::Parse("missing analysis".to_string());
        assert_eq!(format!("{}", error), "Parse error: missing analysis");
    }

    #[test]
    fn test_validation_unsupported_message() {
        let error = ValidationError::UnsupportedType("image/gif".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Unsupported file type"));
        assert!(display.contains("image/gif"));
    }

    #[test]
    fn test_validation_too_large_message() {
        let error = ValidationError::TooLarge { size_bytes: 25 * 1024 * 1024 };
        let display = format!("{}", error);
        assert!(display.contains("too large"));
        assert!(display.contains("25.0 MB"));
    }

    #[test]
    fn test_server_detail_used_verbatim() {
        let error = AnalysisError::Server {
            status: 500,
            detail: Some("Could not convert PDF to image".to_string()),
        };
        assert_eq!(error.user_message(), "Could not convert PDF to image");
    }

    #[test]
    fn test_generic_message_fallbacks() {
        let no_detail = AnalysisError::Server { status: 502, detail: None };
        assert_eq!(no_detail.user_message(), GENERIC_FAILURE_MESSAGE);

        let transport = AnalysisError::Transport("connection refused".to_string());
        assert_eq!(transport.user_message(), GENERIC_FAILURE_MESSAGE);

        let invalid = AnalysisError::InvalidResponse("missing field".to_string());
        assert_eq!(invalid.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_timeout_is_distinct() {
        let error = AnalysisError::Timeout { seconds: 120 };
        assert!(error.is_timeout());
        assert_eq!(error.user_message(), TIMEOUT_MESSAGE);
        assert!(format!("{}", error).contains("120"));

        let server = AnalysisError::Server { status: 504, detail: None };
        assert!(!server.is_timeout());
    }
}
