//! APIレスポンスパーサー
//!
//! `/api/analyze-blueprint` の成功ボディと、失敗時の `{ "detail": ... }` を扱う。

use crate::error::{AnalysisError, Error, Result};
use crate::types::AnalysisResult;

/// 解析エンドポイントのパス
pub const ANALYZE_PATH: &str = "/api/analyze-blueprint";

/// ヘルスチェック用エンドポイント
pub const HEALTH_PATH: &str = "/api/";

/// multipartのフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// クライアント側タイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// ベースURLとパスを結合（末尾の `/` は除去）
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), path)
}

/// 成功レスポンスをパース
pub fn parse_analysis_response(body: &str) -> Result<AnalysisResult> {
    serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("analysis response: {}", e)))
}

/// 失敗レスポンスから `detail` を取り出す
///
/// 文字列でない `detail`（バリデーションエラーの配列など）は無視する。
pub fn extract_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let detail = value.get("detail")?.as_str()?;
    if detail.trim().is_empty() {
        None
    } else {
        Some(detail.to_string())
    }
}

/// ステータスとボディから結果を組み立てる（成功/失敗どちらも）
pub fn interpret_response(status: u16, body: &str) -> std::result::Result<AnalysisResult, AnalysisError> {
    if (200..300).contains(&status) {
        parse_analysis_response(body).map_err(|e| AnalysisError::InvalidResponse(e.to_string()))
    } else {
        Err(AnalysisError::Server {
            status,
            detail: extract_error_detail(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("https://api.example.com/", ANALYZE_PATH),
            "https://api.example.com/api/analyze-blueprint"
        );
        assert_eq!(
            endpoint_url("http://localhost:8001", HEALTH_PATH),
            "http://localhost:8001/api/"
        );
    }

    #[test]
    fn test_parse_analysis_response() {
        let body = r#"{
            "success": true,
            "filename": "scan.png",
            "original_image": "data:image/png;base64,AAAA",
            "annotated_image": "data:image/png;base64,BBBB",
            "analysis": {"scale": "1:50", "scale_confidence": "high", "dimensions": [], "notes": "empty sheet"}
        }"#;
        let result = parse_analysis_response(body).expect("パース失敗");
        assert_eq!(result.filename, "scan.png");
        assert_eq!(result.analysis.notes.as_deref(), Some("empty sheet"));
    }

    #[test]
    fn test_parse_rejects_missing_analysis() {
        let err = parse_analysis_response(r#"{"filename": "x.png"}"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_extract_error_detail() {
        assert_eq!(
            extract_error_detail(r#"{"detail": "Could not convert PDF to image"}"#),
            Some("Could not convert PDF to image".to_string())
        );
        assert_eq!(extract_error_detail(r#"{"detail": ""}"#), None);
        assert_eq!(extract_error_detail(r#"{"detail": [{"msg": "field required"}]}"#), None);
        assert_eq!(extract_error_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(extract_error_detail("<html>Bad Gateway</html>"), None);
        assert_eq!(extract_error_detail(""), None);
    }

    #[test]
    fn test_interpret_response_success() {
        let result = interpret_response(200, r#"{"analysis": {"dimensions": []}}"#);
        assert!(result.is_ok());
    }

    /// モデル出力由来の null / 数値が混ざっても成功として扱う
    #[test]
    fn test_interpret_response_tolerates_loose_model_output() {
        let body = r#"{"analysis": {
            "scale": "1:100",
            "scale_confidence": null,
            "dimensions": [
                {"label": "Wall A", "value": 12, "type": null, "confidence": null},
                {"label": "Wall B", "value": null, "type": "detected", "confidence": "high"}
            ]
        }}"#;
        let result = interpret_response(200, body).expect("解析結果の変換失敗");
        let dims = &result.analysis.dimensions;
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0].value, "12");
        assert_eq!(dims[1].value, "");
    }

    #[test]
    fn test_interpret_response_invalid_success_body() {
        let result = interpret_response(200, "not json");
        assert!(matches!(result, Err(AnalysisError::InvalidResponse(_))));
    }

    #[test]
    fn test_interpret_response_server_error() {
        let result = interpret_response(500, r#"{"detail": "Analysis failed: quota"}"#);
        assert_eq!(
            result,
            Err(AnalysisError::Server {
                status: 500,
                detail: Some("Analysis failed: quota".to_string())
            })
        );

        let result = interpret_response(502, "Bad Gateway");
        assert_eq!(result, Err(AnalysisError::Server { status: 502, detail: None }));
    }
}
