//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use blueprint_measure::config::Config;
use blueprint_measure::error::BlueprintError;
use blueprint_measure::picker;
use blueprint_measure_common::{AnalysisError, ValidationError};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを指定した場合
#[test]
fn test_pick_nonexistent_file() {
    let result = picker::candidate_from_path(Path::new("/nonexistent/path/12345/plan.pdf"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, BlueprintError::FileNotFound(_)));
    assert!(err.to_string().contains("plan.pdf"));
}

/// 壊れた設定ファイル
#[test]
fn test_load_broken_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(BlueprintError::JsonParse(_))));
}

/// BlueprintErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        BlueprintError::Config("テスト設定エラー".to_string()),
        BlueprintError::MissingBackendUrl,
        BlueprintError::FileNotFound("plan.pdf".to_string()),
        BlueprintError::NoFileSelected,
        BlueprintError::Unreachable("connection refused".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

#[test]
fn test_missing_backend_url_mentions_env() {
    let display = BlueprintError::MissingBackendUrl.to_string();
    assert!(display.contains("BLUEPRINT_BACKEND_URL"));
    assert!(display.contains("--set-backend-url"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: BlueprintError = io_error.into();

    assert!(matches!(err, BlueprintError::Io(_)));
    assert!(format!("{}", err).contains("IOエラー"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let err: BlueprintError = json_error.into();

    assert!(matches!(err, BlueprintError::JsonParse(_)));
    assert!(format!("{}", err).contains("JSON解析エラー"));
}

/// 共通ライブラリのエラーはそのまま表示
#[test]
fn test_common_error_is_transparent() {
    let err: BlueprintError = blueprint_measure_common::Error::Parse("bad body".to_string()).into();
    assert_eq!(err.to_string(), "Parse error: bad body");
}

/// 表示文言: detailがあればそのまま、なければ汎用
#[test]
fn test_analysis_error_user_messages() {
    let with_detail = AnalysisError::Server {
        status: 400,
        detail: Some("Invalid file type. Please upload PDF, PNG, or JPG files.".to_string()),
    };
    assert_eq!(
        with_detail.user_message(),
        "Invalid file type. Please upload PDF, PNG, or JPG files."
    );

    let timeout = AnalysisError::Timeout { seconds: 120 };
    assert_ne!(timeout.user_message(), with_detail.user_message());
    assert!(timeout.to_string().contains("120"));
}

#[test]
fn test_validation_error_display() {
    let err = ValidationError::UnsupportedType("image/gif".to_string());
    assert!(err.to_string().contains("image/gif"));

    let err = ValidationError::TooLarge { size_bytes: 21 * 1024 * 1024 };
    assert!(err.to_string().contains("21.0 MB"));
}
