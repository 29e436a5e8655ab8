use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlueprintError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("バックエンドURLが設定されていません。`blueprint-measure config --set-backend-url URL` または環境変数 BLUEPRINT_BACKEND_URL で設定してください")]
    MissingBackendUrl,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ファイルが選択されていません")]
    NoFileSelected,

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("バックエンドに接続できません: {0}")]
    Unreachable(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Common(#[from] blueprint_measure_common::Error),
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
