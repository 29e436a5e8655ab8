use crate::error::{BlueprintError, Result};
use blueprint_measure_common::response::DEFAULT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// バックエンドURLを上書きする環境変数
pub const BACKEND_URL_ENV: &str = "BLUEPRINT_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BlueprintError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("blueprint-measure").join("config.json"))
    }

    /// バックエンドURLを解決（引数 > 環境変数 > 設定ファイル）
    ///
    /// 起動時に1回だけ呼び、以後はセッション中固定。
    pub fn resolve_backend_url(&self, cli_override: Option<&str>) -> Result<String> {
        let env_value = std::env::var(BACKEND_URL_ENV).ok();
        pick_backend_url(cli_override, env_value.as_deref(), self.backend_url.as_deref())
    }

    /// 0秒は既定値として扱う
    pub fn timeout(&self, cli_override: Option<u64>) -> Duration {
        let seconds = cli_override
            .into_iter()
            .chain(Some(self.timeout_seconds))
            .find(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(seconds)
    }

    pub fn set_backend_url(&mut self, url: String) -> Result<()> {
        self.backend_url = Some(normalize_url(&url)?);
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(BlueprintError::Config("タイムアウトは1秒以上を指定してください".into()));
        }
        self.timeout_seconds = seconds;
        self.save()
    }
}

fn pick_backend_url(
    cli_override: Option<&str>,
    env_value: Option<&str>,
    file_value: Option<&str>,
) -> Result<String> {
    let url = [cli_override, env_value, file_value]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .ok_or(BlueprintError::MissingBackendUrl)?;
    normalize_url(url)
}

/// 前後の空白と末尾の `/` を除去し、http(s) スキームを確認
fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(BlueprintError::Config(format!(
            "バックエンドURLは http:// または https:// で始まる必要があります: {}",
            url
        )));
    }
    Ok(url.to_string())
}
