//! CLIでのファイル選択
//!
//! - 引数で渡されたパス: ファイル選択ダイアログ相当
//! - プロンプトへのドラッグ&ドロップ: 端末はドロップされたファイルのパスを貼り付ける

use crate::error::{BlueprintError, Result};
use blueprint_measure_common::{declared_mime_type, CandidateFile, DropZone};
use dialoguer::Input;
use reqwest::Url;
use std::path::{Path, PathBuf};

/// パスから候補ファイルを作る（中身は読まない）
pub fn candidate_from_path(path: &Path) -> Result<CandidateFile<PathBuf>> {
    let meta = std::fs::metadata(path)
        .map_err(|_| BlueprintError::FileNotFound(path.display().to_string()))?;
    if !meta.is_file() {
        return Err(BlueprintError::FileNotFound(path.display().to_string()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = declared_mime_type(&name);

    Ok(CandidateFile::with_handle(name, mime_type, meta.len(), path.to_path_buf()))
}

/// ドロップ用プロンプトを表示し、最初のファイルを返す
///
/// 空入力は `None`。
pub fn prompt_for_drop() -> Result<Option<PathBuf>> {
    let mut zone = DropZone::new();
    zone.drag_enter();

    let input: String = Input::new()
        .with_prompt("図面ファイルをここにドラッグ&ドロップ（またはパスを入力、空で終了）")
        .allow_empty(true)
        .interact_text()?;

    let dropped = parse_dropped_paths(&input);
    if dropped.len() > 1 {
        tracing::debug!(ignored = dropped.len() - 1, "multiple files dropped, using the first");
    }

    Ok(zone.drop(dropped))
}

/// 端末に貼り付けられたパス列を分解
///
/// 対応: 空白区切り、'...' / "..." の引用、`\ ` エスケープ（Windows以外）、`file://` URI。
pub fn parse_dropped_paths(input: &str) -> Vec<PathBuf> {
    split_dropped(input.trim())
        .iter()
        .filter(|token| !token.is_empty())
        .map(|token| finish_path(token))
        .collect()
}

#[cfg(not(windows))]
fn split_dropped(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    match shell_words::split(input) {
        Ok(tokens) => tokens,
        // 閉じていない引用符は1つのパスとして扱う
        Err(_) => vec![input.to_string()],
    }
}

// バックスラッシュはパス区切りなので引用符と空白だけで分ける
#[cfg(windows)]
fn split_dropped(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}

/// `file://` URIはパーセントデコードしてローカルパスに戻す
fn finish_path(token: &str) -> PathBuf {
    if token.starts_with("file://") {
        if let Some(path) = Url::parse(token).ok().and_then(|url| url.to_file_path().ok()) {
            return path;
        }
    }
    PathBuf::from(token)
}
