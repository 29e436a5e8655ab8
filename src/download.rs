//! 注記画像の保存

use anyhow::{bail, Context, Result};
use base64::Engine;
use blueprint_measure_common::{DataRef, DownloadArtifact};
use std::path::{Path, PathBuf};

/// `data:<mime>;base64,<payload>` をデコード
pub fn decode_data_ref(data: &DataRef) -> Result<Vec<u8>> {
    let (_, payload) = data
        .base64_payload()
        .context("画像データが base64 の data URL ではありません")?;

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .context("画像データのデコードに失敗しました")
}

/// 注記画像を `dir` に保存して保存先を返す
///
/// ファイル名のディレクトリ部分は捨てる。
pub fn save_artifact(artifact: &DownloadArtifact, dir: &Path) -> Result<PathBuf> {
    if artifact.data.is_empty() {
        bail!("注記画像がありません");
    }

    let bytes = decode_data_ref(&artifact.data)?;

    let file_name = Path::new(&artifact.file_name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| blueprint_measure_common::presenter::download_file_name(""));

    std::fs::create_dir_all(dir)
        .with_context(|| format!("出力ディレクトリを作成できません: {}", dir.display()))?;

    let path = dir.join(file_name);
    std::fs::write(&path, bytes)
        .with_context(|| format!("注記画像を書き込めません: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "annotated image saved");
    Ok(path)
}
