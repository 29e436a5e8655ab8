//! 解析結果のJSON保存

use anyhow::{Context, Result};
use blueprint_measure_common::presenter::DimensionSummary;
use blueprint_measure_common::{Analysis, AnalysisResult};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub analyzed_at: DateTime<Local>,
    pub source_file: &'a str,
    pub filename: &'a str,
    pub summary: DimensionSummary,
    pub analysis: &'a Analysis,
}

impl<'a> AnalysisReport<'a> {
    /// 画像データは含めない（注記画像は別ファイルで保存する）
    pub fn new(source_file: &'a str, result: &'a AnalysisResult, analyzed_at: DateTime<Local>) -> Self {
        Self {
            analyzed_at,
            source_file,
            filename: &result.filename,
            summary: DimensionSummary::of(&result.analysis.dimensions),
            analysis: &result.analysis,
        }
    }
}

pub fn write_report(path: &Path, source_file: &str, result: &AnalysisResult) -> Result<()> {
    let report = AnalysisReport::new(source_file, result, Local::now());
    let json = serde_json::to_string_pretty(&report).context("JSONの生成に失敗しました")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("ディレクトリを作成できません: {}", parent.display()))?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("JSONを書き込めません: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "report written");
    Ok(())
}
