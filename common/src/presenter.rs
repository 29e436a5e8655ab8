//! 解析結果の表示用投影
//!
//! 状態は持たない。`AnalysisResult` から表示用の構造を作るだけ。

use crate::types::{AnalysisResult, Confidence, DataRef, Dimension, DimensionKind};
use serde::Serialize;
use std::fmt;

/// 寸法0件時の表示文言
pub const EMPTY_STATE_MESSAGE: &str = "No dimensions were detected in this blueprint.";

/// ダウンロード名のフォールバック
pub const DEFAULT_DOWNLOAD_STEM: &str = "blueprint";

/// バッジの色分け
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Warning,
    Danger,
}

impl BadgeTone {
    /// CSSクラス名
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeTone::Success => "badge-success",
            BadgeTone::Warning => "badge-warning",
            BadgeTone::Danger => "badge-danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub text: &'static str,
    pub tone: BadgeTone,
}

impl Badge {
    pub fn for_kind(kind: DimensionKind) -> Self {
        let tone = match kind {
            DimensionKind::Detected => BadgeTone::Success,
            DimensionKind::Estimated => BadgeTone::Warning,
        };
        Self { text: kind.as_str(), tone }
    }

    pub fn for_confidence(confidence: Confidence) -> Self {
        let tone = match confidence {
            Confidence::High => BadgeTone::Success,
            Confidence::Medium => BadgeTone::Warning,
            Confidence::Low => BadgeTone::Danger,
        };
        Self { text: confidence.as_str(), tone }
    }
}

/// 寸法一覧の1行
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionRow {
    /// 1始まりの表示番号
    pub number: usize,
    pub label: String,
    pub value: String,
    pub kind: Badge,
    pub confidence: Badge,
    pub notes: Option<String>,
}

impl DimensionRow {
    fn from_dimension(index: usize, dim: &Dimension) -> Self {
        let number = index + 1;
        let label = if dim.label.trim().is_empty() {
            format!("Dimension {}", number)
        } else {
            dim.label.clone()
        };
        let value = if dim.value.trim().is_empty() {
            "N/A".to_string()
        } else {
            dim.value.clone()
        };

        Self {
            number,
            label,
            value,
            kind: Badge::for_kind(dim.kind),
            confidence: Badge::for_confidence(dim.confidence),
            notes: dim.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }
}

impl fmt::Display for DimensionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / {}",
            self.label, self.value, self.kind.text, self.confidence.text
        )
    }
}

/// 検出/推定の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DimensionSummary {
    pub total: usize,
    pub detected: usize,
    pub estimated: usize,
}

impl DimensionSummary {
    pub fn of(dimensions: &[Dimension]) -> Self {
        let total = dimensions.len();
        let detected = dimensions
            .iter()
            .filter(|d| d.kind == DimensionKind::Detected)
            .count();
        Self {
            total,
            detected,
            estimated: total - detected,
        }
    }
}

impl fmt::Display for DimensionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} dimensions | Detected: {} | Estimated: {}",
            self.total, self.detected, self.estimated
        )
    }
}

/// 結果画面の表示モデル
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub filename: String,
    pub original_image: DataRef,
    pub annotated_image: DataRef,
    pub scale: String,
    pub scale_confidence: Badge,
    pub rows: Vec<DimensionRow>,
    pub summary: DimensionSummary,
    pub notes: Option<String>,
    /// 画像処理が部分的に失敗した結果か
    pub limited: bool,
}

impl ResultView {
    /// 寸法0件（空状態を表示する）
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn scale_line(&self) -> String {
        format!("Scale: {}", self.scale)
    }
}

/// 結果を表示モデルに変換
pub fn present(result: &AnalysisResult) -> ResultView {
    let analysis = &result.analysis;
    let scale = analysis
        .scale
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown")
        .to_string();

    let notes = analysis
        .notes
        .as_deref()
        .or(analysis.raw_response.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    ResultView {
        filename: result.filename.clone(),
        original_image: result.original_image.clone(),
        annotated_image: result.annotated_image.clone(),
        scale,
        scale_confidence: Badge::for_confidence(analysis.scale_confidence),
        rows: analysis
            .dimensions
            .iter()
            .enumerate()
            .map(|(i, d)| DimensionRow::from_dimension(i, d))
            .collect(),
        summary: DimensionSummary::of(&analysis.dimensions),
        notes,
        limited: result.image_processing_failed(),
    }
}

/// 注記画像のダウンロード
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub data: DataRef,
}

/// `annotated_<filename>.png`（ファイル名が空なら `blueprint`）
pub fn download_file_name(filename: &str) -> String {
    let stem = filename.trim();
    let stem = if stem.is_empty() { DEFAULT_DOWNLOAD_STEM } else { stem };
    format!("annotated_{}.png", stem)
}

pub fn download_artifact(result: &AnalysisResult) -> DownloadArtifact {
    DownloadArtifact {
        file_name: download_file_name(&result.filename),
        data: result.annotated_image.clone(),
    }
}
