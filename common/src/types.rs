//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - CandidateFile: 検証済みのアップロード候補ファイル
//! - Dimension: 図面から検出/推定された寸法1件
//! - AnalysisResult: `/api/analyze-blueprint` のレスポンス全体

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// 受け付けるメディアタイプ（正規化済み）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Pdf,
    Png,
    Jpeg,
}

impl MediaType {
    /// 送信時に使うMIME文字列
    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Pdf => write!(f, "PDF"),
            MediaType::Png => write!(f, "PNG"),
            MediaType::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// アップロード候補ファイル
///
/// `handle` はフロントエンド固有のバイト取得手段（CLIではパス、Webでは`File`）。
/// 検証ロジックは `name` / `mime_type` / `size_bytes` だけを見る。
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFile<H = ()> {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub handle: H,
}

impl CandidateFile<()> {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self::with_handle(name, mime_type, size_bytes, ())
    }
}

impl<H> CandidateFile<H> {
    pub fn with_handle(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        handle: H,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            handle,
        }
    }
}

/// 信頼度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Confidence {
    #[default]
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

// 解析側は自由文のLLM出力なので大小文字の揺れを吸収し、不明値はlow扱い
impl From<String> for Confidence {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

impl From<Confidence> for String {
    fn from(c: Confidence) -> Self {
        c.as_str().to_string()
    }
}

/// 寸法の種別（図面に記載 / 縮尺から推定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DimensionKind {
    Detected,
    #[default]
    Estimated,
}

impl DimensionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionKind::Detected => "detected",
            DimensionKind::Estimated => "estimated",
        }
    }
}

// detected以外はすべてestimated（注記画像の集計と同じ扱い）
impl From<String> for DimensionKind {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("detected") {
            DimensionKind::Detected
        } else {
            DimensionKind::Estimated
        }
    }
}

impl From<DimensionKind> for String {
    fn from(k: DimensionKind) -> Self {
        k.as_str().to_string()
    }
}

// モデル出力由来の項目は null や数値も受け付ける

/// 文字列はそのまま、数値・真偽値は文字列化、それ以外はNone
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text).unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

fn lenient_confidence<'de, D>(deserializer: D) -> Result<Confidence, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_text(deserializer)?
        .map(Confidence::from)
        .unwrap_or_default())
}

fn lenient_kind<'de, D>(deserializer: D) -> Result<DimensionKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_text(deserializer)?
        .map(DimensionKind::from)
        .unwrap_or_default())
}

/// 寸法1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,

    /// 単位込みの整形済み値（例: "12 ft"）
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: String,

    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: DimensionKind,

    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: Confidence,

    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

/// `analysis.error` に入るコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisIssue {
    ImageProcessingFailed,
    Other(String),
}

impl From<String> for AnalysisIssue {
    fn from(s: String) -> Self {
        if s == "image_processing_failed" {
            AnalysisIssue::ImageProcessingFailed
        } else {
            AnalysisIssue::Other(s)
        }
    }
}

impl From<AnalysisIssue> for String {
    fn from(issue: AnalysisIssue) -> Self {
        match issue {
            AnalysisIssue::ImageProcessingFailed => "image_processing_failed".to_string(),
            AnalysisIssue::Other(code) => code,
        }
    }
}

/// 解析本体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub scale: Option<String>,

    #[serde(default, deserialize_with = "lenient_confidence")]
    pub scale_confidence: Confidence,

    /// サーバーの返した順序のまま（表示順）
    #[serde(default)]
    pub dimensions: Vec<Dimension>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<AnalysisIssue>,

    /// モデル出力をJSON化できなかった場合の生テキスト
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// 描画可能な画像参照（`data:` URLまたはURL）。デコードは表示側の責務。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRef(String);

impl DataRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `data:<mime>;base64,<payload>` を (mime, payload) に分解
    pub fn base64_payload(&self) -> Option<(&str, &str)> {
        let rest = self.0.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime = header.strip_suffix(";base64")?;
        Some((mime, payload))
    }
}

fn default_success() -> bool {
    true
}

/// `/api/analyze-blueprint` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default = "default_success")]
    pub success: bool,

    #[serde(default)]
    pub filename: String,

    #[serde(default)]
    pub original_image: DataRef,

    #[serde(default)]
    pub annotated_image: DataRef,

    pub analysis: Analysis,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            success: true,
            filename: String::new(),
            original_image: DataRef::default(),
            annotated_image: DataRef::default(),
            analysis: Analysis::default(),
        }
    }
}

impl AnalysisResult {
    pub fn image_processing_failed(&self) -> bool {
        matches!(self.analysis.error, Some(AnalysisIssue::ImageProcessingFailed))
    }
}
