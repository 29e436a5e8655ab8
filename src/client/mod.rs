//! 解析バックエンドとの通信
//!
//! 1回の送信 = 1回の試行。リトライはしない（再送信はユーザー操作）。

mod http;

pub use http::HttpAnalysisClient;

use async_trait::async_trait;
use blueprint_measure_common::{AnalysisError, AnalysisResult, CandidateFile};

/// 送信時に組み立てる一時的なリクエスト
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AnalysisRequest {
    pub fn new<H>(file: &CandidateFile<H>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            bytes,
        }
    }
}

#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// 図面を送信して解析結果を受け取る
    ///
    /// トランスポート層の例外は必ず `AnalysisError` に変換して返す。
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}
