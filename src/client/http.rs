//! reqwestによるHTTPクライアント

use super::{AnalysisBackend, AnalysisRequest};
use crate::error::{BlueprintError, Result};
use async_trait::async_trait;
use blueprint_measure_common::response::{
    endpoint_url, interpret_response, ANALYZE_PATH, HEALTH_PATH, UPLOAD_FIELD,
};
use blueprint_measure_common::{AnalysisError, AnalysisResult};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

const USER_AGENT: &str = concat!("blueprint-measure/", env!("CARGO_PKG_VERSION"));
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpAnalysisClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpAnalysisClient {
    /// `base_url` はバックエンドのオリジン（例: `http://localhost:8001`）
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET /api/` の `message` を返す
    pub async fn health(&self) -> Result<String> {
        let url = endpoint_url(&self.base_url, HEALTH_PATH);
        let response = self
            .http
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| BlueprintError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BlueprintError::Unreachable(format!("{} returned {}", url, status)));
        }

        let body: serde_json::Value = response.json().await?;
        Ok(body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string())
    }

    async fn send(&self, request: AnalysisRequest) -> std::result::Result<AnalysisResult, AnalysisError> {
        let url = endpoint_url(&self.base_url, ANALYZE_PATH);
        let size = request.bytes.len();

        let part = Part::bytes(request.bytes)
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
            .map_err(transport_error)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(%url, file = %request.file_name, size, "submitting blueprint");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        tracing::debug!(status, bytes = body.len(), "analysis response received");

        interpret_response(status, &body)
    }
}

fn transport_error(err: reqwest::Error) -> AnalysisError {
    AnalysisError::Transport(err.to_string())
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisClient {
    async fn analyze(&self, request: AnalysisRequest) -> std::result::Result<AnalysisResult, AnalysisError> {
        // 送信開始から計測し、期限切れならリクエストごと破棄する
        match tokio::time::timeout(self.timeout, self.send(request)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "analysis request timed out");
                Err(AnalysisError::Timeout {
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }
}
