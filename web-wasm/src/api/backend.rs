//! fetch + FormData による解析リクエスト
//!
//! 1回の送信 = 1回の試行。タイムアウト時は AbortController で中断する。

use blueprint_measure_common::response::{
    endpoint_url, interpret_response, ANALYZE_PATH, UPLOAD_FIELD,
};
use blueprint_measure_common::{AnalysisError, AnalysisResult};
use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File, FormData, Request, RequestInit, Response};

/// 図面を送信して解析結果を受け取る
pub async fn analyze_blueprint(
    base_url: &str,
    file: &File,
    timeout_secs: u64,
) -> Result<AnalysisResult, AnalysisError> {
    let abort = AbortController::new().map_err(transport_error)?;
    let request = build_request(base_url, file, &abort)?;

    tracing::debug!(file = %file.name(), size = file.size(), "submitting blueprint");

    let fetch = Box::pin(send(request));
    let timer = TimeoutFuture::new(timeout_millis(timeout_secs));

    match select(fetch, timer).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => {
            abort.abort();
            tracing::warn!(timeout_secs, "analysis request timed out");
            Err(AnalysisError::Timeout {
                seconds: timeout_secs,
            })
        }
    }
}

fn build_request(
    base_url: &str,
    file: &File,
    abort: &AbortController,
) -> Result<Request, AnalysisError> {
    let form = FormData::new().map_err(transport_error)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
        .map_err(transport_error)?;

    // Content-Type（multipart境界）はブラウザに任せる
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);
    init.set_signal(Some(&abort.signal()));

    Request::new_with_str_and_init(&endpoint_url(base_url, ANALYZE_PATH), &init)
        .map_err(transport_error)
}

async fn send(request: Request) -> Result<AnalysisResult, AnalysisError> {
    let window = web_sys::window()
        .ok_or_else(|| AnalysisError::Transport("window is not available".to_string()))?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport_error)?
        .dyn_into()
        .map_err(transport_error)?;

    let status = response.status();
    let body = JsFuture::from(response.text().map_err(transport_error)?)
        .await
        .map_err(transport_error)?
        .as_string()
        .unwrap_or_default();

    tracing::debug!(status, bytes = body.len(), "analysis response received");
    interpret_response(status, &body)
}

fn timeout_millis(secs: u64) -> u32 {
    u32::try_from(secs.saturating_mul(1000)).unwrap_or(u32::MAX)
}

fn transport_error(err: JsValue) -> AnalysisError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    AnalysisError::Transport(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_millis() {
        assert_eq!(timeout_millis(120), 120_000);
        assert_eq!(timeout_millis(0), 0);
        assert_eq!(timeout_millis(u64::MAX), u32::MAX);
    }
}
