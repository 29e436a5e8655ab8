//! CLIセッションの送信処理
//!
//! 状態遷移は `SessionController` に任せ、ここではファイル読込と送信だけ行う。

use crate::client::{AnalysisBackend, AnalysisRequest};
use blueprint_measure_common::{AnalysisError, Completion, Notifier, SessionController};
use std::path::PathBuf;

pub type CliSession<N> = SessionController<PathBuf, N>;

/// 選択中のファイルを送信し、結果をセッションに反映
///
/// 送信できない状態（未選択・解析中・結果表示中）なら `None`。
pub async fn submit<B, N>(session: &mut CliSession<N>, backend: &B) -> Option<Completion>
where
    B: AnalysisBackend + ?Sized,
    N: Notifier,
{
    let ticket = session.begin_submit()?;

    let outcome = match tokio::fs::read(&ticket.file.handle).await {
        Ok(bytes) => {
            backend
                .analyze(AnalysisRequest::new(&ticket.file, bytes))
                .await
        }
        Err(e) => {
            tracing::warn!(path = %ticket.file.handle.display(), error = %e, "failed to read blueprint");
            Err(AnalysisError::Read(e.to_string()))
        }
    };

    Some(session.complete(ticket.id, outcome))
}
