//! セッションフローテスト
//!
//! 実ファイル + モックバックエンドで 選択 → 送信 → 完了 の流れを検証

use async_trait::async_trait;
use blueprint_measure::client::{AnalysisBackend, AnalysisRequest};
use blueprint_measure::picker::candidate_from_path;
use blueprint_measure::runner::{self, CliSession};
use blueprint_measure_common::error::{GENERIC_FAILURE_MESSAGE, TIMEOUT_MESSAGE};
use blueprint_measure_common::session::{LIMITED_RESULT_MESSAGE, NO_FILE_MESSAGE};
use blueprint_measure_common::{
    Analysis, AnalysisError, AnalysisIssue, AnalysisResult, CandidateFile, Completion, Confidence,
    Dimension, DimensionKind, NoticeKind, NoticeLog, Phase, Resolution, SelectOutcome,
    SessionController, ValidationError,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::tempdir;

/// 呼び出し回数と最後のリクエストを記録するバックエンド
struct MockBackend {
    calls: AtomicUsize,
    last_request: Mutex<Option<AnalysisRequest>>,
    outcome: Result<AnalysisResult, AnalysisError>,
}

impl MockBackend {
    fn returning(outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            outcome,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisBackend for MockBackend {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        self.outcome.clone()
    }
}

fn two_dimensions() -> AnalysisResult {
    AnalysisResult {
        filename: "plan.pdf".to_string(),
        analysis: Analysis {
            scale: Some("1:100".to_string()),
            scale_confidence: Confidence::High,
            dimensions: vec![
                Dimension {
                    label: "Wall A".to_string(),
                    value: "12 ft".to_string(),
                    kind: DimensionKind::Detected,
                    confidence: Confidence::High,
                    notes: None,
                },
                Dimension {
                    label: "Wall B".to_string(),
                    value: "8 ft".to_string(),
                    kind: DimensionKind::Estimated,
                    confidence: Confidence::Medium,
                    notes: None,
                },
            ],
            ..Default::default()
        },
        ..Default::default()
    }
}

fn write_file(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![b'x'; len]).unwrap();
    path
}

// =====================================
// 正常系
// =====================================

/// plan.pdf（2MB）を送信して2件の寸法を受け取る
#[tokio::test]
async fn test_select_submit_resolve() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "plan.pdf", 2 * 1024 * 1024);
    let backend = MockBackend::returning(Ok(two_dimensions()));
    let mut session: CliSession<NoticeLog> = SessionController::new(NoticeLog::new());

    let candidate = candidate_from_path(&path).expect("候補作成失敗");
    assert!(matches!(session.select(candidate), SelectOutcome::Accepted(_)));
    assert!(session.can_submit());

    let completion = runner::submit(&mut session, &backend).await;
    assert_eq!(completion, Some(Completion::Resolved(Resolution::Complete)));
    assert_eq!(session.phase(), Phase::Resolved);
    assert_eq!(backend.calls(), 1);

    let request = backend.last_request.lock().unwrap().take().expect("リクエストなし");
    assert_eq!(request.file_name, "plan.pdf");
    assert_eq!(request.mime_type, "application/pdf");
    assert_eq!(request.bytes.len(), 2 * 1024 * 1024);

    let notice = session.notifier().last().expect("通知なし");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Analysis complete: 2 dimensions found");

    assert_eq!(session.result().map(|r| r.analysis.dimensions.len()), Some(2));
}

/// 結果表示後のやり直しで初期状態に戻る
#[tokio::test]
async fn test_start_over_after_result() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "scan.png", 1024);
    let backend = MockBackend::returning(Ok(two_dimensions()));
    let mut session: CliSession<NoticeLog> = SessionController::new(NoticeLog::new());

    session.select(candidate_from_path(&path).expect("候補作成失敗"));
    runner::submit(&mut session, &backend).await;

    // 結果表示中は送信・選択とも無視
    assert!(runner::submit(&mut session, &backend).await.is_none());
    assert_eq!(
        session.select(candidate_from_path(&path).expect("候補作成失敗")),
        SelectOutcome::Ignored
    );
    assert_eq!(backend.calls(), 1);

    assert!(session.start_over());
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.result().is_none());
    assert!(session.candidate().is_none());
}

/// 画像処理が部分的に失敗した結果は警告
#[tokio::test]
async fn test_limited_result_warns() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "scan.jpg", 1024);
    let mut limited = two_dimensions();
    limited.analysis.error = Some(AnalysisIssue::ImageProcessingFailed);
    let backend = MockBackend::returning(Ok(limited));
    let mut session: CliSession<NoticeLog> = SessionController::new(NoticeLog::new());

    session.select(candidate_from_path(&path).expect("候補作成失敗"));
    let completion = runner::submit(&mut session, &backend).await;

    assert_eq!(completion, Some(Completion::Resolved(Resolution::Limited)));
    let notice = session.notifier().last().expect("通知なし");
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert_eq!(notice.message, LIMITED_RESULT_MESSAGE);
}

// =====================================
// 異常系
// =====================================

/// 失敗後もファイルを保持し、再選択なしで再送信できる
#[tokio::test]
async fn test_failure_keeps_file_for_retry() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "plan.pdf", 4096);
    let backend = MockBackend::returning(Err(AnalysisError::Server {
        status: 500,
        detail: Some("Analysis failed: boom".to_string()),
    }));
    let mut session: CliSession<NoticeLog> = SessionController::new(NoticeLog::new());

    session.select(candidate_from_path(&path).expect("候補作成失敗"));
    let completion = runner::submit(&mut session, &backend).await;

    assert!(matches!(completion, Some(Completion::Failed(_))));
    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(session.candidate().map(|c| c.handle.clone()), Some(path));
    assert_eq!(session.notifier().last().unwrap().message, "Analysis failed: boom");

    runner::submit(&mut session, &backend).await;
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_timeout_message() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "plan.pdf", 16);
    let backend = MockBackend::returning(Err(AnalysisError::Timeout { seconds: 120 }));
    let mut session: CliSession<NoticeLog> = SessionController::new(NoticeLog::new());

    session.select(candidate_from_path(&path).expect("候補作成失敗"));
    runner::submit(&mut session, &backend).await;

    let notice = session.notifier().last().expect("通知なし");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, TIMEOUT_MESSAGE);
    assert!(session.last_error().map(|e| e.is_timeout()).unwrap_or(false));
}

/// 選択後にファイルが消えた場合は送信せずに失敗扱い
#[tokio::test]
async fn test_unreadable_file_is_not_sent() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(dir.path(), "plan.pdf", 16);
    let backend = MockBackend::returning(Ok(two_dimensions()));
    let mut session: CliSession<NoticeLog> = SessionController::new(NoticeLog::new());

    session.select(candidate_from_path(&path).expect("候補作成失敗"));
    std::fs::remove_file(&path).unwrap();

    let completion = runner::submit(&mut session, &backend).await;
    assert!(matches!(completion, Some(Completion::Failed(AnalysisError::Read(_)))));
    assert_eq!(backend.calls(), 0);
    assert_eq!(session.phase(), Phase::Ready);
}

/// 未選択の送信は通知のみ
#[tokio::test]
async fn test_submit_without_file() {
    let backend = MockBackend::returning(Ok(two_dimensions()));
    let mut session: CliSession<NoticeLog> = SessionController::new(NoticeLog::new());

    assert!(runner::submit(&mut session, &backend).await.is_none());
    assert_eq!(backend.calls(), 0);
    assert_eq!(session.notifier().last().unwrap().message, NO_FILE_MESSAGE);
}

/// 解析中の再送信はネットワーク呼び出しを起こさない
#[tokio::test]
async fn test_single_flight() {
    let backend = MockBackend::returning(Ok(two_dimensions()));
    let mut session: CliSession<NoticeLog> = SessionController::new(NoticeLog::new());

    session.select(CandidateFile::with_handle(
        "plan.pdf",
        "application/pdf",
        16,
        PathBuf::from("/nonexistent/plan.pdf"),
    ));
    let ticket = session.begin_submit().expect("送信開始失敗");
    assert!(session.is_analyzing());

    assert!(runner::submit(&mut session, &backend).await.is_none());
    assert_eq!(backend.calls(), 0);

    let completion = session.complete(ticket.id, Ok(two_dimensions()));
    assert_eq!(completion, Completion::Resolved(Resolution::Complete));
}

/// 形式・サイズで弾かれた選択は状態を変えない
#[test]
fn test_rejected_selections() {
    let dir = tempdir().expect("Failed to create temp dir");
    let gif = write_file(dir.path(), "photo.gif", 1024);
    let mut session: CliSession<NoticeLog> = SessionController::new(NoticeLog::new());

    let outcome = session.select(candidate_from_path(&gif).expect("候補作成失敗"));
    assert!(matches!(outcome, SelectOutcome::Rejected(ValidationError::UnsupportedType(_))));
    assert_eq!(session.phase(), Phase::Idle);

    // 25MBのPNG（中身は作らずサイズだけ申告）
    let huge = CandidateFile::with_handle(
        "huge.png",
        "image/png",
        25 * 1024 * 1024,
        dir.path().join("huge.png"),
    );
    let outcome = session.select(huge);
    assert_eq!(
        outcome,
        SelectOutcome::Rejected(ValidationError::TooLarge { size_bytes: 25 * 1024 * 1024 })
    );
    assert_eq!(session.phase(), Phase::Idle);

    let messages: Vec<String> = session
        .notifier()
        .entries()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("Unsupported file type"));
    assert!(messages[1].contains("25.0 MB"));
    assert!(!messages.iter().any(|m| m == GENERIC_FAILURE_MESSAGE));
}
