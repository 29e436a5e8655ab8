//! アップロード〜解析のセッション状態機械
//!
//! ```text
//! Idle --select--> Ready --submit--> Analyzing --success--> Resolved --start_over--> Idle
//!                    ^                   |
//!                    +------failure------+
//! ```
//!
//! 状態を変更するのはこのモジュールの遷移だけ。不正な入力は状態を変えず通知のみ出す。
//! 同時に飛ばせる解析リクエストは1件（single-flight）。完了はチケットIDで照合し、
//! タイムアウト後に遅れて届いた結果などは破棄する。

use crate::error::{AnalysisError, ValidationError};
use crate::notify::{NoticeKind, Notifier};
use crate::types::{AnalysisResult, CandidateFile, MediaType};
use crate::validator;
use std::fmt;

/// ファイル未選択で解析しようとした時のメッセージ
pub const NO_FILE_MESSAGE: &str = "Please select a blueprint file first";

/// 画像処理に失敗した結果のメッセージ
pub const LIMITED_RESULT_MESSAGE: &str =
    "Analysis completed with limitations: the image could not be fully processed";

/// 寸法が0件だった結果のメッセージ
pub const NO_DIMENSIONS_MESSAGE: &str = "No dimensions detected in this blueprint";

/// 解析リクエストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicketId(u64);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 送信開始時に払い出される。リクエスト構築に必要なファイル情報を持つ。
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket<H> {
    pub id: TicketId,
    pub file: CandidateFile<H>,
}

/// セッション状態
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<H> {
    Idle,
    Ready { file: CandidateFile<H> },
    Analyzing { file: CandidateFile<H>, ticket: TicketId },
    Resolved { result: AnalysisResult },
}

/// 状態の種類だけ（表示の切り替え用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    Analyzing,
    Resolved,
}

impl<H> SessionState<H> {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle => Phase::Idle,
            SessionState::Ready { .. } => Phase::Ready,
            SessionState::Analyzing { .. } => Phase::Analyzing,
            SessionState::Resolved { .. } => Phase::Resolved,
        }
    }
}

/// `select` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Accepted(MediaType),
    Rejected(ValidationError),
    /// 解析中・結果表示中は選択を受け付けない
    Ignored,
}

/// 成功結果の分類（通知の出し分けに使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Complete,
    Limited,
    NoDimensions,
}

impl Resolution {
    pub fn classify(result: &AnalysisResult) -> Self {
        if result.image_processing_failed() {
            Resolution::Limited
        } else if result.analysis.dimensions.is_empty() {
            Resolution::NoDimensions
        } else {
            Resolution::Complete
        }
    }
}

/// `complete` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Resolved(Resolution),
    Failed(AnalysisError),
    /// 現在のリクエストに対応しない完了（破棄済み）
    Stale,
}

/// セッションコントローラ
///
/// `H` は候補ファイルのハンドル型、`N` は通知先。
pub struct SessionController<H, N> {
    state: SessionState<H>,
    notifier: N,
    last_ticket: u64,
    last_error: Option<AnalysisError>,
}

impl<H: Clone, N: Notifier> SessionController<H, N> {
    pub fn new(notifier: N) -> Self {
        Self {
            state: SessionState::Idle,
            notifier,
            last_ticket: 0,
            last_error: None,
        }
    }

    pub fn state(&self) -> &SessionState<H> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// 保持中の候補ファイル（Ready / Analyzing）
    pub fn candidate(&self) -> Option<&CandidateFile<H>> {
        match &self.state {
            SessionState::Ready { file } | SessionState::Analyzing { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SessionState::Resolved { result } => Some(result),
            _ => None,
        }
    }

    /// 直近の失敗（再選択・再送信・やり直しでクリア）
    pub fn last_error(&self) -> Option<&AnalysisError> {
        self.last_error.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, SessionState::Analyzing { .. })
    }

    /// 解析ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        matches!(self.state, SessionState::Ready { .. })
    }

    /// 選択受付中か（アップロード領域の表示条件）
    pub fn accepts_selection(&self) -> bool {
        matches!(self.state, SessionState::Idle | SessionState::Ready { .. })
    }

    /// 候補ファイルを選択
    ///
    /// 受理したファイルの `mime_type` は正規化済みの値に置き換える。
    pub fn select(&mut self, mut file: CandidateFile<H>) -> SelectOutcome {
        if !self.accepts_selection() {
            tracing::debug!(file = %file.name, phase = ?self.phase(), "selection ignored");
            return SelectOutcome::Ignored;
        }

        match validator::validate_candidate(&file) {
            Ok(media_type) => {
                file.mime_type = media_type.as_mime().to_string();
                tracing::debug!(file = %file.name, size = file.size_bytes, "file selected");
                self.state = SessionState::Ready { file };
                self.last_error = None;
                SelectOutcome::Accepted(media_type)
            }
            Err(err) => {
                tracing::debug!(file = %file.name, error = %err, "file rejected");
                self.notifier.notify(NoticeKind::Error, &err.to_string());
                SelectOutcome::Rejected(err)
            }
        }
    }

    /// 解析を開始（Ready → Analyzing）
    ///
    /// ファイル未選択なら通知のみ。解析中・結果表示中は何もしない。
    pub fn begin_submit(&mut self) -> Option<SubmitTicket<H>> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Ready { file } => {
                self.last_ticket += 1;
                let id = TicketId(self.last_ticket);
                tracing::debug!(ticket = %id, file = %file.name, "analysis started");
                self.last_error = None;
                self.state = SessionState::Analyzing {
                    file: file.clone(),
                    ticket: id,
                };
                Some(SubmitTicket { id, file })
            }
            SessionState::Idle => {
                self.notifier.notify(NoticeKind::Error, NO_FILE_MESSAGE);
                None
            }
            other => {
                tracing::debug!(phase = ?other.phase(), "submit ignored");
                self.state = other;
                None
            }
        }
    }

    /// 解析結果を反映（Analyzing → Resolved / Ready）
    pub fn complete(
        &mut self,
        id: TicketId,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Completion {
        let file = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Analyzing { file, ticket } if ticket == id => file,
            other => {
                tracing::warn!(ticket = %id, phase = ?other.phase(), "discarding stale completion");
                self.state = other;
                return Completion::Stale;
            }
        };

        match outcome {
            Ok(result) => {
                let resolution = Resolution::classify(&result);
                match resolution {
                    Resolution::Limited => {
                        self.notifier.notify(NoticeKind::Warning, LIMITED_RESULT_MESSAGE)
                    }
                    Resolution::NoDimensions => {
                        self.notifier.notify(NoticeKind::Warning, NO_DIMENSIONS_MESSAGE)
                    }
                    Resolution::Complete => self.notifier.notify(
                        NoticeKind::Success,
                        &success_message(result.analysis.dimensions.len()),
                    ),
                }
                tracing::debug!(ticket = %id, ?resolution, "analysis resolved");
                self.state = SessionState::Resolved { result };
                Completion::Resolved(resolution)
            }
            Err(err) => {
                tracing::debug!(ticket = %id, error = %err, "analysis failed");
                self.notifier.notify(NoticeKind::Error, &err.user_message());
                // 再選択なしで再送信できるようファイルは保持
                self.state = SessionState::Ready { file };
                self.last_error = Some(err.clone());
                Completion::Failed(err)
            }
        }
    }

    /// 最初からやり直す（ファイルと結果を破棄）
    ///
    /// 解析中は無視する。
    pub fn start_over(&mut self) -> bool {
        if self.is_analyzing() {
            tracing::debug!("start over ignored while analyzing");
            return false;
        }
        self.state = SessionState::Idle;
        self.last_error = None;
        true
    }
}

fn success_message(count: usize) -> String {
    if count == 1 {
        "Analysis complete: 1 dimension found".to_string()
    } else {
        format!("Analysis complete: {} dimensions found", count)
    }
}
