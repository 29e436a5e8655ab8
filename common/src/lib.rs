//! Blueprint Measure Common Library
//!
//! CLIとWeb(WASM)で共有される型・検証・セッション状態機械・表示投影

pub mod types;
pub mod error;
pub mod validator;
pub mod selection;
pub mod notify;
pub mod session;
pub mod presenter;
pub mod response;

pub use types::{
    Analysis, AnalysisIssue, AnalysisResult, CandidateFile, Confidence, DataRef, Dimension,
    DimensionKind, MediaType,
};
pub use error::{AnalysisError, Error, Result, ValidationError};
pub use validator::{validate, validate_candidate, ACCEPTED_MIME_TYPES, MAX_UPLOAD_BYTES};
pub use selection::{declared_mime_type, picker_selection, DropZone};
pub use notify::{Notice, NoticeKind, NoticeLog, Notifier};
pub use session::{
    Completion, Phase, Resolution, SelectOutcome, SessionController, SessionState, SubmitTicket,
    TicketId,
};
pub use presenter::{download_artifact, present, DownloadArtifact, ResultView};
pub use response::{extract_error_detail, interpret_response, parse_analysis_response};
