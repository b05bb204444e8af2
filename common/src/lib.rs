//! Evidence AI Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態遷移・解析パイプライン

pub mod types;
pub mod error;
pub mod payload;
pub mod i18n;
pub mod prompts;
pub mod gemini;
pub mod parser;
pub mod capture;
pub mod pipeline;
pub mod history;
pub mod clipboard;
pub mod controller;
pub mod report;

pub use types::{CaseId, ComplaintKind, Complaints, EvidenceResult, Language, Settings, TrustLevel};
pub use error::{AnalysisError, CaptureError, ClipboardError, Error, Result};
pub use payload::{ImagePayload, is_image_mime};
pub use i18n::Labels;
pub use prompts::build_evidence_prompt;
pub use parser::{extract_json_object, parse_evidence_response, EvidenceReport};
pub use capture::{CameraDevice, CaptureManager, CaptureSession, MediaStream, import_file, start_camera};
pub use pipeline::{analyze, AnalysisRequest, AnalysisService, ResultStamper};
pub use history::HistoryStore;
pub use clipboard::{copy_text, Clipboard, CopyFeedback};
pub use controller::{Controller, Notice, NoticeKind, RequestToken, Tab, ViewEvent, ViewState};
pub use report::{render_text_report, trust_hint};
