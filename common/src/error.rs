//! エラー型定義

use thiserror::Error;

/// カメラ・ファイル取込みのエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("No video frame available yet")]
    NoFrameAvailable,
}

/// 解析リクエストのエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// クリップボード書き込みのエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Invalid image payload: {0}")]
    Payload(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
