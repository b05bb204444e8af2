use evidence_ai_common::{AnalysisError, CaptureError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvidenceAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`evidence-ai config --set-api-key YOUR_KEY` で設定するか GEMINI_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像取込みエラー: {0}")]
    Capture(#[from] CaptureError),

    #[error("解析エラー: {0}")]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Common(#[from] evidence_ai_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, EvidenceAiError>;
