//! 解析パイプライン
//!
//! 画像1枚につき外部サービスを1回だけ呼び出し、応答を検証して
//! タイムスタンプとケースIDを付与した EvidenceResult を返す。
//! 再試行はしない。

use crate::error::AnalysisError;
use crate::gemini::GeminiRequest;
use crate::parser::parse_evidence_response;
use crate::payload::ImagePayload;
use crate::prompts::build_evidence_prompt;
use crate::types::{CaseId, EvidenceResult, Language};
use async_trait::async_trait;

/// 解析リクエスト（1回の呼び出しの間だけ存在する）
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: ImagePayload,
    pub language: Language,
}

impl AnalysisRequest {
    pub fn new(image: ImagePayload, language: Language) -> Self {
        Self { image, language }
    }

    pub fn prompt(&self) -> String {
        build_evidence_prompt(self.language)
    }

    /// Gemini形式のリクエストボディ
    pub fn to_gemini_request(&self) -> GeminiRequest {
        GeminiRequest::with_image(&self.image, self.prompt())
    }
}

/// 外部解析サービス
#[async_trait(?Send)]
pub trait AnalysisService {
    /// リクエストを1回送信し、応答テキストを返す
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, AnalysisError>;
}

/// クライアント側で付与する値（日時・ケースID）
pub trait ResultStamper {
    fn timestamp(&self) -> String;
    fn case_id(&self) -> CaseId;
}

/// 画像を解析して結果を返す
///
/// # Errors
/// * `AnalysisError::Network` - 送信失敗・HTTPエラー
/// * `AnalysisError::MalformedResponse` - 応答が不正・必須フィールド欠落
pub async fn analyze<S, T>(
    service: &S,
    stamper: &T,
    image: ImagePayload,
    language: Language,
) -> Result<EvidenceResult, AnalysisError>
where
    S: AnalysisService + ?Sized,
    T: ResultStamper + ?Sized,
{
    let request = AnalysisRequest::new(image, language);
    tracing::info!(
        mime = request.image.mime_type(),
        bytes = request.image.len(),
        language = language.code(),
        "dispatching evidence analysis"
    );

    let text = service.generate(&request).await.map_err(|e| {
        tracing::warn!("analysis request failed: {}", e);
        e
    })?;

    let report = parse_evidence_response(&text).map_err(|e| {
        tracing::warn!("analysis response rejected: {}", e);
        e
    })?;

    let result = EvidenceResult {
        platform: report.platform,
        date: report.date,
        summary: report.summary,
        trust_score: report.trust_score,
        trust_level: report.trust_level,
        key_points: report.key_points,
        complaints: report.complaints,
        image: request.image,
        timestamp: stamper.timestamp(),
        hash: stamper.case_id(),
    };

    tracing::info!(case = %result.hash, score = result.trust_score, "analysis complete");
    Ok(result)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// 固定応答を返すサービス（呼び出し回数を記録）
    pub struct ScriptedService {
        pub response: Result<String, AnalysisError>,
        pub calls: Cell<u32>,
        pub last_prompt: RefCell<String>,
    }

    impl ScriptedService {
        pub fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                calls: Cell::new(0),
                last_prompt: RefCell::new(String::new()),
            }
        }

        pub fn failing(error: AnalysisError) -> Self {
            Self {
                response: Err(error),
                calls: Cell::new(0),
                last_prompt: RefCell::new(String::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl AnalysisService for ScriptedService {
        async fn generate(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = request.prompt();
            self.response.clone()
        }
    }

    pub struct FixedStamper;

    impl ResultStamper for FixedStamper {
        fn timestamp(&self) -> String {
            "1/18/2025, 10:30:00 AM".to_string()
        }

        fn case_id(&self) -> CaseId {
            CaseId::from_bits(0xDEADBEEF)
        }
    }

    pub const SAMPLE_RESPONSE: &str = r#"{"platform":"X","trustScore":72,"trustLevel":"MEDIUM","summary":"s","keyPoints":["a"],"complaints":{"cyber":"c1","bank":"c2","consumer":"c3"}}"#;
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::types::TrustLevel;
    use futures::executor::block_on;

    fn png() -> ImagePayload {
        ImagePayload::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png")
    }

    #[test]
    fn test_analyze_success() {
        let service = ScriptedService::ok(SAMPLE_RESPONSE);
        let image = png();

        let result = block_on(analyze(&service, &FixedStamper, image.clone(), Language::En)).unwrap();

        assert_eq!(service.calls.get(), 1);
        assert_eq!(result.platform, "X");
        assert_eq!(result.trust_score, 72);
        assert_eq!(result.trust_level, TrustLevel::Medium);
        assert_eq!(result.summary, "s");
        assert_eq!(result.key_points, vec!["a".to_string()]);
        assert_eq!(result.complaints.consumer, "c3");
        assert_eq!(result.image, image);
        assert!(!result.timestamp.is_empty());
        assert_eq!(result.hash.as_str(), "MARK-DEADBEEF");
    }

    #[test]
    fn test_analyze_prompt_uses_language() {
        let service = ScriptedService::ok(SAMPLE_RESPONSE);
        block_on(analyze(&service, &FixedStamper, png(), Language::Hi)).unwrap();
        assert!(service.last_prompt.borrow().contains("in Hindi"));
    }

    #[test]
    fn test_analyze_malformed() {
        let service = ScriptedService::ok("{\"platform\": \"X\"}");
        let result = block_on(analyze(&service, &FixedStamper, png(), Language::En));
        assert!(matches!(result, Err(AnalysisError::MalformedResponse(_))));
        assert_eq!(service.calls.get(), 1);
    }

    #[test]
    fn test_analyze_network_failure_no_retry() {
        let service = ScriptedService::failing(AnalysisError::Network("API error: 503".into()));
        let result = block_on(analyze(&service, &FixedStamper, png(), Language::En));
        assert_eq!(result, Err(AnalysisError::Network("API error: 503".into())));
        assert_eq!(service.calls.get(), 1);
    }

    #[test]
    fn test_request_to_gemini() {
        let request = AnalysisRequest::new(png(), Language::En);
        let json = serde_json::to_string(&request.to_gemini_request()).unwrap();
        assert!(json.contains("\"mime_type\":\"image/png\""));
        assert!(json.contains("summary in English"));
    }
}
