//! Gemini API のリクエスト/レスポンス型
//!
//! WASM(fetch)とCLI(reqwest)の両方から同じ形でシリアライズする。

use crate::error::AnalysisError;
use crate::payload::ImagePayload;
use serde::{Deserialize, Serialize};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// generateContent エンドポイントURL
pub fn endpoint_url(model: &str, api_key: &str) -> String {
    format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key)
}

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
}

impl GeminiRequest {
    /// 画像1枚+指示文の単一リクエストを作成
    pub fn with_image(image: &ImagePayload, prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type().to_string(),
                            data: image.to_base64(),
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: DEFAULT_TEMPERATURE,
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: String,
}

impl GeminiResponse {
    /// 最初の候補のテキストを取り出す
    pub fn into_text(self) -> Result<String, AnalysisError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AnalysisError::MalformedResponse("Empty response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("gemini-2.0-flash", "KEY");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=KEY"
        );
    }

    #[test]
    fn test_gemini_request_serialize() {
        let image = ImagePayload::new(b"hello".to_vec(), "image/png");
        let request = GeminiRequest::with_image(&image, "テストプロンプト".to_string());

        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert!(json.contains("\"contents\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
        assert!(json.contains("\"inline_data\":{\"mime_type\":\"image/png\",\"data\":\"aGVsbG8=\"}"));
        assert!(json.contains("\"text\":\"テストプロンプト\""));
    }

    #[test]
    fn test_part_text_serialize() {
        let part = Part::Text { text: "Hello".to_string() };
        let json = serde_json::to_string(&part).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"text":"Hello"}"#);
    }

    #[test]
    fn test_gemini_response_into_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "{\"platform\": \"UPI\"}"
                    }]
                }
            }]
        }"#;

        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.into_text().unwrap(), r#"{"platform": "UPI"}"#);
    }

    #[test]
    fn test_gemini_response_empty() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            response.into_text(),
            Err(AnalysisError::MalformedResponse(_))
        ));

        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_text().is_err());
    }
}
