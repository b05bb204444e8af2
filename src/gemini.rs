//! Gemini API クライアント（reqwest）

use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use evidence_ai_common::gemini::{endpoint_url, GeminiResponse};
use evidence_ai_common::{AnalysisError, AnalysisRequest, AnalysisService};
use std::time::Duration;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// 設定（APIキー・モデル・タイムアウト）から作成
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.get_api_key()?,
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait(?Send)]
impl AnalysisService for GeminiClient {
    async fn generate(&self, request: &AnalysisRequest) -> std::result::Result<String, AnalysisError> {
        let url = endpoint_url(&self.model, &self.api_key);
        tracing::debug!(model = %self.model, "POST generateContent");

        let resp = self
            .http
            .post(&url)
            .json(&request.to_gemini_request())
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AnalysisError::Network(format!("API error: {}", status.as_u16())));
        }

        let body: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.without_url().to_string()))?;

        body.into_text()
    }
}
