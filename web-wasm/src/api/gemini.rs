//! Gemini API連携（fetch）

use crate::browser::js_error_message;
use async_trait::async_trait;
use evidence_ai_common::gemini::{endpoint_url, GeminiResponse, DEFAULT_MODEL};
use evidence_ai_common::{AnalysisError, AnalysisRequest, AnalysisService};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub struct GeminiFetchClient {
    api_key: String,
    model: String,
}

impl GeminiFetchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// POSTしてレスポンスを返す（HTTPエラーもErr）
async fn post_json(url: &str, body: &str) -> Result<Response, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
    }
    Ok(resp)
}

#[async_trait(?Send)]
impl AnalysisService for GeminiFetchClient {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
        let url = endpoint_url(&self.model, &self.api_key);
        let body = serde_json::to_string(&request.to_gemini_request())
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let resp = post_json(&url, &body)
            .await
            .map_err(|e| AnalysisError::Network(js_error_message(&e)))?;

        let json = resp
            .json()
            .map_err(|e| AnalysisError::MalformedResponse(js_error_message(&e)))?;
        let json = JsFuture::from(json)
            .await
            .map_err(|e| AnalysisError::MalformedResponse(js_error_message(&e)))?;

        let response: GeminiResponse = serde_wasm_bindgen::from_value(json)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        response.into_text()
    }
}
