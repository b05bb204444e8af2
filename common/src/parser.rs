//! APIレスポンスパーサー
//!
//! 解析サービスの応答テキストからJSONオブジェクトを取り出し、
//! 必須フィールドを検証して EvidenceReport に変換する

use crate::error::AnalysisError;
use crate::types::{Complaints, TrustLevel};
use serde_json::{Map, Value};

/// 検証済みの解析内容（タイムスタンプ・ID付与前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceReport {
    pub platform: String,
    pub date: String,
    pub summary: String,
    pub trust_score: u8,
    pub trust_level: TrustLevel,
    pub key_points: Vec<String>,
    pub complaints: Complaints,
}

/// 応答からJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 最初の `{` から最後の `}` まで
///
/// # Examples
/// ```
/// use evidence_ai_common::extract_json_object;
///
/// let response = "result: {\"platform\": \"X\"}";
/// assert_eq!(extract_json_object(response), Some("{\"platform\": \"X\"}"));
/// ```
pub fn extract_json_object(response: &str) -> Option<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            return Some(response[start..start + end_offset].trim());
        }
    }

    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

/// 解析レスポンスをパース
///
/// # Returns
/// * `Ok(EvidenceReport)` - 必須フィールドがすべて揃っている
/// * `Err(AnalysisError::MalformedResponse)` - JSONなし・パース失敗・必須フィールド欠落・範囲外
pub fn parse_evidence_response(response: &str) -> Result<EvidenceReport, AnalysisError> {
    let json_str = extract_json_object(response)
        .ok_or_else(|| malformed("JSON object not found"))?;
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| malformed(format!("JSON parse error: {}", e)))?;
    let map = value
        .as_object()
        .ok_or_else(|| malformed("JSON object not found"))?;

    let complaints = map
        .get("complaints")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing field: complaints"))?;

    Ok(EvidenceReport {
        platform: require_string(map, "platform")?,
        date: get_string(map, "date").unwrap_or_default(),
        summary: require_string(map, "summary")?,
        trust_score: require_score(map, "trustScore")?,
        trust_level: require_level(map, "trustLevel")?,
        key_points: require_string_list(map, "keyPoints")?,
        complaints: Complaints {
            cyber: require_string(complaints, "cyber")?,
            bank: require_string(complaints, "bank")?,
            consumer: require_string(complaints, "consumer")?,
        },
    })
}

fn malformed(message: impl Into<String>) -> AnalysisError {
    AnalysisError::MalformedResponse(message.into())
}

fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    let value = map.get(key)?;
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    if value.is_null() || value.is_object() || value.is_array() {
        return None;
    }
    Some(value.to_string())
}

fn require_string(map: &Map<String, Value>, key: &str) -> Result<String, AnalysisError> {
    get_string(map, key).ok_or_else(|| malformed(format!("missing field: {}", key)))
}

fn require_score(map: &Map<String, Value>, key: &str) -> Result<u8, AnalysisError> {
    let value = map
        .get(key)
        .ok_or_else(|| malformed(format!("missing field: {}", key)))?;

    let score = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| malformed(format!("{} is not an integer: {}", key, value)))?;

    if score > 100 {
        return Err(malformed(format!("{} out of range: {}", key, score)));
    }
    Ok(score as u8)
}

fn require_level(map: &Map<String, Value>, key: &str) -> Result<TrustLevel, AnalysisError> {
    let label = require_string(map, key)?;
    TrustLevel::parse(&label).ok_or_else(|| malformed(format!("unknown {}: {}", key, label)))
}

fn require_string_list(map: &Map<String, Value>, key: &str) -> Result<Vec<String>, AnalysisError> {
    let items = map
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(format!("missing field: {}", key)))?;

    Ok(items
        .iter()
        .map(|item| match item.as_str() {
            Some(s) => s.to_string(),
            None => item.to_string(),
        })
        .collect())
}
