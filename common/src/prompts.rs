//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有される証拠解析用プロンプト

use crate::types::{ComplaintKind, Language, TrustLevel};

/// 証拠解析プロンプト生成
///
/// # Arguments
/// * `language` - 要約・苦情文を出力させる言語
///
/// # Returns
/// JSONオブジェクト1件のみを返させるプロンプト文字列
pub fn build_evidence_prompt(language: Language) -> String {
    let levels = TrustLevel::ALL
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join("/");
    let complaint_keys = ComplaintKind::ALL
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let lang = language.prompt_name();

    format!(
        r#"Act as JARVIS (Stark AI). Use futuristic/analytical language.
Analyze the provided image for evidence (chat screenshots, payment receipts, messages, listings).

## Output format (a single JSON object, nothing else)
{{
  "platform": "app or website the evidence comes from",
  "date": "date visible in the evidence, empty string if none",
  "summary": "short analytical summary in {lang}",
  "trustScore": 0-100 integer,
  "trustLevel": "{levels}",
  "keyPoints": ["short finding", "..."],
  "complaints": {{
    "cyber": "cyber crime complaint draft in {lang}",
    "bank": "bank complaint draft in {lang}",
    "consumer": "consumer forum complaint draft in {lang}"
  }}
}}

## Rules
- complaints must have exactly these keys: {complaint_keys} (keys are fixed, never translate them)
- trustScore is an integer between 0 and 100
- trustLevel is one of {levels}
- Output the JSON object only. No explanations."#
    )
}
