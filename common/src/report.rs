//! テキストレポート出力
//!
//! 結果画面と同じ並び（見出し・スコア・要約・要点・苦情文）で
//! プレーンテキストに整形する。CLIの表示とエクスポートで使う。

use crate::i18n::Labels;
use crate::types::{ComplaintKind, EvidenceResult, TrustLevel};
use std::fmt::{self, Write};

const RULE: &str = "============================================================";

/// 結果をテキストレポートに整形
pub fn render_text_report(result: &EvidenceResult, complaint: ComplaintKind, labels: &Labels) -> String {
    let mut out = String::new();
    // String への書き込みは失敗しない
    if write_report(&mut out, result, complaint, labels).is_err() {
        tracing::error!("report formatting failed");
    }
    out
}

/// スコアとレベルが食い違うときの注記（レベルはサービスの値のまま）
pub fn trust_hint(result: &EvidenceResult) -> Option<String> {
    (!result.levels_agree()).then(|| {
        format!(
            "score suggests {}",
            TrustLevel::expected_for(result.trust_score).as_str()
        )
    })
}

fn write_report(
    out: &mut impl Write,
    result: &EvidenceResult,
    complaint: ComplaintKind,
    labels: &Labels,
) -> fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{} // {}", labels.title, result.headline())?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "CASE ID    : {}", result.hash)?;
    writeln!(out, "TIMESTAMP  : {}", result.timestamp)?;
    if !result.date.is_empty() {
        writeln!(out, "DATE       : {}", result.date)?;
    }
    write!(out, "TRUST      : {}% [{}]", result.trust_score, result.trust_level.as_str())?;
    match trust_hint(result) {
        Some(hint) => writeln!(out, " ({})", hint)?,
        None => writeln!(out)?,
    }
    writeln!(out)?;

    writeln!(out, "SUMMARY")?;
    writeln!(out, "  {}", result.summary)?;
    writeln!(out)?;

    if !result.key_points.is_empty() {
        writeln!(out, "KEY POINTS")?;
        for point in &result.key_points {
            writeln!(out, "  - {}", point)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "COMPLAINT DRAFT [{}]", complaint.as_str().to_uppercase())?;
    writeln!(out, "{}", result.complaint(complaint))?;
    writeln!(out)?;
    writeln!(out, "{}", labels.disclaimer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ImagePayload;
    use crate::types::{CaseId, Complaints, Language};

    fn sample() -> EvidenceResult {
        EvidenceResult {
            platform: "WhatsApp".to_string(),
            date: "2025-01-18".to_string(),
            summary: "Fake lottery message".to_string(),
            trust_score: 12,
            trust_level: TrustLevel::Low,
            key_points: vec!["Unknown sender".to_string(), "Asks for OTP".to_string()],
            complaints: Complaints {
                cyber: "To the Cyber Cell".to_string(),
                bank: "To the Branch Manager".to_string(),
                consumer: "To the Consumer Forum".to_string(),
            },
            image: ImagePayload::default(),
            timestamp: "1/18/2025, 10:30:00 AM".to_string(),
            hash: CaseId::from_bits(0x0000_00FF),
        }
    }

    #[test]
    fn test_report_contains_fields() {
        let report = render_text_report(&sample(), ComplaintKind::Bank, Labels::for_language(Language::En));

        assert!(report.contains("WHATSAPP AUDIT"));
        assert!(report.contains("MARK-000000FF"));
        assert!(report.contains("12% [LOW]"));
        assert!(report.contains("  - Asks for OTP"));
        assert!(report.contains("COMPLAINT DRAFT [BANK]"));
        assert!(report.contains("To the Branch Manager"));
        assert!(!report.contains("To the Cyber Cell"));
        assert!(report.ends_with("STARK INDUSTRIES SECURE PROTOCOL\n"));
    }

    #[test]
    fn test_report_omits_empty_sections() {
        let mut result = sample();
        result.date.clear();
        result.key_points.clear();

        let report = render_text_report(&result, ComplaintKind::Cyber, Labels::for_language(Language::Hi));

        assert!(!report.contains("DATE"));
        assert!(!report.contains("KEY POINTS"));
        assert!(report.contains("जाार्विस"));
    }

    #[test]
    fn test_trust_mismatch_is_annotated_not_corrected() {
        let mut result = sample();
        result.trust_score = 85;

        let report = render_text_report(&result, ComplaintKind::Cyber, Labels::for_language(Language::En));

        assert!(report.contains("TRUST      : 85% [LOW] (score suggests HIGH)"));
        assert_eq!(result.trust_level, TrustLevel::Low);
    }

    #[test]
    fn test_trust_hint_absent_when_consistent() {
        let report = render_text_report(&sample(), ComplaintKind::Cyber, Labels::for_language(Language::En));
        assert!(report.contains("TRUST      : 12% [LOW]\n"));
        assert_eq!(trust_hint(&sample()), None);
    }
}
