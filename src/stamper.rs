use chrono::Local;
use evidence_ai_common::{CaseId, ResultStamper};

/// ローカル時刻と乱数ケースIDを付与する
pub struct LocalStamper;

impl ResultStamper for LocalStamper {
    fn timestamp(&self) -> String {
        Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }

    fn case_id(&self) -> CaseId {
        CaseId::from_bits(rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_stamper() {
        let stamper = LocalStamper;
        assert!(!stamper.timestamp().is_empty());
        assert!(CaseId::is_well_formed(stamper.case_id().as_str()));
    }
}
