//! Human-readable import summary

use crate::models::ImportResult;

/// One-line summary returned alongside the structured result
pub fn summary(result: &ImportResult) -> String {
    format!(
        "Import terminé: {} membre(s) créé(s), {} ligne(s) ignorée(s)",
        result.success, result.skipped
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_wording() {
        let mut result = ImportResult::new();
        result.record_created("Dupont", "Jean", "AJD5678".to_string());

        assert_eq!(
            summary(&result),
            "Import terminé: 1 membre(s) créé(s), 0 ligne(s) ignorée(s)"
        );
    }
}
