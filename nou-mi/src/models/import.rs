//! Import pipeline data: rows, row errors and the aggregate result

use serde::Serialize;
use std::collections::HashMap;

/// One data line of the uploaded CSV, mapped by column name.
///
/// Values are trimmed raw strings; columns absent from the line are the
/// empty string. No type coercion happens before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    values: HashMap<String, String>,
}

impl ImportRow {
    /// Zip a record positionally against the header line.
    ///
    /// Short records pad missing trailing fields with the empty string;
    /// excess fields beyond the header are dropped.
    pub fn from_record(headers: &[String], fields: &[String]) -> Self {
        let values = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = fields.get(i).map(String::as_str).unwrap_or("");
                (header.clone(), value.trim().to_string())
            })
            .collect();
        Self { values }
    }

    /// Raw value of a column, empty string when absent
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Non-empty value of a column, None when blank or absent
    pub fn opt(&self, field: &str) -> Option<String> {
        let value = self.get(field);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

}

/// Non-fatal rejection reason attached to one row during import
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// 1-based CSV line number (header is line 1)
    pub row: usize,
    /// Field name, or "general" for insertion-path failures
    pub field: String,
    /// Human-readable message
    pub message: String,
    /// Offending raw value, for duplicate-field errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ValidationError {
    /// Missing required field or invalid referral
    pub fn missing(row: usize, field: &str, message: &str) -> Self {
        Self {
            row,
            field: field.to_string(),
            message: message.to_string(),
            value: None,
        }
    }

    /// Conflict carrying the offending raw value
    pub fn conflict(row: usize, field: &str, message: &str, value: &str) -> Self {
        Self {
            row,
            field: field.to_string(),
            message: message.to_string(),
            value: Some(value.to_string()),
        }
    }

    /// Insertion-path failure, tagged "general"
    pub fn general(row: usize, message: String) -> Self {
        Self {
            row,
            field: "general".to_string(),
            message,
            value: None,
        }
    }
}

/// Successfully created member, as reported to the caller
#[derive(Debug, Clone, Serialize)]
pub struct CreatedMembre {
    pub nom: String,
    pub prenom: String,
    pub code_adhesion: String,
}

/// Skipped row with the concatenated rejection reasons
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub nom: String,
    pub prenom: String,
    pub reason: String,
}

/// Per-outcome row lists of one import
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportDetails {
    pub created: Vec<CreatedMembre>,
    pub duplicates: Vec<SkippedRow>,
}

/// Aggregate outcome of one import request
///
/// Built incrementally in file order; `success + skipped` always equals
/// the number of data rows processed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResult {
    pub success: usize,
    pub errors: Vec<ValidationError>,
    pub skipped: usize,
    pub details: ImportDetails,
}

impl ImportResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted and inserted row
    pub fn record_created(&mut self, nom: &str, prenom: &str, code_adhesion: String) {
        self.success += 1;
        self.details.created.push(CreatedMembre {
            nom: nom.to_string(),
            prenom: prenom.to_string(),
            code_adhesion,
        });
    }

    /// Record a skipped row together with its errors.
    ///
    /// Both validation failures and insertion failures land here, so the
    /// duplicates list is a complete account of every skipped row.
    pub fn record_skipped(&mut self, row: &ImportRow, errors: Vec<ValidationError>) {
        let reason = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        self.errors.extend(errors);
        self.skipped += 1;
        self.details.duplicates.push(SkippedRow {
            nom: row.opt("nom").unwrap_or_else(|| "N/A".to_string()),
            prenom: row.opt("prenom").unwrap_or_else(|| "N/A".to_string()),
            reason,
        });
    }
}
