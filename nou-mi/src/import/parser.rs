//! CSV parsing for member import
//!
//! Turns uploaded file text into an ordered, fully materialized row
//! sequence. Quoted fields, embedded commas and escaped quotes are
//! handled by the csv grammar; values are trimmed and stay strings.

use csv::ReaderBuilder;
use thiserror::Error;

use crate::models::ImportRow;

/// File-level parse failures (abort the whole request)
#[derive(Debug, Error)]
pub enum ParseError {
    /// No header line, or a header with no data rows
    #[error("Le fichier CSV doit contenir au moins une ligne d'en-tête et une ligne de données")]
    EmptyFile,

    /// Structurally invalid CSV
    #[error("CSV invalide: {0}")]
    Malformed(#[from] csv::Error),
}

/// Parse file text into rows keyed by the header line.
///
/// Strips a leading UTF-8 BOM, skips blank lines, and zips each record
/// positionally against the header: short records pad with empty
/// strings, excess fields are dropped.
pub fn parse_rows(content: &str) -> Result<Vec<ImportRow>, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();

        // Whitespace-only lines survive the reader as a single empty
        // field; a line of separators (",,,") is a real, rejectable row
        if fields.len() <= 1 && fields.first().map(String::as_str).unwrap_or("").is_empty() {
            continue;
        }
        rows.push(ImportRow::from_record(&headers, &fields));
    }

    if rows.is_empty() {
        return Err(ParseError::EmptyFile);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsing_is_idempotent() {
        let csv = "nom,prenom\nDupont,Jean\nMartin,Paul\n";
        let first = parse_rows(csv).unwrap();
        let second = parse_rows(csv).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].get("nom"), "Martin");
    }

    #[test]
    fn test_bom_is_stripped() {
        let plain = "nom,prenom\nDupont,Jean\n";
        let with_bom = format!("\u{feff}{}", plain);
        assert_eq!(parse_rows(plain).unwrap(), parse_rows(&with_bom).unwrap());
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(parse_rows(""), Err(ParseError::EmptyFile)));
        assert!(matches!(parse_rows("\n\n"), Err(ParseError::EmptyFile)));
    }

    #[test]
    fn test_header_without_data_rejected() {
        assert!(matches!(
            parse_rows("nom,prenom\n"),
            Err(ParseError::EmptyFile)
        ));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let csv = "nom,prenom\n\nDupont,Jean\n   \nMartin,Paul\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_separator_only_line_is_a_real_row() {
        // ",," carries three present-but-empty fields and must reach
        // validation instead of being dropped as blank
        let rows = parse_rows("nom,prenom,email\nDupont,Jean,\n,,\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("nom"), "");
    }

    #[test]
    fn test_short_row_pads_missing_fields() {
        let rows = parse_rows("nom,prenom,email\nDupont\n").unwrap();
        assert_eq!(rows[0].get("nom"), "Dupont");
        assert_eq!(rows[0].get("prenom"), "");
        assert_eq!(rows[0].get("email"), "");
    }

    #[test]
    fn test_long_row_drops_excess_fields() {
        let rows = parse_rows("nom,prenom\nDupont,Jean,extra,extra2\n").unwrap();
        assert_eq!(rows[0].get("nom"), "Dupont");
        assert_eq!(rows[0].get("prenom"), "Jean");
    }

    #[test]
    fn test_quoted_field_with_embedded_comma() {
        let rows = parse_rows("nom,adresse_complete\nDupont,\"12, Rue Example\"\n").unwrap();
        assert_eq!(rows[0].get("adresse_complete"), "12, Rue Example");
    }

    #[test]
    fn test_values_are_trimmed() {
        let rows = parse_rows("nom , prenom\n  Dupont ,  Jean \n").unwrap();
        assert_eq!(rows[0].get("nom"), "Dupont");
        assert_eq!(rows[0].get("prenom"), "Jean");
    }
}
