//! Member CSV import pipeline
//!
//! Parse → per-row validate → mint identifiers → insert → aggregate.
//! Per row: `Parsed → Validated(pass|fail) → [IdentifiersGenerated →
//! Inserted] | Skipped`.

pub mod credentials;
pub mod identifiers;
pub mod parser;
pub mod report;
pub mod validator;

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, warn};

use crate::db::membres;
use crate::models::{ImportResult, ImportRow, NewMembre, ValidationError};

/// Fatal import failures that abort the whole request
#[derive(Debug, Error)]
pub enum ImportError {
    /// Unusable file: no header, no data, or malformed CSV
    #[error(transparent)]
    Parse(#[from] parser::ParseError),

    /// Store connectivity failure during validation
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Run the pipeline over one uploaded file.
///
/// Rows are processed strictly in file order; the 1-based CSV line
/// number is the row index + 2 (line 1 is the header). Nothing below
/// the row level aborts the batch, so `success + skipped` always equals
/// the number of data rows.
pub async fn run_import(pool: &SqlitePool, content: &str) -> Result<ImportResult, ImportError> {
    let rows = parser::parse_rows(content)?;
    let mut result = ImportResult::new();

    for (index, row) in rows.iter().enumerate() {
        let line = index + 2;

        let errors = validator::validate_row(pool, row, line).await?;
        if !errors.is_empty() {
            debug!(line, errors = errors.len(), "Row rejected by validation");
            result.record_skipped(row, errors);
            continue;
        }

        // Identifier generation and insertion failures are confined to
        // the row and reported under the "general" field. A unique-index
        // violation lands here when a concurrent writer won the
        // check-then-insert window.
        match insert_row(pool, row).await {
            Ok(code_adhesion) => {
                result.record_created(row.get("nom"), row.get("prenom"), code_adhesion);
            }
            Err(e) => {
                warn!(line, error = %e, "Row insertion failed");
                let error =
                    ValidationError::general(line, format!("Erreur lors de l'insertion: {}", e));
                result.record_skipped(row, vec![error]);
            }
        }
    }

    Ok(result)
}

/// Mint identifiers and credentials for an accepted row, then insert it
async fn insert_row(pool: &SqlitePool, row: &ImportRow) -> anyhow::Result<String> {
    let code_adhesion = identifiers::generate_code_adhesion(
        pool,
        row.get("prenom"),
        row.get("nom"),
        row.get("telephone_principal"),
    )
    .await?;
    let username = identifiers::generate_username(pool, row.get("prenom"), row.get("nom")).await?;

    let password = credentials::generate_password();
    let password_hash = credentials::hash_password(&password)?;

    let membre = NewMembre::from_row(row, code_adhesion.clone(), username, password_hash)?;
    membres::insert_membre(pool, &membre).await?;

    Ok(code_adhesion)
}
