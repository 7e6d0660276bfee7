//! Per-row validation against required fields and live store state
//!
//! All checks for a row are independent and cumulative; the row is
//! skipped when the resulting error list is non-empty. Only read
//! queries are issued here.

use sqlx::SqlitePool;

use crate::db::membres::{self, UniqueField};
use crate::models::{ImportRow, ValidationError};

/// Required CSV columns with their rejection messages
const REQUIRED_FIELDS: [(&str, &str); 10] = [
    ("nom", "Le nom est obligatoire"),
    ("prenom", "Le prénom est obligatoire"),
    ("sexe", "Le sexe est obligatoire"),
    ("date_de_naissance", "La date de naissance est obligatoire"),
    ("lieu_de_naissance", "Le lieu de naissance est obligatoire"),
    ("nin", "Le NIN est obligatoire"),
    ("telephone_principal", "Le téléphone principal est obligatoire"),
    ("adresse_complete", "L'adresse complète est obligatoire"),
    ("departement", "Le département est obligatoire"),
    ("commune", "La commune est obligatoire"),
];

/// Unique columns with their conflict messages
const UNIQUE_FIELDS: [(UniqueField, &str); 4] = [
    (UniqueField::Email, "Cet email existe déjà"),
    (UniqueField::TelephonePrincipal, "Ce téléphone existe déjà"),
    (UniqueField::Nin, "Ce NIN existe déjà"),
    (UniqueField::Nif, "Ce NIF existe déjà"),
];

/// Validate one row; empty result = accepted.
///
/// `line` is the 1-based CSV line number used in the reported errors.
pub async fn validate_row(
    pool: &SqlitePool,
    row: &ImportRow,
    line: usize,
) -> Result<Vec<ValidationError>, sqlx::Error> {
    let mut errors = Vec::new();

    for (field, message) in REQUIRED_FIELDS {
        if row.get(field).is_empty() {
            errors.push(ValidationError::missing(line, field, message));
        }
    }

    // Uniqueness is only checked for values actually present in the row
    for (field, message) in UNIQUE_FIELDS {
        let value = row.get(field.csv_field());
        if !value.is_empty() && membres::unique_field_exists(pool, field, value).await? {
            errors.push(ValidationError::conflict(line, field.csv_field(), message, value));
        }
    }

    // A referral code must point at an existing member
    let code_parrain = row.get("code_parrain");
    if !code_parrain.is_empty() && !membres::code_adhesion_exists(pool, code_parrain).await? {
        errors.push(ValidationError::conflict(
            line,
            "code_parrain",
            "Code de parrainage invalide",
            code_parrain,
        ));
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nou_common::db::init_database_pool;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database_pool(&dir.path().join("nou.db")).await.unwrap();
        (dir, pool)
    }

    fn row(pairs: &[(&str, &str)]) -> ImportRow {
        let headers: Vec<String> = pairs.iter().map(|(h, _)| h.to_string()).collect();
        let fields: Vec<String> = pairs.iter().map(|(_, v)| v.to_string()).collect();
        ImportRow::from_record(&headers, &fields)
    }

    fn complete_row() -> ImportRow {
        complete_row_with(&[])
    }

    fn complete_row_with(extra: &[(&str, &str)]) -> ImportRow {
        let mut pairs = vec![
            ("nom", "Dupont"),
            ("prenom", "Jean"),
            ("sexe", "Homme"),
            ("date_de_naissance", "1990-01-15"),
            ("lieu_de_naissance", "Port-au-Prince"),
            ("nin", "123-456-7890"),
            ("telephone_principal", "50912345678"),
            ("adresse_complete", "123 Rue Example"),
            ("departement", "Ouest"),
            ("commune", "Port-au-Prince"),
        ];
        pairs.extend_from_slice(extra);
        row(&pairs)
    }

    async fn seed(pool: &SqlitePool, username: &str, code: &str, nin: &str, tel: &str, email: Option<&str>) {
        sqlx::query(
            r#"
            INSERT INTO membres (
                guid, username, code_adhesion, nom, prenom, sexe,
                date_de_naissance, lieu_de_naissance, nin, telephone_principal,
                email, adresse_complete, departement, commune, password_hash
            ) VALUES (?, ?, ?, 'Seed', 'Membre', 'Homme',
                      '1980-01-01', 'Cap-Haïtien', ?, ?,
                      ?, '1 Rue Seed', 'Nord', 'Cap-Haïtien', 'x')
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(username)
        .bind(code)
        .bind(nin)
        .bind(tel)
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_complete_row_accepted() {
        let (_dir, pool) = setup().await;
        let errors = validate_row(&pool, &complete_row(), 2).await.unwrap();
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_fields_are_cumulative() {
        let (_dir, pool) = setup().await;
        let errors = validate_row(&pool, &row(&[("nom", "Dupont")]), 3).await.unwrap();

        // nom is present, the nine other required fields are not
        assert_eq!(errors.len(), 9);
        assert!(errors.iter().all(|e| e.row == 3));
        assert!(errors.iter().any(|e| e.field == "prenom"));
        assert!(errors.iter().any(|e| e.field == "commune"));
        assert!(!errors.iter().any(|e| e.field == "nom"));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (_dir, pool) = setup().await;
        seed(&pool, "seed.membre", "ASM0001", "nin-seed", "000-0000", Some("a@b.com")).await;

        let r = complete_row_with(&[("email", "a@b.com")]);
        let errors = validate_row(&pool, &r, 2).await.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].value.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_duplicate_telephone_rejected() {
        let (_dir, pool) = setup().await;
        seed(&pool, "seed.membre", "ASM0001", "nin-seed", "50912345678", None).await;

        let errors = validate_row(&pool, &complete_row(), 2).await.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "telephone_principal");
    }

    #[tokio::test]
    async fn test_blank_code_parrain_not_checked() {
        let (_dir, pool) = setup().await;
        let r = complete_row_with(&[("code_parrain", "")]);

        let errors = validate_row(&pool, &r, 2).await.unwrap();
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_code_parrain_rejected() {
        let (_dir, pool) = setup().await;
        let r = complete_row_with(&[("code_parrain", "AXX0000")]);

        let errors = validate_row(&pool, &r, 2).await.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "code_parrain");
        assert_eq!(errors[0].message, "Code de parrainage invalide");
    }

    #[tokio::test]
    async fn test_known_code_parrain_accepted() {
        let (_dir, pool) = setup().await;
        seed(&pool, "seed.membre", "ASM0001", "nin-seed", "000-0000", None).await;

        let r = complete_row_with(&[("code_parrain", "ASM0001")]);
        let errors = validate_row(&pool, &r, 2).await.unwrap();
        assert!(errors.is_empty());
    }
}
