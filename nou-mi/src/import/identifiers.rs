//! Membership code and username generation
//!
//! Both identifiers are minted from the member's name (and phone, for
//! the code) and probed against the store until a free value is found.
//! The probe loop is capped; the store's unique indexes remain the
//! authoritative guard if a concurrent writer takes the same candidate.

use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::membres;

/// Upper bound on collision probes before giving up on a base value
const MAX_PROBE_ATTEMPTS: usize = 1000;

/// Identifier generation failures (confined to the row being imported)
#[derive(Debug, Error)]
pub enum IdentifierError {
    /// Empty name or a phone number with fewer than 4 digits
    #[error("Impossible de générer le code d'adhésion : prénom, nom ou téléphone invalide")]
    InvalidInput,

    /// Probe cap reached without finding a free value
    #[error("Espace d'identifiants épuisé pour {0}")]
    Exhausted(&'static str),

    /// Store lookup failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Mint a unique membership code: `A` + initials + last 4 phone digits.
///
/// `AJD5678` for Jean Dupont / …5678; on collision the candidates are
/// `AJD56781`, `AJD56782`, …
pub async fn generate_code_adhesion(
    pool: &SqlitePool,
    prenom: &str,
    nom: &str,
    telephone: &str,
) -> Result<String, IdentifierError> {
    let digits: String = telephone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return Err(IdentifierError::InvalidInput);
    }
    let prenom_initial = prenom.chars().next().ok_or(IdentifierError::InvalidInput)?;
    let nom_initial = nom.chars().next().ok_or(IdentifierError::InvalidInput)?;

    let base = format!(
        "A{}{}{}",
        prenom_initial.to_uppercase(),
        nom_initial.to_uppercase(),
        &digits[digits.len() - 4..]
    );

    let mut code = base.clone();
    for suffix in 1..=MAX_PROBE_ATTEMPTS {
        if !membres::code_adhesion_exists(pool, &code).await? {
            return Ok(code);
        }
        code = format!("{}{}", base, suffix);
    }

    Err(IdentifierError::Exhausted("code_adhesion"))
}

/// Mint a unique username: `prenom.nom` lower-cased, restricted to
/// `[a-z0-9._]`. On collision the candidates are `name2`, `name3`, …
pub async fn generate_username(
    pool: &SqlitePool,
    prenom: &str,
    nom: &str,
) -> Result<String, IdentifierError> {
    let base: String = format!("{}.{}", prenom.to_lowercase(), nom.to_lowercase())
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '.' | '_'))
        .collect();

    let mut username = base.clone();
    for suffix in 2..=MAX_PROBE_ATTEMPTS {
        if !membres::username_exists(pool, &username).await? {
            return Ok(username);
        }
        username = format!("{}{}", base, suffix);
    }

    Err(IdentifierError::Exhausted("username"))
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

    async fn seed(pool: &SqlitePool, username: &str, code: &str) {
        sqlx::query(
            r#"
            INSERT INTO membres (
                guid, username, code_adhesion, nom, prenom, sexe,
                date_de_naissance, lieu_de_naissance, nin, telephone_principal,
                adresse_complete, departement, commune, password_hash
            ) VALUES (?, ?, ?, 'Seed', 'Membre', 'Homme',
                      '1980-01-01', 'Cap-Haïtien', ?, ?,
                      '1 Rue Seed', 'Nord', 'Cap-Haïtien', 'x')
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(username)
        .bind(code)
        .bind(format!("nin-{}", username))
        .bind(format!("tel-{}", username))
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_code_generation_is_deterministic() {
        let (_dir, pool) = setup().await;
        let code = generate_code_adhesion(&pool, "Jean", "Dupont", "50912345678")
            .await
            .unwrap();
        assert_eq!(code, "AJD5678");
    }

    #[tokio::test]
    async fn test_code_collision_appends_suffix() {
        let (_dir, pool) = setup().await;
        seed(&pool, "jean.dupont", "AJD5678").await;

        let code = generate_code_adhesion(&pool, "Jean", "Dupont", "50912345678")
            .await
            .unwrap();
        assert_eq!(code, "AJD56781");
    }

    #[tokio::test]
    async fn test_code_second_collision() {
        let (_dir, pool) = setup().await;
        seed(&pool, "jean.dupont", "AJD5678").await;
        seed(&pool, "jean.dupont2", "AJD56781").await;

        let code = generate_code_adhesion(&pool, "Jean", "Dupont", "50912345678")
            .await
            .unwrap();
        assert_eq!(code, "AJD56782");
    }

    #[tokio::test]
    async fn test_non_digits_stripped_from_phone() {
        let (_dir, pool) = setup().await;
        let code = generate_code_adhesion(&pool, "Jean", "Dupont", "+509 12-34-56.78")
            .await
            .unwrap();
        assert_eq!(code, "AJD5678");
    }

    #[tokio::test]
    async fn test_short_phone_rejected() {
        let (_dir, pool) = setup().await;
        let err = generate_code_adhesion(&pool, "Jean", "Dupont", "509")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidInput));
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let (_dir, pool) = setup().await;
        let err = generate_code_adhesion(&pool, "", "Dupont", "50912345678")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidInput));
    }

    #[tokio::test]
    async fn test_username_generation() {
        let (_dir, pool) = setup().await;
        let username = generate_username(&pool, "Jean", "Dupont").await.unwrap();
        assert_eq!(username, "jean.dupont");
    }

    #[tokio::test]
    async fn test_username_collision_starts_at_two() {
        let (_dir, pool) = setup().await;
        seed(&pool, "jean.dupont", "AJD5678").await;

        let username = generate_username(&pool, "Jean", "Dupont").await.unwrap();
        assert_eq!(username, "jean.dupont2");
    }

    #[tokio::test]
    async fn test_username_strips_disallowed_characters() {
        let (_dir, pool) = setup().await;
        let username = generate_username(&pool, "Jean-Marc", "D'Aubigné").await.unwrap();
        assert_eq!(username, "jeanmarc.daubign");
    }
}
