//! Database access for the Nou admin services
//!
//! Shared SQLite database holding the member records.

use crate::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// Connects to the SQLite database inside the root folder, creating
/// the file and the schema on first use.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize the member tables
///
/// Creates the membres table and its unique indexes if they don't exist.
/// The unique indexes are authoritative for the identifier and contact
/// uniqueness invariants; application-level pre-checks are a fast path.
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS membres (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            guid TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL UNIQUE,
            code_adhesion TEXT NOT NULL UNIQUE,
            code_parrain TEXT,
            nom TEXT NOT NULL,
            prenom TEXT NOT NULL,
            surnom TEXT,
            sexe TEXT NOT NULL,
            date_de_naissance TEXT NOT NULL,
            lieu_de_naissance TEXT NOT NULL,
            nom_pere TEXT,
            nom_mere TEXT,
            situation_matrimoniale TEXT,
            nb_enfants INTEGER NOT NULL DEFAULT 0,
            nb_personnes_a_charge INTEGER NOT NULL DEFAULT 0,
            nin TEXT NOT NULL,
            nif TEXT,
            telephone_principal TEXT NOT NULL,
            telephone_etranger TEXT,
            email TEXT,
            adresse_complete TEXT NOT NULL,
            profession TEXT,
            occupation TEXT,
            departement TEXT NOT NULL,
            commune TEXT NOT NULL,
            section_communale TEXT,
            facebook TEXT,
            instagram TEXT,
            a_ete_membre_politique INTEGER NOT NULL DEFAULT 0,
            nom_parti_precedent TEXT,
            role_politique_precedent TEXT,
            a_ete_membre_organisation INTEGER NOT NULL DEFAULT 0,
            nom_organisation_precedente TEXT,
            role_organisation_precedent TEXT,
            referent_nom TEXT,
            referent_prenom TEXT,
            referent_adresse TEXT,
            referent_telephone TEXT,
            relation_avec_referent TEXT,
            a_ete_condamne INTEGER NOT NULL DEFAULT 0,
            a_viole_loi_drogue INTEGER NOT NULL DEFAULT 0,
            a_participe_activite_terroriste INTEGER NOT NULL DEFAULT 0,
            password_hash TEXT NOT NULL,
            role_utilisateur TEXT NOT NULL DEFAULT 'membre',
            statut TEXT NOT NULL DEFAULT 'Membre pré-adhérent',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // NULLs are exempt from SQLite unique indexes, so optional contact
    // fields stay optional while non-empty values stay unique.
    for statement in [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_membres_email ON membres(email)",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_membres_telephone ON membres(telephone_principal)",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_membres_nin ON membres(nin)",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_membres_nif ON membres(nif)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Database tables initialized (membres)");

    Ok(())
}
