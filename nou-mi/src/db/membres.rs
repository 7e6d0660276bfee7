//! Member store operations
//!
//! Point lookups used by validation and identifier generation, plus the
//! one multi-column insert per accepted row. Uniqueness is ultimately
//! enforced by the store's unique indexes; the lookups are a fast path.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::NewMembre;

/// Unique contact/identity columns checked during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    TelephonePrincipal,
    Nin,
    Nif,
}

impl UniqueField {
    /// Store column name
    pub fn column(self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::TelephonePrincipal => "telephone_principal",
            UniqueField::Nin => "nin",
            UniqueField::Nif => "nif",
        }
    }

    /// CSV column name (identical to the store column)
    pub fn csv_field(self) -> &'static str {
        self.column()
    }
}

/// Check whether a member already carries this value in a unique column
pub async fn unique_field_exists(
    pool: &SqlitePool,
    field: UniqueField,
    value: &str,
) -> Result<bool, sqlx::Error> {
    // Column name comes from the enum above, never from user input
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM membres WHERE {} = ?)",
        field.column()
    );
    sqlx::query_scalar(&sql).bind(value).fetch_one(pool).await
}

/// Check whether a membership code is already taken
pub async fn code_adhesion_exists(pool: &SqlitePool, code: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM membres WHERE code_adhesion = ?)")
        .bind(code)
        .fetch_one(pool)
        .await
}

/// Check whether a username is already taken
pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM membres WHERE username = ?)")
        .bind(username)
        .fetch_one(pool)
        .await
}

/// Insert one member record
///
/// A unique-index violation here is the authoritative duplicate signal
/// when a concurrent writer won the check-then-insert window.
pub async fn insert_membre(pool: &SqlitePool, membre: &NewMembre) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO membres (
            guid, username, code_adhesion, code_parrain,
            nom, prenom, surnom, sexe, lieu_de_naissance, date_de_naissance,
            nom_pere, nom_mere, situation_matrimoniale,
            nb_enfants, nb_personnes_a_charge,
            nin, nif, telephone_principal, telephone_etranger, email,
            adresse_complete, profession, occupation,
            departement, commune, section_communale,
            facebook, instagram,
            a_ete_membre_politique, nom_parti_precedent, role_politique_precedent,
            a_ete_membre_organisation, nom_organisation_precedente, role_organisation_precedent,
            referent_nom, referent_prenom, referent_adresse, referent_telephone,
            relation_avec_referent,
            a_ete_condamne, a_viole_loi_drogue, a_participe_activite_terroriste,
            password_hash, role_utilisateur, statut
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                  ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                  ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&membre.username)
    .bind(&membre.code_adhesion)
    .bind(&membre.code_parrain)
    .bind(&membre.nom)
    .bind(&membre.prenom)
    .bind(&membre.surnom)
    .bind(&membre.sexe)
    .bind(&membre.lieu_de_naissance)
    .bind(&membre.date_de_naissance)
    .bind(&membre.nom_pere)
    .bind(&membre.nom_mere)
    .bind(&membre.situation_matrimoniale)
    .bind(membre.nb_enfants)
    .bind(membre.nb_personnes_a_charge)
    .bind(&membre.nin)
    .bind(&membre.nif)
    .bind(&membre.telephone_principal)
    .bind(&membre.telephone_etranger)
    .bind(&membre.email)
    .bind(&membre.adresse_complete)
    .bind(&membre.profession)
    .bind(&membre.occupation)
    .bind(&membre.departement)
    .bind(&membre.commune)
    .bind(&membre.section_communale)
    .bind(&membre.facebook)
    .bind(&membre.instagram)
    .bind(membre.a_ete_membre_politique)
    .bind(&membre.nom_parti_precedent)
    .bind(&membre.role_politique_precedent)
    .bind(membre.a_ete_membre_organisation)
    .bind(&membre.nom_organisation_precedente)
    .bind(&membre.role_organisation_precedent)
    .bind(&membre.referent_nom)
    .bind(&membre.referent_prenom)
    .bind(&membre.referent_adresse)
    .bind(&membre.referent_telephone)
    .bind(&membre.relation_avec_referent)
    .bind(membre.a_ete_condamne)
    .bind(membre.a_viole_loi_drogue)
    .bind(membre.a_participe_activite_terroriste)
    .bind(&membre.password_hash)
    .bind(&membre.role_utilisateur)
    .bind(&membre.statut)
    .execute(pool)
    .await?;

    Ok(())
}
