//! Member record under construction during import

use nou_common::{Error, Result};

use super::ImportRow;

/// Fixed role assigned to every imported member
pub const DEFAULT_ROLE: &str = "membre";

/// Fixed initial status label assigned to every imported member
pub const INITIAL_STATUS: &str = "Membre pré-adhérent";

/// A member record ready for insertion into the store.
///
/// Mirrors the membres table: optional CSV fields become None (persisted
/// NULL), '1'-encoded flags become 1/0 integers, counters default to 0.
#[derive(Debug, Clone)]
pub struct NewMembre {
    pub username: String,
    pub code_adhesion: String,
    pub code_parrain: Option<String>,
    pub nom: String,
    pub prenom: String,
    pub surnom: Option<String>,
    pub sexe: String,
    pub lieu_de_naissance: String,
    pub date_de_naissance: String,
    pub nom_pere: Option<String>,
    pub nom_mere: Option<String>,
    pub situation_matrimoniale: Option<String>,
    pub nb_enfants: i64,
    pub nb_personnes_a_charge: i64,
    pub nin: String,
    pub nif: Option<String>,
    pub telephone_principal: String,
    pub telephone_etranger: Option<String>,
    pub email: Option<String>,
    pub adresse_complete: String,
    pub profession: Option<String>,
    pub occupation: Option<String>,
    pub departement: String,
    pub commune: String,
    pub section_communale: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub a_ete_membre_politique: i64,
    pub nom_parti_precedent: Option<String>,
    pub role_politique_precedent: Option<String>,
    pub a_ete_membre_organisation: i64,
    pub nom_organisation_precedente: Option<String>,
    pub role_organisation_precedent: Option<String>,
    pub referent_nom: Option<String>,
    pub referent_prenom: Option<String>,
    pub referent_adresse: Option<String>,
    pub referent_telephone: Option<String>,
    pub relation_avec_referent: Option<String>,
    pub a_ete_condamne: i64,
    pub a_viole_loi_drogue: i64,
    pub a_participe_activite_terroriste: i64,
    pub password_hash: String,
    pub role_utilisateur: String,
    pub statut: String,
}

impl NewMembre {
    /// Build the record from a validated row and its minted identifiers
    pub fn from_row(
        row: &ImportRow,
        code_adhesion: String,
        username: String,
        password_hash: String,
    ) -> Result<Self> {
        Ok(Self {
            username,
            code_adhesion,
            code_parrain: row.opt("code_parrain"),
            nom: row.get("nom").to_string(),
            prenom: row.get("prenom").to_string(),
            surnom: row.opt("surnom"),
            sexe: row.get("sexe").to_string(),
            lieu_de_naissance: row.get("lieu_de_naissance").to_string(),
            date_de_naissance: row.get("date_de_naissance").to_string(),
            nom_pere: row.opt("nom_pere"),
            nom_mere: row.opt("nom_mere"),
            situation_matrimoniale: row.opt("situation_matrimoniale"),
            nb_enfants: counter(row, "nb_enfants")?,
            nb_personnes_a_charge: counter(row, "nb_personnes_a_charge")?,
            nin: row.get("nin").to_string(),
            nif: row.opt("nif"),
            telephone_principal: row.get("telephone_principal").to_string(),
            telephone_etranger: row.opt("telephone_etranger"),
            email: row.opt("email"),
            adresse_complete: row.get("adresse_complete").to_string(),
            profession: row.opt("profession"),
            occupation: row.opt("occupation"),
            departement: row.get("departement").to_string(),
            commune: row.get("commune").to_string(),
            section_communale: row.opt("section_communale"),
            facebook: row.opt("facebook"),
            instagram: row.opt("instagram"),
            a_ete_membre_politique: flag(row, "a_ete_membre_politique"),
            nom_parti_precedent: row.opt("nom_parti_precedent"),
            role_politique_precedent: row.opt("role_politique_precedent"),
            a_ete_membre_organisation: flag(row, "a_ete_membre_organisation"),
            nom_organisation_precedente: row.opt("nom_organisation_precedente"),
            role_organisation_precedent: row.opt("role_organisation_precedent"),
            referent_nom: row.opt("referent_nom"),
            referent_prenom: row.opt("referent_prenom"),
            referent_adresse: row.opt("referent_adresse"),
            referent_telephone: row.opt("referent_telephone"),
            relation_avec_referent: row.opt("relation_avec_referent"),
            a_ete_condamne: flag(row, "a_ete_condamne"),
            a_viole_loi_drogue: flag(row, "a_violé_loi_drogue"),
            a_participe_activite_terroriste: flag(row, "a_participe_activite_terroriste"),
            password_hash,
            role_utilisateur: DEFAULT_ROLE.to_string(),
            statut: INITIAL_STATUS.to_string(),
        })
    }
}

/// CSV flag column: '1' means set, anything else (including blank) unset
fn flag(row: &ImportRow, field: &str) -> i64 {
    if row.get(field) == "1" {
        1
    } else {
        0
    }
}

/// CSV counter column: blank defaults to 0, otherwise parsed as integer
fn counter(row: &ImportRow, field: &str) -> Result<i64> {
    let value = row.get(field);
    if value.is_empty() {
        return Ok(0);
    }
    value.parse::<i64>().map_err(|_| {
        Error::InvalidInput(format!("Valeur numérique invalide pour {}: '{}'", field, value))
    })
}
