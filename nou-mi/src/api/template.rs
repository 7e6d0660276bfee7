//! CSV template download
//!
//! Serves the import template: BOM-prefixed for spreadsheet
//! compatibility, full header list plus one example row.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// CSV column contract, in template order
pub const TEMPLATE_COLUMNS: [&str; 39] = [
    "nom",
    "prenom",
    "surnom",
    "sexe",
    "date_de_naissance",
    "lieu_de_naissance",
    "nom_pere",
    "nom_mere",
    "situation_matrimoniale",
    "nb_enfants",
    "nb_personnes_a_charge",
    "nin",
    "nif",
    "telephone_principal",
    "telephone_etranger",
    "email",
    "adresse_complete",
    "profession",
    "occupation",
    "departement",
    "commune",
    "section_communale",
    "facebook",
    "instagram",
    "a_ete_membre_politique",
    "nom_parti_precedent",
    "role_politique_precedent",
    "a_ete_membre_organisation",
    "nom_organisation_precedente",
    "role_organisation_precedent",
    "referent_nom",
    "referent_prenom",
    "referent_adresse",
    "referent_telephone",
    "relation_avec_referent",
    "a_ete_condamne",
    "a_violé_loi_drogue",
    "a_participe_activite_terroriste",
    "code_parrain",
];

/// Example row guiding the operator, aligned with TEMPLATE_COLUMNS
const EXAMPLE_ROW: [&str; 39] = [
    "Dupont",
    "Jean",
    "JD",
    "Homme",
    "1990-01-15",
    "Port-au-Prince",
    "Pierre Dupont",
    "Marie Dupont",
    "Célibataire",
    "0",
    "2",
    "123-456-7890",
    "987-654-3210",
    "50912345678",
    "+33612345678",
    "jean.dupont@example.com",
    "123 Rue Example, Port-au-Prince",
    "Ingénieur",
    "Développeur",
    "Ouest",
    "Port-au-Prince",
    "Section 1",
    "jean.dupont",
    "@jeandupont",
    "0",
    "",
    "",
    "0",
    "",
    "",
    "Paul Martin",
    "Sophie Martin",
    "456 Rue Référent",
    "50987654321",
    "Ami",
    "0",
    "0",
    "0",
    "AJD5678",
];

/// GET /api/membres/template
pub async fn download_template() -> Response {
    let mut csv = String::from("\u{feff}");
    csv.push_str(&TEMPLATE_COLUMNS.join(","));
    csv.push('\n');
    // The example address contains a comma; quote it per the CSV grammar
    let example = EXAMPLE_ROW
        .iter()
        .map(|field| {
            if field.contains(',') {
                format!("\"{}\"", field)
            } else {
                field.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(&example);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"template_import_membres.csv\"",
            ),
        ],
        csv,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_and_example_stay_aligned() {
        assert_eq!(TEMPLATE_COLUMNS.len(), EXAMPLE_ROW.len());
    }

    #[test]
    fn test_example_parses_against_columns() {
        // The example row must survive the import parser unchanged
        let mut csv = TEMPLATE_COLUMNS.join(",");
        csv.push('\n');
        csv.push_str(
            &EXAMPLE_ROW
                .iter()
                .map(|f| {
                    if f.contains(',') {
                        format!("\"{}\"", f)
                    } else {
                        f.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
        );

        let rows = crate::import::parser::parse_rows(&csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("nom"), "Dupont");
        assert_eq!(rows[0].get("adresse_complete"), "123 Rue Example, Port-au-Prince");
        assert_eq!(rows[0].get("code_parrain"), "AJD5678");
    }
}
