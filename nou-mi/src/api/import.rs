//! CSV import endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use nou_common::api::ApiResponse;

use crate::error::{ApiError, ApiResult};
use crate::import::{self, report};
use crate::models::ImportResult;
use crate::AppState;

/// POST /api/membres/import
///
/// Accepts a multipart form whose `file` field holds the CSV and
/// answers 200 with the aggregate result, even when every row was
/// skipped. Only request-level problems (no file, undecodable file,
/// empty CSV, store failure) abort with an error envelope.
pub async fn import_membres(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<ImportResult>>> {
    let mut content: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Requête multipart invalide: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Fichier illisible: {}", e)))?;
            let text = String::from_utf8(bytes.to_vec()).map_err(|_| {
                ApiError::BadRequest("Le fichier doit être encodé en UTF-8".to_string())
            })?;
            content = Some(text);
        }
    }

    let content =
        content.ok_or_else(|| ApiError::BadRequest("Aucun fichier fourni".to_string()))?;

    let result = import::run_import(&state.db, &content).await?;
    let message = report::summary(&result);

    info!(
        success = result.success,
        skipped = result.skipped,
        "Import CSV terminé"
    );

    Ok(Json(ApiResponse::ok(message, result)))
}
