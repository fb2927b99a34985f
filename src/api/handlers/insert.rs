use axum::{extract::State, Json};
use serde_json::Value;

use crate::{
    api::validators,
    error::{AppError, AppResult},
    AppState,
};

use super::StatusMessage;

/// Bulk-registers imeis and promo codes. Gated by the shared secret; every
/// element is validated before the first row is written.
pub async fn insert(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<StatusMessage>> {
    let imei_field = validators::require(&body, "imei")?;
    let code_field = validators::require(&body, "code")?;
    let secret = validators::require(&body, "secret")?;

    let imei_values = imei_field
        .as_array()
        .ok_or_else(|| AppError::Validation("Data type in field must be array".to_string()))?;
    let code_values = code_field
        .as_array()
        .ok_or_else(|| AppError::Validation("Data type in field must be array".to_string()))?;

    if secret.as_str() != Some(state.config.secret.as_str()) {
        return Err(AppError::Unauthorized);
    }

    let imeis = imei_values
        .iter()
        .map(|v| {
            validators::non_negative_int(v, "Incorrect data types or values in arrays")
        })
        .collect::<AppResult<Vec<_>>>()?;
    let codes = code_values
        .iter()
        .map(|v| validators::code_value(v, "Incorrect data types or values in arrays"))
        .collect::<AppResult<Vec<_>>>()?;

    for imei in &imeis {
        state.store.insert_imei(*imei).await?;
    }
    tracing::info!("Inserted {} imeis in DB", imeis.len());

    for code in &codes {
        state.store.insert_code(code).await?;
    }
    tracing::info!("Inserted {} codes in DB", codes.len());

    Ok(Json(StatusMessage {
        status: true,
        message: format!("Inserted {} imei, {} code", imeis.len(), codes.len()),
    }))
}
