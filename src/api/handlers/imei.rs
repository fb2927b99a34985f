use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::{
    api::validators,
    error::{AppError, AppResult},
    models::ImeiInfo,
    AppState,
};

#[derive(Debug, Serialize)]
pub struct InspectResponse {
    pub status: bool,
    pub data: ImeiInfo,
}

/// Returns the device row joined with its assigned code, secret-gated.
pub async fn inspect(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<InspectResponse>> {
    let imei_field = validators::require(&body, "imei")?;
    let secret = validators::require(&body, "secret")?;

    let imei = validators::non_negative_int(imei_field, "Incorrect imei")?;

    if secret.as_str() != Some(state.config.secret.as_str()) {
        return Err(AppError::Unauthorized);
    }

    let info = state
        .store
        .find_imei_info(imei)
        .await?
        .ok_or(AppError::ImeiNotFound)?;

    Ok(Json(InspectResponse {
        status: true,
        data: info,
    }))
}
