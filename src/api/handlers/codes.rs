use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::{
    api::validators,
    error::AppResult,
    services::allocator::CodeAllocator,
    AppState,
};

use super::StatusMessage;

/// Allocates one unused promo code to the requesting imei and emails it.
pub async fn receive_code(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<StatusMessage>> {
    let imei_field = validators::require(&body, "imei")?;
    let email_field = validators::require(&body, "email")?;

    let imei = validators::non_negative_int(imei_field, "Incorrect imei")?;
    let email = validators::email(email_field, "Incorrect email")?;

    let allocator = CodeAllocator::new(state.store.clone(), state.mailer.clone());
    allocator.allocate(imei, &email).await?;

    Ok(Json(StatusMessage {
        status: true,
        message: "Code sent to email".to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub status: bool,
    pub count: i64,
}

pub async fn available_count(
    State(state): State<AppState>,
) -> AppResult<Json<CountResponse>> {
    let count = state.store.count_unused_codes().await?;

    Ok(Json(CountResponse {
        status: true,
        count,
    }))
}
