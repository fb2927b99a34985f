use axum::{extract::State, Json};
use serde_json::Value;

use crate::{
    api::validators,
    error::{AppError, AppResult},
    AppState,
};

use super::StatusMessage;

/// Relays a user-submitted message to the operator mailbox.
pub async fn feedback(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<StatusMessage>> {
    let email_field = validators::require(&body, "email")?;
    let message_field = validators::require(&body, "message")?;

    let message = message_field
        .as_str()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Fields must not be empty".to_string()))?;
    let email = validators::email(email_field, "Incorrect email")?;

    state.mailer.send_feedback(&email, message).await?;

    Ok(Json(StatusMessage {
        status: true,
        message: "Feedback received".to_string(),
    }))
}
