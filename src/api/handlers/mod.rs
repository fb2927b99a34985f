pub mod codes;
pub mod feedback;
pub mod imei;
pub mod insert;

use serde::Serialize;

/// Response envelope shared by every endpoint that reports a message.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: bool,
    pub message: String,
}
