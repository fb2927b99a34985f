use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A device registration row. The three assignment fields are either all
/// null or all set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImeiRecord {
    pub id: i64,
    pub imei: i64,
    pub created: NaiveDateTime,
    pub code_id: Option<i64>,
    pub code_use_time: Option<NaiveDateTime>,
    pub send_to: Option<String>,
}

/// Device row joined with its assigned code value, for inspection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImeiInfo {
    pub id: i64,
    pub imei: i64,
    pub created: NaiveDateTime,
    pub code: Option<String>,
    pub code_use_time: Option<NaiveDateTime>,
    pub send_to: Option<String>,
}
