use chrono::NaiveDateTime;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::{
    error::AppResult,
    models::{ImeiInfo, ImeiRecord, PromoCode},
};

/// Query layer over the promo code database. Single-statement operations run
/// against the pool; the allocation statements run on a caller-owned
/// transaction so the claim and the assignment commit together.
#[derive(Clone)]
pub struct PromoStore {
    db: SqlitePool,
}

impl PromoStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        Ok(self.db.begin().await?)
    }

    pub async fn insert_imei(&self, imei: i64) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO imeis (imei) VALUES (?)")
            .bind(imei)
            .execute(&self.db)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn insert_code(&self, code: &str) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO codes (code) VALUES (?)")
            .bind(code)
            .execute(&self.db)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Device info joined with its assigned code value, oldest row first
    /// among duplicates.
    pub async fn find_imei_info(&self, imei: i64) -> AppResult<Option<ImeiInfo>> {
        let info: Option<ImeiInfo> = sqlx::query_as(
            r#"
            SELECT i.id, i.imei, i.created, c.code, i.code_use_time, i.send_to
            FROM imeis i
            LEFT JOIN codes c ON i.code_id = c.id
            WHERE i.imei = ?
            ORDER BY i.id
            LIMIT 1
            "#,
        )
        .bind(imei)
        .fetch_optional(&self.db)
        .await?;

        Ok(info)
    }

    pub async fn count_unused_codes(&self) -> AppResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT count(*) FROM codes WHERE is_used = 0")
                .fetch_one(&self.db)
                .await?;

        Ok(count)
    }

    /// Oldest device row matching `imei` that has no code assigned yet.
    pub async fn find_imei_without_code(
        conn: &mut SqliteConnection,
        imei: i64,
    ) -> AppResult<Option<ImeiRecord>> {
        let record: Option<ImeiRecord> = sqlx::query_as(
            r#"
            SELECT id, imei, created, code_id, code_use_time, send_to
            FROM imeis
            WHERE imei = ? AND code_id IS NULL
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(imei)
        .fetch_optional(conn)
        .await?;

        Ok(record)
    }

    /// Atomically marks the first unused code as used and returns it. The
    /// conditional update guards against a concurrent claim of the same row,
    /// so a code can never be handed out twice.
    pub async fn claim_unused_code(
        conn: &mut SqliteConnection,
    ) -> AppResult<Option<PromoCode>> {
        let code: Option<PromoCode> = sqlx::query_as(
            r#"
            UPDATE codes SET is_used = 1
            WHERE id = (SELECT id FROM codes WHERE is_used = 0 ORDER BY id LIMIT 1)
              AND is_used = 0
            RETURNING id, code, is_used
            "#,
        )
        .fetch_optional(conn)
        .await?;

        Ok(code)
    }

    /// Sets all three assignment fields of one device row in a single write.
    pub async fn assign_code(
        conn: &mut SqliteConnection,
        imei_id: i64,
        code_id: i64,
        used_at: NaiveDateTime,
        email: &str,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE imeis SET code_id = ?, code_use_time = ?, send_to = ? WHERE id = ?",
        )
        .bind(code_id)
        .bind(used_at)
        .bind(email)
        .bind(imei_id)
        .execute(conn)
        .await?;

        Ok(())
    }
}
