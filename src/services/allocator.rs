use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    mail::Mailer,
    storage::store::PromoStore,
};

/// Pairs an unclaimed promo code with a requesting device and records the
/// pairing durably. The whole sequence runs in one transaction that commits
/// only after the notification mail went out, so a failed delivery never
/// consumes a code.
pub struct CodeAllocator {
    store: PromoStore,
    mailer: Arc<dyn Mailer>,
}

impl CodeAllocator {
    pub fn new(store: PromoStore, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    pub async fn allocate(&self, imei: i64, email: &str) -> AppResult<String> {
        let mut tx = self.store.begin().await?;

        let device = PromoStore::find_imei_without_code(&mut *tx, imei)
            .await?
            .ok_or(AppError::ImeiNotFound)?;

        let code = PromoStore::claim_unused_code(&mut *tx)
            .await?
            .ok_or(AppError::CodesExhausted)?;

        PromoStore::assign_code(&mut *tx, device.id, code.id, Utc::now().naive_utc(), email)
            .await?;

        // Delivery happens before commit; an error here drops the
        // transaction and rolls the claim back.
        self.mailer.send_code(email, &code.code).await?;

        tx.commit().await?;
        tracing::info!("Imei {} received promo code id {}", imei, code.id);

        Ok(code.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::{MockMailer, SentMail};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup() -> (PromoStore, Arc<MockMailer>, CodeAllocator) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory SQLite pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Migration failed");

        let store = PromoStore::new(pool);
        let mailer = Arc::new(MockMailer::new());
        let allocator = CodeAllocator::new(store.clone(), mailer.clone());

        (store, mailer, allocator)
    }

    #[tokio::test]
    async fn test_allocate_assigns_and_sends() {
        let (store, mailer, allocator) = setup().await;

        store.insert_imei(123456789012345).await.unwrap();
        store.insert_code("PROMO1").await.unwrap();

        let code = allocator.allocate(123456789012345, "a@b.com").await.unwrap();
        assert_eq!(code, "PROMO1");

        assert_eq!(store.count_unused_codes().await.unwrap(), 0);

        let info = store.find_imei_info(123456789012345).await.unwrap().unwrap();
        assert_eq!(info.code.as_deref(), Some("PROMO1"));
        assert_eq!(info.send_to.as_deref(), Some("a@b.com"));
        assert!(info.code_use_time.is_some());

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(
            sent.as_slice(),
            [SentMail::Code {
                to: "a@b.com".to_string(),
                code: "PROMO1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_allocate_unknown_imei() {
        let (store, mailer, allocator) = setup().await;

        store.insert_code("PROMO1").await.unwrap();

        let err = allocator.allocate(42, "a@b.com").await.unwrap_err();
        assert!(matches!(err, AppError::ImeiNotFound));

        // Nothing consumed, nothing sent.
        assert_eq!(store.count_unused_codes().await.unwrap(), 1);
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_allocate_twice_for_same_imei() {
        let (store, _mailer, allocator) = setup().await;

        store.insert_imei(42).await.unwrap();
        store.insert_code("PROMO1").await.unwrap();
        store.insert_code("PROMO2").await.unwrap();

        allocator.allocate(42, "a@b.com").await.unwrap();

        // The device already holds an assignment, so it is no longer a
        // candidate.
        let err = allocator.allocate(42, "a@b.com").await.unwrap_err();
        assert!(matches!(err, AppError::ImeiNotFound));
        assert_eq!(store.count_unused_codes().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_allocate_exhausted() {
        let (store, mailer, allocator) = setup().await;

        store.insert_imei(42).await.unwrap();

        let err = allocator.allocate(42, "a@b.com").await.unwrap_err();
        assert!(matches!(err, AppError::CodesExhausted));

        // The device stays unassigned.
        let info = store.find_imei_info(42).await.unwrap().unwrap();
        assert!(info.code.is_none());
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_delivery_failure_rolls_back_claim() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let store = PromoStore::new(pool);
        let mailer = Arc::new(MockMailer::failing());
        let allocator = CodeAllocator::new(store.clone(), mailer.clone());

        store.insert_imei(42).await.unwrap();
        store.insert_code("PROMO1").await.unwrap();

        assert!(allocator.allocate(42, "a@b.com").await.is_err());

        // The failed send rolled the transaction back: the code is still
        // unused and the device unassigned.
        assert_eq!(store.count_unused_codes().await.unwrap(), 1);
        let info = store.find_imei_info(42).await.unwrap().unwrap();
        assert!(info.code.is_none());
        assert!(info.code_use_time.is_none());
        assert!(info.send_to.is_none());
    }
}
