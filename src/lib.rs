use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod mail;
pub mod models;
pub mod services;
pub mod storage;

use config::Config;
use mail::Mailer;
use storage::store::PromoStore;

#[derive(Clone)]
pub struct AppState {
    pub store: PromoStore,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<Config>,
}
