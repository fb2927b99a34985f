use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub mail: MailConfig,
    /// Shared secret gating the insert and inspect endpoints.
    pub secret: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS when set; STARTTLS otherwise.
    pub secure: bool,
    pub user: String,
    pub password: String,
}

impl Config {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                path: env::var("DATABASE_PATH")
                    .unwrap_or_else(|_| "db/promo_codes.db".to_string()),
                max_connections: env::var("DB_MAX_CONNS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5),
            },
            mail: MailConfig {
                host: env::var("EMAIL_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("EMAIL_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(465),
                secure: env::var("EMAIL_SECURE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(true),
                user: env::var("EMAIL_USER").unwrap_or_default(),
                password: env::var("EMAIL_PASSWORD").unwrap_or_default(),
            },
            secret: env::var("TOKEN_SECRET").unwrap_or_default(),
        }
    }
}
