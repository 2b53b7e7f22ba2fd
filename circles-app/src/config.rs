use circles_errors::AppError;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Without a database URL votes live in process memory.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub run_migrations: bool,
    pub db_pool_size: u32,
    pub db_timeout: Duration,
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("BIND_ADDR: {e}")))?;

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None => true,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => {
                return Err(AppError::Config(format!("RUN_MIGRATIONS: unexpected value {other}")))
            }
        };

        let db_pool_size = match lookup("DB_POOL_SIZE") {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(AppError::Config(format!(
                        "DB_POOL_SIZE: expected a positive integer, got {raw}"
                    )))
                }
            },
        };

        let db_timeout = lookup("DB_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("DB_TIMEOUT_SECS: {e}")))
            })
            .transpose()?
            .map_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS), Duration::from_secs);

        Ok(Self {
            database_url,
            bind_addr,
            run_migrations,
            db_pool_size,
            db_timeout,
        })
    }
}
