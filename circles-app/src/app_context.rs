use crate::application::CastVote;
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::StoreBackend;
use crate::Config;
use circles_errors::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub votes: Arc<CastVote<StoreBackend>>,
}

impl AppContext {
    pub fn new(backend: StoreBackend) -> Self {
        Self {
            votes: Arc::new(CastVote::new(backend)),
        }
    }

    pub fn new_in_memory() -> Self {
        Self::new(StoreBackend::Memory(MemoryStore::new()))
    }

    pub fn store(&self) -> &StoreBackend {
        self.votes.store()
    }

    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        match &config.database_url {
            #[cfg(feature = "db")]
            Some(url) => {
                use crate::infrastructure::db::{create_connection, run_migrations, PgStore};

                let db = create_connection(url, config.db_pool_size, config.db_timeout)
                    .await
                    .map_err(|e| AppError::Config(format!("database connection failed: {e}")))?;
                if config.run_migrations {
                    run_migrations(&db)
                        .await
                        .map_err(|e| AppError::Config(format!("migrations failed: {e}")))?;
                }
                tracing::info!("Using Postgres vote store");
                Ok(Self::new(StoreBackend::Postgres(PgStore::new(db))))
            }
            #[cfg(not(feature = "db"))]
            Some(_) => Err(AppError::Config(
                "DATABASE_URL is set but this build lacks the `db` feature".to_string(),
            )),
            None => {
                tracing::info!("Using in-memory vote store");
                Ok(Self::new_in_memory())
            }
        }
    }
}
