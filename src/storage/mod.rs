pub mod memory;
pub mod postgres;

pub use memory::{MemoryDeveloperStore, MemoryGameStore};
pub use postgres::{PgDeveloperStore, PgGameStore};

use crate::domain::store::{DeveloperStore, GameStore};
use crate::infra::config::{AppConfig, StorageBackend};
use std::sync::Arc;

/// Both stores, sharing one storage handle.
pub struct Stores {
    pub developers: Arc<dyn DeveloperStore>,
    pub games: Arc<dyn GameStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            developers: Arc::new(MemoryDeveloperStore::new()),
            games: Arc::new(MemoryGameStore::new()),
        }
    }

    /// Opens the stores selected by the configuration. For PostgreSQL this
    /// connects the pool and creates the tables if they are missing.
    pub async fn open(config: &AppConfig) -> anyhow::Result<Self> {
        match config.storage {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::Postgres => {
                let database_url = config.database_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL must be set when STORAGE_BACKEND=postgres")
                })?;
                let pool = postgres::connect(database_url, config.db_max_connections).await?;
                postgres::ensure_schema(&pool).await?;
                Ok(Self {
                    developers: Arc::new(PgDeveloperStore::new(pool.clone())),
                    games: Arc::new(PgGameStore::new(pool)),
                })
            }
        }
    }
}
