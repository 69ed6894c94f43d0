use serde::Deserialize;

use std::path::PathBuf;

use crate::data::SharedStore;
use crate::internal_error::InternalResult;
use crate::todo::store::{MemoryStore, SqliteStore};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl Default for StorageBackend {
    fn default() -> StorageBackend {
        StorageBackend::Sqlite
    }
}

/// Application keys read from `Rocket.toml` and `ROCKET_*` variables.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default)]
    pub storage: StorageBackend,
}

fn default_database() -> PathBuf {
    PathBuf::from("todos.db")
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            database: default_database(),
            storage: StorageBackend::default(),
        }
    }
}

impl AppConfig {
    pub fn open_store(&self) -> InternalResult<SharedStore> {
        Ok(match self.storage {
            StorageBackend::Sqlite => Box::new(SqliteStore::open(&self.database)?),
            StorageBackend::Memory => Box::new(MemoryStore::new()),
        })
    }
}
