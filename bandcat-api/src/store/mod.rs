//! Band persistence
//!
//! Two interchangeable backends implement [`BandStore`]; which one serves a
//! process is decided by configuration at startup, never by the handlers.

use std::sync::Arc;

use async_trait::async_trait;
use bandcat_common::config::{ServiceConfig, StoreKind};
use bandcat_common::{Band, Error, NewBand, Result};
use tracing::info;

use crate::error::BAND_NOT_FOUND;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait BandStore: Send + Sync {
    /// Which backend this is
    fn kind(&self) -> StoreKind;

    /// All bands in the store's natural order
    async fn list_all(&self) -> Result<Vec<Band>>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Band>>;

    /// Persist a band with its albums and return it with the assigned id.
    /// Either the band and all of its albums are stored, or nothing is.
    async fn insert(&self, band: NewBand) -> Result<Band>;
}

/// Look up a single band; a missing id is [`Error::NotFound`]
pub async fn get_band(store: &dyn BandStore, id: i64) -> Result<Band> {
    store
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(BAND_NOT_FOUND.to_string()))
}

/// Open the backend selected by `config`
pub async fn open_store(config: &ServiceConfig) -> Result<Arc<dyn BandStore>> {
    match config.store {
        StoreKind::Memory => {
            let store = if config.seed {
                MemoryStore::seeded()
            } else {
                MemoryStore::new()
            };
            info!("Using in-memory band store (not persisted)");
            Ok(Arc::new(store))
        }
        StoreKind::Sqlite => {
            let store = SqliteStore::open(&config.database_path).await?;
            if config.seed {
                store.seed_if_empty().await?;
            }
            info!("Using SQLite band store at {}", config.database_path.display());
            Ok(Arc::new(store))
        }
    }
}
