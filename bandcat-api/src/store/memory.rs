//! In-process band store
//!
//! Bands live in an insertion-ordered list and vanish on restart. Ids come
//! from a counter owned by the store, so they keep increasing even if the
//! list were emptied.

use async_trait::async_trait;
use bandcat_common::config::StoreKind;
use bandcat_common::models::seed_bands;
use bandcat_common::{Band, NewBand, Result};
use tokio::sync::RwLock;
use tracing::debug;

use super::BandStore;

#[derive(Debug)]
struct Inner {
    bands: Vec<Band>,
    next_id: i64,
}

#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Empty store; the first band gets id 1
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                bands: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Store holding the four example bands with ids 1 to 4
    pub fn seeded() -> Self {
        let bands: Vec<Band> = seed_bands()
            .into_iter()
            .zip(1..)
            .map(|(band, id)| band.with_id(id))
            .collect();
        let next_id = bands.len() as i64 + 1;

        Self {
            inner: RwLock::new(Inner { bands, next_id }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BandStore for MemoryStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn list_all(&self) -> Result<Vec<Band>> {
        Ok(self.inner.read().await.bands.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Band>> {
        let inner = self.inner.read().await;
        Ok(inner.bands.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, band: NewBand) -> Result<Band> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let band = band.with_id(id);
        inner.bands.push(band.clone());
        debug!(id, "Stored band in memory");
        Ok(band)
    }
}
