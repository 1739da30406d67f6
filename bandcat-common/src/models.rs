//! Catalog domain model
//!
//! A band owns zero or more albums. Albums have no identity of their own and
//! only ever exist as part of their band.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Genre;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub title: String,
    /// Serialized as `YYYY-MM-DD`
    pub release_date: NaiveDate,
}

/// Band as stored in the catalog, with its store-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub id: i64,
    pub name: String,
    pub genre: Genre,
    #[serde(default)]
    pub albums: Vec<Album>,
}

impl Band {
    pub fn has_albums(&self) -> bool {
        !self.albums.is_empty()
    }
}

/// Validated band awaiting an id from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBand {
    pub name: String,
    pub genre: Genre,
    pub albums: Vec<Album>,
}

impl NewBand {
    /// Attach the id assigned by the store
    pub fn with_id(self, id: i64) -> Band {
        Band {
            id,
            name: self.name,
            genre: self.genre,
            albums: self.albums,
        }
    }
}

/// The four bands the ephemeral store starts with
pub fn seed_bands() -> Vec<NewBand> {
    vec![
        NewBand {
            name: "The Kinks".to_string(),
            genre: Genre::Rock,
            albums: Vec::new(),
        },
        NewBand {
            name: "Aphex Twin".to_string(),
            genre: Genre::Electronic,
            albums: Vec::new(),
        },
        NewBand {
            name: "Black Sabbath".to_string(),
            genre: Genre::Metal,
            albums: vec![Album {
                title: "Master of Reality".to_string(),
                release_date: NaiveDate::from_ymd_opt(1997, 7, 21)
                    .unwrap_or_default(),
            }],
        },
        NewBand {
            name: "Wu-Tang Clan".to_string(),
            genre: Genre::HipHop,
            albums: Vec::new(),
        },
    ]
}
