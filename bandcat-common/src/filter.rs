//! Band list filtering
//!
//! Filters are independent and combine with logical AND. An empty filter
//! returns the collection unchanged, in the order it was given.

use crate::models::Band;
use crate::{Error, Genre, Result};

/// Longest accepted name substring, in characters
pub const MAX_NAME_QUERY_LEN: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandFilter {
    pub genre: Option<Genre>,
    /// Only narrows: `false` means no album filtering at all
    pub has_albums: bool,
    /// Stored lowercased
    name_contains: Option<String>,
}

impl BandFilter {
    /// Build a filter from raw request values.
    ///
    /// `genre` must be a URL token. A name substring longer than
    /// [`MAX_NAME_QUERY_LEN`] is rejected, never truncated. An empty
    /// substring applies no name filtering.
    pub fn from_params(
        genre: Option<&str>,
        has_albums: bool,
        name_contains: Option<&str>,
    ) -> Result<Self> {
        let genre = genre.map(Genre::from_token).transpose()?;

        let name_contains = match name_contains {
            Some(q) if q.chars().count() > MAX_NAME_QUERY_LEN => {
                return Err(Error::InvalidInput(format!(
                    "q must be at most {} characters",
                    MAX_NAME_QUERY_LEN
                )));
            }
            Some(q) if !q.is_empty() => Some(q.to_lowercase()),
            _ => None,
        };

        Ok(Self {
            genre,
            has_albums,
            name_contains,
        })
    }

    pub fn by_genre(genre: Genre) -> Self {
        Self {
            genre: Some(genre),
            ..Self::default()
        }
    }

    pub fn name_contains(&self) -> Option<&str> {
        self.name_contains.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && !self.has_albums && self.name_contains.is_none()
    }

    pub fn matches(&self, band: &Band) -> bool {
        if let Some(genre) = self.genre {
            if !band
                .genre
                .display_name()
                .eq_ignore_ascii_case(genre.display_name())
            {
                return false;
            }
        }

        if self.has_albums && !band.has_albums() {
            return false;
        }

        if let Some(needle) = &self.name_contains {
            if !band.name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Keep the bands accepted by `filter`, preserving their order
pub fn list_bands(all: Vec<Band>, filter: &BandFilter) -> Vec<Band> {
    if filter.is_empty() {
        return all;
    }
    all.into_iter().filter(|band| filter.matches(band)).collect()
}
