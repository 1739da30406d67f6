//! Genre vocabulary
//!
//! The catalog recognizes a closed set of genres. Each genre has two textual
//! encodings:
//! - URL token: lowercase and hyphenated, used in paths and query strings (`hip-hop`)
//! - Display form: title-cased, used in stored records and responses (`Hip-Hop`)
//!
//! Both encodings are kept in a single mapping table so they cannot drift apart.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Musical genre of a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Rock,
    Electronic,
    Metal,
    HipHop,
}

/// (genre, URL token, display form)
static GENRE_TABLE: [(Genre, &str, &str); 4] = [
    (Genre::Rock, "rock", "Rock"),
    (Genre::Electronic, "electronic", "Electronic"),
    (Genre::Metal, "metal", "Metal"),
    (Genre::HipHop, "hip-hop", "Hip-Hop"),
];

impl Genre {
    /// All genres in vocabulary order
    pub const ALL: [Genre; 4] = [Genre::Rock, Genre::Electronic, Genre::Metal, Genre::HipHop];

    fn entry(self) -> &'static (Genre, &'static str, &'static str) {
        match self {
            Genre::Rock => &GENRE_TABLE[0],
            Genre::Electronic => &GENRE_TABLE[1],
            Genre::Metal => &GENRE_TABLE[2],
            Genre::HipHop => &GENRE_TABLE[3],
        }
    }

    /// Lowercase hyphenated token for URL path and query segments
    pub fn url_token(self) -> &'static str {
        self.entry().1
    }

    /// Title-cased display form used in records and responses
    pub fn display_name(self) -> &'static str {
        self.entry().2
    }

    /// Parse a URL token. Matching is exact: `Rock` is not a token.
    pub fn from_token(token: &str) -> Result<Genre> {
        GENRE_TABLE
            .iter()
            .find(|(_, t, _)| *t == token)
            .map(|(g, _, _)| *g)
            .ok_or_else(|| Error::InvalidGenre(token.to_string()))
    }

    /// Normalize free-form genre text (any case) into a genre.
    ///
    /// The input is title-cased word by word, with hyphens acting as word
    /// separators, and the result must equal a display form exactly.
    pub fn normalize(raw: &str) -> Result<Genre> {
        let titled = title_case(raw);
        GENRE_TABLE
            .iter()
            .find(|(_, _, display)| *display == titled)
            .map(|(g, _, _)| *g)
            .ok_or_else(|| Error::InvalidGenre(raw.to_string()))
    }
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Genre {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for Genre {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Genre::normalize(&raw).map_err(serde::de::Error::custom)
    }
}
