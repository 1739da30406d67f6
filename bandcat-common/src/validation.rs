//! Band creation request validation
//!
//! A creation request arrives as raw text. It either validates completely into
//! a [`NewBand`] or fails as a whole; no partially valid band is ever produced.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{Album, NewBand};
use crate::{Error, Genre, Result};

/// Album entry of a creation request
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumCreate {
    pub title: String,
    pub release_date: String,
}

/// Body of `POST /bands`
#[derive(Debug, Clone, Deserialize)]
pub struct BandCreate {
    pub name: String,
    /// Free-form genre text, normalized case-insensitively
    pub genre: String,
    #[serde(default)]
    pub albums: Vec<AlbumCreate>,
}

impl BandCreate {
    pub fn validate(self) -> Result<NewBand> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("band name must not be empty".to_string()));
        }

        let genre = Genre::normalize(&self.genre)?;

        let albums = self
            .albums
            .into_iter()
            .enumerate()
            .map(|(index, album)| album.validate(index))
            .collect::<Result<Vec<_>>>()?;

        Ok(NewBand {
            name: self.name,
            genre,
            albums,
        })
    }
}

impl AlbumCreate {
    fn validate(self, index: usize) -> Result<Album> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidAlbumData(format!(
                "album {}: title must not be empty",
                index
            )));
        }

        let release_date = parse_release_date(&self.release_date).ok_or_else(|| {
            Error::InvalidAlbumData(format!(
                "album {}: release_date '{}' is not a YYYY-MM-DD date",
                index, self.release_date
            ))
        })?;

        Ok(Album {
            title: self.title,
            release_date,
        })
    }
}

/// Parse a zero-padded `YYYY-MM-DD` calendar date.
///
/// chrono accepts unpadded fields (`2000-1-1`), so the parsed date must
/// format back to exactly the input text.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|date| date.format("%Y-%m-%d").to_string() == raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, genre: &str, albums: Vec<(&str, &str)>) -> BandCreate {
        BandCreate {
            name: name.to_string(),
            genre: genre.to_string(),
            albums: albums
                .into_iter()
                .map(|(title, date)| AlbumCreate {
                    title: title.to_string(),
                    release_date: date.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_valid_request_normalizes_genre() {
        let band = request("Test", "rock", vec![]).validate().unwrap();
        assert_eq!(band.name, "Test");
        assert_eq!(band.genre, Genre::Rock);
        assert!(band.albums.is_empty());
    }

    #[test]
    fn test_albums_are_parsed() {
        let band = request("Test", "METAL", vec![("Paranoid", "1970-09-18")])
            .validate()
            .unwrap();
        assert_eq!(band.albums.len(), 1);
        assert_eq!(band.albums[0].title, "Paranoid");
        assert_eq!(
            band.albums[0].release_date,
            NaiveDate::from_ymd_opt(1970, 9, 18).unwrap()
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = request("  ", "rock", vec![]).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_bad_genre_rejected() {
        let err = request("Test", "polka", vec![]).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidGenre(_)));
    }

    #[test]
    fn test_one_bad_album_fails_whole_request() {
        let err = request(
            "Test",
            "rock",
            vec![("Good", "2001-01-01"), ("Bad", "2001-02-30")],
        )
        .validate()
        .unwrap_err();
        match err {
            Error::InvalidAlbumData(msg) => assert!(msg.contains("album 1")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unpadded_release_date_rejected() {
        let err = request("Test", "rock", vec![("Y", "2000-1-1")])
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAlbumData(_)));
    }

    #[test]
    fn test_empty_album_title_rejected() {
        let err = request("Test", "rock", vec![("", "2001-01-01")])
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAlbumData(_)));
    }

    #[test]
    fn test_release_date_format() {
        assert!(parse_release_date("1997-07-21").is_some());
        assert!(parse_release_date("21/07/1997").is_none());
        assert!(parse_release_date("2000-1-1").is_none());
        assert!(parse_release_date("2000-01-1").is_none());
        assert!(parse_release_date(" 2000-01-01").is_none());
        assert!(parse_release_date("").is_none());
    }
}
