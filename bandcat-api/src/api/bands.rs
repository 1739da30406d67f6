//! Band catalog endpoints
//!
//! - `GET /bands` with optional `genre`, `has_albums` and `q` filters
//! - `GET /bands/:band_id`
//! - `GET /bands/genre/:genre`
//! - `POST /bands`

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use bandcat_common::validation::BandCreate;
use bandcat_common::{list_bands as filter_bands, Band, BandFilter, Genre};
use serde::{de, Deserialize, Deserializer};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::store::get_band as find_band;
use crate::AppState;

/// Query parameters for `GET /bands`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Genre URL token (`rock`, `electronic`, `metal`, `hip-hop`)
    pub genre: Option<String>,

    /// Keep only bands with at least one album
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_albums: bool,

    /// Case-insensitive band name substring
    pub q: Option<String>,
}

/// Accepts the usual spellings of a boolean query flag
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Ok(false),
        _ => Err(de::Error::custom(format!("invalid boolean value '{}'", raw))),
    }
}

/// GET /bands
pub async fn list_bands(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Band>>, ApiError> {
    let Query(query) = query?;
    let filter = BandFilter::from_params(
        query.genre.as_deref(),
        query.has_albums,
        query.q.as_deref(),
    )?;

    let bands = filter_bands(state.store.list_all().await?, &filter);
    debug!(
        count = bands.len(),
        genre = ?filter.genre,
        has_albums = filter.has_albums,
        q = ?filter.name_contains(),
        "Listed bands"
    );
    Ok(Json(bands))
}

/// GET /bands/:band_id
pub async fn get_band(
    State(state): State<AppState>,
    band_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Band>, ApiError> {
    let Path(band_id) = band_id?;
    let band = find_band(state.store.as_ref(), band_id).await?;
    Ok(Json(band))
}

/// GET /bands/genre/:genre
pub async fn bands_for_genre(
    State(state): State<AppState>,
    genre: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Band>>, ApiError> {
    let Path(genre) = genre?;
    let filter = BandFilter::by_genre(Genre::from_token(&genre)?);

    let bands = filter_bands(state.store.list_all().await?, &filter);
    Ok(Json(bands))
}

/// POST /bands
///
/// The whole request is validated before the store is touched, so a bad
/// album never leaves a partially created band behind.
pub async fn create_band(
    State(state): State<AppState>,
    body: Result<Json<BandCreate>, JsonRejection>,
) -> Result<Json<Band>, ApiError> {
    let Json(request) = body?;
    let new_band = request.validate()?;

    let band = state.store.insert(new_band).await?;
    info!(
        id = band.id,
        name = %band.name,
        genre = %band.genre,
        albums = band.albums.len(),
        "Created band"
    );
    Ok(Json(band))
}
