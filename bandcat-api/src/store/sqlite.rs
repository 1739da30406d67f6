//! SQLite band store
//!
//! Bands and albums live in two tables joined by `albums.band_id`. Every call
//! runs on its own unit of work (a pooled connection, or a transaction for
//! writes) that is released when the call returns, whether it succeeded or not.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use bandcat_common::config::StoreKind;
use bandcat_common::db::init::init_database;
use bandcat_common::models::{seed_bands, Album};
use bandcat_common::validation::parse_release_date;
use bandcat_common::{Band, Error, Genre, NewBand, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::BandStore;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (and create if needed) the database file at `db_path`
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = init_database(db_path).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert the example bands if the catalog has no bands yet.
    /// All of them land in one transaction, so a failed seed leaves the
    /// catalog empty and is retried on the next start.
    pub async fn seed_if_empty(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bands")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            return Ok(());
        }

        for band in seed_bands() {
            insert_rows(&mut tx, &band).await?;
        }

        tx.commit().await?;
        info!("Seeded empty database with example bands");
        Ok(())
    }
}

#[async_trait]
impl BandStore for SqliteStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }

    async fn list_all(&self) -> Result<Vec<Band>> {
        let mut conn = self.pool.acquire().await?;

        let band_rows = sqlx::query("SELECT id, name, genre FROM bands ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

        let album_rows = sqlx::query(
            "SELECT band_id, title, release_date FROM albums ORDER BY band_id, id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut albums_by_band: HashMap<i64, Vec<Album>> = HashMap::new();
        for row in &album_rows {
            let band_id: i64 = row.try_get("band_id")?;
            albums_by_band
                .entry(band_id)
                .or_default()
                .push(album_from_row(row)?);
        }

        band_rows
            .iter()
            .map(|row| {
                let id: i64 = row.try_get("id")?;
                let albums = albums_by_band.remove(&id).unwrap_or_default();
                band_from_row(row, albums)
            })
            .collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Band>> {
        let mut conn = self.pool.acquire().await?;
        load_band(&mut conn, id).await
    }

    async fn insert(&self, band: NewBand) -> Result<Band> {
        // Dropping the transaction without commit rolls back every row
        let mut tx = self.pool.begin().await?;
        let band_id = insert_rows(&mut tx, &band).await?;
        tx.commit().await?;
        debug!(band_id, albums = band.albums.len(), "Committed band");

        // Reload so the caller sees exactly what was persisted
        let mut conn = self.pool.acquire().await?;
        load_band(&mut conn, band_id).await?.ok_or_else(|| {
            Error::Internal(format!("band {} missing after commit", band_id))
        })
    }
}

/// Write the band row and then its album rows; returns the new band id
async fn insert_rows(conn: &mut SqliteConnection, band: &NewBand) -> Result<i64> {
    let band_id = sqlx::query("INSERT INTO bands (name, genre) VALUES (?, ?)")
        .bind(&band.name)
        .bind(band.genre.display_name())
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    for album in &band.albums {
        sqlx::query("INSERT INTO albums (title, release_date, band_id) VALUES (?, ?, ?)")
            .bind(&album.title)
            .bind(album.release_date.format("%Y-%m-%d").to_string())
            .bind(band_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(band_id)
}

async fn load_band(conn: &mut SqliteConnection, id: i64) -> Result<Option<Band>> {
    let Some(row) = sqlx::query("SELECT id, name, genre FROM bands WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
    else {
        return Ok(None);
    };

    let albums = sqlx::query(
        "SELECT title, release_date FROM albums WHERE band_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?
    .iter()
    .map(album_from_row)
    .collect::<Result<Vec<_>>>()?;

    band_from_row(&row, albums).map(Some)
}

fn band_from_row(row: &SqliteRow, albums: Vec<Album>) -> Result<Band> {
    let id: i64 = row.try_get("id")?;
    let genre: String = row.try_get("genre")?;
    let genre = Genre::normalize(&genre).map_err(|_| {
        Error::Internal(format!("band {} has unknown stored genre '{}'", id, genre))
    })?;

    Ok(Band {
        id,
        name: row.try_get("name")?,
        genre,
        albums,
    })
}

fn album_from_row(row: &SqliteRow) -> Result<Album> {
    let raw_date: String = row.try_get("release_date")?;
    let release_date = parse_release_date(&raw_date).ok_or_else(|| {
        Error::Internal(format!("album has unparsable stored date '{}'", raw_date))
    })?;

    Ok(Album {
        title: row.try_get("title")?,
        release_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    async fn open_temp() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(&dir.path().join("bandcat.db")).await.unwrap();
        (dir, store)
    }

    fn band_with_albums(name: &str, albums: &[(&str, (i32, u32, u32))]) -> NewBand {
        NewBand {
            name: name.to_string(),
            genre: Genre::Metal,
            albums: albums
                .iter()
                .map(|(title, (y, m, d))| Album {
                    title: title.to_string(),
                    release_date: NaiveDate::from_ymd_opt(*y, *m, *d).unwrap(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_refetch_albums() {
        let (_dir, store) = open_temp().await;
        let new = band_with_albums(
            "Black Sabbath",
            &[("Paranoid", (1970, 9, 18)), ("Master of Reality", (1971, 7, 21))],
        );

        let created = store.insert(new.clone()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.albums, new.albums);

        let fetched = store.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_band() {
        let (_dir, store) = open_temp().await;
        assert!(store.get_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_never_reused() {
        let (_dir, store) = open_temp().await;
        let first = store.insert(band_with_albums("A", &[])).await.unwrap();

        sqlx::query("DELETE FROM bands WHERE id = ?")
            .bind(first.id)
            .execute(store.pool())
            .await
            .unwrap();

        let second = store.insert(band_with_albums("B", &[])).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let (_dir, store) = open_temp().await;
        store.seed_if_empty().await.unwrap();
        store.seed_if_empty().await.unwrap();

        let bands = store.list_all().await.unwrap();
        let ids: Vec<i64> = bands.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(bands[2].name, "Black Sabbath");
        assert_eq!(bands[2].albums.len(), 1);
        assert!(bands[0].albums.is_empty());
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_nothing_behind() {
        let (_dir, store) = open_temp().await;

        // Without the albums table the album insert fails after the band row is written
        sqlx::query("DROP TABLE albums")
            .execute(store.pool())
            .await
            .unwrap();

        let result = store
            .insert(band_with_albums("Doomed", &[("Never", (2000, 1, 1))]))
            .await;
        assert!(result.is_err());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bands")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 0, "band row must roll back with its albums");
    }

    #[tokio::test]
    async fn test_failed_seed_is_rolled_back_and_retried() {
        let (_dir, store) = open_temp().await;

        // Black Sabbath (third seed band) has an album, so seeding fails there
        sqlx::query("DROP TABLE albums")
            .execute(store.pool())
            .await
            .unwrap();
        assert!(store.seed_if_empty().await.is_err());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bands")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 0, "no seed band may survive a failed seed");

        // Next start with a healthy schema seeds all four
        bandcat_common::db::init::create_schema(store.pool())
            .await
            .unwrap();
        store.seed_if_empty().await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_corrupt_genre_is_internal_error() {
        let (_dir, store) = open_temp().await;
        sqlx::query("INSERT INTO bands (name, genre) VALUES ('Odd', 'Polka')")
            .execute(store.pool())
            .await
            .unwrap();

        let err = store.get_by_id(1).await.unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }
}
