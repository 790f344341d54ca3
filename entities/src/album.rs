use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A row of the `albums` table. `artist_id` is not checked against `artists`.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize)]
pub struct Album {
    pub id: i64,
    pub artist_id: i64,
    pub title: String,
    pub release_year: i64,
}

impl<'r> FromRow<'r, SqliteRow> for Album {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Album {
            id: row.try_get("id")?,
            artist_id: row.try_get("artist_id")?,
            title: row.try_get("title")?,
            release_year: row.try_get("release_year")?,
        })
    }
}

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct NewAlbum {
    pub artist_id: i64,
    pub title: String,
    pub release_year: i64,
}
