use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A row of the `artists` table. Field order is the JSON key order.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub genre: String,
}

impl<'r> FromRow<'r, SqliteRow> for Artist {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Artist {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            genre: row.try_get("genre")?,
        })
    }
}

/// An artist that has not been stored yet; the store assigns the id.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct NewArtist {
    pub name: String,
    pub genre: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_columns_in_order() {
        let artist = Artist {
            id: 1,
            name: "Sótano Épico".to_string(),
            genre: "Metal".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&artist).unwrap(),
            r#"{"id":1,"name":"Sótano Épico","genre":"Metal"}"#
        );
    }
}
