use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use entities::album::{Album, NewAlbum};
use entities::artist::{Artist, NewArtist};
use log::info;

use crate::error::CatalogError;
use crate::responses::MessageResponse;
use crate::DatabaseState;

/// Decoded form body in wire order. A repeated key keeps its first value.
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    fn take(&mut self, field: &str) -> Option<String> {
        let index = self.0.iter().position(|(key, _)| key == field)?;
        Some(self.0.remove(index).1)
    }

    fn required(&mut self, field: &'static str) -> Result<String, CatalogError> {
        self.take(field).ok_or(CatalogError::MissingField(field))
    }

    fn required_integer(&mut self, field: &'static str) -> Result<i64, CatalogError> {
        let value = self.required(field)?;
        parse_integer(value.trim()).ok_or(CatalogError::InvalidField(field))
    }
}

impl TryFrom<Result<Form<Vec<(String, String)>>, FormRejection>> for FormFields {
    type Error = CatalogError;

    fn try_from(
        form: Result<Form<Vec<(String, String)>>, FormRejection>,
    ) -> Result<Self, Self::Error> {
        let Form(pairs) = form?;
        Ok(FormFields(pairs))
    }
}

// Integer-valued decimals such as "2023.0" count as integers, the way SQLite's
// INTEGER affinity stores them
fn parse_integer(value: &str) -> Option<i64> {
    if let Ok(integer) = value.parse::<i64>() {
        return Some(integer);
    }
    let real = value.parse::<f64>().ok()?;
    let in_range = real >= i64::MIN as f64 && real < i64::MAX as f64;
    (real.is_finite() && real.fract() == 0.0 && in_range).then_some(real as i64)
}

/// Path ids are plain decimal digits; signs and anything else name no record.
fn path_id(id: Result<Path<String>, PathRejection>) -> Result<i64, CatalogError> {
    let Path(id) = id.map_err(|_| CatalogError::NotFound)?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CatalogError::NotFound);
    }
    id.parse().map_err(|_| CatalogError::NotFound)
}

fn created(location: String, message: &'static str) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MessageResponse { message }),
    )
        .into_response()
}

pub async fn create_artist(
    State(state): State<DatabaseState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, CatalogError> {
    let mut form = FormFields::try_from(form)?;
    let artist = NewArtist {
        name: form.required("name")?,
        genre: form.required("genre")?,
    };
    let id = queries::add_artist(state.provider(), &artist).await?;
    info!("Added artist {} with id {}", artist.name, id);
    Ok(created(
        format!("/artist/{}", id),
        "Artist added successfully",
    ))
}

pub async fn get_artist(
    State(state): State<DatabaseState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Artist>, CatalogError> {
    let id = path_id(id)?;
    let artist = queries::get_artist_by_id(state.provider(), id)
        .await?
        .ok_or(CatalogError::NotFound)?;
    Ok(Json(artist))
}

pub async fn create_album(
    State(state): State<DatabaseState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, CatalogError> {
    let mut form = FormFields::try_from(form)?;
    let album = NewAlbum {
        artist_id: form.required_integer("artist_id")?,
        title: form.required("title")?,
        release_year: form.required_integer("release_year")?,
    };
    let id = queries::add_album(state.provider(), &album).await?;
    info!(
        "Added album {} ({}) for artist {} with id {}",
        album.title, album.release_year, album.artist_id, id
    );
    Ok(created(format!("/album/{}", id), "Album added successfully"))
}

pub async fn get_album(
    State(state): State<DatabaseState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Album>, CatalogError> {
    let id = path_id(id)?;
    let album = queries::get_album_by_id(state.provider(), id)
        .await?
        .ok_or(CatalogError::NotFound)?;
    Ok(Json(album))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn absent_field_is_reported_by_name() {
        assert!(matches!(
            fields(&[("name", "Sótano Épico")]).required("genre"),
            Err(CatalogError::MissingField("genre"))
        ));
    }

    #[test]
    fn empty_field_counts_as_present() {
        assert_eq!(fields(&[("name", "")]).required("name").unwrap(), "");
    }

    #[test]
    fn repeated_key_keeps_the_first_value() {
        let mut form = fields(&[("name", "A"), ("genre", "B"), ("name", "C"), ("genre", "D")]);
        assert_eq!(form.required("name").unwrap(), "A");
        assert_eq!(form.required("genre").unwrap(), "B");
    }

    #[test]
    fn integer_fields() {
        let mut form = fields(&[
            ("release_year", " 2023 "),
            ("artist_id", "1.0"),
            ("title", "twenty"),
        ]);
        assert_eq!(form.required_integer("release_year").unwrap(), 2023);
        assert_eq!(form.required_integer("artist_id").unwrap(), 1);
        assert!(matches!(
            form.required_integer("title"),
            Err(CatalogError::InvalidField("title"))
        ));
        assert!(matches!(
            form.required_integer("artist_id"),
            Err(CatalogError::MissingField("artist_id"))
        ));
    }

    #[test]
    fn decimals_must_be_whole() {
        assert_eq!(parse_integer("2023.0"), Some(2023));
        assert_eq!(parse_integer("-4"), Some(-4));
        assert_eq!(parse_integer("2023.5"), None);
        assert_eq!(parse_integer("NaN"), None);
        assert_eq!(parse_integer("inf"), None);
        assert_eq!(parse_integer("1e300"), None);
        assert_eq!(parse_integer(""), None);
    }

    #[test]
    fn path_ids_are_digits_only() {
        let id = |raw: &str| path_id(Ok(Path(raw.to_string())));
        assert_eq!(id("1").unwrap(), 1);
        assert_eq!(id("007").unwrap(), 7);
        for raw in ["+1", "-3", "", "1.5", " 1", "99999999999999999999"] {
            assert!(matches!(id(raw), Err(CatalogError::NotFound)), "{}", raw);
        }
    }
}
