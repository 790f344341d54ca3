use async_trait::async_trait;
use entities::album::{Album, NewAlbum};
use entities::artist::{Artist, NewArtist};
use log::debug;
use sqlx::pool::PoolConnection;
use sqlx::{Pool, Sqlite};

/// Hands out connections to the catalog store.
///
/// The returned handle goes back to wherever it came from when dropped, so every
/// query below releases its connection on all exit paths, `?` included.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn acquire(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error>;
}

#[async_trait]
impl ConnectionProvider for Pool<Sqlite> {
    async fn acquire(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        Pool::acquire(self).await
    }
}

pub async fn add_artist<P>(provider: &P, artist: &NewArtist) -> Result<i64, sqlx::Error>
where
    P: ConnectionProvider + ?Sized,
{
    let mut connection = provider.acquire().await?;
    let ret = sqlx::query("insert into artists (name, genre) values (?, ?)")
        .bind(&artist.name)
        .bind(&artist.genre)
        .execute(&mut *connection)
        .await?;
    Ok(ret.last_insert_rowid())
}

pub async fn get_artist_by_id<P>(
    provider: &P,
    artist_id: i64,
) -> Result<Option<Artist>, sqlx::Error>
where
    P: ConnectionProvider + ?Sized,
{
    let mut connection = provider.acquire().await?;
    let artist = sqlx::query_as::<_, Artist>("select id, name, genre from artists where id = ?")
        .bind(artist_id)
        .fetch_optional(&mut *connection)
        .await?;
    if artist.is_none() {
        debug!("No artist with id {}", artist_id);
    }
    Ok(artist)
}

/// Stores an album as given. `artist_id` is not looked up first.
pub async fn add_album<P>(provider: &P, album: &NewAlbum) -> Result<i64, sqlx::Error>
where
    P: ConnectionProvider + ?Sized,
{
    let mut connection = provider.acquire().await?;
    let ret = sqlx::query("insert into albums (artist_id, title, release_year) values (?, ?, ?)")
        .bind(album.artist_id)
        .bind(&album.title)
        .bind(album.release_year)
        .execute(&mut *connection)
        .await?;
    Ok(ret.last_insert_rowid())
}

pub async fn get_album_by_id<P>(provider: &P, album_id: i64) -> Result<Option<Album>, sqlx::Error>
where
    P: ConnectionProvider + ?Sized,
{
    let mut connection = provider.acquire().await?;
    let album = sqlx::query_as::<_, Album>(
        "select id, artist_id, title, release_year from albums where id = ?",
    )
    .bind(album_id)
    .fetch_optional(&mut *connection)
    .await?;
    if album.is_none() {
        debug!("No album with id {}", album_id);
    }
    Ok(album)
}
