use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

use crate::endpoint_handlers::{create_album, create_artist, get_album, get_artist};

pub mod config;
pub mod endpoint_handlers;
pub mod error;
mod responses;

pub use config::Config;
pub use error::{CatalogError, StartupError};
pub use queries::ConnectionProvider;

/// Handler state: where to get a store connection from.
#[derive(Clone)]
pub struct DatabaseState {
    provider: Arc<dyn ConnectionProvider>,
}

impl DatabaseState {
    pub fn new(provider: impl ConnectionProvider + 'static) -> Self {
        DatabaseState {
            provider: Arc::new(provider),
        }
    }

    pub(crate) fn provider(&self) -> &dyn ConnectionProvider {
        self.provider.as_ref()
    }
}

pub fn router(state: DatabaseState) -> Router {
    Router::new()
        .route("/artist", post(create_artist))
        .route("/artist/:id", get(get_artist))
        .route("/album", post(create_album))
        .route("/album/:id", get(get_album))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub struct CatalogService {
    config: Config,
    pool: SqlitePool,
}

impl CatalogService {
    /// Opens (creating if needed) the database named in `config` and brings its
    /// schema up to date. Existing rows are left alone.
    pub async fn connect(config: Config) -> Result<Self, StartupError> {
        info!("Database path: {}", config.database.display());
        let options = SqliteConnectOptions::new()
            .filename(&config.database)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        migration::apply(&pool).await?;
        Ok(CatalogService { config, pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn router(&self) -> Router {
        router(DatabaseState::new(self.pool.clone()))
    }

    pub async fn serve(self) -> Result<(), StartupError> {
        let address = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(address).await?;
        info!("Listening on {}", address);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
