//! Application context shared by every handler.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::migration::Migrator;
use crate::store::{LocationStore, UserStore};
use crate::weather::{WeatherClient, WeatherError};

/// Failures that stop the server before it binds.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database: {0}")]
    Database(#[from] DbErr),
    #[error("weather client: {0}")]
    Weather(#[from] WeatherError),
}

/// Store handles and the weather client, built once before the listener
/// binds and cloned into each request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub users: UserStore,
    pub locations: LocationStore,
    pub weather: WeatherClient,
}

impl AppState {
    /// Wraps an already migrated connection.
    pub fn new(db: DatabaseConnection, weather: WeatherClient) -> Self {
        Self {
            users: UserStore::new(db.clone()),
            locations: LocationStore::new(db.clone()),
            db,
            weather,
        }
    }

    /// Connects to the database, applies pending migrations and builds the
    /// weather client.
    pub async fn connect(config: &Config) -> Result<Self, StartupError> {
        let mut opt = ConnectOptions::new(config.database_url.clone());
        opt.max_connections(10)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let db = Database::connect(opt).await?;
        tracing::info!("connected to database");

        Migrator::up(&db, None).await?;
        tracing::info!("database schema is up to date");

        let weather = WeatherClient::new(&config.weather_api_url, &config.weather_api_key)?;

        Ok(Self::new(db, weather))
    }
}
