//! # Weather Slots
//!
//! A small session-authenticated web application: each user saves up to four
//! locations and sees the current weather for each, fetched live from a
//! weatherapi.com compatible service.
//!
//! Built on [axum](https://crates.io/crates/axum) with
//! [`tower-sessions`](https://crates.io/crates/tower-sessions) for sessions
//! and [Sea-ORM](https://crates.io/crates/sea-orm) for persistence. Sessions
//! are stored in the same database as users and locations via
//! [`SeaOrmStore`].
//!
//! ## Routes
//!
//! | Method | Path               | Auth     |
//! |--------|--------------------|----------|
//! | GET    | `/`                | none     |
//! | GET    | `/login`           | none     |
//! | POST   | `/login/check`     | none     |
//! | POST   | `/login/create`    | none     |
//! | GET    | `/logout`          | none     |
//! | GET    | `/locations`       | required |
//! | GET    | `/managelocations` | required |
//! | POST   | `/locations/update`| required |
//!
//! Anonymous requests to protected routes are redirected to `/login`.
//!
//! ## Running
//!
//! ```no_run
//! use weather_slots::{config::Config, routes, state::AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let state = AppState::connect(&config).await?;
//! let app = routes::app(state, &config)?;
//!
//! let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
pub mod migration;
mod password;
pub mod routes;
mod session_store;
pub mod slot;
pub mod state;
pub mod store;
pub mod views;
pub mod weather;

/// Sea-ORM backed session store used by the session layer.
pub use session_store::SeaOrmStore;

pub use error::{Error, Result};
