//! Database entity models.
//!
//! Three tables back the application: `users` holds credentials,
//! `locations` holds each user's four saved slots, and `tower_sessions`
//! holds serialized session records for [`crate::SeaOrmStore`].

/// Per-user saved locations.
pub mod location;

/// Session records persisted by the session store.
pub mod session;

/// Registered users.
pub mod user;
