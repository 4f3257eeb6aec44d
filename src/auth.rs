//! Session-backed authentication.
//!
//! [`AuthSession`] wraps the per-request `tower_sessions::Session` behind a
//! typed [`AuthState`]. [`CurrentUser`] is the guard for protected routes:
//! anonymous requests are answered with a redirect to `/login`.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::{Error, Result};

const USERNAME_KEY: &str = "username";

/// Who the current session belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(String),
}

/// Typed view over the request's session.
pub struct AuthSession {
    session: Session,
}

impl AuthSession {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Reads the stored username. A missing or empty one is `Anonymous`.
    pub async fn get(&self) -> Result<AuthState> {
        Ok(match self.session.get::<String>(USERNAME_KEY).await? {
            Some(username) if !username.is_empty() => AuthState::Authenticated(username),
            _ => AuthState::Anonymous,
        })
    }

    /// Writes the username without touching the session id. Prefer
    /// [`AuthSession::login`] for authentication.
    pub async fn set(&self, username: &str) -> Result<()> {
        self.session.insert(USERNAME_KEY, username).await?;
        Ok(())
    }

    /// Moves the session data to a fresh id and invalidates the old one.
    pub async fn regenerate(&self) -> Result<()> {
        self.session.cycle_id().await?;
        Ok(())
    }

    /// Drops all session data and the backing record.
    pub async fn destroy(&self) -> Result<()> {
        self.session.flush().await?;
        Ok(())
    }

    /// Anonymous → Authenticated. The id is cycled before the username is
    /// written so a pre-login id can never carry an identity.
    pub async fn login(&self, username: &str) -> Result<()> {
        self.regenerate().await?;
        self.set(username).await?;
        self.session.save().await?;
        tracing::info!(username, "session authenticated");
        Ok(())
    }

    /// Authenticated → Anonymous.
    pub async fn logout(&self) -> Result<()> {
        self.session.remove::<String>(USERNAME_KEY).await?;
        self.session.save().await?;
        self.regenerate().await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(Self::new(session))
    }
}

/// Username of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthSession::from_request_parts(parts, state).await?;

        match auth.get().await.map_err(Error::into_response)? {
            AuthState::Authenticated(username) => Ok(Self(username)),
            AuthState::Anonymous => Err(Redirect::to("/login").into_response()),
        }
    }
}
