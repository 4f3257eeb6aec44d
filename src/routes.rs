//! HTTP surface: routing and request handlers.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, Expiry, SessionManagerLayer};

use crate::auth::{AuthSession, AuthState, CurrentUser};
use crate::config::{Config, ConfigError};
use crate::error::Result;
use crate::slot::{render_edit_line, render_slot};
use crate::session_store::SeaOrmStore;
use crate::state::AppState;
use crate::store::{LocationSlots, NewUser, SLOT_COUNT};
use crate::views;

/// Inline messages shown on the login page.
pub const INCORRECT_CREDENTIALS: &str = "Incorrect username/password";
pub const USERNAME_TAKEN: &str = "Username already exists";
pub const EMPTY_USERNAME: &str = "Username cannot be empty";

/// The complete service: routes, signed cookie sessions persisted in the
/// application database, and request tracing.
pub fn app(state: AppState, config: &Config) -> Result<Router, ConfigError> {
    let key = Key::try_from(config.session_secret.as_bytes())
        .map_err(|_| ConfigError::SecretTooShort(config.session_secret.len()))?;

    let session_layer = SessionManagerLayer::new(SeaOrmStore::new(state.db.clone()))
        .with_secure(config.session_secure)
        .with_expiry(Expiry::OnInactivity(config.session_inactivity))
        .with_signed(key);

    Ok(router(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http()))
}

/// Routes only; requires a session layer on top.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_form))
        .route("/login/check", post(login_check))
        .route("/login/create", post(login_create))
        .route("/logout", get(logout))
        .route("/locations", get(locations))
        .route("/managelocations", get(manage_locations))
        .route("/locations/update", post(update_locations))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SlotForm {
    #[serde(default)]
    pub slot1: String,
    #[serde(default)]
    pub slot2: String,
    #[serde(default)]
    pub slot3: String,
    #[serde(default)]
    pub slot4: String,
}

async fn index(auth: AuthSession) -> Result<Redirect> {
    Ok(match auth.get().await? {
        AuthState::Authenticated(_) => Redirect::to("/locations"),
        AuthState::Anonymous => Redirect::to("/login"),
    })
}

async fn login_form() -> Html<String> {
    views::login("")
}

async fn login_check(
    State(state): State<AppState>,
    auth: AuthSession,
    Form(credentials): Form<Credentials>,
) -> Result<Response> {
    if credentials.username.trim().is_empty()
        || !state
            .users
            .verify(&credentials.username, &credentials.password)
            .await?
    {
        tracing::info!(username = %credentials.username, "rejected login");
        return Ok(views::login(INCORRECT_CREDENTIALS).into_response());
    }

    auth.login(&credentials.username).await?;
    Ok(Redirect::to("/locations").into_response())
}

async fn login_create(
    State(state): State<AppState>,
    auth: AuthSession,
    Form(credentials): Form<Credentials>,
) -> Result<Response> {
    if credentials.username.trim().is_empty() {
        return Ok(views::login(EMPTY_USERNAME).into_response());
    }

    match state
        .users
        .create(&credentials.username, &credentials.password)
        .await?
    {
        NewUser::Created => {
            auth.login(&credentials.username).await?;
            Ok(Redirect::to("/locations").into_response())
        }
        NewUser::UsernameTaken => Ok(views::login(USERNAME_TAKEN).into_response()),
    }
}

async fn logout(auth: AuthSession) -> Result<Redirect> {
    auth.logout().await?;
    Ok(Redirect::to("/login"))
}

async fn locations(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
) -> Result<Html<String>> {
    let slots = state.locations.slots_for(&username).await?;

    // One lookup at a time, in slot order.
    let mut fragments = Vec::with_capacity(SLOT_COUNT);
    for location in slots.iter() {
        fragments.push(render_slot(&state.weather, location).await);
    }

    Ok(views::locations(&fragments))
}

async fn manage_locations(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
) -> Result<Html<String>> {
    let slots = state.locations.slots_for(&username).await?;

    let inputs: Vec<String> = slots
        .iter()
        .enumerate()
        .map(|(index, location)| render_edit_line(location, index + 1))
        .collect();

    Ok(views::manage_locations(&inputs))
}

async fn update_locations(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    Form(form): Form<SlotForm>,
) -> Result<Redirect> {
    let slots = LocationSlots::from_form([form.slot1, form.slot2, form.slot3, form.slot4]);
    state.locations.upsert(&username, slots).await?;
    Ok(Redirect::to("/locations"))
}
