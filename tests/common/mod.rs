//! Shared fixtures: in-memory SQLite, a mock weather service, and a
//! cookie-carrying client that drives the router in-process.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;
use weather_slots::{
    config::Config, migration::Migrator, routes, state::AppState, weather::WeatherClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn database() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn weather_body(name: &str, region: &str) -> serde_json::Value {
    serde_json::json!({
        "location": { "name": name, "region": region, "localtime": "2024-05-01 12:00" },
        "current": {
            "temp_f": 60.8,
            "wind_mph": 6.9,
            "humidity": 72,
            "condition": { "text": "Overcast", "icon": "//cdn.weatherapi.com/weather/64x64/day/122.png" }
        }
    })
}

/// Knows Paris and Tokyo; every other query gets a 400.
pub async fn weather_server() -> MockServer {
    let server = MockServer::start().await;

    for (query, name, region) in [("Paris", "Paris", "Ile-de-France"), ("Tokyo", "Tokyo", "Tokyo")] {
        Mock::given(method("GET"))
            .and(path("/current.json"))
            .and(query_param("q", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(name, region)))
            .with_priority(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .with_priority(10)
        .mount(&server)
        .await;

    server
}

pub fn config() -> Config {
    Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "SESSION_SECRET" => Some("0123456789abcdef".repeat(4)),
        "WEATHER_API_KEY" => Some("test_key".to_string()),
        _ => None,
    })
    .unwrap()
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub weather: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        let weather = weather_server().await;
        let client = WeatherClient::new(&weather.uri(), "test_key").unwrap();
        let state = AppState::new(database().await, client);
        let router = routes::app(state.clone(), &config()).unwrap();
        Self {
            state,
            router,
            weather,
        }
    }

    /// A browser with its own cookie jar.
    pub fn browser(&self) -> Browser {
        Browser {
            router: self.router.clone(),
            cookie: None,
        }
    }
}

pub struct Browser {
    router: Router,
    pub cookie: Option<String>,
}

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Page {
    pub fn assert_redirect(&self, to: &str) {
        assert!(
            self.status.is_redirection(),
            "expected redirect to {to}, got {} with body {}",
            self.status,
            self.body
        );
        assert_eq!(self.location.as_deref(), Some(to));
    }
}

impl Browser {
    pub async fn get(&mut self, uri: &str) -> Page {
        let request = Request::get(uri);
        self.send(request, Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> Page {
        let request = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(request, Body::from(form.to_string())).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> Page {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        Page {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
