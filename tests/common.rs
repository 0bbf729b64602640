#![allow(dead_code)]

use pitch_booking::{
    api::router::create_router,
    config::Config,
    domain::models::user::{ROLE_ADMIN, ROLE_USER},
    infra::factory::sqlite_state,
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        port: 0,
        jwt_secret: "test-secret-with-enough-entropy-for-hs256".to_string(),
        auth_issuer: "test-issuer".to_string(),
        facility_timezone: "UTC".to_string(),
        completion_sweep_secs: 60,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = test_config(&db_url);

        // No completion sweeper here: fixtures use past dates and tests drive the sweep by hand.
        let state = Arc::new(sqlite_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub fn token_for(&self, user_id: &str, role: &str) -> String {
        let (token, _csrf) = self.state.auth_service
            .issue_access_token(user_id, role, chrono::Duration::minutes(15))
            .unwrap();
        token
    }

    /// Returns `(user_id, bearer_token)` for a fresh customer.
    pub fn user(&self) -> (String, String) {
        let user_id = Uuid::new_v4().to_string();
        let token = self.token_for(&user_id, ROLE_USER);
        (user_id, token)
    }

    pub fn admin(&self) -> (String, String) {
        let user_id = Uuid::new_v4().to_string();
        let token = self.token_for(&user_id, ROLE_ADMIN);
        (user_id, token)
    }

    pub fn build_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        self.router.clone()
            .oneshot(Self::build_request(method, uri, token, body))
            .await
            .unwrap()
    }

    /// Creates a pitch through the admin API and returns its id.
    pub async fn create_pitch(&self, admin_token: &str, open_time: Option<&str>, close_time: Option<&str>) -> String {
        let res = self.request(Method::POST, "/admin/pitches", Some(admin_token), Some(json!({
            "name": format!("Pitch {}", &Uuid::new_v4().to_string()[..8]),
            "city": "Berlin",
            "address": "Sportplatzweg 1",
            "isIndoor": false,
            "pricePerHour": 80.0,
            "openTime": open_time,
            "closeTime": close_time,
        }))).await;
        assert!(res.status().is_success(), "create_pitch failed: {}", res.status());
        let body = parse_body(res).await;
        body["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn availability(&self, pitch_id: &str, date: &str) -> Value {
        let res = self.request(Method::GET, &format!("/pitches/{}/availability?date={}", pitch_id, date), None, None).await;
        assert!(res.status().is_success(), "availability failed: {}", res.status());
        parse_body(res).await
    }

    pub async fn book(&self, token: &str, pitch_id: &str, date: &str, start_time: &str, duration: Option<i32>) -> Response {
        let mut payload = json!({
            "pitchId": pitch_id,
            "date": date,
            "startTime": start_time,
        });
        if let Some(d) = duration {
            payload["durationMinutes"] = json!(d);
        }
        self.request(Method::POST, "/bookings", Some(token), Some(payload)).await
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn slots(availability: &Value) -> Vec<String> {
    availability["data"]["availableSlots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
