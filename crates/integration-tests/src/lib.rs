//! Integration test harness for Rentdesk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rentdesk-integration-tests
//! ```
//!
//! Nothing external is needed: [`MockBackend`] serves a small fixture set of
//! the backend admin API on an ephemeral port, and [`spawn_dashboard`] runs
//! the real dashboard router against it.
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = MockBackend::spawn().await;
//! let dashboard = spawn_dashboard(&backend).await;
//! let page = browser().get(format!("{dashboard}/bookings")).send().await?;
//! assert!(backend.requests().iter().any(|r| r.path == "/api/admin/bookings"));
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use secrecy::SecretString;
use serde_json::{Value, json};

use rentdesk_admin::api::ApiClient;
use rentdesk_admin::config::{AdminConfig, ApiConfig};
use rentdesk_admin::state::AppState;

/// Token the mock backend accepts.
pub const TOKEN: &str = "rd_live_9fK2mQ7xLp3ZbV8nT4wY1cR6";

/// Booking whose status update is slow, for duplicate-submission tests.
pub const SLOW_BOOKING_ID: i64 = 3;

/// Listing served by the mock backend (pending review).
pub const LISTING_ID: i64 = 7;

/// Active guest account.
pub const ACTIVE_USER_ID: i64 = 11;

/// Suspended host account.
pub const SUSPENDED_USER_ID: i64 = 12;

/// How long the slow booking's update takes.
pub const SLOW_UPDATE: Duration = Duration::from_millis(400);

/// One request the mock backend received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    requests: Vec<Recorded>,
    fail_next: Option<(StatusCode, Value)>,
}

type Shared = Arc<Mutex<MockState>>;

/// In-process stand-in for the backend admin API.
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
}

impl MockBackend {
    /// Bind on an ephemeral port and start serving.
    pub async fn spawn() -> Self {
        let state = Shared::default();

        let admin = Router::new()
            .route("/bookings", get(list_bookings))
            .route(
                "/bookings/{id}",
                get(get_booking).put(update_booking).delete(acknowledge),
            )
            .route("/settings", get(list_settings))
            .route("/settings/{id}", get(get_setting).put(acknowledge))
            .route("/features", get(list_features).post(acknowledge))
            // Deletes answer 200 with an empty body, as some backend versions do.
            .route("/features/{id}", put(acknowledge).delete(empty_ok))
            .route("/categories", get(list_categories).post(acknowledge))
            .route("/categories/{id}", put(acknowledge).delete(acknowledge))
            .route("/house-types", get(list_house_types).post(acknowledge))
            .route("/house-types/{id}", put(acknowledge).delete(acknowledge))
            .route("/users", get(list_users))
            .route("/users/{id}", get(get_user).put(acknowledge))
            .route("/listings", get(list_listings).post(acknowledge))
            .route(
                "/listings/{id}",
                get(get_listing).put(acknowledge).delete(acknowledge),
            )
            .route("/listings/{id}/rules", put(acknowledge))
            .route("/transactions", get(list_transactions));

        let app = Router::new()
            .nest("/api/admin", admin)
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Base URL the dashboard should be configured with.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// A client pointed at this backend with a valid token.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        self.client_with_token(TOKEN)
    }

    #[must_use]
    pub fn client_with_token(&self, token: &str) -> ApiClient {
        let config = ApiConfig::new(
            &self.api_url(),
            SecretString::from(token.to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        ApiClient::new(&config).unwrap()
    }

    /// Answer the next request with `status` and `body` instead of fixtures.
    pub fn fail_next(&self, status: StatusCode, body: Value) {
        self.state.lock().unwrap().fail_next = Some((status, body));
    }

    /// Everything received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests with the given method.
    #[must_use]
    pub fn requests_with_method(&self, method: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

/// Dashboard configuration pointing at `backend`.
#[must_use]
pub fn dashboard_config(backend: &MockBackend) -> AdminConfig {
    let api_url = backend.api_url();
    AdminConfig::from_lookup(|key| match key {
        "RENTDESK_API_URL" => Some(api_url.clone()),
        "RENTDESK_API_TOKEN" => Some(TOKEN.to_string()),
        "ADMIN_BASE_URL" => Some("http://127.0.0.1:3001".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Run the dashboard against `backend`; returns its base URL.
pub async fn spawn_dashboard(backend: &MockBackend) -> String {
    let config = dashboard_config(backend);
    let state = AppState::new(config.clone()).unwrap();
    let app = rentdesk_admin::app(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// HTTP client that keeps the session cookie, like a browser tab.
#[must_use]
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder().cookie_store(true).build().unwrap()
}

// =============================================================================
// Mock handlers
// =============================================================================

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let query = parts
        .uri
        .query()
        .map(|q| {
            q.split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let fail = {
        let mut state = state.lock().unwrap();
        state.requests.push(Recorded {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            query,
            body: serde_json::from_slice(&bytes).ok(),
        });
        state.fail_next.take()
    };

    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthenticated."})))
            .into_response();
    }
    if let Some((status, body)) = fail {
        return (status, Json(body)).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn booking(id: i64) -> Option<Value> {
    let (code, status) = match id {
        1 => ("BK-1001", "pending"),
        2 => ("BK-1002", "completed"),
        SLOW_BOOKING_ID => ("BK-1003", "accepted"),
        _ => return None,
    };
    Some(json!({
        "id": id,
        "code": code,
        "status": status,
        "check_in": "2026-11-02",
        "check_out": "2026-11-05T00:00:00.000000Z",
        "guests": 2,
        "total_price": "360.00",
        "currency": "eur",
        "listing": {"id": 7, "title": "Loft by the river"},
        "guest": {"id": 11, "name": "Ana Ramos", "email": "ana@rentdesk.test"},
        "host": {"id": 12, "name": "Jon Bell"},
        "created_at": "2026-10-01 09:30:00"
    }))
}

async fn list_bookings() -> Json<Value> {
    let data: Vec<Value> = [1, 2, SLOW_BOOKING_ID].into_iter().filter_map(booking).collect();
    Json(json!({
        "success": true,
        "data": data,
        "meta": {"total": 23, "last_page": 2, "current_page": 1, "per_page": 15},
        "info": {"pending": 4, "accepted": "6", "completed": 13}
    }))
}

async fn get_booking(Path(id): Path<i64>) -> Response {
    booking(id).map_or_else(
        || (StatusCode::NOT_FOUND, Json(json!({"message": "Booking not found"}))).into_response(),
        |b| Json(json!({"success": true, "data": b})).into_response(),
    )
}

async fn update_booking(Path(id): Path<i64>) -> Json<Value> {
    if id == SLOW_BOOKING_ID {
        tokio::time::sleep(SLOW_UPDATE).await;
    }
    Json(json!({"success": true, "message": "Booking status updated"}))
}

fn settings() -> Vec<Value> {
    vec![
        json!({"id": 1, "key": "site_name", "label": "Site name", "group": "Site", "type": "text", "value": "Rentdesk"}),
        json!({"id": 2, "key": "maintenance_mode", "group": "Site", "type": "bool", "value": false}),
        json!({"id": 3, "key": "service_fee", "group": "Fees", "type": "number", "value": 12.5}),
    ]
}

async fn list_settings() -> Json<Value> {
    Json(json!({"success": true, "data": settings()}))
}

async fn get_setting(Path(id): Path<i64>) -> Response {
    settings()
        .into_iter()
        .find(|s| s["id"] == id)
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |s| Json(json!({"success": true, "data": s})).into_response(),
        )
}

async fn list_features() -> Json<Value> {
    // No `success` flag: older endpoints omit it.
    Json(json!({
        "data": [
            {"id": 1, "name": "Wifi", "icon": "wifi"},
            {"id": 2, "name": "Pool"}
        ]
    }))
}

async fn acknowledge() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn empty_ok() -> StatusCode {
    StatusCode::OK
}

async fn list_categories() -> Json<Value> {
    Json(json!({"success": true, "data": [{"id": 1, "name": "Beach"}, {"id": 2, "name": "City"}]}))
}

async fn list_house_types() -> Json<Value> {
    Json(json!({"success": true, "data": [{"id": 1, "name": "Apartment"}, {"id": 2, "name": "Villa"}]}))
}

fn user(id: i64) -> Option<Value> {
    match id {
        ACTIVE_USER_ID => Some(json!({
            "id": id, "name": "Ana Ramos", "email": "ana@rentdesk.test",
            "role": "guest", "status": "active", "verified": true,
            "created_at": "2026-01-12T10:00:00Z"
        })),
        SUSPENDED_USER_ID => Some(json!({
            "id": id, "name": "Jon Bell", "email": "jon@rentdesk.test",
            "role": "host", "status": "suspended", "verified": false
        })),
        _ => None,
    }
}

async fn list_users() -> Json<Value> {
    let data: Vec<Value> = [ACTIVE_USER_ID, SUSPENDED_USER_ID]
        .into_iter()
        .filter_map(user)
        .collect();
    Json(json!({"success": true, "data": data, "meta": {"total": 2}}))
}

async fn get_user(Path(id): Path<i64>) -> Response {
    user(id).map_or_else(
        || (StatusCode::NOT_FOUND, Json(json!({"message": "User not found"}))).into_response(),
        |u| Json(json!({"success": true, "data": u})).into_response(),
    )
}

fn listing() -> Value {
    json!({
        "id": LISTING_ID,
        "title": "Loft by the river",
        "status": "pending",
        "price_per_night": "120",
        "currency": "EUR",
        "city": "Porto",
        "bedrooms": 1,
        "bathrooms": 1,
        "max_guests": 2,
        "category_id": 2,
        "feature_ids": [1],
        "host": {"id": SUSPENDED_USER_ID, "name": "Jon Bell"},
        "rules": {"check_in_time": "15:00", "check_out_time": "11:00", "pets_allowed": true}
    })
}

async fn list_listings() -> Json<Value> {
    Json(json!({"success": true, "data": [listing()], "meta": {"total": 1}}))
}

async fn get_listing(Path(id): Path<i64>) -> Response {
    if id == LISTING_ID {
        Json(json!({"success": true, "data": listing()})).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "Listing not found"}))).into_response()
    }
}

async fn list_transactions() -> Json<Value> {
    Json(json!({"success": false, "message": "Ledger is being rebuilt"}))
}
