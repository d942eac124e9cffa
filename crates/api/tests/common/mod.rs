#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use lucky_six_core::draw::Draw;
use lucky_six_core::generator::DrawGenerator;
use lucky_six_core::schedule::{DrawSchedule, ScheduleStatus};
use lucky_six_core::types::{DbId, Timestamp};
use lucky_six_db::{DrawStore, MemoryDrawStore, StoreError};
use lucky_six_events::EventBus;
use tower::ServiceExt;

use lucky_six_api::config::{ServerConfig, StoreBackend};
use lucky_six_api::router::build_app_router;
use lucky_six_api::state::AppState;
use lucky_six_api::ws::WsManager;

pub const TEST_SERVICE_KEY: &str = "test-service-key";
pub const TEST_ORIGIN: &str = "http://localhost:9002";

/// A `ServerConfig` with safe defaults for tests.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        service_role_key: TEST_SERVICE_KEY.to_string(),
        draw_interval_secs: 180,
        draw_scheduler_enabled: false,
        lucky_numbers_timeout_secs: 10,
    }
}

/// App state around `store`, with a random-only generator.
pub fn test_state(store: Arc<dyn DrawStore>) -> AppState {
    AppState {
        store,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::default()),
        generator: Arc::new(DrawGenerator::random_only()),
    }
}

/// Full router, same middleware stack as the binary.
pub fn build_test_app(state: AppState) -> Router {
    let config = state.config.as_ref().clone();
    build_app_router(state, &config)
}

/// Router over an empty in-memory store.
pub fn memory_app() -> (Router, Arc<MemoryDrawStore>) {
    let store = Arc::new(MemoryDrawStore::new());
    let app = build_test_app(test_state(store.clone()));
    (app, store)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST with an optional `Authorization: Bearer` token.
pub async fn post(app: Router, uri: &str, bearer: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A store whose every call fails with a database error.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl DrawStore for FailingStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn latest_schedule(&self) -> Result<Option<DrawSchedule>, StoreError> {
        Err(unavailable())
    }

    async fn recent_draws(&self, _limit: i64) -> Result<Vec<Draw>, StoreError> {
        Err(unavailable())
    }

    async fn insert_draw(&self, _draw: &Draw) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn create_schedule(
        &self,
        _next_draw_time: Timestamp,
        _interval_secs: i64,
        _status: ScheduleStatus,
    ) -> Result<DrawSchedule, StoreError> {
        Err(unavailable())
    }

    async fn insert_scheduled_draw(
        &self,
        _draw: &Draw,
        _schedule_id: DbId,
        _due_by: Timestamp,
        _next_draw_time: Timestamp,
    ) -> Result<Option<DrawSchedule>, StoreError> {
        Err(unavailable())
    }
}
