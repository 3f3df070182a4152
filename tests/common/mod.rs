use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use userbase::modules::users::{InMemoryUserStore, UserService};
use userbase::router::init_router;
use userbase::state::AppState;
use userbase_config::CorsConfig;
use userbase_core::AppError;
use userbase_passwords::PasswordStrategy;
use uuid::Uuid;

/// Deterministic strategy so tests can predict stored hashes.
#[derive(Debug, Default)]
pub struct MockPasswordStrategy;

#[async_trait]
impl PasswordStrategy for MockPasswordStrategy {
    async fn encrypt(&self, password: &str) -> Result<String, AppError> {
        Ok(format!("{password}-hashed"))
    }

    async fn matches(&self, password: &str, digest: &str) -> Result<bool, AppError> {
        Ok(format!("{password}-hashed") == digest)
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<InMemoryUserStore>,
    pub service: UserService,
}

#[allow(dead_code)]
pub fn setup_service() -> (UserService, Arc<InMemoryUserStore>) {
    let store = Arc::new(InMemoryUserStore::new());
    let service = UserService::new(store.clone(), Arc::new(MockPasswordStrategy));
    (service, store)
}

#[allow(dead_code)]
pub fn setup_test_app() -> TestApp {
    let (service, store) = setup_service();
    let state = AppState::new(service.clone(), CorsConfig::default());
    TestApp {
        router: init_router(state),
        store,
        service,
    }
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
