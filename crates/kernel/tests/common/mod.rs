#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module provides test infrastructure that uses the REAL kernel code,
//! not mock implementations. Each [`TestApp`] owns a fresh in-memory store
//! seeded with a fixture document, so tests never share state.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vetrina_kernel::config_storage::{ConfigStore, MemoryConfigStore};
use vetrina_kernel::content::BlockRegistry;
use vetrina_kernel::models::SiteConfig;
use vetrina_kernel::routes;
use vetrina_kernel::state::AppState;
use vetrina_kernel::theme::ThemeEngine;

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// App over the built-in default document.
    pub fn new() -> Self {
        Self::with_site(vetrina_kernel::models::default_site::site_config())
    }

    /// App over a fixture built with `vetrina_test_utils`.
    pub fn with_fixture(site: &vetrina_test_utils::TestSite) -> Self {
        let site: SiteConfig =
            serde_json::from_value(site.build()).expect("fixture is a valid document");
        Self::with_site(site)
    }

    pub fn with_site(site: SiteConfig) -> Self {
        let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new(site));
        let theme = ThemeEngine::builtin().expect("built-in templates compile");
        let state = AppState::with_parts(store, Arc::new(theme), BlockRegistry::standard());
        let router = routes::router(state.clone());
        Self { router, state }
    }

    /// Current stored document.
    pub async fn site(&self) -> Arc<SiteConfig> {
        self.state.store().load().await
    }

    /// Send a request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// GET `uri` and return status and body text.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
        let status = response.status();
        (status, body_string(response).await)
    }

    /// PUT a raw JSON body.
    pub async fn put_json(&self, uri: &str, body: impl Into<String>) -> (StatusCode, String) {
        let response = self
            .request(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.into()))
                    .unwrap(),
            )
            .await;
        let status = response.status();
        (status, body_string(response).await)
    }

    /// POST a form-encoded body.
    pub async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, String) {
        let response = self
            .request(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await;
        let status = response.status();
        (status, body_string(response).await)
    }
}

/// Collect a response body into a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
