//! Shared harness for the site integration tests.
//!
//! Builds the full application router around test collaborators and drives
//! it with `tower::ServiceExt::oneshot`, carrying the session cookie from
//! one request to the next like a browser would.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use meadowlark_core::Sku;
use meadowlark_site::build_app;
use meadowlark_site::config::SiteConfig;
use meadowlark_site::services::{
    CatalogError, InMemoryCatalog, Notification, Notifier, NotifyError, Product, ProductCatalog,
};
use meadowlark_site::state::AppState;
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Notifier that forwards every message to a channel.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        self.tx
            .send(notification)
            .map_err(|e| NotifyError::InvalidAddress(e.to_string()))
    }
}

/// Notifier whose relay always rejects the message.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::InvalidAddress(notification.to.to_string()))
    }
}

/// Catalog whose backend is always down.
pub struct FailingCatalog;

#[async_trait]
impl ProductCatalog for FailingCatalog {
    async fn find_by_sku(&self, _sku: &Sku) -> Result<Option<Product>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused by db-01".to_string()))
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<Product>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused by db-01".to_string()))
    }

    async fn all(&self) -> Result<Vec<Product>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused by db-01".to_string()))
    }
}

/// Configuration pointing at the repository's public assets.
pub fn test_config(overrides: &[(&str, &str)]) -> SiteConfig {
    let public_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../public");
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("PUBLIC_DIR".to_string(), public_dir.display().to_string());
    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    SiteConfig::from_lookup(&|key| vars.get(key).cloned()).expect("test config should load")
}

/// A response with its body already collected.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Browser-like client over the application router.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Client over the demo catalog with a channel notifier.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        Self::with_config(test_config(&[]))
    }

    pub fn with_config(config: SiteConfig) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = AppState::new(
            config,
            Arc::new(InMemoryCatalog::demo()),
            Arc::new(ChannelNotifier { tx }),
        );
        (Self::from_state(state), rx)
    }

    pub fn with_catalog(catalog: Arc<dyn ProductCatalog>) -> Self {
        let (tx, _rx) = mpsc::unbounded_channel();
        let state = AppState::new(test_config(&[]), catalog, Arc::new(ChannelNotifier { tx }));
        Self::from_state(state)
    }

    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        let state = AppState::new(test_config(&[]), Arc::new(InMemoryCatalog::demo()), notifier);
        Self::from_state(state)
    }

    fn from_state(state: AppState) -> Self {
        Self {
            app: build_app(state),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::get(uri), Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let builder = Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(form.to_string())).await
    }

    pub async fn send(&mut self, mut builder: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Wait for the next background email.
pub async fn next_email(rx: &mut mpsc::UnboundedReceiver<Notification>) -> Notification {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for email")
        .expect("notifier channel closed")
}
