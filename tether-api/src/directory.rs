//! Webhook directory client
//!
//! The directory is the platform's per-application webhook registry. It
//! exposes three primitives only — list, create, activate — and no atomic
//! "ensure active" operation; activation is asynchronous on the remote side
//! and a webhook may still report `pending` after `activate` returns. The
//! `tether-provision` crate layers the convergence loop on top of this
//! client through the [`WebhookDirectory`] trait.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{ApiError, NewWebhook, REQUEST_TIMEOUT, Result, Webhook, locator::normalize_id};

/// Default base URL for the webhook directory service.
const DEFAULT_BASE_URL: &str = "https://api.tether.dev/";

/// Environment variable overriding the directory base URL.
const BASE_URL_ENV: &str = "TETHER_PLATFORM_API";

/// Vendor accept header pinning the directory wire format.
const ACCEPT_HEADER: &str = "application/vnd.tether.webhooks+json; version=2.0";

/// Wire format version stamped into create payloads.
const WIRE_VERSION: &str = "2.0";

/// The webhook directory's three primitives.
///
/// `app_id` arguments are platform-qualified locators; implementations
/// normalize them before building request paths. The trait exists so the
/// provisioning reconciler can run against an in-memory double in tests.
#[async_trait]
pub trait WebhookDirectory: Send + Sync {
    /// List all webhooks registered for the application. May be empty.
    async fn list(&self, app_id: &str) -> Result<Vec<Webhook>>;

    /// Register a new webhook. The directory does not check for duplicates;
    /// the webhook starts in `pending` status.
    async fn create(&self, app_id: &str, webhook: &NewWebhook) -> Result<Webhook>;

    /// Request activation of a webhook. The status flip is not guaranteed
    /// to be visible immediately after this returns.
    async fn activate(&self, app_id: &str, webhook_id: &str) -> Result<Webhook>;
}

/// HTTP client for the webhook directory service
///
/// The bearer token is fixed at construction; there is no shared mutable
/// client state. One request at a time, no retries at this layer.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    target_url: &'a str,
    events: &'a [String],
    version: &'static str,
    secret: &'a str,
}

impl DirectoryClient {
    /// Create a client against an explicit base URL.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .user_agent(concat!("tether-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            token: token.into(),
        })
    }

    /// Create a client against the configured platform API.
    ///
    /// Honors the `TETHER_PLATFORM_API` environment variable, falling back
    /// to the production base URL.
    pub fn from_env(token: impl Into<String>) -> Result<Self> {
        let base = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base, token)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl WebhookDirectory for DirectoryClient {
    async fn list(&self, app_id: &str) -> Result<Vec<Webhook>> {
        let url = self.endpoint(&format!("apps/{}/webhooks", normalize_id(app_id)))?;
        debug!(%url, "listing webhooks");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        check(response).await?.json().await.map_err(Into::into)
    }

    async fn create(&self, app_id: &str, webhook: &NewWebhook) -> Result<Webhook> {
        let url = self.endpoint(&format!("apps/{}/webhooks", normalize_id(app_id)))?;
        debug!(%url, target_url = %webhook.target_url, "creating webhook");

        let body = CreateBody {
            target_url: &webhook.target_url,
            events: &webhook.events,
            version: WIRE_VERSION,
            secret: &webhook.secret,
        };
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        check(response).await?.json().await.map_err(Into::into)
    }

    async fn activate(&self, app_id: &str, webhook_id: &str) -> Result<Webhook> {
        let url = self.endpoint(&format!(
            "apps/{}/webhooks/{}/activate",
            normalize_id(app_id),
            normalize_id(webhook_id)
        ))?;
        debug!(%url, "activating webhook");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        check(response).await?.json().await.map_err(Into::into)
    }
}

/// Map a non-success response to [`ApiError::Remote`], keeping the body.
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Remote {
        status: status.as_u16(),
        body,
    })
}
