//! Dashboard client
//!
//! The dashboard is the platform's management plane: it authenticates users,
//! lists the organizations and applications they can see, resolves
//! application locators, and mints server API tokens. The onboarding wizard
//! drives this client sequentially; there is no convergence logic here.

use std::collections::HashMap;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{
    ApiError, Application, Organization, REQUEST_TIMEOUT, Result, ServerToken, Session,
    directory::check, locator::app_locator,
};

/// Default base URL for the dashboard service.
const DEFAULT_BASE_URL: &str = "https://api.tether.dev/dashboard/";

/// Environment variable overriding the dashboard base URL.
const BASE_URL_ENV: &str = "TETHER_DASHBOARD_API";

/// Vendor accept header pinning the dashboard wire format.
const ACCEPT_HEADER: &str = "application/vnd.tether+json; version=1.0";

/// Login credentials for [`DashboardClient::authenticate`]
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,

    /// Two-factor code, required once the dashboard answers a password-only
    /// login with a two-factor challenge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twofactor: Option<String>,
}

/// HTTP client for the dashboard service
///
/// Session-scoped calls require a prior successful [`authenticate`]; the
/// session token is held on the client rather than in shared default
/// headers.
///
/// [`authenticate`]: DashboardClient::authenticate
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl DashboardClient {
    /// Create a client against an explicit base URL.
    ///
    /// `user_agent` identifies the integration being onboarded, e.g.
    /// `tether-cli/0.1.0 my-service/1.2.0 (aws)`.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            token: None,
        })
    }

    /// Create a client against the configured dashboard API.
    ///
    /// Honors the `TETHER_DASHBOARD_API` environment variable, falling back
    /// to the production base URL.
    pub fn from_env(user_agent: &str) -> Result<Self> {
        let base = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base, user_agent)
    }

    /// Authenticate and retain the session token for subsequent calls.
    ///
    /// A 401 whose body sets `"twofactor": true` means the account needs a
    /// two-factor code; see [`ApiError::is_two_factor_challenge`].
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<Session> {
        let url = self.endpoint("sessions")?;
        debug!(%url, email = %credentials.email, "authenticating");

        let response = self.http.post(url).json(credentials).send().await?;
        let session: Session = check(response).await?.json().await?;
        self.token = Some(session.session_token.clone());
        Ok(session)
    }

    /// List the organizations visible to the authenticated user.
    pub async fn organizations(&self) -> Result<Vec<Organization>> {
        self.get("organizations").await
    }

    /// List the applications under an organization.
    pub async fn applications(&self, org_slug: &str) -> Result<Vec<Application>> {
        self.get(&format!("organizations/{org_slug}/apps")).await
    }

    /// Resolve the platform-qualified locator for an application
    /// environment.
    pub async fn app_locator(&self, org_slug: &str, app_slug: &str, env: &str) -> Result<String> {
        let uuids: HashMap<String, String> = self
            .get(&format!("organizations/{org_slug}/apps/{app_slug}/{env}/uuid"))
            .await?;
        let uuid = uuids
            .get(env)
            .ok_or_else(|| ApiError::Decode(format!("no uuid returned for environment {env}")))?;
        Ok(app_locator(env, uuid))
    }

    /// Mint a server API token for the integration.
    pub async fn create_server_token(
        &self,
        org_slug: &str,
        app_slug: &str,
        env: &str,
        name: &str,
    ) -> Result<ServerToken> {
        let url = self.endpoint(&format!(
            "organizations/{org_slug}/apps/{app_slug}/{env}/server-tokens"
        ))?;
        debug!(%url, name, "creating server token");

        let response = self
            .http
            .post(url)
            .bearer_auth(self.session_token()?)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        check(response).await?.json().await.map_err(Into::into)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "dashboard GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.session_token()?)
            .send()
            .await?;
        check(response).await?.json().await.map_err(Into::into)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn session_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(ApiError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn authenticated_client(server: &MockServer) -> DashboardClient {
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "session_token": "session-abc"
            })))
            .mount(server)
            .await;

        let mut client =
            DashboardClient::new(&format!("{}/", server.uri()), "tether-api/test").unwrap();
        client
            .authenticate(&Credentials {
                email: "dev@example.com".into(),
                password: "hunter2".into(),
                twofactor: None,
            })
            .await
            .unwrap();
        client
    }

    #[tokio::test]
    async fn authenticate_stores_session_token() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .and(header("authorization", "Bearer session-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "name": "Acme", "slug": "acme", "has_account": true }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let orgs = client.organizations().await.unwrap();
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].slug, "acme");
        assert!(orgs[0].has_account);
    }

    #[tokio::test]
    async fn authenticate_forwards_two_factor_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .and(body_partial_json(serde_json::json!({
                "email": "dev@example.com",
                "twofactor": "123456"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "session_token": "session-2fa"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut client =
            DashboardClient::new(&format!("{}/", server.uri()), "tether-api/test").unwrap();
        let session = client
            .authenticate(&Credentials {
                email: "dev@example.com".into(),
                password: "hunter2".into(),
                twofactor: Some("123456".into()),
            })
            .await
            .unwrap();
        assert_eq!(session.session_token, "session-2fa");
    }

    #[tokio::test]
    async fn calls_before_authentication_are_rejected() {
        let client = DashboardClient::new("https://api.example.com/", "tether-api/test").unwrap();
        let err = client.organizations().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn app_locator_wraps_environment_uuid() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/organizations/acme/apps/crm/staging/uuid"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "staging": "app-uuid"
            })))
            .mount(&server)
            .await;

        let locator = client.app_locator("acme", "crm", "staging").await.unwrap();
        assert_eq!(locator, "tether:///apps/staging/app-uuid");
    }

    #[tokio::test]
    async fn create_server_token_returns_api_key() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/organizations/acme/apps/crm/staging/server-tokens"))
            .and(body_partial_json(serde_json::json!({
                "name": "my-integration [aws]"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "api_key": "sapi-xyz"
            })))
            .mount(&server)
            .await;

        let token = client
            .create_server_token("acme", "crm", "staging", "my-integration [aws]")
            .await
            .unwrap();
        assert_eq!(token.api_key, "sapi-xyz");
    }
}
