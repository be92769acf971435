//! CloudRoyale session client
//!
//! One [`SessionClient`] owns one authenticated panel session: the cookie
//! jar lives inside the client's `reqwest::Client` and is dropped with it.
//! The panel speaks HTML, not JSON, so most operations hand the response
//! body back unparsed; only the listing page gets decoded.

use std::time::Duration;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::scrape::{self, ServerRecord};

/// Production panel host.
pub const DEFAULT_BASE_URL: &str = "https://cloudroyale.se";

// The panel is slow; these match what its own UI tolerates.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(61);

// Give the panel operators some way of tracking API users.
const USER_AGENT: &str = concat!("cloudroyale-client/", env!("CARGO_PKG_VERSION"));

/// Panel account credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Decoded result of a login attempt.
///
/// The panel answers a successful login with an empty body and anything
/// else with a page this client cannot interpret: that page may be an error
/// page or a legitimate non-empty success page. Rather than guessing, the
/// two cases are kept apart and the undecoded page is carried verbatim as a
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Empty response body: the panel accepted the credentials.
    Accepted,

    /// Non-empty response body of unknown meaning.
    Indeterminate {
        /// The response body, byte for byte.
        body: String,
    },
}

impl LoginOutcome {
    fn from_body(body: String) -> Self {
        if body.is_empty() {
            Self::Accepted
        } else {
            Self::Indeterminate { body }
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// The undecoded page for an indeterminate outcome.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Accepted => None,
            Self::Indeterminate { body } => Some(body),
        }
    }
}

/// Per-server form actions understood by `/admin/vps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServerAction {
    Startup,
    Shutdown,
    SetSshKeys,
}

impl ServerAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Shutdown => "shutdown",
            Self::SetSshKeys => "set_ssh_keys",
        }
    }
}

/// Client for the CloudRoyale VPS control panel.
///
/// The client does not track whether [`login`](Self::login) has been called;
/// operations issued before a successful login simply get whatever the panel
/// serves to an unauthenticated session. Requests are issued one at a time,
/// and the session cookie is shared by every request the instance makes.
pub struct SessionClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

/// Builder for [`SessionClient`].
pub struct SessionClientBuilder {
    credentials: Credentials,
    base_url: String,
    accept_invalid_certs: bool,
}

impl SessionClientBuilder {
    /// Point the client at a different host (mainly for tests). A trailing
    /// slash is stripped.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Skip TLS certificate verification.
    ///
    /// Off by default. Only here because some legacy deployments of the
    /// panel serve a broken certificate chain; leave it off unless you have
    /// hit that.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> Result<SessionClient> {
        // Login success is decoded from the immediate response body (an
        // empty 302 counts); redirects must not be followed.
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .cookie_store(true)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()?;

        Ok(SessionClient {
            http,
            base_url: self.base_url,
            credentials: self.credentials,
        })
    }
}

impl SessionClient {
    /// Client against the production panel with default transport settings.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    pub fn builder(credentials: Credentials) -> SessionClientBuilder {
        SessionClientBuilder {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            accept_invalid_certs: false,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log in and establish the session cookie.
    pub async fn login(&self) -> Result<LoginOutcome> {
        let url = format!("{}/login", self.base_url);

        tracing::debug!("panel: POST {url}");

        let form = [
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
        ];
        let body = self.http.post(&url).form(&form).send().await?.text().await?;

        Ok(LoginOutcome::from_body(body))
    }

    /// Raw status blob for one server, as served by the panel's AJAX
    /// endpoint.
    pub async fn server_status(&self, server_id: &str) -> Result<String> {
        self.get(format!(
            "{}/admin/ajax.php?vm_status&id={}",
            self.base_url, server_id
        ))
        .await
    }

    /// Scrape the admin listing page into server records.
    pub async fn servers(&self) -> Result<Vec<ServerRecord>> {
        let html = self.get(format!("{}/admin/", self.base_url)).await?;
        Ok(scrape::parse_server_listing(&html))
    }

    /// Power a server on.
    pub async fn start_server(&self, server_id: &str) -> Result<String> {
        self.server_action(ServerAction::Startup, server_id).await
    }

    /// Power a server off.
    pub async fn stop_server(&self, server_id: &str) -> Result<String> {
        self.server_action(ServerAction::Shutdown, server_id).await
    }

    /// Install the account's SSH keys on a server.
    pub async fn add_ssh_keys(&self, server_id: &str) -> Result<String> {
        self.server_action(ServerAction::SetSshKeys, server_id).await
    }

    /// Create a server from `config`, defaults filled in by
    /// [`ServerConfig::default`].
    pub async fn create_server(&self, config: &ServerConfig) -> Result<String> {
        let url = format!("{}/admin/create", self.base_url);

        tracing::debug!("panel: POST {url}");

        let body = self
            .http
            .post(&url)
            .form(&config.form_fields())
            .send()
            .await?
            .text()
            .await?;

        Ok(body)
    }

    async fn server_action(&self, action: ServerAction, server_id: &str) -> Result<String> {
        let url = format!("{}/admin/vps?id={}", self.base_url, server_id);

        tracing::debug!("panel: POST {url} action={}", action.as_str());

        let form = [("action", action.as_str()), ("id", server_id)];
        let body = self.http.post(&url).form(&form).send().await?.text().await?;

        Ok(body)
    }

    async fn get(&self, url: String) -> Result<String> {
        tracing::debug!("panel: GET {url}");

        let body = self.http.get(&url).send().await?.text().await?;
        Ok(body)
    }
}
