use std::time::Duration;

use crate::foundation::error::{CollageError, CollageResult};

/// Environment variable holding the catalog credential.
pub const TOKEN_ENV: &str = "DISCOGS_TOKEN";

pub const DEFAULT_API_BASE: &str = "https://api.discogs.com";
pub const DEFAULT_USER_AGENT: &str = concat!("DiscogsCollage/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a network collaborator needs, passed explicitly at construction.
#[derive(Clone)]
pub struct ClientConfig {
    /// Sent verbatim as the `Authorization` header.
    pub token: String,
    pub user_agent: String,
    /// Base URL of the catalog API, without a trailing slash.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Worker threads for thumbnail downloads. `None` uses available parallelism.
    pub threads: Option<usize>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("threads", &self.threads)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            threads: None,
        }
    }

    /// Read the credential from [`TOKEN_ENV`]. Missing or blank values are a config error.
    pub fn from_env() -> CollageResult<Self> {
        Self::from_token_var(std::env::var(TOKEN_ENV).ok())
    }

    fn from_token_var(value: Option<String>) -> CollageResult<Self> {
        match value {
            Some(token) if !token.trim().is_empty() => Ok(Self::new(token.trim())),
            _ => Err(CollageError::config(format!(
                "no Discogs auth token available, set {TOKEN_ENV}"
            ))),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> CollageResult<()> {
        if self.token.trim().is_empty() {
            return Err(CollageError::config("auth token must not be empty"));
        }
        if self.api_base.is_empty() {
            return Err(CollageError::config("api base url must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(CollageError::config("request timeout must be > 0"));
        }
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(CollageError::config("'threads' must be >= 1 when set"));
        }
        Ok(())
    }

    /// URL of the user profile resource.
    pub fn user_url(&self, username: &str) -> String {
        format!("{}/users/{username}", self.api_base)
    }

    /// First page of the user's primary collection folder (folder 0).
    pub fn collection_url(&self, username: &str) -> String {
        format!("{}/users/{username}/collection/folders/0/releases", self.api_base)
    }
}
