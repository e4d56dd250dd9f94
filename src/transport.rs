//! HTTP seam between the collage pipeline and the remote catalog.
//!
//! Every network collaborator talks to an [`HttpTransport`]. Production code uses
//! [`ReqwestTransport`]; tests and offline runs use [`InMemoryTransport`].

use std::{
    collections::HashMap,
    sync::Mutex,
    time::Duration,
};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::{
    config::ClientConfig,
    foundation::error::{CollageError, CollageResult},
};

/// Status and body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking GET transport.
///
/// `Err` means no response was received at all (connect failure, timeout, ...).
/// A response with any status is `Ok`; callers decide what a status means.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> CollageResult<HttpResponse>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> CollageResult<HttpResponse> {
        (**self).get(url, query)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> CollageResult<HttpResponse> {
        (**self).get(url, query)
    }
}

/// `reqwest` blocking client carrying the credential and user agent on every request.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> CollageResult<Self> {
        config.validate()?;

        let mut auth = HeaderValue::from_str(&config.token)
            .map_err(|e| CollageError::config(format!("auth token is not a valid header: {e}")))?;
        auth.set_sensitive(true);
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| CollageError::config(format!("user agent is not a valid header: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, agent);

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CollageError::config(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> CollageResult<HttpResponse> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| CollageError::fetch(format!("GET {url} failed: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| CollageError::fetch(format!("reading body of {url} failed: {e}")))?;
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Canonical lookup key for a GET: the url, plus `?k=v&...` when a query is given.
pub fn request_key(url: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let q = query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{q}")
}

#[derive(Clone, Debug)]
struct Route {
    response: Option<HttpResponse>,
    delay: Duration,
}

/// Fixed table of responses keyed by [`request_key`].
///
/// Unknown keys answer `404`. Routes registered with [`InMemoryTransport::fail`]
/// behave like a dropped connection.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    routes: HashMap<String, Route>,
    log: Mutex<Vec<String>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, key: impl Into<String>, response: HttpResponse) -> Self {
        self.route_delayed(key, response, Duration::ZERO)
    }

    /// Like [`route`](Self::route), but the answer is held back for `delay`.
    pub fn route_delayed(
        mut self,
        key: impl Into<String>,
        response: HttpResponse,
        delay: Duration,
    ) -> Self {
        self.routes.insert(
            key.into(),
            Route {
                response: Some(response),
                delay,
            },
        );
        self
    }

    pub fn fail(mut self, key: impl Into<String>) -> Self {
        self.routes.insert(
            key.into(),
            Route {
                response: None,
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Keys requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl HttpTransport for InMemoryTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> CollageResult<HttpResponse> {
        let key = request_key(url, query);
        if let Ok(mut log) = self.log.lock() {
            log.push(key.clone());
        }
        let Some(route) = self.routes.get(&key) else {
            return Ok(HttpResponse::status(404));
        };
        if !route.delay.is_zero() {
            std::thread::sleep(route.delay);
        }
        route
            .response
            .clone()
            .ok_or_else(|| CollageError::fetch(format!("GET {key} failed: connection refused")))
    }
}
