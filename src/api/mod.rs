// API client module: a small blocking HTTP client that talks to the rise
// API. Each submodule wraps one resource (certs, domains, projects, ...) and
// owns the table that turns the server's `error_description` strings into
// an `ErrorKind`.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{ApiResult, AppError, ErrorKind};

pub mod certs;
pub mod deployments;
pub mod domains;
pub mod oauth;
pub mod projects;
pub mod users;

/// Media type the API versions its responses with.
pub const ACCEPT_TYPE: &str = "application/vnd.rise.v0+json";

/// `error_description` the API sends with a 401 on any authenticated call.
const INVALID_TOKEN: &str = "invalid or expired token";

/// Blocking API client holding the reqwest client, the API base URL and an
/// optional bearer token for authenticated calls.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

/// Error body shape returned by the API on 4xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    /// Per-field validation messages, present on some 422 responses.
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl ErrorBody {
    pub fn description(&self) -> Option<&str> {
        self.error_description.as_deref()
    }

    /// Render field errors as `field message` lines, sorted by field.
    pub fn field_errors(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|(field, msg)| format!("{} {}", field, msg))
            .collect()
    }
}

impl ApiClient {
    /// Create a client for the API at `host` (e.g. `https://api.rise.sh`).
    pub fn new(host: &str) -> Result<Self> {
        let base_url = Url::parse(host).with_context(|| format!("Invalid API host: {}", host))?;
        if base_url.cannot_be_a_base() {
            bail!("Invalid API host: {}", host);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_TYPE));
        let client = Client::builder()
            .user_agent(format!("rise-cli/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(ApiClient {
            client,
            base_url,
            token: None,
        })
    }

    /// Same client, authenticating subsequent requests with `token`.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Build the URL for a resource path given as raw segments. Segments
    /// are percent-encoded, so project and domain names are taken verbatim.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Unauthenticated request builder.
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.url(segments))
    }

    /// Request builder carrying the `Authorization: Bearer` header. Fails
    /// with `Unauthorized` when no token is set, without touching the network.
    fn authorized(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        let token = match self.token.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AppError::new(ErrorKind::Unauthorized)),
        };
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::new(ErrorKind::Unauthorized))?;
        Ok(self.request(method, segments).header(AUTHORIZATION, value))
    }

    /// Send a request. Any transport failure becomes `RequestFailed`.
    fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let res = req.send().map_err(|e| {
            debug!(error = %e, "request failed before a response was received");
            AppError::request_failed(e)
        })?;
        debug!(status = %res.status(), url = %res.url(), "received response");
        Ok(res)
    }
}

/// Decode a JSON response body. A body that can't be read or parsed is an
/// unexpected error carrying the decode failure as its cause.
fn read_json<T: DeserializeOwned>(res: Response) -> ApiResult<T> {
    let text = res
        .text()
        .map_err(|e| AppError::unexpected().caused_by(e))?;
    serde_json::from_str(&text).map_err(|e| AppError::unexpected().caused_by(e))
}

fn read_error_body(res: Response) -> ApiResult<ErrorBody> {
    read_json(res)
}

/// Pass a response with the `success` status through. Any other 4xx body
/// is decoded and mapped with `map`; non-4xx statuses are unexpected.
fn check(
    res: Response,
    success: u16,
    map: impl FnOnce(u16, Option<&str>) -> ErrorKind,
) -> ApiResult<Response> {
    let status = res.status();
    if status.as_u16() == success {
        return Ok(res);
    }
    if !status.is_client_error() {
        warn!(status = status.as_u16(), "unexpected response status");
        return Err(AppError::unexpected());
    }
    let body = read_error_body(res)?;
    let kind = map(status.as_u16(), body.description());
    Err(app_error(kind, &body))
}

/// Mapping shared by every authenticated endpoint except certs, whose status
/// table is fixed.
fn map_unauthorized(status: u16, description: Option<&str>) -> Option<ErrorKind> {
    match (status, description) {
        (401, Some(INVALID_TOKEN)) => Some(ErrorKind::Unauthorized),
        _ => None,
    }
}

/// Turn a decoded error body into an `AppError`, keeping the server's
/// wording as the message when the kind was recognised.
fn app_error(kind: ErrorKind, body: &ErrorBody) -> AppError {
    match (kind, body.description()) {
        (ErrorKind::ValidationFailed, _) if !body.errors.is_empty() => {
            AppError::with_message(kind, body.field_errors().join(", "))
        }
        (ErrorKind::UnexpectedError, _) | (_, None) => AppError::new(kind),
        (_, Some(desc)) => AppError::with_message(kind, desc),
    }
}
