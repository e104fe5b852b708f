//! # lab-client
//!
//! HTTP client for the orchid lab backend.
//!
//! All business logic lives behind the backend's REST API; this crate only
//! speaks its envelope contract:
//! - list endpoints take `pageNumber`/`pageSize`/`filter` and answer
//!   `{ value: { data, totalCount, pageCount } }`
//! - detail endpoints answer `{ value: T }`
//! - create endpoints answer 2xx with the created id, or 4xx with a message
//!
//! Resource-specific calls live in one module per resource.

pub mod analysis;
pub mod batches;
pub mod elements;
pub mod experiment_logs;
pub mod methods;
pub mod notifications;
pub mod reports;
pub mod seedlings;
pub mod tasks;
pub mod technicians;

mod error;
mod http;

pub use error::ApiError;
pub use http::{extract_created_id, extract_message};

use std::time::Duration;

use lab_config::ApiConfig;
use lab_core::paging::{ListEnvelope, ListRequest, Page, ValueEnvelope};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::http::check_response;

/// Result of a successful create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    /// Id of the new entity, when the backend reported one.
    pub id: Option<String>,
}

/// HTTP client for the lab backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct LabClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    list_timeout: Duration,
    analysis_timeout: Duration,
}

impl LabClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent("orchid-console/0.1");
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.trimmed_base_url().to_string(),
            token: token.filter(|t| !t.is_empty()),
            list_timeout: Duration::from_secs(config.list_timeout_secs),
            analysis_timeout: Duration::from_secs(config.analysis_timeout_secs),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token attached to every call, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "backend request");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) const fn analysis_timeout(&self) -> Duration {
        self.analysis_timeout
    }

    /// Fetch one page of a list endpoint. No timeout beyond the client-wide
    /// one; this is what option loaders use.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the backend returns a
    /// non-success status, or the envelope cannot be parsed.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &ListRequest,
    ) -> Result<Page<T>, ApiError> {
        self.fetch_page(path, request, None).await
    }

    /// Fetch one page for a list view, bounded by the configured list
    /// timeout. A timed-out call fails with [`ApiError::Timeout`].
    ///
    /// # Errors
    ///
    /// Same as [`LabClient::list`], plus [`ApiError::Timeout`].
    pub async fn browse<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &ListRequest,
    ) -> Result<Page<T>, ApiError> {
        self.fetch_page(path, request, Some(self.list_timeout)).await
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &ListRequest,
        timeout: Option<Duration>,
    ) -> Result<Page<T>, ApiError> {
        let mut builder = self.request(reqwest::Method::GET, path).query(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let resp = check_response(builder.send().await?).await?;
        let envelope: ListEnvelope<T> = resp.json().await?;
        Ok(envelope.value)
    }

    /// Fetch a single entity (`GET {path}` → `{ value: T }`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, error status, or bad body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = check_response(self.request(reqwest::Method::GET, path).send().await?).await?;
        let envelope: ValueEnvelope<T> = resp.json().await?;
        Ok(envelope.value)
    }

    /// Create an entity from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the payload,
    /// other [`ApiError`] variants on transport or server failure.
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Created, ApiError> {
        let resp = check_response(
            self.request(reqwest::Method::POST, path)
                .json(body)
                .send()
                .await?,
        )
        .await?;
        let text = resp.text().await.unwrap_or_default();
        Ok(Created {
            id: http::extract_created_id(&text),
        })
    }

    /// `PUT {path}` with no body; only the status matters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or error status.
    pub async fn put_empty(&self, path: &str) -> Result<(), ApiError> {
        check_response(self.request(reqwest::Method::PUT, path).send().await?).await?;
        Ok(())
    }
}

/// Percent-encode an id for use as a path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(base_url: &str) -> LabClient {
        let config = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        LabClient::new(&config, Some("tkn".into())).expect("client builds")
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = client("http://lab.local/");
        assert_eq!(client.url("/api/methods"), "http://lab.local/api/methods");
    }

    #[test]
    fn empty_token_is_dropped() {
        let client = LabClient::new(&ApiConfig::default(), Some(String::new())).unwrap();
        assert!(client.token().is_none());
    }

    #[test]
    fn requests_carry_bearer_and_query() {
        let client = client("http://lab.local");
        let request = client
            .request(reqwest::Method::GET, "/api/batches")
            .query(&ListRequest::page(2, 5))
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://lab.local/api/batches?pageNumber=2&pageSize=5"
        );
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer tkn"
        );
    }

    #[test]
    fn ids_are_percent_encoded() {
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
