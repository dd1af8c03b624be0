use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use vms_core::config::BackendConfig;
use vms_core::ports::{BackendError, BackendOperation};
use vms_core::SortToken;

#[derive(Debug, thiserror::Error)]
pub enum HttpBackendError {
    #[error("invalid backend base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// `reqwest` client bound to one backend base URL.
///
/// Paths are joined onto the base URL, so a base with a path prefix
/// (`https://host/api/`) keeps that prefix. A missing trailing slash is added.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, HttpBackendError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, HttpBackendError> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized).map_err(|err| HttpBackendError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn url(&self, operation: BackendOperation, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|err| BackendError::Transport {
                operation,
                message: format!("invalid request path {path:?}: {err}"),
            })
    }

    pub(crate) fn get(
        &self,
        operation: BackendOperation,
        path: &str,
    ) -> Result<RequestBuilder, BackendError> {
        Ok(self.client.get(self.url(operation, path)?))
    }

    pub(crate) fn post(
        &self,
        operation: BackendOperation,
        path: &str,
    ) -> Result<RequestBuilder, BackendError> {
        Ok(self.client.post(self.url(operation, path)?))
    }

    pub(crate) fn patch(
        &self,
        operation: BackendOperation,
        path: &str,
    ) -> Result<RequestBuilder, BackendError> {
        Ok(self.client.patch(self.url(operation, path)?))
    }

    pub(crate) fn delete(
        &self,
        operation: BackendOperation,
        path: &str,
    ) -> Result<RequestBuilder, BackendError> {
        Ok(self.client.delete(self.url(operation, path)?))
    }

    /// Send `request` and return the raw response, whatever its status.
    pub(crate) async fn send_raw(
        &self,
        operation: BackendOperation,
        request: RequestBuilder,
    ) -> Result<Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|err| map_reqwest_error(operation, err))?;
        debug!(
            %operation,
            status = response.status().as_u16(),
            url = %response.url(),
            "backend responded"
        );
        Ok(response)
    }

    /// Send `request`; 404 maps to `NotFound`, any other non-2xx to `Status`.
    pub(crate) async fn send(
        &self,
        operation: BackendOperation,
        request: RequestBuilder,
    ) -> Result<Response, BackendError> {
        let response = self.send_raw(operation, request).await?;
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(BackendError::NotFound { operation }),
            status => Err(BackendError::Status {
                operation,
                status: status.as_u16(),
            }),
        }
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        operation: BackendOperation,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        self.send(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|err| map_reqwest_error(operation, err))
    }
}

/// `sortBy` / `order` query pairs for a sort token.
pub(crate) fn sort_query(sort: &SortToken) -> [(&'static str, String); 2] {
    [
        ("sortBy", sort.field().to_string()),
        ("order", sort.direction().as_str().to_string()),
    ]
}

fn map_reqwest_error(operation: BackendOperation, err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout { operation }
    } else if err.is_decode() {
        BackendError::Decode {
            operation,
            message: err.to_string(),
        }
    } else {
        BackendError::Transport {
            operation,
            message: err.to_string(),
        }
    }
}
