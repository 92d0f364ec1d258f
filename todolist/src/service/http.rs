//! HTTP task service client.
//!
//! Talks to the REST task API through `reqwest`. Every response body is an
//! [`ApiResponse`](todolist_proto::envelope::ApiResponse) envelope; a `false`
//! success flag is a failure even when a payload is present.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use todolist_proto::codec;
use todolist_proto::request::{CreateTaskRequest, TaskPatch};
use todolist_proto::task::{Task, TaskId};
use url::Url;

use super::{ServiceError, ServiceKind, TaskService};

/// Connection settings for [`HttpTaskService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the task API, e.g. `http://localhost:3000/api`.
    pub base_url: Url,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl ApiConfig {
    /// Default whole-request timeout.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default connect timeout.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a config with default timeouts.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Task service backed by the remote REST API.
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTaskService {
    /// Builds a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidBaseUrl`] if the base URL is not an
    /// http(s) URL that paths can be appended to, or
    /// [`ServiceError::Transport`] if the HTTP client cannot be initialized.
    pub fn new(config: &ApiConfig) -> Result<Self, ServiceError> {
        let base_url = &config.base_url;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid_base(base_url, "scheme must be http or https"));
        }
        if base_url.cannot_be_a_base() {
            return Err(invalid_base(base_url, "URL cannot be a base"));
        }
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL by appending path segments to the base URL.
    ///
    /// Segments are percent-encoded, so ids cannot escape their slot.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| invalid_base(&self.base_url, "URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues one request and unwraps the response envelope.
    ///
    /// A 404 on a by-id call becomes [`ServiceError::NotFound`].
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<String>,
        subject: Option<&TaskId>,
    ) -> Result<Option<T>, ServiceError> {
        let url = self.endpoint(segments)?;
        let endpoint = format!("{method} {}", url.path());
        tracing::debug!(%endpoint, "calling task service");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                tracing::warn!(%endpoint, error = %e, "task service unreachable");
                ServiceError::Unavailable
            } else {
                ServiceError::Transport(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = subject {
                return Err(ServiceError::NotFound(id.clone()));
            }
        }
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                endpoint,
            });
        }

        let text = response.text().await?;
        let envelope = codec::decode_response::<T>(&text)?;
        envelope.into_result().map_err(ServiceError::from)
    }
}

fn invalid_base(url: &Url, reason: &'static str) -> ServiceError {
    ServiceError::InvalidBaseUrl {
        url: url.to_string(),
        reason,
    }
}

impl TaskService for HttpTaskService {
    async fn fetch_all(&self) -> Result<Vec<Task>, ServiceError> {
        let tasks = self
            .call::<Vec<Task>>(Method::GET, &["tasks"], None, None)
            .await?;
        Ok(tasks.unwrap_or_default())
    }

    async fn fetch(&self, id: &TaskId) -> Result<Task, ServiceError> {
        self.call(Method::GET, &["tasks", id.as_str()], None, Some(id))
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    async fn create(&self, request: &CreateTaskRequest) -> Result<Task, ServiceError> {
        let body = codec::encode(request)?;
        self.call(Method::POST, &["tasks"], Some(body), None)
            .await?
            .ok_or_else(|| ServiceError::MissingPayload("POST /tasks".to_string()))
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, ServiceError> {
        let body = codec::encode(patch)?;
        self.call(Method::PUT, &["tasks", id.as_str()], Some(body), Some(id))
            .await?
            .ok_or_else(|| ServiceError::MissingPayload(format!("PUT /tasks/{id}")))
    }

    async fn delete(&self, id: &TaskId) -> Result<(), ServiceError> {
        self.call::<IgnoredAny>(Method::DELETE, &["tasks", id.as_str()], None, Some(id))
            .await?;
        Ok(())
    }

    async fn toggle(&self, id: &TaskId) -> Result<Task, ServiceError> {
        self.call(
            Method::PATCH,
            &["tasks", id.as_str(), "toggle"],
            None,
            Some(id),
        )
        .await?
        .ok_or_else(|| ServiceError::MissingPayload(format!("PATCH /tasks/{id}/toggle")))
    }

    fn kind(&self) -> ServiceKind {
        ServiceKind::Http
    }
}
