use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{NewTask, StatusPatch, Task};

/// Errors surfaced by the remote task store. All three are distinguishable
/// to callers; the gateway never recovers from any of them locally.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (unreachable host, connection reset, ...)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The store answered with an error status code. Callers must not treat
    /// an error-status response as data.
    #[error("server returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// The response body was not the JSON we expected
    #[error("malformed response: {0}")]
    Decode(String),
}

/// HTTP client for the remote task store. Owns the connection pool the way
/// the old local store owned its database handle. No retries and no caching
/// here; re-fetch policy lives with the query controller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    /// Fetch the full task list. Response order is preserved; the caller
    /// replaces its collection wholesale.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let resp = self.send(Method::GET, None::<&()>).await?;
        decode_json(resp).await
    }

    /// Create a task. The created task the server echoes back (possibly an
    /// empty body) is deliberately discarded: the refreshed list is the only
    /// state update callers apply.
    pub async fn create_task(&self, req: &NewTask) -> Result<(), ApiError> {
        self.send(Method::POST, Some(req)).await?;
        Ok(())
    }

    /// Change a task's status. Same discard policy as `create_task`.
    pub async fn update_status(&self, patch: &StatusPatch) -> Result<(), ApiError> {
        self.send(Method::PUT, Some(patch)).await?;
        Ok(())
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.tasks_url();
        debug!(%method, %url, "task store request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            // `json()` also sets the application/json content-type header
            request = request.json(body);
        }
        let resp = request.send().await.map_err(|e| {
            warn!(error = %e, "task store unreachable");
            ApiError::Network(e)
        })?;
        check_response(resp).await
    }
}

/// Map an error-status response to `ApiError::Remote` before any decoding,
/// carrying the response body as the message. Success responses pass through
/// unchanged.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.as_u16() >= 400 {
        let message = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "task store rejected request");
        return Err(ApiError::Remote {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}

async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
