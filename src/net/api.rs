//! REST API client for the task backend.
//!
//! ERROR HANDLING
//! ==============
//! `login` and `signup` hand back whatever JSON the backend answered with,
//! success or not; pages inspect the shape (`access_token` vs `detail`).
//! The task endpoints are status-aware and map non-2xx answers to
//! `ApiError::Status`, since their success bodies decode into typed values.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use super::types::{ApiError, Credentials, NewTask, Task, error_detail};
use crate::config::ClientConfig;

pub const LOGIN_ENDPOINT: &str = "/login";
pub const SIGNUP_ENDPOINT: &str = "/signup";
pub const TASKS_ENDPOINT: &str = "/tasks";

fn task_endpoint(task_id: i64) -> String {
    format!("{TASKS_ENDPOINT}/{task_id}")
}

/// Backend client bound to a base URL and a transport.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// `POST /login` with `{email, password}`.
    ///
    /// Returns the parsed response body regardless of HTTP status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the request fails and
    /// [`ApiError::Decode`] if the body is not JSON.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        self.post_auth(LOGIN_ENDPOINT, email, password).await
    }

    /// `POST /signup` with `{email, password}`, returned like [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the request fails and
    /// [`ApiError::Decode`] if the body is not JSON.
    pub async fn signup(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        self.post_auth(SIGNUP_ENDPOINT, email, password).await
    }

    /// `GET /tasks` for the bearer of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-2xx answer, or a network/decode
    /// error.
    pub async fn list_tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        let request =
            HttpRequest::new(Method::Get, self.config.endpoint(TASKS_ENDPOINT)).bearer(token);
        let response = self.send(request).await?;
        decode_success(&response)
    }

    /// `POST /tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-2xx answer, or a network/decode
    /// error.
    pub async fn create_task(&self, token: &str, task: &NewTask) -> Result<Task, ApiError> {
        let request = HttpRequest::new(Method::Post, self.config.endpoint(TASKS_ENDPOINT))
            .bearer(token)
            .json(encode(task)?);
        let response = self.send(request).await?;
        decode_success(&response)
    }

    /// `PUT /tasks/{id}`, replacing description and completion.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-2xx answer (404 when the task
    /// does not belong to the caller), or a network/decode error.
    pub async fn update_task(
        &self,
        token: &str,
        task_id: i64,
        task: &NewTask,
    ) -> Result<Task, ApiError> {
        let url = self.config.endpoint(&task_endpoint(task_id));
        let request = HttpRequest::new(Method::Put, url)
            .bearer(token)
            .json(encode(task)?);
        let response = self.send(request).await?;
        decode_success(&response)
    }

    /// `DELETE /tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-2xx answer, or a network error.
    pub async fn delete_task(&self, token: &str, task_id: i64) -> Result<(), ApiError> {
        let url = self.config.endpoint(&task_endpoint(task_id));
        let request = HttpRequest::new(Method::Delete, url).bearer(token);
        let response = self.send(request).await?;
        ensure_success(&response)
    }

    async fn post_auth(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Value, ApiError> {
        let body = encode(&Credentials { email, password })?;
        let request = HttpRequest::new(Method::Post, self.config.endpoint(endpoint)).json(body);
        let response = self.send(request).await?;
        parse_json(&response.body)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        match self.transport.send(request).await {
            Ok(response) => {
                log::debug!("api: {method:?} {url} -> {}", response.status);
                Ok(response)
            }
            Err(e) => {
                log::warn!("api: {method:?} {url} failed: {e}");
                Err(e)
            }
        }
    }
}

fn encode<S: serde::Serialize>(value: &S) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))
}

fn parse_json(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn ensure_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let detail = parse_json(&response.body).map_or(None, |body| error_detail(&body));
    Err(ApiError::Status {
        status: response.status,
        detail,
    })
}

fn decode_success<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    ensure_success(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
