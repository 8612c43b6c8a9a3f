use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::api::types::{ApiEnvelope, ApiError};
use crate::config;
use crate::utils::storage;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const CURRENT_USER_KEY: &str = "current_user";

/// Typed facade over the HRDesk backend.
///
/// Endpoint methods live in the per-domain modules (`leaves`, `employees`);
/// this type owns transport concerns: base-URL resolution, the bearer token
/// the login shell stored, request correlation ids, envelope unwrapping and
/// session invalidation on 401.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn auth_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = storage::get_item(ACCESS_TOKEN_KEY) {
            if let Ok(value) = format!("Bearer {}", token).parse() {
                headers.insert(header::AUTHORIZATION, value);
            }
        }
        headers
    }

    /// Builds and dispatches a request. Transport failures come back as a
    /// generic, user-presentable failure; the detail goes to the log.
    pub(crate) async fn send(
        &self,
        build: impl FnOnce(&Client) -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let request = build(&self.client)
            .headers(Self::auth_headers())
            .header("x-request-id", Uuid::new_v4().to_string())
            .build()
            .map_err(|err| ApiError::unknown(format!("Failed to build request: {}", err)))?;

        #[cfg(all(test, not(target_arch = "wasm32")))]
        if let Some(responder) = mock::find_responder(request.url().as_str()) {
            return responder.respond(&request).map(mock::MockResponse::into_response);
        }

        let url = request.url().clone();
        self.client.execute(request).await.map_err(|err| {
            log::warn!("request to {} failed: {}", url, err);
            ApiError::request_failed("The server could not be reached. Please try again.")
        })
    }

    pub(crate) fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            Self::clear_session();
            Self::redirect_to_login_if_needed();
        }
    }

    fn clear_session() {
        storage::remove_item(ACCESS_TOKEN_KEY);
        storage::remove_item(CURRENT_USER_KEY);
    }

    #[cfg(target_arch = "wasm32")]
    fn redirect_to_login_if_needed() {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(pathname) = location.pathname() {
                if pathname == "/login" {
                    return;
                }
            }
            let _ = location.set_href("/login");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn redirect_to_login_if_needed() {}

    /// Unwraps the `{ success, message, data, timestamp }` envelope.
    /// `success:false` carries the backend message through verbatim.
    pub(crate) async fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|err| ApiError::unknown(format!("Failed to parse response: {}", err)))?;
        if envelope.success {
            envelope
                .data
                .ok_or_else(|| ApiError::unknown("Response payload was empty"))
        } else if status == StatusCode::FORBIDDEN {
            Err(ApiError::forbidden(envelope.message))
        } else {
            Err(ApiError::business(envelope.message))
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
