//! HTTP access to the card backend.
//!
//! Every request goes through [`ApiClient`], which
//! - prefixes the configured API base (`/api` unless overridden at build time),
//! - attaches `Authorization: Bearer <token>` when a token is stored,
//! - turns a `401` into a signed-out session: stored credentials are cleared
//!   and the registered unauthorized callback fires so the app routes to login,
//! - reads the backend's `{ "detail": ... }` body on any other failure.
//!
//! Endpoint wrappers live in the submodules and return typed models from
//! `common::model`.

pub mod auth;
pub mod data;
pub mod generation;
pub mod templates;

use std::cell::RefCell;
use std::rc::Rc;

use common::model::error_detail;
use gloo_net::http::{Request, RequestBuilder, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use web_sys::FormData;
use yew::Callback;

use crate::session;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{}", unauthorized_message(.detail))]
    Unauthorized { detail: Option<String> },

    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Browser storage error: {0}")]
    Storage(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

fn unauthorized_message(detail: &Option<String>) -> &str {
    detail.as_deref().unwrap_or("Your session has expired. Please sign in again.")
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Request failed with status {status}"),
    }
}

impl ApiError {
    /// The backend's own explanation, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Backend detail when present, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

pub(crate) fn browser_error(value: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Browser(format!("{value:?}"))
}

/// Outcome of a response from its status and body alone.
///
/// Any 2xx succeeds whatever the body holds. `401` is reported apart from
/// other failures because it ends the session.
pub fn classify(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let detail = error_detail(body);
    if status == 401 {
        return Err(ApiError::Unauthorized { detail });
    }
    Err(ApiError::Status { status, detail })
}

#[derive(Clone, Copy, Debug)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

struct Inner {
    base: String,
    on_unauthorized: RefCell<Option<Callback<()>>>,
    /// Forgets the stored credentials; runs before `on_unauthorized`.
    clear_session: Box<dyn Fn()>,
}

/// Shared request layer; clones point at the same configuration.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<Inner>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ApiClient {
    pub fn new(base: &str) -> Self {
        Self::with_session_reset(base, session::clear_credentials)
    }

    fn with_session_reset(base: &str, clear_session: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                base: base.trim_end_matches('/').to_string(),
                on_unauthorized: RefCell::new(None),
                clear_session: Box::new(clear_session),
            }),
        }
    }

    /// Registers the callback fired after a `401` has cleared the session.
    pub fn on_unauthorized(&self, callback: Callback<()>) {
        *self.inner.on_unauthorized.borrow_mut() = Some(callback);
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base, path.trim_start_matches('/'))
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        match session::stored_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<Response, ApiError> {
        let request = request.map_err(|e| ApiError::Browser(e.to_string()))?;
        debug!("{method:?} {path}");
        let response = request.send().await.map_err(|e| {
            warn!("{method:?} {path} failed: {e}");
            ApiError::Network(e.to_string())
        })?;
        self.check(response).await
    }

    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!("{} answered {status}: {body}", response.url());
        self.settle(status, &body).map(|()| response)
    }

    /// Applies the session side effects of a classified failure.
    fn settle(&self, status: u16, body: &str) -> Result<(), ApiError> {
        let result = classify(status, body);
        if let Err(ApiError::Unauthorized { .. }) = &result {
            (self.inner.clear_session)();
            let callback = self.inner.on_unauthorized.borrow().clone();
            if let Some(callback) = callback {
                callback.emit(());
            }
        }
        result
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.builder(Method::Get, path).build();
        let response = self.send(Method::Get, path, request).await?;
        Self::decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self.builder(Method::Post, path).json(body);
        let response = self.send(Method::Post, path, request).await?;
        Self::decode(response).await
    }

    /// `PUT` whose response body is not needed.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = self.builder(Method::Put, path).json(body);
        self.send(Method::Put, path, request).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.builder(Method::Delete, path).build();
        self.send(Method::Delete, path, request).await.map(|_| ())
    }

    /// Multipart `POST`; the browser fills in the boundary header.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormData,
    ) -> Result<T, ApiError> {
        let request = self.builder(Method::Post, path).body(form);
        let response = self.send(Method::Post, path, request).await?;
        Self::decode(response).await
    }

    /// Multipart `POST` judged by its status alone; the body is ignored.
    pub async fn post_form_unit(&self, path: &str, form: FormData) -> Result<(), ApiError> {
        let request = self.builder(Method::Post, path).body(form);
        self.send(Method::Post, path, request).await.map(|_| ())
    }

    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let request = self.builder(Method::Get, path).build();
        let response = self.send(Method::Get, path, request).await?;
        response
            .binary()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    /// A client whose credential reset and unauthorized callback only count
    /// their calls.
    fn counting_client() -> (ApiClient, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let cleared = Rc::new(Cell::new(0));
        let notified = Rc::new(Cell::new(0));
        let client = {
            let cleared = Rc::clone(&cleared);
            ApiClient::with_session_reset("/api/", move || cleared.set(cleared.get() + 1))
        };
        {
            let notified = Rc::clone(&notified);
            client.on_unauthorized(Callback::from(move |_: ()| notified.set(notified.get() + 1)));
        }
        (client, cleared, notified)
    }

    #[test]
    fn success_ignores_the_body() {
        assert_eq!(classify(200, ""), Ok(()));
        assert_eq!(classify(202, "not json"), Ok(()));
        assert_eq!(classify(204, ""), Ok(()));
    }

    #[test]
    fn failures_carry_the_backend_detail() {
        assert_eq!(
            classify(422, r#"{"detail": "Template not found"}"#),
            Err(ApiError::Status { status: 422, detail: Some("Template not found".into()) })
        );
        assert_eq!(
            classify(500, "<html>oops</html>"),
            Err(ApiError::Status { status: 500, detail: None })
        );
    }

    #[test]
    fn unauthorized_clears_session_and_notifies() {
        let (client, cleared, notified) = counting_client();

        let result = client.settle(401, r#"{"detail": "Token expired"}"#);

        assert_eq!(result, Err(ApiError::Unauthorized { detail: Some("Token expired".into()) }));
        assert_eq!(cleared.get(), 1);
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn other_failures_keep_the_session() {
        let (client, cleared, notified) = counting_client();

        assert!(client.settle(403, "").is_err());
        assert!(client.settle(500, "").is_err());

        assert_eq!(cleared.get(), 0);
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn unauthorized_message_falls_back_when_detail_missing() {
        let err = classify(401, "").unwrap_err();
        assert_eq!(err.to_string(), "Your session has expired. Please sign in again.");
        assert_eq!(err.message_or("Login failed"), "Login failed");
    }

    #[test]
    fn urls_join_base_and_path() {
        let (client, _, _) = counting_client();
        assert_eq!(client.url("/templates/7"), "/api/templates/7");
        assert_eq!(client.url("auth/me"), "/api/auth/me");
    }
}
