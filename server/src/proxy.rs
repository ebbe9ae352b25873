//! # API Proxy
//!
//! Forwards every request under `/api` to the card backend so the browser only
//! ever talks to this server. The `/api` prefix is stripped: `GET
//! /api/templates/7?x=1` becomes `GET {API_UPSTREAM}/templates/7?x=1`.
//!
//! ## Behaviour
//! - Method, body and end-to-end headers (including `Authorization`) are
//!   passed through; hop-by-hop headers are not.
//! - The backend's status, headers and body are returned as they are, so its
//!   `{ "detail": ... }` error bodies reach the frontend unchanged.
//! - Only a failure to reach the backend is answered here, with
//!   `502 Bad Gateway` (see [`ProxyError`]).

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::web::{self, scope};
use actix_web::{HttpRequest, HttpResponse, Scope};
use log::{debug, error};

use crate::error::ProxyError;

const API_PATH: &str = "/api";

/// Headers that describe one connection and must not be forwarded.
const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
];

/// Shared HTTP client and backend base URL.
pub struct Upstream {
    client: reqwest::Client,
    base: String,
}

impl Upstream {
    pub fn new(base: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("idcard-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }
}

/// Maps a request path under `/api` onto the backend.
pub fn upstream_url(base: &str, path: &str, query: &str) -> String {
    let rest = path.strip_prefix(API_PATH).unwrap_or(path);
    let rest = rest.trim_start_matches('/');
    let mut url = format!("{}/{}", base.trim_end_matches('/'), rest);
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

fn forwardable(name: &str) -> bool {
    !HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h))
        && !name.eq_ignore_ascii_case("content-length")
}

/// Actix handler for every method and path under `/api`.
pub async fn forward(
    req: HttpRequest,
    body: web::Bytes,
    upstream: web::Data<Upstream>,
) -> Result<HttpResponse, ProxyError> {
    let url = upstream_url(&upstream.base, req.path(), req.query_string());
    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|_| ProxyError::Method(req.method().to_string()))?;
    debug!("{method} {} -> {url}", req.path());

    let mut outgoing = upstream.client.request(method.clone(), &url);
    for (name, value) in req.headers() {
        if forwardable(name.as_str()) {
            outgoing = outgoing.header(name.as_str(), value.as_bytes());
        }
    }
    if !body.is_empty() {
        outgoing = outgoing.body(body.to_vec());
    }

    let response = outgoing.send().await.map_err(|e| {
        error!("{method} {url} failed: {e}");
        ProxyError::from(e)
    })?;

    let status = StatusCode::from_u16(response.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    debug!("{method} {url} answered {status}");

    let mut reply = HttpResponse::build(status);
    for (name, value) in response.headers() {
        if !forwardable(name.as_str()) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            reply.append_header((name, value));
        }
    }
    Ok(reply.streaming(response.bytes_stream()))
}

/// Configures the `/api` scope; every sub-path goes to [`forward`].
pub fn configure_routes() -> Scope {
    scope(API_PATH).default_service(web::route().to(forward))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_prefix_is_stripped() {
        let base = "http://127.0.0.1:8000";
        assert_eq!(
            upstream_url(base, "/api/templates/7", ""),
            "http://127.0.0.1:8000/templates/7"
        );
        assert_eq!(
            upstream_url(base, "/api/templates/", ""),
            "http://127.0.0.1:8000/templates/"
        );
    }

    #[test]
    fn query_and_base_path_are_kept() {
        assert_eq!(
            upstream_url("https://cards.example.com/v1/", "/api/generation/history", "limit=10"),
            "https://cards.example.com/v1/generation/history?limit=10"
        );
    }

    #[test]
    fn bare_prefix_maps_to_backend_root() {
        assert_eq!(upstream_url("http://b:1", "/api", ""), "http://b:1/");
    }

    #[test]
    fn hop_by_hop_headers_stay_behind() {
        assert!(forwardable("Authorization"));
        assert!(forwardable("content-type"));
        assert!(!forwardable("Connection"));
        assert!(!forwardable("Host"));
        assert!(!forwardable("Content-Length"));
    }
}
