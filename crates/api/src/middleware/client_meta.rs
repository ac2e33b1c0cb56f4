use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

/// Transport-derived metadata captured for every logged event.
///
/// Use this as an extractor parameter in any handler that needs to record
/// where a report came from:
///
/// ```ignore
/// async fn my_handler(meta: ClientMeta) -> AppResult<Json<()>> {
///     tracing::info!(ip = ?meta.ip_address, "handling report");
///     Ok(Json(()))
/// }
/// ```
///
/// Extraction never fails: a request without a resolvable peer address or
/// without a `User-Agent` header simply yields `None` fields.
#[derive(Debug, Clone)]
pub struct ClientMeta {
    /// First `X-Forwarded-For` hop when present, else the peer address.
    pub ip_address: Option<String>,
    /// Verbatim `User-Agent` header value.
    pub user_agent: Option<String>,
}

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        // Present only when the server was started with connect-info; the
        // test harness drives the router directly and falls through to None.
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(ClientMeta {
            ip_address: forwarded.or(peer),
            user_agent,
        })
    }
}
