//! CORS policy for browser clients reaching the service through local frontends.
//!
//! Note:
//! - CORS is enforced by browsers. The gateway's server-to-server calls are not restricted by it.
//! - Preflight requests are answered here, before the access gate runs.
//!
//! Policy:
//! - Allowlist origins from Config (exact match), WITH credentials.
//! - Request headers are mirrored (wildcards cannot be combined with credentials).
//! - An empty allowlist allows no origin at all.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::Config;

const ALLOW_PRIVATE_NETWORK: &str = "access-control-allow-private-network";

/// Apply CORS policy to the given Router.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(&config.cors_allowed_origins))
}

pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([HeaderName::from_static(ALLOW_PRIVATE_NETWORK)])
        .allow_private_network(true)
        .max_age(std::time::Duration::from_secs(60 * 10))
}
