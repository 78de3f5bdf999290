//! Session transport: how the token travels between client and server.
//!
//! Bearer headers are the canonical mechanism; the cookie variant is an
//! optional adapter for browser deployments. Both feed the same extraction
//! seam, so the auth middleware's identity-resolution contract does not
//! depend on the deployment choice.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::http::header;

/// Name of the session cookie used by the cookie transport.
pub const TOKEN_COOKIE: &str = "token";

/// How session tokens reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransport {
    Bearer,
    Cookie,
}

impl SessionTransport {
    /// Pull the token out of the request, if present.
    ///
    /// Pure function of the request: no validation happens here.
    pub fn extract(self, req: &HttpRequest) -> Option<String> {
        match self {
            SessionTransport::Bearer => bearer_token(req),
            // Cookie deployments still accept the canonical bearer header.
            SessionTransport::Cookie => bearer_token(req).or_else(|| cookie_token(req)),
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn cookie_token(req: &HttpRequest) -> Option<String> {
    req.cookie(TOKEN_COOKIE).map(|c| c.value().to_string())
}

/// Build the session cookie attached to a signin response.
///
/// Cross-site production deployments need `SameSite=None`, which browsers
/// only accept together with `Secure`; development stays on `Lax` so plain
/// HTTP keeps working.
pub fn session_cookie(token: &str, max_age_seconds: u64, production: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token.to_string());
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_max_age(Duration::seconds(max_age_seconds as i64));
    if production {
        cookie.set_same_site(SameSite::None);
        cookie.set_secure(true);
    } else {
        cookie.set_same_site(SameSite::Lax);
    }
    cookie
}
