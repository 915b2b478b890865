//! Session cookie handling
//!
//! The browser identifies its session with the `session_id` cookie set on
//! a successful connect. Handlers that talk to storage take an
//! [`ActiveSession`], which rejects the request with 401 when the cookie is
//! missing or names an unknown session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use s3b_core::{Session, SessionConfig};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_id";

/// The caller's live session
pub struct ActiveSession(pub Session);

impl FromRequestParts<AppState> for ActiveSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let jar = CookieJar::from_headers(&parts.headers);
        lookup(state, &jar)
            .await
            .map(ActiveSession)
            .ok_or_else(ApiError::no_session)
    }
}

/// Session named by the cookie jar, if it is still live
pub async fn lookup(state: &AppState, jar: &CookieJar) -> Option<Session> {
    let id = jar.get(SESSION_COOKIE)?.value();
    state.sessions.get(id).await
}

/// Cookie handed to the browser after connecting
pub fn session_cookie(id: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.cookie_secure)
        .max_age(time::Duration::seconds(
            i64::try_from(config.ttl_secs).unwrap_or(i64::MAX),
        ))
        .build()
}

/// Cookie that clears the session on the browser side
pub fn expired_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.cookie_secure)
        .max_age(time::Duration::ZERO)
        .build()
}
