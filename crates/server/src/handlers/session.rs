//! Connect, logout and session status

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use s3b_core::{
    ConnectionCredentials, ConnectionTestResponse, Error, LogoutReceipt, SessionStatus,
};

use crate::extract::{self, SESSION_COOKIE};
use crate::state::AppState;

/// GET /api/session/status
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> Json<SessionStatus> {
    let has_session = extract::lookup(&state, &jar).await.is_some();
    Json(SessionStatus { has_session })
}

/// POST /api/connect
///
/// Tests the credentials against the backend and, on success, stores the
/// client in a new session and hands the browser its cookie.
pub async fn connect(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<ConnectionCredentials>, JsonRejection>,
) -> Response {
    let Json(credentials) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::error!(error = %rejection, "Failed to parse connection request");
            return failed(format!("Invalid request format: {}", rejection.body_text()));
        }
    };

    tracing::info!(
        endpoint = %credentials.endpoint,
        region = %credentials.region,
        access_key = %credentials.masked_access_key(),
        "Creating S3 connection"
    );

    match state.sessions.create(&credentials).await {
        Ok(session) => {
            tracing::info!(session_id = %session.id, "Connection successful");
            let cookie = extract::session_cookie(session.id.clone(), state.sessions.config());
            (
                jar.add(cookie),
                Json(ConnectionTestResponse::connected(session.id)),
            )
                .into_response()
        }
        Err(Error::InvalidRequest(message)) => failed(message),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create session");
            failed(format!("Failed to connect to S3: {e}"))
        }
    }
}

fn failed(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ConnectionTestResponse::failed(message)),
    )
        .into_response()
}

/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutReceipt>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }

    let jar = jar.add(extract::expired_cookie(state.sessions.config()));
    (jar, Json(LogoutReceipt::default()))
}
