//! Session gate and role checks for protected routes

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::auth::{require_role, AuthService, SESSION_COOKIE};
use crate::domain::{DomainError, Role, User};

/// Authenticated user, inserted into request extensions by [`require_session`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Raw session token of the current request.
#[derive(Clone, Debug)]
pub struct SessionToken(pub String);

/// Rejects requests without a live session.
///
/// On success the resolved user and the token are available to handlers as
/// `Extension<CurrentUser>` and `Extension<SessionToken>`.
pub async fn require_session(
    State(auth): State<Arc<AuthService>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        debug!(path = %request.uri().path(), "No session cookie");
        return DomainError::Unauthenticated("Login required".to_string()).into_response();
    };

    match auth.resolve(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            request.extensions_mut().insert(SessionToken(token));
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Only administrators and peritos may pass. Must run inside [`require_session`].
pub async fn require_report_author(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    request: Request,
    next: Next,
) -> Response {
    match require_role(&user, &Role::REPORT_AUTHORS) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}
