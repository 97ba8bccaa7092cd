//! Login, logout and current-user handlers

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::api::dto::{ApiResponse, LoginRequest, LoginResponse, UserInfo};
use crate::api::middleware::{CurrentUser, SessionToken};
use crate::api::pages::LOGIN_PAGE;
use crate::api::validated_form::ValidatedForm;
use crate::auth::{AuthService, SESSION_COOKIE};
use crate::domain::DomainError;

/// Attributes of the session cookie
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    /// Send only over HTTPS
    pub secure: bool,
}

impl CookieSettings {
    fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}

/// Login form
#[utoipa::path(
    get,
    path = "/login",
    tag = "Authentication",
    responses(
        (status = 200, description = "HTML login form", body = String, content_type = "text/html")
    )
)]
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// Log in with username and password
///
/// On success a `session` cookie is set; it must accompany every
/// protected request.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Missing username or password")
    )
)]
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    State(cookies): State<CookieSettings>,
    jar: CookieJar,
    ValidatedForm(request): ValidatedForm<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), DomainError> {
    let outcome = auth.login(&request.username, &request.password).await?;

    let expires_in = (outcome.session.expires_at - outcome.session.created_at).num_seconds();
    let response = LoginResponse {
        user: UserInfo::from(&outcome.user),
        expires_in,
    };

    let jar = jar.add(cookies.session_cookie(outcome.token));
    Ok((jar, Json(ApiResponse::success(response))))
}

/// Log out
///
/// Ends the session, clears the cookie and redirects to the login form.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Authentication",
    responses(
        (status = 303, description = "Session ended, redirect to /login"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn logout(
    State(auth): State<Arc<AuthService>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    auth.logout(&token);
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/login"))
}

/// Current user
#[utoipa::path(
    get,
    path = "/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Logged-in user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::success(UserInfo::from(&user)))
}
