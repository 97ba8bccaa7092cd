//! HTTP router and OpenAPI document

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::FromRef, middleware, routing::get, Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto::{ApiResponse, CreateReportRequest, LoginRequest, LoginResponse, ReportDto, UserInfo};
use super::handlers::auth::{self, CookieSettings};
use super::handlers::health::{self, HealthResponse, HealthState};
use super::handlers::metrics::{prometheus_metrics, MetricsState};
use super::handlers::reports;
use super::middleware::{
    http_metrics_middleware, request_id_middleware, require_report_author, require_session,
};
use crate::application::ReportService;
use crate::auth::{AuthService, SESSION_COOKIE};

/// State shared by every route. Handlers pick their part via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub reports: Arc<ReportService>,
    pub cookies: CookieSettings,
    pub health: HealthState,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, reports: Arc<ReportService>, cookies: CookieSettings) -> Self {
        Self {
            auth,
            reports,
            cookies,
            health: HealthState {
                started_at: Instant::now(),
            },
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.auth)
    }
}

impl FromRef<AppState> for Arc<ReportService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.reports)
    }
}

impl FromRef<AppState> for CookieSettings {
    fn from_ref(s: &AppState) -> Self {
        s.cookies
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health
    }
}

/// Session cookie scheme for OpenAPI
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login_page,
        auth::login,
        auth::logout,
        auth::me,
        reports::list_reports,
        reports::create_page,
        reports::create_report,
    ),
    components(
        schemas(
            ApiResponse<String>,
            HealthResponse,
            LoginRequest,
            LoginResponse,
            UserInfo,
            ReportDto,
            CreateReportRequest,
        )
    ),
    modifiers(&SessionCookieAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Authentication", description = "Session login and logout"),
        (name = "Reports", description = "Expert reports (informes periciales)"),
    ),
    info(
        title = "Periciales API",
        version = "1.0.0",
        description = "Expert report management with role-based access"
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full router.
///
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn create_api_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    // role check runs after the session gate below
    let author_routes: Router<AppState> = Router::new()
        .route(
            "/crear",
            get(reports::create_page).post(reports::create_report),
        )
        .route_layer(middleware::from_fn(require_report_author));

    let session_routes: Router<AppState> = Router::new()
        .route("/", get(reports::list_reports))
        .route("/logout", get(auth::logout))
        .route("/me", get(auth::me))
        .merge(author_routes)
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_session,
        ));

    let public_routes: Router<AppState> = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/health", get(health::health_check))
        .route("/api-doc/openapi.json", get(openapi_json));

    let mut router = Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .with_state(state);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::{SessionConfig, SessionManager};
    use crate::config::AdminConfig;
    use crate::domain::{CreateUserDto, Role, UserRepositoryInterface};
    use crate::infrastructure::database::test_support::{test_db, TestDb};
    use crate::infrastructure::database::{
        seed_default_admin, SeaOrmReportRepository, SeaOrmUserRepository,
    };

    const FORM: &str = "application/x-www-form-urlencoded";

    async fn setup() -> (TestDb, Router) {
        setup_with_admin(AdminConfig::default()).await
    }

    async fn setup_with_admin(admin: AdminConfig) -> (TestDb, Router) {
        let db = test_db().await;
        let users = Arc::new(SeaOrmUserRepository::new(db.connection()));
        seed_default_admin(users.as_ref(), &admin)
            .await
            .unwrap();
        for (username, role) in [("pat", Role::Perito), ("sue", Role::Supervisor)] {
            users
                .create_user(CreateUserDto {
                    name: username.to_string(),
                    username: username.to_string(),
                    password: "pw".to_string(),
                    role,
                })
                .await
                .unwrap();
        }

        let auth = Arc::new(AuthService::new(
            users,
            SessionManager::new(SessionConfig::default()),
        ));
        let reports = Arc::new(ReportService::new(Arc::new(SeaOrmReportRepository::new(
            db.connection(),
        ))));
        let state = AppState::new(auth, reports, CookieSettings::default());

        (db, create_api_router(state, None))
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
        app.clone().oneshot(req).await.unwrap()
    }

    async fn json(resp: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn set_cookie(resp: &Response<Body>) -> Option<String> {
        resp.headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    /// Log in and return the `session=...` pair for a `Cookie` header.
    async fn login(app: &Router, username: &str, password: &str) -> String {
        let resp = send(
            app,
            post_form("/login", &format!("username={username}&password={password}"), None),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let value = set_cookie(&resp).expect("session cookie");
        value.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn login_page_is_public() {
        let (_db, app) = setup().await;
        let resp = send(&app, get("/login", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_sets_session_cookie() {
        let (_db, app) = setup().await;

        let resp = send(&app, post_form("/login", "username=admin&password=adminpass", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookie = set_cookie(&resp).unwrap();
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("HttpOnly"));

        let body = json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["username"], "admin");
        assert_eq!(body["data"]["user"]["role"], "administrador");
        assert!(body["data"]["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let (_db, app) = setup().await;

        let resp = send(&app, post_form("/login", "username=admin&password=wrong", None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&resp).is_none());

        let body = json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn login_without_password_is_unprocessable() {
        let (_db, app) = setup().await;
        let resp = send(&app, post_form("/login", "username=admin", None)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn empty_credentials_are_a_failed_login() {
        let (_db, app) = setup().await;

        for body in ["username=admin&password=", "username=&password=x", "username=&password="] {
            let resp = send(&app, post_form("/login", body, None)).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{body}");
            assert!(set_cookie(&resp).is_none());
            assert_eq!(json(resp).await["error"], "Invalid credentials");
        }
    }

    #[tokio::test]
    async fn stored_empty_password_logs_in() {
        let (_db, app) = setup_with_admin(AdminConfig {
            password: String::new(),
            ..AdminConfig::default()
        })
        .await;

        let resp = send(&app, post_form("/login", "username=admin&password=", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(set_cookie(&resp).is_some());
        assert_eq!(json(resp).await["data"]["user"]["role"], "administrador");

        let resp = send(&app, post_form("/login", "username=admin&password=adminpass", None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_routes_require_session() {
        let (_db, app) = setup().await;

        for uri in ["/", "/crear", "/me", "/logout"] {
            let resp = send(&app, get(uri, None)).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }

        let resp = send(&app, get("/", Some("session=garbage"))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_creates_and_lists_report() {
        let (_db, app) = setup().await;
        let cookie = login(&app, "admin", "adminpass").await;

        let resp = send(
            &app,
            post_form(
                "/crear",
                "titulo=Case+1&descripcion=desc&fecha=2024-01-01",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = json(resp).await;
        assert_eq!(created["data"]["id"], 1);
        assert_eq!(created["data"]["titulo"], "Case 1");

        let resp = send(&app, get("/", Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let listed = json(resp).await;
        let items = listed["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["descripcion"], "desc");
        assert_eq!(items[0]["fecha"], "2024-01-01");
    }

    #[tokio::test]
    async fn perito_may_open_creation_form() {
        let (_db, app) = setup().await;
        let cookie = login(&app, "pat", "pw").await;

        let resp = send(&app, get("/crear", Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn supervisor_reads_but_cannot_create() {
        let (_db, app) = setup().await;
        let cookie = login(&app, "sue", "pw").await;

        let resp = send(&app, get("/crear", Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = send(
            &app,
            post_form("/crear", "titulo=X&descripcion=Y&fecha=2024-01-01", Some(&cookie)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = send(&app, get("/", Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(json(resp).await["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_title_or_bad_date_is_unprocessable() {
        let (_db, app) = setup().await;
        let cookie = login(&app, "pat", "pw").await;

        for body in [
            "titulo=&descripcion=d&fecha=2024-01-01",
            "titulo=+++&descripcion=d&fecha=2024-01-01",
            "titulo=t&descripcion=d&fecha=2024-13-01",
            "titulo=t&descripcion=d",
        ] {
            let resp = send(&app, post_form("/crear", body, Some(&cookie))).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        }

        let resp = send(&app, get("/", Some(&cookie))).await;
        assert!(json(resp).await["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn me_returns_current_user() {
        let (_db, app) = setup().await;
        let cookie = login(&app, "pat", "pw").await;

        let body = json(send(&app, get("/me", Some(&cookie))).await).await;
        assert_eq!(body["data"]["username"], "pat");
        assert_eq!(body["data"]["role"], "perito");
    }

    #[tokio::test]
    async fn logout_clears_cookie_and_ends_session() {
        let (_db, app) = setup().await;
        let cookie = login(&app, "admin", "adminpass").await;

        let resp = send(&app, get("/logout", Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/login");
        assert!(set_cookie(&resp).unwrap().starts_with("session="));

        // the old cookie no longer works even if the client keeps it
        let resp = send(&app, get("/", Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn health_echoes_request_id() {
        let (_db, app) = setup().await;

        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = send(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["x-request-id"], "abc-123");
        assert_eq!(json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let (_db, app) = setup().await;
        let body = json(send(&app, get("/api-doc/openapi.json", None)).await).await;
        assert!(body["paths"].get("/crear").is_some());
        assert!(body["paths"].get("/login").is_some());
    }

    #[tokio::test]
    async fn metrics_route_absent_without_recorder() {
        let (_db, app) = setup().await;
        let resp = send(&app, get("/metrics", None)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
