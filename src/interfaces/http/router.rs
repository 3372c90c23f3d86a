//! HTTP router: JSON API, pages, session and tracing layers

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::application::{ReportingService, UserService};
use crate::infrastructure::database::repositories::{ReadingRepository, UserRepository};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{
    admin_api_middleware, admin_page_middleware, require_api_session, require_page_session,
    PageAuthState, SessionAuthState,
};
use crate::interfaces::http::modules::{
    auth, clients, dashboard, health, pages, readings, request_id, users,
};
use crate::interfaces::http::modules::pages::Templates;

/// Default name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "energy_session";

/// Everything the handlers share. Each handler keeps its own `State<T>`
/// extractor and Axum derives it via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub user_service: Arc<UserService<UserRepository>>,
    pub reports: Arc<ReportingService<ReadingRepository>>,
    pub templates: Templates,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        user_service: Arc<UserService<UserRepository>>,
        templates: Templates,
    ) -> Self {
        let reports = Arc::new(ReportingService::new(Arc::new(ReadingRepository::new(
            db.clone(),
        ))));
        Self {
            db,
            user_service,
            reports,
            templates,
            started_at: Arc::new(Instant::now()),
        }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub secure: bool,
    pub ttl_minutes: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            secure: false,
            ttl_minutes: 60,
        }
    }
}

// -- FromRef implementations --

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            user_service: Arc::clone(&s.user_service),
            templates: s.templates.clone(),
        }
    }
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        users::UserHandlerState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for dashboard::DashboardState {
    fn from_ref(s: &AppState) -> Self {
        dashboard::DashboardState {
            reports: Arc::clone(&s.reports),
        }
    }
}

impl FromRef<AppState> for clients::ClientState {
    fn from_ref(s: &AppState) -> Self {
        clients::ClientState {
            reports: Arc::clone(&s.reports),
        }
    }
}

impl FromRef<AppState> for readings::ReadingHandlerState {
    fn from_ref(s: &AppState) -> Self {
        readings::ReadingHandlerState {
            reports: Arc::clone(&s.reports),
        }
    }
}

impl FromRef<AppState> for pages::PageState {
    fn from_ref(s: &AppState) -> Self {
        pages::PageState {
            templates: s.templates.clone(),
        }
    }
}

impl FromRef<AppState> for SessionAuthState {
    fn from_ref(s: &AppState) -> Self {
        SessionAuthState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for PageAuthState {
    fn from_ref(s: &AppState) -> Self {
        PageAuthState {
            auth: SessionAuthState::from_ref(s),
            templates: s.templates.clone(),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(DEFAULT_COOKIE_NAME))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::session_status,
        // Dashboard
        dashboard::period_summary,
        dashboard::top_consumers,
        dashboard::faulty_meters,
        // Clients
        clients::get_client,
        clients::client_consumption,
        clients::client_statistics,
        // Readings
        readings::list_readings,
        readings::update_reading,
        // Users
        users::list_users,
        users::update_user_role,
    ),
    components(
        schemas(
            ApiResponse,
            health::HealthResponse,
            health::ComponentHealth,
            auth::SessionStatus,
            dashboard::SummaryDto,
            dashboard::ClientTotalDto,
            dashboard::FaultyClientDto,
            clients::ClientDetailsDto,
            clients::ConsumptionPointDto,
            clients::ClientStatsDto,
            readings::ReadingDto,
            readings::UpdateReadingRequest,
            users::UserDto,
            users::UpdateRoleRequest,
        )
    ),
    modifiers(&SecurityAddon),
    security(("session_cookie" = [])),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Cookie session status"),
        (name = "Dashboard", description = "Period totals, top consumers, faulty meters"),
        (name = "Clients", description = "Per-client details, consumption series and statistics"),
        (name = "Readings", description = "Energy readings listing and full-row updates (admin)"),
        (name = "Users", description = "Dashboard accounts and roles (admin)"),
    ),
    info(
        title = "Energy Dashboard API",
        version = "1.0.0",
        description = "JSON API behind the energy consumption dashboard"
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the router with all routes and layers. Sessions persist in `store`.
pub fn create_router<S>(state: AppState, session: &SessionSettings, store: S) -> Router
where
    S: SessionStore + Clone,
{
    let api_auth = SessionAuthState::from_ref(&state);
    let page_auth = PageAuthState::from_ref(&state);

    // ── JSON API ───────────────────────────────────────────────

    let admin_api: Router<AppState> = Router::new()
        .route("/api/consum_energie/{id}", put(readings::update_reading))
        .route("/api/userweb", get(users::list_users))
        .route("/api/userweb/{id}", put(users::update_user_role))
        .route_layer(middleware::from_fn(admin_api_middleware));

    let api: Router<AppState> = Router::new()
        .route("/api/dashboard/Sume", get(dashboard::period_summary))
        .route("/api/dashboard/top5", get(dashboard::top_consumers))
        .route("/api/dashboard/defect", get(dashboard::faulty_meters))
        .route("/api/client/{client_id}", get(clients::get_client))
        .route(
            "/api/client/{client_id}/consum",
            get(clients::client_consumption),
        )
        .route(
            "/api/client/{client_id}/statistici",
            get(clients::client_statistics),
        )
        .route("/api/consum_energie", get(readings::list_readings))
        .merge(admin_api)
        .route_layer(middleware::from_fn_with_state(api_auth, require_api_session));

    // ── Pages ──────────────────────────────────────────────────

    let admin_pages: Router<AppState> = Router::new()
        .route("/dashboard_clienti", get(pages::dashboard_clienti))
        .route("/dashboard_userweb", get(pages::dashboard_userweb))
        .route_layer(middleware::from_fn_with_state(
            page_auth.clone(),
            admin_page_middleware,
        ));

    let protected_pages: Router<AppState> = Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard_sume", get(pages::dashboard_sume))
        .route("/dashboard_top5", get(pages::dashboard_top5))
        .route("/dashboard_alerte", get(pages::dashboard_alerte))
        .route("/select_client", get(pages::select_client))
        .route("/client/{client_id}", get(pages::client_page))
        .route(
            "/client/{client_id}/statistici",
            get(pages::client_stats_page),
        )
        .route(
            "/client/{client_id}/consum",
            get(pages::client_consumption_page),
        )
        .merge(admin_pages)
        .route_layer(middleware::from_fn_with_state(
            page_auth,
            require_page_session,
        ));

    // ── Public ─────────────────────────────────────────────────

    let public: Router<AppState> = Router::new()
        .route("/", get(auth::session_status))
        .route("/login_web", get(auth::login_form).post(auth::login_submit))
        .route(
            "/register_web",
            get(auth::register_form).post(auth::register_submit),
        )
        .route("/logout", get(auth::logout))
        .route("/dashboard_principal", get(pages::dashboard_principal))
        .route("/health", get(health::health_check))
        .route("/api-doc/openapi.json", get(openapi_json));

    let session_layer = SessionManagerLayer::new(store)
        .with_name(session.cookie_name.clone())
        .with_secure(session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            session.ttl_minutes,
        )));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public)
        .merge(api)
        .merge(protected_pages)
        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
}
