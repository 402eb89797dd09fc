pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes
    let auth_routes = Router::new()
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/refresh", post(routes::auth::refresh))
        .route("/me", get(routes::auth::me));

    // Organization routes
    let organization_routes = Router::new()
        .route("/", get(routes::organization::get_current))
        .route("/", post(routes::organization::create))
        .route("/switch", post(routes::organization::switch));

    // Customer routes
    let customer_routes = Router::new()
        .route("/", get(routes::customer::list))
        .route("/", post(routes::customer::create))
        .route("/{id}", get(routes::customer::get))
        .route("/{id}", put(routes::customer::update))
        .route("/{id}", delete(routes::customer::delete));

    // Project routes
    let project_routes = Router::new()
        .route("/", get(routes::project::list))
        .route("/", post(routes::project::create))
        .route("/{id}", get(routes::project::get))
        .route("/{id}", put(routes::project::update))
        .route("/{id}", delete(routes::project::delete));

    // Task routes
    let task_routes = Router::new()
        .route("/", get(routes::task::list))
        .route("/", post(routes::task::create))
        .route("/{id}", get(routes::task::get))
        .route("/{id}", put(routes::task::update))
        .route("/{id}", delete(routes::task::delete));

    // Team roster (any authenticated member)
    let user_routes = Router::new().route("/", get(routes::user::list_members));

    // Notification inbox
    let notification_routes = Router::new()
        .route("/", get(routes::notification::list))
        .route("/read-all", put(routes::notification::mark_all_read))
        .route("/{id}", put(routes::notification::mark_read));

    // Activity feed
    let activity_routes = Router::new().route("/", get(routes::activity::list));

    // Analytics (admin or manager)
    let analytics_routes = Router::new().route("/", get(routes::analytics::summary));

    // Public demo-request intake (no auth)
    let demo_routes = Router::new().route("/", post(routes::demo::submit));

    // Admin: team management
    let admin_user_routes = Router::new()
        .route("/", post(routes::user::admin_create))
        .route("/{id}", put(routes::user::admin_update))
        .route("/{id}", delete(routes::user::admin_delete));

    // Admin: global demo-request triage
    let admin_demo_routes = Router::new()
        .route("/", get(routes::demo::list))
        .route("/{id}", get(routes::demo::get))
        .route("/{id}", put(routes::demo::update));

    // Compose API
    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/organizations", organization_routes)
        .nest("/customers", customer_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/users", user_routes)
        .nest("/notifications", notification_routes)
        .nest("/activities", activity_routes)
        .nest("/analytics", analytics_routes)
        .nest("/demo", demo_routes)
        .nest("/admin/users", admin_user_routes)
        .nest("/admin/demo-requests", admin_demo_routes);

    // Health check
    let health = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
