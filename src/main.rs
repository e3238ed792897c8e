use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use store_ratings_api::auth::TokenService;
use store_ratings_api::database::manager;
use store_ratings_api::handlers::protected::{account, admin, owner, user};
use store_ratings_api::handlers::public;
use store_ratings_api::middleware::{
    auth_middleware, require_role, ADMIN_ONLY, ANY_ROLE, OWNER_ONLY, USER_ONLY,
};
use store_ratings_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = store_ratings_api::config::config();
    tracing::info!("Starting store ratings API in {:?} mode", config.environment);

    let pool = manager::connect(&config.database)
        .unwrap_or_else(|e| panic!("failed to configure database pool: {}", e));

    // The signing secret is read exactly once, here
    let tokens = Arc::new(TokenService::new(
        &config.security.jwt_secret,
        config.security.token_ttl_secs,
    ));

    let state = AppState { pool, tokens };
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Store ratings API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected, per-role route groups
        .merge(account_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .merge(owner_routes(state.clone()))
        .merge(user_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(public::auth::signup))
        .route("/auth/login", post(public::auth::login))
}

fn account_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/password", put(account::update_password))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(ANY_ROLE, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route("/api/admin/users", get(admin::list_users).post(admin::create_user))
        .route("/api/admin/stores", get(admin::list_stores).post(admin::create_store))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(ADMIN_ONLY, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn owner_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/owner/stores", get(owner::list_own_stores).post(owner::create_store))
        .route("/api/owner/ratings", get(owner::list_own_ratings))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(OWNER_ONLY, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/user/stores", get(user::list_stores))
        .route("/api/user/stores/:id/rating", post(user::rate_store))
        .route_layer(middleware::from_fn(|req, next| {
            require_role(USER_ONLY, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Store Ratings API",
        "version": version,
        "endpoints": {
            "auth": "/auth/signup, /auth/login (public), /auth/password (authenticated)",
            "admin": "/api/admin/* (admin)",
            "owner": "/api/owner/* (store_owner)",
            "user": "/api/user/* (user)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match manager::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
