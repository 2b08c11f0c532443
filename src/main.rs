mod auth;
mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod services;

use axum::{
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthService, TokenService};
use crate::config::Config;
use crate::services::{RedisService, TaskStore, UserStore};

// Application state shared by handlers and the auth middleware
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub auth: AuthService,
}

#[tokio::main]
async fn main() {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");

    // Initialize Redis client
    let redis_client = Arc::new(
        redis::Client::open(config.redis.url.clone()).expect("Failed to connect to Redis"),
    );
    let store = Arc::new(RedisService::new(redis_client));

    // Auth service: signing secret and token lifetime come from configuration
    let auth_service = AuthService::new(
        store.clone(),
        TokenService::new(&config.auth.secret_key),
        chrono::Duration::minutes(config.auth.token_ttl_minutes),
    );

    let state = AppState {
        users: store.clone(),
        tasks: store,
        auth: auth_service,
    };

    // Task routes sit behind the bearer-token layer
    let protected = Router::new()
        .route(
            "/tasks",
            post(handlers::create_task).get(handlers::list_tasks),
        )
        .route(
            "/tasks/:task_id",
            get(handlers::get_task)
                .patch(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    let api = Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/users", get(handlers::list_users))
        .merge(protected);

    let app = Router::new()
        .route("/", get(root))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        config.server.host, config.server.port
    ))
    .await
    .expect("Failed to bind server");

    tracing::info!("Server running on {}:{}", config.server.host, config.server.port);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Failed to start server");
}

// Root endpoint: a small map of where everything lives
async fn root() -> Json<Value> {
    Json(json!({
        "signup": "/api/v1/signup",
        "login": "/api/v1/login",
        "users": "/api/v1/users",
        "tasks": "/api/v1/tasks",
    }))
}
