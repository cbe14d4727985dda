use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware::from_fn;
use axum::routing::{delete, get, post, put};
use axum::Router;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod repositories;
mod services;
mod slug;
mod types;

use crate::error::ApiError;
use crate::middleware::auth::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = crate::config::config();
    tracing::info!("Starting folio-api in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("FOLIO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(4000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("folio-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(article_routes())
        .merge(project_routes())
        .merge(skill_routes())
        .merge(experience_routes())
        .merge(certification_routes())
        .merge(seo_routes())
        .merge(contact_routes())
        .merge(upload_routes())
        // Stored uploads are served statically
        .nest_service("/uploads", ServeDir::new(&config::config().upload.dir))
        .fallback(not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    use handlers::auth;

    let admin = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/password", put(auth::change_password))
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .merge(admin)
}

fn profile_routes() -> Router {
    use handlers::profile;

    let admin = Router::new()
        .route("/api/profile", put(profile::update))
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/profile", get(profile::get))
        .merge(admin)
}

fn article_routes() -> Router {
    use handlers::articles;

    let admin = Router::new()
        .route("/api/articles", post(articles::create))
        .route(
            "/api/articles/:slug",
            put(articles::update).delete(articles::remove),
        )
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/articles", get(articles::list))
        .route("/api/articles/categories", get(articles::categories))
        .route("/api/articles/tags", get(articles::tags))
        .route("/api/articles/:slug", get(articles::get_by_slug))
        .merge(admin)
}

fn project_routes() -> Router {
    use handlers::projects;

    let admin = Router::new()
        .route("/api/projects", post(projects::create))
        .route("/api/projects/reorder", put(projects::reorder))
        .route(
            "/api/projects/:slug",
            put(projects::update).delete(projects::remove),
        )
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/projects", get(projects::list))
        .route("/api/projects/technologies", get(projects::technologies))
        .route("/api/projects/:slug", get(projects::get_by_slug))
        .merge(admin)
}

fn skill_routes() -> Router {
    use handlers::skills;

    let admin = Router::new()
        .route("/api/skills", post(skills::create))
        .route("/api/skills/categories", post(skills::create_category))
        .route("/api/skills/:id", put(skills::update).delete(skills::remove))
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/skills", get(skills::list))
        .route("/api/skills/categories", get(skills::categories))
        .merge(admin)
}

fn experience_routes() -> Router {
    use handlers::experiences;

    let admin = Router::new()
        .route("/api/experiences", post(experiences::create))
        .route(
            "/api/experiences/:id",
            put(experiences::update).delete(experiences::remove),
        )
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/experiences", get(experiences::list))
        .merge(admin)
}

fn certification_routes() -> Router {
    use handlers::certifications;

    let admin = Router::new()
        .route("/api/certifications", post(certifications::create))
        .route(
            "/api/certifications/:id",
            put(certifications::update).delete(certifications::remove),
        )
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/certifications", get(certifications::list))
        .merge(admin)
}

fn seo_routes() -> Router {
    use handlers::seo;

    let admin = Router::new()
        .route("/api/seo/:page_key", put(seo::upsert))
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/seo", get(seo::list))
        .route("/api/seo/:page_key", get(seo::get_by_page_key))
        .merge(admin)
}

fn contact_routes() -> Router {
    use handlers::contact;

    let admin = Router::new()
        .route("/api/contact", get(contact::list))
        .route("/api/contact/:id/read", put(contact::mark_as_read))
        .route("/api/contact/:id", delete(contact::remove))
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/contact", post(contact::create))
        .merge(admin)
}

fn upload_routes() -> Router {
    use handlers::uploads;

    // Extra headroom over the file cap for multipart framing and the
    // folder field; the service enforces the exact file size limit.
    let body_limit = config::config().upload.max_size_bytes + 64 * 1024;

    Router::new()
        .route("/api/admin/upload", post(uploads::create).get(uploads::list))
        .route("/api/admin/upload/:id", delete(uploads::remove))
        .route_layer(from_fn(jwt_auth_middleware))
        .route_layer(DefaultBodyLimit::max(body_limit))
}

fn cors_layer() -> CorsLayer {
    let origins = &config::config().security.cors_origins;

    if origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "folio-api",
            "version": version,
            "description": "Portfolio CMS backend API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/auth/login (public), /api/auth/me, /api/auth/password (admin)",
                "profile": "/api/profile (GET public, PUT admin)",
                "articles": "/api/articles[/:slug] (GET public, mutations admin)",
                "projects": "/api/projects[/:slug] (GET public, mutations admin)",
                "skills": "/api/skills (GET public, mutations admin)",
                "experiences": "/api/experiences (GET public, mutations admin)",
                "certifications": "/api/certifications (GET public, mutations admin)",
                "seo": "/api/seo[/:page_key] (GET public, PUT admin)",
                "contact": "/api/contact (POST public, inbox admin)",
                "uploads": "/api/admin/upload (admin), /uploads/* (public files)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
