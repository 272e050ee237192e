//! nocturne-api — HTTP API server for the nocturne note service.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use governor::{Quota, RateLimiter};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use uuid::Uuid;

use nocturne_api::{app, AppState};
use nocturne_db::Database;

/// Maximum accepted request body size (10 MB; rich-text payloads).
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful
/// for log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// OpenAPI documentation (utoipa metadata).
#[allow(dead_code)]
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nocturne API",
        version = "0.4.0",
        description = "Note service: filtering, sorting, pagination, and ownership-gated mutations over rich-text notes"
    ),
    tags(
        (name = "Notes", description = "Note listing, detail, and mutations"),
        (name = "Users", description = "Profiles, public notes, statistics"),
        (name = "System", description = "Health checks")
    ),
    components(schemas(
        nocturne_core::Note,
        nocturne_core::Author,
        nocturne_core::User,
        nocturne_core::NotePayload,
        nocturne_core::CreateNoteRequest,
        nocturne_core::UpdateNoteRequest,
        nocturne_core::TagCount,
        nocturne_core::UserStats,
        nocturne_core::PopularNote,
        nocturne_core::Pagination,
    ))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT - "json" or "text" (default: "text")
    //   RUST_LOG   - standard env filter (default: "nocturne_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nocturne_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!(log_format = %log_format, "Logging initialized");

    // Get configuration from environment
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/nocturne".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    // Rate limiting configuration
    // RATE_LIMIT_REQUESTS: requests per period (default: 100)
    // RATE_LIMIT_PERIOD_SECS: period in seconds (default: 900 = 15 minutes)
    let rate_limit_enabled: bool = std::env::var("RATE_LIMIT_ENABLED")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);
    let rate_limit_requests: u32 = std::env::var("RATE_LIMIT_REQUESTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(100);
    let rate_limit_period_secs: u64 = std::env::var("RATE_LIMIT_PERIOD_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(900);

    // Connect to database and run pending migrations
    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    info!("Database connected");
    db.migrate().await?;
    info!("Database migrations complete");

    let mut state = AppState::new(Arc::new(db.notes.clone()), Arc::new(db.users.clone()));

    if rate_limit_enabled {
        let quota = Quota::with_period(std::time::Duration::from_secs(rate_limit_period_secs))
            .expect("Rate limit period must be non-zero")
            .allow_burst(NonZeroU32::new(rate_limit_requests).expect("Rate limit must be non-zero"));
        state = state.with_rate_limiter(Arc::new(RateLimiter::direct(quota)));
        info!(
            "Rate limiting enabled ({} requests per {} seconds)",
            rate_limit_requests, rate_limit_period_secs
        );
    } else {
        info!("Rate limiting disabled");
    }

    // CORS: comma-separated origin allowlist
    let cors_origins = std::env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string());
    let origins: Vec<HeaderValue> = cors_origins
        .split(',')
        .filter_map(|o| o.trim().parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static(nocturne_api::auth::CALLER_ID_HEADER),
        ])
        .allow_credentials(true);

    let service = app(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, service).await?;
    Ok(())
}
