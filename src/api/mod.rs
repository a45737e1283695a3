use crate::api::{
    auth::{AuthConfig, PgSessionProvider, SessionProvider},
    handlers::{pages, session},
};
use crate::db;
use anyhow::Result;
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Json, Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub mod auth;
pub mod guard;
pub mod handlers;
mod openapi;

pub use openapi::{openapi, ApiDoc};

/// Build the guarded application router.
///
/// Every route, including the 404 fallback, runs behind [`guard::access_guard`].
#[must_use]
pub fn app(provider: Arc<dyn SessionProvider>, config: Arc<AuthConfig>, pool: PgPool) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login))
        .route("/signup", get(pages::signup))
        .route("/get-started", get(pages::get_started))
        .route("/app", get(pages::app))
        .route("/app/*rest", get(pages::app))
        .route("/admin", get(pages::admin))
        .route("/admin/*rest", get(pages::admin))
        .route("/health", get(handlers::health).options(handlers::health))
        .route("/api/auth/get-session", get(session::get_session))
        .route("/api/auth/sign-out", post(session::sign_out))
        .route("/api-docs/openapi.json", get(|| async { Json(openapi()) }))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(provider, guard::access_guard))
        .layer(Extension(config))
        .layer(Extension(pool))
}

/// Start the server
/// # Errors
/// Return error if failed to connect to the database, apply the schema, or start the server
pub async fn new(port: u16, dsn: &str, config: AuthConfig, apply_schema: bool) -> Result<()> {
    let pool = db::connect(dsn).await?;

    if apply_schema {
        db::schema::apply(&pool).await?;
    }

    let config = Arc::new(config);
    let provider: Arc<dyn SessionProvider> =
        Arc::new(PgSessionProvider::new(pool.clone(), config.clone()));

    let app = app(provider, config, pool).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span)),
    );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}
