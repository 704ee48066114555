use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use configuration::Settings;
use database::{DbRepository, FacilityStore};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
// Note: Tracing is initialized by the binary, not here.

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub store: Box<dyn FacilityStore>,
}

impl AppState {
    pub fn new(store: impl FacilityStore + 'static) -> Self {
        Self { store: Box::new(store) }
    }
}

/// Builds the application routes around an already-constructed store.
pub fn router(state: AppState) -> Router {
    // The data is public and read-mostly; any origin may query it.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    let facilities = get(handlers::list_facilities).post(handlers::create_facility);
    let facility = get(handlers::get_facility).delete(handlers::delete_facility);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/facilities/", facilities.clone())
        .route("/facilities", facilities)
        .route("/facilities/:uid", facility)
        .with_state(Arc::new(state))
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024)) // Facility bodies are tiny; cap at 1MB
}

/// The main function to configure and run the web server.
///
/// Connects to Postgres, applies migrations, then serves until Ctrl-C.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let db_pool = database::connect(&settings.database_url).await?;
    database::run_migrations(&db_pool).await?;
    let app = router(AppState::new(DbRepository::new(db_pool)));

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
