use axum::{Router, middleware, routing::get};
use tg_web::{
    AppState, GalleryConfig,
    middleware::{request_id::request_id_middleware, security_headers::apply_security_headers},
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = GalleryConfig::from_env()?;

    tg_web::tracing::init_tracing(&config.env);
    tracing::info!(
        environment = ?config.env,
        flickr = ?config.flickr,
        "Configuration loaded"
    );

    let metrics_handle = tg_web::metrics::init_metrics()?;

    let state = AppState::new(&config)?;

    // Fill the fixed topic slots in the background; the listener comes up immediately
    let startup_fetches = state.gallery.start();
    tracing::info!(count = startup_fetches.len(), "Startup fetches dispatched");

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(tg_web::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = tg_web::router::router()
        .merge(metrics_app)
        .with_state(state)
        .layer(trace_layer)
        .layer(middleware::from_fn(tg_web::metrics::track_metrics))
        .layer(middleware::from_fn(request_id_middleware));
    let app = apply_security_headers(app, config.env);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutting down");
}
