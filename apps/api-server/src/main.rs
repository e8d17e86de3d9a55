//! # Ripple API Server
//!
//! The main entry point: the Actix-web HTTP server hosting the REST and
//! GraphQL surfaces, plus the socket.io listener for feed subscribers.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod graphql;
mod handlers;
mod middleware;
mod realtime;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Ripple API server on {}:{}",
        config.host,
        config.port
    );

    // Build application state and the GraphQL schema over it
    let state = AppState::new(&config).await;
    let schema = graphql::build_schema(state.auth.clone(), state.feed.clone());

    // Feed subscribers connect on a dedicated socket.io port
    let broadcaster = state.broadcaster.clone();
    let realtime_port = config.realtime_port;
    tokio::spawn(async move {
        if let Err(err) = realtime::serve(realtime_port, broadcaster).await {
            tracing::error!(error = %err, "realtime listener failed");
        }
    });

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .route("/graphql", web::post().to(graphql::graphql_handler))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,ripple_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
