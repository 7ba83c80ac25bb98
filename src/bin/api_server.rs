// src/bin/api_server.rs

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use medchain_gateway::infra::config;
use medchain_gateway::transport;
use medchain_gateway::{FileWallet, MarketplaceService, PostgresDirectory, ProgramClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    // --- Directory Store Initialization ---
    info!("connecting to the directory store");
    let directory = Arc::new(PostgresDirectory::new().await?);

    // --- Service Initialization ---
    let admin_wallet = config::admin_wallet();
    info!("admin wallet: {}", admin_wallet);
    info!("program id: {}", config::solana_program_id());
    let service = Arc::new(MarketplaceService::new(
        Arc::new(ProgramClient),
        directory,
        admin_wallet,
    ));

    let app_state = transport::http::AppState {
        service,
        wallet: Arc::new(FileWallet),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

    let listen_addr = config::listen_addr();
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!("gateway listening on http://{}", listen_addr);
    info!("swagger ui available at http://{}/swagger-ui", listen_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received (Ctrl+C)");
        }
    }

    Ok(())
}
