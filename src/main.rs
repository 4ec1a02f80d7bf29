use clap::Parser;
use recipebox::{
    api::{handlers::AppState, routes},
    cli::{commands, Cli, Commands},
    config::Settings,
    db,
    provider::SearchClient,
    service::RecipeService,
    Error, Result,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipebox=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Init => {
            open_store(&settings).await?;
            println!("\u{2713} Recipes table ready");
        }
        Commands::List => {
            let pool = open_store(&settings).await?;
            commands::list(&pool).await?;
        }
        Commands::Search { query } => {
            let client = SearchClient::new(settings.provider.clone())?;
            commands::search(&client, &query).await?;
        }
        Commands::Import { query } => {
            let pool = open_store(&settings).await?;
            let client = SearchClient::new(settings.provider.clone())?;
            let service = RecipeService::new(pool, client);
            commands::import(&service, &query).await?;
        }
    }

    Ok(())
}

/// Connect to the database and make sure the recipes table exists.
/// Any failure here is fatal.
async fn open_store(settings: &Settings) -> Result<db::DbPool> {
    let pool = db::init_pool_with_config(&settings.database).await?;
    db::init_schema(&pool).await?;
    Ok(pool)
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Recipebox server");
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let pool = open_store(&settings).await?;
    info!(
        "Database ready (max_connections: {}, min_connections: {})",
        settings.database.max_connections, settings.database.min_connections
    );

    if !settings.provider.has_credentials() {
        warn!("API_ID or API_KEY not set - online recipe search will be rejected by the provider");
    }

    let client = SearchClient::new(settings.provider.clone())?;
    info!(
        "Recipe provider: {} (timeout {}s)",
        settings.provider.api_url, settings.provider.timeout_seconds
    );

    let state = AppState {
        service: RecipeService::new(pool.clone(), client),
        pool,
        settings: settings.clone(),
    };

    let app = routes::create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
