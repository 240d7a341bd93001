use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use code_runner_server::{
    config::Config, create_app, database::Database, handlers::AppState,
    services::remote_compiler::RemoteCompiler,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let database = Database::connect_lazy(&config.database_url)?;
    database
        .ensure_connected(5, Duration::from_secs(2))
        .await?;
    database.migrate().await?;
    info!("connected to database");

    let compiler = RemoteCompiler::new(&config);
    let state = AppState {
        database,
        compiler,
        config: config.clone(),
    };

    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("code runner server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
