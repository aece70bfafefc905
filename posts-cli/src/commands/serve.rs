//! HTTP server command for the posts API

use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};

use posts_server::db::{create_pool_with_options, pool::DEFAULT_MAX_CONNECTIONS};
use posts_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = posts_server::http::server::DEFAULT_PORT)]
    pub port: u16,

    /// Database URL (falls back to CONNECTION_STRING)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Origins allowed for cross-origin requests (comma-separated; empty allows any)
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .or_else(|| std::env::var("CONNECTION_STRING").ok())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL or CONNECTION_STRING env, or .env")?;

    let bind_addr = SocketAddr::new(args.host, args.port);
    tracing::info!("Starting posts server on {}", bind_addr);

    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    let config = ServerConfig {
        bind_addr,
        allowed_origins: args
            .allowed_origins
            .into_iter()
            .map(|origin| origin.trim().to_owned())
            .filter(|origin| !origin.is_empty())
            .collect(),
    };

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
