//! REST API server for webtop automation
//!
//! The HTTP counterpart of the MCP stdio server: the same webtop bridge
//! (browser session, mouse/keyboard injection, desktop capture) behind a
//! versioned JSON API.

mod error;
mod routes;
mod state;

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use webtop_protocol::DEFAULT_WEBTOP_URL;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "webtop-rest-server", about = "REST API for webtop automation")]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Webtop URL opened by the initialize route
    #[arg(long, env = "WEBTOP_URL", default_value = DEFAULT_WEBTOP_URL)]
    webtop_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    let app = routes::router(AppState::new(args.webtop_url.clone()));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Webtop REST server listening on {}", addr);
    info!("Webtop URL configured: {}", args.webtop_url);
    axum::serve(listener, app).await?;

    Ok(())
}
