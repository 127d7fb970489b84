use anyhow::Context;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use student_records::{api, config, logging, records::RecordService};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(
    name = "student-records",
    about = "In-memory HTTP service for student records"
)]
struct Cli {
    /// Address to bind (overrides SERVER_HOST).
    #[arg(long)]
    host: Option<IpAddr>,
    /// Port to listen on (overrides SERVER_PORT).
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    logging::init_tracing();
    let config = config::init_config().context("Failed to load configuration")?;

    let addr = SocketAddr::new(
        cli.host.unwrap_or(config.server_host),
        cli.port.unwrap_or(config.server_port),
    );
    let app = api::create_router(Arc::new(RecordService::new()));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    tracing::info!(path = api::DOCS_PATH, "API documentation available");
    axum::serve(listener, app).await.context("Server terminated")?;
    Ok(())
}
