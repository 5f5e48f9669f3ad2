//! Example consumer: a separate Rust project that serves resource-dispatch with demo resources.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Then e.g. `curl -X POST 'http://127.0.0.1:3000/api/v1/resource?resourceDir=shop&resourceName=order' -d '{"Name":"widget","Qty":2}'`

mod resources;

use resource_dispatch::{app, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("resource_dispatch=info,example_consumer=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let registry = resources::demo_registry();
    tracing::info!(resources = ?registry.paths(), "registered resources");

    let router = app(AppState::new(registry), &config);
    let listener = TcpListener::bind(config.bind_addr).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("Example consumer listening on http://127.0.0.1:{}{}/resource", port, config.api_prefix);
    axum::serve(listener, router).await?;
    Ok(())
}
