/**
 * daylog Server Entry Point
 *
 * Starts the HTTP server for daily collaborative workspace logs, along with
 * the background archival and orphan-sweep tasks.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = daylog::backend::server::ServerConfig::from_env()?;
    let app = daylog::backend::server::create_app(&config).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    let realtime = app.state.realtime.clone();
    realtime.mark_up();
    let served = axum::serve(listener, app.router).await;
    realtime.mark_down();
    served?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin daylog-server --features ssr");
    std::process::exit(1);
}
