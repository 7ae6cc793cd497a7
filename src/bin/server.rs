//! HTTP server binary for Sibyl.
//!
//! Usage: `sibyl-server [config.toml]`
//!
//! Loads the given TOML config (or `~/.config/sibyl/config.toml`, or
//! built-in defaults), resolves the Bing API key from the environment,
//! and serves the ask API until Ctrl+C.

use sibyl::{AskServer, SibylConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr. Defaults to info level; override
    // with RUST_LOG for more.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = match std::env::args().nth(1) {
        Some(arg) => SibylConfig::from_file(std::path::Path::new(&arg))?,
        None => {
            let path = SibylConfig::default_config_path();
            if path.exists() {
                SibylConfig::from_file(&path)?
            } else {
                tracing::info!("no config file at {}, using defaults", path.display());
                SibylConfig::default()
            }
        }
    };

    config.retrieval.resolve_bing_key_from_env();
    config.validate()?;

    println!("Sibyl v{}", env!("CARGO_PKG_VERSION"));

    let server = AskServer::start(config).await?;
    println!(
        "\nListening on http://{}. Press Ctrl+C to stop.\n",
        server.addr()
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("received Ctrl+C, shutting down...");
    server.shutdown();

    Ok(())
}
