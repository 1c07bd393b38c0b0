//! VaultGraph Server CLI

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vaultgraph::VaultGraphMcpServer;
use vaultgraph_core::{ConfigProfile, ServerConfig, VaultConfig, expand_vault_path};

/// VaultGraph Server - link analysis and Kanban boards for Obsidian vaults
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the Obsidian vault directory
    #[arg(short, long, env = "OBSIDIAN_VAULT_PATH")]
    vault: Option<PathBuf>,

    /// Configuration profile to use (development, production, read-only, minimal)
    #[arg(short, long, default_value = "development")]
    profile: String,

    /// YAML configuration file; replaces the profile's settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transport mode (stdio, http, websocket, tcp, unix)
    #[arg(short, long, default_value = "stdio")]
    transport: String,

    /// Port for network transports
    #[arg(long, default_value = "3000")]
    port: u16,
}

async fn load_config(args: &Args) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path).await?,
        None => args.profile.parse::<ConfigProfile>()?.create_config(),
    };

    if let Some(vault_path) = &args.vault {
        let vault_path = expand_vault_path(vault_path)?;
        for vault in &mut config.vaults {
            vault.is_default = false;
        }
        let vault = VaultConfig::builder("default", vault_path)
            .as_default()
            .build()?;
        config.vaults.retain(|v| v.name != vault.name);
        config.vaults.insert(0, vault);
    }

    Ok(config)
}

/// STDIO: structured JSON logs on stderr, stdout carries the protocol.
/// Other transports: human-readable logs.
fn init_logging(transport: &str, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    if transport == "stdio" {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.to_ascii_lowercase()));
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| format!("Failed to initialize logger: {}", e))?;
    } else {
        use simple_logger::SimpleLogger;

        SimpleLogger::new()
            .with_level(level.parse().unwrap_or(log::LevelFilter::Info))
            .with_utc_timestamps()
            .init()
            .map_err(|e| format!("Failed to initialize logger: {}", e))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args).await?;

    init_logging(&args.transport, &config.log_level)?;

    log::info!("VaultGraph MCP Server v{}", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Transport: {} | Profile: {}",
        args.transport,
        config.profile
    );

    let server = VaultGraphMcpServer::new(config)
        .map_err(|e| format!("Failed to create MCP server: {}", e))?;

    match server.default_manager() {
        Some(manager) => log::info!(
            "Vault registered: {} -> {}",
            manager.vault_name(),
            manager.vault_path().display()
        ),
        None => log::info!("No vault configured. Tools need a vault_path argument."),
    }

    match args.transport.as_str() {
        "stdio" => {
            log::info!("Running in STDIO mode for MCP protocol");
            server.run_stdio().await?;
        }
        #[cfg(feature = "http")]
        "http" => {
            let addr = format!("127.0.0.1:{}", args.port);
            log::info!("Running HTTP server on {}", addr);
            server.run_http(&addr).await?;
        }
        #[cfg(feature = "websocket")]
        "websocket" => {
            let addr = format!("127.0.0.1:{}", args.port);
            log::info!("Running WebSocket server on {}", addr);
            server.run_websocket(&addr).await?;
        }
        #[cfg(feature = "tcp")]
        "tcp" => {
            let addr = format!("127.0.0.1:{}", args.port);
            log::info!("Running TCP server on {}", addr);
            server.run_tcp(&addr).await?;
        }
        #[cfg(feature = "unix")]
        "unix" => {
            let socket_path = "/tmp/vaultgraph.sock".to_string();
            log::info!("Running Unix socket server on {}", socket_path);
            server.run_unix(&socket_path).await?;
        }
        transport => {
            let known = ["http", "websocket", "tcp", "unix"];
            if known.contains(&transport) {
                return Err(format!(
                    "{} transport not enabled. Rebuild with --features {}",
                    transport, transport
                )
                .into());
            }
            return Err(format!(
                "Unknown transport '{}'. Valid options: stdio{}{}{}{}",
                transport,
                if cfg!(feature = "http") { ", http" } else { "" },
                if cfg!(feature = "websocket") { ", websocket" } else { "" },
                if cfg!(feature = "tcp") { ", tcp" } else { "" },
                if cfg!(feature = "unix") { ", unix" } else { "" },
            )
            .into());
        }
    }

    Ok(())
}
