use anyhow::{Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use ticketing::{Ticketing, TicketingConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Ticketing Server - event listings and ticket bookings over HTTP
#[derive(Parser)]
#[command(name = "ticketing-server")]
#[command(about = "Ticketing Server - event listings and ticket bookings over HTTP")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration and seed data
    Check,
}

/// Everything the server needs, built from configuration.
struct App {
    ingress: ApiIngress,
    ticketing: Ticketing,
    addr: SocketAddr,
}

impl App {
    fn from_config(config: &AppConfig) -> Result<Self> {
        let ingress_cfg: ApiIngressConfig = config.module_config("api_ingress")?;
        let ticketing_cfg: TicketingConfig = config.module_config("ticketing")?;

        Ok(Self {
            ingress: ApiIngress::new(ingress_cfg),
            ticketing: Ticketing::from_config(&ticketing_cfg)?,
            addr: config.server.bind_addr()?,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Ticketing Server starting");

    // Print config and exit if requested
    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");
    let app = App::from_config(&config)?;

    let router = app.ingress.build_router(app.ticketing.router());
    let listener = TcpListener::bind(app.addr)
        .await
        .with_context(|| format!("Failed to bind {}", app.addr))?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match runtime::shutdown::wait_for_shutdown().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                on_signal.cancel();
            }
            Err(e) => tracing::error!("Failed to install signal handlers: {}", e),
        }
    });

    app.ingress.serve(listener, router, cancel).await?;
    tracing::info!("Ticketing Server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let app = App::from_config(&config)?;
    tracing::info!("Configuration is valid");

    println!("Configuration check passed");
    println!("Listen address: {}", app.addr);
    println!("Events: {}", app.ticketing.service().list_events().len());
    println!("{}", config.to_yaml()?);

    Ok(())
}
