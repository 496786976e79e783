use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use interaction_bot::application::commands::{default_registry, registration_manifest};
use interaction_bot::application::errors::BotError;
use interaction_bot::application::services::InteractionService;
use interaction_bot::infrastructure::adapters::http;
use interaction_bot::infrastructure::config::Config;
use interaction_bot::infrastructure::llm::GroqProvider;
use interaction_bot::infrastructure::roblox::RobloxClient;

#[derive(Parser)]
#[command(name = "interaction-bot")]
#[command(about = "Signed slash-command webhook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactions webhook
    Serve,
    /// Print the command registration payload
    #[command(name = "commands")]
    Manifest,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let result = match cli.command {
        Commands::Serve => load_config(&cli.config, cli.bind).and_then(serve),
        Commands::Manifest => load_config(&cli.config, cli.bind).and_then(print_manifest),
        Commands::Version => {
            println!("interaction-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_target(false).with_env_filter(filter).init();
    }
}

/// File (if present), then environment, then command line
fn load_config(path: &str, bind_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if Path::new(path).exists() {
        Config::load(path)?
    } else {
        tracing::debug!("No config file at {}, using defaults", path);
        Config::default()
    };
    config.apply_env();
    if let Some(bind) = bind_override {
        config.server.bind_address = bind;
    }
    Ok(config)
}

fn serve(config: Config) -> Result<(), BotError> {
    let service = InteractionService::from_config(&config)?;

    tracing::info!(
        name = %config.bot.name,
        application_id = config.discord.application_id.as_deref().unwrap_or("unset"),
        commands = service.dispatcher().registry().len(),
        "Starting interactions webhook"
    );

    let app = http::router(Arc::new(service), config.bot.name.clone());
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(http::serve(&config.server.bind_address, app))?;
    Ok(())
}

fn print_manifest(config: Config) -> Result<(), BotError> {
    let directory = RobloxClient::new(Duration::from_secs(config.roblox.timeout_secs))?;
    let llm = GroqProvider::from_config(&config.llm);
    let registry = default_registry(Arc::new(directory), Arc::new(llm));

    let json = serde_json::to_string_pretty(&registration_manifest(&registry))
        .map_err(|e| BotError::Internal(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let yaml = serde_yaml::to_string(&Config::default())
        .map_err(|e| BotError::Internal(e.to_string()))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
