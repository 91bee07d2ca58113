//! CampusTalk daemon — entry point for running a board instance.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use campustalk_engine::{init_logging, Actor, BoardConfig, BoardEngine, LogFormat};
use campustalk_rpc::{AppState, BoardServer, StaticTokenProvider};
use campustalk_store_memory::MemoryStore;
use campustalk_types::Timestamp;

#[derive(Parser)]
#[command(name = "campustalk-daemon", about = "CampusTalk anonymous board daemon")]
struct Cli {
    /// Port for the HTTP API.
    #[arg(long, env = "CAMPUSTALK_HTTP_PORT")]
    http_port: Option<u16>,

    /// Fingerprint pepper. Must be set for any non-development instance.
    #[arg(long, env = "CAMPUSTALK_PEPPER", hide_env_values = true)]
    pepper: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CAMPUSTALK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CAMPUSTALK_LOG_FORMAT")]
    log_format: Option<String>,

    /// Attach a permissive CORS layer (development only).
    #[arg(long, env = "CAMPUSTALK_PERMISSIVE_CORS")]
    permissive_cors: bool,

    /// Static bearer tokens, comma-separated "token:account" or
    /// "token:account:mod" entries. Stand-in for a real identity provider.
    #[arg(long, env = "CAMPUSTALK_TOKENS", value_delimiter = ',', hide_env_values = true)]
    tokens: Vec<String>,

    /// Seed a demo post and poll on startup (development).
    #[arg(long, env = "CAMPUSTALK_SEED_DEMO")]
    seed_demo: bool,

    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// How the base configuration was obtained. Logging is not up yet while
/// the config (which carries the log settings) loads, so the outcome is
/// reported in `main` after `init_logging`.
enum ConfigSource {
    Defaults,
    File(PathBuf),
    FileError(PathBuf, String),
}

fn load_config(cli: &Cli) -> (BoardConfig, ConfigSource) {
    let (mut config, source) = match &cli.config {
        Some(path) => match BoardConfig::from_toml_file(&path.display().to_string()) {
            Ok(cfg) => (cfg, ConfigSource::File(path.clone())),
            Err(e) => (
                BoardConfig::default(),
                ConfigSource::FileError(path.clone(), e.to_string()),
            ),
        },
        None => (BoardConfig::default(), ConfigSource::Defaults),
    };

    if let Some(port) = cli.http_port {
        config.http_port = port;
    }
    if let Some(pepper) = &cli.pepper {
        config.pepper = pepper.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    if cli.permissive_cors {
        config.permissive_cors = true;
    }
    (config, source)
}

fn token_provider(entries: &[String]) -> StaticTokenProvider {
    let mut provider = StaticTokenProvider::new();
    for entry in entries {
        let mut parts = entry.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(token), Some(account), role) if !token.is_empty() && !account.is_empty() => {
                let moderator = role == Some("mod");
                provider = provider.with_token(token, account, moderator);
            }
            _ => tracing::warn!("ignoring malformed token entry"),
        }
    }
    provider
}

fn seed_demo_content(engine: &BoardEngine<MemoryStore>) -> anyhow::Result<()> {
    let seeder = Actor::guest("127.0.0.1", "campustalk-seed");
    let now = Timestamp::now();
    engine.create_post(
        &seeder,
        "welcome to the board, say something real",
        "Appreciation",
        now,
    )?;
    engine.create_poll(
        &seeder,
        "should quiet hours start earlier?",
        &["yes".to_string(), "no".to_string()],
        None,
        now,
    )?;
    tracing::info!("seeded demo post and poll");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_source) = load_config(&cli);

    init_logging(LogFormat::parse(&config.log_format), &config.log_level);

    match config_source {
        ConfigSource::Defaults => {}
        ConfigSource::File(path) => tracing::info!("loaded config from {}", path.display()),
        ConfigSource::FileError(path, e) => {
            tracing::warn!("failed to load config {}: {e}, using defaults", path.display())
        }
    }

    if config.pepper == BoardConfig::default().pepper {
        tracing::warn!("running with the development fallback pepper; set CAMPUSTALK_PEPPER");
    }

    let store = Arc::new(MemoryStore::new());
    let engine = Arc::new(BoardEngine::new(
        store,
        config.pepper(),
        config.params.clone(),
    ));
    if cli.seed_demo {
        seed_demo_content(&engine)?;
    }

    let identity = Arc::new(token_provider(&cli.tokens));
    let state = AppState::new(engine, identity);

    tracing::info!(
        port = config.http_port,
        cors = config.permissive_cors,
        "starting CampusTalk board"
    );
    let server = BoardServer::new(config.http_port, config.permissive_cors);
    server.start(state).await?;

    tracing::info!("CampusTalk daemon exited cleanly");
    Ok(())
}
