// # seedd - DDNS Cache Seeding Daemon
//
// Thin integration layer around seed-core. No seeding or cache logic
// lives here, only wiring:
// 1. Reading configuration
// 2. Initializing tracing and the runtime
// 3. Building the cache store, resolver, and provider registry
// 4. Running the seeding pass and reacting to signals
//
// ## Configuration
//
// - `SEEDD_CONFIG`: path to a JSON configuration document (required)
// - `SEEDD_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Signals
//
// - SIGHUP: run the seeding pass again (runtime reload)
// - SIGTERM / SIGINT: clean shutdown
//
// ## Example
//
// ```bash
// cat > /etc/seedd.json <<'EOF'
// {
//   "state_dir": "/var/lib/ddns-seed",
//   "legacy_cache_file": "/var/lib/ddns-seed/ddns.cache",
//   "providers": [
//     { "kind": "dyndns2", "aliases": [{ "name": "home.example.net" }] },
//     { "kind": "tunnelbroker", "aliases": [{ "name": "tunnel.example.net" }] }
//   ]
// }
// EOF
//
// export SEEDD_CONFIG=/etc/seedd.json
// seedd
// ```

use anyhow::{Context, Result};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use seed_core::{
    FileCacheStore, HickoryResolver, ProviderAliases, ProviderRegistry, SeedConfig, Seeder,
};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum SeeddExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<SeeddExitCode> for ExitCode {
    fn from(code: SeeddExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Load and validate the configuration named by SEEDD_CONFIG
fn load_config() -> Result<SeedConfig> {
    let path = env::var("SEEDD_CONFIG").context(
        "SEEDD_CONFIG is required. Set it via: export SEEDD_CONFIG=/etc/seedd.json",
    )?;

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read configuration file {path}"))?;

    let config: SeedConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse configuration file {path}"))?;

    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    // Initialize tracing
    let log_level = match env::var("SEEDD_LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            eprintln!("Unknown SEEDD_LOG_LEVEL '{other}', using info");
            Level::INFO
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return SeeddExitCode::ConfigError.into();
    }

    // Load configuration
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e:#}");
            return SeeddExitCode::ConfigError.into();
        }
    };

    info!("Starting seedd");
    info!("Configuration loaded: {} provider(s)", config.providers.len());

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return SeeddExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run_daemon(config).await {
            Ok(()) => {
                info!("Shutting down");
                SeeddExitCode::CleanShutdown
            }
            Err(e) => {
                error!("Daemon error: {e:#}");
                SeeddExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Run the daemon
async fn run_daemon(config: SeedConfig) -> Result<()> {
    tokio::fs::create_dir_all(&config.state_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create state directory {}",
                config.state_dir.display()
            )
        })?;

    let registry = ProviderRegistry::with_builtins();
    let mut plan = config.plan(&registry)?;

    let mut store = FileCacheStore::new(&config.state_dir);
    if let Some(path) = &config.legacy_cache_file {
        store = store.with_legacy_file(path);
    }

    let resolver = HickoryResolver::from_system_conf()?;
    let seeder = Seeder::new(Box::new(store), Box::new(resolver));

    seeder.seed_all(&mut plan).await?;
    log_seeded_state(&plan);

    wait_for_signals(&seeder, &mut plan).await
}

/// Log the outcome of a seeding pass, one line per alias
fn log_seeded_state(plan: &[ProviderAliases]) {
    for provider in plan {
        for alias in &provider.aliases {
            match (alias.address(), alias.last_update()) {
                (Some(address), Some(ts)) => {
                    info!("{}: {} (last update {})", alias.name(), address, ts.to_rfc3339())
                }
                (Some(address), None) => {
                    info!("{}: {} (no known last update)", alias.name(), address)
                }
                _ => info!("{}: unseeded", alias.name()),
            }
        }
    }
}

/// Wait for signals: re-seed on SIGHUP, return on SIGTERM/SIGINT
#[cfg(unix)]
async fn wait_for_signals(seeder: &Seeder, plan: &mut Vec<ProviderAliases>) -> Result<()> {
    let mut sighup =
        signal(SignalKind::hangup()).context("Failed to setup SIGHUP handler")?;
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;

    loop {
        tokio::select! {
            _ = sighup.recv() => {
                info!("SIGHUP received, re-seeding");
                match seeder.seed_all(plan).await {
                    Ok(()) => log_seeded_state(plan),
                    Err(e) => error!("Re-seeding failed: {e}"),
                }
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received");
                break;
            }
            _ = sigint.recv() => {
                info!("SIGINT received");
                break;
            }
        }
    }

    Ok(())
}

/// Fallback implementation for non-Unix platforms: SIGINT only, no reload
#[cfg(not(unix))]
async fn wait_for_signals(_seeder: &Seeder, _plan: &mut Vec<ProviderAliases>) -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for CTRL-C")?;
    info!("Shutdown signal received");
    Ok(())
}
