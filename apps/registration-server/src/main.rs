use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use user_registration::config::UserRegistrationConfig;
use user_registration::infra::db::{self, ConnectOpts};
use user_registration::UserRegistration;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MODULE_NAME: &str = "user_registration";
const MOCK_DSN: &str = "sqlite::memory:";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok(MOCK_DSN.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create database dir '{}'", dir.display()))?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Check that the DSN names a backend this server can open.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" => Ok("sqlite"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// User Registration Server - registers users, tracks their status and reports statistics
#[derive(Parser)]
#[command(name = "registration-server")]
#[command(about = "User Registration Server - registration, status tracking and statistics")]
#[command(version)]
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

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("User Registration Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

/// Final DSN to connect to: `--mock` wins, relative sqlite paths resolve under home_dir.
fn resolve_dsn(db_config: &DatabaseConfig, args: &CliArgs, base_dir: &Path) -> Result<String> {
    if args.mock {
        return Ok(MOCK_DSN.to_string());
    }
    detect_from_dsn(db_config)?;
    let dsn = db_config.url.trim();
    if dsn.starts_with("sqlite://") {
        absolutize_sqlite_dsn(dsn, base_dir, true)
    } else {
        Ok(dsn.to_string())
    }
}

fn database_config(config: &AppConfig) -> DatabaseConfig {
    config.database.clone().unwrap_or_else(|| {
        tracing::warn!("No database configuration found, using defaults");
        DatabaseConfig::default()
    })
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let module_cfg: UserRegistrationConfig = config.module_config(MODULE_NAME)?;

    let base_dir = PathBuf::from(&config.server.home_dir);
    let db_config = database_config(&config);
    let dsn = resolve_dsn(&db_config, &args, &base_dir)?;

    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms))),
    };

    tracing::info!("Connecting to database: {}", dsn);
    let conn = db::connect(&dsn, &connect_opts).await?;

    let module = UserRegistration::init(conn, module_cfg).await?;
    let router = module.router();

    let bind = format!("{}:{}", config.server.host, config.server.port);
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| anyhow!("Invalid bind address '{}': {}", bind, e))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = async {
        if let Err(e) = wait_for_shutdown().await {
            tracing::warn!("shutdown: signal waiter failed ({e}); falling back to ctrl_c()");
            let _ = tokio::signal::ctrl_c().await;
        }
        tracing::info!("HTTP server shutting down gracefully");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow!(e))?;

    tracing::info!("Server stopped");
    Ok(())
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let _: UserRegistrationConfig = config.module_config(MODULE_NAME)?;
    if !args.mock {
        detect_from_dsn(&database_config(&config))?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsn_is_kept() {
        let base = Path::new("/srv/app");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite::memory:", base, false).unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://:memory:", base, false).unwrap(),
            "sqlite::memory:"
        );
    }

    #[test]
    fn relative_path_resolves_under_base() {
        let base = Path::new("/srv/app");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://database/users.db?cache=shared", base, false).unwrap(),
            "sqlite:///srv/app/database/users.db?cache=shared"
        );
    }

    #[test]
    fn absolute_path_is_unchanged() {
        let base = Path::new("/srv/app");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite:///var/lib/users.db", base, false).unwrap(),
            "sqlite:///var/lib/users.db"
        );
    }

    #[test]
    fn bad_dsns_are_rejected() {
        let base = Path::new("/srv/app");
        assert!(absolutize_sqlite_dsn("postgres://x/y", base, false).is_err());
        assert!(absolutize_sqlite_dsn("sqlite://", base, false).is_err());
    }

    #[test]
    fn only_sqlite_backends_are_supported() {
        let cfg = |url: &str| DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        };
        assert_eq!(detect_from_dsn(&cfg("sqlite://db/users.db")).unwrap(), "sqlite");
        assert!(detect_from_dsn(&cfg("postgresql://localhost/db")).is_err());
        assert!(detect_from_dsn(&cfg("")).is_err());
    }

    #[test]
    fn mock_overrides_configured_dsn() {
        let args = CliArgs {
            mock: true,
            ..Default::default()
        };
        let cfg = DatabaseConfig {
            url: "postgresql://localhost/nonexistent".to_string(),
            ..Default::default()
        };
        assert_eq!(
            resolve_dsn(&cfg, &args, Path::new("/srv/app")).unwrap(),
            MOCK_DSN
        );
    }
}
