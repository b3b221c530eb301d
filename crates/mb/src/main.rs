mod config;
mod seed;

use clap::{Parser, Subcommand};
use config::Config;
use mb_chat::Chatbot;
use mb_core::MonBondhu;
use mb_db::{DbStore, schema};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

#[derive(Parser)]
#[command(name = "mon-bondhu", version, about = "Community health support API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API until interrupted.
    Serve {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the OpenAPI document.
    Openapi,
    /// Insert sample health centers, tips, workers and events.
    Seed {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve { config } => {
            init_tracing();
            serve(config.as_deref()).await
        }
        Command::Openapi => {
            println!("{}", mb_serve::openapi::generate_spec());
            Ok(())
        }
        Command::Seed { config } => {
            init_tracing();
            run_seed(config.as_deref())
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(config_path: Option<&Path>) -> Result<(), String> {
    let config = Config::load(config_path).map_err(|err| err.to_string())?;
    open_database(&config.db_path)?;
    let chatbot = Chatbot::new(config.chat()).map_err(|err| err.to_string())?;
    if !chatbot.is_configured() {
        info!("no OpenAI key configured, chatbot answers from the fallback table");
    }
    let state = mb_serve::AppState {
        db_path: config.db_path.clone(),
        environment: config.environment,
        calendar: config.calendar,
        chatbot: Arc::new(chatbot),
    };
    info!(environment = %config.environment, calendar = %config.calendar, db_path = %config.db_path.display(), "starting");
    mb_serve::serve(state, config.addr(), shutdown_signal())
        .await
        .map_err(|err| format!("serve error: {err}"))
}

fn run_seed(config_path: Option<&Path>) -> Result<(), String> {
    let config = Config::load(config_path).map_err(|err| err.to_string())?;
    let conn = open_database(&config.db_path)?;
    let core = MonBondhu::with_calendar(DbStore::new(conn), config.calendar);
    match seed::seed(&core, config.calendar.today()).map_err(|err| err.to_string())? {
        Some(report) => println!(
            "seeded {} health centers, {} health tips, {} workers, {} events",
            report.health_centers, report.health_tips, report.workers, report.events
        ),
        None => println!("directory already populated, nothing to do"),
    }
    Ok(())
}

/// Creates the parent directory and applies migrations up front so that
/// start-up fails loudly on a bad path.
fn open_database(path: &Path) -> Result<rusqlite::Connection, String> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create {}: {err}", parent.display()))?;
    }
    schema::open_and_migrate(path)
        .map_err(|err| format!("failed to open database {}: {err}", path.display()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
        info!("received ctrl-c, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
