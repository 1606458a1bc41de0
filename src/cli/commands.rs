//! CLI command implementations
//!
//! `init` prepares a data directory without starting anything.
//! `serve` boots the HTTP server in the foreground.

use std::fs;
use std::path::Path;

use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::auth::{AuthService, InMemorySessionStore, JsonFileUserRepository, SessionConfig};
use crate::config::AppConfig;
use crate::http_server::{AppState, HttpServer};
use crate::students::{
    MARKS_TABLE, MARK_HEADERS, STUDENTS_TABLE, STUDENT_HEADERS, SUBJECTS_TABLE, SUBJECT_HEADERS,
};
use crate::table::{EmptySavePolicy, Table, TableBackend, TextFileBackend};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Run the CLI with parsed arguments
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a specific command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the data directory, the bootstrap admin and header-only tables.
///
/// Existing files are left alone, so running init twice is harmless.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = AppConfig::load_or_default(config_path)?;
    let summary = seed_data_dir(&config)?;
    write_response(summary)
}

fn seed_data_dir(config: &AppConfig) -> CliResult<serde_json::Value> {
    fs::create_dir_all(&config.data_dir).map_err(|e| {
        CliError::io_error(format!(
            "cannot create data directory {}: {}",
            config.data_dir.display(),
            e
        ))
    })?;

    let auth = AuthService::new(
        JsonFileUserRepository::new(config.users_path()),
        InMemorySessionStore::new(),
        SessionConfig {
            ttl: config.session_ttl(),
        },
    );
    let admin_created = auth.ensure_default_admin(&config.admin_username, &config.admin_password)?;

    let tables = TextFileBackend::new(
        &config.data_dir,
        config.delimiter,
        EmptySavePolicy::WriteHeaders,
    );
    let mut created = Vec::new();
    for (name, headers) in [
        (STUDENTS_TABLE, &STUDENT_HEADERS[..]),
        (SUBJECTS_TABLE, &SUBJECT_HEADERS[..]),
        (MARKS_TABLE, &MARK_HEADERS[..]),
    ] {
        if config.data_dir.join(name).exists() {
            continue;
        }
        tables.save(name, &Table::new(headers.iter().copied()))?;
        created.push(name);
    }

    Ok(json!({
        "data_dir": config.data_dir.display().to_string(),
        "admin_created": admin_created,
        "tables_created": created,
    }))
}

/// Boot the HTTP server and block until it shuts down
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    init_tracing();

    let mut config = AppConfig::load_or_default(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    info!(config = %config_path.display(), data_dir = %config.data_dir.display(), "starting classboard");

    let state = AppState::from_config(config)?;
    let server = HttpServer::new(state);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::serve_failed(format!("cannot start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::serve_failed(e.to_string()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
