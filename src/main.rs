use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use zenwealth::args::{Args, Command};
use zenwealth::commands::{self, StdinConfirm};
use zenwealth::{Config, ErrorType, Result};

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().zenwealth_home().path();
    let format = args.common().format();
    let mut confirm = StdinConfirm;

    // Route to appropriate command handler
    match args.command() {
        Command::Init => commands::init(home)?.print(format),

        Command::Add(add_args) => {
            commands::insert_transaction(load(home)?, add_args.clone())?.print(format)
        }

        Command::Delete(delete_args) => {
            commands::delete_transaction(load(home)?, delete_args.clone(), &mut confirm)?
                .print(format)
        }

        Command::List(list_args) => {
            commands::list(load(home)?, list_args.clone())?.print(format)
        }

        Command::Summary => commands::summary(load(home)?)?.print(format),

        Command::Insights => commands::insights(load(home)?)?.print(format),

        Command::Breakdown(breakdown_args) => {
            commands::breakdown(load(home)?, breakdown_args.clone())?.print(format)
        }

        Command::Categories(categories_args) => {
            commands::categories(categories_args.clone())?.print(format)
        }

        Command::Export(export_args) => {
            commands::export(load(home)?, export_args.clone())?.print(format)
        }

        Command::Import(import_args) => {
            commands::import(load(home)?, import_args.clone())?.print(format)
        }

        Command::Clear(clear_args) => {
            commands::clear(load(home)?, clear_args.clone(), &mut confirm)?.print(format)
        }

        Command::Schema => commands::schema()?.print(format),
    }
}

/// Loads the config from `home`, tagging any failure as a configuration error.
fn load(home: &Path) -> Result<Config> {
    Config::load(home).context(ErrorType::Config)
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
