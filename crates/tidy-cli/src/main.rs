use clap::Parser;
use owo_colors::{OwoColorize, Style};
use std::sync::Arc;
use tidy_core::app::{Tidy, TidyOptions};
use tidy_core::error::CoreError;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod util;
mod views;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TIDY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = config::Config::new().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid configuration, using defaults");
        config::Config::default()
    });

    let options = TidyOptions {
        filter_debounce: config.filter_debounce(),
        fetch_policy: config.fetch_policy(),
        config_source: Some(Arc::new(config::FileConfigSource::new(config.flags_path()))),
    };
    let tidy = match Tidy::open_sqlite(&config.database_path, options).await {
        Ok(tidy) => tidy,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&tidy, command).await,
        cli::Commands::List(command) => commands::list::list_tasks(&tidy, command).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&tidy, command).await,
        cli::Commands::Toggle(command) => commands::toggle::toggle_task(&tidy, command).await,
        cli::Commands::Delete(command) => commands::delete::delete_task(&tidy, command).await,
        cli::Commands::ClearCompleted(command) => {
            commands::clear_completed::clear_completed(&tidy, command).await
        }
        cli::Commands::Stats => commands::stats::show_stats(&tidy),
        cli::Commands::Category(command) => {
            commands::category::category_command(&tidy, command).await
        }
        cli::Commands::Flags(command) => commands::flags::flags_command(&tidy, command).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(tasks) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in tasks {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::Validation(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::ProtectedEntity(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s.yellow());
            }
            e if e.is_persistence() => {
                eprintln!(
                    "{} Could not save changes: {}",
                    "Error:".style(error_style),
                    e
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
