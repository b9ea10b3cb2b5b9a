use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use log::{debug, info};
use std::process::ExitCode;

use voicecal::calendar::{MonthCursor, MonthView};
use voicecal::cli::{Cli, Commands, ConfigActions};
use voicecal::config::{self, Config};
use voicecal::parser::Interpreter;
use voicecal::render::{render_draft, render_month};
use voicecal::shell::{describe_parse_error, run_shell};
use voicecal::store::InMemoryEventStore;
use voicecal::{format_long, init_logger};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logger(if cli.verbose { "debug" } else { "info" });

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::get_config_path()?,
    };
    debug!("Using config file {:?}", config_path);

    match cli.command {
        Some(Commands::Parse { words, today, json }) => {
            let config = Config::load_from(&config_path)?;
            let interpreter = Interpreter::new(config.interpreter);
            let transcript = words.join(" ");
            let today = today.unwrap_or_else(|| Local::now().date_naive());

            match interpreter.parse_on(&transcript, today) {
                Ok(draft) if json => println!("{}", serde_json::to_string_pretty(&draft)?),
                Ok(draft) => println!("{}", render_draft(&draft)),
                Err(err) => {
                    eprintln!("{}", describe_parse_error(&err));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(Commands::Grid { year, month, today, json }) => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let cursor = MonthCursor::new(
                year.unwrap_or(today.year()),
                month.map_or(today.month0(), |m| m - 1) as i32,
            );
            let view = MonthView::build(cursor, today, today, &InMemoryEventStore::new());
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", render_month(&view));
            }
        }
        Some(Commands::Format { date }) => println!("{}", format_long(date)),
        Some(Commands::Config { action }) => run_config(action, &config_path)?,
        Some(Commands::Shell) | None => {
            let config = Config::load_from(&config_path)?;
            run_shell(&config)?;
            info!("Goodbye");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_config(action: ConfigActions, path: &std::path::Path) -> Result<()> {
    match action {
        ConfigActions::Show => {
            let config = Config::load_from(path)?;
            print!("{}", config.to_toml()?);
        }
        ConfigActions::Path => println!("{}", path.display()),
        ConfigActions::Init => {
            Config::default()
                .save_to(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}

