pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod fetchers;
pub mod output;
pub mod services;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use std::path::Path;
use std::sync::Arc;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::extract::{Clock, FixedClock, SystemClock};
use crate::services::{ExtractRequest, ExtractionService};

pub use crate::domain::ExtractionResult;
pub use crate::extract::StatsExtractor;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_extract(request: &ExtractRequest, today: Option<NaiveDate>) -> Result<()> {
    let config = AppConfig::new();
    let service = ExtractionService::new(&config, clock_for(today))?;
    service.run(request)?;
    Ok(())
}

pub fn handle_performance(input: &Path) -> Result<()> {
    let config = AppConfig::new();
    let service = ExtractionService::new(&config, Arc::new(SystemClock))?;
    let performance = service.extract_performance(input)?;
    println!("{}", serde_json::to_string_pretty(&performance)?);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn clock_for(today: Option<NaiveDate>) -> Arc<dyn Clock> {
    match today {
        Some(day) => Arc::new(FixedClock(day)),
        None => Arc::new(SystemClock),
    }
}
