use anyhow::Result;

use rl_stats::cli::Command;
use rl_stats::services::ExtractRequest;
use rl_stats::{handle_completions, handle_extract, handle_performance, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Extract {
            input,
            output,
            html,
            performance,
            today,
        } => {
            let request = ExtractRequest {
                input: input.clone(),
                output: output.clone(),
                html: *html,
                performance: performance.clone(),
            };
            handle_extract(&request, *today)
        }
        Command::Performance { input } => handle_performance(input),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
