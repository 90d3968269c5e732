use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use price_estimator::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Logging settings come from the config file when it loads; commands
    // report their own config errors afterwards
    let (log_level, log_format) = config::load_config(&args.config)
        .map(|cfg| (cfg.server.log_level, cfg.server.log_format))
        .unwrap_or_else(|_| ("info".to_string(), "text".to_string()));
    init_tracing(&log_level, &log_format);

    match args.get_command() {
        cli::Commands::Start => {
            commands::start::execute(&args.config).await?;
        }
        cli::Commands::Estimate {
            label,
            confidence,
            condition,
            json,
        } => {
            commands::estimate::execute(&args.config, &label, &confidence, &condition, json)?;
        }
        cli::Commands::Appraise {
            files,
            condition,
            api_url,
        } => {
            commands::appraise::execute(&args.config, files, &condition, api_url).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("Price Estimator v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
