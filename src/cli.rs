use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "price-estimator", version, about = "Photo-based item price estimator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the estimator server (default)
    Start,

    /// Price a classifier label directly
    Estimate {
        /// Classifier label, e.g. sports_car
        #[arg(short, long)]
        label: String,

        /// Classifier confidence in [0, 1]
        #[arg(short = 'p', long)]
        confidence: String,

        /// Item condition: New, Used or "Heavily Used"
        #[arg(short = 'n', long, default_value = "New")]
        condition: String,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send images to the classifier and print their price breakdowns
    Appraise {
        /// Image files (jpg, jpeg, png, webp)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Item condition: New, Used or "Heavily Used"
        #[arg(short = 'n', long, default_value = "New")]
        condition: String,

        /// Classifier base URL (overrides config)
        #[arg(long, env = "PRICE_ESTIMATOR_API_URL")]
        api_url: Option<String>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_start() {
        let cli = Cli {
            config: PathBuf::from("config.toml"),
            command: None,
        };

        assert!(matches!(cli.get_command(), Commands::Start));
    }

    #[test]
    fn test_cli_parsing_estimate() {
        let args = vec![
            "price-estimator",
            "estimate",
            "--label",
            "sports_car",
            "--confidence",
            "0.95",
            "--condition",
            "Heavily Used",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Estimate {
                label,
                confidence,
                condition,
                json,
            } => {
                assert_eq!(label, "sports_car");
                assert_eq!(confidence, "0.95");
                assert_eq!(condition, "Heavily Used");
                assert!(!json);
            }
            _ => panic!("Expected Estimate command"),
        }
    }

    #[test]
    fn test_cli_parsing_appraise_requires_files() {
        let result = Cli::try_parse_from(vec!["price-estimator", "appraise"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(vec![
            "price-estimator",
            "appraise",
            "car.jpg",
            "watch.png",
            "--api-url",
            "http://localhost:9000",
        ])
        .unwrap();

        match cli.get_command() {
            Commands::Appraise { files, condition, api_url } => {
                assert_eq!(files.len(), 2);
                assert_eq!(condition, "New");
                assert_eq!(api_url.as_deref(), Some("http://localhost:9000"));
            }
            _ => panic!("Expected Appraise command"),
        }
    }

    #[test]
    fn test_cli_parsing_config_show() {
        let cli = Cli::try_parse_from(vec!["price-estimator", "--config", "custom.toml", "config", "show"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(
            cli.get_command(),
            Commands::Config {
                action: ConfigCommands::Show
            }
        ));
    }
}
