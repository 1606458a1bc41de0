//! CLI argument definitions using clap
//!
//! Commands:
//! - classboard init --config <path>
//! - classboard serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Classboard - student records, accounts and contact inbox over HTTP
#[derive(Parser, Debug)]
#[command(name = "classboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory, the default admin and empty tables
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./classboard.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./classboard.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_with_port() {
        let cli = Cli::try_parse_from(["classboard", "serve", "--port", "4211"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("./classboard.json"));
                assert_eq!(port, Some(4211));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_custom_config() {
        let cli = Cli::try_parse_from(["classboard", "init", "--config", "/etc/cb.json"]).unwrap();
        assert!(matches!(cli.command, Command::Init { config } if config == PathBuf::from("/etc/cb.json")));
    }
}
