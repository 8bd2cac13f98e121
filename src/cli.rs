use clap::{Parser, Subcommand};
use std::path::PathBuf;
use anyhow::Result;

use actiongraph::core::Engine;

#[derive(Parser)]
#[command(name = "actiongraph")]
#[command(about = "Static call graph extraction for action-oriented Java projects")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a source tree and write the call graph JSON
    Analyze {
        /// Root of the Java source tree
        path: PathBuf,

        /// Newline-delimited list of method names to exclude
        #[arg(short, long)]
        blacklist: Option<PathBuf>,

        /// Output file (defaults to the configured output path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the document to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Write a default configuration file
    Init {
        /// Target directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub async fn execute(self, engine: Engine) -> Result<()> {
        match self.command {
            Commands::Analyze { path, blacklist, output, stdout } => {
                engine.run_analyze(path, blacklist, output, stdout).await
            }
            Commands::Init { path, force } => {
                engine.init(path, force).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "actiongraph", "--verbose", "analyze", "src/main/java", "--blacklist", "bl.txt",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze { path, blacklist, output, stdout } => {
                assert_eq!(path, PathBuf::from("src/main/java"));
                assert_eq!(blacklist, Some(PathBuf::from("bl.txt")));
                assert!(output.is_none());
                assert!(!stdout);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_stdout_conflicts_with_output() {
        let result = Cli::try_parse_from(["actiongraph", "analyze", ".", "--stdout", "-o", "x.json"]);
        assert!(result.is_err());
    }
}
