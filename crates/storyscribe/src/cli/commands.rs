//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::{net::SocketAddr, path::PathBuf};
use storyscribe_core::{ModelId, Temperature};

/// Storyscribe - Draft and refine audio-story scripts with a chat-completion model
#[derive(Parser, Debug)]
#[command(name = "storyscribe")]
#[command(about = "Draft and refine audio-story scripts with a chat-completion model", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true, env = "STORYSCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding scripts.json and the version files
    #[arg(long, global = true, env = "STORYSCRIBE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List scripts
    Scripts {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Create a script
    New {
        /// Script title
        #[arg(long)]
        title: Option<String>,

        /// Short summary of the story
        #[arg(long)]
        brief: Option<String>,
    },

    /// Change a script's title or brief
    Edit {
        /// Script id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New brief
        #[arg(long)]
        brief: Option<String>,
    },

    /// List a script's versions
    Versions {
        /// Script id
        id: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Print one version in full
    Show {
        /// Script id
        id: String,

        /// Version number
        number: u32,
    },

    /// Write a version to a text file
    Export {
        /// Script id
        id: String,

        /// Version number
        number: u32,

        /// Directory to write the file into
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// List configured models with pricing and rate limits
    Models {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show what a request would send and cost, without sending it
    Preview {
        /// Script id
        id: String,

        #[command(flatten)]
        draft: DraftArgs,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Generate a new version
    Generate {
        /// Script id
        id: String,

        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Serve the JSON HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080", env = "STORYSCRIBE_ADDR")]
        addr: SocketAddr,
    },
}

/// Request options shared by `preview` and `generate`.
#[derive(clap::Args, Debug, Clone)]
pub struct DraftArgs {
    /// Instruction for the new version
    #[arg(long, short)]
    pub prompt: String,

    /// Model to use instead of the configured default
    #[arg(long, value_parser = parse_model)]
    pub model: Option<ModelId>,

    /// Temperature between 0 and 1
    #[arg(long, short, value_parser = parse_temperature)]
    pub temperature: Option<Temperature>,

    /// Earlier versions to include as context, e.g. `--context 1,3`
    #[arg(long, value_delimiter = ',')]
    pub context: Vec<u32>,
}

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Human,
    /// JSON format
    Json,
}

fn parse_model(value: &str) -> Result<ModelId, String> {
    ModelId::from_id(value).map_err(|e| e.to_string())
}

fn parse_temperature(value: &str) -> Result<Temperature, String> {
    let value: f32 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    Temperature::new(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "storyscribe",
            "generate",
            "20240501103000",
            "--prompt",
            "Write the ending",
            "--model",
            "gpt-4o",
            "--temperature",
            "0.3",
            "--context",
            "1,3",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate { id, draft } => {
                assert_eq!(id, "20240501103000");
                assert_eq!(draft.prompt, "Write the ending");
                assert_eq!(draft.model, Some(ModelId::Gpt4o));
                assert_eq!(draft.temperature.map(Temperature::value), Some(0.3));
                assert_eq!(draft.context, vec![1, 3]);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_model() {
        let result = Cli::try_parse_from([
            "storyscribe",
            "preview",
            "x",
            "--prompt",
            "p",
            "--model",
            "gpt-2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let result = Cli::try_parse_from([
            "storyscribe",
            "generate",
            "x",
            "--prompt",
            "p",
            "--temperature",
            "1.5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["storyscribe", "scripts", "--data-dir", "/tmp/x", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }
}
