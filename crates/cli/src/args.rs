use clap::{Args, Parser, Subcommand};
use nice_core::RetrievalOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nice-classify")]
#[command(about = "Classify goods and services descriptions into Nice classes", long_about = None)]
pub struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a product or service description
    Classify {
        /// Free-text description of the goods or services
        description: String,
        #[command(flatten)]
        retrieval: RetrievalArgs,
        /// Output JSON with the candidate classes
        #[arg(long)]
        json: bool,
        /// Also write the assembled prompt to this file (best effort)
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Show the candidate classes retrieved for a description
    Candidates {
        description: String,
        #[command(flatten)]
        retrieval: RetrievalArgs,
    },
    /// Print the prompt that would be sent, without asking the model
    Prompt {
        description: String,
        #[command(flatten)]
        retrieval: RetrievalArgs,
    },
    /// Print the reference record of one class
    Show {
        /// Nice class number, e.g. 9
        class_id: u32,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RetrievalArgs {
    /// Hits kept per collection (defaults to vectors.limit_per_collection)
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Collections to search, comma-separated (defaults to vectors.collections)
    #[arg(long, value_delimiter = ',')]
    pub collections: Vec<String>,
}

impl RetrievalArgs {
    pub fn options(&self, defaults: &RetrievalOptions) -> RetrievalOptions {
        RetrievalOptions {
            collections: if self.collections.is_empty() {
                defaults.collections.clone()
            } else {
                self.collections.clone()
            },
            limit_per_collection: self.limit.unwrap_or(defaults.limit_per_collection),
        }
    }
}
