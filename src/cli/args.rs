//! Command line argument parsing for the Kontos CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::retriever::DEFAULT_TOP_K;

/// Kontos - retrieval over a JSON corpus with BM25 or vector ranking
#[derive(Parser, Debug, Clone)]
#[command(name = "kontos")]
#[command(about = "Retrieval over a JSON corpus with BM25 or vector ranking")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KontosArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KontosArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Query a corpus and print the most relevant documents
    Search(SearchArgs),

    /// Build or refresh the vector artifact for a corpus
    Embed(EmbedArgs),

    /// Show corpus statistics
    Stats(StatsArgs),
}

/// Output format for CLI results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Ranking strategy to retrieve with
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// BM25 term-overlap ranking
    Lexical,
    /// Dense-vector cosine similarity
    Vector,
}

/// Arguments for searching a corpus
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Path to the JSON corpus file
    #[arg(value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Free-text query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Ranking strategy
    #[arg(short, long, default_value = "lexical")]
    pub strategy: Strategy,

    /// Maximum number of documents to return
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Vector artifact path (defaults to the corpus path with a _vectors.bin suffix)
    #[arg(long, value_name = "VECTOR_FILE")]
    pub vectors: Option<PathBuf>,

    /// Embedding model for the vector strategy
    #[arg(long, default_value = "text-embedding-3-small")]
    pub model: String,

    /// API key for the embedding provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,
}

/// Arguments for building the vector artifact
#[derive(Parser, Debug, Clone)]
pub struct EmbedArgs {
    /// Path to the JSON corpus file
    #[arg(value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Vector artifact path (defaults to the corpus path with a _vectors.bin suffix)
    #[arg(long, value_name = "VECTOR_FILE")]
    pub vectors: Option<PathBuf>,

    /// Embedding model
    #[arg(long, default_value = "text-embedding-3-small")]
    pub model: String,

    /// API key for the embedding provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// Number of documents to embed concurrently
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,
}

/// Arguments for showing corpus statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the JSON corpus file
    #[arg(value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,
}
