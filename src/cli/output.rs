//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{KontosArgs, OutputFormat};
use crate::document::Document;
use crate::error::Result;

/// Result structure for search operations.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<Document>,
    pub duration_ms: u64,
}

/// Result structure for the embed command.
#[derive(Debug, Serialize)]
pub struct EmbedResult {
    pub documents: usize,
    pub dimension: usize,
    pub artifact: String,
    pub duration_ms: u64,
}

/// Corpus statistics.
#[derive(Debug, Serialize)]
pub struct CorpusStats {
    pub documents: usize,
    pub distinct_terms: usize,
    pub avg_doc_tokens: f32,
}

/// Serialize a value as JSON to stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Print search results in the requested format.
pub fn print_search_results(results: &SearchResults, args: &KontosArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(results, args.pretty),
        OutputFormat::Human => {
            println!(
                "{} hit(s) for {:?} ({} ms)",
                results.hits.len(),
                results.query,
                results.duration_ms
            );
            for (rank, doc) in results.hits.iter().enumerate() {
                println!("{}. {doc}", rank + 1);
                if args.verbosity() > 1 {
                    if let Some(url) = &doc.url {
                        println!("   {url}");
                    }
                }
            }
            Ok(())
        }
    }
}

/// Print the embed result in the requested format.
pub fn print_embed_result(result: &EmbedResult, args: &KontosArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(result, args.pretty),
        OutputFormat::Human => {
            println!(
                "embedded {} documents (dimension {}) into {} ({} ms)",
                result.documents, result.dimension, result.artifact, result.duration_ms
            );
            Ok(())
        }
    }
}

/// Print corpus statistics in the requested format.
pub fn print_corpus_stats(stats: &CorpusStats, args: &KontosArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(stats, args.pretty),
        OutputFormat::Human => {
            println!("documents:      {}", stats.documents);
            println!("distinct terms: {}", stats.distinct_terms);
            println!("avg doc tokens: {:.1}", stats.avg_doc_tokens);
            Ok(())
        }
    }
}
