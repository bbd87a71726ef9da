//! Command implementations for the Kontos CLI.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::TextPreprocessor;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::DocumentStore;
use crate::embedding::OpenAiEmbedder;
use crate::error::{KontosError, Result};
use crate::lexical::{Bm25Index, Bm25Params};
use crate::retriever::{LexicalRetriever, Retriever, VectorRetriever};

/// Execute a CLI command.
pub async fn execute_command(args: KontosArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search_corpus(search_args.clone(), &args).await,
        Command::Embed(embed_args) => embed_corpus(embed_args.clone(), &args).await,
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Derive the vector artifact path from the corpus path:
/// `posts.json` becomes `posts_vectors.bin` next to it.
fn default_vector_path(corpus: &Path) -> PathBuf {
    let stem = corpus
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "corpus".to_string());
    corpus.with_file_name(format!("{stem}_vectors.bin"))
}

fn require_api_key(api_key: &str) -> Result<()> {
    if api_key.is_empty() {
        return Err(KontosError::invalid_operation(
            "the vector strategy needs an API key; pass --api-key or set OPENAI_API_KEY",
        ));
    }
    Ok(())
}

/// Query a corpus and print the most relevant documents.
async fn search_corpus(args: SearchArgs, cli_args: &KontosArgs) -> Result<()> {
    let store = DocumentStore::load_json(&args.corpus)?;
    let started = Instant::now();

    // The rest of the command is strategy-agnostic.
    let mut retriever: Box<dyn Retriever> = match args.strategy {
        Strategy::Lexical => Box::new(LexicalRetriever::new(store, args.top_k)),
        Strategy::Vector => {
            require_api_key(&args.api_key)?;
            let embedder = Arc::new(OpenAiEmbedder::new(args.api_key.clone(), args.model.clone()));
            let vector_path = args
                .vectors
                .clone()
                .unwrap_or_else(|| default_vector_path(&args.corpus));
            Box::new(VectorRetriever::new(store, embedder, vector_path, args.top_k))
        }
    };
    retriever.initialize().await?;
    let hits = retriever.retrieve(&args.query).await?;

    let results = SearchResults {
        query: args.query,
        hits,
        duration_ms: started.elapsed().as_millis() as u64,
    };
    print_search_results(&results, cli_args)
}

/// Build or refresh the vector artifact for a corpus.
async fn embed_corpus(args: EmbedArgs, cli_args: &KontosArgs) -> Result<()> {
    require_api_key(&args.api_key)?;

    let store = DocumentStore::load_json(&args.corpus)?;
    let vector_path = args
        .vectors
        .clone()
        .unwrap_or_else(|| default_vector_path(&args.corpus));
    let started = Instant::now();

    let embedder = Arc::new(OpenAiEmbedder::new(args.api_key.clone(), args.model.clone()));
    let mut retriever = VectorRetriever::new(store, embedder, &vector_path, 1)
        .with_concurrency(args.concurrency);
    retriever.initialize().await?;

    let matrix = retriever
        .matrix()
        .ok_or_else(|| KontosError::not_initialized("vector index missing after initialize"))?;
    let result = EmbedResult {
        documents: matrix.row_count(),
        dimension: matrix.dimension(),
        artifact: vector_path.display().to_string(),
        duration_ms: started.elapsed().as_millis() as u64,
    };
    print_embed_result(&result, cli_args)
}

/// Show corpus statistics.
fn show_stats(args: StatsArgs, cli_args: &KontosArgs) -> Result<()> {
    let store = DocumentStore::load_json(&args.corpus)?;
    let preprocessor = TextPreprocessor::new();
    let tokenized: Vec<Vec<String>> = store
        .iter()
        .map(|doc| preprocessor.tokenize(&doc.content))
        .collect();
    let index = Bm25Index::build(&tokenized, Bm25Params::default());

    let stats = CorpusStats {
        documents: store.len(),
        distinct_terms: index.term_count(),
        avg_doc_tokens: index.avg_doc_length(),
    };
    print_corpus_stats(&stats, cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vector_path_replaces_extension() {
        assert_eq!(
            default_vector_path(Path::new("data/posts.json")),
            PathBuf::from("data/posts_vectors.bin")
        );
        assert_eq!(
            default_vector_path(Path::new("corpus")),
            PathBuf::from("corpus_vectors.bin")
        );
    }

    #[test]
    fn test_require_api_key() {
        assert!(require_api_key("sk-test").is_ok());
        assert!(matches!(
            require_api_key(""),
            Err(KontosError::InvalidOperation(_))
        ));
    }
}
