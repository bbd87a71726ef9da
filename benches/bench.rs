//! Criterion benchmarks for the Kontos retrieval core.
//!
//! Covers the three hot paths:
//! - Text preprocessing and tokenization
//! - BM25 scoring across the corpus
//! - Cosine similarity across the embedding matrix

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use kontos::analysis::TextPreprocessor;
use kontos::lexical::{Bm25Index, Bm25Params};
use kontos::vector::DocumentMatrix;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "search",
        "engine",
        "retrieval",
        "corpus",
        "query",
        "document",
        "term",
        "frequency",
        "vector",
        "similarity",
        "relevance",
        "score",
        "ranking",
        "embedding",
        "cosine",
        "token",
        "analysis",
        "pipeline",
        "cache",
        "artifact",
        "memory",
        "storage",
        "provider",
        "model",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 40 + (i % 60);
        let mut doc_words = Vec::with_capacity(doc_length);
        for j in 0..doc_length {
            doc_words.push(words[(i * 7 + j) % words.len()]);
        }
        documents.push(doc_words.join(" "));
    }
    documents
}

/// Generate test vectors for benchmarking.
fn generate_test_vectors(count: usize, dimension: usize) -> Vec<Vec<f32>> {
    let mut vectors = Vec::with_capacity(count);
    for i in 0..count {
        let mut data = Vec::with_capacity(dimension);
        for j in 0..dimension {
            data.push(((i * dimension + j) % 97) as f32 / 97.0);
        }
        vectors.push(data);
    }
    vectors
}

fn bench_preprocessing(c: &mut Criterion) {
    let preprocessor = TextPreprocessor::new();
    let documents = generate_test_documents(100);

    let mut group = c.benchmark_group("preprocessing");
    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("tokenize_100_docs", |b| {
        b.iter(|| {
            for doc in &documents {
                black_box(preprocessor.tokenize(doc));
            }
        })
    });
    group.finish();
}

fn bench_bm25_scoring(c: &mut Criterion) {
    let preprocessor = TextPreprocessor::new();
    let documents = generate_test_documents(1000);
    let tokenized: Vec<Vec<String>> = documents.iter().map(|d| preprocessor.tokenize(d)).collect();
    let index = Bm25Index::build(&tokenized, Bm25Params::default());
    let query = preprocessor.tokenize("vector similarity ranking");

    let mut group = c.benchmark_group("bm25");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("score_all_1000_docs", |b| {
        b.iter(|| black_box(index.score_all(black_box(&query))))
    });
    group.finish();
}

fn bench_cosine_similarity(c: &mut Criterion) {
    let rows = generate_test_vectors(1000, 256);
    let matrix = DocumentMatrix::from_rows(rows).unwrap();
    let query: Vec<f32> = (0..256).map(|j| (j % 13) as f32 / 13.0).collect();

    let mut group = c.benchmark_group("cosine");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("similarities_1000x256", |b| {
        b.iter(|| black_box(matrix.similarities(black_box(&query)).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_preprocessing,
    bench_bm25_scoring,
    bench_cosine_similarity
);
criterion_main!(benches);
