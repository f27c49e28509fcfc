//! Retrieval-augmented context.
//!
//! Reference documents are chunked once and embedded into an in-memory,
//! append-only corpus; queries pull back the most similar chunk texts.
//! Retrieval is an optional enhancement: a missing document degrades to "no
//! context available" rather than failing the turn.

use crate::ports::embedding::EmbeddingGateway;
use crate::ports::gateway_error::GatewayError;
use neuroroute_domain::{DocumentChunk, chunk_text, cosine_similarity};
use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Default)]
struct Corpus {
    chunks: Vec<DocumentChunk>,
    // Invariant: embeddings.len() == chunks.len() outside load_document
    embeddings: Vec<Vec<f32>>,
}

/// Append-only corpus of embedded document chunks
///
/// Safe for one writer (document load) with concurrent readers: loads build
/// the new corpus aside and swap it in under the write lock, so a retrieval
/// running during a load sees either the old corpus or the new one.
pub struct RetrievalIndex<E: EmbeddingGateway> {
    embedding: Arc<E>,
    chunk_size: usize,
    corpus: RwLock<Corpus>,
}

impl<E: EmbeddingGateway> RetrievalIndex<E> {
    pub fn new(embedding: Arc<E>, chunk_size: usize) -> Self {
        Self {
            embedding,
            chunk_size,
            corpus: RwLock::new(Corpus::default()),
        }
    }

    /// Load a reference document and re-embed the whole corpus.
    ///
    /// A path that cannot be read is logged and ignored. Embedding failures
    /// propagate and leave the previous corpus in place.
    pub async fn load_document(&self, path: &Path) -> Result<(), GatewayError> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "reference document not readable, skipping");
                return Ok(());
            }
        };

        // Snapshot, append, embed everything outside the lock, then swap.
        let mut chunks = self.corpus.read().await.chunks.clone();
        let new_chunks = chunk_text(&text, self.chunk_size, chunks.len());
        info!(
            path = %path.display(),
            new_chunks = new_chunks.len(),
            "loaded reference document"
        );
        chunks.extend(new_chunks);

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;
        debug_assert_eq!(embeddings.len(), chunks.len());

        let mut corpus = self.corpus.write().await;
        *corpus = Corpus { chunks, embeddings };
        Ok(())
    }

    /// Texts of the `top_k` chunks most similar to the query, best first.
    ///
    /// An empty corpus yields an empty list without touching the provider.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, GatewayError> {
        if self.is_empty().await {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedding.embed(query).await?;
        let corpus = self.corpus.read().await;

        let mut scored: Vec<(usize, f32)> = corpus
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine_similarity(&query_embedding, e)))
            .collect();
        // Stable sort keeps document order among equal scores
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(i, _)| corpus.chunks[i].text.clone())
            .collect())
    }

    pub async fn chunk_count(&self) -> usize {
        self.corpus.read().await.chunks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.corpus.read().await.chunks.is_empty()
    }
}
