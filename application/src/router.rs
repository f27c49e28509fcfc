//! Prompt routing.
//!
//! The router decides which topic instructions are relevant to a user
//! message, and how many independent completions the orchestrator should
//! request for it. More matched topics implies more ambiguity, which is
//! compensated by sampling more candidates.

use crate::ports::embedding::EmbeddingGateway;
use crate::ports::gateway_error::GatewayError;
use neuroroute_domain::{SelectionPolicy, TopicTable, cosine_similarity};
use std::sync::Arc;
use tracing::debug;

/// Routing decision for one user message
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Ensemble size: number of completions to sample (always >= 1)
    pub ensemble_size: usize,
    /// Instruction block to prepend to the prompt
    pub instructions: String,
    /// Whether no topic matched and the base prompt alone was used.
    ///
    /// An unmatched topic usually means the user was just chatting; the
    /// orchestrator uses this to enable the pure-chat fallback.
    pub used_fallback: bool,
}

/// Scores topic prompts against user messages via cached embeddings
pub struct PromptRouter<E: EmbeddingGateway> {
    embedding: Arc<E>,
    topics: TopicTable,
    base_prompt: String,
    policy: SelectionPolicy,
    /// Ablation mode: replace similarity scoring with a uniform random pick
    no_prompt_selection: bool,
    /// One cached vector per topic, in table order
    topic_embeddings: Vec<Vec<f32>>,
}

impl<E: EmbeddingGateway> PromptRouter<E> {
    /// Build a router, embedding every topic prompt once up front.
    ///
    /// The cache is recomputed only by constructing a new router with a
    /// different table.
    pub async fn new(
        embedding: Arc<E>,
        topics: TopicTable,
        base_prompt: impl Into<String>,
        policy: SelectionPolicy,
        no_prompt_selection: bool,
    ) -> Result<Self, GatewayError> {
        let texts: Vec<String> = topics.iter().map(|t| t.embedding_text()).collect();
        let topic_embeddings = embedding.embed_batch(&texts).await?;
        debug_assert_eq!(topic_embeddings.len(), topics.len());

        Ok(Self {
            embedding,
            topics,
            base_prompt: base_prompt.into(),
            policy,
            no_prompt_selection,
            topic_embeddings,
        })
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Select relevant topics for a query.
    pub async fn select(&self, query: &str) -> Result<Route, GatewayError> {
        if self.no_prompt_selection {
            return Ok(self.select_random());
        }

        let query_embedding = self.embedding.embed(query).await?;
        let scores: Vec<f32> = self
            .topic_embeddings
            .iter()
            .map(|topic| cosine_similarity(&query_embedding, topic))
            .collect();

        let selected = self.policy.select(&scores);
        debug!(?scores, ?selected, "topic selection");

        if selected.is_empty() {
            return Ok(Route {
                ensemble_size: 1,
                instructions: self.base_prompt.clone(),
                used_fallback: true,
            });
        }

        // Topic texts are concatenated in table order, never score order, so
        // composite instructions stay internally consistent.
        let mut instructions = self.base_prompt.clone();
        instructions.push('\n');
        instructions.push_str(&self.topics.concat_texts(&selected));

        Ok(Route {
            ensemble_size: selected.len().max(1),
            instructions,
            used_fallback: false,
        })
    }

    /// Ablation mode: a uniform random subset of topics, no scoring.
    fn select_random(&self) -> Route {
        let mut indices: Vec<usize> = (0..self.topics.len()).collect();
        fastrand::shuffle(&mut indices);
        let k = fastrand::usize(0..=indices.len());
        let mut picked = indices[..k].to_vec();
        picked.sort_unstable();

        if picked.is_empty() {
            return Route {
                ensemble_size: 1,
                instructions: self.base_prompt.clone(),
                used_fallback: true,
            };
        }

        Route {
            ensemble_size: picked.len(),
            instructions: self.topics.concat_texts(&picked),
            used_fallback: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use neuroroute_domain::TopicPrompt;
    use std::collections::HashMap;

    /// Embedding mock returning fixed vectors per exact text
    struct FixedEmbedding {
        vectors: HashMap<String, Vec<f32>>,
    }

    #[async_trait]
    impl EmbeddingGateway for FixedEmbedding {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
            self.vectors
                .get(text)
                .cloned()
                .ok_or_else(|| GatewayError::Other(format!("no vector for {text:?}")))
        }
    }

    fn topic(label: &str, text: &str) -> TopicPrompt {
        TopicPrompt::new(label, text)
    }

    /// Six-topic table with vectors arranged so "I want to split the data
    /// using trial" lands on Training only.
    async fn eeg_router() -> (PromptRouter<FixedEmbedding>, &'static str) {
        let labels = [
            ("Start", "start"),
            ("Import Data", "import"),
            ("Preprocess", "preprocess"),
            ("Training", "training"),
            ("Evaluation", "evaluation"),
            ("Visualization", "visualization"),
        ];
        let query = "I want to split the data using trial";

        let mut vectors = HashMap::new();
        // Query aligned strongly with the Training axis, weakly elsewhere
        vectors.insert(query.to_string(), vec![0.1, 0.1, 0.15, 0.9, 0.1, 0.05]);
        for (i, (label, text)) in labels.iter().enumerate() {
            let mut v = vec![0.0; 6];
            v[i] = 1.0;
            vectors.insert(topic(label, text).embedding_text(), v);
        }

        let table = TopicTable::new(
            labels.iter().map(|(l, t)| topic(l, t)).collect(),
        )
        .unwrap();

        let router = PromptRouter::new(
            Arc::new(FixedEmbedding { vectors }),
            table,
            "BASE\n",
            SelectionPolicy::default(),
            false,
        )
        .await
        .unwrap();
        (router, query)
    }

    #[tokio::test]
    async fn test_training_scenario_selects_one_topic() {
        let (router, query) = eeg_router().await;
        let route = router.select(query).await.unwrap();

        assert_eq!(route.ensemble_size, 1);
        assert!(!route.used_fallback);
        assert!(route.instructions.starts_with("BASE"));
        assert!(route.instructions.contains("training"));
        assert!(!route.instructions.contains("visualization"));
    }

    #[tokio::test]
    async fn test_no_match_falls_back_to_base_prompt() {
        let table = TopicTable::new(vec![topic("A", "alpha"), topic("B", "beta")]).unwrap();
        let mut vectors = HashMap::new();
        vectors.insert("query".to_string(), vec![0.0, 0.0, 1.0]);
        vectors.insert(topic("A", "alpha").embedding_text(), vec![1.0, 0.0, 0.0]);
        vectors.insert(topic("B", "beta").embedding_text(), vec![0.0, 1.0, 0.0]);

        let router = PromptRouter::new(
            Arc::new(FixedEmbedding { vectors }),
            table,
            "BASE",
            SelectionPolicy::default(),
            false,
        )
        .await
        .unwrap();

        let route = router.select("query").await.unwrap();
        assert_eq!(route.ensemble_size, 1);
        assert!(route.used_fallback);
        assert_eq!(route.instructions, "BASE");
    }

    #[tokio::test]
    async fn test_multiple_matches_raise_ensemble_size() {
        // Six topics with the query aligned to the first two; two scores
        // around 0.7 against four near-zero ones clear mean + stddev
        let named: Vec<(&str, &str)> = vec![
            ("A", "alpha"),
            ("B", "beta"),
            ("C", "gamma"),
            ("D", "delta"),
            ("E", "epsilon"),
            ("F", "zeta"),
        ];
        let table = TopicTable::new(named.iter().map(|(l, t)| topic(l, t)).collect()).unwrap();
        let mut vectors = HashMap::new();
        vectors.insert("query".to_string(), vec![0.9, 0.9, 0.0, 0.0, 0.0, 0.01]);
        for (i, (l, t)) in named.iter().enumerate() {
            let mut v = vec![0.0; 6];
            v[i] = 1.0;
            vectors.insert(topic(l, t).embedding_text(), v);
        }

        let router = PromptRouter::new(
            Arc::new(FixedEmbedding { vectors }),
            table,
            "BASE",
            SelectionPolicy::default(),
            false,
        )
        .await
        .unwrap();

        let route = router.select("query").await.unwrap();
        assert_eq!(route.ensemble_size, 2);
        // Table order, not score order
        let a = route.instructions.find("alpha").unwrap();
        let b = route.instructions.find("beta").unwrap();
        assert!(a < b);
    }

    #[tokio::test]
    async fn test_ensemble_size_always_at_least_one() {
        let (router, _) = eeg_router().await;
        for query in ["I want to split the data using trial"] {
            let route = router.select(query).await.unwrap();
            assert!(route.ensemble_size >= 1);
        }
    }

    #[tokio::test]
    async fn test_random_mode_never_scores() {
        let table = TopicTable::new(vec![topic("A", "alpha"), topic("B", "beta")]).unwrap();
        // No query vector registered: scoring would error, random mode must not
        let mut vectors = HashMap::new();
        vectors.insert(topic("A", "alpha").embedding_text(), vec![1.0, 0.0]);
        vectors.insert(topic("B", "beta").embedding_text(), vec![0.0, 1.0]);

        let router = PromptRouter::new(
            Arc::new(FixedEmbedding { vectors }),
            table,
            "BASE",
            SelectionPolicy::default(),
            true,
        )
        .await
        .unwrap();

        for _ in 0..20 {
            let route = router.select("anything").await.unwrap();
            assert!(route.ensemble_size >= 1);
            if route.used_fallback {
                assert_eq!(route.instructions, "BASE");
            } else {
                assert!(!route.instructions.contains("BASE"));
            }
        }
    }
}
