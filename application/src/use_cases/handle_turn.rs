//! Handle Turn use case
//!
//! Orchestrates one user turn: route the message to topic instructions,
//! gather retrieval context, sample an ensemble of completions, parse each
//! one, and vote the candidates down to a single outcome.

use crate::ports::completion::CompletionGateway;
use crate::ports::embedding::EmbeddingGateway;
use crate::ports::gateway_error::GatewayError;
use crate::retrieval::RetrievalIndex;
use crate::router::PromptRouter;
use neuroroute_domain::{
    CandidateSet, CommandParser, Message, ParsedItem, PromptComposer, TurnOutcome, vote,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur while handling a turn
///
/// Parse failures never appear here; they degrade to dropped items. Only
/// provider failures and cancellation surface as errors.
#[derive(Error, Debug)]
pub enum HandleTurnError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Turn cancelled")]
    Cancelled,
}

/// Input for the HandleTurn use case
#[derive(Debug, Clone, Default)]
pub struct HandleTurnInput {
    /// Conversation history, retained by the caller
    pub history: Vec<Message>,
    /// The user's message for this turn
    pub user_text: String,
}

impl HandleTurnInput {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            history: Vec::new(),
            user_text: user_text.into(),
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }
}

/// Use case composing the full turn pipeline
pub struct HandleTurnUseCase<E: EmbeddingGateway, C: CompletionGateway> {
    completion: Arc<C>,
    router: PromptRouter<E>,
    /// `None` disables retrieval entirely
    index: Option<Arc<RetrievalIndex<E>>>,
    parser: CommandParser,
    /// When false, the ensemble size is forced to 1 regardless of routing
    ensemble: bool,
    top_k: usize,
    cancellation: Option<CancellationToken>,
}

impl<E: EmbeddingGateway, C: CompletionGateway> HandleTurnUseCase<E, C> {
    pub fn new(
        completion: Arc<C>,
        router: PromptRouter<E>,
        index: Option<Arc<RetrievalIndex<E>>>,
        parser: CommandParser,
        ensemble: bool,
        top_k: usize,
    ) -> Self {
        Self {
            completion,
            router,
            index,
            parser,
            ensemble,
            top_k,
            cancellation: None,
        }
    }

    /// Attach a cancellation token checked between completions.
    ///
    /// Cancellation is cooperative: it takes effect at the loop boundary
    /// between generating completion i and i+1, never preemptively.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Handle one user turn.
    pub async fn execute(&self, input: HandleTurnInput) -> Result<TurnOutcome, HandleTurnError> {
        let route = self.router.select(&input.user_text).await?;
        let n = if self.ensemble { route.ensemble_size } else { 1 };
        info!(
            ensemble_size = n,
            fallback = route.used_fallback,
            "routing decided"
        );

        let context_chunks = match &self.index {
            Some(index) => index.retrieve(&input.user_text, self.top_k).await?,
            None => Vec::new(),
        };
        debug!(chunks = context_chunks.len(), "retrieval context assembled");

        let prompt = PromptComposer::compose(
            &input.history,
            &route.instructions,
            &context_chunks,
            &input.user_text,
        );

        // Sequential by design: the provider is a single loaded model.
        let mut candidates: Vec<CandidateSet> = Vec::with_capacity(n);
        for i in 0..n {
            if let Some(token) = &self.cancellation
                && token.is_cancelled()
            {
                info!(completed = i, requested = n, "turn cancelled between completions");
                return Err(HandleTurnError::Cancelled);
            }

            let completion = self.completion.complete(&prompt).await?;
            let mut set = self.parser.parse(&completion);

            // Pure-chat fallback: no topic matched and nothing parsed, so
            // the user was most likely just chatting.
            if set.is_empty() && route.used_fallback && !completion.trim().is_empty() {
                set = CandidateSet::new(vec![ParsedItem::text(completion.trim())]);
            }

            if set.is_empty() {
                debug!(completion = %completion, "completion yielded no candidates, dropping");
            } else {
                candidates.push(set);
            }
        }

        if candidates.is_empty() {
            info!("no completion yielded candidates");
            return Ok(TurnOutcome::Empty);
        }

        Ok(vote(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use neuroroute_domain::{CommandGrammar, SelectionPolicy, TopicPrompt, TopicTable};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DIM: usize = 8;
    const TOPIC_COUNT: usize = 6;

    /// Maps topic `i` to basis vector `e_i` and every other text to a fixed
    /// query vector, so tests choose exactly which topics a query matches.
    struct TopicAwareEmbedding {
        query_vector: Vec<f32>,
    }

    impl TopicAwareEmbedding {
        fn new(query_vector: Vec<f32>) -> Arc<Self> {
            Arc::new(Self { query_vector })
        }
    }

    #[async_trait]
    impl EmbeddingGateway for TopicAwareEmbedding {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
            if let Some(rest) = text.strip_prefix("T")
                && let Some(digit) = rest.chars().next().and_then(|c| c.to_digit(10))
            {
                let mut v = vec![0.0; DIM];
                v[digit as usize] = 1.0;
                return Ok(v);
            }
            Ok(self.query_vector.clone())
        }
    }

    /// Query matching exactly topic 2
    fn match_one() -> Arc<TopicAwareEmbedding> {
        let mut v = vec![0.05; DIM];
        v[2] = 0.9;
        TopicAwareEmbedding::new(v)
    }

    /// Query matching topics 2 and 3 (ensemble size 2)
    fn match_two() -> Arc<TopicAwareEmbedding> {
        let mut v = vec![0.0; DIM];
        v[2] = 0.9;
        v[3] = 0.9;
        TopicAwareEmbedding::new(v)
    }

    /// Query matching no topic (base-prompt fallback)
    fn match_none() -> Arc<TopicAwareEmbedding> {
        let mut v = vec![0.0; DIM];
        v[7] = 1.0;
        TopicAwareEmbedding::new(v)
    }

    /// Replays scripted completions and records in-flight concurrency.
    struct ScriptedCompletion {
        responses: Mutex<Vec<String>>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ScriptedCompletion {
        fn new(responses: Vec<&str>) -> Arc<Self> {
            let mut responses: Vec<String> = responses.into_iter().map(String::from).collect();
            responses.reverse();
            Arc::new(Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CompletionGateway for ScriptedCompletion {
        async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.calls.fetch_add(1, Ordering::SeqCst);
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| GatewayError::Other("script exhausted".to_string()))?;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(response)
        }
    }

    async fn use_case(
        embedding: Arc<TopicAwareEmbedding>,
        completion: Arc<ScriptedCompletion>,
        ensemble: bool,
    ) -> HandleTurnUseCase<TopicAwareEmbedding, ScriptedCompletion> {
        let topics: Vec<TopicPrompt> = (0..TOPIC_COUNT)
            .map(|i| TopicPrompt::new(format!("T{i}"), format!("topic {i} instructions")))
            .collect();
        let router = PromptRouter::new(
            embedding,
            TopicTable::new(topics).unwrap(),
            "BASE",
            SelectionPolicy::default(),
            false,
        )
        .await
        .unwrap();

        HandleTurnUseCase::new(
            completion,
            router,
            None,
            CommandParser::new(CommandGrammar::builtin()),
            ensemble,
            3,
        )
    }

    const FILTER: &str = r#"{"command": "Filtering", "parameters": {"l_freq": 1, "h_freq": 40}}"#;
    const RESAMPLE: &str = r#"{"command": "Resample", "parameters": {"sfreq": 250}}"#;

    #[tokio::test]
    async fn test_single_completion_decision() {
        let completion = ScriptedCompletion::new(vec![FILTER]);
        let uc = use_case(match_one(), Arc::clone(&completion), true).await;

        let outcome = uc.execute(HandleTurnInput::new("filter please")).await.unwrap();
        let decision = outcome.decision().expect("expected a decision");
        assert_eq!(decision.signature(), vec!["filtering"]);
        assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_two_matched_topics_sample_two_completions() {
        let completion = ScriptedCompletion::new(vec![FILTER, FILTER]);
        let uc = use_case(match_two(), Arc::clone(&completion), true).await;

        let outcome = uc.execute(HandleTurnInput::new("filter then train")).await.unwrap();
        assert!(outcome.is_decision());
        assert_eq!(completion.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_disagreeing_completions_surface_ambiguity() {
        let completion = ScriptedCompletion::new(vec![FILTER, RESAMPLE]);
        let uc = use_case(match_two(), completion, true).await;

        let outcome = uc.execute(HandleTurnInput::new("do something")).await.unwrap();
        let options = outcome.options().expect("expected ambiguity");
        assert_eq!(options.len(), 2);
    }

    #[tokio::test]
    async fn test_ensemble_disabled_forces_single_completion() {
        let completion = ScriptedCompletion::new(vec![FILTER]);
        let uc = use_case(match_two(), Arc::clone(&completion), false).await;

        uc.execute(HandleTurnInput::new("filter then train")).await.unwrap();
        assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pure_chat_fallback_on_unmatched_topic() {
        let completion =
            ScriptedCompletion::new(vec!["Hello! Load some EEG data to get started."]);
        let uc = use_case(match_none(), completion, true).await;

        let outcome = uc.execute(HandleTurnInput::new("hi there")).await.unwrap();
        let decision = outcome.decision().expect("expected a decision");
        assert!(decision.is_text_only());
    }

    #[tokio::test]
    async fn test_no_chat_fallback_when_topic_matched() {
        // A matched topic means the user asked for an operation; raw text
        // that parses to nothing is dropped, not wrapped as chat
        let completion = ScriptedCompletion::new(vec!["no structure here"]);
        let uc = use_case(match_one(), completion, true).await;

        let outcome = uc.execute(HandleTurnInput::new("filter")).await.unwrap();
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_blank_completion_dropped_even_on_fallback() {
        let completion = ScriptedCompletion::new(vec!["   "]);
        let uc = use_case(match_none(), completion, true).await;

        let outcome = uc.execute(HandleTurnInput::new("hi")).await.unwrap();
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_completions_run_sequentially() {
        let completion = ScriptedCompletion::new(vec![FILTER, FILTER]);
        let uc = use_case(match_two(), Arc::clone(&completion), true).await;

        uc.execute(HandleTurnInput::new("filter")).await.unwrap();
        assert_eq!(completion.calls.load(Ordering::SeqCst), 2);
        assert_eq!(completion.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancellation_before_first_completion() {
        let completion = ScriptedCompletion::new(vec![FILTER]);
        let token = CancellationToken::new();
        token.cancel();

        let uc = use_case(match_one(), Arc::clone(&completion), true)
            .await
            .with_cancellation(token);

        let result = uc.execute(HandleTurnInput::new("filter")).await;
        assert!(matches!(result, Err(HandleTurnError::Cancelled)));
        assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        // Script exhausted on first call: a gateway error, not a crash
        let completion = ScriptedCompletion::new(vec![]);
        let uc = use_case(match_one(), completion, true).await;

        let result = uc.execute(HandleTurnInput::new("filter")).await;
        assert!(matches!(result, Err(HandleTurnError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_history_is_included_in_prompt() {
        struct PromptProbe {
            seen: Mutex<Vec<String>>,
        }

        #[async_trait]
        impl CompletionGateway for PromptProbe {
            async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
                self.seen.lock().unwrap().push(prompt.to_string());
                Ok(r#"{"text": "ok"}"#.to_string())
            }
        }

        let probe = Arc::new(PromptProbe {
            seen: Mutex::new(Vec::new()),
        });
        let topics: Vec<TopicPrompt> = (0..TOPIC_COUNT)
            .map(|i| TopicPrompt::new(format!("T{i}"), format!("topic {i} instructions")))
            .collect();
        let router = PromptRouter::new(
            match_one(),
            TopicTable::new(topics).unwrap(),
            "BASE",
            SelectionPolicy::default(),
            false,
        )
        .await
        .unwrap();
        let uc = HandleTurnUseCase::new(
            Arc::clone(&probe),
            router,
            None,
            CommandParser::new(CommandGrammar::builtin()),
            true,
            3,
        );

        let input = HandleTurnInput::new("and now?")
            .with_history(vec![Message::user("filter my data"), Message::assistant("done")]);
        uc.execute(input).await.unwrap();

        let prompts = probe.seen.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("topic 2 instructions"));
        assert!(prompts[0].contains("User: filter my data"));
        assert!(prompts[0].contains("Assistant: done"));
        assert!(prompts[0].contains("User: and now?"));
    }
}
