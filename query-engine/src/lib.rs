//! Query engine: the pipeline between the vector index and the language
//! model.
//!
//! Public API: [`QueryEngine::answer`]. It retrieves top-k matches for the
//! precomputed embedding, runs the special-query dispatcher over the
//! question text, and composes the final answer — deterministically for
//! recognized intents, via the language model otherwise.
//!
//! The two external calls sit behind the narrow [`MatchSource`] and
//! [`AnswerGenerator`] traits so tests substitute deterministic fakes
//! instead of touching the network.

pub mod aggregate;
pub mod compose;
pub mod error;
pub mod intent;
pub mod prompt;

use std::future::Future;

use chrono::Utc;
use tracing::debug;
use vector_gateway::{SearchMatch, VectorIndexClient};

pub use compose::ComposedAnswer;
pub use error::{EngineError, GenerationError};
pub use intent::Intent;

/// Capability: given an embedding and a result count, return ranked matches.
pub trait MatchSource {
    fn top_k(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> impl Future<Output = Result<Vec<SearchMatch>, EngineError>> + Send;
}

/// Capability: given a prompt, return generated answer text.
pub trait AnswerGenerator {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

impl MatchSource for VectorIndexClient {
    fn top_k(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> impl Future<Output = Result<Vec<SearchMatch>, EngineError>> + Send {
        async move { Ok(self.search(embedding, k).await?) }
    }
}

impl AnswerGenerator for llm_service::GenerationService {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send {
        async move {
            llm_service::GenerationService::generate(self, prompt, None)
                .await
                .map_err(|e| GenerationError(e.to_string()))
        }
    }
}

/// The outcome of one query.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// An answer was synthesized (deterministically or by the model).
    Answered(ComposedAnswer),
    /// No question was supplied; raw matches only, no synthesis.
    MatchesOnly(Vec<SearchMatch>),
}

/// Stateless request pipeline: search → dispatch → compose.
pub struct QueryEngine<S, G> {
    source: S,
    generator: G,
}

impl<S: MatchSource, G: AnswerGenerator> QueryEngine<S, G> {
    pub fn new(source: S, generator: G) -> Self {
        Self { source, generator }
    }

    /// Answer one query.
    ///
    /// Retrieval always happens; whether synthesis happens depends on the
    /// question: absent (or blank) → [`QueryOutcome::MatchesOnly`], a
    /// recognized special intent → deterministic aggregate answer, anything
    /// else → one language-model call.
    ///
    /// # Errors
    /// Propagates [`EngineError`] from retrieval or generation; generation
    /// failures still carry the retrieved matches.
    pub async fn answer(
        &self,
        embedding: &[f32],
        top_k: usize,
        question: Option<&str>,
    ) -> Result<QueryOutcome, EngineError> {
        let matches = self.source.top_k(embedding, top_k).await?;

        let Some(question) = question.map(str::trim).filter(|q| !q.is_empty()) else {
            return Ok(QueryOutcome::MatchesOnly(matches));
        };

        let intent = Intent::detect(question);
        debug!(
            target: "query_engine",
            hits = matches.len(),
            intent = ?intent,
            "answer: dispatching"
        );

        let today = Utc::now().date_naive();
        let composed = compose::compose(&self.generator, question, matches, intent, today).await?;

        Ok(QueryOutcome::Answered(composed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::{Value, json};

    /// Serves a fixed match list, honoring `k`.
    struct FakeSource(Vec<SearchMatch>);

    impl MatchSource for FakeSource {
        fn top_k(
            &self,
            _embedding: &[f32],
            k: usize,
        ) -> impl Future<Output = Result<Vec<SearchMatch>, EngineError>> + Send {
            let hits: Vec<SearchMatch> = self.0.iter().take(k).cloned().collect();
            async move { Ok(hits) }
        }
    }

    /// Counts invocations and replies with a fixed answer.
    struct CountingGenerator {
        calls: AtomicUsize,
    }

    impl CountingGenerator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl AnswerGenerator for CountingGenerator {
        fn generate(
            &self,
            _prompt: &str,
        ) -> impl Future<Output = Result<String, GenerationError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok("model answer".to_string()) }
        }
    }

    /// Always fails, as an unreachable provider would.
    struct FailingGenerator;

    impl AnswerGenerator for FailingGenerator {
        fn generate(
            &self,
            _prompt: &str,
        ) -> impl Future<Output = Result<String, GenerationError>> + Send {
            async move { Err(GenerationError("provider timed out".into())) }
        }
    }

    fn mk(id: &str, pairs: &[(&str, Value)]) -> SearchMatch {
        let mut metadata = serde_json::Map::new();
        for (k, v) in pairs {
            metadata.insert((*k).to_string(), v.clone());
        }
        SearchMatch {
            id: id.to_string(),
            score: 0.9,
            metadata,
        }
    }

    fn today_str() -> String {
        Utc::now().date_naive().format("%Y-%m-%d").to_string()
    }

    #[tokio::test]
    async fn crime_count_takes_the_special_path_without_the_model() {
        let today = today_str();
        let source = FakeSource(vec![
            mk("a", &[("category", json!("crime")), ("date", json!(today.clone()))]),
            mk("b", &[("category", json!("crime")), ("date", json!(today.clone()))]),
            mk("c", &[("category", json!("crime")), ("date", json!(today.clone()))]),
            mk("d", &[("category", json!("crime")), ("date", json!("2001-01-01"))]),
            mk("e", &[("category", json!("accident")), ("date", json!(today))]),
        ]);
        let generator = CountingGenerator::new();
        let engine = QueryEngine::new(source, generator);

        let outcome = engine
            .answer(&[0.1, 0.2], 5, Some("What are the total number of crimes today?"))
            .await
            .unwrap();

        let QueryOutcome::Answered(composed) = outcome else {
            panic!("expected an answer");
        };
        assert_eq!(composed.answer, "The total number of crimes today is 3.");
        assert_eq!(composed.count, Some(3));
        assert_eq!(composed.sources.len(), 3);
        assert_eq!(engine.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unmatched_questions_invoke_the_model_exactly_once() {
        let source = FakeSource(vec![
            mk("a", &[("location", json!("5th Ave"))]),
            mk("b", &[("location", json!("Main St"))]),
        ]);
        let generator = CountingGenerator::new();
        let engine = QueryEngine::new(source, generator);

        let outcome = engine
            .answer(&[0.1], 5, Some("What happened on 5th Avenue last week?"))
            .await
            .unwrap();

        let QueryOutcome::Answered(composed) = outcome else {
            panic!("expected an answer");
        };
        assert_eq!(composed.answer, "model answer");
        assert_eq!(composed.sources.len(), 2);
        assert_eq!(composed.count, None);
        assert_eq!(engine.generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_question_returns_matches_without_synthesis() {
        let source = FakeSource(vec![mk("a", &[]), mk("b", &[])]);
        let generator = CountingGenerator::new();
        let engine = QueryEngine::new(source, generator);

        let outcome = engine.answer(&[0.1], 5, None).await.unwrap();

        let QueryOutcome::MatchesOnly(matches) = outcome else {
            panic!("expected matches-only");
        };
        assert_eq!(matches.len(), 2);
        assert_eq!(engine.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn results_never_exceed_requested_top_k() {
        let source = FakeSource(vec![mk("a", &[]), mk("b", &[]), mk("c", &[]), mk("d", &[])]);
        let engine = QueryEngine::new(source, CountingGenerator::new());

        let outcome = engine.answer(&[0.1], 2, None).await.unwrap();

        let QueryOutcome::MatchesOnly(matches) = outcome else {
            panic!("expected matches-only");
        };
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn generation_failure_still_carries_the_sources() {
        let source = FakeSource(vec![mk("a", &[]), mk("b", &[])]);
        let engine = QueryEngine::new(source, FailingGenerator);

        let err = engine
            .answer(&[0.1], 5, Some("tell me something"))
            .await
            .unwrap_err();

        match err {
            EngineError::Generation { message, sources } => {
                assert!(message.contains("provider timed out"));
                assert_eq!(sources.len(), 2);
            }
            other => panic!("expected Generation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn safest_line_scenario_names_the_best_line() {
        let source = FakeSource(vec![
            mk("a", &[("line", json!("U1")), ("incident_count", json!(4))]),
            mk("b", &[("line", json!("U2")), ("incident_count", json!(1))]),
            mk("c", &[("line", json!("U3")), ("incident_count", json!(7))]),
        ]);
        let generator = CountingGenerator::new();
        let engine = QueryEngine::new(source, generator);

        let outcome = engine
            .answer(&[0.1], 5, Some("What are the safest lines in the last 7 days?"))
            .await
            .unwrap();

        let QueryOutcome::Answered(composed) = outcome else {
            panic!("expected an answer");
        };
        assert_eq!(
            composed.answer,
            "The safest line in the last 7 days is the U2 with 1 incidents."
        );
        assert_eq!(composed.sources.len(), 3);
        assert_eq!(engine.generator.calls.load(Ordering::SeqCst), 0);
    }
}
