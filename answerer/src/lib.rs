//! Question-answering pipeline with a single public entry point.
//!
//! [`Answerer::ask`] runs five strictly ordered stages per request:
//! embed the question, retrieve top-K context from the FAQ store,
//! assemble the prompt, stream a completion from the LLM, and return
//! the answer together with the retrieved items. Each stage consumes
//! the previous stage's output; the first failure terminates the
//! pipeline with the stage recorded in [`AskError`]. There are no
//! partial answers and no retries.

mod cfg;
mod error;
pub mod prompt;

pub use cfg::PipelineConfig;
pub use error::AskError;

use std::sync::Arc;

use tracing::{debug, instrument};

use embedder::{FeatureExtractionClient, TextEmbedder};
use faq_store::{ContextSource, FaqStore, RetrievedItem};
use llm_service::{OllamaGenerator, TextGenerator};

/// Successful pipeline result: the model answer plus the context that
/// informed it, in the store's ascending-distance order.
#[derive(Clone, Debug)]
pub struct QaAnswer {
    pub answer: String,
    pub retrieved: Vec<RetrievedItem>,
}

/// The pipeline orchestrator.
///
/// Dependencies are injected once at construction and shared read-only
/// by every request; nothing here mutates them, so concurrent `ask`
/// calls need no locking beyond what the clients provide themselves.
pub struct Answerer {
    embedder: Arc<dyn TextEmbedder>,
    source: Arc<dyn ContextSource>,
    generator: Arc<dyn TextGenerator>,
    default_top_k: u64,
}

impl Answerer {
    /// Wires the orchestrator from already-built components.
    pub fn new(
        embedder: Arc<dyn TextEmbedder>,
        source: Arc<dyn ContextSource>,
        generator: Arc<dyn TextGenerator>,
        default_top_k: u64,
    ) -> Self {
        Self {
            embedder,
            source,
            generator,
            default_top_k: default_top_k.max(1),
        }
    }

    /// Builds the production pipeline from a [`PipelineConfig`].
    ///
    /// # Errors
    /// Returns the failing component's error if a client cannot be
    /// constructed (bad endpoint, bad store config).
    pub fn from_config(cfg: &PipelineConfig) -> Result<Self, AskError> {
        let embedder = FeatureExtractionClient::new(cfg.embedding_config())?;
        let store = FaqStore::new(cfg.store_config())?;
        let generator = OllamaGenerator::new(cfg.generator_config())?;

        Ok(Self::new(
            Arc::new(embedder),
            Arc::new(store),
            Arc::new(generator),
            cfg.top_k,
        ))
    }

    /// Default `top_k` applied when the caller passes `None`.
    pub fn default_top_k(&self) -> u64 {
        self.default_top_k
    }

    /// Answers `question` from the FAQ corpus.
    ///
    /// Empty retrieval is not a failure: the prompt falls back to the
    /// no-context sentinel and generation still runs.
    ///
    /// # Errors
    /// Propagates the first stage failure as [`AskError`] with the
    /// cause attached.
    #[instrument(skip_all)]
    pub async fn ask(&self, question: &str, top_k: Option<u64>) -> Result<QaAnswer, AskError> {
        let top_k = top_k.unwrap_or(self.default_top_k).max(1);

        debug!("embedding question (top_k={top_k})");
        let vector = self.embedder.embed(question).await?;

        debug!("retrieving context (dim={})", vector.len());
        let retrieved = self.source.search(vector, top_k).await?;

        debug!("assembling prompt from {} documents", retrieved.len());
        let documents: Vec<&str> = retrieved.iter().map(|item| item.document.as_str()).collect();
        let prompt = prompt::assemble(question, &documents);

        debug!("generating answer");
        let answer = self.generator.generate(&prompt).await?;

        Ok(QaAnswer { answer, retrieved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::{future::Future, pin::Pin};

    use embedder::EmbeddingError;
    use faq_store::RetrievalError;
    use llm_service::GenerationError;

    struct FixedEmbedder {
        vector: Vec<f32>,
    }

    impl TextEmbedder for FixedEmbedder {
        fn embed<'a>(
            &'a self,
            _text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, EmbeddingError>> + Send + 'a>>
        {
            let v = self.vector.clone();
            Box::pin(async move { Ok(v) })
        }
    }

    struct FailingEmbedder;

    impl TextEmbedder for FailingEmbedder {
        fn embed<'a>(
            &'a self,
            _text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, EmbeddingError>> + Send + 'a>>
        {
            Box::pin(async {
                Err(EmbeddingError::Decode("model output unreadable".into()))
            })
        }
    }

    struct FixedSource {
        items: Vec<RetrievedItem>,
    }

    impl ContextSource for FixedSource {
        fn search<'a>(
            &'a self,
            _vector: Vec<f32>,
            top_k: u64,
        ) -> Pin<
            Box<dyn Future<Output = Result<Vec<RetrievedItem>, RetrievalError>> + Send + 'a>,
        > {
            let items: Vec<RetrievedItem> =
                self.items.iter().take(top_k as usize).cloned().collect();
            Box::pin(async move { Ok(items) })
        }
    }

    struct FailingSource;

    impl ContextSource for FailingSource {
        fn search<'a>(
            &'a self,
            _vector: Vec<f32>,
            _top_k: u64,
        ) -> Pin<
            Box<dyn Future<Output = Result<Vec<RetrievedItem>, RetrievalError>> + Send + 'a>,
        > {
            Box::pin(async { Err(RetrievalError::Qdrant("store unavailable".into())) })
        }
    }

    /// Records the prompt it was handed and returns a canned answer.
    struct RecordingGenerator {
        seen_prompt: Mutex<Option<String>>,
        answer: String,
    }

    impl RecordingGenerator {
        fn new(answer: &str) -> Self {
            Self {
                seen_prompt: Mutex::new(None),
                answer: answer.to_string(),
            }
        }
    }

    impl TextGenerator for RecordingGenerator {
        fn generate<'a>(
            &'a self,
            prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>
        {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            let answer = self.answer.clone();
            Box::pin(async move { Ok(answer) })
        }
    }

    struct UnreachableGenerator;

    impl TextGenerator for UnreachableGenerator {
        fn generate<'a>(
            &'a self,
            _prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>
        {
            Box::pin(async {
                Err(GenerationError::InvalidEndpoint("unreachable".into()))
            })
        }
    }

    fn item(document: &str, distance: f32) -> RetrievedItem {
        RetrievedItem {
            document: document.to_string(),
            distance,
        }
    }

    #[tokio::test]
    async fn answers_from_the_single_matching_entry() {
        let generator = Arc::new(RecordingGenerator::new("We are open 9-5."));
        let answerer = Answerer::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.1; 4],
            }),
            Arc::new(FixedSource {
                items: vec![item("What are your hours? We are open 9-5.", 0.2)],
            }),
            generator.clone(),
            3,
        );

        let qa = answerer
            .ask("When are you open?", Some(1))
            .await
            .unwrap();

        assert_eq!(qa.answer, "We are open 9-5.");
        assert_eq!(qa.retrieved.len(), 1);
        assert_eq!(
            qa.retrieved[0].document,
            "What are your hours? We are open 9-5."
        );

        // The prompt handed to the model carries exactly that context.
        let prompt = generator.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("What are your hours? We are open 9-5."));
        assert!(prompt.contains("When are you open?"));
        assert!(!prompt.contains(prompt::NO_CONTEXT_SENTINEL));
    }

    #[tokio::test]
    async fn empty_corpus_still_completes_with_sentinel_prompt() {
        let generator = Arc::new(RecordingGenerator::new("I don't know."));
        let answerer = Answerer::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.0; 4],
            }),
            Arc::new(FixedSource { items: vec![] }),
            generator.clone(),
            3,
        );

        let qa = answerer.ask("When are you open?", None).await.unwrap();

        assert_eq!(qa.answer, "I don't know.");
        assert!(qa.retrieved.is_empty());

        let prompt = generator.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains(prompt::NO_CONTEXT_SENTINEL));
    }

    #[tokio::test]
    async fn retrieval_order_is_preserved_end_to_end() {
        let answerer = Answerer::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.0; 4],
            }),
            Arc::new(FixedSource {
                items: vec![item("a", 0.1), item("b", 0.5), item("c", 0.9)],
            }),
            Arc::new(RecordingGenerator::new("ok")),
            3,
        );

        let qa = answerer.ask("q", Some(3)).await.unwrap();
        let docs: Vec<&str> = qa.retrieved.iter().map(|i| i.document.as_str()).collect();
        assert_eq!(docs, vec!["a", "b", "c"]);
        assert!(
            qa.retrieved
                .windows(2)
                .all(|w| w[0].distance <= w[1].distance)
        );
    }

    #[tokio::test]
    async fn generator_failure_terminates_in_generate_stage() {
        let answerer = Answerer::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.0; 4],
            }),
            Arc::new(FixedSource {
                items: vec![item("doc", 0.3)],
            }),
            Arc::new(UnreachableGenerator),
            3,
        );

        let err = answerer.ask("q", None).await.unwrap_err();
        assert_eq!(err.stage(), "generate");
        assert!(matches!(err, AskError::Generate(_)));
    }

    #[tokio::test]
    async fn embedder_failure_terminates_in_embed_stage() {
        let answerer = Answerer::new(
            Arc::new(FailingEmbedder),
            Arc::new(FixedSource { items: vec![] }),
            Arc::new(RecordingGenerator::new("never reached")),
            3,
        );

        let err = answerer.ask("q", None).await.unwrap_err();
        assert_eq!(err.stage(), "embed");
    }

    #[tokio::test]
    async fn store_failure_terminates_in_retrieve_stage() {
        let answerer = Answerer::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.0; 4],
            }),
            Arc::new(FailingSource),
            Arc::new(RecordingGenerator::new("never reached")),
            3,
        );

        let err = answerer.ask("q", None).await.unwrap_err();
        assert_eq!(err.stage(), "retrieve");
    }

    #[tokio::test]
    async fn sparse_corpus_returns_fewer_than_top_k() {
        let answerer = Answerer::new(
            Arc::new(FixedEmbedder {
                vector: vec![0.0; 4],
            }),
            Arc::new(FixedSource {
                items: vec![item("only one", 0.4)],
            }),
            Arc::new(RecordingGenerator::new("ok")),
            3,
        );

        let qa = answerer.ask("q", Some(5)).await.unwrap();
        assert_eq!(qa.retrieved.len(), 1);
    }
}
