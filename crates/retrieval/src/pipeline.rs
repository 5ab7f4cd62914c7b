//! Question-answering orchestration.
//!
//! Runs the stages in a fixed order with no branching or retry. The first
//! failing stage aborts the run; a failing search is the one exception, since
//! the search delegate reports it and yields no hits.

use crate::answer::{AnswerGenerator, LlmAnswerGenerator};
use crate::context::build_context;
use crate::keywords::{KeywordExtractor, LlmKeywordExtractor};
use crate::loader::{DocumentLoader, PdfLoader};
use crate::search::{build_expression, SearchDelegate, SpotlightSearch};
use crate::types::{Document, QaRun};
use docseek_core::{AppConfig, AppError, AppResult};
use docseek_prompt::{load_prompt, KEYWORDS_EXTRACT, QA_ANSWER};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Number of leading search hits loaded as context by default.
pub const DEFAULT_TOP_K: usize = 3;

/// Context label used by default.
pub const DEFAULT_PIPELINE_LABEL: &str = "Candidate";

/// The question-answering pipeline.
pub struct Pipeline {
    keywords: Box<dyn KeywordExtractor>,
    search: Box<dyn SearchDelegate>,
    loader: Arc<dyn DocumentLoader>,
    answerer: Box<dyn AnswerGenerator>,
    top_k: usize,
    label: String,
}

impl Pipeline {
    pub fn new(
        keywords: impl KeywordExtractor + 'static,
        search: impl SearchDelegate + 'static,
        loader: impl DocumentLoader + 'static,
        answerer: impl AnswerGenerator + 'static,
    ) -> Self {
        Self {
            keywords: Box::new(keywords),
            search: Box::new(search),
            loader: Arc::new(loader),
            answerer: Box::new(answerer),
            top_k: DEFAULT_TOP_K,
            label: DEFAULT_PIPELINE_LABEL.to_string(),
        }
    }

    /// Wire the Ollama-backed stages, the configured search program and the
    /// PDF loader. Prompt overrides in the workspace are honored.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = docseek_llm::client_from_config(config)?;

        let keywords = LlmKeywordExtractor::new(client.clone(), config.keyword_model())
            .with_prompt(load_prompt(&config.workspace, KEYWORDS_EXTRACT)?);
        let answerer = LlmAnswerGenerator::new(client, &config.model)
            .with_prompt(load_prompt(&config.workspace, QA_ANSWER)?);

        tracing::debug!(
            "Pipeline wired: provider={}, model={}, keyword model={}, search={}",
            config.provider,
            config.model,
            config.keyword_model(),
            config.search.program
        );

        Ok(Self::new(
            keywords,
            SpotlightSearch::from_config(&config.search),
            PdfLoader::new(config.pipeline.load_policy),
            answerer,
        )
        .with_top_k(config.pipeline.top_k)
        .with_label(&config.pipeline.label))
    }

    /// Number of leading hits to load. Clamped to at least 1.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Answer `query` from the documents the search finds, optionally only
    /// under `scope`.
    ///
    /// The returned run carries every hit, not just the ones that were loaded.
    pub async fn run(&self, query: &str, scope: Option<&Path>) -> AppResult<QaRun> {
        tracing::info!("Answering query: {}", query);

        let keywords = self.keywords.extract(query).await?;
        let expression = build_expression(&keywords);
        let hits = self.search.search(&expression, scope).await;

        let selected = &hits[..hits.len().min(self.top_k)];
        tracing::info!(
            "Search returned {} hits, loading {}",
            hits.len(),
            selected.len()
        );

        let (answer, documents) = self.answer_from(query, selected).await?;

        Ok(QaRun {
            answer,
            keywords,
            hits,
            documents,
        })
    }

    /// Answer `question` from exactly the given files, skipping keyword
    /// extraction and search.
    pub async fn answer_files(&self, question: &str, paths: &[PathBuf]) -> AppResult<QaRun> {
        tracing::info!("Answering from {} explicit files", paths.len());

        let (answer, documents) = self.answer_from(question, paths).await?;

        Ok(QaRun {
            answer,
            keywords: Vec::new(),
            hits: paths.to_vec(),
            documents,
        })
    }

    /// Keyword extraction alone.
    pub async fn extract_keywords(&self, query: &str) -> AppResult<Vec<String>> {
        self.keywords.extract(query).await
    }

    async fn answer_from(
        &self,
        question: &str,
        paths: &[PathBuf],
    ) -> AppResult<(String, Vec<String>)> {
        let docs = self.load(paths).await?;
        let context = build_context(&docs, &self.label);
        let answer = self.answerer.answer(question, &context).await?;

        let sources = docs.iter().map(Document::source).map(str::to_string).collect();
        Ok((answer, sources))
    }

    /// Run the loader on the blocking pool; PDF parsing is CPU-bound.
    async fn load(&self, paths: &[PathBuf]) -> AppResult<Vec<Document>> {
        let loader = Arc::clone(&self.loader);
        let owned = paths.to_vec();

        tokio::task::spawn_blocking(move || loader.load(&owned))
            .await
            .map_err(|e| {
                AppError::document_load(
                    paths.first().cloned().unwrap_or_default(),
                    format!("loader task failed: {}", e),
                )
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedKeywords(Vec<String>);

    #[async_trait::async_trait]
    impl KeywordExtractor for FixedKeywords {
        async fn extract(&self, _query: &str) -> AppResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingKeywords;

    #[async_trait::async_trait]
    impl KeywordExtractor for FailingKeywords {
        async fn extract(&self, _query: &str) -> AppResult<Vec<String>> {
            Err(AppError::ModelUnavailable("connection refused".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSearch {
        hits: Vec<PathBuf>,
        calls: Arc<Mutex<Vec<(String, Option<PathBuf>)>>>,
    }

    #[async_trait::async_trait]
    impl SearchDelegate for RecordingSearch {
        async fn search(&self, expression: &str, scope: Option<&Path>) -> Vec<PathBuf> {
            self.calls
                .lock()
                .unwrap()
                .push((expression.to_string(), scope.map(Path::to_path_buf)));
            self.hits.clone()
        }
    }

    #[derive(Clone, Default)]
    struct StubLoader {
        seen: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl DocumentLoader for StubLoader {
        fn load(&self, paths: &[PathBuf]) -> AppResult<Vec<Document>> {
            self.seen.lock().unwrap().extend_from_slice(paths);
            Ok(paths
                .iter()
                .enumerate()
                .map(|(i, path)| Document::new(format!("resume {}", i + 1), path))
                .collect())
        }
    }

    struct FailingLoader;

    impl DocumentLoader for FailingLoader {
        fn load(&self, paths: &[PathBuf]) -> AppResult<Vec<Document>> {
            Err(AppError::document_load(&paths[0], "corrupt xref"))
        }
    }

    struct PanickingLoader;

    impl DocumentLoader for PanickingLoader {
        fn load(&self, _paths: &[PathBuf]) -> AppResult<Vec<Document>> {
            panic!("parser bug");
        }
    }

    /// Answers with the length of the context it was given.
    #[derive(Clone, Default)]
    struct ContextLengthAnswer {
        contexts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl AnswerGenerator for ContextLengthAnswer {
        async fn answer(&self, _question: &str, context: &str) -> AppResult<String> {
            self.contexts.lock().unwrap().push(context.to_string());
            Ok(context.len().to_string())
        }
    }

    fn five_hits() -> Vec<PathBuf> {
        (1..=5)
            .map(|i| PathBuf::from(format!("/resumes/candidate{}.pdf", i)))
            .collect()
    }

    #[tokio::test]
    async fn test_end_to_end_with_stubs() {
        let search = RecordingSearch {
            hits: five_hits(),
            ..Default::default()
        };
        let loader = StubLoader::default();
        let answerer = ContextLengthAnswer::default();

        let pipeline = Pipeline::new(
            FixedKeywords(vec!["AI".to_string(), "certification".to_string()]),
            search.clone(),
            loader.clone(),
            answerer.clone(),
        );

        let run = pipeline
            .run("Find candidates with AI certification", None)
            .await
            .unwrap();

        assert_eq!(
            *search.calls.lock().unwrap(),
            vec![("AI OR certification".to_string(), None::<PathBuf>)]
        );
        assert_eq!(loader.seen.lock().unwrap().as_slice(), &five_hits()[..3]);

        let contexts = answerer.contexts.lock().unwrap();
        assert!(contexts[0].starts_with("Candidate 1\n---\nresume 1\n\n"));
        assert!(contexts[0].contains("Candidate 3\n---\nresume 3\n\n"));
        assert!(!contexts[0].contains("Candidate 4"));

        assert_eq!(run.answer, contexts[0].len().to_string());
        assert_eq!(run.hits, five_hits());
        assert_eq!(run.keywords, vec!["AI", "certification"]);
        assert_eq!(run.documents.len(), 3);
        assert_eq!(run.documents[0], "/resumes/candidate1.pdf");
    }

    #[tokio::test]
    async fn test_scope_is_forwarded() {
        let search = RecordingSearch::default();
        let pipeline = Pipeline::new(
            FixedKeywords(vec!["coursera".to_string()]),
            search.clone(),
            StubLoader::default(),
            ContextLengthAnswer::default(),
        );

        pipeline
            .run("coursera", Some(Path::new("/Users/me/Resumes")))
            .await
            .unwrap();

        let calls = search.calls.lock().unwrap();
        assert_eq!(calls[0].1.as_deref(), Some(Path::new("/Users/me/Resumes")));
    }

    #[tokio::test]
    async fn test_fewer_hits_than_top_k() {
        let search = RecordingSearch {
            hits: five_hits()[..2].to_vec(),
            ..Default::default()
        };
        let loader = StubLoader::default();
        let pipeline = Pipeline::new(
            FixedKeywords(vec!["AI".to_string()]),
            search,
            loader.clone(),
            ContextLengthAnswer::default(),
        );

        let run = pipeline.run("AI", None).await.unwrap();
        assert_eq!(loader.seen.lock().unwrap().len(), 2);
        assert_eq!(run.hits.len(), 2);
    }

    #[tokio::test]
    async fn test_no_hits_answers_over_empty_context() {
        let answerer = ContextLengthAnswer::default();
        let pipeline = Pipeline::new(
            FixedKeywords(Vec::new()),
            RecordingSearch::default(),
            StubLoader::default(),
            answerer.clone(),
        );

        let run = pipeline.run("anything", None).await.unwrap();
        assert_eq!(run.answer, "0");
        assert!(run.hits.is_empty());
        assert_eq!(answerer.contexts.lock().unwrap()[0], "");
    }

    #[tokio::test]
    async fn test_top_k_and_label() {
        let search = RecordingSearch {
            hits: five_hits(),
            ..Default::default()
        };
        let loader = StubLoader::default();
        let answerer = ContextLengthAnswer::default();
        let pipeline = Pipeline::new(
            FixedKeywords(vec!["AI".to_string()]),
            search,
            loader.clone(),
            answerer.clone(),
        )
        .with_top_k(1)
        .with_label("Resume");

        pipeline.run("AI", None).await.unwrap();
        assert_eq!(loader.seen.lock().unwrap().len(), 1);
        assert_eq!(
            answerer.contexts.lock().unwrap()[0],
            "Resume 1\n---\nresume 1\n\n"
        );
    }

    #[tokio::test]
    async fn test_keyword_failure_aborts_run() {
        let search = RecordingSearch::default();
        let answerer = ContextLengthAnswer::default();
        let pipeline = Pipeline::new(
            FailingKeywords,
            search.clone(),
            StubLoader::default(),
            answerer.clone(),
        );

        let result = pipeline.run("AI", None).await;
        assert!(matches!(result, Err(AppError::ModelUnavailable(_))));
        assert!(search.calls.lock().unwrap().is_empty());
        assert!(answerer.contexts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_aborts_run() {
        let answerer = ContextLengthAnswer::default();
        let pipeline = Pipeline::new(
            FixedKeywords(vec!["AI".to_string()]),
            RecordingSearch {
                hits: five_hits(),
                ..Default::default()
            },
            FailingLoader,
            answerer.clone(),
        );

        let result = pipeline.run("AI", None).await;
        assert!(matches!(result, Err(AppError::DocumentLoad { .. })));
        assert!(answerer.contexts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_loader_panic_is_load_error() {
        let answerer = ContextLengthAnswer::default();
        let pipeline = Pipeline::new(
            FixedKeywords(vec!["AI".to_string()]),
            RecordingSearch {
                hits: five_hits(),
                ..Default::default()
            },
            PanickingLoader,
            answerer.clone(),
        );

        match pipeline.run("AI", None).await {
            Err(AppError::DocumentLoad { path, .. }) => assert_eq!(path, five_hits()[0]),
            other => panic!("Expected DocumentLoad, got {:?}", other),
        }
        assert!(answerer.contexts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_answer_files_loads_every_file() {
        let loader = StubLoader::default();
        let search = RecordingSearch::default();
        let pipeline = Pipeline::new(
            FailingKeywords,
            search.clone(),
            loader.clone(),
            ContextLengthAnswer::default(),
        );

        let run = pipeline.answer_files("Who?", &five_hits()).await.unwrap();

        assert_eq!(loader.seen.lock().unwrap().len(), 5);
        assert!(search.calls.lock().unwrap().is_empty());
        assert!(run.keywords.is_empty());
        assert_eq!(run.documents.len(), 5);
    }

    #[test]
    fn test_top_k_clamped() {
        let pipeline = Pipeline::new(
            FixedKeywords(Vec::new()),
            RecordingSearch::default(),
            StubLoader::default(),
            ContextLengthAnswer::default(),
        )
        .with_top_k(0);
        assert_eq!(pipeline.top_k(), 1);
        assert_eq!(pipeline.label(), "Candidate");
    }
}
