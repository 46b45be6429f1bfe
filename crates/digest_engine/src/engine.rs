use std::path::Path;

use digest_core::{
    output_dir_for, plan, truncate_chars, Effect, Output, OutputKind, OutputPayload,
    MAX_SUMMARY_INPUT_CHARS,
};
use digest_logging::{digest_debug, digest_error, digest_info, digest_warn};
use thiserror::Error;

use crate::decode::read_text_lossy;
use crate::extract::{Extraction, Extractor};
use crate::fetch::Fetcher;
use crate::inference::{Classifier, InferenceError, Summarizer};
use crate::labels::read_label_row;
use crate::persist::{MemorySink, OutputSink, PersistError};
use crate::redirect::decode_redirect;
use crate::FetchError;

/// Failures that stop the whole run.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("writing output failed: {0}")]
    Persist(#[from] PersistError),
}

/// Executes the effects planned from the invocation arguments, one at a time.
pub struct Router {
    fetcher: Box<dyn Fetcher>,
    extractor: Box<dyn Extractor>,
    summarizer: Box<dyn Summarizer>,
    classifier: Box<dyn Classifier>,
}

impl Router {
    pub fn new(
        fetcher: Box<dyn Fetcher>,
        extractor: Box<dyn Extractor>,
        summarizer: Box<dyn Summarizer>,
        classifier: Box<dyn Classifier>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            summarizer,
            classifier,
        }
    }

    /// Processes `args` in order, handing every output to `sink` as soon as it exists.
    ///
    /// Returns the number of outputs emitted.
    pub async fn run<S: AsRef<str>>(
        &self,
        args: &[S],
        sink: &dyn OutputSink,
    ) -> Result<usize, RouteError> {
        let effects = plan(args);
        digest_info!(
            "Planned {} effect(s) from {} argument(s)",
            effects.len(),
            args.len()
        );

        let mut emitted = 0;
        for effect in effects {
            if let Some(output) = self.execute(effect).await? {
                sink.emit(output)?;
                emitted += 1;
            }
        }
        Ok(emitted)
    }

    /// Like [`Router::run`], collecting the outputs instead of writing them.
    pub async fn route<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<Output>, RouteError> {
        let sink = MemorySink::new();
        self.run(args, &sink).await?;
        Ok(sink.into_outputs())
    }

    async fn execute(&self, effect: Effect) -> Result<Option<Output>, RouteError> {
        match effect {
            Effect::SummarizeArticleFile { path } => self.summarize_file(&path).await,
            Effect::ClassifyFile {
                labels_path,
                text_path,
            } => self.classify_file(&labels_path, &text_path).await,
            Effect::HarvestUrl { url } => self.harvest_url(&url).await.map(Some),
        }
    }

    async fn summarize_file(&self, path: &str) -> Result<Option<Output>, RouteError> {
        let article = match read_text_lossy(Path::new(path)) {
            Ok(text) => text,
            Err(err) => {
                digest_error!("Failed to read article file {}: {}", path, err);
                return Ok(None);
            }
        };

        let input = truncate_chars(&article, MAX_SUMMARY_INPUT_CHARS);
        if input.len() < article.len() {
            digest_debug!(
                "Truncated {} to {} characters for summarization",
                path,
                MAX_SUMMARY_INPUT_CHARS
            );
        }

        let summary = self.summarizer.summarize(input).await?;
        Ok(Some(Output {
            kind: OutputKind::ArticleSummary,
            payload: OutputPayload::Text(summary),
            dir: output_dir_for(path),
        }))
    }

    async fn classify_file(
        &self,
        labels_path: &str,
        text_path: &str,
    ) -> Result<Option<Output>, RouteError> {
        let labels = match read_label_row(Path::new(labels_path)) {
            Ok(labels) => labels,
            Err(err) => {
                digest_error!("Failed to read labels from {}: {}", labels_path, err);
                return Ok(None);
            }
        };
        let text = match read_text_lossy(Path::new(text_path)) {
            Ok(text) => text,
            Err(err) => {
                digest_error!("Failed to read classifier text {}: {}", text_path, err);
                return Ok(None);
            }
        };

        digest_info!("Classifying {} against {} label(s)", text_path, labels.len());
        let scores = self.classifier.classify(&text, &labels).await?;
        Ok(Some(Output {
            kind: OutputKind::ClassifierScores,
            payload: OutputPayload::Scores(scores),
            dir: output_dir_for(text_path),
        }))
    }

    async fn harvest_url(&self, url: &str) -> Result<Output, RouteError> {
        let target = decode_redirect(url);
        let fetched = self.fetcher.fetch(&target).await?;
        let extraction = self.extractor.extract(&fetched.html);
        match &extraction {
            Extraction::Structured(text) => {
                digest_info!("Extracted {} chars from <article> at {}", text.len(), target);
            }
            Extraction::Fallback(text) => {
                digest_info!("Extracted {} chars from fallback tags at {}", text.len(), target);
            }
            Extraction::Empty => {
                digest_warn!("No text content found at {}", target);
            }
        }

        Ok(Output {
            kind: OutputKind::ExtractedArticle,
            payload: OutputPayload::Text(extraction.into_text()),
            dir: None,
        })
    }
}
