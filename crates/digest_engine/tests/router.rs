use std::fs;
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use digest_core::{LabelSet, OutputKind, OutputPayload};
use digest_engine::{
    ArticleTextExtractor, Classifier, FailureKind, FetchError, FetchMetadata, FetchOutput,
    Fetcher, FileOutputSink, InferenceError, RouteError, Router, Summarizer,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[derive(Default, Clone)]
struct Calls {
    fetched: Arc<Mutex<Vec<String>>>,
    summarized: Arc<Mutex<Vec<String>>>,
    classified: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

struct StaticFetcher {
    html: Option<String>,
    calls: Calls,
}

#[async_trait::async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.calls.fetched.lock().unwrap().push(url.to_string());
        let Some(html) = self.html.clone() else {
            return Err(FetchError {
                kind: FailureKind::Network,
                message: "unreachable".into(),
            });
        };
        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                redirect_count: 0,
                content_type: Some("text/html".into()),
                encoding_label: "UTF-8".into(),
                byte_len: html.len() as u64,
            },
            html,
        })
    }
}

struct EchoSummarizer {
    calls: Calls,
    fail: bool,
}

#[async_trait::async_trait]
impl Summarizer for EchoSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, InferenceError> {
        self.calls.summarized.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(InferenceError::Transport("model offline".into()));
        }
        Ok(format!("summary of {} chars", text.chars().count()))
    }
}

struct IndexClassifier {
    calls: Calls,
}

#[async_trait::async_trait]
impl Classifier for IndexClassifier {
    async fn classify(&self, text: &str, labels: &LabelSet) -> Result<Vec<f32>, InferenceError> {
        self.calls
            .classified
            .lock()
            .unwrap()
            .push((text.to_string(), labels.as_slice().to_vec()));
        Ok((0..labels.len()).map(|i| i as f32 / 10.0).collect())
    }
}

fn router_with(html: Option<&str>, fail_summary: bool) -> (Router, Calls) {
    digest_logging::initialize_for_tests();
    let calls = Calls::default();
    let router = Router::new(
        Box::new(StaticFetcher {
            html: html.map(str::to_string),
            calls: calls.clone(),
        }),
        Box::new(ArticleTextExtractor),
        Box::new(EchoSummarizer {
            calls: calls.clone(),
            fail: fail_summary,
        }),
        Box::new(IndexClassifier {
            calls: calls.clone(),
        }),
    );
    (router, calls)
}

fn arg(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn article_file_is_truncated_before_summarizing() {
    let temp = TempDir::new().unwrap();
    let article = temp.path().join("ARTICLE.txt");
    fs::write(&article, "Breaking news today. ".repeat(100)).unwrap();

    let (router, calls) = router_with(None, false);
    let outputs = router.route(&[arg(&article)]).await.unwrap();

    let summarized = calls.summarized.lock().unwrap().clone();
    assert_eq!(summarized.len(), 1);
    assert_eq!(summarized[0].chars().count(), 1024);
    assert!(calls.fetched.lock().unwrap().is_empty());

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].kind, OutputKind::ArticleSummary);
    assert_eq!(outputs[0].text(), Some("summary of 1024 chars"));
    assert_eq!(outputs[0].dir.as_deref(), Some(temp.path()));
}

#[tokio::test]
async fn labels_without_text_file_produce_no_output() {
    let temp = TempDir::new().unwrap();
    let labels = temp.path().join("CLASSIFIERS.csv");
    fs::write(&labels, "politics,sports,tech\n").unwrap();

    let (router, calls) = router_with(None, false);
    let outputs = router.route(&[arg(&labels)]).await.unwrap();

    assert!(outputs.is_empty());
    assert!(calls.classified.lock().unwrap().is_empty());
}

#[tokio::test]
async fn paired_classifier_files_keep_label_order() {
    let temp = TempDir::new().unwrap();
    let labels = temp.path().join("CLASSIFIERS.csv");
    let text_dir = temp.path().join("texts");
    fs::create_dir(&text_dir).unwrap();
    let text = text_dir.join("CLASSIFIERS_TXT.txt");
    fs::write(&labels, "politics,sports,tech\nunused\n").unwrap();
    fs::write(&text, b"Election \xffresults").unwrap();

    let (router, calls) = router_with(None, false);
    let outputs = router.route(&[arg(&labels), arg(&text)]).await.unwrap();

    let classified = calls.classified.lock().unwrap().clone();
    assert_eq!(
        classified,
        vec![(
            "Election results".to_string(),
            vec!["politics".to_string(), "sports".to_string(), "tech".to_string()]
        )]
    );
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].kind, OutputKind::ClassifierScores);
    assert_eq!(outputs[0].scores(), Some(&[0.0, 0.1, 0.2][..]));
    assert_eq!(outputs[0].dir.as_deref(), Some(text_dir.as_path()));
}

#[tokio::test]
async fn url_yields_raw_extracted_text() {
    let (router, calls) = router_with(
        Some("<html><body><article><p>Full story</p></article></body></html>"),
        false,
    );
    let outputs = router.route(&["https://example.com/story"]).await.unwrap();

    assert_eq!(
        calls.fetched.lock().unwrap().clone(),
        vec!["https://example.com/story".to_string()]
    );
    assert!(calls.summarized.lock().unwrap().is_empty());
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].kind, OutputKind::ExtractedArticle);
    assert_eq!(outputs[0].payload, OutputPayload::Text("Full story".into()));
    assert_eq!(outputs[0].dir, None);
}

#[tokio::test]
async fn aggregator_link_is_decoded_before_fetching() {
    let target = "https://www.example.org/world/some-story";
    let mut payload = vec![0x08, 0x13, 0x22, target.len() as u8];
    payload.extend_from_slice(target.as_bytes());
    payload.extend_from_slice(&[0xD2, 0x01, 0x00]);
    let link = format!(
        "https://news.google.com/rss/articles/{}?oc=5",
        URL_SAFE_NO_PAD.encode(payload)
    );

    let (router, calls) = router_with(Some("<article>Decoded story</article>"), false);
    let outputs = router.route(&[link]).await.unwrap();

    assert_eq!(calls.fetched.lock().unwrap().clone(), vec![target.to_string()]);
    assert_eq!(outputs[0].text(), Some("Decoded story"));
}

#[tokio::test]
async fn url_without_text_tags_yields_empty_text() {
    let (router, _calls) = router_with(Some("<html><body><table></table></body></html>"), false);
    let outputs = router.route(&["http://example.com"]).await.unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].text(), Some(""));
}

#[tokio::test]
async fn fetch_failure_stops_the_run() {
    let temp = TempDir::new().unwrap();
    let article = temp.path().join("ARTICLE.txt");
    fs::write(&article, "text").unwrap();

    let (router, calls) = router_with(None, false);
    let err = router
        .route(&["https://example.com".to_string(), arg(&article)])
        .await
        .unwrap_err();

    assert!(matches!(err, RouteError::Fetch(FetchError { kind: FailureKind::Network, .. })));
    assert!(calls.summarized.lock().unwrap().is_empty());
}

#[tokio::test]
async fn inference_failure_propagates() {
    let temp = TempDir::new().unwrap();
    let article = temp.path().join("ARTICLE.txt");
    fs::write(&article, "text").unwrap();

    let (router, _calls) = router_with(None, true);
    let err = router.route(&[arg(&article)]).await.unwrap_err();
    assert!(matches!(err, RouteError::Inference(InferenceError::Transport(_))));
}

#[tokio::test]
async fn unreadable_article_is_skipped() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone/ARTICLE.txt");
    let present = temp.path().join("ARTICLE.TXT");
    fs::write(&present, "short").unwrap();

    let (router, calls) = router_with(None, false);
    let outputs = router.route(&[arg(&missing), arg(&present)]).await.unwrap();

    assert_eq!(calls.summarized.lock().unwrap().clone(), vec!["short".to_string()]);
    assert_eq!(outputs.len(), 1);
}

#[tokio::test]
async fn run_writes_outputs_through_sink() {
    let temp = TempDir::new().unwrap();
    let article = temp.path().join("ARTICLE.txt");
    fs::write(&article, "hello").unwrap();

    let (router, _calls) = router_with(None, false);
    let sink = FileOutputSink::new(temp.path().to_path_buf());
    let emitted = router
        .run(&[arg(&article), "unrelated.md".to_string()], &sink)
        .await
        .unwrap();

    assert_eq!(emitted, 1);
    assert_eq!(
        fs::read_to_string(temp.path().join("OUTPUT_article-summary.txt")).unwrap(),
        "summary of 5 chars"
    );
}
