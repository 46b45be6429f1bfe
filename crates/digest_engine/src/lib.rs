//! Digest engine: input resolution, text extraction and output IO.
mod decode;
mod engine;
mod extract;
mod fetch;
mod inference;
mod labels;
mod persist;
mod redirect;
mod types;

pub use decode::{decode_html, decode_utf8_dropping_invalid, read_text_lossy, DecodedHtml};
pub use engine::{RouteError, Router};
pub use extract::{ArticleTextExtractor, Extraction, Extractor, FALLBACK_TAGS, NOTICE_TARGET};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use inference::{
    Classifier, HfInferenceClient, InferenceError, InferenceSettings, Summarizer,
    DEFAULT_CLASSIFIER_MODEL, DEFAULT_INFERENCE_URL, DEFAULT_SUMMARY_MODEL,
};
pub use labels::{parse_label_row, read_label_row, LabelError};
pub use persist::{
    ensure_output_dir, render_payload, AtomicFileWriter, FileOutputSink, MemorySink, OutputSink,
    PersistError,
};
pub use redirect::{decode_redirect, is_aggregator_redirect, padding_len, AGGREGATOR_MARKER};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
