//! Summarization and zero-shot classification capabilities.
//!
//! The router only sees the [`Summarizer`] and [`Classifier`] traits. The
//! bundled [`HfInferenceClient`] talks to the Hugging Face Inference API.

use std::time::Duration;

use digest_core::LabelSet;
use digest_logging::digest_info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_SUMMARY_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "MoritzLaurer/DeBERTa-v3-base-mnli-fever-anli";

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    Transport(String),
    #[error("inference endpoint returned {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("unexpected inference response: {0}")]
    MalformedResponse(String),
    #[error("label {0:?} missing from classifier response")]
    MissingLabel(String),
}

#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, InferenceError>;
}

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    /// Multi-label scores, one per label, in the order of `labels`.
    async fn classify(&self, text: &str, labels: &LabelSet) -> Result<Vec<f32>, InferenceError>;
}

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    pub base_url: String,
    pub api_token: Option<String>,
    pub summary_model: String,
    pub classifier_model: String,
    pub request_timeout: Option<Duration>,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_INFERENCE_URL.to_string(),
            api_token: None,
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            classifier_model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HfInferenceClient {
    settings: InferenceSettings,
    client: reqwest::Client,
}

impl HfInferenceClient {
    pub fn new(settings: InferenceSettings) -> Result<Self, InferenceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| InferenceError::Transport(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), model)
    }

    async fn post<B, R>(&self, model: &str, body: &B) -> Result<R, InferenceError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let mut request = self.client.post(self.model_url(model)).json(body);
        if let Some(token) = self.settings.api_token.as_deref() {
            request = request.bearer_auth(token);
        }

        digest_info!("Running inference with {}", model);
        let response = request
            .send()
            .await
            .map_err(|err| InferenceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|err| InferenceError::MalformedResponse(err.to_string()))
    }
}

#[derive(Serialize)]
struct SummaryRequest<'a> {
    inputs: &'a str,
    parameters: SummaryParameters,
}

#[derive(Serialize)]
struct SummaryParameters {
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
    multi_label: bool,
}

/// Zero-shot output comes back sorted by score, in one of two shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Columns { labels: Vec<String>, scores: Vec<f32> },
    Pairs(Vec<LabelScore>),
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

impl ZeroShotResponse {
    fn into_pairs(self) -> Result<Vec<(String, f32)>, InferenceError> {
        match self {
            ZeroShotResponse::Columns { labels, scores } => {
                if labels.len() != scores.len() {
                    return Err(InferenceError::MalformedResponse(format!(
                        "{} labels but {} scores",
                        labels.len(),
                        scores.len()
                    )));
                }
                Ok(labels.into_iter().zip(scores).collect())
            }
            ZeroShotResponse::Pairs(pairs) => {
                Ok(pairs.into_iter().map(|p| (p.label, p.score)).collect())
            }
        }
    }
}

/// Puts scores back into the caller's label order.
fn scores_in_label_order(
    labels: &LabelSet,
    pairs: &[(String, f32)],
) -> Result<Vec<f32>, InferenceError> {
    labels
        .as_slice()
        .iter()
        .map(|label| {
            pairs
                .iter()
                .find(|(candidate, _)| candidate == label)
                .map(|(_, score)| *score)
                .ok_or_else(|| InferenceError::MissingLabel(label.clone()))
        })
        .collect()
}

#[async_trait::async_trait]
impl Summarizer for HfInferenceClient {
    async fn summarize(&self, text: &str) -> Result<String, InferenceError> {
        let request = SummaryRequest {
            inputs: text,
            parameters: SummaryParameters { do_sample: false },
        };
        let items: Vec<SummaryItem> = self.post(&self.settings.summary_model, &request).await?;
        items
            .into_iter()
            .next()
            .map(|item| item.summary_text)
            .ok_or_else(|| InferenceError::MalformedResponse("empty summary list".into()))
    }
}

#[async_trait::async_trait]
impl Classifier for HfInferenceClient {
    async fn classify(&self, text: &str, labels: &LabelSet) -> Result<Vec<f32>, InferenceError> {
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels.as_slice(),
                multi_label: true,
            },
        };
        let response: ZeroShotResponse =
            self.post(&self.settings.classifier_model, &request).await?;
        scores_in_label_order(labels, &response.into_pairs()?)
    }
}
