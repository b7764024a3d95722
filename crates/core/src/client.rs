use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::Config,
    error::{ClientError, Result},
    types::{AnalyzeRequest, EvaluationRecord, FeedbackDocument},
};

pub const ANALYZE_PATH: &str = "/analyze";
pub const EVALUATIONS_PATH: &str = "/evaluations";
pub const FEEDBACK_PATH: &str = "/feedback_logs";

/// The three calls the dashboard makes against the analysis service.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Ask the service to analyze a video. The response body is ignored.
    async fn submit_for_analysis(&self, url: &str) -> Result<()>;

    /// Every stored evaluation, unfiltered.
    async fn list_evaluations(&self) -> Result<Vec<EvaluationRecord>>;

    /// The latest feedback report for a video.
    async fn fetch_feedback(&self, key: &str) -> Result<FeedbackDocument>;
}

#[derive(Clone, Debug)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &'static str,
) -> Result<T> {
    let bytes = ensure_success(response).await?.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { endpoint, source })
}

#[async_trait]
impl AnalysisApi for ServiceClient {
    async fn submit_for_analysis(&self, url: &str) -> Result<()> {
        debug!(url, "POST {}", ANALYZE_PATH);
        let response = self
            .http
            .post(self.endpoint(ANALYZE_PATH))
            .json(&AnalyzeRequest { youtube_url: url })
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn list_evaluations(&self) -> Result<Vec<EvaluationRecord>> {
        debug!("GET {}", EVALUATIONS_PATH);
        let response = self.http.get(self.endpoint(EVALUATIONS_PATH)).send().await?;
        let records: Vec<EvaluationRecord> = decode(response, EVALUATIONS_PATH).await?;
        debug!(count = records.len(), "evaluations received");
        Ok(records)
    }

    async fn fetch_feedback(&self, key: &str) -> Result<FeedbackDocument> {
        debug!(key, "GET {}", FEEDBACK_PATH);
        let response = self
            .http
            .get(self.endpoint(FEEDBACK_PATH))
            .query(&[("youtube_url", key)])
            .send()
            .await?;

        decode(response, FEEDBACK_PATH).await
    }
}
