use super::{CategoryScores, ToxicityModel};
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

const PREDICT_PATH: &str = "/predict";

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

// Some servers wrap the scores, others return them at the top level next to
// fields like "model" or an echo of "text".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Wrapped { scores: CategoryScores },
    Flat(Map<String, Value>),
}

/// Client for a Detoxify-compatible inference service.
///
/// Sends `POST {base_url}/predict` with `{"text": ...}` and expects a JSON
/// object mapping category names to scores.
#[derive(Clone, Debug)]
pub struct DetoxifyClient {
    client: reqwest::Client,
    endpoint: String,
}

impl DetoxifyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: build_endpoint(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ToxicityModel for DetoxifyClient {
    fn name(&self) -> &str {
        "detoxify"
    }

    async fn predict(&self, text: &str) -> Result<CategoryScores> {
        debug!("-> Sending to classifier: {}", text);

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { text })
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Classifier error {}: {}", status, body));
        }

        let body = resp.text().await.context("Failed to read classifier response")?;
        parse_predict_response(&body)
    }
}

fn build_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), PREDICT_PATH)
}

pub fn parse_predict_response(body: &str) -> Result<CategoryScores> {
    let parsed: PredictResponse = serde_json::from_str(body)
        .with_context(|| format!("Unexpected classifier response: {}", body))?;

    let scores: CategoryScores = match parsed {
        PredictResponse::Wrapped { scores } => scores,
        PredictResponse::Flat(fields) => fields
            .into_iter()
            .filter_map(|(name, value)| value.as_f64().map(|score| (name, score)))
            .collect(),
    };

    if scores.is_empty() {
        bail!("Classifier response has no category scores: {}", body);
    }
    Ok(scores)
}
