// src/predict/client.rs
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use super::connector::{PredictionError, Predictor};
use crate::config::PredictionConfig;
use crate::encoder::EncodedPayload;

#[derive(Deserialize)]
struct PredictionResponse {
    predicted_name: String,
}

/// HTTP client for the prediction endpoint.
///
/// Performs exactly one POST per call: the payload goes out as
/// `{"<field>": "<base64 JPEG>"}`, a 200 comes back as
/// `{"predicted_name": "<label>"}`. No retries, no explicit timeout; the
/// client library defaults apply.
pub struct PredictionClient {
    config: PredictionConfig,
    client: Client,
}

impl PredictionClient {
    pub fn new(config: PredictionConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

impl Predictor for PredictionClient {
    fn predict(&self, payload: &EncodedPayload) -> Result<String, PredictionError> {
        let mut body = serde_json::Map::new();
        body.insert(
            self.config.field_name.clone(),
            serde_json::Value::String(payload.as_str().to_owned()),
        );

        info!(
            "posting {} byte payload to {}",
            payload.len(),
            self.config.endpoint
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(PredictionError::Server(status));
        }

        let text = response
            .text()
            .map_err(|e| PredictionError::Transport(e.to_string()))?;
        let parsed: PredictionResponse =
            serde_json::from_str(&text).map_err(|e| PredictionError::Malformed(e.to_string()))?;

        debug!("endpoint answered with label: {}", parsed.predicted_name);
        Ok(parsed.predicted_name)
    }
}
