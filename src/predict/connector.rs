// src/predict/connector.rs
use thiserror::Error;

use crate::encoder::EncodedPayload;

/// How a prediction exchange can go wrong, one variant per failure class.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The endpoint answered with an HTTP status other than 200.
    #[error("server returned status {0}")]
    Server(u16),
    /// Connection, DNS, TLS or read failure; the underlying message is kept verbatim.
    #[error("{0}")]
    Transport(String),
    /// A 200 response whose body did not carry a usable `predicted_name`.
    #[error("malformed prediction response: {0}")]
    Malformed(String),
}

/// Trait defining the interface to the prediction endpoint
pub trait Predictor: Send + Sync {
    /// Submit an encoded image and return the predicted label
    fn predict(&self, payload: &EncodedPayload) -> Result<String, PredictionError>;
}
