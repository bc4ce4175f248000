// src/lib.rs
//! Image upload and prediction exchange for a photo classification service.
//!
//! Encodes an image as base64 JPEG, posts it to a prediction endpoint as
//! JSON, and drives the attempt from a non-blocking owning context while a
//! worker thread does the network I/O.

pub mod config;
pub mod encoder;
pub mod predict;
pub mod present;
pub mod source;
pub mod upload;

pub use config::{resolve_endpoint, PredictionConfig};
pub use encoder::{encode_image, EncodeError, EncodedPayload};
pub use predict::client::PredictionClient;
pub use predict::connector::{PredictionError, Predictor};
pub use present::{display_text, ConsolePresenter, ResultPresenter};
pub use source::{FileSource, ImageSource};
pub use upload::{CancelToken, UploadBusy, UploadError, UploadOutcome, Uploader};
