// src/present.rs
use crate::upload::UploadOutcome;

pub const RESULT_PREFIX: &str = "Hasil Prediksi: ";
pub const ERROR_PREFIX: &str = "Error: ";

/// Render an attempt's outcome as the one line shown to the user.
pub fn display_text(outcome: &UploadOutcome) -> String {
    match outcome {
        UploadOutcome::Predicted(label) => format!("{}{}", RESULT_PREFIX, label),
        UploadOutcome::Failed(e) => format!("{}{}", ERROR_PREFIX, e),
    }
}

/// Sink for the rendered result line.
pub trait ResultPresenter: Send + Sync {
    fn present(&self, text: &str);
}

/// Prints the result line to stdout.
pub struct ConsolePresenter;

impl ResultPresenter for ConsolePresenter {
    fn present(&self, text: &str) {
        println!("{}", text);
    }
}
