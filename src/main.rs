// src/main.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use photopredict::{
    config, display_text, encode_image, ConsolePresenter, FileSource, ImageSource,
    PredictionClient, PredictionConfig, ResultPresenter, Uploader,
};

#[derive(Parser)]
#[command(name = "photopredict")]
#[command(about = "Send a photo to a prediction service and print the label", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and print the predicted label
    Predict {
        /// Path to the image file
        image: PathBuf,

        /// Prediction endpoint URL (default: http://localhost:5000/predict)
        #[arg(long)]
        endpoint: Option<String>,

        /// JSON field name the payload is sent under (default: "image")
        #[arg(long)]
        field: Option<String>,
    },
    /// Encode an image to its base64 JPEG payload without uploading
    Encode {
        /// Path to the image file
        image: PathBuf,

        /// Write the payload to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    );

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict { image, endpoint, field } => {
            run_predict(image, endpoint, field)
        }
        Commands::Encode { image, out } => {
            run_encode(image, out)
        }
    }
}

fn run_predict(image: PathBuf, endpoint: Option<String>, field: Option<String>) -> Result<()> {
    let url = config::resolve_endpoint(endpoint);
    let mut prediction_config = PredictionConfig::new(url);
    if let Some(field_name) = field {
        prediction_config = prediction_config.with_field_name(field_name);
    }

    let image = FileSource::new(image).acquire()?;

    let predictor = Arc::new(PredictionClient::new(prediction_config));
    let mut uploader = Uploader::new(predictor);
    uploader.begin(image)?;

    // the worker owns the network I/O; poll until its outcome arrives
    let outcome = loop {
        if let Some(outcome) = uploader.poll() {
            break outcome;
        }
        thread::sleep(Duration::from_millis(50));
    };

    ConsolePresenter.present(&display_text(&outcome));

    Ok(())
}

fn run_encode(image: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let image = FileSource::new(image).acquire()?;
    let payload = encode_image(&image)?;

    match out {
        Some(path) => {
            let text = payload.into_string();
            std::fs::write(&path, &text)?;
            info!("wrote {} byte payload to {}", text.len(), path.display());
        }
        None => {
            println!("{}", payload.into_string());
        }
    }

    Ok(())
}
