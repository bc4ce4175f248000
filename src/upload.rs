// src/upload.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use image::DynamicImage;
use log::{debug, info, warn};
use thiserror::Error;

use crate::encoder::{self, EncodeError};
use crate::predict::connector::{PredictionError, Predictor};

/// Why a dispatched attempt produced no label.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image encoding failed: {0}")]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Predict(#[from] PredictionError),
}

/// Terminal result of one upload attempt.
#[derive(Debug)]
pub enum UploadOutcome {
    Predicted(String),
    Failed(UploadError),
}

/// `begin` was called while an attempt was still in flight.
#[derive(Debug, Error)]
#[error("an upload is already in flight")]
pub struct UploadBusy;

/// Cooperative cancellation flag shared with one attempt's worker.
///
/// The worker checks it at each stage boundary; a blocking send already on
/// the wire runs to completion but its result is dropped. Tripping the
/// token is equivalent to calling [`Uploader::cancel`]; the controller
/// notices on its next poll.
#[derive(Debug, Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct Delivery {
    attempt: u64,
    outcome: UploadOutcome,
}

/// Drives upload attempts through `Idle -> Encoding -> Sending -> terminal`.
///
/// Owned and driven by the UI context: `begin` and `cancel` react to user
/// actions, `poll` runs on the event-loop tick and hands back at most one
/// outcome per attempt. The encode-and-send sequence itself runs on a worker
/// thread so the owning thread never blocks on network I/O.
pub struct Uploader {
    predictor: Arc<dyn Predictor>,
    tx: Sender<Delivery>,
    rx: Receiver<Delivery>,
    attempt: u64,
    in_flight: bool,
    token: Option<CancelToken>,
}

impl Uploader {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            predictor,
            tx,
            rx,
            attempt: 0,
            in_flight: false,
            token: None,
        }
    }

    /// Start one encode-and-send attempt on a fresh worker thread.
    ///
    /// Rejects with [`UploadBusy`] while a previous attempt is still in
    /// flight; a single user action maps to a single request on the wire.
    pub fn begin(&mut self, image: DynamicImage) -> Result<CancelToken, UploadBusy> {
        if self.in_flight {
            return Err(UploadBusy);
        }

        self.attempt += 1;
        self.in_flight = true;
        let token = CancelToken::new();
        self.token = Some(token.clone());

        info!("upload attempt {} dispatched", self.attempt);

        let attempt = self.attempt;
        let predictor = Arc::clone(&self.predictor);
        let worker_token = token.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            run_attempt(attempt, image, predictor, worker_token, tx);
        });

        Ok(token)
    }

    /// Abandon the in-flight attempt, if any, and return to idle.
    ///
    /// The abandoned attempt delivers nothing; a later `begin` supersedes it
    /// and any straggling delivery is discarded by attempt id.
    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
        if self.in_flight {
            info!("upload attempt {} cancelled", self.attempt);
            self.in_flight = false;
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Collect the current attempt's outcome, if it has arrived.
    ///
    /// Call from the owning (UI) context each tick. Deliveries from
    /// cancelled or superseded attempts are dropped here, so the text a
    /// caller presents always belongs to the newest attempt. A token
    /// tripped directly by its holder is observed here too: the attempt
    /// counts as cancelled and the controller returns to idle.
    pub fn poll(&mut self) -> Option<UploadOutcome> {
        let tripped = self.token.as_ref().map_or(false, |t| t.is_cancelled());
        if tripped {
            info!("upload attempt {} cancelled", self.attempt);
            self.in_flight = false;
            self.token = None;
        }
        while let Ok(delivery) = self.rx.try_recv() {
            if delivery.attempt != self.attempt || !self.in_flight {
                debug!("discarding stale delivery from attempt {}", delivery.attempt);
                continue;
            }
            self.in_flight = false;
            self.token = None;
            return Some(delivery.outcome);
        }
        None
    }
}

fn run_attempt(
    attempt: u64,
    image: DynamicImage,
    predictor: Arc<dyn Predictor>,
    token: CancelToken,
    tx: Sender<Delivery>,
) {
    if token.is_cancelled() {
        debug!("attempt {} cancelled before encoding", attempt);
        return;
    }

    let outcome = match encoder::encode_image(&image) {
        Ok(payload) => {
            if token.is_cancelled() {
                debug!("attempt {} cancelled before sending", attempt);
                return;
            }
            match predictor.predict(&payload) {
                Ok(label) => UploadOutcome::Predicted(label),
                Err(e) => UploadOutcome::Failed(e.into()),
            }
        }
        Err(e) => UploadOutcome::Failed(e.into()),
    };

    if token.is_cancelled() {
        debug!("attempt {} cancelled, dropping its outcome", attempt);
        return;
    }

    if tx.send(Delivery { attempt, outcome }).is_err() {
        warn!("uploader was dropped before attempt {} completed", attempt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_token_starts_clear_and_latches() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());

        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn cancel_without_attempt_is_a_no_op() {
        struct NeverCalled;
        impl Predictor for NeverCalled {
            fn predict(&self, _: &crate::encoder::EncodedPayload) -> Result<String, PredictionError> {
                unreachable!("no attempt was started")
            }
        }

        let mut uploader = Uploader::new(Arc::new(NeverCalled));
        uploader.cancel();
        assert!(!uploader.in_flight());
        assert!(uploader.poll().is_none());
    }
}
