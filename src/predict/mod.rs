// src/predict/mod.rs
pub mod client;
pub mod connector;
