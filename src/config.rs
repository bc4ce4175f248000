// src/config.rs
use std::env;

use log::debug;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";
pub const DEFAULT_FIELD_NAME: &str = "image";
pub const ENDPOINT_ENV: &str = "PREDICT_ENDPOINT";

/// Where and how to post an encoded image.
///
/// The endpoint is the full URL of the prediction route; the field name is
/// the JSON key the payload is sent under, for services that expect
/// something other than `"image"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionConfig {
    pub endpoint: String,
    pub field_name: String,
}

impl PredictionConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
        }
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }
}

/// Resolve the endpoint URL: explicit flag, then `PREDICT_ENDPOINT`, then
/// the default local service.
pub fn resolve_endpoint(flag: Option<String>) -> String {
    if let Some(url) = flag {
        debug!("using endpoint from command line: {}", url);
        return url;
    }
    if let Ok(url) = env::var(ENDPOINT_ENV) {
        if !url.is_empty() {
            debug!("using endpoint from {}: {}", ENDPOINT_ENV, url);
            return url;
        }
    }
    debug!("using default endpoint: {}", DEFAULT_ENDPOINT);
    DEFAULT_ENDPOINT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_field_name() {
        let config = PredictionConfig::new("http://example.test/predict");
        assert_eq!(config.endpoint, "http://example.test/predict");
        assert_eq!(config.field_name, DEFAULT_FIELD_NAME);

        let config = config.with_field_name("foto");
        assert_eq!(config.field_name, "foto");
    }

    // one test covers all precedence branches so env mutation never races
    // a parallel test
    #[test]
    fn endpoint_resolution_precedence() {
        env::remove_var(ENDPOINT_ENV);
        assert_eq!(resolve_endpoint(None), DEFAULT_ENDPOINT);

        env::set_var(ENDPOINT_ENV, "http://env.test/predict");
        assert_eq!(resolve_endpoint(None), "http://env.test/predict");

        assert_eq!(
            resolve_endpoint(Some("http://flag.test/predict".to_string())),
            "http://flag.test/predict"
        );

        env::set_var(ENDPOINT_ENV, "");
        assert_eq!(resolve_endpoint(None), DEFAULT_ENDPOINT);

        env::remove_var(ENDPOINT_ENV);
    }
}
