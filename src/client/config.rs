use std::time::Duration;

/// Endpoints and timings for the client side.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub auth_api_url: String,
    pub prediction_api_url: String,
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_api_url: "http://localhost:3001".into(),
            prediction_api_url: "http://localhost:5000".into(),
            poll_interval: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            auth_api_url: std::env::var("AUTH_API_URL").unwrap_or(defaults.auth_api_url),
            prediction_api_url: std::env::var("PREDICTION_API_URL")
                .unwrap_or(defaults.prediction_api_url),
            poll_interval: std::env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
        }
    }
}
