use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://potato-leaf-disease-api.onrender.com/predict";
pub const ENDPOINT_ENV_VAR: &str = "LEAFHEALTH_ENDPOINT";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Smallest accepted width and height, in pixels
    pub min_dimension: u32,
    pub request_timeout: Duration,
    pub notification_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            min_dimension: 50,
            request_timeout: Duration::from_secs(30),
            notification_ttl: Duration::from_secs(4),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the endpoint overridable through `LEAFHEALTH_ENDPOINT`.
    pub fn from_env() -> Self {
        Self::default().with_endpoint_override(std::env::var(ENDPOINT_ENV_VAR).ok())
    }

    fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.map(|e| e.trim().to_string()) {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_override_keeps_default_endpoint() {
        let config = ClientConfig::default().with_endpoint_override(Some("  ".to_string()));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        let config = ClientConfig::default()
            .with_endpoint_override(Some("http://localhost:8000/predict".to_string()));
        assert_eq!(config.endpoint, "http://localhost:8000/predict");
    }
}
