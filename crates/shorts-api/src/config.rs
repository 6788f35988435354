//! API configuration.

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Max size of an uploaded reference image
    pub max_upload_size: usize,
    /// Base URL under which the output directory is served
    pub public_base_url: String,
    /// Expose Prometheus metrics at /metrics
    pub metrics_enabled: bool,
}

const DEFAULT_PORT: u16 = 3001;

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors_origins: vec!["*".to_string()],
            max_body_size: 12 * 1024 * 1024,   // 12MB
            max_upload_size: 10 * 1024 * 1024, // 10MB
            public_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            metrics_enabled: true,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port,
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            max_upload_size: std::env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_upload_size),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }

}

/// Whether `ENVIRONMENT` names production. Read per call so error rendering
/// needs no access to the config.
pub fn is_production() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|v| is_production_name(&v))
        .unwrap_or(false)
}

fn is_production_name(environment: &str) -> bool {
    environment.trim().eq_ignore_ascii_case("production")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.public_base_url, "http://localhost:3001");
        assert_eq!(config.max_upload_size, 10 * 1024 * 1024);
        assert!(config.max_body_size > config.max_upload_size);
    }

    #[test]
    fn test_production_name_ignores_case() {
        assert!(is_production_name("production"));
        assert!(is_production_name("Production "));
        assert!(!is_production_name("development"));
        assert!(!is_production_name(""));
    }
}
