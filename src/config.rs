use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub dashboard: DashboardConfig,
    pub pr_create_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:3000".to_string(),
            backend_url_production: "https://pr-api.example.org".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            dashboard: DashboardConfig::default(),
            pr_create_path: "/api/pr".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows per page, also used for client-side paging of unpaged responses
    pub page_size: u32,
    pub filter_debounce_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            filter_debounce_ms: 300,
        }
    }
}

impl AppConfig {
    /// Load configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            dashboard: DashboardConfig {
                page_size: option_env!("PAGE_SIZE")
                    .unwrap_or("10").parse().ok()
                    .filter(|size| *size > 0)
                    .unwrap_or(10),
                filter_debounce_ms: option_env!("FILTER_DEBOUNCE_MS")
                    .unwrap_or("300").parse().unwrap_or(300),
            },
            pr_create_path: option_env!("PR_CREATE_PATH")
                .map(str::to_string)
                .unwrap_or(defaults.pr_create_path),
        }
    }

    /// Backend URL for the current environment, without trailing slash
    pub fn backend_url(&self) -> &str {
        let url = match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        };
        url.trim_end_matches('/')
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_follows_environment() {
        let mut config = AppConfig {
            backend_url_development: "http://localhost:3000/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.backend_url(), "http://localhost:3000");

        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), "https://pr-api.example.org");
    }

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.dashboard.page_size, 10);
        assert_eq!(config.pr_create_path, "/api/pr");
        assert!(config.is_logging_enabled());
    }
}
