use std::time::Duration;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub cache: CacheSettings,
    pub http: HttpSettings,
    pub geocoding: GeocodingSettings,
    pub weather: WeatherSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Prometheus metrics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Metrics endpoint path
    pub path: String,
}

/// Which backing store holds cached lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    #[default]
    InMemory,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    pub redis_url: String,
    /// Upper bound on concurrently checked-out store connections
    pub pool_size: usize,
    /// How long a request waits for a free connection before failing
    pub pool_timeout_secs: u64,
    /// Entry bound for the in-memory store
    pub max_capacity: u64,
    /// Fall back to the upstream call when the store is unavailable
    pub fail_open: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocodingSettings {
    pub base_url: String,
    pub api_key: String,
    pub limit: u32,
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub base_url: String,
    pub ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "/metrics".to_string(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: "redis://localhost:6379/1".to_string(),
            pool_size: 10,
            pool_timeout_secs: 5,
            max_capacity: 10_000,
            fail_open: true,
        }
    }
}

impl CacheSettings {
    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_retries: 3,
        }
    }
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.opencagedata.com/geocode/v1/json".to_string(),
            api_key: String::new(),
            limit: 5,
            ttl_secs: 24 * 60 * 60,
        }
    }
}

impl GeocodingSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            ttl_secs: 30 * 60,
        }
    }
}

impl WeatherSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl AppConfig {
    /// Loads `config/default`, `config/local`, then `APP__*` variables.
    ///
    /// `OPENCAGE_API_KEY` and `REDIS_URL` override whatever the files say.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("geocoding.api_key", std::env::var("OPENCAGE_API_KEY").ok())?
            .set_override_option("cache.redis_url", std::env::var("REDIS_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cache.backend, CacheBackend::InMemory);
        assert_eq!(config.cache.pool_size, 10);
        assert_eq!(config.cache.pool_timeout(), Duration::from_secs(5));
        assert_eq!(config.http.max_retries, 3);
        assert_eq!(config.geocoding.limit, 5);
        assert_eq!(config.geocoding.ttl(), Duration::from_secs(86_400));
        assert_eq!(config.weather.ttl(), Duration::from_secs(1_800));
    }

    #[test]
    fn test_partial_sources_fill_in_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("cache.backend", "redis")
            .unwrap()
            .set_override("weather.ttl_secs", 60i64)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.cache.backend, CacheBackend::Redis);
        assert_eq!(config.cache.redis_url, "redis://localhost:6379/1");
        assert_eq!(config.weather.ttl(), Duration::from_secs(60));
        assert_eq!(
            config.weather.base_url,
            "https://api.open-meteo.com/v1/forecast"
        );
    }
}
