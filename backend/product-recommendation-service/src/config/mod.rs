use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub data: DataConfig,
    pub recommendation: RecommendationConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_http_host")]
    pub http_host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Worker count for the HTTP server; actix picks one per core when unset.
    #[serde(default)]
    pub http_workers: Option<usize>,
}

/// Locations of the precomputed artifacts produced by the offline pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_product_data_1_file")]
    pub product_data_1_file: String,
    #[serde(default = "default_product_data_2_file")]
    pub product_data_2_file: String,
    #[serde(default = "default_data_1_similarity_file")]
    pub data_1_similarity_file: String,
    #[serde(default = "default_data_2_similarity_file")]
    pub data_2_similarity_file: String,
    #[serde(default = "default_cart_catalog_file")]
    pub cart_catalog_file: String,
    #[serde(default = "default_cart_similarity_file")]
    pub cart_similarity_file: String,
    #[serde(default = "default_product_features_file")]
    pub product_features_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    #[serde(default = "default_similar_items_limit")]
    pub similar_items_limit: usize,
    #[serde(default = "default_cart_limit")]
    pub cart_limit: usize,
    #[serde(default = "default_blended_default_limit")]
    pub blended_default_limit: usize,
    #[serde(default = "default_blended_max_limit")]
    pub blended_max_limit: usize,
    /// Fixes the blended shuffle; every request then reseeds with this value.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_service_name() -> String {
    "product-recommendation-service".to_string()
}

fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_product_data_1_file() -> String {
    "product_data_1.json".to_string()
}

fn default_product_data_2_file() -> String {
    "product_data_2.json".to_string()
}

fn default_data_1_similarity_file() -> String {
    "data_1_similarity.json".to_string()
}

fn default_data_2_similarity_file() -> String {
    "data_2_similarity.json".to_string()
}

fn default_cart_catalog_file() -> String {
    "data.json".to_string()
}

fn default_cart_similarity_file() -> String {
    "similarity_matrix.json".to_string()
}

fn default_product_features_file() -> String {
    "product_features.json".to_string()
}

fn default_similar_items_limit() -> usize {
    10
}

fn default_cart_limit() -> usize {
    5
}

fn default_blended_default_limit() -> usize {
    5
}

fn default_blended_max_limit() -> usize {
    100
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            similar_items_limit: default_similar_items_limit(),
            cart_limit: default_cart_limit(),
            blended_default_limit: default_blended_default_limit(),
            blended_max_limit: default_blended_max_limit(),
            shuffle_seed: None,
        }
    }
}

impl DataConfig {
    pub fn product_data_1_path(&self) -> PathBuf {
        self.data_dir.join(&self.product_data_1_file)
    }

    pub fn product_data_2_path(&self) -> PathBuf {
        self.data_dir.join(&self.product_data_2_file)
    }

    pub fn data_1_similarity_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_1_similarity_file)
    }

    pub fn data_2_similarity_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_2_similarity_file)
    }

    pub fn cart_catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.cart_catalog_file)
    }

    pub fn cart_similarity_path(&self) -> PathBuf {
        self.data_dir.join(&self.cart_similarity_file)
    }

    pub fn product_features_path(&self) -> PathBuf {
        self.data_dir.join(&self.product_features_file)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            service: envy::from_env()?,
            data: envy::from_env()?,
            recommendation: envy::from_env()?,
            log: envy::from_env()?,
        })
    }

    /// Builds the config from explicit `(KEY, value)` pairs instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)> + Clone,
    {
        Ok(Config {
            service: envy::from_iter(vars.clone())?,
            data: envy::from_iter(vars.clone())?,
            recommendation: envy::from_iter(vars.clone())?,
            log: envy::from_iter(vars)?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.http_port == 0 {
            return Err(ConfigError::Invalid("HTTP_PORT must be non-zero".into()));
        }
        if self.service.http_workers == Some(0) {
            return Err(ConfigError::Invalid("HTTP_WORKERS must be non-zero".into()));
        }

        let rec = &self.recommendation;
        for (name, value) in [
            ("SIMILAR_ITEMS_LIMIT", rec.similar_items_limit),
            ("CART_LIMIT", rec.cart_limit),
            ("BLENDED_DEFAULT_LIMIT", rec.blended_default_limit),
            ("BLENDED_MAX_LIMIT", rec.blended_max_limit),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be non-zero", name)));
            }
        }
        if rec.blended_default_limit > rec.blended_max_limit {
            return Err(ConfigError::Invalid(
                "BLENDED_DEFAULT_LIMIT must not exceed BLENDED_MAX_LIMIT".into(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.http_host, self.service.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vec::new()).unwrap();

        assert_eq!(config.service.http_port, 8080);
        assert_eq!(config.service.service_name, "product-recommendation-service");
        assert_eq!(config.recommendation.similar_items_limit, 10);
        assert_eq!(config.recommendation.cart_limit, 5);
        assert_eq!(config.recommendation.shuffle_seed, None);
        assert_eq!(config.log.log_format, LogFormat::Text);
        assert_eq!(
            config.data.cart_similarity_path(),
            PathBuf::from("./data/similarity_matrix.json")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("HTTP_PORT", "9090"),
            ("DATA_DIR", "/srv/artifacts"),
            ("SHUFFLE_SEED", "42"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9090");
        assert_eq!(
            config.data.product_features_path(),
            PathBuf::from("/srv/artifacts/product_features.json")
        );
        assert_eq!(config.recommendation.shuffle_seed, Some(42));
        assert_eq!(config.log.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let result = Config::from_vars(vars(&[("HTTP_PORT", "not-a-port")]));
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = Config::from_vars(vars(&[("CART_LIMIT", "0")])).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = Config::from_vars(vars(&[
            ("BLENDED_DEFAULT_LIMIT", "20"),
            ("BLENDED_MAX_LIMIT", "10"),
        ]))
        .unwrap();
        assert!(config.validate().is_err());
    }
}
