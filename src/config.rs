use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::extract::SchemaVariant;

/// Configuration for the trending collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the file whose first line is the API key
    pub key_path: PathBuf,

    /// Path to the file listing one region code per line
    pub country_code_path: PathBuf,

    /// Directory receiving the per-region CSV files
    pub output_dir: PathBuf,

    /// Which column schema to emit
    pub variant: SchemaVariant,

    /// HTTP request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_paths = [
            "trending-collector.toml",
            "config/trending-collector.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str::<Config>(&config_str) {
                    Ok(mut config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        config.apply_env_overrides();
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Err(anyhow!("No configuration file found"))
    }

    /// Override settings from environment variables
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key_path) = std::env::var("TRENDING_COLLECTOR_KEY_PATH") {
            self.key_path = PathBuf::from(key_path);
        }
        if let Ok(codes_path) = std::env::var("TRENDING_COLLECTOR_COUNTRY_CODE_PATH") {
            self.country_code_path = PathBuf::from(codes_path);
        }
        if let Ok(output_dir) = std::env::var("TRENDING_COLLECTOR_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }
        if let Ok(variant) = std::env::var("TRENDING_COLLECTOR_VARIANT") {
            if let Some(parsed) = SchemaVariant::parse(&variant) {
                self.variant = parsed;
            } else {
                tracing::warn!("Ignoring unknown schema variant: {}", variant);
            }
        }
        if let Ok(timeout) = std::env::var("TRENDING_COLLECTOR_REQUEST_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(seconds) => self.request_timeout_seconds = seconds,
                Err(_) => tracing::warn!("Ignoring invalid request timeout: {}", timeout),
            }
        }
    }

    /// Read the API key: first line of the key file, trimmed.
    pub async fn load_api_key(&self) -> Result<String> {
        let contents = tokio::fs::read_to_string(&self.key_path)
            .await
            .map_err(|e| anyhow!("Cannot read key file {}: {}", self.key_path.display(), e))?;

        let key = contents.lines().next().unwrap_or("").trim().to_string();
        if key.is_empty() {
            return Err(anyhow!(
                "Key file {} contains no API key",
                self.key_path.display()
            ));
        }
        Ok(key)
    }

    /// Read the region list: one code per line, blank lines skipped.
    pub async fn load_country_codes(&self) -> Result<Vec<String>> {
        let contents = tokio::fs::read_to_string(&self.country_code_path)
            .await
            .map_err(|e| {
                anyhow!(
                    "Cannot read country code file {}: {}",
                    self.country_code_path.display(),
                    e
                )
            })?;

        let codes: Vec<String> = contents
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if codes.is_empty() {
            return Err(anyhow!(
                "Country code file {} lists no regions",
                self.country_code_path.display()
            ));
        }
        Ok(codes)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if !self.key_path.exists() {
            return Err(anyhow!("Key file not found: {}", self.key_path.display()));
        }
        if !self.country_code_path.exists() {
            return Err(anyhow!(
                "Country code file not found: {}",
                self.country_code_path.display()
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_path: PathBuf::from("api_key.txt"),
            country_code_path: PathBuf::from("country_codes.txt"),
            output_dir: PathBuf::from("output/"),
            variant: SchemaVariant::Extended,
            request_timeout_seconds: 30,
        }
    }
}
