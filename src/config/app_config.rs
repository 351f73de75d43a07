use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{DocumentType, DomainError, QualityFilter, SplitterConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub ingestion: IngestionSettings,
    pub report: ReportSettings,
    pub llm: LlmSettings,
    pub embedding: EmbeddingSettings,
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

/// Splitting, filtering and embedding fan-out
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestionSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub quality_filter_enabled: bool,
    pub default_min_length: usize,
    /// Per-type minimum chunk length, keyed by document type name
    pub min_lengths: HashMap<String, usize>,
    pub embed_concurrency: usize,
    pub rebuild_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub section_timeout_secs: u64,
    pub temperature: f32,
    pub max_content_chars: usize,
    pub reference_count: usize,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub dimensions: Option<usize>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 100,
            quality_filter_enabled: true,
            default_min_length: 50,
            min_lengths: HashMap::from([("STATUTE".to_string(), 10)]),
            embed_concurrency: 4,
            rebuild_concurrency: 2,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            section_timeout_secs: 60,
            temperature: 0.2,
            max_content_chars: 12_000,
            reference_count: 5,
            output_dir: PathBuf::from("reports"),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            model: "text-embedding-3-small".to_string(),
            dimensions: None,
        }
    }
}

impl AppConfig {
    /// Load from `config/default`, `config/local` and `APP__*` variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.splitter_config()
            .validate()
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        if self.ingestion.embed_concurrency == 0 || self.ingestion.rebuild_concurrency == 0 {
            return Err(DomainError::configuration(
                "ingestion concurrency must be greater than 0",
            ));
        }

        if self.report.section_timeout_secs == 0 {
            return Err(DomainError::configuration(
                "report.section_timeout_secs must be greater than 0",
            ));
        }

        self.quality_filter()?;
        Ok(())
    }

    pub fn splitter_config(&self) -> SplitterConfig {
        SplitterConfig::new(self.ingestion.chunk_size, self.ingestion.chunk_overlap)
    }

    /// Build the quality filter. Configured thresholds are applied on top of
    /// the built-in policy, so the statute minimum survives unless overridden.
    /// Unknown document type keys are rejected.
    pub fn quality_filter(&self) -> Result<QualityFilter, DomainError> {
        let mut filter = QualityFilter::new()
            .with_default_min_length(self.ingestion.default_min_length)
            .with_enabled(self.ingestion.quality_filter_enabled);

        for (name, min_length) in &self.ingestion.min_lengths {
            let document_type: DocumentType = name
                .parse()
                .map_err(|e: DomainError| DomainError::configuration(e.to_string()))?;
            filter = filter.with_threshold(document_type, *min_length);
        }

        Ok(filter)
    }

    pub fn section_timeout(&self) -> Duration {
        Duration::from_secs(self.report.section_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.splitter_config(), SplitterConfig::new(800, 100));
        assert_eq!(config.section_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_default_quality_filter_keeps_short_statutes() {
        let filter = AppConfig::default().quality_filter().unwrap();

        assert_eq!(filter.min_length(DocumentType::Statute), 10);
        assert_eq!(filter.min_length(DocumentType::ContractInstance), 50);
        assert!(filter.is_enabled());
    }

    #[test]
    fn test_overlap_not_smaller_than_size_rejected() {
        let mut config = AppConfig::default();
        config.ingestion.chunk_overlap = 800;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = AppConfig::default();
        config.ingestion.chunk_size = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ingestion.embed_concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.report.section_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lowercase_type_keys_accepted() {
        let mut config = AppConfig::default();
        config.ingestion.min_lengths =
            HashMap::from([("contract_template".to_string(), 30), ("statute".to_string(), 5)]);

        let filter = config.quality_filter().unwrap();
        assert_eq!(filter.min_length(DocumentType::ContractTemplate), 30);
        assert_eq!(filter.min_length(DocumentType::Statute), 5);
    }

    #[test]
    fn test_partial_threshold_table_keeps_statute_minimum() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[ingestion.min_lengths]\nCONTRACT_TEMPLATE = 30\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let filter = config.quality_filter().unwrap();

        assert_eq!(filter.min_length(DocumentType::ContractTemplate), 30);
        assert_eq!(filter.min_length(DocumentType::Statute), 10);
        assert!(filter.keep("第十二条 每年6月5日为环境日。", DocumentType::Statute));
        assert!(!filter.keep("第十二条 每年6月5日为环境日。", DocumentType::ContractTemplate));
    }

    #[test]
    fn test_default_min_length_applies_to_unlisted_types() {
        let mut config = AppConfig::default();
        config.ingestion.default_min_length = 20;

        let filter = config.quality_filter().unwrap();
        assert_eq!(filter.min_length(DocumentType::Other), 20);
        assert_eq!(filter.min_length(DocumentType::Statute), 10);
    }

    #[test]
    fn test_unknown_type_key_rejected() {
        let mut config = AppConfig::default();
        config.ingestion.min_lengths = HashMap::from([("memo".to_string(), 5)]);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "logging": { "format": "json" },
            "report": { "section_timeout_secs": 15 }
        }))
        .unwrap();

        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.report.section_timeout_secs, 15);
        assert_eq!(config.report.reference_count, 5);
    }
}
