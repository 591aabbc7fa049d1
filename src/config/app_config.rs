use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Settings for the in-memory user registry
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// First ID handed out on insert
    pub first_id: i64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { first_id: 1 }
    }
}

impl AppConfig {
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

        let app_config: Self = config.try_deserialize()?;
        app_config.registry.validate()?;

        Ok(app_config)
    }
}

impl RegistryConfig {
    /// Reject an ID sequence that would hand out non-positive IDs
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.first_id < 1 {
            return Err(config::ConfigError::Message(format!(
                "registry.first_id must be at least 1, got {}",
                self.first_id
            )));
        }

        Ok(())
    }
}
