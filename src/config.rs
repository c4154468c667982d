use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Credential used when no API key is configured. Every call made with it is
/// expected to be rejected by the inference endpoint.
pub const PLACEHOLDER_API_KEY: &str = "dummy-key";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub inference: InferenceSettings,
    pub matching: MatchingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSettings {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: Option<u64>,
}

/// Resolved credential for the inference endpoint
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Configured(String),
    Placeholder,
}

impl Credential {
    pub fn as_str(&self) -> &str {
        match self {
            Credential::Configured(key) => key.as_str(),
            Credential::Placeholder => PLACEHOLDER_API_KEY,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Credential::Configured(_))
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Configured(_) => f.write_str("Configured(***)"),
            Credential::Placeholder => f.write_str("Placeholder"),
        }
    }
}

impl InferenceSettings {
    /// Resolve the configured API key.
    ///
    /// A missing or blank key is not an error: the service keeps running with
    /// a placeholder credential so that the guidance fallback and the
    /// "no match" outcome still reach users.
    pub fn credential(&self) -> Credential {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Credential::Configured(key.to_string()),
            _ => {
                tracing::warn!("GOOGLE_API_KEY not found in configuration or environment");
                tracing::warn!("AI features will use fallback responses");
                Credential::Placeholder
            }
        }
    }
}

/// Counterpart used by the single-sided forms
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultRecipient {
    pub need: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultDonor {
    pub food_type: String,
    pub quantity: f64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    pub default_recipient: DefaultRecipient,
    pub default_donor: DefaultDonor,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_recipient: DefaultRecipient {
                need: "meals for 60 people".to_string(),
                latitude: 19.075,
                longitude: 72.87,
            },
            default_donor: DefaultDonor {
                food_type: "cooked meals".to_string(),
                quantity: 50.0,
                latitude: 19.076,
                longitude: 72.8777,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from defaults, files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with AI_FEED__)
    /// 4. GOOGLE_API_KEY for the inference credential
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AI_FEED__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("AI_FEED")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_api_key(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("AI_FEED")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_api_key(settings)?.try_deserialize()
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    let matching = MatchingSettings::default();

    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 9002)?
        .set_default("inference.endpoint", "https://generativelanguage.googleapis.com/v1beta")?
        .set_default("inference.model", "gemini-2.0-flash")?
        .set_default("inference.timeout_secs", 30)?
        .set_default("matching.default_recipient.need", matching.default_recipient.need)?
        .set_default("matching.default_recipient.latitude", matching.default_recipient.latitude)?
        .set_default("matching.default_recipient.longitude", matching.default_recipient.longitude)?
        .set_default("matching.default_donor.food_type", matching.default_donor.food_type)?
        .set_default("matching.default_donor.quantity", matching.default_donor.quantity)?
        .set_default("matching.default_donor.latitude", matching.default_donor.latitude)?
        .set_default("matching.default_donor.longitude", matching.default_donor.longitude)?
        .set_default("logging.level", default_log_level())?
        .set_default("logging.format", default_log_format())
}

/// The credential is conventionally provided as GOOGLE_API_KEY rather than
/// through the prefixed variables.
fn substitute_api_key(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = std::env::var("GOOGLE_API_KEY") {
        builder = builder.set_override("inference.api_key", api_key)?;
    }

    builder.build()
}
