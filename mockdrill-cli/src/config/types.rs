use serde::{Deserialize, Serialize};

/// Default host for the mockdrill server
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the mockdrill server
pub const DEFAULT_PORT: u16 = 8321;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawMockdrillConfig {
    #[serde(default)]
    pub server: RawServerSection,
}

/// Server config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerSection {
    /// Host for the mockdrill server
    pub host: Option<String>,

    /// Port for the mockdrill server
    pub port: Option<u16>,

    /// Base URL of an external question-bank API
    pub bank_url: Option<String>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MockdrillConfig {
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Host for the mockdrill server
    pub host: String,

    /// Port for the mockdrill server
    pub port: u16,

    /// Base URL of an external question-bank API
    pub bank_url: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            bank_url: None,
        }
    }
}
