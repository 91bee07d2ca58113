//! Board configuration with TOML file support.

use serde::{Deserialize, Serialize};

use campustalk_identity::Pepper;
use campustalk_types::{BoardError, BoardParams};

/// Configuration for a CampusTalk board instance.
///
/// Can be loaded from a TOML file via [`BoardConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). The fingerprint pepper lives
/// here so its lifecycle is explicit: read once at startup, passed into the
/// engine, rotated only via redeploy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Port the HTTP API listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Fingerprint pepper. The fallback value exists so development
    /// instances boot; production deployments must set their own.
    #[serde(default = "default_pepper")]
    pub pepper: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to attach a permissive CORS layer (development).
    #[serde(default)]
    pub permissive_cors: bool,

    /// Engagement parameters (report threshold, content limits, ...).
    /// Kept last so TOML serialisation emits the table after plain values.
    #[serde(default)]
    pub params: BoardParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_http_port() -> u16 {
    8090
}

fn default_pepper() -> String {
    "campustalk_dev_fallback_pepper".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BoardConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, BoardError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BoardError::Invalid(format!("cannot read config {path}: {e}")))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, BoardError> {
        toml::from_str(s).map_err(|e| BoardError::Invalid(format!("malformed config: {e}")))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("BoardConfig is always serializable to TOML")
    }

    /// The pepper as the secret type the deriver expects.
    pub fn pepper(&self) -> Pepper {
        Pepper::new(self.pepper.clone())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            pepper: default_pepper(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            permissive_cors: false,
            params: BoardParams::default(),
        }
    }
}
