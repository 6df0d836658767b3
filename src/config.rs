use crate::error::ThinkingResult;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Sequential thinking server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Identity reported to MCP clients
    pub server: ServerIdentity,
    /// Console rendering of recorded thoughts
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Raw toggle value; only a case-insensitive "true" disables thought logging
    pub disable_thought_logging: String,
    /// Whether rendered thoughts use ANSI colors
    pub color: bool,
}

impl LoggingConfig {
    pub fn thought_logging_enabled(&self) -> bool {
        !self.disable_thought_logging.eq_ignore_ascii_case("true")
    }
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            name: "sequential-thinking".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            disable_thought_logging: "false".to_string(),
            color: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration once at startup.
    ///
    /// Sources, lowest precedence first: built-in defaults, an optional TOML
    /// file, `SEQUENTIAL_THINKING_*` environment variables, and finally the bare
    /// `DISABLE_THOUGHT_LOGGING` variable.
    pub fn load() -> ThinkingResult<Self> {
        Self::load_with_toggle(std::env::var("DISABLE_THOUGHT_LOGGING").ok())
    }

    pub fn load_with_toggle(disable_thought_logging: Option<String>) -> ThinkingResult<Self> {
        let mut config = Config::builder()
            .set_default("server.name", "sequential-thinking")?
            .set_default("server.version", env!("CARGO_PKG_VERSION"))?
            .set_default("logging.disable_thought_logging", "false")?
            .set_default("logging.color", true)?;

        if let Ok(config_file) = std::env::var("SEQUENTIAL_THINKING_CONFIG") {
            config = config.add_source(File::with_name(&config_file).required(false));
        } else {
            config = config.add_source(File::with_name("sequential-thinking").required(false));
        }

        // e.g. SEQUENTIAL_THINKING_LOGGING__COLOR=false
        config = config.add_source(
            Environment::with_prefix("SEQUENTIAL_THINKING")
                .prefix_separator("_")
                .separator("__"),
        );

        config = config
            .set_override_option("logging.disable_thought_logging", disable_thought_logging)?;

        let config = config.build()?;
        let loaded: Self = config.try_deserialize()?;

        tracing::info!(
            "Thought logging {}",
            if loaded.logging.thought_logging_enabled() { "enabled" } else { "disabled" }
        );
        Ok(loaded)
    }
}
