//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Cross-origin policy.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Simulation limits and unit vocabulary.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API. `"*"` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

/// Simulation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Longest horizon, in months, a request may ask for.
    #[serde(default = "default_max_months")]
    pub max_months: u32,
    /// Unit tags read as "years" by the untaxed simulation.
    #[serde(default = "default_year_tokens")]
    pub untaxed_year_tokens: Vec<String>,
    /// Unit tags read as "years" by the taxed simulation.
    #[serde(default = "default_year_tokens")]
    pub taxed_year_tokens: Vec<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: default_max_months(),
            untaxed_year_tokens: default_year_tokens(),
            taxed_year_tokens: default_year_tokens(),
        }
    }
}

fn default_max_months() -> u32 {
    1200 // 100 years
}

fn default_year_tokens() -> Vec<String> {
    vec!["years".to_string(), "anos".to_string()]
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("ACCRUAL")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .with_list_parse_key("simulation.untaxed_year_tokens")
                    .with_list_parse_key("simulation.taxed_year_tokens"),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "RUN_MODE",
        "ACCRUAL__SERVER__PORT",
        "ACCRUAL__CORS__ALLOWED_ORIGINS",
        "ACCRUAL__SIMULATION__MAX_MONTHS",
        "ACCRUAL__SIMULATION__TAXED_YEAR_TOKENS",
    ];

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(VARS, || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.cors.allowed_origins, ["http://localhost:3000"]);
            assert_eq!(config.simulation.max_months, 1200);
            assert_eq!(config.simulation.untaxed_year_tokens, ["years", "anos"]);
            assert_eq!(config.simulation.taxed_year_tokens, ["years", "anos"]);
        });
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("RUN_MODE", None),
                ("ACCRUAL__SERVER__PORT", Some("9090")),
                (
                    "ACCRUAL__CORS__ALLOWED_ORIGINS",
                    Some("http://a.test,http://b.test"),
                ),
                ("ACCRUAL__SIMULATION__MAX_MONTHS", Some("600")),
                ("ACCRUAL__SIMULATION__TAXED_YEAR_TOKENS", Some("anos")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(
                    config.cors.allowed_origins,
                    ["http://a.test", "http://b.test"]
                );
                assert_eq!(config.simulation.max_months, 600);
                assert_eq!(config.simulation.taxed_year_tokens, ["anos"]);
                assert_eq!(config.simulation.untaxed_year_tokens, ["years", "anos"]);
            },
        );
    }
}
