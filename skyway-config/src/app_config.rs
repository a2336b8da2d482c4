use serde::{Deserialize, Serialize};
use skyway_core::ValidationPolicy;
use skyway_offer::GeneratorConfig;
use std::env;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Page metadata
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SiteConfig {
    pub title: String,
    pub icon: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Flight Booking".to_string(),
            icon: "✈️".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SearchConfig {
    pub flights_per_leg: usize,
    pub departure_window_start_hour: u32,
    pub departure_window_end_hour: u32,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// Skip the origin/destination equality check
    #[serde(default)]
    pub allow_same_city: bool,
}

fn default_slot_minutes() -> u32 { 5 }

impl Default for SearchConfig {
    fn default() -> Self {
        let generator = GeneratorConfig::default();
        Self {
            flights_per_leg: generator.flights_per_leg,
            departure_window_start_hour: generator.window_start_hour,
            departure_window_end_hour: generator.window_end_hour,
            slot_minutes: generator.slot_minutes,
            allow_same_city: false,
        }
    }
}

impl SearchConfig {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            flights_per_leg: self.flights_per_leg,
            window_start_hour: self.departure_window_start_hour,
            window_end_hour: self.departure_window_end_hour,
            slot_minutes: self.slot_minutes,
        }
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            allow_same_city: self.allow_same_city,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        tracing::debug!(%run_mode, "Loading configuration");

        let s = config::Config::builder()
            // Built-in defaults so every file is optional
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYWAY_SERVER__PORT=8080`
            .add_source(
                config::Environment::with_prefix("SKYWAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    /// Defaults overlaid with a TOML document
    pub fn from_toml(overrides: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::from_str(overrides, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_generator() {
        let config = Config::default();
        assert_eq!(config.search.generator_config(), GeneratorConfig::default());
        assert_eq!(config.search.validation_policy(), ValidationPolicy::default());
        assert_eq!(config.site.title, "Flight Booking");
    }

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let config = Config::from_toml(
            r#"
            [site]
            title = "Skyway Demo"
            icon = "🛫"

            [search]
            flights_per_leg = 3
            departure_window_start_hour = 6
            departure_window_end_hour = 22
            allow_same_city = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.site.title, "Skyway Demo");
        assert_eq!(config.search.flights_per_leg, 3);
        assert_eq!(config.search.slot_minutes, 5);
        assert!(config.search.validation_policy().allow_same_city);
        assert_eq!(config.search.generator_config().window_start_hour, 6);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let result = Config::from_toml(
            r#"
            [server]
            port = "not a port"
            "#,
        );
        assert!(result.is_err());
    }
}
