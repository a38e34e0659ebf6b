use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::api::{ApiConfig, GoogleConfig};
use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// Prefix for environment overrides, e.g. `PHISHGUARD_API__BASE_URL`.
pub const ENV_PREFIX: &str = "PHISHGUARD_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend location, token store, logging.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub google: GoogleConfig,
}

/// Layer built-in defaults, the YAML file at `path` (if present) and
/// `PHISHGUARD_*` environment variables, in that order.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::ConfigV1(ConfigV1::default())))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load config from `path`, falling back to defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<ConfigV1, figment::Error> {
    let config = figment_for(path).extract::<Config>()?;
    match config {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_when_file_is_missing() {
        Jail::expect_with(|_jail| {
            let config = load_config(Path::new("does-not-exist.yaml"))?;
            assert_eq!(config.api.base_url, "http://localhost:8000/api");
            assert!(matches!(config.store, StoreConfig::File(_)));
            assert_eq!(config.logging.format, "console");
            Ok(())
        });
    }

    #[test]
    fn test_yaml_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
version: "1.0.0"
api:
  base_url: "https://phish.example.org/api"
store:
  type: memory
logging:
  level: "debug"
  format: "json"
"#,
            )?;
            jail.set_env("PHISHGUARD_API__TIMEOUT_IN_MS", "2500");

            let config = load_config(Path::new("config.yaml"))?;
            assert_eq!(config.api.base_url, "https://phish.example.org/api");
            assert_eq!(config.api.timeout_in_ms, Some(2500));
            assert!(matches!(config.store, StoreConfig::Memory));
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "version: \"9.9.9\"\n")?;
            assert!(load_config(Path::new("config.yaml")).is_err());
            Ok(())
        });
    }
}
