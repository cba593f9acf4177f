//! Configuration management for infrastructure services
//!
//! Sources, lowest precedence first:
//! 1. The preset for the detected environment (`AppConfig::for_environment`)
//! 2. An optional `config/mailgate.{toml,yaml,json}` file
//! 3. `MAILGATE__SECTION__KEY` variables, e.g. `MAILGATE__ACCESS__REUSE_WINDOW_SECONDS=90`
//! 4. `DATABASE_URL`, which always wins for the connection string

use config::{Config, File};

use mg_shared::config::{AppConfig, Environment};

use crate::InfrastructureError;

const ENV_PREFIX: &str = "MAILGATE";
const CONFIG_FILE: &str = "config/mailgate";

/// Load configuration from `.env` files, the config file and the environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();

    let mut app = assemble(environment, env_source(), true)?;
    if let Ok(url) = std::env::var("DATABASE_URL") {
        app.database.url = url;
    }

    tracing::debug!(
        environment = %app.environment,
        reuse_window_seconds = app.access.reuse_window_seconds,
        retention_hours = app.access.retention_hours,
        "Configuration loaded"
    );
    Ok(app)
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Layer the environment preset, the optional file and variables
pub(crate) fn assemble(
    environment: Environment,
    variables: config::Environment,
    read_file: bool,
) -> Result<AppConfig, InfrastructureError> {
    let preset = AppConfig::for_environment(environment);

    let mut builder = Config::builder().add_source(Config::try_from(&preset)?);
    if read_file {
        builder = builder.add_source(File::with_name(CONFIG_FILE).required(false));
    }

    let app = builder.add_source(variables).build()?.try_deserialize()?;
    Ok(app)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use mg_shared::config::LogFormat;

    use super::*;

    fn variables(pairs: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env_source().source(Some(map))
    }

    #[test]
    fn test_preset_without_overrides() {
        let app = assemble(Environment::Production, variables(&[]), false).unwrap();
        assert_eq!(app.environment, Environment::Production);
        assert_eq!(app.database.max_connections, 20);
        assert_eq!(app.logging.format, LogFormat::Json);
        assert_eq!(app.access.reuse_window_seconds, 60);
        assert_eq!(app.access.retention_hours, 24);
    }

    #[test]
    fn test_variables_override_preset() {
        let app = assemble(
            Environment::Development,
            variables(&[
                ("MAILGATE__ACCESS__REUSE_WINDOW_SECONDS", "90"),
                ("MAILGATE__ACCESS__STORE_TIMEOUT_MS", "250"),
                ("MAILGATE__LOGGING__FORMAT", "compact"),
                ("MAILGATE__DATABASE__URL", "mysql://db:3306/codes"),
            ]),
            false,
        )
        .unwrap();

        assert_eq!(app.access.reuse_window_seconds, 90);
        assert_eq!(app.access.store_timeout_ms, 250);
        assert_eq!(app.access.sweep_cooldown_minutes, 60);
        assert_eq!(app.logging.format, LogFormat::Compact);
        assert_eq!(app.database.url, "mysql://db:3306/codes");
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let result = assemble(
            Environment::Development,
            variables(&[("MAILGATE__ACCESS__RETENTION_HOURS", "forever")]),
            false,
        );
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }
}
