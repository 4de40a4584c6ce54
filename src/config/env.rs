//! Config file discovery and environment variable overrides.
//!
//! `MONEYWISE_CONFIG` names the config file. Without it, `./config.toml` is
//! used if present and built-in defaults otherwise. `MONEYWISE_LOCALE`
//! replaces the configured locale. Both may come from `.env`, which `main`
//! loads before calling [`load_app_configuration`].

use std::path::Path;
use tracing::{info, warn};

use crate::{
    config::app::{AppConfig, load_config},
    errors::{Error, Result},
    locale::Locale,
};

/// Variable naming the config file
pub const CONFIG_PATH_VAR: &str = "MONEYWISE_CONFIG";
/// Variable overriding `[app] locale`
pub const LOCALE_VAR: &str = "MONEYWISE_LOCALE";
/// Config file used when [`CONFIG_PATH_VAR`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Loads the application configuration from the process environment.
///
/// # Errors
/// Returns [`Error::Config`] if an explicitly named file is missing, any
/// file fails to parse, or the locale override is not a known tag.
pub fn load_app_configuration() -> Result<AppConfig> {
    resolve_config(|key| std::env::var(key).ok(), DEFAULT_CONFIG_PATH)
}

/// Loads configuration using `lookup` for environment variables.
///
/// # Errors
/// As [`load_app_configuration`].
pub fn resolve_config<F, P>(lookup: F, default_path: P) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
    P: AsRef<Path>,
{
    let mut config = match lookup(CONFIG_PATH_VAR) {
        Some(path) => {
            info!("Loading configuration from {} ({})", path, CONFIG_PATH_VAR);
            load_config(&path)?
        }
        None if default_path.as_ref().exists() => {
            info!(
                "Loading configuration from {}",
                default_path.as_ref().display()
            );
            load_config(default_path.as_ref())?
        }
        None => {
            warn!(
                "No {} found, using built-in defaults",
                default_path.as_ref().display()
            );
            AppConfig::default()
        }
    };

    if let Some(tag) = lookup(LOCALE_VAR) {
        config.app.locale = tag.parse::<Locale>().map_err(|e| Error::Config {
            message: format!("{LOCALE_VAR}: {e}"),
        })?;
        info!("Locale overridden to {}", config.app.locale);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_config(env_of(&[]), dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_default_file_is_read_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calendar]\nupcoming_limit = 2\n").unwrap();

        let config = resolve_config(env_of(&[]), &path).unwrap();
        assert_eq!(config.calendar.upcoming_limit, 2);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere.toml");
        let lookup = env_of(&[(CONFIG_PATH_VAR, missing.to_str().unwrap())]);
        let err = resolve_config(lookup, dir.path().join("config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_explicit_path_and_locale_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[app]\nlocale = \"ru\"\nsample_data = false").unwrap();
        let lookup = env_of(&[
            (CONFIG_PATH_VAR, file.path().to_str().unwrap()),
            (LOCALE_VAR, "EN"),
        ]);

        let config = resolve_config(lookup, "unused.toml").unwrap();
        assert_eq!(config.app.locale, Locale::En);
        assert!(!config.app.sample_data);
    }

    #[test]
    fn test_unknown_locale_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = env_of(&[(LOCALE_VAR, "fr")]);
        let err = resolve_config(lookup, dir.path().join("config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
