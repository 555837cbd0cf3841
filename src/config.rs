use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::LeapDayPolicy;
use crate::error::{Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "YEARVIEW_CONFIG_FILE";

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("yearview").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".yearview.toml"));
    }

    locations
}

fn default_years() -> Vec<i32> {
    vec![2018, 2017, 2016, 2015]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Years offered in the year selector, in display order.
    pub years: Vec<i32>,
    pub leap_day: LeapDayPolicy,
    pub archive: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            years: default_years(),
            leap_day: LeapDayPolicy::default(),
            archive: None,
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::new(
                ErrorKind::ConfigParse,
                &format!("{}: {}", path.display(), e),
            )
        })?;

        Ok(config)
    }

    /// The year shown when none was asked for.
    pub fn default_year(&self) -> Option<i32> {
        self.years.first().copied()
    }
}

/// Loads `path` if given, otherwise the first existing file of
/// [`find_configfile_locations`], falling back to defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Using config file '{}'", path.display());
        return Config::from_path(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => {
            log::info!("Using config file '{}'", location.display());
            Config::from_path(&location)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_year(), Some(2018));
        assert_eq!(config.leap_day, LeapDayPolicy::Clamp);
    }

    #[test]
    fn parse_full_config() {
        let config: Config = toml::from_str(
            r#"
years = [2020, 2019]
leap_day = "rollover"
archive = "/srv/journal/archive.toml"
"#,
        )
        .unwrap();

        assert_eq!(config.years, vec![2020, 2019]);
        assert_eq!(config.leap_day, LeapDayPolicy::Rollover);
        assert_eq!(
            config.archive.as_deref(),
            Some(Path::new("/srv/journal/archive.toml"))
        );
    }

    #[test]
    fn reject_unknown_policy() {
        assert!(toml::from_str::<Config>("leap_day = \"skip\"").is_err());
    }

    #[test]
    fn missing_explicit_config_is_io_error() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/yearview.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }

    #[test]
    fn no_years_means_no_default_year() {
        let config: Config = toml::from_str("years = []").unwrap();
        assert_eq!(config.default_year(), None);
    }
}
