//! calman configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Weekday;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalmanError, CalmanResult};
use crate::valid_range::{DEFAULT_END, DEFAULT_START, ValidRange};
use crate::validation::Locale;

/// Which grid the calendar opens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Week,
    Day,
}

impl FromStr for View {
    type Err = CalmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(View::Week),
            "day" => Ok(View::Day),
            _ => Err(CalmanError::InvalidField {
                field: "view",
                value: s.to_string(),
            }),
        }
    }
}

fn default_first_day() -> Weekday {
    Weekday::Mon
}

/// Configuration at ~/.config/calman/config.toml, overridable through
/// `CALMAN_*` environment variables (`CALMAN_LOCALE=en`,
/// `CALMAN_VALID_RANGE__START=2021-02-01`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalmanConfig {
    pub valid_range: ValidRange,
    pub locale: Locale,
    #[serde(default = "default_first_day")]
    pub first_day: Weekday,
    pub initial_view: View,
}

impl Default for CalmanConfig {
    fn default() -> Self {
        CalmanConfig {
            valid_range: ValidRange::default(),
            locale: Locale::default(),
            first_day: default_first_day(),
            initial_view: View::default(),
        }
    }
}

impl CalmanConfig {
    pub fn config_path() -> CalmanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalmanError::Config("Could not determine config directory".into()))?
            .join("calman");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template there
    /// on first use.
    pub fn load() -> CalmanResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> CalmanResult<Self> {
        let config: CalmanConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("CALMAN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| CalmanError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalmanError::Config(e.to_string()))?;

        if config.valid_range.end <= config.valid_range.start {
            return Err(CalmanError::Config(format!(
                "valid_range.end ({}) must come after valid_range.start ({})",
                config.valid_range.end, config.valid_range.start
            )));
        }

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalmanResult<()> {
        let contents = format!(
            "\
# calman configuration

# Dates that can be selected (end is exclusive):
# [valid_range]
# start = \"{}\"
# end = \"{}\"

# Language of validation messages (de or en):
# locale = \"de\"

# Day the week grid starts on:
# first_day = \"Mon\"

# Grid shown first (week or day):
# initial_view = \"week\"
",
            DEFAULT_START, DEFAULT_END
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalmanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalmanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalmanConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.valid_range, ValidRange::default());
        assert_eq!(config.first_day, Weekday::Mon);
    }

    #[test]
    fn commented_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calman/config.toml");
        CalmanConfig::create_default_config(&path).unwrap();

        let config = CalmanConfig::load_from(&path).unwrap();
        assert_eq!(config.initial_view, View::Week);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "locale = \"en\"\ninitial_view = \"day\"\nfirst_day = \"Sun\"\n\n[valid_range]\nstart = \"2021-02-01\"\nend = \"2021-03-01\"\n",
        )
        .unwrap();

        let config = CalmanConfig::load_from(&path).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.initial_view, View::Day);
        assert_eq!(config.first_day, Weekday::Sun);
        assert_eq!(config.valid_range.start, NaiveDate::from_ymd_opt(2021, 2, 1).unwrap());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[valid_range]\nstart = \"2021-03-01\"\nend = \"2021-02-01\"\n").unwrap();

        assert!(matches!(
            CalmanConfig::load_from(&path),
            Err(CalmanError::Config(_))
        ));
    }
}
