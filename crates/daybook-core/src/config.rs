use anyhow::Context;
use chrono::Weekday;
use serde::Deserialize;
use tracing::{
  error,
  info,
  warn
};

use crate::task::{
  Category,
  Priority
};

const BOARD_CONFIG_TOML: &str =
  include_str!("../assets/daybook.toml");

pub const DEFAULT_STORAGE_KEY: &str =
  "daybook.tasks";

const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
  CONFIG_VERSION
}

fn default_storage_key() -> String {
  DEFAULT_STORAGE_KEY.to_string()
}

fn default_week_start() -> String {
  "sunday".to_string()
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct BoardConfig {
  #[serde(default = "default_version")]
  pub version:     u32,
  #[serde(
    default = "default_storage_key"
  )]
  pub storage_key: String,
  #[serde(default)]
  pub defaults:    TaskDefaults,
  #[serde(default)]
  pub calendar:    CalendarSettings
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Deserialize,
)]
pub struct TaskDefaults {
  #[serde(default)]
  pub priority: Priority,
  #[serde(default)]
  pub category: Category
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct CalendarSettings {
  #[serde(
    default = "default_week_start"
  )]
  pub week_start: String
}

impl Default for CalendarSettings {
  fn default() -> Self {
    Self {
      week_start: default_week_start()
    }
  }
}

impl Default for BoardConfig {
  fn default() -> Self {
    Self {
      version:     default_version(),
      storage_key: default_storage_key(),
      defaults:    TaskDefaults::default(),
      calendar:    CalendarSettings::default()
    }
  }
}

impl BoardConfig {
  /// Loads the configuration bundled with
  /// the crate, falling back to defaults
  /// when it cannot be parsed.
  pub fn load() -> Self {
    match Self::from_toml_str(
      BOARD_CONFIG_TOML
    ) {
      | Ok(config) => {
        info!(
          version = config.version,
          storage_key = %config.storage_key,
          week_start = %config.calendar.week_start,
          "loaded board config"
        );
        config
      }
      | Err(err) => {
        error!(
          error = %err,
          "failed parsing board config; using defaults"
        );
        Self::default()
      }
    }
  }

  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<Self>(raw)
        .context(
          "failed to parse board \
           config"
        )?;
    sanitize_board_config(&mut config);
    Ok(config)
  }

  #[must_use]
  pub fn week_start_day(&self) -> Weekday {
    if self.calendar.week_start == "monday"
    {
      Weekday::Mon
    } else {
      Weekday::Sun
    }
  }
}

fn sanitize_board_config(
  config: &mut BoardConfig
) {
  if config.storage_key.trim().is_empty()
  {
    warn!(
      "board config had a blank \
       storage key"
    );
    config.storage_key =
      default_storage_key();
  } else {
    config.storage_key = config
      .storage_key
      .trim()
      .to_string();
  }

  let week_start = config
    .calendar
    .week_start
    .trim()
    .to_ascii_lowercase();
  config.calendar.week_start =
    match week_start.as_str() {
      | "sunday" | "monday" => {
        week_start
      }
      | other => {
        warn!(
          week_start = %other,
          "unknown week start; using sunday"
        );
        default_week_start()
      }
    };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bundled_config_parses() {
    let config = BoardConfig::from_toml_str(
      BOARD_CONFIG_TOML
    )
    .expect("bundled config");

    assert_eq!(
      config.storage_key,
      DEFAULT_STORAGE_KEY
    );
    assert_eq!(
      config.defaults,
      TaskDefaults::default()
    );
    assert_eq!(
      config.week_start_day(),
      Weekday::Sun
    );
  }

  #[test]
  fn sanitizes_blank_and_unknown_values() {
    let config = BoardConfig::from_toml_str(
      r#"
storage_key = "   "

[defaults]
priority = "High"

[calendar]
week_start = "Caturday"
"#
    )
    .expect("config");

    assert_eq!(
      config.storage_key,
      DEFAULT_STORAGE_KEY
    );
    assert_eq!(
      config.defaults.priority,
      Priority::High
    );
    assert_eq!(
      config.defaults.category,
      Category::Personal
    );
    assert_eq!(
      config.calendar.week_start,
      "sunday"
    );
  }

  #[test]
  fn accepts_monday_week_start() {
    let config = BoardConfig::from_toml_str(
      "[calendar]\nweek_start = \"Monday\"\n"
    )
    .expect("config");

    assert_eq!(
      config.week_start_day(),
      Weekday::Mon
    );
  }

  #[test]
  fn missing_fields_match_defaults() {
    let config =
      BoardConfig::from_toml_str("")
        .expect("empty config");

    assert_eq!(
      config,
      BoardConfig::default()
    );
    assert_eq!(config.version, 1);
  }

  #[test]
  fn rejects_unknown_priority() {
    assert!(
      BoardConfig::from_toml_str(
        "[defaults]\npriority = \"Urgent\"\n"
      )
      .is_err()
    );
  }
}
