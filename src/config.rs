use crate::date::{CivilDate, DEFAULT_UTC_OFFSET_MINUTES, reference_offset};
use crate::errors::ConfigError;
use chrono::FixedOffset;
use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub utc_offset: FixedOffset,
    /// Pins "today" instead of reading the wall clock.
    pub fixed_today: Option<CivilDate>,
    /// Makes the daily praise pick reproducible.
    pub praise_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => parse_value("PORT", value)?,
            None => 8080,
        };

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/records.json"));

        let offset_minutes = match lookup("APP_UTC_OFFSET_MINUTES") {
            Some(value) => parse_value("APP_UTC_OFFSET_MINUTES", value)?,
            None => DEFAULT_UTC_OFFSET_MINUTES,
        };
        let utc_offset =
            reference_offset(offset_minutes).ok_or_else(|| ConfigError::InvalidValue {
                name: "APP_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
            })?;

        let fixed_today = lookup("APP_FIXED_TODAY")
            .map(|value| value.trim().parse::<CivilDate>())
            .transpose()?;

        let praise_seed = lookup("APP_PRAISE_SEED")
            .map(|value| parse_value("APP_PRAISE_SEED", value))
            .transpose()?;

        Ok(Self {
            port,
            data_path,
            utc_offset,
            fixed_today,
            praise_seed,
        })
    }
}

fn parse_value<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.data_path, PathBuf::from("data/records.json"));
        assert_eq!(cfg.utc_offset.local_minus_utc(), 9 * 3600);
        assert!(cfg.fixed_today.is_none());
        assert!(cfg.praise_seed.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("PORT", "3000"),
            ("APP_DATA_PATH", "/tmp/records.json"),
            ("APP_UTC_OFFSET_MINUTES", "-300"),
            ("APP_FIXED_TODAY", "2024-06-03"),
            ("APP_PRAISE_SEED", "7"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/records.json"));
        assert_eq!(cfg.utc_offset.local_minus_utc(), -5 * 3600);
        assert_eq!(cfg.fixed_today.unwrap().to_string(), "2024-06-03");
        assert_eq!(cfg.praise_seed, Some(7));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("PORT", "http")]).is_err());
        assert!(config(&[("APP_UTC_OFFSET_MINUTES", "2000")]).is_err());
        assert!(matches!(
            config(&[("APP_FIXED_TODAY", "2024-02-30")]),
            Err(ConfigError::FixedToday(_))
        ));
    }
}
