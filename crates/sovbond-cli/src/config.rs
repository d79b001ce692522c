//! Persistent CLI configuration.
//!
//! A flat JSON map stored at `<config dir>/sovbond/config.json`. The
//! `SOVBOND_CONFIG` environment variable points at a different file.
//! Missing keys fall back to their defaults; command-line flags override
//! configured values.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use sovbond_bonds::types::{FinalPeriodDiscounting, PricingConventions};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SOVBOND_CONFIG";

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Default coupon frequency
    DefaultFrequency,
    /// Decimal places for printed prices
    DecimalPrecision,
    /// Ex-interest period before each coupon date
    ExInterestDays,
    /// Final coupon period discounting
    FinalPeriod,
}

impl ConfigKey {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "default_frequency" | "frequency" => Some(Self::DefaultFrequency),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "ex_interest_days" | "ex_interest" => Some(Self::ExInterestDays),
            "final_period" => Some(Self::FinalPeriod),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DefaultFrequency => "default_frequency",
            Self::DecimalPrecision => "decimal_precision",
            Self::ExInterestDays => "ex_interest_days",
            Self::FinalPeriod => "final_period",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DefaultFrequency => "Default coupon frequency (1, 2, 4)",
            Self::DecimalPrecision => "Decimal places for printed prices (0-12)",
            Self::ExInterestDays => "Ex-interest days before each coupon (none or 1-31)",
            Self::FinalPeriod => "Final coupon period discounting (simple, compound)",
        }
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DefaultFrequency => "2",
            Self::DecimalPrecision => "10",
            Self::ExInterestDays => "none",
            Self::FinalPeriod => "simple",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DefaultFrequency,
            Self::DecimalPrecision,
            Self::ExInterestDays,
            Self::FinalPeriod,
        ]
    }

    /// Checks that `value` is acceptable for this key.
    pub fn validate(&self, value: &str) -> CliResult<()> {
        let valid = match self {
            Self::DefaultFormat => OutputFormat::from_name(value).is_some(),
            Self::DefaultFrequency => ["1", "2", "4"].contains(&value),
            Self::DecimalPrecision => parse_precision(value).is_some(),
            Self::ExInterestDays => parse_ex_interest_days(value).is_some(),
            Self::FinalPeriod => parse_final_period(value).is_some(),
        };
        if valid {
            Ok(())
        } else {
            Err(CliError::Config(format!(
                "invalid value '{}' for {}: {}",
                value,
                self.as_str(),
                self.description()
            )))
        }
    }
}

/// Simple config storage.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            tracing::debug!("loaded configuration from {}", path.display());
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Configured value, or the key's default.
    pub fn value(&self, key: ConfigKey) -> &str {
        self.values
            .get(key.as_str())
            .map_or(key.default_value(), String::as_str)
    }

    pub fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    pub fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn default_format(&self) -> OutputFormat {
        self.typed(ConfigKey::DefaultFormat, OutputFormat::from_name, OutputFormat::Table)
    }

    pub fn default_frequency(&self) -> u32 {
        self.typed(ConfigKey::DefaultFrequency, |v| v.parse().ok(), 2)
    }

    pub fn decimal_precision(&self) -> u32 {
        self.typed(ConfigKey::DecimalPrecision, parse_precision, 10)
    }

    /// Pricing conventions built from the configured ex-interest period and
    /// final period discounting.
    pub fn conventions(&self) -> PricingConventions {
        let ex_interest_days = self.typed(ConfigKey::ExInterestDays, parse_ex_interest_days, None);
        let final_period = self.typed(
            ConfigKey::FinalPeriod,
            parse_final_period,
            FinalPeriodDiscounting::SimpleInterest,
        );
        PricingConventions::default()
            .with_ex_interest_days(ex_interest_days)
            .with_final_period(final_period)
    }

    /// Parses a configured value, falling back to `default` when a hand-edited
    /// file holds something unparseable.
    fn typed<T>(&self, key: ConfigKey, parse: impl Fn(&str) -> Option<T>, default: T) -> T {
        let raw = self.value(key);
        parse(raw).unwrap_or_else(|| {
            tracing::warn!("ignoring invalid {} '{}' in config file", key.as_str(), raw);
            default
        })
    }
}

fn parse_precision(value: &str) -> Option<u32> {
    value.parse().ok().filter(|p| *p <= 12)
}

fn parse_ex_interest_days(value: &str) -> Option<Option<u32>> {
    if value.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    value
        .parse::<u32>()
        .ok()
        .filter(|d| (1..=31).contains(d))
        .map(Some)
}

fn parse_final_period(value: &str) -> Option<FinalPeriodDiscounting> {
    match value.to_lowercase().as_str() {
        "simple" => Some(FinalPeriodDiscounting::SimpleInterest),
        "compound" => Some(FinalPeriodDiscounting::Compound),
        _ => None,
    }
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(home.join("sovbond").join("config.json"))
}
