//! Calculator settings loaded from a TOML file.
//!
//! ```toml
//! currency_symbol = "฿"
//! precision = 2
//! log_level = "warn"
//! log_file = "tax-calculator.log"
//!
//! [[income]]
//! description = "Monthly salary"
//! amount = 45000
//! multiplier = 12
//!
//! [[expenses]]
//! description = "Personal allowance"
//! amount = 60000
//! fixed = true
//! ```
//!
//! Every key is optional. Omitted item tables fall back to the built-in seed
//! lines.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::{MAX_PRECISION, NewLineItem};
use tax_core::session::{default_expenses, default_income};
use thiserror::Error;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tax-calculator.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{}: precision {value} exceeds the maximum of {MAX_PRECISION}", path.display())]
    Precision { path: PathBuf, value: u32 },
}

/// Settings for a calculator run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Symbol printed after money amounts.
    pub currency_symbol: String,
    /// Fraction digits for money and rates, at most [`MAX_PRECISION`].
    pub precision: u32,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Append log records to this file.
    pub log_file: Option<PathBuf>,
    pub income: Vec<NewLineItem>,
    pub expenses: Vec<NewLineItem>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "฿".to_string(),
            precision: 2,
            log_level: "warn".to_string(),
            log_file: None,
            income: default_income(),
            expenses: default_expenses(),
        }
    }
}

impl AppConfig {
    /// Parses config text; `path` is only used in error messages.
    ///
    /// Item amounts and multipliers are coerced like typed input, so
    /// `"60,000"` reads as 60000 and non-numeric text as 0.
    pub fn from_toml(
        contents: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.precision > MAX_PRECISION {
            return Err(ConfigError::Precision {
                path: path.to_path_buf(),
                value: config.precision,
            });
        }
        Ok(config)
    }

    /// Loads `path`, or returns `None` if it does not exist.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents, path).map(Some)
    }

    /// Loads the explicitly requested file, or the default file if present,
    /// or falls back to defaults.
    ///
    /// An explicitly requested file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(&contents, path)
            }
            None => {
                let loaded = Self::load_optional(Path::new(DEFAULT_CONFIG_FILE))?;
                if loaded.is_none() {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                }
                Ok(loaded.unwrap_or_default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn parse(contents: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml(contents, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").expect("empty config is valid");

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.income.len(), 1);
        assert_eq!(config.expenses.len(), 2);
    }

    #[test]
    fn scalar_settings_override_defaults() {
        let config = parse(
            r#"
currency_symbol = "THB"
precision = 0
log_level = "debug"
log_file = "calc.log"
"#,
        )
        .expect("should parse");

        assert_eq!(config.currency_symbol, "THB");
        assert_eq!(config.precision, 0);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, Some(PathBuf::from("calc.log")));
        assert_eq!(config.income, default_income());
    }

    #[test]
    fn item_tables_replace_seed_lines() {
        let config = parse(
            r#"
[[income]]
description = "Monthly salary"
amount = 45000
multiplier = 12

[[expenses]]
description = "Personal allowance"
amount = "60000"
fixed = true
"#,
        )
        .expect("should parse");

        assert_eq!(
            config.income,
            vec![NewLineItem::new("Monthly salary", dec!(45000), dec!(12))]
        );
        assert_eq!(
            config.expenses,
            vec![NewLineItem::new("Personal allowance", dec!(60000), dec!(1)).fixed()]
        );
    }

    #[test]
    fn item_amounts_are_coerced_like_typed_input() {
        let config = parse(
            r#"
[[income]]
description = "Salary"
amount = "60,000"
multiplier = "12"

[[expenses]]
description = "Unknown"
amount = "abc"

[[expenses]]
description = "Not a number"
amount = nan
multiplier = 1.5
"#,
        )
        .expect("numeric text never fails the load");

        assert_eq!(
            config.income,
            vec![NewLineItem::new("Salary", dec!(60000), dec!(12))]
        );
        assert_eq!(config.expenses[0].amount, dec!(0));
        assert_eq!(config.expenses[0].multiplier, dec!(1));
        assert_eq!(config.expenses[1].amount, dec!(0));
        assert_eq!(config.expenses[1].multiplier, dec!(1.5));
    }

    #[test]
    fn precision_above_decimal_scale_is_rejected() {
        let result = parse("precision = 4294967295\n");

        assert!(matches!(
            result,
            Err(ConfigError::Precision {
                value: 4294967295,
                ..
            })
        ));
    }

    #[test]
    fn precision_at_decimal_scale_is_accepted() {
        let config = parse("precision = 28\n").expect("28 digits is valid");

        assert_eq!(config.precision, MAX_PRECISION);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = parse("currency = \"USD\"\n");

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_optional_file_is_none() {
        let result = AppConfig::load_optional(Path::new("no/such/dir/tax-calculator.toml"));

        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("no/such/dir/custom.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
