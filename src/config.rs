//! Parser configuration: negation precedence and negation prefix.

use serde::Deserialize;
use thiserror::Error;

/// The negation prefix used when none is configured (`-noX` negates `-X`).
pub const DEFAULT_NEGATION_PREFIX: &str = "no";

/// Errors that can occur during config parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("negation prefix must not be empty")]
    EmptyNegationPrefix,

    #[error("invalid negation prefix '{0}': must not contain '=' or start with '-'")]
    InvalidNegationPrefix(String),
}

/// How a value synthesized from a negation flag competes with an explicit flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
    /// An explicit `-X` beats anything derived from `-noX`, wherever it appears.
    #[default]
    ExplicitWins,
    /// Whichever of `-X` / `-noX` appears later decides the value of `-X`.
    LastWins,
}

/// Options controlling how an argument table is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Policy for `-X` vs. `-noX` conflicts
    pub precedence: Precedence,
    /// Prefix marking a negation flag, without the leading dash
    pub negation_prefix: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            precedence: Precedence::default(),
            negation_prefix: DEFAULT_NEGATION_PREFIX.to_string(),
        }
    }
}

impl ParserConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.negation_prefix.is_empty() {
            return Err(ConfigError::EmptyNegationPrefix);
        }
        if self.negation_prefix.contains('=') || self.negation_prefix.starts_with('-') {
            return Err(ConfigError::InvalidNegationPrefix(
                self.negation_prefix.clone(),
            ));
        }
        Ok(())
    }

    /// Builder-style setter for the precedence policy.
    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ParserConfig::from_json("{}").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.precedence, Precedence::ExplicitWins);
        assert_eq!(config.negation_prefix, "no");
    }

    #[test]
    fn test_parse_last_wins() {
        let config = ParserConfig::from_json(r#"{"precedence":"last-wins"}"#).unwrap();
        assert_eq!(config.precedence, Precedence::LastWins);
    }

    #[test]
    fn test_parse_custom_prefix() {
        let config = ParserConfig::from_json(r#"{"negation_prefix":"disable-"}"#).unwrap();
        assert_eq!(config.negation_prefix, "disable-");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_json() {
        let result = ParserConfig::from_json("not json");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ParserConfig::from_json(r#"{"schema_version":2}"#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_precedence_rejected() {
        let result = ParserConfig::from_json(r#"{"precedence":"first-wins"}"#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate_empty_prefix() {
        let config = ParserConfig::from_json(r#"{"negation_prefix":""}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyNegationPrefix)
        ));
    }

    #[test]
    fn test_validate_prefix_with_equals() {
        let config = ParserConfig::from_json(r#"{"negation_prefix":"no="}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNegationPrefix(_))
        ));
    }

    #[test]
    fn test_validate_prefix_with_leading_dash() {
        let config = ParserConfig::from_json(r#"{"negation_prefix":"-no"}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNegationPrefix(_))
        ));
    }

    #[test]
    fn test_with_precedence() {
        let config = ParserConfig::default().with_precedence(Precedence::LastWins);
        assert_eq!(config.precedence, Precedence::LastWins);
        assert_eq!(config.negation_prefix, DEFAULT_NEGATION_PREFIX);
    }
}
