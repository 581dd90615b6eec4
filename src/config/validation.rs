//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Longest accepted rate limit interval (one day).
pub const MAX_RATE_LIMIT_SECS: u64 = 86_400;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("bot.nickname is required")]
    MissingNickname,
    #[error("commands.prefix must contain at least one character")]
    EmptyPrefix,
    #[error("commands.prefix must not contain whitespace")]
    WhitespacePrefix,
    #[error("twitch.client_id and twitch.token must both be set")]
    IncompleteTwitchCredentials,
    #[error("lastfm.api_key is required when [lastfm] is present")]
    MissingLastFmKey,
    #[error("commands.rate_limit_secs = {0} exceeds the maximum of {max}", max = MAX_RATE_LIMIT_SECS)]
    DefaultRateLimitTooLarge(u64),
    #[error(
        "commands.rate_limits.{command} = {secs} exceeds the maximum of {max}",
        max = MAX_RATE_LIMIT_SECS
    )]
    RateLimitTooLarge { command: String, secs: u64 },
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.bot.nickname.trim().is_empty() {
        errors.push(ValidationError::MissingNickname);
    }

    let prefix = &config.commands.prefix;
    if prefix.is_empty() {
        errors.push(ValidationError::EmptyPrefix);
    } else if prefix.chars().any(char::is_whitespace) {
        errors.push(ValidationError::WhitespacePrefix);
    }

    if config.commands.rate_limit_secs > MAX_RATE_LIMIT_SECS {
        errors.push(ValidationError::DefaultRateLimitTooLarge(
            config.commands.rate_limit_secs,
        ));
    }

    let mut too_large: Vec<_> = config
        .commands
        .rate_limits
        .iter()
        .filter(|&(_, &secs)| secs > MAX_RATE_LIMIT_SECS)
        .collect();
    too_large.sort();
    for (command, &secs) in too_large {
        errors.push(ValidationError::RateLimitTooLarge {
            command: command.clone(),
            secs,
        });
    }

    if let Some(ref twitch) = config.twitch {
        if twitch.client_id.is_empty() || twitch.token.is_empty() {
            errors.push(ValidationError::IncompleteTwitchCredentials);
        }
    }

    if let Some(ref lastfm) = config.lastfm {
        if lastfm.api_key.is_empty() {
            errors.push(ValidationError::MissingLastFmKey);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        Config::parse(toml).unwrap()
    }

    #[test]
    fn test_valid_config() {
        let config = parse("[bot]\nnickname = \"pump19\"\n");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = parse(
            r#"
            [bot]
            nickname = ""
            [commands]
            prefix = ""
            [lastfm]
            api_key = ""
            "#,
        );
        let errors = validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingNickname,
                ValidationError::EmptyPrefix,
                ValidationError::MissingLastFmKey,
            ]
        );
    }

    #[test]
    fn test_whitespace_prefix_rejected() {
        let config = parse("[bot]\nnickname = \"x\"\n[commands]\nprefix = \"! \"\n");
        assert_eq!(
            validate(&config).unwrap_err(),
            vec![ValidationError::WhitespacePrefix]
        );
    }

    #[test]
    fn test_incomplete_twitch_credentials() {
        let config = parse(
            "[bot]\nnickname = \"x\"\n[twitch]\nclient_id = \"id\"\ntoken = \"\"\n",
        );
        assert_eq!(
            validate(&config).unwrap_err(),
            vec![ValidationError::IncompleteTwitchCredentials]
        );
    }

    #[test]
    fn test_rate_limit_upper_bound() {
        let config = parse(
            r#"
            [bot]
            nickname = "x"
            [commands]
            rate_limit_secs = 9223372036854775807
            [commands.rate_limits]
            vod = 86401
            help = 86400
            clip = 999999999
            "#,
        );
        assert_eq!(
            validate(&config).unwrap_err(),
            vec![
                ValidationError::DefaultRateLimitTooLarge(i64::MAX as u64),
                ValidationError::RateLimitTooLarge {
                    command: "clip".into(),
                    secs: 999_999_999,
                },
                ValidationError::RateLimitTooLarge {
                    command: "vod".into(),
                    secs: 86_401,
                },
            ]
        );
    }
}
