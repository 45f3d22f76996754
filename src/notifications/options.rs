//! Typed parsing of section options
//!
//! Sections only carry strings. Each backend declares a `Deserialize` struct
//! for the options it understands; unknown keys are ignored and missing
//! required keys surface as [`BackendError::InvalidOptions`].

use std::fmt::Display;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;

use crate::config::SectionOptions;
use crate::notifications::error::{BackendError, BackendResult};

/// Deserialize a backend's option struct from raw section options
pub fn parse_options<T: DeserializeOwned>(backend: &str, options: &SectionOptions) -> BackendResult<T> {
    let value = serde_json::to_value(options)
        .map_err(|e| BackendError::invalid_options(backend, e.to_string()))?;
    serde_json::from_value(value).map_err(|e| BackendError::invalid_options(backend, e.to_string()))
}

/// `deserialize_with` helper for options stored as strings but typed otherwise
pub fn from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim().parse().map_err(de::Error::custom)
}

/// Same as [`from_str`] for optional values
pub fn option_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    from_str(deserializer).map(Some)
}

/// `deserialize_with` helper splitting a comma separated list
pub fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(de::Error::custom("list must contain at least one entry"));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
        #[serde(default = "default_port", deserialize_with = "from_str")]
        port: u16,
        #[serde(default, deserialize_with = "option_from_str")]
        level: Option<i8>,
        #[serde(default, deserialize_with = "comma_list")]
        to: Vec<String>,
    }

    fn default_port() -> u16 {
        587
    }

    fn options(pairs: &[(&str, &str)]) -> SectionOptions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_required_and_defaults() {
        let sample: Sample = parse_options("sample", &options(&[("name", "x")])).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.port, 587);
        assert_eq!(sample.level, None);
        assert!(sample.to.is_empty());
    }

    #[test]
    fn test_typed_values_from_strings() {
        let sample: Sample = parse_options(
            "sample",
            &options(&[
                ("name", "x"),
                ("port", " 2525 "),
                ("level", "-2"),
                ("to", "a@example.com, b@example.com,"),
            ]),
        )
        .unwrap();
        assert_eq!(sample.port, 2525);
        assert_eq!(sample.level, Some(-2));
        assert_eq!(sample.to, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_unknown_options_are_ignored() {
        let sample: Sample =
            parse_options("sample", &options(&[("name", "x"), ("spam", "AzerTY")])).unwrap();
        assert_eq!(sample.name, "x");
    }

    #[test]
    fn test_missing_required_option_names_backend() {
        let err = parse_options::<Sample>("sample", &options(&[])).unwrap_err();
        match err {
            BackendError::InvalidOptions { backend, message } => {
                assert_eq!(backend, "sample");
                assert!(message.contains("name"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparsable_number_is_rejected() {
        let result = parse_options::<Sample>("sample", &options(&[("name", "x"), ("port", "smtp")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let result = parse_options::<Sample>("sample", &options(&[("name", "x"), ("to", " , ")]));
        assert!(result.is_err());
    }
}
