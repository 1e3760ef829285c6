// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

use crate::{
    duration_parser::{parse_duration, DurationParsingError},
    list_parser::parse_list,
};
use config::{Config, ConfigError, Value, ValueKind};
use log::*;
use std::time::Duration;

/// A merged key/value snapshot with typed accessors
///
/// The accessors never fail: a missing key, or a value that cannot be
/// converted to the requested type, results in the zero value of that type
/// (`false`, empty string, zero duration, empty list). Checking that the raw
/// input is present and well formed is left to whoever builds the source.
pub trait ValueSource {
    fn get_bool(&self, key: &str) -> bool;

    fn get_string(&self, key: &str) -> String;

    fn get_duration(&self, key: &str) -> Duration;

    fn get_string_list(&self, key: &str) -> Vec<String>;

    /// Returns the value associated with `key` if it is non-empty, otherwise
    /// the value associated with `fallback_key`, even if that is empty too
    fn get_string_with_fallback(
        &self,
        key: &str,
        fallback_key: &str,
    ) -> String {
        let value = self.get_string(key);
        if !value.is_empty() {
            return value;
        }
        self.get_string(fallback_key)
    }
}

/// Parses a boolean the way `strconv.ParseBool`-style flags do
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses a duration, interpreting values without any unit as nanoseconds
///
/// An empty value is the zero duration.
pub(crate) fn coerce_duration(
    value: &str,
) -> Result<Duration, DurationParsingError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Duration::ZERO);
    }
    if value.contains(['n', 's', 'u', '\u{b5}', '\u{3bc}', 'm', 'h']) {
        parse_duration(value)
    } else {
        parse_duration(&format!("{value}ns"))
    }
}

fn lookup_string(config: &Config, key: &str) -> Option<String> {
    match Config::get_string(config, key) {
        Ok(value) => Some(value),
        Err(ConfigError::NotFound(_)) => None,
        Err(e) => {
            warn!("Ignoring option {key}: {e}");
            None
        }
    }
}

fn lookup_value(config: &Config, key: &str) -> Option<Value> {
    match Config::get::<Value>(config, key) {
        Ok(value) => Some(value),
        Err(ConfigError::NotFound(_)) => None,
        Err(e) => {
            warn!("Ignoring option {key}: {e}");
            None
        }
    }
}

impl ValueSource for Config {
    fn get_bool(&self, key: &str) -> bool {
        let Some(value) = lookup_value(self, key) else {
            return false;
        };
        // Numbers from files are true when non-zero
        match value.kind {
            ValueKind::Boolean(b) => b,
            ValueKind::I64(i) => i != 0,
            ValueKind::I128(i) => i != 0,
            ValueKind::U64(u) => u != 0,
            ValueKind::U128(u) => u != 0,
            ValueKind::Float(f) => f != 0.0,
            ValueKind::String(s) => parse_bool(s.trim()).unwrap_or_else(|| {
                warn!("Ignoring option {key}: invalid boolean '{s}'");
                false
            }),
            _ => {
                warn!("Ignoring option {key}: not a boolean");
                false
            }
        }
    }

    fn get_string(&self, key: &str) -> String {
        lookup_string(self, key).unwrap_or_default()
    }

    fn get_duration(&self, key: &str) -> Duration {
        let Some(value) = lookup_string(self, key) else {
            return Duration::ZERO;
        };
        coerce_duration(&value).unwrap_or_else(|e| {
            warn!("Ignoring option {key}: {e}");
            Duration::ZERO
        })
    }

    fn get_string_list(&self, key: &str) -> Vec<String> {
        match Config::get_array(self, key) {
            Ok(values) => values
                .into_iter()
                .filter_map(|v| match v.into_string() {
                    Ok(s) => Some(s),
                    Err(e) => {
                        warn!("Ignoring item of option {key}: {e}");
                        None
                    }
                })
                .filter(|s| !s.is_empty())
                .collect(),
            Err(ConfigError::NotFound(_)) => Vec::new(),
            // Lists given as a single string, e.g. from the environment
            Err(_) => {
                let Some(value) = lookup_string(self, key) else {
                    return Vec::new();
                };
                parse_list(&value).unwrap_or_else(|e| {
                    warn!("Ignoring option {key}: {e}");
                    Vec::new()
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::testing::source_from;

    #[test]
    fn test_missing_keys_are_zero() {
        let source = source_from(&[]);
        assert!(!ValueSource::get_bool(&source, "ca-generate"));
        assert_eq!(ValueSource::get_string(&source, "ca-common-name"), "");
        assert_eq!(
            source.get_duration("ca-validity-duration"),
            Duration::ZERO
        );
        assert!(source
            .get_string_list("clustermesh-apiserver-server-cert-sans")
            .is_empty());
    }

    #[test]
    fn test_bool_coercion() {
        for (raw, expected) in [
            ("true", true),
            ("True", true),
            ("1", true),
            ("t", true),
            ("false", false),
            ("0", false),
            ("F", false),
            ("yes please", false),
            ("", false),
        ] {
            let source = source_from(&[("ca-generate", raw)]);
            assert_eq!(
                ValueSource::get_bool(&source, "ca-generate"),
                expected,
                "unexpected value for {raw:?}"
            );
        }

        let source = Config::builder()
            .set_override("ca-generate", true)
            .and_then(|b| b.build())
            .expect("failed to build config");
        assert!(ValueSource::get_bool(&source, "ca-generate"));
    }

    #[test]
    fn test_duration_coercion() {
        let source = source_from(&[
            ("a", "1h30m"),
            ("b", "1500"),
            ("c", "0"),
            ("d", "soon"),
            ("e", "-1h"),
        ]);
        assert_eq!(source.get_duration("a"), Duration::from_secs(5400));
        assert_eq!(source.get_duration("b"), Duration::from_nanos(1500));
        assert_eq!(source.get_duration("c"), Duration::ZERO);
        assert_eq!(source.get_duration("d"), Duration::ZERO);
        assert_eq!(source.get_duration("e"), Duration::ZERO);

        let source = Config::builder()
            .set_override("timeout", 60_000_000_000_i64)
            .and_then(|b| b.build())
            .expect("failed to build config");
        assert_eq!(source.get_duration("timeout"), Duration::from_secs(60));
    }

    #[test]
    fn test_numeric_bool_coercion() {
        for (raw, expected) in
            [(2_i64, true), (1, true), (-1, true), (0, false)]
        {
            let source = Config::builder()
                .set_override("ca-generate", raw)
                .and_then(|b| b.build())
                .expect("failed to build config");
            assert_eq!(
                ValueSource::get_bool(&source, "ca-generate"),
                expected,
                "unexpected value for {raw}"
            );
        }
        // Only numbers are read that way, not numeric strings
        let source = source_from(&[("ca-generate", "2")]);
        assert!(!ValueSource::get_bool(&source, "ca-generate"));
    }

    #[test]
    fn test_empty_duration_is_zero() {
        for raw in ["", "  "] {
            assert_eq!(coerce_duration(raw).ok(), Some(Duration::ZERO));
            let source = source_from(&[("ca-validity-duration", raw)]);
            assert_eq!(
                source.get_duration("ca-validity-duration"),
                Duration::ZERO
            );
        }
    }

    #[test]
    fn test_string_list_coercion() {
        let source = source_from(&[("sans", "a.example.com, b.example.com")]);
        assert_eq!(
            source.get_string_list("sans"),
            ["a.example.com", "b.example.com"]
        );

        let source = Config::builder()
            .set_override(
                "sans",
                vec![Value::from("x"), Value::from(""), Value::from("y")],
            )
            .and_then(|b| b.build())
            .expect("failed to build config");
        assert_eq!(source.get_string_list("sans"), ["x", "y"]);

        let source = source_from(&[("sans", "[unterminated")]);
        assert!(source.get_string_list("sans").is_empty());
    }

    #[test]
    fn test_string_with_fallback() {
        let source = source_from(&[
            ("empty", ""),
            ("set", "value"),
            ("fallback", "default"),
        ]);
        assert_eq!(
            source.get_string_with_fallback("set", "fallback"),
            "value"
        );
        assert_eq!(
            source.get_string_with_fallback("empty", "fallback"),
            "default"
        );
        assert_eq!(
            source.get_string_with_fallback("missing", "fallback"),
            "default"
        );
        assert_eq!(source.get_string_with_fallback("missing", "none"), "");
    }
}
