// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

use super::{schema, GLOBAL_CONFIG_OVERRIDE_ENV_VAR};
use config::{ConfigError, Map, Source, Value};
use log::*;
use std::env;

pub static ENV_PREFIX: &str = "CERTGEN_";

/// Options obtained from `CERTGEN_*` environment variables
///
/// The variable name is mapped to the option key by dropping the prefix,
/// lowercasing and replacing `_` with `-`, so that `CERTGEN_CA_GENERATE`
/// sets `ca-generate`.
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    map: Map<String, Value>,
}

/// Returns the option set by an environment variable, if any
pub fn env_var_to_key(name: &str) -> Option<String> {
    if name == GLOBAL_CONFIG_OVERRIDE_ENV_VAR {
        return None;
    }
    let suffix = name.strip_prefix(ENV_PREFIX)?;
    Some(suffix.to_lowercase().replace('_', "-"))
}

/// Returns the environment variable setting an option
pub fn key_to_env_var(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.to_uppercase().replace('-', "_"))
}

impl EnvConfig {
    /// Collects the options from the process environment
    pub fn new() -> Self {
        Self::from_vars(
            env::vars_os().filter_map(|(k, v)| {
                Some((k.into_string().ok()?, v.into_string().ok()?))
            }),
        )
    }

    /// Collects the options from the given variables
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = Map::new();
        for (name, value) in vars {
            let name = name.as_ref();
            let Some(key) = env_var_to_key(name) else {
                continue;
            };
            if schema::field(&key).is_none() {
                debug!("Ignoring unrecognized environment variable {name}");
                continue;
            }
            let value = value.into();
            debug!("Environment configuration {key}={value}");
            _ = map.insert(key, Value::from(value));
        }
        EnvConfig { map }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Source for EnvConfig {
    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self.map.clone())
    }

    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{resolve, SlotId, ValueSource};
    use config::Config;
    use std::time::Duration;

    #[test]
    fn test_env_var_names() {
        assert_eq!(
            env_var_to_key("CERTGEN_CA_SECRET_NAMESPACE").as_deref(),
            Some("ca-secret-namespace")
        );
        assert_eq!(
            env_var_to_key("CERTGEN_K8S_REQUEST_TIMEOUT").as_deref(),
            Some("k8s-request-timeout")
        );
        assert_eq!(env_var_to_key("HOME"), None);
        assert_eq!(env_var_to_key(GLOBAL_CONFIG_OVERRIDE_ENV_VAR), None);

        for f in schema::fields() {
            assert_eq!(
                env_var_to_key(&key_to_env_var(f.key)).as_deref(),
                Some(f.key)
            );
        }
    }

    #[test]
    fn test_env_config_as_source() {
        let env_config = EnvConfig::from_vars([
            ("CERTGEN_CA_GENERATE", "true"),
            ("CERTGEN_CILIUM_NAMESPACE", "cilium"),
            ("CERTGEN_HUBBLE_SERVER_CERT_VALIDITY_DURATION", "720h"),
            ("CERTGEN_CLUSTERMESH_APISERVER_SERVER_CERT_SANS", "a.io b.io"),
            ("CERTGEN_NOT_AN_OPTION", "value"),
            ("PATH", "/usr/bin"),
        ]);

        let source = Config::builder()
            .add_source(env_config)
            .build()
            .expect("failed to build config");
        assert!(ValueSource::get_string(&source, "not-an-option").is_empty());

        let config = resolve(&source);
        assert!(config.slot(SlotId::Ca).generate);
        assert_eq!(config.global.default_namespace, "cilium");
        assert_eq!(
            config.slot(SlotId::HubbleServer).validity_duration,
            Duration::from_secs(720 * 3600)
        );
        assert_eq!(
            config.slot(SlotId::ClustermeshApiserverServer).sans,
            ["a.io", "b.io"]
        );
    }

    #[test]
    fn test_override_variable_is_not_an_option() {
        let env_config = EnvConfig::from_vars([(
            GLOBAL_CONFIG_OVERRIDE_ENV_VAR,
            "/tmp/certgen.conf",
        )]);
        assert!(env_config.is_empty());
    }
}
