// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

use crate::{config::*, list_parser::parse_list};
use config::{Config, ConfigError, Map, Source, Value};
use log::*;

/// Options set explicitly, e.g. from the command line
#[derive(Clone, Debug, Default)]
pub struct OverrideConfig {
    map: Map<String, Value>,
}

impl OverrideConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a recognized option
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, CertgenConfigError> {
        if schema::field(key).is_none() {
            return Err(CertgenConfigError::UnknownOption(key.to_string()));
        }
        _ = self.map.insert(key.to_string(), value.into());
        Ok(self)
    }

    /// Sets a recognized option from its textual form, checking that it
    /// can be read as the type the option is declared with
    pub fn parse(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<&mut Self, CertgenConfigError> {
        let Some(field) = schema::field(key) else {
            return Err(CertgenConfigError::UnknownOption(key.to_string()));
        };
        let invalid = |reason: String| CertgenConfigError::InvalidOverride {
            key: key.to_string(),
            reason,
        };
        match field.kind {
            FieldKind::Bool => {
                let parsed = parse_bool(value.trim()).ok_or_else(|| {
                    invalid(format!("'{value}' is not a boolean"))
                })?;
                self.set(key, parsed)
            }
            FieldKind::String => self.set(key, value),
            FieldKind::Duration => {
                _ = coerce_duration(value)
                    .map_err(|e| invalid(e.to_string()))?;
                self.set(key, value)
            }
            FieldKind::StringList => {
                let items =
                    parse_list(value).map_err(|e| invalid(e.to_string()))?;
                self.set(key, items)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl From<Map<String, Value>> for OverrideConfig {
    fn from(map: Map<String, Value>) -> Self {
        OverrideConfig { map }
    }
}

impl Source for OverrideConfig {
    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self.map.clone())
    }

    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }
}

/// Builds the merged key/value snapshot the configuration is resolved from
///
/// The layers are applied from the lowest to the highest priority:
///
/// 1. built-in defaults
/// 2. configuration files
/// 3. `CERTGEN_*` environment variables
/// 4. explicit overrides (command line flags)
#[derive(Clone, Debug)]
pub struct ConfigLoader {
    defaults: bool,
    files: FileConfigBuilder,
    env: Option<EnvConfig>,
    overrides: OverrideConfig,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        ConfigLoader {
            defaults: true,
            files: FileConfigBuilder::default(),
            env: None,
            overrides: OverrideConfig::default(),
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the built-in defaults, leaving unset options to their zero value
    pub fn without_defaults(mut self) -> Self {
        self.defaults = false;
        self
    }

    pub fn files(mut self, files: FileConfigBuilder) -> Self {
        self.files = files;
        self
    }

    pub fn env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self
    }

    pub fn overrides(mut self, overrides: OverrideConfig) -> Self {
        self.overrides = overrides;
        self
    }

    /// Merges all the layers into a single snapshot
    pub fn load(&self) -> Result<Config, CertgenConfigError> {
        let mut builder = Config::builder();
        if self.defaults {
            builder = builder.add_source(DefaultConfig);
        }
        builder = self.files.add_to(builder)?;
        if let Some(env) = &self.env {
            builder = builder.add_source(env.clone());
        }
        let config = builder.add_source(self.overrides.clone()).build()?;

        for key in config.collect()?.keys() {
            if schema::field(key).is_none() {
                warn!("Ignoring unknown configuration option '{key}'");
            }
        }
        Ok(config)
    }

    /// Loads the snapshot and resolves it into a `Configuration`
    pub fn resolve(&self) -> Result<Configuration, CertgenConfigError> {
        let config = resolve(&self.load()?);
        debug!("Configuration resolved: {config:?}");
        Ok(config)
    }
}
