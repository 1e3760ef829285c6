// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

use super::SlotId;
use config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertgenConfigError {
    // Error from config crate
    #[error("Error from the config crate")]
    Config(#[from] ConfigError),

    // Glob error
    #[error("Glob pattern error")]
    GlobPattern(#[from] glob::PatternError),

    // Override value given for a key that cannot take it
    #[error("Invalid value for option '{key}': {reason}")]
    InvalidOverride { key: String, reason: String },

    // Missing configuration file set in CERTGEN_CONFIG
    #[error(
        "Missing file {file} set in 'CERTGEN_CONFIG' environment variable"
    )]
    MissingEnvConfigFile { file: String },

    // Option not declared in the schema
    #[error("Unknown configuration option '{0}'")]
    UnknownOption(String),
}

/// Errors found when checking the slots marked for generation
///
/// These are raised at the boundary with the certificate generation, never
/// while resolving the configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerationRequestError {
    #[error("{slot} certificate generation requested but '{key}' is empty")]
    EmptyCommonName { slot: SlotId, key: &'static str },

    #[error(
        "{slot} certificate generation requested but '{key}' is zero"
    )]
    ZeroValidity { slot: SlotId, key: &'static str },

    #[error("{slot} certificate generation requested but '{key}' is empty")]
    EmptySecretName { slot: SlotId, key: &'static str },

    #[error("{slot} certificate generation requested but '{key}' is empty")]
    EmptySecretNamespace { slot: SlotId, key: &'static str },
}
