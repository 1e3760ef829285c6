// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

//! Testing utilities for configuration management
//!
//! This module provides helpers to build key/value sources from literal
//! pairs, standing in for the layered loader during tests.

use config::Config;

/// Create a source containing exactly the given options
///
/// # Arguments
///
/// * `pairs`: option names and raw values, as they would be found in the
///   environment or on the command line
///
/// # Returns
///
/// A `Config` that can be passed to `resolve`
pub fn source_from(pairs: &[(&str, &str)]) -> Config {
    pairs
        .iter()
        .try_fold(Config::builder(), |builder, (key, value)| {
            builder.set_override(*key, *value)
        })
        .and_then(|builder| builder.build())
        .expect("failed to build testing source")
}
