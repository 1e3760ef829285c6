// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

use crate::config::*;
use config::{builder::DefaultState, Config, ConfigBuilder, File, FileFormat};
use glob::glob;
use log::*;
use std::{
    env,
    path::{Path, PathBuf},
};

pub static GLOBAL_CONFIG_OVERRIDE_ENV_VAR: &str = "CERTGEN_CONFIG";

pub static DEFAULT_SYS_CONFIG: &str = "/usr/etc/certgen/certgen.conf";
pub static DEFAULT_SYS_CONFIG_SNIPPETS_DIR: &str =
    "/usr/etc/certgen/certgen.conf.d";
pub static DEFAULT_CONFIG: &str = "/etc/certgen/certgen.conf";
pub static DEFAULT_CONFIG_SNIPPETS_DIR: &str = "/etc/certgen/certgen.conf.d";

// This enum represents the different kinds of sources for our configuration.
// By wrapping the PathBuf, we preserve the context of whether the user
// specified a single file or a whole directory.
#[derive(Clone, Debug)]
pub enum ConfigSource {
    File { path: PathBuf, required: bool },
    Directory(PathBuf),
}

/// Configuration files in TOML format, with the options as top-level keys:
///
/// ```toml
/// cilium-namespace = "cilium"
/// ca-generate = true
/// clustermesh-apiserver-server-cert-sans = ["*.mesh.cilium.io"]
/// ```
///
/// Files added later override the options set by the ones added before.
#[derive(Clone, Debug, Default)]
pub struct FileConfigBuilder {
    sources: Vec<ConfigSource>,
}

impl FileConfigBuilder {
    /// Creates a new, empty FileConfigBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single file as a configuration source, ignored if missing.
    pub fn file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.sources.push(ConfigSource::File {
            path: path.into(),
            required: false,
        });
        self
    }

    /// Adds a single file as a configuration source, failing to load if it
    /// is missing.
    pub fn required_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.sources.push(ConfigSource::File {
            path: path.into(),
            required: true,
        });
        self
    }

    /// Adds a directory as a configuration source.
    /// All files within this directory will be loaded in lexical order.
    pub fn directory(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.sources.push(ConfigSource::Directory(path.into()));
        self
    }

    /// Load the configuration files from the default locations
    pub fn load_default_locations(&mut self) -> &mut Self {
        self.file(DEFAULT_SYS_CONFIG)
            .directory(DEFAULT_SYS_CONFIG_SNIPPETS_DIR)
            .file(DEFAULT_CONFIG)
            .directory(DEFAULT_CONFIG_SNIPPETS_DIR)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Adds the file sources, in order, on top of `builder`
    ///
    /// If the 'CERTGEN_CONFIG' environment variable is set, only the file it
    /// points to is added.
    pub fn add_to(
        &self,
        mut builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, CertgenConfigError> {
        if let Ok(env_cfg) = env::var(GLOBAL_CONFIG_OVERRIDE_ENV_VAR) {
            if !env_cfg.is_empty() {
                let path = Path::new(&env_cfg);
                if path.exists() {
                    warn!(
                        "Configuration replaced by {}: {}",
                        GLOBAL_CONFIG_OVERRIDE_ENV_VAR,
                        path.display()
                    );
                    return Ok(builder.add_source(
                        File::new(&env_cfg, FileFormat::Toml).required(true),
                    ));
                } else {
                    warn!(
                        "Configuration file set in {} not found",
                        GLOBAL_CONFIG_OVERRIDE_ENV_VAR
                    );
                    return Err(CertgenConfigError::MissingEnvConfigFile {
                        file: path.display().to_string(),
                    });
                }
            }
        }

        for (index, source) in self.sources.iter().enumerate() {
            match source {
                ConfigSource::File { path, required } => {
                    debug!(
                        "Loading configuration from FILE (#{}): {}",
                        index,
                        path.display()
                    );
                    builder = builder.add_source(
                        File::new(
                            &path.display().to_string(),
                            FileFormat::Toml,
                        )
                        .required(*required),
                    );
                }
                ConfigSource::Directory(path) => {
                    debug!(
                        "Loading configuration from DIRECTORY (#{}): {}",
                        index,
                        path.display()
                    );

                    builder = builder.add_source(
                        glob(&path.join("*").display().to_string())
                            .map_err(CertgenConfigError::GlobPattern)?
                            .filter_map(|entry| entry.ok())
                            .filter(|entry| entry.is_file())
                            .map(|path| {
                                File::new(
                                    &path.display().to_string(),
                                    FileFormat::Toml,
                                )
                                .required(false)
                            })
                            .collect::<Vec<_>>(),
                    );
                }
            }
        }
        Ok(builder)
    }

    /// Loads the options set in the files only
    pub fn build(&self) -> Result<Config, CertgenConfigError> {
        let config = self.add_to(Config::builder())?.build()?;
        debug!("File configuration build process finished.");
        Ok(config)
    }
}
