// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

use certgen::config::{
    schema::{self, Field, FieldKind},
    validation::check_generation_requests,
    CertgenConfigError, ConfigLoader, EnvConfig, FileConfigBuilder,
    GenerationRequestError, OverrideConfig,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::*;
use std::{error::Error as _, path::PathBuf, process::ExitCode};
use thiserror::Error;

#[derive(Error, Debug)]
enum CertgenError {
    #[error("Configuration error")]
    Config(#[from] CertgenConfigError),
    #[error("Invalid certificate request")]
    GenerationRequest(#[from] GenerationRequestError),
    #[error("Serialization error")]
    Serde(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, CertgenError>;

fn help(field: &Field) -> &'static str {
    match field.kind {
        FieldKind::Bool => "Boolean option, a bare flag means true",
        FieldKind::String => "String option",
        FieldKind::Duration => "Duration option, e.g. 26280h or 60s",
        FieldKind::StringList => "List option, may be repeated",
    }
}

fn option_arg(field: Field) -> Arg {
    let arg = Arg::new(field.key)
        .long(field.key)
        .help(help(&field))
        .help_heading("Configuration options");
    match field.kind {
        FieldKind::Bool => arg
            .value_name("BOOL")
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
        FieldKind::String => arg.value_name("STRING"),
        FieldKind::Duration => arg.value_name("DURATION"),
        FieldKind::StringList => {
            arg.value_name("LIST").action(ArgAction::Append)
        }
    }
}

fn cli() -> Command {
    Command::new("certgen")
        .about("Resolves the Cilium certificate generator configuration")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file to load, may be repeated"),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory of configuration files, may be repeated"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .args(schema::fields().map(option_arg))
}

/// Collects the options given on the command line
fn overrides_from(matches: &ArgMatches) -> Result<OverrideConfig> {
    let mut overrides = OverrideConfig::new();
    for field in schema::fields() {
        let Some(values) = matches.get_many::<String>(field.key) else {
            continue;
        };
        let values: Vec<&str> = values.map(String::as_str).collect();
        match field.kind {
            // Each occurrence can itself be a list, e.g. --sans a,b --sans c
            FieldKind::StringList => {
                _ = overrides.parse(field.key, &values.join(","))?;
            }
            _ => {
                if let Some(value) = values.last() {
                    _ = overrides.parse(field.key, value)?;
                }
            }
        }
    }
    Ok(overrides)
}

fn files_from(matches: &ArgMatches) -> FileConfigBuilder {
    let mut files = FileConfigBuilder::new();
    if let Some(paths) = matches.get_many::<PathBuf>("config") {
        for path in paths {
            _ = files.required_file(path);
        }
    }
    if let Some(dirs) = matches.get_many::<PathBuf>("config-dir") {
        for dir in dirs {
            _ = files.directory(dir);
        }
    }
    if files.is_empty() {
        _ = files.load_default_locations();
    }
    files
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // The logger lets everything through, the level is enforced by the
    // global maximum so that the resolved debug option can raise it later
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Trace)
        .target(pretty_env_logger::env_logger::Target::Stderr)
        .init();
    log::set_max_level(log_level);
}

fn run(matches: &ArgMatches) -> Result<()> {
    let loader = ConfigLoader::new()
        .files(files_from(matches))
        .env(EnvConfig::new())
        .overrides(overrides_from(matches)?);

    let config = loader.resolve()?;
    if config.global.debug {
        log::set_max_level(LevelFilter::Debug.max(log::max_level()));
        debug!("Debug messages enabled by configuration");
    }

    for (id, slot) in config.generation_requests() {
        info!(
            "{id} certificate requested: CN '{}', secret {}/{}",
            slot.common_name, slot.secret_namespace, slot.secret_name
        );
    }
    check_generation_requests(&config)?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut message = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                message = format!("{message}: {cause}");
                source = cause.source();
            }
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certgen::config::{CertificateSlot, Configuration, SlotId};

    // Resolves only what was given on the command line
    fn snapshot(args: &[&str]) -> Configuration {
        let matches = cli()
            .try_get_matches_from(
                std::iter::once("certgen").chain(args.iter().copied()),
            )
            .expect("failed to parse arguments");
        ConfigLoader::new()
            .without_defaults()
            .overrides(
                overrides_from(&matches).expect("failed to get overrides"),
            )
            .resolve()
            .expect("failed to resolve")
    }

    #[test]
    fn test_cli_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_flags() {
        let config = snapshot(&[
            "--ca-generate",
            "--ca-reuse-secret=false",
            "--ca-common-name",
            "Test CA",
            "--cilium-namespace",
            "cilium",
            "--k8s-request-timeout",
            "30s",
            "--clustermesh-apiserver-server-cert-sans",
            "a.io,b.io",
            "--clustermesh-apiserver-server-cert-sans",
            "c.io",
        ]);

        let ca = config.slot(SlotId::Ca);
        assert!(ca.generate);
        assert!(!ca.reuse_secret);
        assert_eq!(ca.common_name, "Test CA");
        assert_eq!(ca.secret_namespace, "cilium");
        assert_eq!(
            config.global.cluster_api.request_timeout.as_secs(),
            30
        );
        assert_eq!(
            config.slot(SlotId::ClustermeshApiserverServer).sans,
            ["a.io", "b.io", "c.io"]
        );
    }

    #[test]
    fn test_no_flags() {
        let matches = cli()
            .try_get_matches_from(["certgen"])
            .expect("failed to parse arguments");
        let overrides =
            overrides_from(&matches).expect("failed to get overrides");
        assert!(overrides.is_empty());
        assert!(!files_from(&matches).is_empty());

        let config = snapshot(&[]);
        assert!(!config.global.debug);
        assert_eq!(config.generation_requests().count(), 0);
        for (_, slot) in config.slots() {
            assert_eq!(slot, &CertificateSlot::default());
        }
    }

    #[test]
    fn test_explicit_files_replace_default_locations() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("certgen.conf");
        std::fs::write(&path, "ca-common-name = \"From file\"\n")
            .expect("failed to write config file");

        let matches = cli()
            .try_get_matches_from([
                "certgen",
                "--config",
                path.to_str().expect("non UTF-8 tempdir"),
            ])
            .expect("failed to parse arguments");
        let config = ConfigLoader::new()
            .without_defaults()
            .files(files_from(&matches))
            .resolve()
            .expect("failed to resolve");
        assert_eq!(
            config.slot(SlotId::Ca).common_name,
            "From file"
        );
    }

    #[test]
    fn test_invalid_flag_value() {
        let matches = cli()
            .try_get_matches_from(["certgen", "--ca-validity-duration", "3y"])
            .expect("failed to parse arguments");
        assert!(matches!(
            overrides_from(&matches),
            Err(CertgenError::Config(
                CertgenConfigError::InvalidOverride { .. }
            ))
        ));
    }

    #[test]
    fn test_unknown_flag() {
        assert!(cli()
            .try_get_matches_from(["certgen", "--ca-generat"])
            .is_err());
    }
}
