use certgen::config::{
    key_to_env_var, CertgenConfigError, ConfigLoader, EnvConfig,
    FileConfigBuilder, SlotId, GLOBAL_CONFIG_OVERRIDE_ENV_VAR,
};

use std::{
    env,
    fs::File,
    io::Write,
    sync::{Arc, Mutex, OnceLock},
};
use tempfile::tempdir;

// This mutex is necessary to avoid race condition between tests when
// setting/unsetting environment variables
static TEST_MUTEX: OnceLock<Arc<Mutex<()>>> = OnceLock::new();

#[test]
fn test_env_var_override() {
    let _mutex = TEST_MUTEX.get_or_init(|| Arc::new(Mutex::new(()))).lock();
    let dir = tempdir().unwrap(); //#[allow_ci]
    let override_file_path = dir.path().join("override.conf");
    let mut override_file = File::create(&override_file_path).unwrap(); //#[allow_ci]
    writeln!(override_file, "cilium-namespace = \"override\"").unwrap(); //#[allow_ci]

    // Files added to the builder are ignored when the override is set
    let ignored_file_path = dir.path().join("ignored.conf");
    let mut ignored_file = File::create(&ignored_file_path).unwrap(); //#[allow_ci]
    writeln!(ignored_file, "ca-generate = true").unwrap(); //#[allow_ci]

    // Set the environment variable for this test
    env::set_var(
        GLOBAL_CONFIG_OVERRIDE_ENV_VAR,
        override_file_path.to_str().unwrap(), //#[allow_ci]
    );

    let mut files = FileConfigBuilder::new();
    _ = files.file(&ignored_file_path);
    let result = ConfigLoader::new().files(files).resolve();

    // Unset the environment variable to avoid affecting other tests
    env::remove_var(GLOBAL_CONFIG_OVERRIDE_ENV_VAR);

    let config = result.unwrap(); //#[allow_ci]
    assert_eq!(config.global.default_namespace, "override");
    assert!(!config.slot(SlotId::Ca).generate);
}

#[test]
fn test_env_var_override_file_not_found() {
    let _mutex = TEST_MUTEX.get_or_init(|| Arc::new(Mutex::new(()))).lock();
    // Set the environment variable to a path that doesn't exist
    env::set_var(GLOBAL_CONFIG_OVERRIDE_ENV_VAR, "non_existent_file.conf");

    let result = FileConfigBuilder::new().build();

    // Unset the environment variable
    env::remove_var(GLOBAL_CONFIG_OVERRIDE_ENV_VAR);

    // Check that the correct error is returned
    assert!(matches!(
        result,
        Err(CertgenConfigError::MissingEnvConfigFile { .. })
    ));
}

#[test]
fn test_process_environment() {
    let _mutex = TEST_MUTEX.get_or_init(|| Arc::new(Mutex::new(()))).lock();
    let generate = key_to_env_var("hubble-relay-client-cert-generate");
    let namespace =
        key_to_env_var("hubble-relay-client-cert-secret-namespace");
    env::set_var(&generate, "true");
    env::set_var(&namespace, "hubble-relay");

    let env_config = EnvConfig::new();

    env::remove_var(&generate);
    env::remove_var(&namespace);

    let config = ConfigLoader::new()
        .env(env_config)
        .resolve()
        .unwrap(); //#[allow_ci]
    let relay_client = config.slot(SlotId::HubbleRelayClient);
    assert!(relay_client.generate);
    assert_eq!(relay_client.secret_namespace, "hubble-relay");
    assert_eq!(relay_client.common_name, "*.hubble-relay.cilium.io");
    assert_eq!(relay_client.secret_name, "hubble-relay-client-certs");
}
