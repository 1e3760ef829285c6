// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

use config::{ConfigError, Map, Source, Value};

pub static DEFAULT_CILIUM_NAMESPACE: &str = "kube-system";
pub static DEFAULT_K8S_REQUEST_TIMEOUT: &str = "60s";
// 3 years
pub static DEFAULT_VALIDITY_DURATION: &str = "26280h";

pub static DEFAULT_CA_COMMON_NAME: &str = "Cilium CA";
pub static DEFAULT_CA_SECRET_NAME: &str = "cilium-ca";

pub static DEFAULT_HUBBLE_SERVER_CERT_COMMON_NAME: &str =
    "*.default.hubble-grpc.cilium.io";
pub static DEFAULT_HUBBLE_SERVER_CERT_SECRET_NAME: &str =
    "hubble-server-certs";
pub static DEFAULT_HUBBLE_RELAY_SERVER_CERT_COMMON_NAME: &str =
    "*.hubble-relay.cilium.io";
pub static DEFAULT_HUBBLE_RELAY_SERVER_CERT_SECRET_NAME: &str =
    "hubble-relay-server-certs";
pub static DEFAULT_HUBBLE_RELAY_CLIENT_CERT_COMMON_NAME: &str =
    "*.hubble-relay.cilium.io";
pub static DEFAULT_HUBBLE_RELAY_CLIENT_CERT_SECRET_NAME: &str =
    "hubble-relay-client-certs";
pub static DEFAULT_HUBBLE_METRICS_SERVER_CERT_COMMON_NAME: &str =
    "*.hubble-metrics.cilium.io";
pub static DEFAULT_HUBBLE_METRICS_SERVER_CERT_SECRET_NAME: &str =
    "hubble-metrics-server-certs";

pub static DEFAULT_CLUSTERMESH_APISERVER_SERVER_CERT_COMMON_NAME: &str =
    "clustermesh-apiserver.cilium.io";
pub static DEFAULT_CLUSTERMESH_APISERVER_SERVER_CERT_SECRET_NAME: &str =
    "clustermesh-apiserver-server-cert";
pub static DEFAULT_CLUSTERMESH_APISERVER_ADMIN_CERT_COMMON_NAME: &str = "root";
pub static DEFAULT_CLUSTERMESH_APISERVER_ADMIN_CERT_SECRET_NAME: &str =
    "clustermesh-apiserver-admin-cert";
pub static DEFAULT_CLUSTERMESH_APISERVER_CLIENT_CERT_COMMON_NAME: &str =
    "externalworkload";
pub static DEFAULT_CLUSTERMESH_APISERVER_CLIENT_CERT_SECRET_NAME: &str =
    "clustermesh-apiserver-client-cert";
pub static DEFAULT_CLUSTERMESH_APISERVER_REMOTE_CERT_COMMON_NAME: &str =
    "remote";
pub static DEFAULT_CLUSTERMESH_APISERVER_REMOTE_CERT_SECRET_NAME: &str =
    "clustermesh-apiserver-remote-cert";

// Options not listed here default to their zero value
static DEFAULTS: &[(&str, &str)] = &[
    ("cilium-namespace", DEFAULT_CILIUM_NAMESPACE),
    ("k8s-request-timeout", DEFAULT_K8S_REQUEST_TIMEOUT),
    ("ca-common-name", DEFAULT_CA_COMMON_NAME),
    ("ca-validity-duration", DEFAULT_VALIDITY_DURATION),
    ("ca-secret-name", DEFAULT_CA_SECRET_NAME),
    (
        "hubble-server-cert-common-name",
        DEFAULT_HUBBLE_SERVER_CERT_COMMON_NAME,
    ),
    (
        "hubble-server-cert-validity-duration",
        DEFAULT_VALIDITY_DURATION,
    ),
    (
        "hubble-server-cert-secret-name",
        DEFAULT_HUBBLE_SERVER_CERT_SECRET_NAME,
    ),
    (
        "hubble-relay-server-cert-common-name",
        DEFAULT_HUBBLE_RELAY_SERVER_CERT_COMMON_NAME,
    ),
    (
        "hubble-relay-server-cert-validity-duration",
        DEFAULT_VALIDITY_DURATION,
    ),
    (
        "hubble-relay-server-cert-secret-name",
        DEFAULT_HUBBLE_RELAY_SERVER_CERT_SECRET_NAME,
    ),
    (
        "hubble-relay-client-cert-common-name",
        DEFAULT_HUBBLE_RELAY_CLIENT_CERT_COMMON_NAME,
    ),
    (
        "hubble-relay-client-cert-validity-duration",
        DEFAULT_VALIDITY_DURATION,
    ),
    (
        "hubble-relay-client-cert-secret-name",
        DEFAULT_HUBBLE_RELAY_CLIENT_CERT_SECRET_NAME,
    ),
    (
        "hubble-metrics-server-cert-common-name",
        DEFAULT_HUBBLE_METRICS_SERVER_CERT_COMMON_NAME,
    ),
    (
        "hubble-metrics-server-cert-validity-duration",
        DEFAULT_VALIDITY_DURATION,
    ),
    (
        "hubble-metrics-server-cert-secret-name",
        DEFAULT_HUBBLE_METRICS_SERVER_CERT_SECRET_NAME,
    ),
    (
        "clustermesh-apiserver-server-cert-common-name",
        DEFAULT_CLUSTERMESH_APISERVER_SERVER_CERT_COMMON_NAME,
    ),
    (
        "clustermesh-apiserver-server-cert-validity-duration",
        DEFAULT_VALIDITY_DURATION,
    ),
    (
        "clustermesh-apiserver-server-cert-secret-name",
        DEFAULT_CLUSTERMESH_APISERVER_SERVER_CERT_SECRET_NAME,
    ),
    (
        "clustermesh-apiserver-admin-cert-common-name",
        DEFAULT_CLUSTERMESH_APISERVER_ADMIN_CERT_COMMON_NAME,
    ),
    (
        "clustermesh-apiserver-admin-cert-validity-duration",
        DEFAULT_VALIDITY_DURATION,
    ),
    (
        "clustermesh-apiserver-admin-cert-secret-name",
        DEFAULT_CLUSTERMESH_APISERVER_ADMIN_CERT_SECRET_NAME,
    ),
    (
        "clustermesh-apiserver-client-cert-common-name",
        DEFAULT_CLUSTERMESH_APISERVER_CLIENT_CERT_COMMON_NAME,
    ),
    (
        "clustermesh-apiserver-client-cert-validity-duration",
        DEFAULT_VALIDITY_DURATION,
    ),
    (
        "clustermesh-apiserver-client-cert-secret-name",
        DEFAULT_CLUSTERMESH_APISERVER_CLIENT_CERT_SECRET_NAME,
    ),
    (
        "clustermesh-apiserver-remote-cert-common-name",
        DEFAULT_CLUSTERMESH_APISERVER_REMOTE_CERT_COMMON_NAME,
    ),
    (
        "clustermesh-apiserver-remote-cert-validity-duration",
        DEFAULT_VALIDITY_DURATION,
    ),
    (
        "clustermesh-apiserver-remote-cert-secret-name",
        DEFAULT_CLUSTERMESH_APISERVER_REMOTE_CERT_SECRET_NAME,
    ),
];

/// The built-in defaults, used as the lowest priority source
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultConfig;

impl Source for DefaultConfig {
    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(DEFAULTS
            .iter()
            .map(|(key, value)| (key.to_string(), Value::from(*value)))
            .collect())
    }

    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, schema, SlotId};
    use config::Config;
    use std::time::Duration;

    #[test]
    fn test_defaults_are_recognized_options() {
        for (key, _) in DEFAULTS {
            assert!(schema::field(key).is_some(), "unknown default {key}");
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let source = Config::builder()
            .add_source(DefaultConfig)
            .build()
            .expect("failed to build config");
        let config = resolve(&source);

        assert_eq!(config.global.default_namespace, DEFAULT_CILIUM_NAMESPACE);
        assert_eq!(
            config.global.cluster_api.request_timeout,
            Duration::from_secs(60)
        );
        for (id, slot) in config.slots() {
            assert!(!slot.generate, "{id} generated by default");
            assert!(!slot.common_name.is_empty());
            assert!(!slot.secret_name.is_empty());
            assert_eq!(slot.secret_namespace, DEFAULT_CILIUM_NAMESPACE);
            assert_eq!(
                slot.validity_duration,
                Duration::from_secs(3 * 365 * 24 * 3600)
            );
        }
        assert_eq!(
            config.slot(SlotId::Ca).common_name,
            DEFAULT_CA_COMMON_NAME
        );
    }
}
