// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

//! Recognized configuration keys
//!
//! The set of keys is closed: every option the tool understands is declared
//! here, together with the type used to read it from a `ValueSource`.
//! Certificate options are grouped by slot, and each slot declares which of
//! the optional options (secret reuse, namespace override, SANs) it supports.

use serde::Serialize;
use std::fmt;

/// Enables debug messages
pub const DEBUG: &str = "debug";

/// Kubernetes namespace in which Cilium is installed, used as the secret
/// namespace of every slot that does not set its own
pub const CILIUM_NAMESPACE: &str = "cilium-namespace";

/// Path to the kubeconfig. If empty, the in-cluster configuration is used
pub const K8S_KUBECONFIG_PATH: &str = "k8s-kubeconfig-path";
/// Timeout for Kubernetes API requests
pub const K8S_REQUEST_TIMEOUT: &str = "k8s-request-timeout";

/// Path to the CA certificate PEM, used when the CA is not generated
pub const CA_CERT_FILE: &str = "ca-cert-file";
/// Path to the CA key PEM, used when the CA is not generated
pub const CA_KEY_FILE: &str = "ca-key-file";

/// The type a key is read as
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    String,
    Duration,
    StringList,
}

/// A recognized configuration key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub kind: FieldKind,
}

/// The certificates managed by the tool
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SlotId {
    Ca,
    HubbleServer,
    HubbleRelayServer,
    HubbleRelayClient,
    HubbleMetricsServer,
    ClustermeshApiserverServer,
    ClustermeshApiserverAdmin,
    ClustermeshApiserverClient,
    ClustermeshApiserverRemote,
}

/// Canonical keys of the options of one certificate slot
///
/// Options a slot does not support are `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotKeys {
    /// Generate (and store) a new certificate
    pub generate: &'static str,
    /// Load the certificate from the existing secret if found instead of
    /// overwriting it
    pub reuse_secret: Option<&'static str>,
    /// x509 certificate CN value
    pub common_name: &'static str,
    /// How long the generated certificate is valid
    pub validity_duration: &'static str,
    /// Kubernetes Secret the certificate is read from and/or written to
    pub secret_name: &'static str,
    /// Kubernetes Namespace in which the Secret is stored
    pub secret_namespace: Option<&'static str>,
    /// Additional SANs for the certificate
    pub sans: Option<&'static str>,
}

const CA_KEYS: SlotKeys = SlotKeys {
    generate: "ca-generate",
    reuse_secret: Some("ca-reuse-secret"),
    common_name: "ca-common-name",
    validity_duration: "ca-validity-duration",
    secret_name: "ca-secret-name",
    secret_namespace: Some("ca-secret-namespace"),
    sans: None,
};

const HUBBLE_SERVER_KEYS: SlotKeys = SlotKeys {
    generate: "hubble-server-cert-generate",
    reuse_secret: None,
    common_name: "hubble-server-cert-common-name",
    validity_duration: "hubble-server-cert-validity-duration",
    secret_name: "hubble-server-cert-secret-name",
    secret_namespace: Some("hubble-server-cert-secret-namespace"),
    sans: None,
};

const HUBBLE_RELAY_SERVER_KEYS: SlotKeys = SlotKeys {
    generate: "hubble-relay-server-cert-generate",
    reuse_secret: None,
    common_name: "hubble-relay-server-cert-common-name",
    validity_duration: "hubble-relay-server-cert-validity-duration",
    secret_name: "hubble-relay-server-cert-secret-name",
    secret_namespace: Some("hubble-relay-server-cert-secret-namespace"),
    sans: None,
};

const HUBBLE_RELAY_CLIENT_KEYS: SlotKeys = SlotKeys {
    generate: "hubble-relay-client-cert-generate",
    reuse_secret: None,
    common_name: "hubble-relay-client-cert-common-name",
    validity_duration: "hubble-relay-client-cert-validity-duration",
    secret_name: "hubble-relay-client-cert-secret-name",
    secret_namespace: Some("hubble-relay-client-cert-secret-namespace"),
    sans: None,
};

const HUBBLE_METRICS_SERVER_KEYS: SlotKeys = SlotKeys {
    generate: "hubble-metrics-server-cert-generate",
    reuse_secret: None,
    common_name: "hubble-metrics-server-cert-common-name",
    validity_duration: "hubble-metrics-server-cert-validity-duration",
    secret_name: "hubble-metrics-server-cert-secret-name",
    secret_namespace: Some("hubble-metrics-server-cert-secret-namespace"),
    sans: None,
};

const CLUSTERMESH_APISERVER_SERVER_KEYS: SlotKeys = SlotKeys {
    generate: "clustermesh-apiserver-server-cert-generate",
    reuse_secret: None,
    common_name: "clustermesh-apiserver-server-cert-common-name",
    validity_duration: "clustermesh-apiserver-server-cert-validity-duration",
    secret_name: "clustermesh-apiserver-server-cert-secret-name",
    secret_namespace: None,
    sans: Some("clustermesh-apiserver-server-cert-sans"),
};

const CLUSTERMESH_APISERVER_ADMIN_KEYS: SlotKeys = SlotKeys {
    generate: "clustermesh-apiserver-admin-cert-generate",
    reuse_secret: None,
    common_name: "clustermesh-apiserver-admin-cert-common-name",
    validity_duration: "clustermesh-apiserver-admin-cert-validity-duration",
    secret_name: "clustermesh-apiserver-admin-cert-secret-name",
    secret_namespace: None,
    sans: None,
};

const CLUSTERMESH_APISERVER_CLIENT_KEYS: SlotKeys = SlotKeys {
    generate: "clustermesh-apiserver-client-cert-generate",
    reuse_secret: None,
    common_name: "clustermesh-apiserver-client-cert-common-name",
    validity_duration: "clustermesh-apiserver-client-cert-validity-duration",
    secret_name: "clustermesh-apiserver-client-cert-secret-name",
    secret_namespace: None,
    sans: None,
};

const CLUSTERMESH_APISERVER_REMOTE_KEYS: SlotKeys = SlotKeys {
    generate: "clustermesh-apiserver-remote-cert-generate",
    reuse_secret: None,
    common_name: "clustermesh-apiserver-remote-cert-common-name",
    validity_duration: "clustermesh-apiserver-remote-cert-validity-duration",
    secret_name: "clustermesh-apiserver-remote-cert-secret-name",
    secret_namespace: None,
    sans: None,
};

impl SlotId {
    /// All slots, in declaration order
    pub const ALL: [SlotId; 9] = [
        SlotId::Ca,
        SlotId::HubbleServer,
        SlotId::HubbleRelayServer,
        SlotId::HubbleRelayClient,
        SlotId::HubbleMetricsServer,
        SlotId::ClustermeshApiserverServer,
        SlotId::ClustermeshApiserverAdmin,
        SlotId::ClustermeshApiserverClient,
        SlotId::ClustermeshApiserverRemote,
    ];

    pub fn keys(self) -> &'static SlotKeys {
        match self {
            SlotId::Ca => &CA_KEYS,
            SlotId::HubbleServer => &HUBBLE_SERVER_KEYS,
            SlotId::HubbleRelayServer => &HUBBLE_RELAY_SERVER_KEYS,
            SlotId::HubbleRelayClient => &HUBBLE_RELAY_CLIENT_KEYS,
            SlotId::HubbleMetricsServer => &HUBBLE_METRICS_SERVER_KEYS,
            SlotId::ClustermeshApiserverServer => {
                &CLUSTERMESH_APISERVER_SERVER_KEYS
            }
            SlotId::ClustermeshApiserverAdmin => {
                &CLUSTERMESH_APISERVER_ADMIN_KEYS
            }
            SlotId::ClustermeshApiserverClient => {
                &CLUSTERMESH_APISERVER_CLIENT_KEYS
            }
            SlotId::ClustermeshApiserverRemote => {
                &CLUSTERMESH_APISERVER_REMOTE_KEYS
            }
        }
    }

    /// Human readable name used in logs and error messages
    pub fn name(self) -> &'static str {
        match self {
            SlotId::Ca => "Cilium CA",
            SlotId::HubbleServer => "Hubble server",
            SlotId::HubbleRelayServer => "Hubble Relay server",
            SlotId::HubbleRelayClient => "Hubble Relay client",
            SlotId::HubbleMetricsServer => "Hubble metrics server",
            SlotId::ClustermeshApiserverServer => {
                "Clustermesh API server"
            }
            SlotId::ClustermeshApiserverAdmin => "Clustermesh API admin",
            SlotId::ClustermeshApiserverClient => "Clustermesh API client",
            SlotId::ClustermeshApiserverRemote => "Clustermesh API remote",
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SlotKeys {
    /// The fields of this slot, skipping the options it does not support
    pub fn fields(&self) -> impl Iterator<Item = Field> {
        [
            Some((self.generate, FieldKind::Bool)),
            self.reuse_secret.map(|k| (k, FieldKind::Bool)),
            Some((self.common_name, FieldKind::String)),
            Some((self.validity_duration, FieldKind::Duration)),
            Some((self.secret_name, FieldKind::String)),
            self.secret_namespace.map(|k| (k, FieldKind::String)),
            self.sans.map(|k| (k, FieldKind::StringList)),
        ]
        .into_iter()
        .flatten()
        .map(|(key, kind)| Field { key, kind })
    }
}

const GLOBAL_FIELDS: [Field; 6] = [
    Field {
        key: DEBUG,
        kind: FieldKind::Bool,
    },
    Field {
        key: CILIUM_NAMESPACE,
        kind: FieldKind::String,
    },
    Field {
        key: K8S_KUBECONFIG_PATH,
        kind: FieldKind::String,
    },
    Field {
        key: K8S_REQUEST_TIMEOUT,
        kind: FieldKind::Duration,
    },
    Field {
        key: CA_CERT_FILE,
        kind: FieldKind::String,
    },
    Field {
        key: CA_KEY_FILE,
        kind: FieldKind::String,
    },
];

/// Every recognized key: the global options followed by the options of each
/// slot in declaration order
pub fn fields() -> impl Iterator<Item = Field> {
    GLOBAL_FIELDS
        .into_iter()
        .chain(SlotId::ALL.into_iter().flat_map(|id| id.keys().fields()))
}

/// Looks up a recognized key
pub fn field(key: &str) -> Option<Field> {
    fields().find(|f| f.key == key)
}
