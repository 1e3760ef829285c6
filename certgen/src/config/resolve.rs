// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

//! Resolution of a key/value snapshot into a typed `Configuration`

use super::{schema::*, ValueSource};
use crate::duration_parser::format_duration;
use config::{Map, Value};
use log::*;
use serde::{Serialize, Serializer};
use std::{collections::BTreeMap, ops::Index, time::Duration};

fn serialize_duration<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*duration))
}

/// Parameters for reaching the Kubernetes API
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClusterApiConnection {
    /// Path to the kubeconfig. If empty, the in-cluster configuration is used
    pub kubeconfig_path: String,
    #[serde(serialize_with = "serialize_duration")]
    pub request_timeout: Duration,
}

/// Options not tied to any certificate slot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GlobalSettings {
    pub debug: bool,
    /// Namespace used by the slots that do not set their own
    pub default_namespace: String,
    pub cluster_api: ClusterApiConnection,
    /// CA certificate PEM, used when the CA is provided instead of generated
    pub ca_cert_file: String,
    /// CA key PEM, used when the CA is provided instead of generated
    pub ca_key_file: String,
}

/// The resolved options of one certificate
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CertificateSlot {
    pub generate: bool,
    /// Keep the certificate found in the existing secret instead of
    /// overwriting it. Only the CA supports this, it is `false` elsewhere
    pub reuse_secret: bool,
    pub common_name: String,
    /// Additional SANs. Empty for the slots that do not support them
    pub sans: Vec<String>,
    #[serde(serialize_with = "serialize_duration")]
    pub validity_duration: Duration,
    pub secret_name: String,
    pub secret_namespace: String,
}

/// The configuration of a certgen run
///
/// Built once from a `ValueSource` and read-only afterwards. Every slot in
/// `SlotId::ALL` is present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Configuration {
    #[serde(flatten)]
    pub global: GlobalSettings,
    slots: BTreeMap<SlotId, CertificateSlot>,
}

/// Whether the slot leaves its namespace option empty and so inherits the
/// default namespace, as opposed to setting it to the same value
fn inherits_default_namespace(
    source: &(impl ValueSource + ?Sized),
    key: &str,
) -> bool {
    source.get_string(key).is_empty()
}

fn resolve_slot(
    source: &(impl ValueSource + ?Sized),
    id: SlotId,
    default_namespace: &str,
) -> CertificateSlot {
    let keys = id.keys();

    let secret_namespace = match keys.secret_namespace {
        Some(key) => {
            if inherits_default_namespace(source, key) {
                debug!(
                    "{id} secret stored in the default namespace \
                     '{default_namespace}'"
                );
            }
            source.get_string_with_fallback(key, CILIUM_NAMESPACE)
        }
        None => default_namespace.to_string(),
    };

    CertificateSlot {
        generate: source.get_bool(keys.generate),
        reuse_secret: keys
            .reuse_secret
            .map(|key| source.get_bool(key))
            .unwrap_or_default(),
        common_name: source.get_string(keys.common_name),
        sans: keys
            .sans
            .map(|key| source.get_string_list(key))
            .unwrap_or_default(),
        validity_duration: source.get_duration(keys.validity_duration),
        secret_name: source.get_string(keys.secret_name),
        secret_namespace,
    }
}

/// Populates a `Configuration` from the options in `source`
///
/// Every option is read with the accessor matching its declared type, so an
/// absent option resolves to its zero value. The secret namespace of a slot
/// falls back to `cilium-namespace` when the slot option is empty (whether
/// absent or explicitly set to an empty string). Slots that cannot override
/// the namespace always use `cilium-namespace`.
pub fn resolve(source: &(impl ValueSource + ?Sized)) -> Configuration {
    let global = GlobalSettings {
        debug: source.get_bool(DEBUG),
        default_namespace: source.get_string(CILIUM_NAMESPACE),
        cluster_api: ClusterApiConnection {
            kubeconfig_path: source.get_string(K8S_KUBECONFIG_PATH),
            request_timeout: source.get_duration(K8S_REQUEST_TIMEOUT),
        },
        ca_cert_file: source.get_string(CA_CERT_FILE),
        ca_key_file: source.get_string(CA_KEY_FILE),
    };

    let slots = SlotId::ALL
        .into_iter()
        .map(|id| (id, resolve_slot(source, id, &global.default_namespace)))
        .collect();

    Configuration { global, slots }
}

impl Configuration {
    pub fn resolve(source: &(impl ValueSource + ?Sized)) -> Self {
        resolve(source)
    }

    /// Every slot is resolved, so the lookup cannot fail
    pub fn slot(&self, id: SlotId) -> &CertificateSlot {
        &self[id]
    }

    /// All slots, in declaration order
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &CertificateSlot)> {
        self.slots.iter().map(|(id, slot)| (*id, slot))
    }

    /// The slots for which a certificate has to be generated
    pub fn generation_requests(
        &self,
    ) -> impl Iterator<Item = (SlotId, &CertificateSlot)> {
        self.slots().filter(|(_, slot)| slot.generate)
    }

    /// Converts the configuration back into options
    ///
    /// Resolving the returned map gives back an equal configuration.
    pub fn to_source(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let mut set = |key: &str, value: Value| {
            _ = map.insert(key.to_string(), value);
        };

        let global = &self.global;
        set(DEBUG, global.debug.into());
        set(CILIUM_NAMESPACE, global.default_namespace.clone().into());
        set(
            K8S_KUBECONFIG_PATH,
            global.cluster_api.kubeconfig_path.clone().into(),
        );
        set(
            K8S_REQUEST_TIMEOUT,
            format_duration(global.cluster_api.request_timeout).into(),
        );
        set(CA_CERT_FILE, global.ca_cert_file.clone().into());
        set(CA_KEY_FILE, global.ca_key_file.clone().into());

        for (id, slot) in self.slots() {
            let keys = id.keys();
            set(keys.generate, slot.generate.into());
            if let Some(key) = keys.reuse_secret {
                set(key, slot.reuse_secret.into());
            }
            set(keys.common_name, slot.common_name.clone().into());
            set(
                keys.validity_duration,
                format_duration(slot.validity_duration).into(),
            );
            set(keys.secret_name, slot.secret_name.clone().into());
            if let Some(key) = keys.secret_namespace {
                set(key, slot.secret_namespace.clone().into());
            }
            if let Some(key) = keys.sans {
                set(key, slot.sans.clone().into());
            }
        }
        map
    }
}

// Every id in `SlotId::ALL` is inserted by `resolve`, the only constructor
impl Index<SlotId> for Configuration {
    type Output = CertificateSlot;

    fn index(&self, id: SlotId) -> &CertificateSlot {
        &self.slots[&id]
    }
}
