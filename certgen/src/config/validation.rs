// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

//! Checks on the certificates requested for generation
//!
//! Resolution never fails, so a configuration can request a certificate
//! without a name or a lifetime. These checks are meant to run right before
//! handing the slots over to the certificate generation, and reject the
//! requests that cannot produce a usable certificate or secret.

use super::{
    schema::CILIUM_NAMESPACE, CertificateSlot, Configuration,
    GenerationRequestError, SlotId,
};

/// Checks a single slot requested for generation
pub fn check_generation_request(
    id: SlotId,
    slot: &CertificateSlot,
) -> Result<(), GenerationRequestError> {
    let keys = id.keys();
    if slot.common_name.is_empty() {
        return Err(GenerationRequestError::EmptyCommonName {
            slot: id,
            key: keys.common_name,
        });
    }
    if slot.validity_duration.is_zero() {
        return Err(GenerationRequestError::ZeroValidity {
            slot: id,
            key: keys.validity_duration,
        });
    }
    if slot.secret_name.is_empty() {
        return Err(GenerationRequestError::EmptySecretName {
            slot: id,
            key: keys.secret_name,
        });
    }
    if slot.secret_namespace.is_empty() {
        return Err(GenerationRequestError::EmptySecretNamespace {
            slot: id,
            key: keys.secret_namespace.unwrap_or(CILIUM_NAMESPACE),
        });
    }
    Ok(())
}

/// Checks every slot requested for generation, returning the first error
pub fn check_generation_requests(
    config: &Configuration,
) -> Result<(), GenerationRequestError> {
    config
        .generation_requests()
        .try_for_each(|(id, slot)| check_generation_request(id, slot))
}
