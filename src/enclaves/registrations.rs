/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! Tenant-local per-enclave state.
//!
//! Both structures exist to serve the *in-enclave* API container: it tracks
//! the services it has registered and the IPs it may still hand out. The
//! engine-side manager carries the maps only so `Destroy` can detect the
//! misuse of being called from inside an enclave — a matched UUID with
//! tenant state registered fails the whole batch.

use super::EnclaveUuid;

/// Hands out unused IPs inside one enclave's network.
#[derive(Debug, Clone)]
pub struct FreeIpProvider {
    enclave_uuid: EnclaveUuid,
}

impl FreeIpProvider {
    /// Creates a provider scoped to one enclave.
    pub fn new(enclave_uuid: EnclaveUuid) -> Self {
        Self { enclave_uuid }
    }

    /// The enclave this provider allocates for.
    pub fn enclave_uuid(&self) -> &EnclaveUuid {
        &self.enclave_uuid
    }
}

/// One service registered inside an enclave.
#[derive(Debug, Clone)]
pub struct ServiceRegistration {
    enclave_uuid: EnclaveUuid,
    service_name: String,
}

impl ServiceRegistration {
    /// Records a service by name inside an enclave.
    pub fn new(
        enclave_uuid: EnclaveUuid,
        service_name: impl Into<String>,
    ) -> Self {
        Self { enclave_uuid, service_name: service_name.into() }
    }

    /// The enclave the service lives in.
    pub fn enclave_uuid(&self) -> &EnclaveUuid {
        &self.enclave_uuid
    }

    /// The service's name, unique within its enclave.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
