/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use super::{EnclaveStatus, EnclaveUuid};
use chrono::{DateTime, Utc};

// An enclave is immutable once observed: status and name are re-derived from
// the substrate on every read, never updated in place.
// NEVER MAKE THE FIELDS PUB (OF ANY KIND)
/// One isolated environment: a view assembled from the labels on the
/// enclave's network plus the observed state of its containers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Enclave {
    uuid: EnclaveUuid,
    name: String,
    status: EnclaveStatus,
    creation_time: Option<DateTime<Utc>>,
}

impl Enclave {
    pub(crate) fn new(
        uuid: EnclaveUuid,
        name: String,
        status: EnclaveStatus,
        creation_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self { uuid, name, status, creation_time }
    }

    /// The enclave's immutable primary key.
    pub fn uuid(&self) -> &EnclaveUuid {
        &self.uuid
    }

    /// The enclave's human-readable name. Empty for enclaves created by
    /// versions that predate the name label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Status derived from the enclave's containers at observation time.
    pub fn status(&self) -> EnclaveStatus {
        self.status
    }

    /// When the enclave was created. `None` for enclaves created by versions
    /// that predate the creation-time label.
    pub fn creation_time(&self) -> Option<&DateTime<Utc>> {
        self.creation_time.as_ref()
    }
}
