/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use super::{EnclaveStatus, EnclaveUuid};
use std::collections::HashSet;

/// Selects enclaves for the batch verbs. An empty set matches everything on
/// that dimension; a populated set must contain the enclave's value.
/// Dimensions combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct EnclaveFilter {
    /// UUIDs to match; empty matches any UUID.
    pub uuids: HashSet<EnclaveUuid>,
    /// Statuses to match; empty matches any status.
    pub statuses: HashSet<EnclaveStatus>,
}

impl EnclaveFilter {
    /// Matches every enclave.
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches exactly one enclave by UUID.
    pub fn for_uuid(uuid: EnclaveUuid) -> Self {
        let mut uuids = HashSet::new();
        let _ = uuids.insert(uuid);
        Self { uuids, statuses: HashSet::new() }
    }

    pub(crate) fn matches_uuid(&self, uuid: &EnclaveUuid) -> bool {
        self.uuids.is_empty() || self.uuids.contains(uuid)
    }

    pub(crate) fn matches_status(&self, status: EnclaveStatus) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&status)
    }
}
