/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use super::error::{EnclavesError, Result};
use crate::substrate::{Container, ContainerState};
use std::fmt::{Display, Formatter};

/// Derived enclave status. Never stored anywhere: always recomputed from the
/// enclave's current container set.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum EnclaveStatus {
    /// The enclave's network and volume exist but it has no containers.
    Empty,
    /// The enclave has containers and none of them is running.
    Stopped,
    /// At least one of the enclave's containers is running.
    Running,
}

impl Display for EnclaveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EnclaveStatus::Empty => "empty",
            EnclaveStatus::Stopped => "stopped",
            EnclaveStatus::Running => "running",
        };
        write!(f, "{s}")
    }
}

/// Classifies an enclave from its container set.
///
/// Pure: the same containers always produce the same status. A container
/// state string outside the [`ContainerState`] mapping table is surfaced as
/// an error so the table stays exhaustive.
pub(crate) fn classify(containers: &[Container]) -> Result<EnclaveStatus> {
    if containers.is_empty() {
        return Ok(EnclaveStatus::Empty);
    }

    for container in containers {
        let state: ContainerState =
            container.state.parse().map_err(|source| {
                EnclavesError::UnknownContainerState {
                    container_id: container.id.clone(),
                    source,
                }
            })?;
        if state.is_running() {
            return Ok(EnclaveStatus::Running);
        }
    }

    Ok(EnclaveStatus::Stopped)
}
