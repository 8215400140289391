/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use crate::labels::Labels;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// A container as reported by the substrate.
///
/// The `state` field is kept as the engine's wire string; interpreting it is
/// the job of [`ContainerState::from_str`], so that a state string this crate
/// has never heard of surfaces as an error instead of being silently coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Substrate-assigned object id.
    pub id: String,
    /// Container name, unique on the substrate.
    pub name: String,
    /// Raw state string as reported by the engine (e.g. `"running"`).
    pub state: String,
    /// Labels on the container.
    pub labels: Labels,
}

/// The exhaustive set of container states the substrate may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
}

impl ContainerState {
    /// Whether a container in this state counts as running for enclave
    /// status purposes. Restarting containers count: the engine is about to
    /// run them again.
    pub fn is_running(&self) -> bool {
        match self {
            ContainerState::Running | ContainerState::Restarting => true,
            ContainerState::Created
            | ContainerState::Paused
            | ContainerState::Removing
            | ContainerState::Exited
            | ContainerState::Dead => false,
        }
    }
}

impl Display for ContainerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Removing => "removing",
            ContainerState::Exited => "exited",
            ContainerState::Dead => "dead",
        };
        write!(f, "{s}")
    }
}

/// Raised when the substrate reports a container state string that is not in
/// the [`ContainerState`] mapping table.
#[derive(Error, Debug)]
#[error("unknown container state '{state}'")]
pub struct UnknownContainerStateError {
    /// The unrecognized wire string.
    pub state: String,
}

impl FromStr for ContainerState {
    type Err = UnknownContainerStateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "created" => Ok(ContainerState::Created),
            "running" => Ok(ContainerState::Running),
            "paused" => Ok(ContainerState::Paused),
            "restarting" => Ok(ContainerState::Restarting),
            "removing" => Ok(ContainerState::Removing),
            "exited" => Ok(ContainerState::Exited),
            "dead" => Ok(ContainerState::Dead),
            other => {
                Err(UnknownContainerStateError { state: other.to_string() })
            }
        }
    }
}
