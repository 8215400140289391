/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use crate::labels::Labels;
use serde::{Deserialize, Serialize};

/// Snapshot of a container's configuration and state, shaped like the
/// engine's own inspect JSON so a dumped `spec.json` reads the same as
/// `docker inspect` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInspect {
    /// Substrate-assigned object id.
    #[serde(rename = "Id")]
    pub id: String,
    /// Container name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Raw state string at inspect time.
    #[serde(rename = "State")]
    pub state: String,
    /// The container's configuration.
    #[serde(rename = "Config")]
    pub config: ContainerConfig,
}

/// The configuration half of an inspect snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Whether the container was allocated a TTY. Decides how its log
    /// stream must be read: raw bytes for TTY containers, multiplexed
    /// stdout/stderr frames otherwise.
    #[serde(rename = "Tty")]
    pub tty: bool,
    /// Image the container was created from.
    #[serde(rename = "Image")]
    pub image: String,
    /// Environment variables, `KEY=value` form.
    #[serde(rename = "Env")]
    pub env: Vec<String>,
    /// Command the container runs.
    #[serde(rename = "Cmd")]
    pub cmd: Option<Vec<String>>,
    /// Labels on the container.
    #[serde(rename = "Labels")]
    pub labels: Labels,
}
