/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use crate::labels::Labels;

/// A private network as reported by the substrate. Each live enclave owns
/// exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    /// Substrate-assigned object id.
    pub id: String,
    /// Network name.
    pub name: String,
    /// Labels on the network. For enclave networks these carry the enclave
    /// UUID, name, and creation time.
    pub labels: Labels,
}
