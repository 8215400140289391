/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use crate::labels::Labels;

/// A named volume as reported by the substrate. Volumes have no separate
/// object id; the name is the handle removal operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Volume name, unique on the substrate.
    pub name: String,
    /// Labels on the volume.
    pub labels: Labels,
}
