/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque, globally unique enclave identifier.
///
/// The UUID is the enclave's primary key and is immutable for the enclave's
/// whole life; it is stored as a label on the enclave's network. After a
/// successful destroy the value is free for reuse.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct EnclaveUuid(String);

impl EnclaveUuid {
    /// Wraps a caller-supplied identifier. The value is opaque to the
    /// backend; uniqueness is enforced against the substrate at creation.
    pub fn new(uuid: impl Into<String>) -> Self {
        Self(uuid.into())
    }

    /// Generates a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EnclaveUuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
impl From<&str> for EnclaveUuid {
    fn from(x: &str) -> Self {
        EnclaveUuid(x.to_string())
    }
}
