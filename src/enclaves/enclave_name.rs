/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use super::error::EnclavesError;
use fancy_regex::Regex;
use lazy_static::lazy_static;
use std::fmt::{Display, Formatter};

/// Pattern every enclave name must match.
pub const ALLOWED_ENCLAVE_NAME_PATTERN: &str = "^[-A-Za-z0-9.]{1,60}$";

lazy_static! {
    static ref ALLOWED_ENCLAVE_NAME_REGEX: Regex =
        Regex::new(ALLOWED_ENCLAVE_NAME_PATTERN)
            .expect("failed to parse 'ALLOWED_ENCLAVE_NAME_PATTERN'");
}

/// A validated, human-readable enclave name.
///
/// Names are unique across currently-existing enclaves (the manager enforces
/// this at creation) and are stored as a label on the enclave's network.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct EnclaveName(String);

impl EnclaveName {
    /// Validates `input` against [`ALLOWED_ENCLAVE_NAME_PATTERN`].
    pub fn new(input: &str) -> Result<Self, EnclavesError> {
        match ALLOWED_ENCLAVE_NAME_REGEX.is_match(input) {
            Ok(true) => Ok(Self(input.to_string())),
            Ok(false) | Err(_) => Err(EnclavesError::InvalidEnclaveName {
                name: input.to_string(),
                pattern: ALLOWED_ENCLAVE_NAME_PATTERN,
            }),
        }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EnclaveName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
