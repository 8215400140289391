/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SubstrateError>;

/// Errors crossing the substrate seam.
///
/// Driver implementations report whatever their engine client surfaces,
/// wrapped as [`SubstrateError::Driver`]; the lifecycle verbs treat every
/// variant as transient and aggregate them per enclave rather than aborting
/// a batch.
#[derive(Error, Debug)]
pub enum SubstrateError {
    #[error(transparent)]
    Driver(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("container log stream framing is corrupt: {reason}")]
    CorruptLogStream { reason: String },
}
