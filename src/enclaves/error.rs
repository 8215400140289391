/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use super::EnclaveUuid;
use crate::substrate::{SubstrateError, UnknownContainerStateError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnclavesError>;

/// Errors from the lifecycle verbs.
///
/// Structural errors (anything that makes the whole call unsound) abort a
/// verb with nothing mutated; per-object substrate failures inside a batch
/// never surface here directly — they are aggregated into the verb's errored
/// map instead.
#[derive(Error, Debug)]
pub enum EnclavesError {
    #[error(
        "cannot create enclave '{enclave_uuid}' because an enclave with that UUID already exists"
    )]
    EnclaveExists { enclave_uuid: EnclaveUuid },
    #[error("enclave name '{name}' does not match the allowed pattern '{pattern}'")]
    InvalidEnclaveName { name: String, pattern: &'static str },
    #[error("enclave name '{name}' is already in use")]
    EnclaveNameTaken { name: String },
    #[error(
        "network '{network_id}' carries no '{label_key}' label; this is a bug"
    )]
    NetworkMissingEnclaveUuid { network_id: String, label_key: &'static str },
    #[error("container '{container_id}' is in a state outside the mapping table; this is a bug")]
    UnknownContainerState {
        container_id: String,
        source: UnknownContainerStateError,
    },
    #[error(
        "creation time '{value}' on network '{network_id}' is not RFC3339"
    )]
    UnparseableCreationTime {
        network_id: String,
        value: String,
        source: chrono::ParseError,
    },
    #[error("could not create a network for enclave '{enclave_uuid}'")]
    FailedToCreateEnclaveNetwork {
        enclave_uuid: EnclaveUuid,
        source: SubstrateError,
    },
    #[error("could not create the data volume for enclave '{enclave_uuid}'")]
    FailedToCreateEnclaveDataVolume {
        enclave_uuid: EnclaveUuid,
        source: SubstrateError,
    },
    #[error(
        "refusing to destroy enclave '{enclave_uuid}': {kind} state is registered for it, \
         which belongs inside the per-enclave API container"
    )]
    TenantStateRegistered { enclave_uuid: EnclaveUuid, kind: &'static str },
    #[error(
        "object '{object_id}' errored in an enclave that was not part of the request"
    )]
    UnrequestedObject { object_id: String },
    #[error("cannot dump to '{}': output directory already exists", .path.display())]
    OutputDirExists { path: PathBuf },
    #[error(
        "one or more errors occurred dumping enclave '{enclave_uuid}':\n{aggregate}"
    )]
    DumpFailed { enclave_uuid: EnclaveUuid, aggregate: String },
    #[error(transparent)]
    Substrate(#[from] SubstrateError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
