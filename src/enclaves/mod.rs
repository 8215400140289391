/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! Enclave identity, status, and the lifecycle verbs.
//!
//! The enclave manager holds no enclave catalog: the substrate's labels are
//! the source of truth, resolved on demand by the matcher. The manager owns
//! the ordering and partial-failure discipline of the lifecycle verbs.

pub use enclave::Enclave;
pub use enclave_name::{EnclaveName, ALLOWED_ENCLAVE_NAME_PATTERN};
pub use enclave_uuid::EnclaveUuid;
pub use error::{EnclavesError, Result};
pub use filter::EnclaveFilter;
pub use manager::{EnclaveManager, ErroredEnclaves};
pub use registrations::{FreeIpProvider, ServiceRegistration};
pub use status::EnclaveStatus;

mod dump;
mod enclave;
mod enclave_name;
mod enclave_uuid;
mod error;
mod filter;
mod manager;
mod matcher;
mod name_generator;
mod registrations;
mod rollback;
mod status;
