/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! The container substrate seam.
//!
//! Everything the backend knows about containers, networks, and volumes it
//! learns through [`SubstrateDriver`], a narrow capability trait implemented
//! per container engine (Docker today). The lifecycle verbs contain no
//! engine-specific conditionals; a future substrate (e.g. Kubernetes)
//! implements the same capability set.

pub use container::{Container, ContainerState, UnknownContainerStateError};
pub use driver::{LogStream, SubstrateDriver};
pub use error::{Result, SubstrateError};
pub use inspect::{ContainerConfig, ContainerInspect};
pub use logs::demultiplex_into;
pub use network::Network;
pub use parallel::{run_in_parallel, MAX_CONCURRENT_SUBSTRATE_OPS};
pub use volume::Volume;

mod container;
mod driver;
mod error;
mod inspect;
mod logs;
mod network;
mod parallel;
#[cfg(test)]
pub(crate) mod testing;
mod volume;
