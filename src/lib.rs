/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! Enclave lifecycle backend for isolated, reproducible multi-container test
//! environments.
//!
//! An *enclave* is a named sandbox owning a private container network, a
//! shared data volume, and an arbitrary number of service containers. This
//! crate translates the high-level lifecycle verbs (create / list / stop /
//! dump / destroy) into ordered, partial-failure-tolerant operations over
//! those substrate objects, in parallel across many enclaves.
//!
//! The container substrate (Docker today) is abstracted behind the
//! [`substrate::SubstrateDriver`] capability trait; the backend itself holds
//! no catalog of enclaves. All state lives as labels on substrate objects,
//! which keeps the engine restart-safe.

// Lint groups: https://doc.rust-lang.org/rustc/lints/groups.html
#![warn(future_incompatible, nonstandard_style, unused)]
#![warn(
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    unconditional_recursion,
    unused_comparisons,
    while_true
)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_results
)]
#![warn(clippy::unwrap_used)]

pub mod enclaves;
pub mod labels;
pub mod substrate;
