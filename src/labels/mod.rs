/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! The canonical label schema tagging every substrate object the backend
//! owns.
//!
//! Labels are the only persistent state this crate relies on: the enclave's
//! UUID and name live as labels on its network, the creation time is an
//! RFC3339 string label, and the data volume is distinguished from other
//! enclave volumes by its `volume-type` label. The key strings below are
//! wire format and must never change.

use crate::enclaves::EnclaveUuid;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Label key holding the application id that marks an object as ours.
pub const APP_ID_LABEL_KEY: &str = "app-id";
/// Label key holding the owning enclave's UUID.
pub const ENCLAVE_UUID_LABEL_KEY: &str = "enclave-uuid";
/// Label key holding the enclave's human-readable name.
pub const ENCLAVE_NAME_LABEL_KEY: &str = "enclave-name";
/// Label key holding the enclave's creation time as an RFC3339 string.
pub const CREATION_TIME_LABEL_KEY: &str = "creation-time";
/// Label key distinguishing volume flavors within an enclave.
pub const VOLUME_TYPE_LABEL_KEY: &str = "volume-type";
/// Label key carrying the partitioning flag through to the in-enclave API
/// container. The lifecycle backend records it but never acts on it.
pub const IS_PARTITIONING_ENABLED_LABEL_KEY: &str = "is-partitioning-enabled";

/// Value of [`APP_ID_LABEL_KEY`] on every object this backend creates.
pub const APP_ID_LABEL_VALUE: &str = "kurtosis";
/// Value of [`VOLUME_TYPE_LABEL_KEY`] marking the enclave's data volume.
pub const ENCLAVE_DATA_VOLUME_TYPE_LABEL_VALUE: &str = "enclave-data";

/// A set of substrate object labels.
pub type Labels = HashMap<String, String>;

/// Labels matching every object the backend owns, across all enclaves.
///
/// The substrate cannot do disjunctive label queries, so enumeration always
/// starts from this app-wide set and narrows in-process.
pub fn app_object_search_labels() -> Labels {
    let mut labels = Labels::new();
    let _ = labels
        .insert(APP_ID_LABEL_KEY.to_string(), APP_ID_LABEL_VALUE.to_string());
    labels
}

/// Labels matching every object belonging to one enclave.
pub fn enclave_object_search_labels(enclave_uuid: &EnclaveUuid) -> Labels {
    let mut labels = app_object_search_labels();
    let _ = labels.insert(
        ENCLAVE_UUID_LABEL_KEY.to_string(),
        enclave_uuid.to_string(),
    );
    labels
}

/// Labels matching exactly one enclave's data volume.
pub fn enclave_data_volume_search_labels(
    enclave_uuid: &EnclaveUuid,
) -> Labels {
    let mut labels = enclave_object_search_labels(enclave_uuid);
    let _ = labels.insert(
        VOLUME_TYPE_LABEL_KEY.to_string(),
        ENCLAVE_DATA_VOLUME_TYPE_LABEL_VALUE.to_string(),
    );
    labels
}

/// The full label set stamped onto a new enclave's network.
pub fn enclave_network_labels(
    enclave_uuid: &EnclaveUuid,
    enclave_name: &str,
    creation_time: &DateTime<Utc>,
    is_partitioning_enabled: bool,
) -> Labels {
    let mut labels = enclave_object_search_labels(enclave_uuid);
    let _ = labels.insert(
        ENCLAVE_NAME_LABEL_KEY.to_string(),
        enclave_name.to_string(),
    );
    let _ = labels.insert(
        CREATION_TIME_LABEL_KEY.to_string(),
        creation_time.to_rfc3339(),
    );
    let _ = labels.insert(
        IS_PARTITIONING_ENABLED_LABEL_KEY.to_string(),
        is_partitioning_enabled.to_string(),
    );
    labels
}

/// The full label set stamped onto a new enclave's data volume.
pub fn enclave_data_volume_labels(enclave_uuid: &EnclaveUuid) -> Labels {
    enclave_data_volume_search_labels(enclave_uuid)
}
