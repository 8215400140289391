/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! Resolves an [`EnclaveFilter`] to the substrate objects backing each
//! matching enclave.

use super::error::{EnclavesError, Result};
use super::status::{self, EnclaveStatus};
use super::{EnclaveFilter, EnclaveUuid};
use crate::labels;
use crate::substrate::{Container, Network, SubstrateDriver};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Everything the lifecycle verbs need to know about one matched enclave.
#[derive(Debug)]
pub(crate) struct EnclaveNetworkInfo {
    pub uuid: EnclaveUuid,
    pub status: EnclaveStatus,
    pub network: Network,
    pub containers: Vec<Container>,
}

/// Locates the network and member containers of every enclave matching the
/// filter.
///
/// The substrate cannot express an OR over label values, so this always
/// lists every app-tagged network and narrows by UUID in-process before
/// paying the per-enclave container listing for the survivors.
pub(crate) async fn matching_network_info(
    driver: &dyn SubstrateDriver,
    filter: &EnclaveFilter,
) -> Result<HashMap<EnclaveUuid, EnclaveNetworkInfo>> {
    let all_networks = driver
        .networks_by_labels(&labels::app_object_search_labels())
        .await?;

    // First narrow by UUID so filtered-out enclaves cost nothing further.
    let mut matching_networks: HashMap<EnclaveUuid, Network> = HashMap::new();
    for network in all_networks {
        let uuid = enclave_uuid_from_network(&network)?;
        if !filter.matches_uuid(&uuid) {
            continue;
        }
        let _ = matching_networks.insert(uuid, network);
    }

    // Then derive each survivor's status and narrow by it.
    let mut result = HashMap::new();
    for (uuid, network) in matching_networks {
        let containers = driver
            .containers_by_labels(
                &labels::enclave_object_search_labels(&uuid),
                true,
            )
            .await?;
        let enclave_status = status::classify(&containers)?;
        if !filter.matches_status(enclave_status) {
            continue;
        }

        let _ = result.insert(
            uuid.clone(),
            EnclaveNetworkInfo {
                uuid,
                status: enclave_status,
                network,
                containers,
            },
        );
    }

    Ok(result)
}

/// Reads the owning enclave's UUID off a network. Absence is an invariant
/// violation: this backend never creates a network without the label.
pub(crate) fn enclave_uuid_from_network(
    network: &Network,
) -> Result<EnclaveUuid> {
    match network.labels.get(labels::ENCLAVE_UUID_LABEL_KEY) {
        Some(value) => Ok(EnclaveUuid::new(value.clone())),
        None => Err(EnclavesError::NetworkMissingEnclaveUuid {
            network_id: network.id.clone(),
            label_key: labels::ENCLAVE_UUID_LABEL_KEY,
        }),
    }
}

/// Reads the enclave name off a network. Enclaves created before the name
/// label existed report an empty name rather than erroring.
pub(crate) fn enclave_name_from_network(network: &Network) -> String {
    network
        .labels
        .get(labels::ENCLAVE_NAME_LABEL_KEY)
        .cloned()
        .unwrap_or_default()
}

/// Reads the creation time off a network. A missing label is a legacy
/// enclave and reports `None`; a present-but-unparseable label is an error.
pub(crate) fn enclave_creation_time_from_network(
    network: &Network,
) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = network.labels.get(labels::CREATION_TIME_LABEL_KEY)
    else {
        return Ok(None);
    };

    let parsed = DateTime::parse_from_rfc3339(raw).map_err(|source| {
        EnclavesError::UnparseableCreationTime {
            network_id: network.id.clone(),
            value: raw.clone(),
            source,
        }
    })?;
    Ok(Some(parsed.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Labels;
    use crate::substrate::testing::{FakeContainer, FakeSubstrate};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn seed_enclave_network(
        fake: &FakeSubstrate,
        uuid: &str,
        name: &str,
    ) -> Network {
        let network = Network {
            id: format!("net-{uuid}"),
            name: format!("kt-{name}"),
            labels: labels::enclave_network_labels(
                &EnclaveUuid::from(uuid),
                name,
                &Utc::now(),
                false,
            ),
        };
        fake.add_network(network.clone());
        network
    }

    fn seed_container(
        fake: &FakeSubstrate,
        uuid: &str,
        id: &str,
        state: &str,
    ) {
        fake.add_container(FakeContainer {
            container: Container {
                id: id.to_string(),
                name: format!("name-{id}"),
                state: state.to_string(),
                labels: labels::enclave_object_search_labels(
                    &EnclaveUuid::from(uuid),
                ),
            },
            tty: false,
            logs: Vec::new(),
        });
    }

    #[tokio::test]
    async fn test_resolves_networks_and_members_per_enclave() {
        let fake = FakeSubstrate::new();
        let _ = seed_enclave_network(&fake, "e1", "one");
        let _ = seed_enclave_network(&fake, "e2", "two");
        seed_container(&fake, "e1", "c1", "running");
        seed_container(&fake, "e1", "c2", "exited");

        let infos = matching_network_info(&fake, &EnclaveFilter::any())
            .await
            .expect("matcher should resolve");

        assert_eq!(infos.len(), 2);
        let e1 = &infos[&EnclaveUuid::from("e1")];
        assert_eq!(e1.status, EnclaveStatus::Running);
        assert_eq!(e1.containers.len(), 2);
        let e2 = &infos[&EnclaveUuid::from("e2")];
        assert_eq!(e2.status, EnclaveStatus::Empty);
        assert!(e2.containers.is_empty());
    }

    #[tokio::test]
    async fn test_uuid_filter_drops_other_enclaves() {
        let fake = FakeSubstrate::new();
        let _ = seed_enclave_network(&fake, "e1", "one");
        let _ = seed_enclave_network(&fake, "e2", "two");

        let filter = EnclaveFilter::for_uuid(EnclaveUuid::from("e2"));
        let infos = matching_network_info(&fake, &filter)
            .await
            .expect("matcher should resolve");

        assert_eq!(infos.len(), 1);
        assert!(infos.contains_key(&EnclaveUuid::from("e2")));
    }

    #[tokio::test]
    async fn test_status_filter_is_conjunctive_with_uuids() {
        let fake = FakeSubstrate::new();
        let _ = seed_enclave_network(&fake, "e1", "one");
        let _ = seed_enclave_network(&fake, "e2", "two");
        seed_container(&fake, "e1", "c1", "running");

        let mut statuses = HashSet::new();
        let _ = statuses.insert(EnclaveStatus::Running);
        let filter = EnclaveFilter { uuids: HashSet::new(), statuses };

        let infos = matching_network_info(&fake, &filter)
            .await
            .expect("matcher should resolve");

        assert_eq!(infos.len(), 1);
        assert!(infos.contains_key(&EnclaveUuid::from("e1")));
    }

    #[tokio::test]
    async fn test_network_without_uuid_label_is_a_bug() {
        let fake = FakeSubstrate::new();
        let mut labels = Labels::new();
        let _ = labels.insert(
            labels::APP_ID_LABEL_KEY.to_string(),
            labels::APP_ID_LABEL_VALUE.to_string(),
        );
        fake.add_network(Network {
            id: "net-broken".to_string(),
            name: "broken".to_string(),
            labels,
        });

        let err = matching_network_info(&fake, &EnclaveFilter::any())
            .await
            .expect_err("unlabeled network must fail the call");

        assert!(matches!(
            err,
            EnclavesError::NetworkMissingEnclaveUuid { ref network_id, .. }
                if network_id == "net-broken"
        ));
    }

    #[test]
    fn test_creation_time_label_absence_is_legacy_not_error() {
        let network = Network {
            id: "net-legacy".to_string(),
            name: "legacy".to_string(),
            labels: Labels::new(),
        };

        let creation_time = enclave_creation_time_from_network(&network)
            .expect("missing label is tolerated");
        assert_eq!(creation_time, None);
        assert_eq!(enclave_name_from_network(&network), "");
    }

    #[test]
    fn test_malformed_creation_time_label_is_an_error() {
        let mut labels = Labels::new();
        let _ = labels.insert(
            labels::CREATION_TIME_LABEL_KEY.to_string(),
            "yesterday at noon".to_string(),
        );
        let network = Network {
            id: "net-bad".to_string(),
            name: "bad".to_string(),
            labels,
        };

        let err = enclave_creation_time_from_network(&network)
            .expect_err("malformed label must error");
        assert!(matches!(
            err,
            EnclavesError::UnparseableCreationTime { ref value, .. }
                if value == "yesterday at noon"
        ));
    }
}
