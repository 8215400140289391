/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use super::error::{EnclavesError, Result};
use super::matcher::{self, EnclaveNetworkInfo};
use super::rollback::RollbackGuard;
use super::{
    dump, name_generator, Enclave, EnclaveFilter, EnclaveName, EnclaveStatus,
    EnclaveUuid, FreeIpProvider, ServiceRegistration,
};
use crate::labels;
use crate::substrate::{
    run_in_parallel, SubstrateDriver, SubstrateError,
    MAX_CONCURRENT_SUBSTRATE_OPS,
};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

// Prefix on every substrate object name this backend coins.
const ENCLAVE_OBJECT_NAME_PREFIX: &str = "kt-";
const ENCLAVE_DATA_VOLUME_SUFFIX: &str = "-data";

const MAX_GENERATED_NAME_ATTEMPTS: usize = 5;

/// Enclaves an errored batch verb reports, keyed by UUID. The value is the
/// newline-joined concatenation of the enclave's object-level failures;
/// callers should display it, never parse it.
pub type ErroredEnclaves = HashMap<EnclaveUuid, String>;

/// Translates the enclave lifecycle verbs into ordered operations over the
/// substrate.
///
/// The manager is stateless about enclaves themselves — the substrate's
/// labels are the source of truth, so a restarted engine picks up exactly
/// where the old one left off. The only process-local state is the pair of
/// tenant maps guarding `destroy_enclaves`.
pub struct EnclaveManager {
    driver: Arc<dyn SubstrateDriver>,
    free_ip_providers: Mutex<HashMap<EnclaveUuid, FreeIpProvider>>,
    service_registrations:
        Mutex<HashMap<EnclaveUuid, Vec<ServiceRegistration>>>,
}

impl std::fmt::Debug for EnclaveManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnclaveManager").finish_non_exhaustive()
    }
}

impl EnclaveManager {
    /// Builds a manager on top of a substrate driver.
    pub fn new(driver: Arc<dyn SubstrateDriver>) -> Self {
        Self {
            driver,
            free_ip_providers: Mutex::new(HashMap::new()),
            service_registrations: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a new, empty enclave.
    ///
    /// The UUID must be unused and the name (when given) must match
    /// [`super::ALLOWED_ENCLAVE_NAME_PATTERN`] and be free among live
    /// enclaves; a missing name is auto-generated. On failure, nothing this
    /// call created remains on the substrate: each construction step arms a
    /// rollback that also fires if the caller abandons the future mid-create,
    /// because a cancelled substrate call may nevertheless have completed.
    #[tracing::instrument(skip(self))]
    pub async fn create_enclave(
        &self,
        enclave_uuid: EnclaveUuid,
        enclave_name: Option<String>,
        is_partitioning_enabled: bool,
    ) -> Result<Enclave> {
        let networks = self
            .driver
            .networks_by_labels(&labels::enclave_object_search_labels(
                &enclave_uuid,
            ))
            .await?;
        if !networks.is_empty() {
            return Err(EnclavesError::EnclaveExists { enclave_uuid });
        }

        let volumes = self
            .driver
            .volumes_by_labels(&labels::enclave_data_volume_search_labels(
                &enclave_uuid,
            ))
            .await?;
        if !volumes.is_empty() {
            return Err(EnclavesError::EnclaveExists { enclave_uuid });
        }

        let enclave_name = self.resolve_enclave_name(enclave_name).await?;

        let creation_time = Utc::now();
        let network_name =
            format!("{ENCLAVE_OBJECT_NAME_PREFIX}{enclave_name}");
        let network_labels = labels::enclave_network_labels(
            &enclave_uuid,
            enclave_name.as_str(),
            &creation_time,
            is_partitioning_enabled,
        );

        debug!("creating network for enclave '{enclave_uuid}'");
        let network_id = self
            .driver
            .create_network(&network_name, &network_labels)
            .await
            .map_err(|source| EnclavesError::FailedToCreateEnclaveNetwork {
                enclave_uuid: enclave_uuid.clone(),
                source,
            })?;
        let network_guard =
            RollbackGuard::for_network(Arc::clone(&self.driver), network_id);

        let volume_name = format!(
            "{ENCLAVE_OBJECT_NAME_PREFIX}{enclave_name}{ENCLAVE_DATA_VOLUME_SUFFIX}"
        );
        let volume_labels = labels::enclave_data_volume_labels(&enclave_uuid);
        self.driver
            .create_volume(&volume_name, &volume_labels)
            .await
            .map_err(|source| {
                EnclavesError::FailedToCreateEnclaveDataVolume {
                    enclave_uuid: enclave_uuid.clone(),
                    source,
                }
            })?;
        let volume_guard =
            RollbackGuard::for_volume(Arc::clone(&self.driver), volume_name);

        // Commit point: both substrate objects exist, so the guards go
        // inert and the enclave is live.
        network_guard.disarm();
        volume_guard.disarm();

        info!("created enclave '{enclave_uuid}' named '{enclave_name}'");
        Ok(Enclave::new(
            enclave_uuid,
            enclave_name.to_string(),
            EnclaveStatus::Empty,
            Some(creation_time),
        ))
    }

    /// Returns the enclaves matching the filter, keyed by UUID.
    #[tracing::instrument(skip(self))]
    pub async fn get_enclaves(
        &self,
        filter: &EnclaveFilter,
    ) -> Result<HashMap<EnclaveUuid, Enclave>> {
        let infos =
            matcher::matching_network_info(self.driver.as_ref(), filter)
                .await?;

        let mut result = HashMap::new();
        for (uuid, info) in infos {
            let name = matcher::enclave_name_from_network(&info.network);
            let creation_time =
                matcher::enclave_creation_time_from_network(&info.network)?;
            let _ = result.insert(
                uuid.clone(),
                Enclave::new(uuid, name, info.status, creation_time),
            );
        }
        Ok(result)
    }

    /// Kills every container of every enclave matching the filter.
    ///
    /// Stopping removes nothing, and stopping an already-stopped enclave is
    /// a no-op success. Kills run as one bounded-parallel batch across all
    /// matched enclaves; a failed kill marks only its own enclave errored.
    #[tracing::instrument(skip(self))]
    pub async fn stop_enclaves(
        &self,
        filter: &EnclaveFilter,
    ) -> Result<(HashSet<EnclaveUuid>, ErroredEnclaves)> {
        let infos =
            matcher::matching_network_info(self.driver.as_ref(), filter)
                .await?;

        let (container_ids, owners) = member_containers(&infos);
        let (_successful, errored) = run_in_parallel(
            container_ids,
            MAX_CONCURRENT_SUBSTRATE_OPS,
            |container_id| {
                let driver = Arc::clone(&self.driver);
                async move { driver.kill_container(&container_id).await }
            },
        )
        .await;

        aggregate_outcomes(
            infos.keys(),
            &owners,
            errored,
            "killing container",
            "killing the containers",
        )
    }

    /// Writes the inspect snapshot and decoded logs of every container in
    /// the enclave under `output_dirpath` (which must not exist yet).
    #[tracing::instrument(skip(self))]
    pub async fn dump_enclave(
        &self,
        enclave_uuid: &EnclaveUuid,
        output_dirpath: &Path,
    ) -> Result<()> {
        dump::dump_enclave(&self.driver, enclave_uuid, output_dirpath).await
    }

    /// Destroys every enclave matching the filter: containers, then all
    /// enclave volumes, then the network.
    ///
    /// A phase failure stops later phases for that enclave only; the rest of
    /// the batch keeps going, and parallelism is across objects rather than
    /// enclaves. An enclave is successful only if all three phases were.
    #[tracing::instrument(skip(self))]
    pub async fn destroy_enclaves(
        &self,
        filter: &EnclaveFilter,
    ) -> Result<(HashSet<EnclaveUuid>, ErroredEnclaves)> {
        let infos =
            matcher::matching_network_info(self.driver.as_ref(), filter)
                .await?;
        self.check_no_tenant_state(&infos).await?;

        let mut errored = ErroredEnclaves::new();

        let (container_clean, container_errors) =
            self.destroy_containers(&infos).await?;
        errored.extend(container_errors);

        let (volume_clean, volume_errors) =
            self.destroy_volumes(&container_clean).await?;
        errored.extend(volume_errors);

        let (successful, network_errors) =
            self.destroy_networks(&infos, &volume_clean).await?;
        errored.extend(network_errors);

        for uuid in &successful {
            info!("destroyed enclave '{uuid}'");
        }
        Ok((successful, errored))
    }

    /// Registers a tenant-side free-IP provider, making its enclave
    /// undestroyable through this manager.
    pub async fn register_free_ip_provider(&self, provider: FreeIpProvider) {
        let mut providers = self.free_ip_providers.lock().await;
        let _ =
            providers.insert(provider.enclave_uuid().clone(), provider);
    }

    /// Registers a tenant-side service, making its enclave undestroyable
    /// through this manager.
    pub async fn register_service(&self, registration: ServiceRegistration) {
        let mut registrations = self.service_registrations.lock().await;
        registrations
            .entry(registration.enclave_uuid().clone())
            .or_default()
            .push(registration);
    }

    async fn resolve_enclave_name(
        &self,
        requested: Option<String>,
    ) -> Result<EnclaveName> {
        let live_names = self.live_enclave_names().await?;

        match requested {
            Some(name) => {
                let name = EnclaveName::new(&name)?;
                if live_names.contains(name.as_str()) {
                    return Err(EnclavesError::EnclaveNameTaken {
                        name: name.to_string(),
                    });
                }
                Ok(name)
            }
            None => {
                let mut candidate = name_generator::generate_enclave_name();
                for _ in 0..MAX_GENERATED_NAME_ATTEMPTS {
                    if !live_names.contains(candidate.as_str()) {
                        return EnclaveName::new(&candidate);
                    }
                    candidate = name_generator::generate_enclave_name();
                }
                Err(EnclavesError::EnclaveNameTaken { name: candidate })
            }
        }
    }

    async fn live_enclave_names(&self) -> Result<HashSet<String>> {
        let networks = self
            .driver
            .networks_by_labels(&labels::app_object_search_labels())
            .await?;
        Ok(networks
            .iter()
            .filter_map(|network| {
                network.labels.get(labels::ENCLAVE_NAME_LABEL_KEY).cloned()
            })
            .collect())
    }

    /// Fails wholesale if any matched enclave has tenant-local state: those
    /// structures exist only inside the per-enclave API container, so seeing
    /// them here means destroy is being called from the wrong place.
    async fn check_no_tenant_state(
        &self,
        infos: &HashMap<EnclaveUuid, EnclaveNetworkInfo>,
    ) -> Result<()> {
        let free_ip_providers = self.free_ip_providers.lock().await;
        let service_registrations = self.service_registrations.lock().await;

        for uuid in infos.keys() {
            if free_ip_providers.contains_key(uuid) {
                return Err(EnclavesError::TenantStateRegistered {
                    enclave_uuid: uuid.clone(),
                    kind: "free IP provider",
                });
            }
            if service_registrations.contains_key(uuid) {
                return Err(EnclavesError::TenantStateRegistered {
                    enclave_uuid: uuid.clone(),
                    kind: "service registration",
                });
            }
        }
        Ok(())
    }

    async fn destroy_containers(
        &self,
        infos: &HashMap<EnclaveUuid, EnclaveNetworkInfo>,
    ) -> Result<(HashSet<EnclaveUuid>, ErroredEnclaves)> {
        let (container_ids, owners) = member_containers(infos);
        let (_successful, errored) = run_in_parallel(
            container_ids,
            MAX_CONCURRENT_SUBSTRATE_OPS,
            |container_id| {
                let driver = Arc::clone(&self.driver);
                async move { driver.remove_container(&container_id).await }
            },
        )
        .await;

        aggregate_outcomes(
            infos.keys(),
            &owners,
            errored,
            "removing container",
            "removing the containers",
        )
    }

    async fn destroy_volumes(
        &self,
        enclave_uuids: &HashSet<EnclaveUuid>,
    ) -> Result<(HashSet<EnclaveUuid>, ErroredEnclaves)> {
        // Everything enclave-tagged goes, not only the data volume: services
        // may have left other volumes behind.
        let mut volume_names = HashSet::new();
        let mut owners: HashMap<String, EnclaveUuid> = HashMap::new();
        for uuid in enclave_uuids {
            let volumes = self
                .driver
                .volumes_by_labels(&labels::enclave_object_search_labels(
                    uuid,
                ))
                .await?;
            for volume in volumes {
                let _ = volume_names.insert(volume.name.clone());
                let _ = owners.insert(volume.name, uuid.clone());
            }
        }

        let (_successful, errored) = run_in_parallel(
            volume_names,
            MAX_CONCURRENT_SUBSTRATE_OPS,
            |volume_name| {
                let driver = Arc::clone(&self.driver);
                async move { driver.remove_volume(&volume_name).await }
            },
        )
        .await;

        aggregate_outcomes(
            enclave_uuids.iter(),
            &owners,
            errored,
            "removing volume",
            "removing the volumes",
        )
    }

    async fn destroy_networks(
        &self,
        infos: &HashMap<EnclaveUuid, EnclaveNetworkInfo>,
        enclave_uuids: &HashSet<EnclaveUuid>,
    ) -> Result<(HashSet<EnclaveUuid>, ErroredEnclaves)> {
        let mut network_ids = HashSet::new();
        let mut owners: HashMap<String, EnclaveUuid> = HashMap::new();
        for (uuid, info) in infos {
            if !enclave_uuids.contains(uuid) {
                continue;
            }
            let _ = network_ids.insert(info.network.id.clone());
            let _ = owners.insert(info.network.id.clone(), uuid.clone());
        }

        let (_successful, errored) = run_in_parallel(
            network_ids,
            MAX_CONCURRENT_SUBSTRATE_OPS,
            |network_id| {
                let driver = Arc::clone(&self.driver);
                async move { driver.remove_network(&network_id).await }
            },
        )
        .await;

        aggregate_outcomes(
            enclave_uuids.iter(),
            &owners,
            errored,
            "removing network",
            "removing the network",
        )
    }
}

/// Unions the member containers of all matched enclaves into one work set,
/// remembering which enclave each container belongs to.
fn member_containers(
    infos: &HashMap<EnclaveUuid, EnclaveNetworkInfo>,
) -> (HashSet<String>, HashMap<String, EnclaveUuid>) {
    let mut container_ids = HashSet::new();
    let mut owners = HashMap::new();
    for (uuid, info) in infos {
        for container in &info.containers {
            let _ = container_ids.insert(container.id.clone());
            let _ = owners.insert(container.id.clone(), uuid.clone());
        }
    }
    (container_ids, owners)
}

/// Folds per-object failures back onto their enclaves. Enclaves with no
/// failures are successful; an errored object that maps to no requested
/// enclave fails the whole call.
fn aggregate_outcomes<'a>(
    enclave_uuids: impl IntoIterator<Item = &'a EnclaveUuid>,
    owners: &HashMap<String, EnclaveUuid>,
    errored_objects: HashMap<String, SubstrateError>,
    object_op: &str,
    summary_op: &str,
) -> Result<(HashSet<EnclaveUuid>, ErroredEnclaves)> {
    let mut failures: HashMap<EnclaveUuid, Vec<String>> = HashMap::new();
    for (object_id, e) in errored_objects {
        let Some(uuid) = owners.get(&object_id) else {
            return Err(EnclavesError::UnrequestedObject {
                object_id,
            });
        };
        failures
            .entry(uuid.clone())
            .or_default()
            .push(format!("error {object_op} '{object_id}': {e:#}"));
    }

    let mut successful = HashSet::new();
    let mut errored = ErroredEnclaves::new();
    for uuid in enclave_uuids {
        match failures.remove(uuid) {
            None => {
                let _ = successful.insert(uuid.clone());
            }
            Some(mut messages) => {
                messages.sort();
                let _ = errored.insert(
                    uuid.clone(),
                    format!(
                        "one or more errors occurred {summary_op} in enclave '{uuid}':\n{}",
                        messages.join("\n\n")
                    ),
                );
            }
        }
    }
    Ok((successful, errored))
}
