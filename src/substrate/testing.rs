/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! In-memory substrate driver for unit tests, with per-object fault
//! injection and canned log streams.

use super::{
    Container, ContainerConfig, ContainerInspect, LogStream, Network, Result,
    SubstrateDriver, SubstrateError, Volume,
};
use crate::labels::Labels;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub(crate) struct FakeContainer {
    pub container: Container,
    pub tty: bool,
    pub logs: Vec<u8>,
}

#[derive(Debug, Default)]
struct FakeState {
    networks: HashMap<String, Network>,
    volumes: HashMap<String, Volume>,
    containers: HashMap<String, FakeContainer>,
    next_network_ordinal: u64,
    fail_removals_of: HashSet<String>,
    fail_inspect_of: HashSet<String>,
    fail_volume_creates: bool,
    hold_volume_creates: bool,
}

/// An in-memory [`SubstrateDriver`].
///
/// Objects whose id (or volume name) is registered via
/// [`FakeSubstrate::fail_removal_of`] error on removal but stay present,
/// mimicking an engine-side transient failure.
#[derive(Debug, Default)]
pub(crate) struct FakeSubstrate {
    state: Mutex<FakeState>,
}

impl FakeSubstrate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_container(&self, fake: FakeContainer) {
        let mut state = self.state.lock().expect("fake substrate lock");
        let _ = state.containers.insert(fake.container.id.clone(), fake);
    }

    pub fn add_network(&self, network: Network) {
        let mut state = self.state.lock().expect("fake substrate lock");
        let _ = state.networks.insert(network.id.clone(), network);
    }

    pub fn add_volume(&self, volume: Volume) {
        let mut state = self.state.lock().expect("fake substrate lock");
        let _ = state.volumes.insert(volume.name.clone(), volume);
    }

    pub fn fail_removal_of(&self, object_id: &str) {
        let mut state = self.state.lock().expect("fake substrate lock");
        let _ = state.fail_removals_of.insert(object_id.to_string());
    }

    pub fn fail_inspect_of(&self, container_id: &str) {
        let mut state = self.state.lock().expect("fake substrate lock");
        let _ = state.fail_inspect_of.insert(container_id.to_string());
    }

    /// Makes every subsequent `create_volume` call fail.
    pub fn fail_volume_creates(&self) {
        let mut state = self.state.lock().expect("fake substrate lock");
        state.fail_volume_creates = true;
    }

    /// Makes every subsequent `create_volume` call block forever, so a test
    /// can park enclave creation between its network and volume steps.
    pub fn hold_volume_creates(&self) {
        let mut state = self.state.lock().expect("fake substrate lock");
        state.hold_volume_creates = true;
    }

    pub fn network_count(&self) -> usize {
        self.state.lock().expect("fake substrate lock").networks.len()
    }

    pub fn volume_count(&self) -> usize {
        self.state.lock().expect("fake substrate lock").volumes.len()
    }

    pub fn container_count(&self) -> usize {
        self.state.lock().expect("fake substrate lock").containers.len()
    }

    pub fn container_state(&self, container_id: &str) -> Option<String> {
        let state = self.state.lock().expect("fake substrate lock");
        state
            .containers
            .get(container_id)
            .map(|fake| fake.container.state.clone())
    }

    pub fn objects_labeled(&self, labels: &Labels) -> usize {
        let state = self.state.lock().expect("fake substrate lock");
        let networks = state
            .networks
            .values()
            .filter(|n| labels_match(&n.labels, labels))
            .count();
        let volumes = state
            .volumes
            .values()
            .filter(|v| labels_match(&v.labels, labels))
            .count();
        let containers = state
            .containers
            .values()
            .filter(|c| labels_match(&c.container.labels, labels))
            .count();
        networks + volumes + containers
    }
}

fn labels_match(object_labels: &Labels, search: &Labels) -> bool {
    search
        .iter()
        .all(|(key, value)| object_labels.get(key) == Some(value))
}

fn injected(object_id: &str, verb: &str) -> SubstrateError {
    SubstrateError::Driver(anyhow::anyhow!(
        "injected failure {verb} '{object_id}'"
    ))
}

#[async_trait]
impl SubstrateDriver for FakeSubstrate {
    async fn networks_by_labels(
        &self,
        labels: &Labels,
    ) -> Result<Vec<Network>> {
        let state = self.state.lock().expect("fake substrate lock");
        Ok(state
            .networks
            .values()
            .filter(|n| labels_match(&n.labels, labels))
            .cloned()
            .collect())
    }

    async fn volumes_by_labels(&self, labels: &Labels) -> Result<Vec<Volume>> {
        let state = self.state.lock().expect("fake substrate lock");
        Ok(state
            .volumes
            .values()
            .filter(|v| labels_match(&v.labels, labels))
            .cloned()
            .collect())
    }

    async fn containers_by_labels(
        &self,
        labels: &Labels,
        include_stopped: bool,
    ) -> Result<Vec<Container>> {
        let state = self.state.lock().expect("fake substrate lock");
        Ok(state
            .containers
            .values()
            .map(|fake| &fake.container)
            .filter(|c| labels_match(&c.labels, labels))
            .filter(|c| include_stopped || c.state == "running")
            .cloned()
            .collect())
    }

    async fn create_network(
        &self,
        name: &str,
        labels: &Labels,
    ) -> Result<String> {
        let mut state = self.state.lock().expect("fake substrate lock");
        state.next_network_ordinal += 1;
        let id = format!("net-{}", state.next_network_ordinal);
        let network = Network {
            id: id.clone(),
            name: name.to_string(),
            labels: labels.clone(),
        };
        let _ = state.networks.insert(id.clone(), network);
        Ok(id)
    }

    async fn create_volume(&self, name: &str, labels: &Labels) -> Result<()> {
        let (held, failing) = {
            let state = self.state.lock().expect("fake substrate lock");
            (state.hold_volume_creates, state.fail_volume_creates)
        };
        if held {
            let () = futures::future::pending().await;
        }
        if failing {
            return Err(injected(name, "creating volume"));
        }

        let mut state = self.state.lock().expect("fake substrate lock");
        let volume =
            Volume { name: name.to_string(), labels: labels.clone() };
        let _ = state.volumes.insert(name.to_string(), volume);
        Ok(())
    }

    async fn remove_network(&self, network_id: &str) -> Result<()> {
        let mut state = self.state.lock().expect("fake substrate lock");
        if state.fail_removals_of.contains(network_id) {
            return Err(injected(network_id, "removing network"));
        }
        match state.networks.remove(network_id) {
            Some(_) => Ok(()),
            None => Err(SubstrateError::Driver(anyhow::anyhow!(
                "no such network '{network_id}'"
            ))),
        }
    }

    async fn remove_volume(&self, volume_name: &str) -> Result<()> {
        let mut state = self.state.lock().expect("fake substrate lock");
        if state.fail_removals_of.contains(volume_name) {
            return Err(injected(volume_name, "removing volume"));
        }
        match state.volumes.remove(volume_name) {
            Some(_) => Ok(()),
            None => Err(SubstrateError::Driver(anyhow::anyhow!(
                "no such volume '{volume_name}'"
            ))),
        }
    }

    async fn remove_container(&self, container_id: &str) -> Result<()> {
        let mut state = self.state.lock().expect("fake substrate lock");
        if state.fail_removals_of.contains(container_id) {
            return Err(injected(container_id, "removing container"));
        }
        match state.containers.remove(container_id) {
            Some(_) => Ok(()),
            None => Err(SubstrateError::Driver(anyhow::anyhow!(
                "no such container '{container_id}'"
            ))),
        }
    }

    async fn kill_container(&self, container_id: &str) -> Result<()> {
        let mut state = self.state.lock().expect("fake substrate lock");
        if state.fail_removals_of.contains(container_id) {
            return Err(injected(container_id, "killing container"));
        }
        match state.containers.get_mut(container_id) {
            Some(fake) => {
                fake.container.state = "exited".to_string();
                Ok(())
            }
            None => Err(SubstrateError::Driver(anyhow::anyhow!(
                "no such container '{container_id}'"
            ))),
        }
    }

    async fn inspect_container(
        &self,
        container_id: &str,
    ) -> Result<ContainerInspect> {
        let state = self.state.lock().expect("fake substrate lock");
        if state.fail_inspect_of.contains(container_id) {
            return Err(injected(container_id, "inspecting container"));
        }
        let fake = state.containers.get(container_id).ok_or_else(|| {
            SubstrateError::Driver(anyhow::anyhow!(
                "no such container '{container_id}'"
            ))
        })?;
        Ok(ContainerInspect {
            id: fake.container.id.clone(),
            name: fake.container.name.clone(),
            state: fake.container.state.clone(),
            config: ContainerConfig {
                tty: fake.tty,
                image: "fake:latest".to_string(),
                env: Vec::new(),
                cmd: None,
                labels: fake.container.labels.clone(),
            },
        })
    }

    async fn container_logs(
        &self,
        container_id: &str,
        _follow: bool,
    ) -> Result<LogStream> {
        let state = self.state.lock().expect("fake substrate lock");
        let fake = state.containers.get(container_id).ok_or_else(|| {
            SubstrateError::Driver(anyhow::anyhow!(
                "no such container '{container_id}'"
            ))
        })?;
        Ok(Box::new(Cursor::new(fake.logs.clone())))
    }
}

/// Encodes frames in the engine's multiplexed log framing.
pub(crate) fn multiplexed(frames: &[(u8, &[u8])]) -> Vec<u8> {
    let mut encoded = Vec::new();
    for (stream_id, payload) in frames {
        encoded.push(*stream_id);
        encoded.extend_from_slice(&[0, 0, 0]);
        encoded.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        encoded.extend_from_slice(payload);
    }
    encoded
}
