/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use super::{Container, ContainerInspect, Network, Result, Volume};
use crate::labels::Labels;
use async_trait::async_trait;
use tokio::io::AsyncRead;

/// A container's log stream as handed out by the driver. For TTY containers
/// this is the raw byte stream; otherwise it is the engine's multiplexed
/// stdout/stderr framing (see [`super::demultiplex_into`]).
pub type LogStream = Box<dyn AsyncRead + Send + Unpin>;

/// The capability set a container engine must provide.
///
/// Implementations must be thread-safe: the lifecycle verbs issue calls from
/// many tasks at once. Every method is cancellation-safe in the usual async
/// sense (dropping the returned future abandons the call), but callers must
/// assume a dropped call may still have taken effect on the engine.
#[async_trait]
pub trait SubstrateDriver: Send + Sync {
    /// Lists networks carrying all of the given labels.
    async fn networks_by_labels(&self, labels: &Labels)
        -> Result<Vec<Network>>;

    /// Lists volumes carrying all of the given labels.
    async fn volumes_by_labels(&self, labels: &Labels) -> Result<Vec<Volume>>;

    /// Lists containers carrying all of the given labels, optionally
    /// including stopped ones.
    async fn containers_by_labels(
        &self,
        labels: &Labels,
        include_stopped: bool,
    ) -> Result<Vec<Container>>;

    /// Creates a network and returns its substrate-assigned id.
    async fn create_network(
        &self,
        name: &str,
        labels: &Labels,
    ) -> Result<String>;

    /// Creates a named volume.
    async fn create_volume(&self, name: &str, labels: &Labels) -> Result<()>;

    /// Removes a network by id.
    async fn remove_network(&self, network_id: &str) -> Result<()>;

    /// Removes a volume by name.
    async fn remove_volume(&self, volume_name: &str) -> Result<()>;

    /// Force-removes a container by id.
    async fn remove_container(&self, container_id: &str) -> Result<()>;

    /// Kills a running container by id. Killing an already-stopped container
    /// succeeds.
    async fn kill_container(&self, container_id: &str) -> Result<()>;

    /// Returns an inspect snapshot for a container.
    async fn inspect_container(
        &self,
        container_id: &str,
    ) -> Result<ContainerInspect>;

    /// Opens the container's log stream, optionally following new output.
    async fn container_logs(
        &self,
        container_id: &str,
        follow: bool,
    ) -> Result<LogStream>;
}
