/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! Writes an enclave's container specs and logs to an output tree:
//!
//! ```text
//! <output_dir>/
//!   <container_name>/
//!     spec.json    pretty-printed inspect snapshot
//!     output.log   decoded logs
//! ```

use super::error::{EnclavesError, Result};
use super::EnclaveUuid;
use crate::labels;
use crate::substrate::{
    demultiplex_into, run_in_parallel, SubstrateDriver, SubstrateError,
};
use anyhow::Context;
use iter_tools::Itertools;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const CONTAINER_SPEC_FILENAME: &str = "spec.json";
const CONTAINER_LOGS_FILENAME: &str = "output.log";

const NUM_CONTAINERS_TO_DUMP_AT_ONCE: usize = 20;

const CREATED_DIR_PERMS: u32 = 0o755;
const CREATED_FILE_PERMS: u32 = 0o644;

const SHOULD_FOLLOW_LOGS_WHEN_DUMPING: bool = false;

/// Dumps every container of the enclave (stopped ones included) under
/// `output_dirpath`, which must not exist yet.
///
/// Containers dump concurrently; one container's failure never stops the
/// others. All failures are folded into a single [`EnclavesError::DumpFailed`]
/// at the end.
pub(crate) async fn dump_enclave(
    driver: &Arc<dyn SubstrateDriver>,
    enclave_uuid: &EnclaveUuid,
    output_dirpath: &Path,
) -> Result<()> {
    match tokio::fs::metadata(output_dirpath).await {
        Ok(_) => {
            return Err(EnclavesError::OutputDirExists {
                path: output_dirpath.to_path_buf(),
            });
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(EnclavesError::Io(e)),
    }

    let containers = driver
        .containers_by_labels(
            &labels::enclave_object_search_labels(enclave_uuid),
            true,
        )
        .await?;

    tokio::fs::DirBuilder::new()
        .mode(CREATED_DIR_PERMS)
        .create(output_dirpath)
        .await?;

    let mut names_by_id: HashMap<String, String> = HashMap::new();
    for container in &containers {
        let _ = names_by_id
            .insert(container.id.clone(), container.name.clone());
    }
    let container_ids = names_by_id.keys().cloned().collect();

    let (_successful, errored) = run_in_parallel(
        container_ids,
        NUM_CONTAINERS_TO_DUMP_AT_ONCE,
        |container_id| {
            let driver = Arc::clone(driver);
            let container_name = names_by_id
                .get(&container_id)
                .cloned()
                .unwrap_or_else(|| container_id.clone());
            let enclave_output_dirpath = output_dirpath.to_path_buf();
            async move {
                debug!(
                    "dumping container '{container_name}' ('{container_id}')"
                );
                dump_container_info(
                    driver,
                    enclave_output_dirpath,
                    container_name,
                    container_id,
                )
                .await
                .map_err(SubstrateError::Driver)
            }
        },
    )
    .await;

    if errored.is_empty() {
        return Ok(());
    }

    let aggregate = errored
        .into_iter()
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .enumerate()
        .map(|(idx, (container_id, e))| {
            format!(
                ">>>>>>>>>>>>>>>>> ERROR {idx} <<<<<<<<<<<<<<<<<\n\
                 container '{container_id}': {e:#}"
            )
        })
        .join("\n\n");
    Err(EnclavesError::DumpFailed {
        enclave_uuid: enclave_uuid.clone(),
        aggregate,
    })
}

/// Dumps one container: its inspect snapshot, then its decoded logs.
async fn dump_container_info(
    driver: Arc<dyn SubstrateDriver>,
    enclave_output_dirpath: PathBuf,
    container_name: String,
    container_id: String,
) -> anyhow::Result<()> {
    let container_output_dirpath =
        enclave_output_dirpath.join(&container_name);
    tokio::fs::DirBuilder::new()
        .mode(CREATED_DIR_PERMS)
        .create(&container_output_dirpath)
        .await
        .with_context(|| {
            format!(
                "creating directory '{}'",
                container_output_dirpath.display()
            )
        })?;

    let inspect_result = driver
        .inspect_container(&container_id)
        .await
        .context("inspecting the container")?;

    let spec_json = serde_json::to_vec_pretty(&inspect_result)
        .context("serializing the inspect result")?;
    let spec_filepath = container_output_dirpath.join(CONTAINER_SPEC_FILENAME);
    let mut spec_file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(CREATED_FILE_PERMS)
        .open(&spec_filepath)
        .await
        .with_context(|| {
            format!("creating file '{}'", spec_filepath.display())
        })?;
    spec_file
        .write_all(&spec_json)
        .await
        .context("writing the inspect result")?;
    spec_file.flush().await.context("flushing the inspect result")?;

    let log_stream = driver
        .container_logs(&container_id, SHOULD_FOLLOW_LOGS_WHEN_DUMPING)
        .await
        .context("opening the container's log stream")?;

    let logs_filepath = container_output_dirpath.join(CONTAINER_LOGS_FILENAME);
    let mut logs_file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(CREATED_FILE_PERMS)
        .open(&logs_filepath)
        .await
        .with_context(|| {
            format!("creating file '{}'", logs_filepath.display())
        })?;

    // A TTY container's stream is raw bytes; anything else is the engine's
    // multiplexed stdout/stderr framing and has to be decoded.
    if inspect_result.config.tty {
        let mut log_stream = log_stream;
        let _ = tokio::io::copy(&mut log_stream, &mut logs_file)
            .await
            .context("copying the raw log stream")?;
    } else {
        let _ = demultiplex_into(log_stream, &mut logs_file)
            .await
            .context("decoding the multiplexed log stream")?;
    }
    logs_file.flush().await.context("flushing the logs")?;

    Ok(())
}
