/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

//! Scoped cleanup for multi-step creation.
//!
//! Each substrate object created during `Create` arms one guard; committing
//! disarms them. An armed guard fires when dropped, which covers both the
//! error-return paths and the caller cancelling (dropping) the create future
//! mid-flight. The removal runs on a detached task precisely because the
//! creating future may already be gone: a cancelled substrate call can still
//! have taken effect, and the orphan must be cleaned up regardless.

use crate::substrate::SubstrateDriver;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Clone)]
enum RollbackAction {
    RemoveNetwork { network_id: String },
    RemoveVolume { volume_name: String },
}

pub(crate) struct RollbackGuard {
    driver: Arc<dyn SubstrateDriver>,
    action: Option<RollbackAction>,
}

impl RollbackGuard {
    pub fn for_network(
        driver: Arc<dyn SubstrateDriver>,
        network_id: String,
    ) -> Self {
        Self {
            driver,
            action: Some(RollbackAction::RemoveNetwork { network_id }),
        }
    }

    pub fn for_volume(
        driver: Arc<dyn SubstrateDriver>,
        volume_name: String,
    ) -> Self {
        Self {
            driver,
            action: Some(RollbackAction::RemoveVolume { volume_name }),
        }
    }

    /// Commits the guarded object: the guard becomes inert.
    pub fn disarm(mut self) {
        self.action = None;
    }
}

impl std::fmt::Debug for RollbackGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollbackGuard")
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl Drop for RollbackGuard {
    fn drop(&mut self) {
        let Some(action) = self.action.take() else {
            return;
        };
        let driver = Arc::clone(&self.driver);

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            // No runtime left to run the removal on; all we can do is tell
            // the operator.
            report_rollback_unrun(&action);
            return;
        };

        let _ = handle.spawn(async move {
            let (kind, object_id, outcome) = match &action {
                RollbackAction::RemoveNetwork { network_id } => (
                    "network",
                    network_id.clone(),
                    driver.remove_network(network_id).await,
                ),
                RollbackAction::RemoveVolume { volume_name } => (
                    "volume",
                    volume_name.clone(),
                    driver.remove_volume(volume_name).await,
                ),
            };

            match outcome {
                Ok(()) => {
                    debug!("rolled back {kind} '{object_id}'");
                }
                Err(e) => {
                    error!(
                        "enclave creation did not complete and rolling back \
                         {kind} '{object_id}' failed: {e}"
                    );
                    error!(
                        "ACTION REQUIRED: manually remove {kind} '{object_id}'"
                    );
                }
            }
        });
    }
}

fn report_rollback_unrun(action: &RollbackAction) {
    let (kind, object_id) = match action {
        RollbackAction::RemoveNetwork { network_id } => {
            ("network", network_id.as_str())
        }
        RollbackAction::RemoveVolume { volume_name } => {
            ("volume", volume_name.as_str())
        }
    };
    error!(
        "enclave creation did not complete and no async runtime is \
         available to roll back {kind} '{object_id}'"
    );
    error!("ACTION REQUIRED: manually remove {kind} '{object_id}'");
}
