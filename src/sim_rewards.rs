// Reward Distributor - per-epoch token reward pass

use crate::sim_participant::ParticipantPool;
use std::fmt;

/// Fatal simulation faults
///
/// The model is pure computation: any fault here is a modeling precondition
/// violation, surfaced immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A reward pass found the network with zero total storage
    ZeroNetworkStorage {
        /// Epoch (1-based) at which the degenerate state was hit
        epoch: usize,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ZeroNetworkStorage { epoch } => write!(
                f,
                "reward pass at epoch {} hit zero total network storage",
                epoch
            ),
        }
    }
}

impl std::error::Error for SimError {}

/// Fraction of total network storage contributed by one participant
pub fn storage_share(storage_tb: f64, total_storage_tb: f64) -> f64 {
    storage_tb / total_storage_tb
}

/// Token reward for one epoch, given a storage share and the epoch's pool
pub fn token_reward(share: f64, monthly_pool: f64) -> f64 {
    monthly_pool * share
}

/// Run one epoch's reward pass over the whole population
///
/// Every participant receives `share * monthly_pool` appended to its reward
/// history (and the /30 daily equivalent). All participants are updated, not
/// just the reporting subject, so shares and totals stay consistent for the
/// growth step that follows.
pub fn distribute(
    pool: &mut ParticipantPool,
    total_storage_tb: f64,
    monthly_pool: f64,
    epoch: usize,
) -> Result<(), SimError> {
    if total_storage_tb == 0.0 {
        log::error!("epoch {}: total network storage is zero, aborting", epoch);
        return Err(SimError::ZeroNetworkStorage { epoch });
    }

    for participant in pool.iter_mut() {
        let share = storage_share(participant.storage_tb, total_storage_tb);
        participant.record_reward(token_reward(share, monthly_pool));
    }

    Ok(())
}
