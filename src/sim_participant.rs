// Participant arena for the storage network simulation

use indexmap::IndexMap;

/// Days in one simulated month (epoch), used for daily reward conversion
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Stable handle for a participant in the pool
///
/// Assigned from a per-pool counter, so handles are unique within a run and
/// deterministic under a fixed seed. Handles stay valid for the whole run
/// (participants are never removed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub u64);

/// One network storage contributor
///
/// Storage is fixed at creation; the share and reward histories are updated
/// each epoch by the reward pass and the share recompute.
#[derive(Debug, Clone)]
pub struct Participant {
    /// Stable identity within the run
    pub id: ParticipantId,

    /// Storage contributed to the network (TB), never mutated after creation
    pub storage_tb: f64,

    /// Fraction of total network storage at the last recompute, in [0, 1]
    pub storage_share: f64,

    /// Token reward earned each epoch, one entry per completed epoch
    pub rewards: Vec<f64>,

    /// Per-day reward for each epoch (epoch reward / 30)
    pub daily_rewards: Vec<f64>,
}

impl Participant {
    fn new(id: ParticipantId, storage_tb: f64) -> Self {
        debug_assert!(storage_tb >= 0.0);
        Self {
            id,
            storage_tb,
            storage_share: 0.0,
            rewards: Vec::new(),
            daily_rewards: Vec::new(),
        }
    }

    /// Append one epoch's reward, keeping both histories in lockstep
    pub fn record_reward(&mut self, reward: f64) {
        self.rewards.push(reward);
        self.daily_rewards.push(reward / DAYS_PER_MONTH);
    }

    /// Total tokens earned over all completed epochs
    pub fn total_rewards(&self) -> f64 {
        self.rewards.iter().sum()
    }
}

/// Arena of all participants in the network
///
/// Insertion order is creation order and is preserved for deterministic epoch
/// processing. Participants are referenced by `ParticipantId` handle rather
/// than by position or pointer identity.
#[derive(Debug, Clone, Default)]
pub struct ParticipantPool {
    participants: IndexMap<ParticipantId, Participant>,
    next_id: u64,
}

impl ParticipantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new participant with the given storage and return its handle
    pub fn add(&mut self, storage_tb: f64) -> ParticipantId {
        let id = ParticipantId(self.next_id);
        self.next_id += 1;
        self.participants.insert(id, Participant::new(id, storage_tb));
        id
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterate participants in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Participant> {
        self.participants.values_mut()
    }

    /// Total network storage (TB), recomputed from scratch on every call
    ///
    /// Deliberately not cached: the sum must always reflect the current
    /// population, including participants added by the most recent growth step.
    pub fn total_storage(&self) -> f64 {
        self.participants.values().map(|p| p.storage_tb).sum()
    }

    /// Rewrite every participant's storage share against the given total
    pub fn recompute_shares(&mut self, total_storage: f64) {
        for participant in self.participants.values_mut() {
            participant.storage_share = participant.storage_tb / total_storage;
        }
    }
}
