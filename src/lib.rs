//! # Storage Network Reward Simulator
//!
//! Models the growth of a distributed storage network's participant pool and
//! the distribution of a fixed monthly token reward pool among participants
//! over a planning horizon, producing projected earnings/cost figures for a
//! single representative participant (the "subject").
//!
//! ## Core Components
//!
//! - **ParticipantPool**: ordered arena of network contributors with stable
//!   handles ([`sim_participant`])
//! - **CapacityAllocator**: randomized bin-filling of new capacity into
//!   heterogeneous participant sizes ([`sim_allocator`])
//! - **Growth Model**: percentage-based monthly capacity delta ([`sim_growth`])
//! - **Reward Distributor**: per-epoch reward pass proportional to storage
//!   share ([`sim_rewards`])
//! - **SimulationRunner**: epoch loop producing the final time series
//!   ([`sim_runner`])
//!
//! The [`sim_report`] module shapes the final time series into the chart and
//! table payloads the dashboard consumes; it has no effect on the simulation
//! itself.
//!
//! ## Usage
//!
//! ```
//! use reward_sim::{SimulationConfig, SimulationRunner};
//!
//! let mut config = SimulationConfig::default();
//! config.seed = Some([7u8; 32]); // omit for a random seed
//!
//! let runner = SimulationRunner::new(config).unwrap();
//! let result = runner.run().unwrap();
//!
//! assert_eq!(result.subject_rewards.len(), 12);
//! ```
//!
//! Runs are stochastic by design; fix the seed for reproducible trajectories.

pub mod sim_allocator;
pub mod sim_config;
pub mod sim_growth;
pub mod sim_participant;
pub mod sim_report;
pub mod sim_rewards;
pub mod sim_runner;

// Re-export commonly used types
pub use sim_allocator::CapacityAllocator;
pub use sim_config::{ConfigError, GlobalParams, GrowthParams, SimulationConfig, UserEconomics};
pub use sim_growth::capacity_delta;
pub use sim_participant::{Participant, ParticipantId, ParticipantPool, DAYS_PER_MONTH};
pub use sim_report::{build_report, ReportBundle};
pub use sim_rewards::SimError;
pub use sim_runner::{SimulationResult, SimulationRunner};
