// Simulation Configuration

use std::fmt;

// ============================================================================
// Configuration sections
// ============================================================================

/// Full configuration for one simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Planning horizon and currency context
    pub global: GlobalParams,

    /// Cost baselines for the reporting subject's economics
    pub user: UserEconomics,

    /// Network growth and reward pool parameters
    pub growth: GrowthParams,

    /// Random seed for reproducibility (filled from the OS when absent)
    pub seed: Option<[u8; 32]>,
}

/// Global run parameters
#[derive(Debug, Clone)]
pub struct GlobalParams {
    /// Planning horizon in months (epochs)
    pub horizon_months: usize,

    /// Token value in external currency at the start of the run
    pub token_value: f64,
}

/// Cost baselines consumed by the reporting layer only
#[derive(Debug, Clone)]
pub struct UserEconomics {
    /// Average monthly cloud storage cost the subject avoids
    pub avg_monthly_storage_cost: f64,

    /// Average monthly power cost of running the subject's hardware
    pub avg_power_cost: f64,
}

/// Network growth and reward parameters
#[derive(Debug, Clone)]
pub struct GrowthParams {
    /// Monthly capacity growth rate (fraction, >= 0)
    pub rate: f64,

    /// Initial total storage capacity of the network (TB)
    pub storage_cap_tb: f64,

    /// Tokens distributed each month across the whole network
    pub monthly_token_pool: f64,

    /// Storage contributed by the reporting subject (TB, > 0)
    pub subject_storage_tb: f64,
}

// ============================================================================
// Defaults (the fail-safe configuration)
// ============================================================================

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            global: GlobalParams::default(),
            user: UserEconomics::default(),
            growth: GrowthParams::default(),
            seed: None,
        }
    }
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            horizon_months: 12,
            token_value: 0.06,
        }
    }
}

impl Default for UserEconomics {
    fn default() -> Self {
        Self {
            avg_monthly_storage_cost: 30.0,
            avg_power_cost: 5.0,
        }
    }
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            rate: 0.1,
            storage_cap_tb: 1000.0,
            monthly_token_pool: 10e6,
            subject_storage_tb: 1.0,
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Out-of-domain configuration values
///
/// Raised before any simulation state exists; a run never starts from a bad
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Horizon must be at least one month
    ZeroHorizon,

    /// Growth rate must be >= 0 (attrition is not modeled)
    NegativeGrowthRate,

    /// Monthly token pool must be >= 0
    NegativeTokenPool,

    /// Storage cap must be >= 0
    NegativeStorageCap,

    /// Subject storage must be > 0 so its share stays well defined
    NonPositiveSubjectStorage,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroHorizon => write!(f, "horizon must be at least 1 month"),
            ConfigError::NegativeGrowthRate => write!(f, "growth rate must be >= 0"),
            ConfigError::NegativeTokenPool => write!(f, "monthly token pool must be >= 0"),
            ConfigError::NegativeStorageCap => write!(f, "storage cap must be >= 0"),
            ConfigError::NonPositiveSubjectStorage => {
                write!(f, "subject storage must be > 0 TB")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl SimulationConfig {
    /// Check every parameter is in its modeled domain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.global.horizon_months == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if self.growth.rate < 0.0 {
            return Err(ConfigError::NegativeGrowthRate);
        }
        if self.growth.monthly_token_pool < 0.0 {
            return Err(ConfigError::NegativeTokenPool);
        }
        if self.growth.storage_cap_tb < 0.0 {
            return Err(ConfigError::NegativeStorageCap);
        }
        if self.growth.subject_storage_tb <= 0.0 {
            return Err(ConfigError::NonPositiveSubjectStorage);
        }
        Ok(())
    }

    /// One-line summary for logs and result headers
    pub fn summary(&self) -> String {
        format!(
            "horizon={}mo rate={} cap={}TB subject={}TB pool={}",
            self.global.horizon_months,
            self.growth.rate,
            self.growth.storage_cap_tb,
            self.growth.subject_storage_tb,
            self.growth.monthly_token_pool,
        )
    }
}
