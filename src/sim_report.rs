// Report Builder - dashboard-facing chart and table payloads
//
// Consumes only the resolved configuration and the final time series; has no
// bearing on simulation correctness.

use crate::sim_config::SimulationConfig;
use crate::sim_runner::SimulationResult;
use serde::Serialize;

/// Monthly token value drift assumed by the dashboard projections
const TOKEN_VALUE_STEP: f64 = 0.01;

// ============================================================================
// Chart payloads
// ============================================================================

/// One labeled line on a dashboard chart
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChartSeries {
    fn line(x: Vec<f64>, y: Vec<f64>, name: Option<&str>) -> Self {
        Self {
            x,
            y,
            kind: "line".to_string(),
            name: name.map(str::to_string),
        }
    }
}

/// Chart payload in the shape the dashboard expects: `{"data": [series...]}`
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload {
    pub data: Vec<ChartSeries>,
}

/// All charts surfaced on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct Plots {
    /// Population size at the start of each month
    pub participant_plot: ChartPayload,

    /// Total network storage at the start of each month
    pub network_storage_plot: ChartPayload,

    /// Subject's monthly mined tokens plus the accumulated balance
    pub token_accum_plot: ChartPayload,

    /// Subject's monthly reward converted at the drifting token value
    pub reward_in_usd_plot: ChartPayload,

    /// Accumulated balance valued at the initial and the drifting token value
    pub cumulative_value_plot: ChartPayload,
}

// ============================================================================
// Tables
// ============================================================================

/// One row of the per-month network table
#[derive(Debug, Clone, Serialize)]
pub struct NetworkTableRow {
    pub month: usize,
    pub participants: usize,
    pub total_storage_tb: f64,
    pub subject_reward: f64,
    pub subject_reward_usd: f64,
}

/// One row of the storage breakdown table (whole-TB buckets)
#[derive(Debug, Clone, Serialize)]
pub struct StorageTableRow {
    pub bucket_tb: usize,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tables {
    pub network_table: Vec<NetworkTableRow>,
    pub storage_table: Vec<StorageTableRow>,
}

// ============================================================================
// Subject economics
// ============================================================================

/// Year-end cost/earnings figures for the reporting subject
#[derive(Debug, Clone, Serialize)]
pub struct SubjectStats {
    /// Power cost over the horizon
    pub power_cost: f64,

    /// Cloud storage spend avoided over the horizon
    pub cloud_storage_savings: f64,

    pub avg_tokens_per_day: f64,
    pub total_mined_tokens: f64,

    /// Mined tokens valued at the initial token value
    pub end_of_horizon_value: f64,

    /// (end-of-horizon value - power cost) + cloud savings
    pub net_profit: f64,
}

// ============================================================================
// Bundle
// ============================================================================

/// The full dashboard document
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    pub time_in_months: usize,
    pub avg_active_participants: f64,
    pub monthly_token_pool: f64,
    pub token_value: f64,
    pub growth_rate: f64,
    pub subject_stats: SubjectStats,
    pub plots: Plots,
    pub tables: Tables,
}

/// Shape the final time series into the dashboard document
pub fn build_report(config: &SimulationConfig, result: &SimulationResult) -> ReportBundle {
    let horizon = result.epochs;
    let token_value = config.global.token_value;

    let months: Vec<f64> = (1..=horizon).map(|m| m as f64).collect();

    // projected token value per month: initial value plus a fixed monthly drift
    let token_values: Vec<f64> = (0..horizon)
        .map(|i| token_value + TOKEN_VALUE_STEP * i as f64)
        .collect();

    let cumulative_rewards: Vec<f64> = result
        .subject_rewards
        .iter()
        .scan(0.0, |acc, r| {
            *acc += r;
            Some(*acc)
        })
        .collect();

    let usd_rewards: Vec<f64> = result
        .subject_rewards
        .iter()
        .zip(&token_values)
        .map(|(reward, value)| reward * value)
        .collect();

    let cumulative_value: Vec<f64> = cumulative_rewards
        .iter()
        .zip(&token_values)
        .map(|(tokens, value)| tokens * value)
        .collect();

    let cumulative_value_initial: Vec<f64> = cumulative_rewards
        .iter()
        .map(|tokens| tokens * token_value)
        .collect();

    // population at the start of each month, aligned with the storage snapshots
    let start_of_month_counts: Vec<f64> = result.monthly_participants[..horizon]
        .iter()
        .map(|c| *c as f64)
        .collect();

    let plots = Plots {
        participant_plot: ChartPayload {
            data: vec![ChartSeries::line(
                months.clone(),
                start_of_month_counts,
                Some("Participants"),
            )],
        },
        network_storage_plot: ChartPayload {
            data: vec![ChartSeries::line(
                months.clone(),
                result.monthly_storage.clone(),
                Some("Network Storage (TB)"),
            )],
        },
        token_accum_plot: ChartPayload {
            data: vec![
                ChartSeries::line(
                    months.clone(),
                    result.subject_rewards.clone(),
                    Some("Mined Rewards"),
                ),
                ChartSeries::line(
                    months.clone(),
                    cumulative_rewards.clone(),
                    Some("Accumulated Tokens"),
                ),
            ],
        },
        reward_in_usd_plot: ChartPayload {
            data: vec![ChartSeries::line(months.clone(), usd_rewards, None)],
        },
        cumulative_value_plot: ChartPayload {
            data: vec![
                ChartSeries::line(
                    months.clone(),
                    cumulative_value_initial,
                    Some("At Initial Value"),
                ),
                ChartSeries::line(months, cumulative_value, Some("At Projected Value")),
            ],
        },
    };

    let network_table = (1..=horizon)
        .map(|month| NetworkTableRow {
            month,
            participants: result.monthly_participants[month],
            total_storage_tb: result.monthly_storage[month - 1],
            subject_reward: result.subject_rewards[month - 1],
            subject_reward_usd: result.subject_rewards[month - 1] * token_values[month - 1],
        })
        .collect();

    let storage_table = result
        .storage_histogram
        .iter()
        .enumerate()
        .map(|(bucket_tb, count)| StorageTableRow {
            bucket_tb,
            count: *count,
        })
        .collect();

    let total_mined_tokens = result.subject_total_rewards();
    let end_of_horizon_value = total_mined_tokens * token_value;
    let power_cost = config.user.avg_power_cost * horizon as f64;
    let cloud_storage_savings = config.user.avg_monthly_storage_cost * horizon as f64;
    let daily_total: f64 = result.subject_daily_rewards.iter().sum();

    let subject_stats = SubjectStats {
        power_cost,
        cloud_storage_savings,
        avg_tokens_per_day: daily_total / horizon as f64,
        total_mined_tokens,
        end_of_horizon_value,
        net_profit: (end_of_horizon_value - power_cost) + cloud_storage_savings,
    };

    ReportBundle {
        time_in_months: horizon,
        avg_active_participants: average_participants(&result.monthly_participants),
        monthly_token_pool: config.growth.monthly_token_pool,
        token_value,
        growth_rate: config.growth.rate,
        subject_stats,
        plots,
        tables: Tables {
            network_table,
            storage_table,
        },
    }
}

/// Mean of the monthly population series, rounded to one decimal
fn average_participants(monthly_participants: &[usize]) -> f64 {
    if monthly_participants.is_empty() {
        return 0.0;
    }
    let sum: usize = monthly_participants.iter().sum();
    let avg = sum as f64 / monthly_participants.len() as f64;
    (avg * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim_runner::SimulationRunner;

    fn run_default() -> (SimulationConfig, SimulationResult) {
        let mut config = SimulationConfig::default();
        config.seed = Some([42u8; 32]);
        let result = SimulationRunner::new(config.clone()).unwrap().run().unwrap();
        (config, result)
    }

    #[test]
    fn test_chart_series_lengths_match_horizon() {
        let (config, result) = run_default();
        let report = build_report(&config, &result);

        for payload in [
            &report.plots.participant_plot,
            &report.plots.network_storage_plot,
            &report.plots.token_accum_plot,
            &report.plots.reward_in_usd_plot,
            &report.plots.cumulative_value_plot,
        ] {
            for series in &payload.data {
                assert_eq!(series.x.len(), 12);
                assert_eq!(series.y.len(), 12);
            }
        }
        assert_eq!(report.tables.network_table.len(), 12);
        assert_eq!(report.tables.storage_table.len(), 11);
    }

    #[test]
    fn test_net_profit_arithmetic() {
        let (config, result) = run_default();
        let report = build_report(&config, &result);
        let stats = &report.subject_stats;

        assert_eq!(stats.power_cost, 5.0 * 12.0);
        assert_eq!(stats.cloud_storage_savings, 30.0 * 12.0);
        let expected =
            (stats.end_of_horizon_value - stats.power_cost) + stats.cloud_storage_savings;
        assert!((stats.net_profit - expected).abs() < 1e-9);
    }

    #[test]
    fn test_accumulated_series_is_running_total() {
        let (config, result) = run_default();
        let report = build_report(&config, &result);

        let accum = &report.plots.token_accum_plot.data[1].y;
        let monthly = &report.plots.token_accum_plot.data[0].y;

        let mut running = 0.0;
        for (total, reward) in accum.iter().zip(monthly) {
            running += reward;
            assert!((total - running).abs() < 1e-6);
        }
        assert!((accum[11] - result.subject_total_rewards()).abs() < 1e-6);
    }

    #[test]
    fn test_cumulative_value_plot_carries_both_valuations() {
        let (config, result) = run_default();
        let report = build_report(&config, &result);

        let data = &report.plots.cumulative_value_plot.data;
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].name.as_deref(), Some("At Initial Value"));
        assert_eq!(data[1].name.as_deref(), Some("At Projected Value"));

        let accum = &report.plots.token_accum_plot.data[1].y;
        for (i, tokens) in accum.iter().enumerate() {
            let at_initial = tokens * config.global.token_value;
            assert!((data[0].y[i] - at_initial).abs() < 1e-6);

            let drifting = config.global.token_value + 0.01 * i as f64;
            assert!((data[1].y[i] - tokens * drifting).abs() < 1e-6);
        }
    }

    #[test]
    fn test_report_serializes_to_json() {
        let (config, result) = run_default();
        let report = build_report(&config, &result);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["plots"]["network_storage_plot"]["data"][0]["type"] == "line");
        assert_eq!(json["time_in_months"], 12);
    }

    #[test]
    fn test_average_participants_rounds_to_one_decimal() {
        assert_eq!(average_participants(&[1, 2]), 1.5);
        assert_eq!(average_participants(&[10, 10, 11]), 10.3);
        assert_eq!(average_participants(&[]), 0.0);
    }
}
