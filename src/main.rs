// Default-scenario entry point
//
// Runs the simulation with the fail-safe configuration and prints the
// dashboard tables as JSON.

use log::info;
use simple_logger::SimpleLogger;

use reward_sim::{build_report, SimulationConfig, SimulationRunner};

fn main() {
    SimpleLogger::new().init().unwrap();

    info!("starting storage network reward simulation");

    let config = SimulationConfig::default();

    let runner = SimulationRunner::new(config.clone()).unwrap_or_else(|e| {
        eprintln!("invalid configuration: {}", e);
        std::process::exit(1);
    });

    let result = runner.run().unwrap_or_else(|e| {
        eprintln!("simulation failed: {}", e);
        std::process::exit(1);
    });

    result.print_summary();

    let report = build_report(&config, &result);

    let network_table = serde_json::to_string_pretty(&report.tables.network_table)
        .expect("report tables serialize");
    let storage_table = serde_json::to_string_pretty(&report.tables.storage_table)
        .expect("report tables serialize");

    println!("=== Network Table ===\n{}", network_table);
    println!("=== Storage Breakdown ===\n{}", storage_table);

    info!("simulation complete");
}
