use crate::api::simulation_dto::SimulationConfigDto;
use crate::error::Result;
use crate::loader::parser::parse_json_file;
use crate::simulation::{ConfigOverrides, SimulationConfig};

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod report;
pub mod simulation;

/// Loads and validates a simulation config file, applying `overrides` first.
pub fn load_config(file_path: &str, overrides: &ConfigOverrides) -> Result<SimulationConfig> {
    let mut dto: SimulationConfigDto = parse_json_file::<SimulationConfigDto>(file_path)?;
    log::info!("Config file '{}' parsed successfully.", file_path);

    overrides.apply(&mut dto);

    let config = SimulationConfig::from_dto(&dto)?;
    log::info!(
        "Config validated: {} processes, policy {}, {} memory requests ({}).",
        config.processes.len(),
        config.policy,
        config.memory_requests.len(),
        config.strategy
    );

    Ok(config)
}
