use serde::{Deserialize, Serialize};

use crate::api::memory_dto::{MemoryConfigDto, MemoryRequestDto};

/// Root of a simulation config file.
///
/// Keys of the Spanish-language config format are accepted as aliases
/// (`procesos`, `memoria`, `solicitudes_mem`, ...).
#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct SimulationConfigDto {
    #[serde(default)]
    pub cpu: CpuConfigDto,

    #[serde(default, alias = "procesos")]
    pub processes: Vec<ProcessDto>,

    #[serde(default, alias = "memoria")]
    pub memory: MemoryConfigDto,

    #[serde(default, alias = "memoryRequests", alias = "solicitudes_mem")]
    pub memory_requests: Vec<MemoryRequestDto>,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuConfigDto {
    #[serde(default = "default_algorithm", alias = "algoritmo")]
    pub algorithm: String,

    #[serde(default = "default_quantum")]
    pub quantum: i64,

    #[serde(default, alias = "context_switch")]
    pub context_switch: i64,
}

impl Default for CpuConfigDto {
    fn default() -> Self {
        CpuConfigDto { algorithm: default_algorithm(), quantum: default_quantum(), context_switch: 0 }
    }
}

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDto {
    pub pid: u32,

    #[serde(alias = "llegada")]
    pub arrival: i64,

    #[serde(alias = "servicio")]
    pub service: i64,
}

fn default_algorithm() -> String {
    "FCFS".to_string()
}

fn default_quantum() -> i64 {
    2
}
