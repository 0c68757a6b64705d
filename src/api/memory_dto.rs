use serde::{Deserialize, Serialize};

pub const DEFAULT_MEMORY_SIZE: i64 = 1_048_576;

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryConfigDto {
    #[serde(default = "default_size", alias = "tam")]
    pub size: i64,

    #[serde(default = "default_strategy", alias = "estrategia")]
    pub strategy: String,
}

impl Default for MemoryConfigDto {
    fn default() -> Self {
        MemoryConfigDto { size: default_size(), strategy: default_strategy() }
    }
}

/// One entry of the memory request batch.
///
/// `action` defaults to `"allocate"`, in which case `size` is required.
/// A `"free"` entry releases every block owned by `pid`.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRequestDto {
    pub pid: u32,

    #[serde(default, alias = "tam", skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(default = "default_action")]
    pub action: String,
}

fn default_size() -> i64 {
    DEFAULT_MEMORY_SIZE
}

fn default_strategy() -> String {
    "first-fit".to_string()
}

fn default_action() -> String {
    "allocate".to_string()
}
