pub mod memory_dto;
pub mod simulation_dto;
