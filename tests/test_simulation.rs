use os_sim::api::simulation_dto::SimulationConfigDto;
use os_sim::domain::memory::{Allocation, AllocationStrategy, RequestResult};
use os_sim::domain::scheduler::{PolicyKind, SchedulingPolicy};
use os_sim::error::{Error, InputError, ParameterError};
use os_sim::load_config;
use os_sim::loader::parser::parse_json_str;
use os_sim::report;
use os_sim::simulation::{ConfigOverrides, SimulationConfig, compare_policies, run_simulation};

fn fixture_path() -> String {
    format!("{}/tests/data/sample_config.json", env!("CARGO_MANIFEST_DIR"))
}

fn config_from(json: &str) -> Result<SimulationConfig, Error> {
    let dto: SimulationConfigDto = parse_json_str(json)?;
    SimulationConfig::from_dto(&dto)
}

#[test]
fn test_load_fixture_with_spanish_keys() {
    let config = load_config(&fixture_path(), &ConfigOverrides::default()).unwrap();

    assert_eq!(config.policy, SchedulingPolicy::RoundRobin { quantum: 2 });
    assert_eq!(config.strategy, AllocationStrategy::BestFit);
    assert_eq!(config.memory_size, 100);
    assert_eq!(config.processes.len(), 3);
    assert_eq!(config.memory_requests.len(), 6);
}

#[test]
fn test_documented_snake_case_keys_run_end_to_end() {
    let config = config_from(
        r#"{
            "cpu": { "algorithm": "RR", "quantum": 2, "context_switch": 1 },
            "processes": [ { "pid": 1, "arrival": 0, "service": 5 }, { "pid": 2, "arrival": 1, "service": 3 } ],
            "memory": { "size": 100, "strategy": "first-fit" },
            "memory_requests": [ { "pid": 1, "size": 30 }, { "pid": 2, "size": 50 } ]
        }"#,
    )
    .unwrap();

    assert_eq!(config.context_switch, 1);
    assert_eq!(config.memory_requests.len(), 2);

    let sim_report = run_simulation(&config).unwrap();
    let allocations: Vec<Allocation> = sim_report.memory.outcomes.iter().filter_map(|o| o.allocation()).collect();
    assert_eq!(allocations, vec![Allocation { block_start: 0, block_size: 30 }, Allocation { block_start: 30, block_size: 50 }]);
    assert_eq!(sim_report.memory.free_space, 20);
}

#[test]
fn test_run_fixture() {
    let config = load_config(&fixture_path(), &ConfigOverrides::default()).unwrap();
    let report = run_simulation(&config).unwrap();

    assert_eq!(report.cpu.summary.total_time, 16);
    assert_eq!(report.cpu.table.len(), 3);

    let results: Vec<RequestResult> = report.memory.outcomes.iter().map(|o| o.result).collect();
    assert_eq!(results[3], RequestResult::Freed);
    assert_eq!(results[4], RequestResult::Allocated(Allocation { block_start: 30, block_size: 40 }));
    assert_eq!(results[5], RequestResult::NotFound);
    assert_eq!(report.memory.free_space, 20);
}

#[test]
fn test_overrides_replace_config_values() {
    let overrides = ConfigOverrides { algorithm: Some("spn".to_string()), strategy: Some("first-fit".to_string()), ..ConfigOverrides::default() };
    let config = load_config(&fixture_path(), &overrides).unwrap();

    assert_eq!(config.policy, SchedulingPolicy::Spn);
    assert_eq!(config.strategy, AllocationStrategy::FirstFit);
}

#[test]
fn test_defaults_for_missing_sections() {
    let config = config_from(r#"{ "processes": [ { "pid": 1, "arrival": 0, "service": 1 } ] }"#).unwrap();

    assert_eq!(config.policy, SchedulingPolicy::Fcfs);
    assert_eq!(config.context_switch, 0);
    assert_eq!(config.memory_size, 1_048_576);
    assert_eq!(config.strategy, AllocationStrategy::FirstFit);
    assert!(config.memory_requests.is_empty());
}

#[test]
fn test_duplicate_pid_is_rejected() {
    let result = config_from(r#"{ "processes": [ { "pid": 1, "arrival": 0, "service": 1 }, { "pid": 1, "arrival": 3, "service": 2 } ] }"#);
    assert!(matches!(result, Err(Error::InvalidInput(InputError::DuplicatePid(1)))));
}

#[test]
fn test_negative_arrival_and_empty_service_are_rejected() {
    let negative = config_from(r#"{ "processes": [ { "pid": 1, "arrival": -1, "service": 1 } ] }"#);
    assert!(matches!(negative, Err(Error::InvalidInput(InputError::NegativeArrival { pid: 1, arrival: -1 }))));

    let empty = config_from(r#"{ "processes": [ { "pid": 2, "arrival": 0, "service": 0 } ] }"#);
    assert!(matches!(empty, Err(Error::InvalidInput(InputError::InvalidService { pid: 2, service: 0 }))));
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let policy = config_from(r#"{ "cpu": { "algorithm": "lottery" } }"#);
    assert!(matches!(policy, Err(Error::InvalidParameter(ParameterError::UnknownPolicy(_)))));

    let quantum = config_from(r#"{ "cpu": { "algorithm": "RR", "quantum": 1 } }"#);
    assert!(matches!(quantum, Err(Error::InvalidParameter(ParameterError::InvalidQuantum(1)))));

    let strategy = config_from(r#"{ "memory": { "strategy": "worst-fit" } }"#);
    assert!(matches!(strategy, Err(Error::InvalidParameter(ParameterError::UnknownStrategy(_)))));

    let context_switch = config_from(r#"{ "cpu": { "contextSwitch": -2 } }"#);
    assert!(matches!(context_switch, Err(Error::InvalidParameter(ParameterError::InvalidContextSwitch(-2)))));
}

#[test]
fn test_quantum_is_ignored_for_non_preemptive_policies() {
    let config = config_from(r#"{ "cpu": { "algorithm": "FCFS", "quantum": 0 } }"#).unwrap();
    assert_eq!(config.policy, SchedulingPolicy::Fcfs);
}

#[test]
fn test_invalid_memory_requests_are_rejected() {
    let size = config_from(r#"{ "memory": { "size": 0 } }"#);
    assert!(matches!(size, Err(Error::InvalidInput(InputError::InvalidMemorySize(0)))));

    let request = config_from(r#"{ "memoryRequests": [ { "pid": 1, "size": 0 } ] }"#);
    assert!(matches!(request, Err(Error::InvalidInput(InputError::InvalidRequestSize { pid: 1, size: 0 }))));

    let missing = config_from(r#"{ "memoryRequests": [ { "pid": 3 } ] }"#);
    assert!(matches!(missing, Err(Error::InvalidInput(InputError::MissingRequestSize(3)))));

    let action = config_from(r#"{ "memoryRequests": [ { "pid": 3, "action": "compact" } ] }"#);
    assert!(matches!(action, Err(Error::InvalidParameter(ParameterError::UnknownAction(_)))));
}

#[test]
fn test_malformed_json() {
    let result = config_from(r#"{ "processes": [ { "pid": 1 "#);
    assert!(matches!(result, Err(Error::DeserializationError(_))));
}

#[test]
fn test_missing_file() {
    let result = load_config("does/not/exist.json", &ConfigOverrides::default());
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_compare_policies_runs_all_three() {
    let config = load_config(&fixture_path(), &ConfigOverrides::default()).unwrap();
    let reports = compare_policies(&config).unwrap();

    let kinds: Vec<PolicyKind> = reports.iter().map(|r| r.policy.kind()).collect();
    assert_eq!(kinds, vec![PolicyKind::Fcfs, PolicyKind::Spn, PolicyKind::RoundRobin]);
    assert_eq!(reports[2].policy, SchedulingPolicy::RoundRobin { quantum: 2 });

    for r in &reports {
        assert_eq!(r.summary.total_time, 16);
        assert_eq!(r.table.len(), 3);
    }
}

#[test]
fn test_rendered_report_and_csv() {
    colored::control::set_override(false);

    let config = load_config(&fixture_path(), &ConfigOverrides::default()).unwrap();
    let sim_report = run_simulation(&config).unwrap();

    let text = report::render(&sim_report);
    assert!(text.contains("RR (quantum 2)"));
    assert!(text.contains("not found"));
    assert!(text.contains("[0-2) P1"));

    let mut buffer = Vec::new();
    report::write_csv(&mut buffer, &sim_report.cpu.table).unwrap();
    let csv = String::from_utf8(buffer).unwrap();
    let mut lines = csv.lines();

    assert_eq!(lines.next(), Some("pid;arrival;service;start;finish;response;waiting;turnaround"));
    assert_eq!(lines.next(), Some("1;0;5;0;12;0;7;12"));
}
