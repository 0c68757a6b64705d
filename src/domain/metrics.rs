use serde::Serialize;

use crate::domain::process::{Pid, ProcessRecord, Ticks};

/// Derived timings of one finished process. Column order matches the report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival: Ticks,
    pub service: Ticks,
    pub start: Ticks,
    pub finish: Ticks,
    pub response: Ticks,
    pub waiting: Ticks,
    pub turnaround: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub avg_response: f64,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,

    /// Finished processes per tick.
    pub throughput: f64,

    /// Latest finish tick over all processes.
    pub total_time: Ticks,
}

impl ProcessMetrics {
    /// Returns `None` for a record the engine never finished.
    pub fn from_record(record: &ProcessRecord) -> Option<Self> {
        let (start, finish) = (record.start?, record.finish?);

        debug_assert!(start >= record.arrival, "pid {}: negative response time", record.pid);
        debug_assert!(finish >= record.arrival + record.service, "pid {}: negative waiting time", record.pid);

        let response = start.saturating_sub(record.arrival);
        let turnaround = finish.saturating_sub(record.arrival);
        let waiting = turnaround.saturating_sub(record.service);

        Some(ProcessMetrics { pid: record.pid, arrival: record.arrival, service: record.service, start, finish, response, waiting, turnaround })
    }
}

/// Computes the per-process table (in the given order) and the aggregate summary.
///
/// An empty input yields zero averages and a throughput of 0.0.
pub fn summarize(completed: &[ProcessRecord]) -> (Vec<ProcessMetrics>, MetricsSummary) {
    let mut table = Vec::with_capacity(completed.len());

    for record in completed {
        match ProcessMetrics::from_record(record) {
            Some(row) => table.push(row),
            None => log::error!("pid {} reached the metrics calculator unfinished --> Signals an error in the scheduler engine.", record.pid),
        }
    }

    let summary = summarize_table(&table);
    (table, summary)
}

fn summarize_table(table: &[ProcessMetrics]) -> MetricsSummary {
    let count = table.len();
    let total_time = table.iter().map(|row| row.finish).max().unwrap_or(0);

    let mean = |field: fn(&ProcessMetrics) -> Ticks| -> f64 {
        if count == 0 {
            return 0.0;
        }
        table.iter().map(field).sum::<Ticks>() as f64 / count as f64
    };

    let throughput = if total_time == 0 { 0.0 } else { count as f64 / total_time as f64 };

    MetricsSummary {
        avg_response: mean(|row| row.response),
        avg_waiting: mean(|row| row.waiting),
        avg_turnaround: mean(|row| row.turnaround),
        throughput,
        total_time,
    }
}
