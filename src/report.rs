use colored::Colorize;
use std::fmt::Write as _;
use std::io::Write;

use crate::domain::memory::{MemoryRequest, RequestResult};
use crate::domain::metrics::{MetricsSummary, ProcessMetrics};
use crate::domain::scheduler::RunSlice;
use crate::error::Result;
use crate::simulation::{CpuReport, MemoryReport, SimulationReport};

/// Metrics table sorted by pid.
pub fn render_table(table: &[ProcessMetrics]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("{:>3} | {:>7} | {:>7} | {:>6} | {:>6} | {:>8} | {:>7} | {:>10}", "PID", "Arrival", "Service", "Start", "Finish", "Response", "Waiting", "Turnaround")
            .bold()
    );
    let _ = writeln!(out, "{}", "-".repeat(79));

    let mut rows: Vec<&ProcessMetrics> = table.iter().collect();
    rows.sort_by_key(|row| row.pid);

    for row in rows {
        let _ = writeln!(
            out,
            "{:>3} | {:>7} | {:>7} | {:>6} | {:>6} | {:>8} | {:>7} | {:>10}",
            row.pid, row.arrival, row.service, row.start, row.finish, row.response, row.waiting, row.turnaround
        );
    }
    out
}

pub fn render_summary(summary: &MetricsSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "Summary:".bold());
    let _ = writeln!(out, "{:<16}: {:.2}", "Avg response", summary.avg_response);
    let _ = writeln!(out, "{:<16}: {:.2}", "Avg waiting", summary.avg_waiting);
    let _ = writeln!(out, "{:<16}: {:.2}", "Avg turnaround", summary.avg_turnaround);
    let _ = writeln!(out, "{:<16}: {:.2}", "Throughput", summary.throughput);
    let _ = writeln!(out, "{:<16}: {}", "Total time", summary.total_time);
    out
}

/// One line per dispatch, e.g. `[0-2) P1`.
pub fn render_timeline(timeline: &[RunSlice]) -> String {
    timeline.iter().map(|slice| format!("[{}-{}) P{}", slice.start, slice.end, slice.pid)).collect::<Vec<_>>().join(" ")
}

pub fn render_cpu(report: &CpuReport) -> String {
    let mut out = format!("{} {}\n\n", "CPU scheduling:".bold(), report.policy);
    out.push_str(&render_table(&report.table));
    out.push_str(&render_summary(&report.summary));
    let _ = writeln!(out, "{:<16}: {}", "Context switches", report.context_switches);
    let _ = writeln!(out, "{:<16}: {}", "Idle ticks", report.idle_ticks);
    let _ = writeln!(out, "\n{}\n{}", "Timeline:".bold(), render_timeline(&report.timeline));
    out
}

pub fn render_memory(report: &MemoryReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} (strategy: {}, size: {})", "Memory allocation".bold(), report.strategy, report.total_size);
    let _ = writeln!(out, "{}", format!("{:>3} | {:>9} | {:>13} | {:>10}", "PID", "Size", "Block start", "Block size").bold());
    let _ = writeln!(out, "{}", "-".repeat(45));

    for outcome in &report.outcomes {
        let line = match (outcome.request, outcome.result) {
            (MemoryRequest::Allocate { pid, size }, RequestResult::Allocated(allocation)) => {
                format!("{:>3} | {:>9} | {:>13} | {:>10}", pid, size, allocation.block_start, allocation.block_size)
            }
            (MemoryRequest::Allocate { pid, size }, _) => format!("{:>3} | {:>9} | {:>13} | {:>10}", pid, size, "not found".red(), "-"),
            (MemoryRequest::Free { pid }, RequestResult::Freed) => format!("{:>3} | {:>9} | {:>13} | {:>10}", pid, "free", "released", "-"),
            (MemoryRequest::Free { pid }, _) => format!("{:>3} | {:>9} | {:>13} | {:>10}", pid, "free", "nothing owned".yellow(), "-"),
        };
        let _ = writeln!(out, "{}", line);
    }

    let _ = writeln!(out, "\n{:<16}: {}", "Free space", report.free_space);
    let _ = writeln!(out, "{:<16}: {:.2}", "Fragmentation", report.fragmentation);
    out
}

pub fn render(report: &SimulationReport) -> String {
    let mut out = render_cpu(&report.cpu);
    out.push_str(&render_memory(&report.memory));
    out
}

/// One summary line per policy for the `compare` command.
pub fn render_comparison(reports: &[CpuReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("{:<16} | {:>8} | {:>8} | {:>10} | {:>10} | {:>6}", "Policy", "Response", "Waiting", "Turnaround", "Throughput", "Total").bold()
    );
    let _ = writeln!(out, "{}", "-".repeat(74));
    for report in reports {
        let s = &report.summary;
        let _ = writeln!(
            out,
            "{:<16} | {:>8.2} | {:>8.2} | {:>10.2} | {:>10.3} | {:>6}",
            report.policy.to_string(),
            s.avg_response,
            s.avg_waiting,
            s.avg_turnaround,
            s.throughput,
            s.total_time
        );
    }
    out
}

/// Writes the metrics table as `;`-separated CSV, sorted by pid.
pub fn write_csv<W: Write>(writer: W, table: &[ProcessMetrics]) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    let mut rows: Vec<&ProcessMetrics> = table.iter().collect();
    rows.sort_by_key(|row| row.pid);
    for row in rows {
        csv_wtr.serialize(row)?;
    }

    csv_wtr.flush()?;
    Ok(())
}
