//! Report assembly and aggregate statistics.
//!
//! Turns completed process records plus the recorded timeline into the
//! caller-visible [`SimulationOutcome`], and derives aggregate figures
//! from an outcome.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Makespan | completion of the last process |
//! | CPU utilization | busy time / makespan |
//! | Context switches | occupant changes across the execution sequence |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use crate::models::{Process, ProcessReport, SimulationOutcome, Timeline};

/// Builds the caller-visible outcome from completed processes.
///
/// Rows are ordered by original input position regardless of execution
/// or completion order.
pub(crate) fn build_outcome(processes: &[Process], timeline: Timeline) -> SimulationOutcome {
    let mut ordered: Vec<&Process> = processes.iter().collect();
    ordered.sort_by_key(|p| p.original_index);

    SimulationOutcome {
        results_table: ordered.into_iter().map(report_row).collect(),
        gantt_chart: timeline.into_segments(),
    }
}

fn report_row(process: &Process) -> ProcessReport {
    debug_assert!(process.is_completed());
    let start_time = process.start_time.unwrap_or(process.arrival_time);
    let completion_time = process
        .completion_time
        .unwrap_or(start_time + process.burst_time);
    let turnaround_time = completion_time - process.arrival_time;

    ProcessReport {
        id: process.id.clone(),
        arrival_time: process.arrival_time,
        burst_time: process.burst_time,
        priority: process.priority,
        start_time,
        completion_time,
        turnaround_time,
        waiting_time: turnaround_time - process.burst_time,
    }
}

/// Aggregate figures for one simulation run.
///
/// Derived entirely from a [`SimulationOutcome`]; never part of the wire
/// contract.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStats {
    /// Completion instant of the last process.
    pub makespan: i64,
    /// Total time the CPU executed processes.
    pub busy_time: i64,
    /// Total time the CPU sat idle.
    pub idle_time: i64,
    /// busy / makespan (0.0 for an empty run).
    pub cpu_utilization: f64,
    /// Mean turnaround time across processes.
    pub avg_turnaround_time: f64,
    /// Mean waiting time across processes.
    pub avg_waiting_time: f64,
    /// Number of times the CPU switched from one process to a different
    /// one (idle gaps between the two still count as one switch).
    pub context_switches: usize,
}

impl SimulationStats {
    /// Computes aggregate statistics from an outcome.
    pub fn calculate(outcome: &SimulationOutcome) -> Self {
        let makespan = outcome.makespan();
        let busy_time = outcome.busy_time();
        let count = outcome.process_count();

        let mean = |total: i64| {
            if count == 0 {
                0.0
            } else {
                total as f64 / count as f64
            }
        };
        let total_turnaround: i64 = outcome
            .results_table
            .iter()
            .map(|r| r.turnaround_time)
            .sum();
        let total_waiting: i64 = outcome.results_table.iter().map(|r| r.waiting_time).sum();

        let mut context_switches = 0;
        let mut previous: Option<&str> = None;
        for segment in outcome.gantt_chart.iter().filter(|s| !s.is_idle()) {
            if previous.is_some_and(|id| id != segment.id) {
                context_switches += 1;
            }
            previous = Some(&segment.id);
        }

        Self {
            makespan,
            busy_time,
            idle_time: makespan - busy_time,
            cpu_utilization: if makespan == 0 {
                0.0
            } else {
                busy_time as f64 / makespan as f64
            },
            avg_turnaround_time: mean(total_turnaround),
            avg_waiting_time: mean(total_waiting),
            context_switches,
        }
    }
}
