//! Built-in dispatching comparators.
//!
//! One unit struct per comparator policy. All keys follow the shared
//! convention: lower key = runs first.

use super::SelectionRule;
use crate::models::Process;

/// First-Come-First-Served.
///
/// Orders by arrival time alone; burst and priority are irrelevant to
/// selection. Non-preemptive.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl SelectionRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn key(&self, process: &Process) -> i64 {
        process.arrival_time
    }
}

/// Shortest-Job-First.
///
/// Orders by total burst time. Non-preemptive: once selected, a process
/// keeps the CPU to completion.
///
/// # Reference
/// Optimal for mean waiting time among non-preemptive policies
/// (Silberschatz et al. 2018, §5.3.2).
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl SelectionRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn key(&self, process: &Process) -> i64 {
        process.burst_time
    }
}

/// Shortest-Remaining-Time-First.
///
/// Orders by remaining (not total) burst time; the preemptive driver
/// re-evaluates at every arrival, so a newly arrived shorter process
/// preempts the current one.
#[derive(Debug, Clone, Copy)]
pub struct Srtf;

impl SelectionRule for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn key(&self, process: &Process) -> i64 {
        process.remaining_time
    }
}

/// Priority dispatching, lower number = higher priority.
///
/// Shared by the non-preemptive and preemptive priority policies; the
/// driver decides preemption. A process without a priority sorts last —
/// validation rejects such input before a priority policy runs.
#[derive(Debug, Clone, Copy)]
pub struct PriorityRule;

impl SelectionRule for PriorityRule {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn key(&self, process: &Process) -> i64 {
        process.priority.unwrap_or(i64::MAX)
    }
}
