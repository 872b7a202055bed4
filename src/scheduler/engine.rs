//! Simulation drivers for the comparator policies.
//!
//! Both drivers advance a logical clock over the same skeleton: compute
//! the ready set, idle up to the next arrival when it is empty, otherwise
//! dispatch the policy's choice and record the run on the timeline. They
//! differ only in how far a choice runs — to completion, or to the next
//! preemption boundary.

use std::error::Error;
use std::fmt;

use log::{debug, warn};

use crate::dispatching::{self, SelectionRule};
use crate::models::{Process, Timeline};

/// Internal invariant violation: the clock cannot advance.
///
/// Raised when incomplete processes remain but none is ready and none
/// will ever arrive. Validated input cannot reach this state; hitting it
/// signals a logic defect or input that evaded validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationError {
    /// Human-readable description.
    pub message: String,
}

impl SimulationError {
    pub(crate) fn stalled(clock: i64) -> Self {
        warn!("ready set empty with no future arrival at t={clock}; aborting run");
        Self {
            message: format!(
                "simulation stalled at t={clock}: incomplete processes remain but none can run"
            ),
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for SimulationError {}

/// Earliest arrival strictly after `clock` among incomplete processes.
pub(crate) fn next_arrival_after(processes: &[Process], clock: i64) -> Option<i64> {
    processes
        .iter()
        .filter(|p| !p.is_completed() && p.arrival_time > clock)
        .map(|p| p.arrival_time)
        .min()
}

/// Runs a non-preemptive policy to completion.
///
/// Each selected process occupies the CPU for its full remaining burst,
/// so `completion == start + burst` holds for every process.
pub(crate) fn run_nonpreemptive(
    processes: &mut [Process],
    rule: &dyn SelectionRule,
) -> Result<Timeline, SimulationError> {
    debug!(
        "running {} over {} processes (non-preemptive)",
        rule.name(),
        processes.len()
    );
    let mut timeline = Timeline::new();
    let mut clock = 0;
    let mut completed = 0;

    while completed < processes.len() {
        let Some(chosen) = dispatching::select_next(processes, clock, rule) else {
            let Some(arrival) = next_arrival_after(processes, clock) else {
                return Err(SimulationError::stalled(clock));
            };
            timeline.record_idle(clock, arrival);
            clock = arrival;
            continue;
        };

        let process = &mut processes[chosen];
        let run = process.remaining_time;
        let finish = clock + run;
        process.mark_started(clock);
        timeline.record(&process.id, clock, finish);
        process.run_for(run, finish);
        clock = finish;
        completed += 1;
    }

    Ok(timeline)
}

/// Runs a preemptive policy to completion.
///
/// The chosen process runs only until the earlier of its own completion
/// and the next arrival of any other incomplete process; the ready set is
/// then re-evaluated from scratch. An arrival at exactly the current
/// clock is already in the ready set, so every run window has positive
/// length and no degenerate segment is ever emitted.
pub(crate) fn run_preemptive(
    processes: &mut [Process],
    rule: &dyn SelectionRule,
) -> Result<Timeline, SimulationError> {
    debug!(
        "running {} over {} processes (preemptive)",
        rule.name(),
        processes.len()
    );
    let mut timeline = Timeline::new();
    let mut clock = 0;
    let mut completed = 0;

    while completed < processes.len() {
        let Some(chosen) = dispatching::select_next(processes, clock, rule) else {
            let Some(arrival) = next_arrival_after(processes, clock) else {
                return Err(SimulationError::stalled(clock));
            };
            timeline.record_idle(clock, arrival);
            clock = arrival;
            continue;
        };

        // The chosen process has arrived, so only strictly-future arrivals
        // bound the run.
        let horizon = next_arrival_after(processes, clock);
        let process = &mut processes[chosen];
        let finish = clock + process.remaining_time;
        let bound = horizon.map_or(finish, |arrival| finish.min(arrival));

        process.mark_started(clock);
        timeline.record(&process.id, clock, bound);
        process.run_for(bound - clock, bound);
        if process.is_completed() {
            completed += 1;
        }
        clock = bound;
    }

    Ok(timeline)
}
