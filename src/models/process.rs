//! Process model.
//!
//! A process is the unit of scheduling: it arrives at a fixed instant,
//! requires a fixed amount of CPU time, and (for the priority policies)
//! carries a priority. Simulation-mutable state — remaining time, first
//! dispatch, completion — lives on the same record.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 3.1

use serde::{Deserialize, Serialize};

/// A process within one simulation run.
///
/// Records are built fresh per call from the input arrays and never
/// outlive the run. `remaining_time` starts at `burst_time` and is
/// decremented as the process executes; `start_time` is set on the first
/// dispatch only; `completion_time` doubles as the completion flag.
///
/// # Time Representation
/// All times are logical clock ticks starting at t=0. The simulation
/// assigns no wall-clock meaning to a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    /// Stable label derived from input position ("P1", "P2", ...).
    pub id: String,
    /// Instant the process becomes eligible to run (>= 0).
    pub arrival_time: i64,
    /// Total CPU time the process requires (> 0).
    pub burst_time: i64,
    /// Scheduling priority, lower value = higher priority. `None` under
    /// policies that ignore priority.
    pub priority: Option<i64>,
    /// Position in the caller's input, used only to restore output order.
    pub original_index: usize,
    /// CPU time still required. Monotonically non-increasing.
    pub remaining_time: i64,
    /// First instant the process was ever given the CPU.
    pub start_time: Option<i64>,
    /// Instant `remaining_time` reached zero.
    pub completion_time: Option<i64>,
}

impl Process {
    /// Creates a process from its input position and parameters.
    pub fn new(original_index: usize, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: format!("P{}", original_index + 1),
            arrival_time,
            burst_time,
            priority: None,
            original_index,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the process has finished executing.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Whether the process has arrived by the given instant.
    #[inline]
    pub fn has_arrived(&self, clock: i64) -> bool {
        self.arrival_time <= clock
    }

    /// Records the first dispatch instant. Later calls are no-ops.
    pub fn mark_started(&mut self, clock: i64) {
        if self.start_time.is_none() {
            self.start_time = Some(clock);
        }
    }

    /// Consumes `duration` ticks of CPU ending at `clock_after`, completing
    /// the process when its remaining time reaches zero.
    pub fn run_for(&mut self, duration: i64, clock_after: i64) {
        debug_assert!(duration > 0 && duration <= self.remaining_time);
        self.remaining_time -= duration;
        if self.remaining_time == 0 {
            self.completion_time = Some(clock_after);
        }
    }
}
