//! Ready-set selection for dispatching policies.
//!
//! Every policy except Round Robin is a comparator over the ready set:
//! the processes that have arrived by the current clock and not yet
//! completed. A [`SelectionRule`] supplies the policy's primary key; ties
//! always break by arrival time, then by original input position, so each
//! policy induces a total order and selection is deterministic.
//!
//! Round Robin is a queue discipline, not a comparator, and lives in
//! `scheduler::round_robin`.
//!
//! # Usage
//!
//! ```
//! use cpu_sched::dispatching::{self, Srtf};
//! use cpu_sched::models::Process;
//!
//! let processes = vec![Process::new(0, 0, 8), Process::new(1, 1, 4)];
//! let chosen = dispatching::select_next(&processes, 1, &Srtf);
//! assert_eq!(chosen, Some(1)); // shorter remaining time wins
//! ```
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

mod rules;

pub use rules::{Fcfs, PriorityRule, Sjf, Srtf};

use crate::models::Process;

/// A dispatching policy's ordering over ready processes.
///
/// # Key Convention
/// **Lower key = runs first.** Equal keys fall through to the shared
/// tie-break order in [`select_next`].
pub trait SelectionRule {
    /// Policy name (e.g., "FCFS", "SRTF").
    fn name(&self) -> &'static str;

    /// Primary ordering key for a process.
    fn key(&self, process: &Process) -> i64;
}

/// Picks the next process to occupy the CPU.
///
/// Considers incomplete processes with `arrival_time <= clock` and
/// returns the index of the minimum under
/// `(key, arrival_time, original_index)`. Returns `None` when no process
/// is ready at `clock`.
pub fn select_next(processes: &[Process], clock: i64, rule: &dyn SelectionRule) -> Option<usize> {
    processes
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_completed() && p.has_arrived(clock))
        .min_by_key(|(_, p)| (rule.key(p), p.arrival_time, p.original_index))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(index: usize, arrival: i64, burst: i64) -> Process {
        Process::new(index, arrival, burst)
    }

    #[test]
    fn test_unarrived_processes_are_ignored() {
        let processes = vec![make(0, 5, 1), make(1, 9, 1)];
        assert_eq!(select_next(&processes, 4, &Fcfs), None);
        assert_eq!(select_next(&processes, 5, &Fcfs), Some(0));
    }

    #[test]
    fn test_completed_processes_are_ignored() {
        let mut processes = vec![make(0, 0, 2), make(1, 0, 3)];
        processes[0].run_for(2, 2);
        assert_eq!(select_next(&processes, 2, &Fcfs), Some(1));
    }

    #[test]
    fn test_all_completed_yields_none() {
        let mut processes = vec![make(0, 0, 2)];
        processes[0].run_for(2, 2);
        assert_eq!(select_next(&processes, 10, &Fcfs), None);
    }

    #[test]
    fn test_tie_breaks_by_arrival_then_index() {
        // Equal burst: earlier arrival wins
        let processes = vec![make(0, 2, 4), make(1, 1, 4)];
        assert_eq!(select_next(&processes, 3, &Sjf), Some(1));

        // Equal burst and arrival: input position wins
        let processes = vec![make(0, 1, 4), make(1, 1, 4)];
        assert_eq!(select_next(&processes, 3, &Sjf), Some(0));
    }

    #[test]
    fn test_priority_selection() {
        let processes = vec![
            make(0, 0, 5).with_priority(2),
            make(1, 0, 5).with_priority(1),
        ];
        assert_eq!(select_next(&processes, 0, &PriorityRule), Some(1));
    }
}
