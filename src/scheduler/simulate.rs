//! Simulation entry point.
//!
//! [`simulate`] is the one logical operation the crate exposes: validate
//! a request, build fresh process records, run the selected policy to
//! completion, and assemble the results table plus Gantt timeline.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::engine::{self, SimulationError};
use super::metrics;
use super::round_robin;
use crate::dispatching::{Fcfs, PriorityRule, Sjf, Srtf};
use crate::models::{Process, SimulationOutcome};
use crate::validation::{self, InputError, InputErrorKind};

/// The six supported dispatching disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come-First-Served (non-preemptive).
    Fcfs,
    /// Shortest-Job-First (non-preemptive).
    Sjf,
    /// Shortest-Remaining-Time-First (preemptive at every arrival).
    Srtf,
    /// Round Robin over a fixed quantum.
    RoundRobin,
    /// Priority, non-preemptive. Lower number = higher priority.
    PriorityNonPreemptive,
    /// Priority, preemptive at every arrival.
    PriorityPreemptive,
}

impl Algorithm {
    /// Wire token for the algorithm (the form [`FromStr`] accepts).
    pub fn token(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::RoundRobin => "RR",
            Self::PriorityNonPreemptive => "PRIORITY-NP",
            Self::PriorityPreemptive => "PRIORITY-P",
        }
    }

    /// Whether the policy requires a time quantum.
    pub fn needs_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Whether the policy requires a priority per process.
    pub fn needs_priorities(&self) -> bool {
        matches!(self, Self::PriorityNonPreemptive | Self::PriorityPreemptive)
    }
}

impl FromStr for Algorithm {
    type Err = InputError;

    /// Parses a wire token case-insensitively, ignoring surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, InputError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FCFS" => Ok(Self::Fcfs),
            "SJF" => Ok(Self::Sjf),
            "SRTF" => Ok(Self::Srtf),
            "RR" => Ok(Self::RoundRobin),
            "PRIORITY-NP" => Ok(Self::PriorityNonPreemptive),
            "PRIORITY-P" => Ok(Self::PriorityPreemptive),
            _ => Err(InputError::new(
                InputErrorKind::UnsupportedAlgorithm,
                format!("algorithm '{}' is not supported", s.trim()),
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Input container for one simulation call.
///
/// # Example
/// ```
/// use cpu_sched::scheduler::{simulate, Algorithm, SimulationRequest};
///
/// let request = SimulationRequest::new(Algorithm::RoundRobin, vec![0, 1, 2], vec![4, 3, 2])
///     .with_quantum(2);
/// let outcome = simulate(&request).unwrap();
/// assert_eq!(outcome.results_table.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Dispatching discipline to simulate.
    pub algorithm: Algorithm,
    /// Per-process arrival instants (>= 0).
    pub arrival_times: Vec<i64>,
    /// Per-process CPU demands (> 0), same length as `arrival_times`.
    pub burst_times: Vec<i64>,
    /// Time slice; required for Round Robin.
    pub time_quantum: Option<i64>,
    /// Per-process priorities (lower = higher); required for the priority
    /// policies.
    pub priorities: Option<Vec<i64>>,
}

impl SimulationRequest {
    /// Creates a request for the given policy and process set.
    pub fn new(algorithm: Algorithm, arrival_times: Vec<i64>, burst_times: Vec<i64>) -> Self {
        Self {
            algorithm,
            arrival_times,
            burst_times,
            time_quantum: None,
            priorities: None,
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }

    /// Sets the per-process priorities.
    pub fn with_priorities(mut self, priorities: Vec<i64>) -> Self {
        self.priorities = Some(priorities);
        self
    }
}

/// Error returned by [`simulate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulateError {
    /// The request was rejected before any simulation state was built.
    Input(Vec<InputError>),
    /// The engine hit an internal invariant violation mid-run.
    Simulation(SimulationError),
}

impl fmt::Display for SimulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(errors) => {
                let reasons: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "invalid input: {}", reasons.join("; "))
            }
            Self::Simulation(error) => write!(f, "simulation failed: {error}"),
        }
    }
}

impl Error for SimulateError {}

impl From<Vec<InputError>> for SimulateError {
    fn from(errors: Vec<InputError>) -> Self {
        Self::Input(errors)
    }
}

impl From<InputError> for SimulateError {
    fn from(error: InputError) -> Self {
        Self::Input(vec![error])
    }
}

impl From<SimulationError> for SimulateError {
    fn from(error: SimulationError) -> Self {
        Self::Simulation(error)
    }
}

/// Runs one complete simulation.
///
/// Validates the request, builds fresh process records, runs the selected
/// policy to completion, and assembles the results table (input order)
/// and Gantt timeline. The call is synchronous and shares no state with
/// other calls; identical requests produce identical outcomes.
pub fn simulate(request: &SimulationRequest) -> Result<SimulationOutcome, SimulateError> {
    validation::validate_request(request)?;

    let mut processes = build_processes(request);
    debug!(
        "simulating {} over {} processes",
        request.algorithm,
        processes.len()
    );

    let timeline = match request.algorithm {
        Algorithm::Fcfs => engine::run_nonpreemptive(&mut processes, &Fcfs)?,
        Algorithm::Sjf => engine::run_nonpreemptive(&mut processes, &Sjf)?,
        Algorithm::Srtf => engine::run_preemptive(&mut processes, &Srtf)?,
        Algorithm::PriorityNonPreemptive => engine::run_nonpreemptive(&mut processes, &PriorityRule)?,
        Algorithm::PriorityPreemptive => engine::run_preemptive(&mut processes, &PriorityRule)?,
        Algorithm::RoundRobin => {
            let quantum = request.time_quantum.filter(|&q| q > 0).ok_or_else(|| {
                InputError::new(
                    InputErrorKind::InvalidQuantum,
                    "timeQuantum is required for Round Robin",
                )
            })?;
            round_robin::run_round_robin(&mut processes, quantum)?
        }
    };

    Ok(metrics::build_outcome(&processes, timeline))
}

/// Constructs the per-call process records from the request arrays.
///
/// Priorities are attached only when the policy uses them, so they only
/// then appear in the results table.
fn build_processes(request: &SimulationRequest) -> Vec<Process> {
    let priorities = request
        .priorities
        .as_deref()
        .filter(|_| request.algorithm.needs_priorities());

    request
        .arrival_times
        .iter()
        .zip(&request.burst_times)
        .enumerate()
        .map(|(i, (&arrival, &burst))| {
            let process = Process::new(i, arrival, burst);
            match priorities.and_then(|p| p.get(i)) {
                Some(&priority) => process.with_priority(priority),
                None => process,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Segment, IDLE_ID};
    use crate::scheduler::SimulationStats;

    fn run(algorithm: Algorithm, arrivals: Vec<i64>, bursts: Vec<i64>) -> SimulationOutcome {
        simulate(&SimulationRequest::new(algorithm, arrivals, bursts)).unwrap()
    }

    fn column<T>(outcome: &SimulationOutcome, f: impl Fn(&crate::models::ProcessReport) -> T) -> Vec<T> {
        outcome.results_table.iter().map(f).collect()
    }

    /// Conservation + coverage checks shared by the scenario tests.
    fn assert_well_formed(outcome: &SimulationOutcome, total_burst: i64) {
        assert_eq!(outcome.busy_time(), total_burst);

        let mut clock = 0;
        for segment in &outcome.gantt_chart {
            assert_eq!(segment.start, clock, "gap or overlap in timeline");
            assert!(segment.end > segment.start);
            clock = segment.end;
        }
        let max_completion = outcome
            .results_table
            .iter()
            .map(|r| r.completion_time)
            .max()
            .unwrap_or(0);
        assert_eq!(clock, max_completion);
    }

    #[test]
    fn test_fcfs_scenario() {
        let outcome = run(Algorithm::Fcfs, vec![0, 2, 4], vec![5, 3, 2]);

        assert_eq!(column(&outcome, |r| r.completion_time), [5, 8, 10]);
        assert_eq!(column(&outcome, |r| r.waiting_time), [0, 3, 4]);
        assert!(outcome.gantt_chart.iter().all(|s| !s.is_idle()));
        assert_well_formed(&outcome, 10);
    }

    #[test]
    fn test_srtf_scenario() {
        let outcome = run(Algorithm::Srtf, vec![0, 1, 2, 3], vec![8, 4, 9, 5]);

        assert_eq!(column(&outcome, |r| r.waiting_time), [9, 0, 15, 2]);
        assert_eq!(column(&outcome, |r| r.turnaround_time), [17, 4, 24, 7]);
        assert_well_formed(&outcome, 26);
    }

    #[test]
    fn test_rr_scenario() {
        let request = SimulationRequest::new(Algorithm::RoundRobin, vec![0, 1, 2], vec![4, 3, 2])
            .with_quantum(2);
        let outcome = simulate(&request).unwrap();

        assert_eq!(
            outcome.gantt_chart,
            vec![
                Segment::new("P1", 0, 2),
                Segment::new("P2", 2, 4),
                Segment::new("P3", 4, 6),
                Segment::new("P1", 6, 8),
                Segment::new("P2", 8, 9),
            ]
        );
        assert_eq!(column(&outcome, |r| r.completion_time), [8, 9, 6]);
        assert_eq!(column(&outcome, |r| r.waiting_time), [4, 5, 2]);
        assert_well_formed(&outcome, 9);
    }

    #[test]
    fn test_idle_scenario() {
        let outcome = run(Algorithm::Fcfs, vec![0, 5], vec![2, 2]);

        assert!(outcome
            .gantt_chart
            .contains(&Segment::new(IDLE_ID, 2, 5)));
        assert_eq!(outcome.results_table[1].completion_time, 7);
        assert_eq!(outcome.results_table[1].waiting_time, 0);
        assert_well_formed(&outcome, 4);
    }

    #[test]
    fn test_sjf_reorders_execution_but_not_output() {
        // P3 (shortest) completes first; the table still reads P1..P4.
        let outcome = run(Algorithm::Sjf, vec![0, 1, 2, 3], vec![7, 5, 2, 4]);

        assert_eq!(column(&outcome, |r| r.id.clone()), ["P1", "P2", "P3", "P4"]);
        assert_eq!(column(&outcome, |r| r.completion_time), [7, 18, 9, 13]);
        assert_well_formed(&outcome, 18);
    }

    #[test]
    fn test_priority_np_scenario() {
        let request =
            SimulationRequest::new(Algorithm::PriorityNonPreemptive, vec![0, 1, 2], vec![4, 3, 2])
                .with_priorities(vec![3, 1, 2]);
        let outcome = simulate(&request).unwrap();

        // P1 holds the CPU to completion, then priority decides.
        let order: Vec<&str> = outcome.gantt_chart.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, ["P1", "P2", "P3"]);
        assert_eq!(column(&outcome, |r| r.priority), [Some(3), Some(1), Some(2)]);
        for row in &outcome.results_table {
            assert_eq!(row.completion_time, row.start_time + row.burst_time);
        }
        assert_well_formed(&outcome, 9);
    }

    #[test]
    fn test_priority_p_preempts_on_arrival() {
        let request =
            SimulationRequest::new(Algorithm::PriorityPreemptive, vec![0, 2], vec![6, 3])
                .with_priorities(vec![5, 1]);
        let outcome = simulate(&request).unwrap();

        assert_eq!(
            outcome.gantt_chart,
            vec![
                Segment::new("P1", 0, 2),
                Segment::new("P2", 2, 5),
                Segment::new("P1", 5, 9),
            ]
        );
        assert_well_formed(&outcome, 9);
    }

    #[test]
    fn test_priority_omitted_from_table_for_other_policies() {
        let request = SimulationRequest::new(Algorithm::Fcfs, vec![0], vec![1])
            .with_priorities(vec![7]);
        let outcome = simulate(&request).unwrap();
        assert_eq!(outcome.results_table[0].priority, None);
    }

    #[test]
    fn test_determinism() {
        let request = SimulationRequest::new(Algorithm::Srtf, vec![0, 3, 3, 7], vec![9, 4, 4, 2]);
        assert_eq!(simulate(&request).unwrap(), simulate(&request).unwrap());
    }

    #[test]
    fn test_stats_over_outcome() {
        let outcome = run(Algorithm::Fcfs, vec![0, 5], vec![2, 2]);
        let stats = SimulationStats::calculate(&outcome);
        assert_eq!(stats.makespan, 7);
        assert_eq!(stats.idle_time, 3);
        assert_eq!(stats.context_switches, 1);
    }

    #[test]
    fn test_invalid_inputs_produce_no_result() {
        let invalid = [
            SimulationRequest::new(Algorithm::Fcfs, vec![0, 1], vec![3]),
            SimulationRequest::new(Algorithm::Fcfs, vec![-1], vec![3]),
            SimulationRequest::new(Algorithm::Fcfs, vec![0], vec![0]),
            SimulationRequest::new(Algorithm::RoundRobin, vec![0], vec![3]),
            SimulationRequest::new(Algorithm::PriorityPreemptive, vec![0], vec![3]),
        ];
        for request in invalid {
            match simulate(&request) {
                Err(SimulateError::Input(errors)) => assert!(!errors.is_empty()),
                other => panic!("expected input rejection, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("fcfs".parse::<Algorithm>().unwrap(), Algorithm::Fcfs);
        assert_eq!("  SJF ".parse::<Algorithm>().unwrap(), Algorithm::Sjf);
        assert_eq!("srtf".parse::<Algorithm>().unwrap(), Algorithm::Srtf);
        assert_eq!("rr".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
        assert_eq!(
            "priority-np".parse::<Algorithm>().unwrap(),
            Algorithm::PriorityNonPreemptive
        );
        assert_eq!(
            "Priority-P".parse::<Algorithm>().unwrap(),
            Algorithm::PriorityPreemptive
        );

        let err = "MLFQ".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.kind, InputErrorKind::UnsupportedAlgorithm);
    }

    #[test]
    fn test_algorithm_display_round_trips() {
        for algorithm in [
            Algorithm::Fcfs,
            Algorithm::Sjf,
            Algorithm::Srtf,
            Algorithm::RoundRobin,
            Algorithm::PriorityNonPreemptive,
            Algorithm::PriorityPreemptive,
        ] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_simulate_error_display() {
        let err = simulate(&SimulationRequest::new(Algorithm::Fcfs, vec![], vec![])).unwrap_err();
        assert!(err.to_string().starts_with("invalid input:"));
    }
}
