//! Simulation outcome model.
//!
//! The caller-visible result of one run: a per-process results table in
//! the caller's input order, paired with the full Gantt timeline. Field
//! names serialize in the camelCase form the rendering clients consume.

use serde::{Deserialize, Serialize};

use super::Segment;

/// One row of the per-process results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    /// Process label ("P1", "P2", ...).
    pub id: String,
    /// Instant the process became eligible to run.
    pub arrival_time: i64,
    /// Total CPU time the process required.
    pub burst_time: i64,
    /// Priority, present only under the priority policies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// First instant the process was given the CPU.
    pub start_time: i64,
    /// Instant the process finished.
    pub completion_time: i64,
    /// completion - arrival.
    pub turnaround_time: i64,
    /// turnaround - burst. Never negative.
    pub waiting_time: i64,
}

/// Complete result of one simulation call.
///
/// `results_table` is ordered by input position regardless of execution
/// order; `gantt_chart` is ordered by segment start and covers
/// `[0, makespan]` with idle gaps explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    /// Per-process metrics, one row per input process.
    pub results_table: Vec<ProcessReport>,
    /// Execution/idle segments ordered by start.
    pub gantt_chart: Vec<Segment>,
}

impl SimulationOutcome {
    /// Completion instant of the last process to finish.
    pub fn makespan(&self) -> i64 {
        self.gantt_chart.last().map_or(0, |s| s.end)
    }

    /// Total time the CPU spent executing processes.
    pub fn busy_time(&self) -> i64 {
        self.gantt_chart
            .iter()
            .filter(|s| !s.is_idle())
            .map(Segment::duration)
            .sum()
    }

    /// Total time the CPU sat idle.
    pub fn idle_time(&self) -> i64 {
        self.makespan() - self.busy_time()
    }

    /// Number of processes in the results table.
    pub fn process_count(&self) -> usize {
        self.results_table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IDLE_ID;

    fn sample_outcome() -> SimulationOutcome {
        SimulationOutcome {
            results_table: vec![
                ProcessReport {
                    id: "P1".into(),
                    arrival_time: 0,
                    burst_time: 2,
                    priority: None,
                    start_time: 0,
                    completion_time: 2,
                    turnaround_time: 2,
                    waiting_time: 0,
                },
                ProcessReport {
                    id: "P2".into(),
                    arrival_time: 5,
                    burst_time: 2,
                    priority: None,
                    start_time: 5,
                    completion_time: 7,
                    turnaround_time: 2,
                    waiting_time: 0,
                },
            ],
            gantt_chart: vec![
                Segment::new("P1", 0, 2),
                Segment::new(IDLE_ID, 2, 5),
                Segment::new("P2", 5, 7),
            ],
        }
    }

    #[test]
    fn test_outcome_totals() {
        let outcome = sample_outcome();
        assert_eq!(outcome.makespan(), 7);
        assert_eq!(outcome.busy_time(), 4);
        assert_eq!(outcome.idle_time(), 3);
        assert_eq!(outcome.process_count(), 2);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample_outcome()).unwrap();
        let row = &json["resultsTable"][0];
        assert_eq!(row["id"], "P1");
        assert_eq!(row["arrivalTime"], 0);
        assert_eq!(row["burstTime"], 2);
        assert_eq!(row["startTime"], 0);
        assert_eq!(row["completionTime"], 2);
        assert_eq!(row["turnaroundTime"], 2);
        assert_eq!(row["waitingTime"], 0);
        // Priority is omitted entirely when the policy ignores it
        assert!(row.get("priority").is_none());

        let gap = &json["ganttChart"][1];
        assert_eq!(gap["id"], "Idle");
        assert_eq!(gap["start"], 2);
        assert_eq!(gap["end"], 5);
    }

    #[test]
    fn test_priority_serialized_when_present() {
        let mut outcome = sample_outcome();
        outcome.results_table[0].priority = Some(1);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["resultsTable"][0]["priority"], 1);
    }
}
