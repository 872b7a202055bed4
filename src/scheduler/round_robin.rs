//! Round Robin queue discipline.
//!
//! RR is not a comparator: it keeps a FIFO ready queue and grants each
//! dequeued process at most one quantum per turn. Processes enter the
//! queue in (arrival time, input position) order; arrivals that fall
//! within an executing slice are enqueued ahead of the preempted process.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use std::collections::VecDeque;

use log::debug;

use super::engine::SimulationError;
use crate::models::{Process, Timeline};

/// Runs Round Robin to completion with the given quantum.
///
/// Waiting time is accumulated incrementally between successive runs of
/// each process and reconciled against `turnaround - burst` at
/// completion.
pub(crate) fn run_round_robin(
    processes: &mut [Process],
    quantum: i64,
) -> Result<Timeline, SimulationError> {
    debug_assert!(quantum > 0);
    debug!(
        "running RR (quantum={quantum}) over {} processes",
        processes.len()
    );

    // Queue insertion order: arrival time, then input position — the same
    // tie-break as the comparator policies.
    let mut arrival_order: Vec<usize> = (0..processes.len()).collect();
    arrival_order.sort_by_key(|&i| (processes[i].arrival_time, processes[i].original_index));

    let mut timeline = Timeline::new();
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut cursor = 0;
    let mut last_ready_at: Vec<i64> = processes.iter().map(|p| p.arrival_time).collect();
    let mut waited: Vec<i64> = vec![0; processes.len()];
    let mut clock = 0;
    let mut completed = 0;

    enqueue_arrived(&mut queue, &mut cursor, &arrival_order, processes, clock);

    while completed < processes.len() {
        let Some(current) = queue.pop_front() else {
            if cursor >= arrival_order.len() {
                return Err(SimulationError::stalled(clock));
            }
            let arrival = processes[arrival_order[cursor]].arrival_time;
            if arrival > clock {
                timeline.record_idle(clock, arrival);
                clock = arrival;
            }
            enqueue_arrived(&mut queue, &mut cursor, &arrival_order, processes, clock);
            continue;
        };

        processes[current].mark_started(clock);
        waited[current] += clock - last_ready_at[current];

        let slice = quantum.min(processes[current].remaining_time);
        let end = clock + slice;
        timeline.record(&processes[current].id, clock, end);
        processes[current].run_for(slice, end);
        clock = end;

        // Arrivals within the slice enter ahead of the preempted process.
        enqueue_arrived(&mut queue, &mut cursor, &arrival_order, processes, clock);

        if let Some(completion) = processes[current].completion_time {
            completed += 1;
            debug_assert_eq!(
                waited[current],
                (completion - processes[current].arrival_time) - processes[current].burst_time,
                "incremental waiting time failed to reconcile for {}",
                processes[current].id
            );
        } else {
            last_ready_at[current] = clock;
            queue.push_back(current);
        }
    }

    Ok(timeline)
}

/// Moves every process with `arrival_time <= clock` from the arrival
/// order into the ready queue.
fn enqueue_arrived(
    queue: &mut VecDeque<usize>,
    cursor: &mut usize,
    arrival_order: &[usize],
    processes: &[Process],
    clock: i64,
) {
    while *cursor < arrival_order.len() && processes[arrival_order[*cursor]].arrival_time <= clock {
        queue.push_back(arrival_order[*cursor]);
        *cursor += 1;
    }
}
