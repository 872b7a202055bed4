//! Execution timeline (Gantt chart) model.
//!
//! The timeline is a sequence of contiguous, non-overlapping segments
//! covering `[0, makespan]`. Idle CPU time is represented explicitly with
//! the [`IDLE_ID`] occupant, never omitted.
//!
//! # Merge Rule
//!
//! Recording an event whose occupant matches the previous segment and
//! whose start equals that segment's end extends the segment instead of
//! appending a new one. Idle gaps merge with adjacent idle gaps under the
//! same rule.

use serde::{Deserialize, Serialize};

/// Occupant label for CPU-idle gaps.
pub const IDLE_ID: &str = "Idle";

/// A contiguous interval of the timeline occupied by one process or by
/// the idle CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Occupying process id, or [`IDLE_ID`] for a gap.
    pub id: String,
    /// Interval start (inclusive).
    pub start: i64,
    /// Interval end (exclusive). Always greater than `start`.
    pub end: i64,
}

impl Segment {
    /// Creates a segment.
    pub fn new(id: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Interval length (end - start).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether this segment is an idle gap.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.id == IDLE_ID
    }
}

/// Accumulates execution and idle intervals in clock order, merging
/// adjacent intervals with the same occupant.
///
/// A deterministic reducer over `(occupant, start, end)` events: the
/// drivers feed it one event per run window and it owns the resulting
/// segment list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduces a sequence of events into a merged timeline.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i64, i64)>,
    {
        let mut timeline = Self::new();
        for (id, start, end) in events {
            timeline.record(id, start, end);
        }
        timeline
    }

    /// Records one `(occupant, start, end)` event.
    ///
    /// Events must arrive in clock order with `end > start`; each event
    /// must begin at or after the previous segment's end.
    pub fn record(&mut self, id: &str, start: i64, end: i64) {
        debug_assert!(end > start, "degenerate timeline segment [{start}, {end})");
        debug_assert!(
            self.segments.last().map_or(true, |s| s.end <= start),
            "timeline event out of clock order"
        );
        if let Some(last) = self.segments.last_mut() {
            if last.id == id && last.end == start {
                last.end = end;
                return;
            }
        }
        self.segments.push(Segment::new(id, start, end));
    }

    /// Records an idle gap.
    pub fn record_idle(&mut self, start: i64, end: i64) {
        self.record(IDLE_ID, start, end);
    }

    /// The merged segments, ordered by start.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consumes the timeline, returning its segments.
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Completion instant of the last segment (0 for an empty timeline).
    pub fn makespan(&self) -> i64 {
        self.segments.last().map_or(0, |s| s.end)
    }

    /// Total time the CPU spent executing processes.
    pub fn busy_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(Segment::duration)
            .sum()
    }

    /// Total time the CPU sat idle.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.is_idle())
            .map(Segment::duration)
            .sum()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
