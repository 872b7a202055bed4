//! Simulation domain models.
//!
//! Core data types for one simulation run: the process records the
//! drivers mutate, the Gantt timeline they emit, and the caller-visible
//! outcome. All types serialize; the outcome types use the wire field
//! names consumed by rendering clients.

mod process;
mod report;
mod timeline;

pub use process::Process;
pub use report::{ProcessReport, SimulationOutcome};
pub use timeline::{Segment, Timeline, IDLE_ID};
