//! Input validation for simulation requests.
//!
//! Checks the numeric arrays and per-algorithm parameters before any
//! simulation state is built. Detects:
//! - Empty or mismatched-length arrays
//! - Negative arrival times, non-positive burst times
//! - Missing or non-positive quantum for Round Robin
//! - Missing or mismatched priorities for the priority policies
//!
//! A rejected request produces no partial result; all violations are
//! collected and reported together.

use std::error::Error;
use std::fmt;

use crate::scheduler::SimulationRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<InputError>>;

/// A rejected-input error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    /// Error category.
    pub kind: InputErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    /// The arrival/burst arrays are empty.
    EmptyInput,
    /// The input arrays differ in length.
    MismatchedLengths,
    /// An arrival time is negative.
    NegativeArrivalTime,
    /// A burst time is zero or negative.
    NonPositiveBurstTime,
    /// The Round Robin quantum is missing or not positive.
    InvalidQuantum,
    /// The priority array is missing or mismatched for a priority policy.
    MissingPriorities,
    /// The algorithm name is not one of the six supported policies.
    UnsupportedAlgorithm,
}

impl InputError {
    pub(crate) fn new(kind: InputErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for InputError {}

/// Validates a simulation request.
///
/// Checks:
/// 1. Arrays are non-empty and of equal length
/// 2. Every arrival time is >= 0
/// 3. Every burst time is > 0
/// 4. Round Robin carries a positive quantum
/// 5. Priority policies carry a priority per process
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &SimulationRequest) -> ValidationResult {
    let mut errors = Vec::new();
    let n = request.arrival_times.len();

    if n == 0 {
        errors.push(InputError::new(
            InputErrorKind::EmptyInput,
            "arrivalTimes and burstTimes must be non-empty arrays",
        ));
    }

    if request.burst_times.len() != n {
        errors.push(InputError::new(
            InputErrorKind::MismatchedLengths,
            format!(
                "arrivalTimes has {} entries but burstTimes has {}",
                n,
                request.burst_times.len()
            ),
        ));
    }

    for (i, &arrival) in request.arrival_times.iter().enumerate() {
        if arrival < 0 {
            errors.push(InputError::new(
                InputErrorKind::NegativeArrivalTime,
                format!("arrival time at position {i} is negative ({arrival})"),
            ));
        }
    }

    for (i, &burst) in request.burst_times.iter().enumerate() {
        if burst <= 0 {
            errors.push(InputError::new(
                InputErrorKind::NonPositiveBurstTime,
                format!("burst time at position {i} must be positive (got {burst})"),
            ));
        }
    }

    if request.algorithm.needs_quantum() {
        match request.time_quantum {
            None => errors.push(InputError::new(
                InputErrorKind::InvalidQuantum,
                "timeQuantum is required for Round Robin",
            )),
            Some(quantum) if quantum <= 0 => errors.push(InputError::new(
                InputErrorKind::InvalidQuantum,
                format!("timeQuantum must be a positive integer (got {quantum})"),
            )),
            Some(_) => {}
        }
    }

    if request.algorithm.needs_priorities() {
        match request.priorities.as_deref() {
            None => errors.push(InputError::new(
                InputErrorKind::MissingPriorities,
                format!("priorities are required for {}", request.algorithm),
            )),
            Some(priorities) if priorities.len() != n => errors.push(InputError::new(
                InputErrorKind::MissingPriorities,
                format!(
                    "priorities has {} entries but {} processes were given",
                    priorities.len(),
                    n
                ),
            )),
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
