//! Crate error type.
//!
//! Only the configuration and simulation layers return errors. The
//! scheduler's event handlers treat misuse as a contract violation and
//! panic instead; the ordered queue reports "empty" and "bad index" as
//! `None`.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while configuring or driving a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedError {
    /// A discipline name that is not one of FCFS, SJF, PSJF, PRI, PPRI, RR.
    #[error("unknown scheduling discipline: {0:?}")]
    UnknownDiscipline(String),

    /// A scheduler needs at least one core.
    #[error("scheduler requires at least one core")]
    NoCores,

    /// Round-robin simulation was configured without a quantum.
    #[error("round-robin scheduling requires a quantum")]
    MissingQuantum,

    /// A quantum must be a positive number of time units.
    #[error("quantum must be positive, got {0}")]
    ZeroQuantum(i64),

    /// The workload failed validation.
    #[error("invalid workload: {} problem(s), first: {}", .0.len(), first_message(.0))]
    InvalidWorkload(Vec<ValidationError>),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SchedError::UnknownDiscipline("lottery".into()).to_string(),
            "unknown scheduling discipline: \"lottery\""
        );
        assert_eq!(SchedError::ZeroQuantum(0).to_string(), "quantum must be positive, got 0");
    }

    #[test]
    fn test_invalid_workload_message() {
        let err = SchedError::InvalidWorkload(vec![ValidationError::new(
            ValidationErrorKind::DuplicateId,
            "Duplicate job ID: 3",
        )]);
        assert_eq!(
            err.to_string(),
            "invalid workload: 1 problem(s), first: Duplicate job ID: 3"
        );
    }
}
