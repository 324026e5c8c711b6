//! Workload validation.
//!
//! Checks a list of job specs before it is fed to a scheduler. Detects:
//! - Duplicate job IDs
//! - Jobs that need no CPU time (they would never produce a completion)
//! - Arrivals before t=0
//!
//! All problems are collected rather than stopping at the first.

use crate::models::JobSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two jobs share the same ID.
    DuplicateId,
    /// A job's run time is zero or negative.
    NonPositiveRunTime,
    /// A job arrives before the simulation starts.
    NegativeArrival,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a workload.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. Every run time is positive
/// 3. Every arrival time is non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(jobs: &[JobSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for job in jobs {
        if !ids.insert(job.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        if job.run_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveRunTime,
                format!("Job {} has non-positive run time {}", job.id, job.run_time),
            ));
        }

        if job.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Job {} arrives at negative time {}", job.id, job.arrival_time),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_workload() {
        let jobs = vec![JobSpec::new(0, 0, 3), JobSpec::new(1, 0, 1).with_priority(2)];
        assert!(validate_workload(&jobs).is_ok());
        assert!(validate_workload(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let jobs = vec![JobSpec::new(4, 0, 3), JobSpec::new(4, 2, 1)];
        let errors = validate_workload(&jobs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].message, "Duplicate job ID: 4");
    }

    #[test]
    fn test_non_positive_run_time() {
        let jobs = vec![JobSpec::new(1, 0, 0), JobSpec::new(2, 0, -3)];
        let errors = validate_workload(&jobs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::NonPositiveRunTime));
    }

    #[test]
    fn test_collects_all_problems() {
        let jobs = vec![JobSpec::new(1, -1, 2), JobSpec::new(1, 0, 0)];
        let errors = validate_workload(&jobs).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::NegativeArrival,
                ValidationErrorKind::DuplicateId,
                ValidationErrorKind::NonPositiveRunTime,
            ]
        );
    }
}
