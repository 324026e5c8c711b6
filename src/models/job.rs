//! Job model.
//!
//! A job is the unit of work the scheduler places on cores. Its identity
//! is the caller-supplied id; everything else is bookkeeping the
//! scheduler maintains while the job waits or runs.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Caller-supplied job identifier, unique for the simulation's lifetime.
pub type JobId = u64;

/// Zero-based core index.
pub type CoreId = usize;

/// Simulated time units.
pub type Time = i64;

/// Job priority. Lower value = higher priority.
pub type Priority = i32;

/// A job owned by the scheduler.
///
/// Created on arrival and held by exactly one of the core table or the
/// waiting queue until it finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Time the job arrived.
    pub arrival_time: Time,
    /// First time the job occupied a core. `None` until then.
    pub start_time: Option<Time>,
    /// Total CPU time the job requires.
    pub total_run_time: Time,
    /// CPU time still required.
    pub remaining_time: Time,
    /// Scheduling priority (lower = more important).
    pub priority: Priority,
}

impl Job {
    /// Creates a freshly arrived job that has not started yet.
    pub fn new(id: JobId, arrival_time: Time, total_run_time: Time, priority: Priority) -> Self {
        Self {
            id,
            arrival_time,
            start_time: None,
            total_run_time,
            remaining_time: total_run_time,
            priority,
        }
    }

    /// Whether the job has occupied a core at least once.
    pub fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Records `time` as the start time unless the job already started.
    pub fn mark_started(&mut self, time: Time) {
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    /// CPU time consumed so far.
    pub fn consumed_time(&self) -> Time {
        self.total_run_time - self.remaining_time
    }
}

/// Description of an arriving job, as a driver or workload file sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Unique job identifier.
    pub id: JobId,
    /// Arrival time.
    pub arrival_time: Time,
    /// Total CPU time required.
    pub run_time: Time,
    /// Scheduling priority (lower = more important).
    #[serde(default)]
    pub priority: Priority,
}

impl JobSpec {
    /// Creates a job spec with priority 0.
    pub fn new(id: JobId, arrival_time: Time, run_time: Time) -> Self {
        Self {
            id,
            arrival_time,
            run_time,
            priority: 0,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_not_started() {
        let job = Job::new(7, 3, 10, 2);
        assert_eq!(job.id, 7);
        assert_eq!(job.arrival_time, 3);
        assert_eq!(job.start_time, None);
        assert_eq!(job.remaining_time, 10);
        assert_eq!(job.consumed_time(), 0);
        assert!(!job.has_started());
    }

    #[test]
    fn test_mark_started_keeps_first_start() {
        let mut job = Job::new(1, 0, 5, 0);
        job.mark_started(2);
        job.mark_started(4);
        assert_eq!(job.start_time, Some(2));
    }

    #[test]
    fn test_job_spec_builder() {
        let spec = JobSpec::new(4, 10, 3).with_priority(-1);
        assert_eq!(spec.id, 4);
        assert_eq!(spec.arrival_time, 10);
        assert_eq!(spec.run_time, 3);
        assert_eq!(spec.priority, -1);
    }

    #[test]
    fn test_job_spec_priority_defaults() {
        let spec: JobSpec =
            serde_json::from_str(r#"{"id":1,"arrival_time":0,"run_time":4}"#).unwrap();
        assert_eq!(spec, JobSpec::new(1, 0, 4));
    }
}
