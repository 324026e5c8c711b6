//! Completion statistics.
//!
//! Running sums accrued once per finished job, and the averages derived
//! from them.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting time | completion - run time - arrival |
//! | Response time | first start - arrival |
//! | Turnaround time | completion - arrival |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{Job, Time};

/// Aggregate statistics over completed jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Sum of waiting times.
    pub waiting_time_sum: Time,
    /// Sum of response times.
    pub response_time_sum: Time,
    /// Sum of turnaround times.
    pub turnaround_time_sum: Time,
    /// Number of completed jobs.
    pub completed_job_count: usize,
}

impl SchedulerStats {
    /// Creates zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accrues a job that finished at `completion`.
    ///
    /// # Panics
    /// If the job never started; a finishing job has always held a core.
    pub fn record(&mut self, job: &Job, completion: Time) {
        let Some(start) = job.start_time else {
            panic!("job {} finished without ever starting", job.id);
        };
        self.waiting_time_sum += completion - job.total_run_time - job.arrival_time;
        self.response_time_sum += start - job.arrival_time;
        self.turnaround_time_sum += completion - job.arrival_time;
        self.completed_job_count += 1;
    }

    /// Mean waiting time, or 0.0 when nothing has completed.
    pub fn average_waiting_time(&self) -> f64 {
        self.average(self.waiting_time_sum)
    }

    /// Mean turnaround time, or 0.0 when nothing has completed.
    pub fn average_turnaround_time(&self) -> f64 {
        self.average(self.turnaround_time_sum)
    }

    /// Mean response time, or 0.0 when nothing has completed.
    pub fn average_response_time(&self) -> f64 {
        self.average(self.response_time_sum)
    }

    fn average(&self, sum: Time) -> f64 {
        if self.completed_job_count == 0 {
            0.0
        } else {
            sum as f64 / self.completed_job_count as f64
        }
    }
}
