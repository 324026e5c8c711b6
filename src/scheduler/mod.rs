//! Event-driven CPU scheduler.
//!
//! [`Scheduler`] owns a fixed table of cores, the waiting queue, the
//! simulated clock and the completion statistics. An external driver
//! feeds it three kinds of events:
//!
//! - `job_arrived`: place the job on the lowest idle core, preempt a
//!   running job (PSJF/PPRI), or queue it.
//! - `job_finished`: accrue statistics and hand the core to the queue head.
//! - `quantum_expired`: rotate the incumbent through the queue.
//!
//! Every event first advances the clock and charges the elapsed time to
//! the running jobs, so remaining-time comparisons are current.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

mod config;
mod engine;
mod stats;

pub use self::config::SchedulerConfig;
pub use self::engine::{JobLocation, QueueEntry, Scheduler};
pub use self::stats::SchedulerStats;
