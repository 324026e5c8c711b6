//! Discrete-event CPU scheduling core.
//!
//! Decides which job occupies which core, for a fixed number of cores,
//! under one of six classical disciplines: first-come-first-served,
//! shortest-job-first, preemptive shortest-job-first, priority,
//! preemptive priority and round-robin. Running a job is pure
//! bookkeeping; nothing executes and nothing is printed.
//!
//! # Modules
//!
//! - **`queue`**: `OrderedJobSequence`, a comparator-ordered queue with
//!   positional access and removal
//! - **`scheduler`**: `Scheduler`, the event-driven state machine
//!   (arrival, completion, quantum expiry) and its statistics
//! - **`policy`**: the six ordering rules behind `SchedulingRule`
//! - **`models`**: `Job`, `JobSpec`, `Discipline`
//! - **`validation`**: workload integrity checks
//! - **`sim`**: a reference discrete-time driver and workload generator
//!
//! # Logging
//!
//! Events are reported through the `log` facade (`debug` for scheduling
//! decisions, `trace` for queue dumps). No logger is installed here.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-9

pub mod error;
pub mod models;
pub mod policy;
pub mod queue;
pub mod scheduler;
pub mod sim;
pub mod validation;

pub use error::SchedError;
pub use models::{Discipline, Job, JobSpec};
pub use scheduler::{Scheduler, SchedulerStats};
