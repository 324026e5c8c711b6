//! Scheduling domain models.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Job` | A job the scheduler owns while it waits or runs |
//! | `JobSpec` | An arriving job as a driver describes it |
//! | `Discipline` | One of FCFS, SJF, PSJF, PRI, PPRI, RR |

mod discipline;
mod job;

pub use discipline::Discipline;
pub use job::{CoreId, Job, JobId, JobSpec, Priority, Time};
