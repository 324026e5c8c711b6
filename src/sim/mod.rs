//! Reference simulation driver.
//!
//! The scheduler only reacts to events; this module produces them. It
//! replays a workload in discrete time, issuing arrivals, completions and
//! quantum expiries, and reports the resulting averages together with a
//! dispatch timeline. [`WorkloadGenerator`] builds seeded random
//! workloads for it.

mod driver;
mod workload;

pub use driver::{Dispatch, SimulationConfig, SimulationReport, Simulator};
pub use workload::WorkloadGenerator;
