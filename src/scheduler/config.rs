//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::error::SchedError;
use crate::models::Discipline;

/// Everything needed to start a scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of cores, known as core 0 .. core `num_cores - 1`.
    pub num_cores: usize,
    /// Active scheduling discipline.
    pub discipline: Discipline,
}

impl SchedulerConfig {
    /// Creates a single-core configuration.
    pub fn new(discipline: Discipline) -> Self {
        Self {
            num_cores: 1,
            discipline,
        }
    }

    /// Sets the number of cores.
    pub fn with_cores(mut self, num_cores: usize) -> Self {
        self.num_cores = num_cores;
        self
    }

    /// Checks that the configuration can start a scheduler.
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.num_cores == 0 {
            return Err(SchedError::NoCores);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(Discipline::Fcfs)
    }
}
