//! Seeded random workloads.
//!
//! Each tick independently produces an arrival with probability
//! `p_arrival`. An arriving job is short with probability `p_short`,
//! long otherwise, and draws a priority uniformly from
//! `0..priority_levels`.

use rand::prelude::*;

use crate::models::{JobSpec, Priority, Time};

/// Bernoulli-arrival workload generator.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    ticks: Time,
    p_arrival: f64,
    p_short: f64,
    short_run: Time,
    long_run: Time,
    priority_levels: Priority,
    seed: u64,
}

impl WorkloadGenerator {
    /// Creates a generator covering arrivals in `0..ticks`.
    pub fn new(ticks: Time) -> Self {
        Self {
            ticks,
            p_arrival: 0.3,
            p_short: 0.3,
            short_run: 2,
            long_run: 6,
            priority_levels: 1,
            seed: 0,
        }
    }

    /// Sets the per-tick arrival probability.
    pub fn with_arrival_probability(mut self, p: f64) -> Self {
        self.p_arrival = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the probability that an arriving job is short.
    pub fn with_short_probability(mut self, p: f64) -> Self {
        self.p_short = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the short and long run times.
    pub fn with_run_times(mut self, short_run: Time, long_run: Time) -> Self {
        self.short_run = short_run;
        self.long_run = long_run;
        self
    }

    /// Sets how many distinct priorities to draw from (at least one).
    pub fn with_priority_levels(mut self, levels: Priority) -> Self {
        self.priority_levels = levels.max(1);
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates the workload, ordered by arrival time with ids 0, 1, 2, ...
    pub fn generate(&self) -> Vec<JobSpec> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut jobs = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() >= self.p_arrival {
                continue;
            }
            let run_time = if rng.random::<f64>() < self.p_short {
                self.short_run
            } else {
                self.long_run
            };
            let priority = rng.random_range(0..self.priority_levels);
            jobs.push(JobSpec::new(jobs.len() as u64, t, run_time).with_priority(priority));
        }

        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_workload() {
        let generator = WorkloadGenerator::new(100).with_priority_levels(3).with_seed(9);
        assert_eq!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_generated_shape() {
        let jobs = WorkloadGenerator::new(300)
            .with_arrival_probability(0.5)
            .with_run_times(1, 10)
            .with_priority_levels(5)
            .with_seed(3)
            .generate();

        assert!(!jobs.is_empty());
        for (index, job) in jobs.iter().enumerate() {
            assert_eq!(job.id, index as u64);
            assert!((0..300).contains(&job.arrival_time));
            assert!(job.run_time == 1 || job.run_time == 10);
            assert!((0..5).contains(&job.priority));
        }
        assert!(jobs.windows(2).all(|w| w[0].arrival_time < w[1].arrival_time));
    }

    #[test]
    fn test_probability_extremes() {
        assert!(WorkloadGenerator::new(50)
            .with_arrival_probability(0.0)
            .generate()
            .is_empty());

        let jobs = WorkloadGenerator::new(50)
            .with_arrival_probability(1.0)
            .with_short_probability(1.0)
            .generate();
        assert_eq!(jobs.len(), 50);
        assert!(jobs.iter().all(|j| j.run_time == 2 && j.priority == 0));
    }
}
