//! Discrete-time simulation driver.
//!
//! Replays a workload against a [`Scheduler`] one time unit at a time.
//! At each instant the driver delivers, in order:
//!
//! 1. completions for cores whose job has no work left,
//! 2. quantum expiries for cores whose job used a full slice,
//! 3. arrivals due at this instant (by arrival time, then id),
//!
//! and then lets every busy core perform one unit of work. When all cores
//! are idle the clock jumps straight to the next arrival.

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::SchedError;
use crate::models::{CoreId, Discipline, JobId, JobSpec, Time};
use crate::scheduler::{Scheduler, SchedulerConfig, SchedulerStats};
use crate::validation::validate_workload;

/// Scheduler configuration plus the driver's time slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Cores and discipline.
    pub scheduler: SchedulerConfig,
    /// Time slice length. Required for RR; optional for the others.
    pub quantum: Option<Time>,
}

impl SimulationConfig {
    /// Creates a single-core configuration without a quantum.
    pub fn new(discipline: Discipline) -> Self {
        Self {
            scheduler: SchedulerConfig::new(discipline),
            quantum: None,
        }
    }

    /// Sets the number of cores.
    pub fn with_cores(mut self, num_cores: usize) -> Self {
        self.scheduler.num_cores = num_cores;
        self
    }

    /// Sets the time slice length.
    pub fn with_quantum(mut self, quantum: Time) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Checks that the configuration can drive a simulation.
    pub fn validate(&self) -> Result<(), SchedError> {
        self.scheduler.validate()?;
        match self.quantum {
            Some(q) if q <= 0 => Err(SchedError::ZeroQuantum(q)),
            None if self.scheduler.discipline.uses_quantum() => Err(SchedError::MissingQuantum),
            _ => Ok(()),
        }
    }
}

/// A core switching to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    /// When the switch happened.
    pub time: Time,
    /// Which core.
    pub core: CoreId,
    /// The job now running there.
    pub job: JobId,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Discipline used.
    pub discipline: Discipline,
    /// Number of cores.
    pub num_cores: usize,
    /// Time slice length, if any.
    pub quantum: Option<Time>,
    /// Number of jobs completed.
    pub completed_jobs: usize,
    /// Time the last job completed.
    pub makespan: Time,
    /// Mean waiting time.
    pub average_waiting_time: f64,
    /// Mean turnaround time.
    pub average_turnaround_time: f64,
    /// Mean response time.
    pub average_response_time: f64,
    /// Raw statistics.
    pub stats: SchedulerStats,
    /// Every core switch, in event order.
    pub timeline: Vec<Dispatch>,
}

#[derive(Debug, Clone, Copy)]
struct CoreRun {
    job: JobId,
    slice_used: Time,
}

impl CoreRun {
    fn new(job: JobId) -> Self {
        Self { job, slice_used: 0 }
    }
}

/// Drives a scheduler through a workload.
///
/// # Example
/// ```
/// use u_cpusched::models::{Discipline, JobSpec};
/// use u_cpusched::sim::{SimulationConfig, Simulator};
///
/// let sim = Simulator::new(SimulationConfig::new(Discipline::Rr).with_quantum(2)).unwrap();
/// let report = sim
///     .run(&[JobSpec::new(0, 0, 3), JobSpec::new(1, 0, 3)])
///     .unwrap();
/// assert_eq!(report.completed_jobs, 2);
/// assert_eq!(report.makespan, 6);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator from a validated configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, SchedError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs `jobs` to completion.
    pub fn run(&self, jobs: &[JobSpec]) -> Result<SimulationReport, SchedError> {
        validate_workload(jobs).map_err(SchedError::InvalidWorkload)?;

        let mut arrivals: Vec<&JobSpec> = jobs.iter().collect();
        arrivals.sort_by_key(|spec| (spec.arrival_time, spec.id));

        let mut sched = Scheduler::from_config(&self.config.scheduler)?;
        let num_cores = sched.num_cores();
        let quantum = self.config.quantum;
        info!(
            "simulating {} jobs: discipline={}, cores={}, quantum={:?}",
            jobs.len(),
            sched.discipline(),
            num_cores,
            quantum
        );

        let mut cores: Vec<Option<CoreRun>> = vec![None; num_cores];
        let mut remaining: HashMap<JobId, Time> = HashMap::with_capacity(jobs.len());
        let mut timeline = Vec::new();
        let mut next_arrival = 0;
        let mut finished = 0;
        let mut makespan = 0;
        let mut time: Time = 0;

        while finished < jobs.len() {
            for core in 0..num_cores {
                let Some(run) = cores[core] else { continue };
                if remaining[&run.job] > 0 {
                    continue;
                }
                finished += 1;
                makespan = time;
                cores[core] = sched.job_finished(core, run.job, time).map(|job| {
                    timeline.push(Dispatch { time, core, job });
                    CoreRun::new(job)
                });
            }

            if let Some(quantum) = quantum {
                for core in 0..num_cores {
                    let Some(run) = cores[core] else { continue };
                    if run.slice_used < quantum {
                        continue;
                    }
                    let job = sched.quantum_expired(core, time);
                    if job != run.job {
                        timeline.push(Dispatch { time, core, job });
                    }
                    cores[core] = Some(CoreRun::new(job));
                }
            }

            while let Some(spec) = arrivals.get(next_arrival).filter(|s| s.arrival_time == time) {
                next_arrival += 1;
                remaining.insert(spec.id, spec.run_time);
                if let Some(core) = sched.job_arrived(spec.id, time, spec.run_time, spec.priority) {
                    timeline.push(Dispatch {
                        time,
                        core,
                        job: spec.id,
                    });
                    cores[core] = Some(CoreRun::new(spec.id));
                }
            }

            let mut busy = false;
            for run in cores.iter_mut().flatten() {
                busy = true;
                if let Some(left) = remaining.get_mut(&run.job) {
                    *left -= 1;
                }
                run.slice_used += 1;
            }

            time = match arrivals.get(next_arrival) {
                Some(spec) if !busy => spec.arrival_time,
                _ => time + 1,
            };
        }

        let report = SimulationReport {
            discipline: sched.discipline(),
            num_cores,
            quantum,
            completed_jobs: finished,
            makespan,
            average_waiting_time: sched.average_waiting_time(),
            average_turnaround_time: sched.average_turnaround_time(),
            average_response_time: sched.average_response_time(),
            stats: sched.shutdown(),
            timeline,
        };
        debug!(
            "simulation done at t={}: waiting={:.2}, turnaround={:.2}, response={:.2}",
            report.makespan,
            report.average_waiting_time,
            report.average_turnaround_time,
            report.average_response_time
        );
        Ok(report)
    }
}
