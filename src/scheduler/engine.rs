//! Scheduler state machine.
//!
//! # Ownership
//! A live job is owned by exactly one place: a core slot or the waiting
//! queue. Jobs move between them by value, and `locations` records where
//! each live job currently is so duplicate ids and stale core references
//! are caught at the event boundary.
//!
//! # Preemption
//! When every core is busy and the discipline is preemptive, the cores are
//! scanned left to right with a running candidate that starts as the
//! arriving job. A core is chosen, and its job becomes the new candidate,
//! whenever the candidate compares strictly earlier than that core's job.
//! The last chosen core is the one preempted. Equal jobs never replace the
//! candidate, so among equally bad jobs the leftmost is displaced.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, info, log_enabled, trace, Level};
use serde::{Deserialize, Serialize};

use super::{SchedulerConfig, SchedulerStats};
use crate::error::SchedError;
use crate::models::{CoreId, Discipline, Job, JobId, Priority, Time};
use crate::policy::{self, SchedulingRule};
use crate::queue::OrderedJobSequence;

/// Where a live job is currently owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobLocation {
    /// In the waiting queue.
    Waiting,
    /// Occupying the given core.
    Running(CoreId),
}

/// One line of the diagnostic queue dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Job id.
    pub id: JobId,
    /// Arrival time.
    pub arrival_time: Time,
    /// First start time, if any.
    pub start_time: Option<Time>,
    /// Remaining CPU time.
    pub remaining_time: Time,
    /// Total CPU time.
    pub run_time: Time,
    /// Priority.
    pub priority: Priority,
}

impl From<&Job> for QueueEntry {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            arrival_time: job.arrival_time,
            start_time: job.start_time,
            remaining_time: job.remaining_time,
            run_time: job.total_run_time,
            priority: job.priority,
        }
    }
}

impl fmt::Display for QueueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job {}: arrival={} start=", self.id, self.arrival_time)?;
        match self.start_time {
            Some(start) => write!(f, "{start}")?,
            None => f.write_str("-")?,
        }
        write!(
            f,
            " remaining={} run={} priority={}",
            self.remaining_time, self.run_time, self.priority
        )
    }
}

/// Multi-core CPU scheduler driven by discrete events.
///
/// # Example
/// ```
/// use u_cpusched::models::Discipline;
/// use u_cpusched::scheduler::Scheduler;
///
/// let mut sched = Scheduler::start(1, Discipline::Fcfs);
/// assert_eq!(sched.job_arrived(0, 0, 3, 0), Some(0));
/// assert_eq!(sched.job_arrived(1, 1, 2, 0), None);
/// assert_eq!(sched.job_finished(0, 0, 3), Some(1));
/// assert_eq!(sched.job_finished(0, 1, 5), None);
///
/// assert!((sched.average_turnaround_time() - 3.5).abs() < 1e-10);
/// let stats = sched.shutdown();
/// assert_eq!(stats.completed_job_count, 2);
/// ```
#[derive(Debug)]
pub struct Scheduler {
    discipline: Discipline,
    rule: Arc<dyn SchedulingRule>,
    cores: Vec<Option<Job>>,
    waiting: OrderedJobSequence<Job>,
    locations: HashMap<JobId, JobLocation>,
    clock: Time,
    stats: SchedulerStats,
}

impl Scheduler {
    /// Starts a scheduler with `num_cores` idle cores.
    ///
    /// # Panics
    /// If `num_cores` is zero. Use [`Scheduler::from_config`] for a
    /// fallible variant.
    pub fn start(num_cores: usize, discipline: Discipline) -> Self {
        assert!(num_cores > 0, "scheduler requires at least one core");

        let rule = policy::rule_for(discipline);
        let ordering = Arc::clone(&rule);
        let waiting = OrderedJobSequence::new(move |a: &Job, b: &Job| ordering.compare(a, b));

        info!(
            "scheduler started: discipline={}, cores={}, preemptive={}",
            discipline,
            num_cores,
            rule.is_preemptive()
        );

        Self {
            discipline,
            rule,
            cores: vec![None; num_cores],
            waiting,
            locations: HashMap::new(),
            clock: 0,
            stats: SchedulerStats::new(),
        }
    }

    /// Starts a scheduler from a validated configuration.
    pub fn from_config(config: &SchedulerConfig) -> Result<Self, SchedError> {
        config.validate()?;
        Ok(Self::start(config.num_cores, config.discipline))
    }

    /// Handles a job arrival.
    ///
    /// Returns the core the job should run on (possibly preempting that
    /// core's job), or `None` if it was queued.
    ///
    /// # Panics
    /// If `time` is earlier than the previous event or `job_id` is
    /// already live.
    pub fn job_arrived(
        &mut self,
        job_id: JobId,
        time: Time,
        total_run_time: Time,
        priority: Priority,
    ) -> Option<CoreId> {
        self.advance_clock(time);
        assert!(
            !self.locations.contains_key(&job_id),
            "job {job_id} arrived while already scheduled"
        );

        let mut job = Job::new(job_id, time, total_run_time, priority);

        if let Some(core) = self.first_idle_core() {
            job.start_time = Some(time);
            debug!("t={time}: job {job_id} assigned to idle core {core}");
            self.assign(core, job);
            self.after_event();
            return Some(core);
        }

        if self.rule.is_preemptive() {
            if let Some(core) = self.select_preemption(&job) {
                let mut displaced = self.release(core);
                if displaced.start_time == Some(time) {
                    displaced.start_time = None;
                }
                job.start_time = Some(time);
                debug!(
                    "t={time}: job {job_id} preempts job {} on core {core} after {} units",
                    displaced.id,
                    displaced.consumed_time()
                );
                self.assign(core, job);
                self.enqueue(displaced);
                self.after_event();
                return Some(core);
            }
        }

        let position = self.enqueue(job);
        debug!("t={time}: job {job_id} queued at position {position}");
        self.after_event();
        None
    }

    /// Handles a job completing on `core_id`.
    ///
    /// Returns the id of the job that now runs on the core, or `None` if
    /// the core goes idle.
    ///
    /// # Panics
    /// If `core_id` is idle or out of range, if it does not run `job_id`,
    /// or if `time` is earlier than the previous event.
    pub fn job_finished(&mut self, core_id: CoreId, job_id: JobId, time: Time) -> Option<JobId> {
        self.advance_clock(time);

        let running = self.running_job(core_id).id;
        assert_eq!(
            running, job_id,
            "core {core_id} runs job {running}, not job {job_id}"
        );

        let finished = self.release(core_id);
        self.stats.record(&finished, time);
        debug!("t={time}: job {job_id} finished on core {core_id}");

        let next = self.waiting.remove_head().map(|mut next| {
            next.mark_started(time);
            let id = next.id;
            debug!("t={time}: job {id} takes over core {core_id}");
            self.assign(core_id, next);
            id
        });
        self.after_event();
        next
    }

    /// Handles the time slice on `core_id` running out.
    ///
    /// The incumbent goes back into the queue (where the discipline puts
    /// it) and the queue head takes the core. Returns the id of the job
    /// that runs next, which is the incumbent when nothing is waiting.
    ///
    /// # Panics
    /// If `core_id` is idle or out of range, or if `time` is earlier than
    /// the previous event.
    pub fn quantum_expired(&mut self, core_id: CoreId, time: Time) -> JobId {
        self.advance_clock(time);

        if self.waiting.is_empty() {
            return self.running_job(core_id).id;
        }

        let current = self.release(core_id);
        let current_id = current.id;
        self.enqueue(current);

        let mut next = match self.waiting.remove_head() {
            Some(job) => job,
            None => unreachable!("queue holds at least the expired job"),
        };
        next.mark_started(time);
        let next_id = next.id;
        if next_id != current_id {
            debug!("t={time}: quantum expired on core {core_id}, job {current_id} -> job {next_id}");
        }
        self.assign(core_id, next);
        self.after_event();
        next_id
    }

    /// Mean waiting time of completed jobs, or 0.0 if none completed.
    pub fn average_waiting_time(&self) -> f64 {
        self.stats.average_waiting_time()
    }

    /// Mean turnaround time of completed jobs, or 0.0 if none completed.
    pub fn average_turnaround_time(&self) -> f64 {
        self.stats.average_turnaround_time()
    }

    /// Mean response time of completed jobs, or 0.0 if none completed.
    pub fn average_response_time(&self) -> f64 {
        self.stats.average_response_time()
    }

    /// Discards every running and waiting job and returns the final
    /// statistics.
    pub fn shutdown(self) -> SchedulerStats {
        let running = self.cores.iter().flatten().count();
        let waiting = self.waiting.destroy();
        info!(
            "scheduler shut down at t={}: {} completed, {} running and {} waiting discarded",
            self.clock, self.stats.completed_job_count, running, waiting
        );
        self.stats
    }

    /// Current simulated time.
    pub fn now(&self) -> Time {
        self.clock
    }

    /// Active discipline.
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Number of cores.
    pub fn num_cores(&self) -> usize {
        self.cores.len()
    }

    /// The job on `core_id`, or `None` if idle or out of range.
    pub fn core(&self, core_id: CoreId) -> Option<&Job> {
        self.cores.get(core_id).and_then(Option::as_ref)
    }

    /// Indices of idle cores, lowest first.
    pub fn idle_cores(&self) -> Vec<CoreId> {
        self.cores
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(core, _)| core)
            .collect()
    }

    /// Number of waiting jobs.
    pub fn waiting_len(&self) -> usize {
        self.waiting.size()
    }

    /// Waiting jobs in queue order.
    pub fn waiting_jobs(&self) -> impl Iterator<Item = &Job> {
        self.waiting.iter()
    }

    /// Where `job_id` currently lives, or `None` if it is not live.
    pub fn locate(&self, job_id: JobId) -> Option<JobLocation> {
        self.locations.get(&job_id).copied()
    }

    /// Statistics accrued so far.
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Waiting jobs in queue order, for diagnostics.
    pub fn queue_snapshot(&self) -> Vec<QueueEntry> {
        self.waiting.iter().map(QueueEntry::from).collect()
    }

    /// Renders the waiting queue one job per line, for diagnostics.
    pub fn dump_queue(&self) -> String {
        self.queue_snapshot()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn advance_clock(&mut self, time: Time) {
        assert!(
            time >= self.clock,
            "event at t={time} precedes current time t={}",
            self.clock
        );
        let elapsed = time - self.clock;
        if elapsed > 0 {
            for job in self.cores.iter_mut().flatten() {
                job.remaining_time -= elapsed;
            }
        }
        self.clock = time;
    }

    fn first_idle_core(&self) -> Option<CoreId> {
        self.cores.iter().position(Option::is_none)
    }

    fn select_preemption(&self, arriving: &Job) -> Option<CoreId> {
        let mut candidate = arriving;
        let mut chosen = None;
        for (core, slot) in self.cores.iter().enumerate() {
            let Some(running) = slot else { continue };
            if self.waiting.compare(candidate, running) == Ordering::Less {
                chosen = Some(core);
                candidate = running;
            }
        }
        chosen
    }

    fn running_job(&self, core_id: CoreId) -> &Job {
        match self.cores.get(core_id) {
            Some(Some(job)) => job,
            Some(None) => panic!("core {core_id} is idle"),
            None => panic!(
                "core {core_id} out of range (scheduler has {} cores)",
                self.cores.len()
            ),
        }
    }

    fn assign(&mut self, core_id: CoreId, job: Job) {
        debug_assert!(self.cores[core_id].is_none(), "core {core_id} already busy");
        self.locations.insert(job.id, JobLocation::Running(core_id));
        self.cores[core_id] = Some(job);
    }

    fn release(&mut self, core_id: CoreId) -> Job {
        let num_cores = self.cores.len();
        let Some(slot) = self.cores.get_mut(core_id) else {
            panic!("core {core_id} out of range (scheduler has {num_cores} cores)");
        };
        let Some(job) = slot.take() else {
            panic!("core {core_id} is idle");
        };
        self.locations.remove(&job.id);
        job
    }

    fn enqueue(&mut self, job: Job) -> usize {
        self.locations.insert(job.id, JobLocation::Waiting);
        self.waiting.insert(job)
    }

    fn after_event(&self) {
        if cfg!(debug_assertions) {
            self.check_ownership();
        }
        if log_enabled!(Level::Trace) {
            trace!("t={} queue:\n{}", self.clock, self.dump_queue());
        }
    }

    fn check_ownership(&self) {
        let mut live = 0;
        for (core, slot) in self.cores.iter().enumerate() {
            if let Some(job) = slot {
                live += 1;
                debug_assert_eq!(
                    self.locations.get(&job.id),
                    Some(&JobLocation::Running(core)),
                    "job {} on core {core} has a stale location",
                    job.id
                );
                debug_assert!(job.has_started(), "running job {} never started", job.id);
                debug_assert!(
                    job.remaining_time >= 0,
                    "job {} on core {core} overran by {}",
                    job.id,
                    -job.remaining_time
                );
            }
        }
        for job in self.waiting.iter() {
            live += 1;
            debug_assert!(
                (0..=job.total_run_time).contains(&job.consumed_time()),
                "queued job {} has consumed {} of {}",
                job.id,
                job.consumed_time(),
                job.total_run_time
            );
            debug_assert_eq!(
                self.locations.get(&job.id),
                Some(&JobLocation::Waiting),
                "queued job {} has a stale location",
                job.id
            );
        }
        debug_assert_eq!(live, self.locations.len(), "location index out of sync");
    }
}
