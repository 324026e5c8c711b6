//! Built-in ordering rules, one per discipline.
//!
//! Every rule first checks identity: a job never sorts before or after
//! itself. Keyed rules break ties by arrival time.

use std::cmp::Ordering;

use super::SchedulingRule;
use crate::models::Job;

fn by_key_then_arrival<K: Ord>(a: &Job, b: &Job, key: impl Fn(&Job) -> K) -> Ordering {
    if a.id == b.id {
        return Ordering::Equal;
    }
    key(a)
        .cmp(&key(b))
        .then_with(|| a.arrival_time.cmp(&b.arrival_time))
}

/// First Come, First Served.
///
/// Orders by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl SchedulingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        if a.id == b.id {
            return Ordering::Equal;
        }
        a.arrival_time.cmp(&b.arrival_time)
    }

    fn description(&self) -> &'static str {
        "First Come, First Served"
    }
}

/// Shortest Job First.
///
/// Orders by total run time; the job keeps its core once started.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl SchedulingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        by_key_then_arrival(a, b, |j| j.total_run_time)
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Preemptive Shortest Job First (shortest remaining time first).
///
/// Orders by remaining time, so callers must bring running jobs'
/// `remaining_time` up to date before comparing.
#[derive(Debug, Clone, Copy)]
pub struct Psjf;

impl SchedulingRule for Psjf {
    fn name(&self) -> &'static str {
        "PSJF"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        by_key_then_arrival(a, b, |j| j.remaining_time)
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Preemptive Shortest Job First"
    }
}

/// Priority (lower value first), non-preemptive.
#[derive(Debug, Clone, Copy)]
pub struct Pri;

impl SchedulingRule for Pri {
    fn name(&self) -> &'static str {
        "PRI"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        by_key_then_arrival(a, b, |j| j.priority)
    }

    fn description(&self) -> &'static str {
        "Priority"
    }
}

/// Preemptive Priority.
#[derive(Debug, Clone, Copy)]
pub struct Ppri;

impl SchedulingRule for Ppri {
    fn name(&self) -> &'static str {
        "PPRI"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        by_key_then_arrival(a, b, |j| j.priority)
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Preemptive Priority"
    }
}

/// Round Robin.
///
/// Every distinct job compares as later, so an ordered queue using this
/// rule degenerates to FIFO by insertion order.
#[derive(Debug, Clone, Copy)]
pub struct Rr;

impl SchedulingRule for Rr {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        if a.id == b.id {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: u64, arrival: i64, run: i64, priority: i32) -> Job {
        Job::new(id, arrival, run, priority)
    }

    #[test]
    fn test_identity_always_equal() {
        let mut a = job(1, 0, 5, 3);
        let b = a.clone();
        a.remaining_time = 1;
        assert_eq!(Fcfs.compare(&a, &b), Ordering::Equal);
        assert_eq!(Sjf.compare(&a, &b), Ordering::Equal);
        assert_eq!(Psjf.compare(&a, &b), Ordering::Equal);
        assert_eq!(Pri.compare(&a, &b), Ordering::Equal);
        assert_eq!(Ppri.compare(&a, &b), Ordering::Equal);
        assert_eq!(Rr.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_fcfs_by_arrival() {
        assert_eq!(Fcfs.compare(&job(1, 0, 9, 9), &job(2, 1, 1, 0)), Ordering::Less);
        assert_eq!(Fcfs.compare(&job(1, 4, 1, 0), &job(2, 1, 1, 0)), Ordering::Greater);
    }

    #[test]
    fn test_sjf_tie_break_arrival() {
        assert_eq!(Sjf.compare(&job(1, 5, 2, 0), &job(2, 0, 3, 0)), Ordering::Less);
        assert_eq!(Sjf.compare(&job(1, 5, 3, 0), &job(2, 0, 3, 0)), Ordering::Greater);
    }

    #[test]
    fn test_psjf_uses_remaining_time() {
        let mut long = job(1, 0, 10, 0);
        let short = job(2, 1, 4, 0);
        assert_eq!(Psjf.compare(&short, &long), Ordering::Less);
        long.remaining_time = 3;
        assert_eq!(Psjf.compare(&short, &long), Ordering::Greater);
        // Sjf ignores progress
        assert_eq!(Sjf.compare(&short, &long), Ordering::Less);
    }

    #[test]
    fn test_priority_lower_value_wins() {
        let urgent = job(1, 3, 10, 1);
        let lazy = job(2, 0, 1, 5);
        assert_eq!(Pri.compare(&urgent, &lazy), Ordering::Less);
        assert_eq!(Ppri.compare(&urgent, &lazy), Ordering::Less);
        assert_eq!(Pri.compare(&job(3, 0, 1, 2), &job(4, 1, 1, 2)), Ordering::Less);
    }

    #[test]
    fn test_rr_never_favors_anyone() {
        let a = job(1, 0, 1, 0);
        let b = job(2, 5, 1, 0);
        assert_eq!(Rr.compare(&a, &b), Ordering::Greater);
        assert_eq!(Rr.compare(&b, &a), Ordering::Greater);
    }
}
