//! Job ordering policies.
//!
//! Each scheduling discipline is a [`SchedulingRule`]: a three-way
//! comparison over two jobs plus a preemption flag. The waiting queue is
//! ordered by the active rule, and preemptive rules reuse the same
//! comparison to decide which running job to displace.
//!
//! # Ordering Convention
//! `Ordering::Less` means the first job should run earlier. Two jobs with
//! the same id always compare `Equal`.
//!
//! # Usage
//!
//! ```
//! use std::cmp::Ordering;
//! use u_cpusched::models::{Discipline, Job};
//! use u_cpusched::policy;
//!
//! let rule = policy::rule_for(Discipline::Sjf);
//! let short = Job::new(1, 5, 2, 0);
//! let long = Job::new(2, 0, 9, 0);
//! assert_eq!(rule.compare(&short, &long), Ordering::Less);
//! ```
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

pub mod rules;

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

use crate::models::{Discipline, Job};

/// A discipline's ordering over jobs.
pub trait SchedulingRule: Send + Sync + Debug {
    /// Rule name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Compares two jobs. `Less` = `a` should run before `b`.
    fn compare(&self, a: &Job, b: &Job) -> Ordering;

    /// Whether an arriving job may displace a running one.
    fn is_preemptive(&self) -> bool {
        false
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Returns the rule implementing `discipline`.
pub fn rule_for(discipline: Discipline) -> Arc<dyn SchedulingRule> {
    match discipline {
        Discipline::Fcfs => Arc::new(rules::Fcfs),
        Discipline::Sjf => Arc::new(rules::Sjf),
        Discipline::Psjf => Arc::new(rules::Psjf),
        Discipline::Pri => Arc::new(rules::Pri),
        Discipline::Ppri => Arc::new(rules::Ppri),
        Discipline::Rr => Arc::new(rules::Rr),
    }
}
