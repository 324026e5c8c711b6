//! Scheduling disciplines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchedError;

/// The scheduling policy selected when the scheduler starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Discipline {
    /// First come, first served.
    Fcfs,
    /// Shortest job first (non-preemptive).
    Sjf,
    /// Preemptive shortest job first (shortest remaining time).
    Psjf,
    /// Priority (non-preemptive).
    Pri,
    /// Preemptive priority.
    Ppri,
    /// Round robin.
    Rr,
}

impl Discipline {
    /// All disciplines, in declaration order.
    pub const ALL: [Discipline; 6] = [
        Discipline::Fcfs,
        Discipline::Sjf,
        Discipline::Psjf,
        Discipline::Pri,
        Discipline::Ppri,
        Discipline::Rr,
    ];

    /// Short upper-case name (e.g., "PSJF").
    pub fn name(self) -> &'static str {
        match self {
            Discipline::Fcfs => "FCFS",
            Discipline::Sjf => "SJF",
            Discipline::Psjf => "PSJF",
            Discipline::Pri => "PRI",
            Discipline::Ppri => "PPRI",
            Discipline::Rr => "RR",
        }
    }

    /// Whether an arriving job may displace a running one.
    pub fn is_preemptive(self) -> bool {
        matches!(self, Discipline::Psjf | Discipline::Ppri)
    }

    /// Whether the driver is expected to deliver quantum expiries.
    pub fn uses_quantum(self) -> bool {
        matches!(self, Discipline::Rr)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Discipline {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Discipline::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchedError::UnknownDiscipline(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("fcfs".parse::<Discipline>().unwrap(), Discipline::Fcfs);
        assert_eq!("PSJF".parse::<Discipline>().unwrap(), Discipline::Psjf);
        assert_eq!(" Rr ".parse::<Discipline>().unwrap(), Discipline::Rr);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "lottery".parse::<Discipline>().unwrap_err();
        assert_eq!(err, SchedError::UnknownDiscipline("lottery".into()));
    }

    #[test]
    fn test_preemptive_flags() {
        let preemptive: Vec<_> = Discipline::ALL
            .into_iter()
            .filter(|d| d.is_preemptive())
            .collect();
        assert_eq!(preemptive, vec![Discipline::Psjf, Discipline::Ppri]);
    }

    #[test]
    fn test_display_matches_name() {
        for d in Discipline::ALL {
            assert_eq!(d.to_string(), d.name());
            assert_eq!(d.to_string().parse::<Discipline>().unwrap(), d);
        }
    }

    #[test]
    fn test_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Discipline::Ppri).unwrap(), "\"PPRI\"");
        let d: Discipline = serde_json::from_str("\"SJF\"").unwrap();
        assert_eq!(d, Discipline::Sjf);
    }
}
