pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::core::{Job, SchedError};
pub use fcfs::Fcfs;
pub use priority::PriorityPolicy;
pub use round_robin::RoundRobin;
pub use sjf::{Psjf, Sjf};

/// When a policy lets a waiting job take a core away from a running one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preemption {
    /// Running jobs only give up their core by completing.
    Never,
    /// An arriving job may displace a running job it strictly precedes.
    OnArrival,
    /// Running jobs are requeued when the driver reports quantum expiry.
    OnQuantum,
}

/// A scheduling policy: an order over jobs plus its preemption rule.
///
/// `Less` means `a` should run before `b`.
pub trait Policy: Sync {
    /// Compare on the policy's own key only. Preemption decisions use this.
    fn compare_key(&self, a: &Job, b: &Job) -> Ordering;

    fn preemption(&self) -> Preemption;

    /// Ready queue order: the key, then arrival time. Whatever is still
    /// `Equal` keeps insertion order in the queue.
    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        self.compare_key(a, b)
            .then_with(|| a.arrival_time.cmp(&b.arrival_time))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discipline {
    Fcfs,
    Sjf,
    Psjf,
    Pri,
    Ppri,
    Rr,
}

static FCFS: Fcfs = Fcfs;
static SJF: Sjf = Sjf;
static PSJF: Psjf = Psjf;
static PRI: PriorityPolicy = PriorityPolicy { preemptive: false };
static PPRI: PriorityPolicy = PriorityPolicy { preemptive: true };
static RR: RoundRobin = RoundRobin;

impl Discipline {
    pub const ALL: [Discipline; 6] = [
        Discipline::Fcfs,
        Discipline::Sjf,
        Discipline::Psjf,
        Discipline::Pri,
        Discipline::Ppri,
        Discipline::Rr,
    ];

    pub fn policy(self) -> &'static dyn Policy {
        match self {
            Discipline::Fcfs => &FCFS,
            Discipline::Sjf => &SJF,
            Discipline::Psjf => &PSJF,
            Discipline::Pri => &PRI,
            Discipline::Ppri => &PPRI,
            Discipline::Rr => &RR,
        }
    }

    pub fn compare(self, a: &Job, b: &Job) -> Ordering {
        self.policy().compare(a, b)
    }

    pub fn preemption(self) -> Preemption {
        self.policy().preemption()
    }

    pub fn name(self) -> &'static str {
        match self {
            Discipline::Fcfs => "fcfs",
            Discipline::Sjf => "sjf",
            Discipline::Psjf => "psjf",
            Discipline::Pri => "pri",
            Discipline::Ppri => "ppri",
            Discipline::Rr => "rr",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
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
pub(crate) fn test_job(
    id: u64,
    arrival_time: u64,
    running_time: u64,
    priority: i32,
) -> Job {
    use crate::core::JobState;

    Job {
        id,
        priority,
        arrival_time,
        running_time,
        remaining_time: running_time,
        start_time: None,
        end_time: None,
        state: JobState::Waiting,
        current_core: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("PSJF".parse::<Discipline>().unwrap(), Discipline::Psjf);
        assert_eq!(" rr ".parse::<Discipline>().unwrap(), Discipline::Rr);
        assert!(matches!(
            "lottery".parse::<Discipline>(),
            Err(SchedError::UnknownDiscipline(name)) if name == "lottery"
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for d in Discipline::ALL {
            assert_eq!(d.to_string().parse::<Discipline>().unwrap(), d);
        }
    }

    #[test]
    fn preemption_table() {
        use Preemption::*;
        let expected = [Never, Never, OnArrival, Never, OnArrival, OnQuantum];
        for (d, p) in Discipline::ALL.into_iter().zip(expected) {
            assert_eq!(d.preemption(), p, "{d}");
        }
    }
}
