use std::cmp::Ordering;

use super::{Job, Policy, Preemption};

/// Round robin. Every job compares equal, so the ready queue is FIFO.
pub struct RoundRobin;

impl Policy for RoundRobin {
    fn compare_key(&self, _a: &Job, _b: &Job) -> Ordering {
        Ordering::Equal
    }

    fn preemption(&self) -> Preemption {
        Preemption::OnQuantum
    }

    fn compare(&self, _a: &Job, _b: &Job) -> Ordering {
        Ordering::Equal
    }
}
