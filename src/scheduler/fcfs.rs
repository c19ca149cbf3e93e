use std::cmp::Ordering;

use super::{Job, Policy, Preemption};

/// First come, first served.
pub struct Fcfs;

impl Policy for Fcfs {
    fn compare_key(&self, a: &Job, b: &Job) -> Ordering {
        a.arrival_time.cmp(&b.arrival_time)
    }

    fn preemption(&self) -> Preemption {
        Preemption::Never
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_job;

    #[test]
    fn earlier_arrival_first() {
        let early = test_job(1, 0, 50, 9);
        let late = test_job(0, 3, 1, 0);
        assert_eq!(Fcfs.compare(&early, &late), Ordering::Less);
        assert_eq!(Fcfs.compare(&late, &early), Ordering::Greater);
    }
}
