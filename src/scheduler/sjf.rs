use std::cmp::Ordering;

use super::{Job, Policy, Preemption};

/// Shortest job first, keyed on total burst. Non-preemptive.
pub struct Sjf;

/// Preemptive shortest job first, keyed on remaining time.
pub struct Psjf;

impl Policy for Sjf {
    fn compare_key(&self, a: &Job, b: &Job) -> Ordering {
        a.running_time.cmp(&b.running_time)
    }

    fn preemption(&self) -> Preemption {
        Preemption::Never
    }
}

impl Policy for Psjf {
    fn compare_key(&self, a: &Job, b: &Job) -> Ordering {
        a.remaining_time.cmp(&b.remaining_time)
    }

    fn preemption(&self) -> Preemption {
        Preemption::OnArrival
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_job;

    #[test]
    fn sjf_ignores_progress() {
        let long = Job {
            remaining_time: 1,
            ..test_job(1, 0, 8, 0)
        };
        let short = test_job(2, 1, 4, 0);
        assert_eq!(Sjf.compare(&short, &long), Ordering::Less);
        assert_eq!(Psjf.compare(&short, &long), Ordering::Greater);
    }

    #[test]
    fn ties_fall_back_to_arrival() {
        let a = test_job(7, 2, 4, 0);
        let b = test_job(3, 5, 4, 0);
        assert_eq!(Sjf.compare(&a, &b), Ordering::Less);
        assert_eq!(Psjf.compare(&b, &a), Ordering::Greater);
        assert_eq!(Psjf.compare_key(&b, &a), Ordering::Equal);
    }
}
