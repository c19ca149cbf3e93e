use std::cmp::Ordering;

use super::{Job, Policy, Preemption};

/// Static priority, lower number first.
///
/// The preemptive variant lets an arriving job displace a running job with a
/// strictly worse priority.
pub struct PriorityPolicy {
    pub preemptive: bool,
}

impl Policy for PriorityPolicy {
    fn compare_key(&self, a: &Job, b: &Job) -> Ordering {
        a.priority.cmp(&b.priority)
    }

    fn preemption(&self) -> Preemption {
        if self.preemptive {
            Preemption::OnArrival
        } else {
            Preemption::Never
        }
    }
}
