use crate::core::{CoreId, JobId, Priority, Ticks, stats::waiting_time};

/// One line of a workload trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadJob {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub running_time: Ticks,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub job: WorkloadJob,
    pub start_time: Ticks,
    pub end_time: Ticks,
}

impl JobOutcome {
    pub fn turnaround_time(&self) -> Ticks {
        self.end_time - self.job.arrival_time
    }

    pub fn waiting_time(&self) -> Ticks {
        waiting_time(self.turnaround_time(), self.job.running_time)
    }

    pub fn response_time(&self) -> Ticks {
        self.start_time - self.job.arrival_time
    }
}

/// An uninterrupted stretch of execution, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub job: JobId,
    pub core: CoreId,
    pub start: Ticks,
    pub end: Ticks,
}

impl Slice {
    pub fn len(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn early_finish_does_not_underflow_waiting() {
        let outcome = JobOutcome {
            job: WorkloadJob {
                id: 1,
                arrival_time: 4,
                running_time: 6,
                priority: 0,
            },
            start_time: 4,
            end_time: 7,
        };
        assert_eq!(outcome.turnaround_time(), 3);
        assert_eq!(outcome.waiting_time(), 0);
        assert_eq!(outcome.response_time(), 0);
    }
}
