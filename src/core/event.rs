use super::state::{CoreId, JobId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Arrived {
        job: JobId,
        time: Ticks,
    },
    Dispatched {
        job: JobId,
        core: CoreId,
        time: Ticks,
        // First time this job ever ran
        first: bool,
    },
    Preempted {
        job: JobId,
        core: CoreId,
        time: Ticks,
    },
    // Entered the ready queue, on arrival or after losing its core
    Enqueued {
        job: JobId,
        position: usize,
    },
    Completed {
        job: JobId,
        core: CoreId,
        time: Ticks,
    },
    // Core left without work after a completion or expiry
    CoreIdle {
        core: CoreId,
        time: Ticks,
    },
}
