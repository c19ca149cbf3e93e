use std::cmp::Ordering;

use super::state::{JobState, SchedCtx};
use crate::scheduler::Discipline;

/// Debug-build consistency checks, run after every engine operation.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx, discipline: Discipline) {
        self.step += 1;

        if !cfg!(debug_assertions) {
            return;
        }

        for core in &ctx.cores {
            if let Some(key) = core.current {
                let job = ctx.job(key);
                debug_assert_eq!(
                    job.state,
                    JobState::Running,
                    "core.current job {} must be Running",
                    job.id
                );
                debug_assert_eq!(
                    job.current_core,
                    Some(core.id),
                    "Job {} metadata current_core mismatch",
                    job.id
                );
                debug_assert!(job.start_time.is_some(), "Running job {} never started", job.id);
            }
        }

        for &key in ctx.ready.iter() {
            let job = ctx.job(key);
            debug_assert_eq!(
                job.state,
                JobState::Waiting,
                "Queued job {} must be Waiting",
                job.id
            );
            debug_assert_eq!(
                ctx.ready.iter().filter(|&&queued| queued == key).count(),
                1,
                "Job {} queued twice",
                job.id
            );
        }

        let mut queued = ctx.ready.iter().map(|&key| ctx.job(key));
        if let Some(mut prev) = queued.next() {
            for job in queued {
                debug_assert_ne!(
                    discipline.compare(prev, job),
                    Ordering::Greater,
                    "Ready queue out of order: job {} before job {}",
                    prev.id,
                    job.id
                );
                prev = job;
            }
        }

        let running = ctx.cores.iter().filter(|core| core.is_busy()).count();
        let waiting = ctx.ready.len();
        let by_state = |state: JobState| ctx.jobs.values().filter(|job| job.state == state).count();
        debug_assert_eq!(running, by_state(JobState::Running), "Running job not on a core");
        debug_assert_eq!(waiting, by_state(JobState::Waiting), "Waiting job not queued");
        debug_assert_eq!(by_state(JobState::Unscheduled), 0, "Job left unscheduled");
        debug_assert!(
            ctx.pick_idle_core().is_none() || ctx.ready.is_empty(),
            "Idle core while jobs wait"
        );
    }
}
