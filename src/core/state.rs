use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use super::{queue::OrderedQueue, stats::waiting_time};

pub type JobId = u64;
pub type CoreId = usize;
pub type Ticks = u64;
// Lower value is more urgent
pub type Priority = i32;

new_key_type! {
    pub struct JobKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Unscheduled,
    Waiting,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub priority: Priority,
    pub arrival_time: Ticks,
    pub running_time: Ticks,
    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub end_time: Option<Ticks>,
    pub state: JobState,
    pub current_core: Option<CoreId>,
}

impl Job {
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.end_time.map(|end| end - self.arrival_time)
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.turnaround_time()
            .map(|turnaround| waiting_time(turnaround, self.running_time))
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.start_time.map(|start| start - self.arrival_time)
    }
}

#[derive(Debug)]
pub struct CoreState {
    pub id: CoreId,
    pub current: Option<JobKey>,
    // Time the current occupant was last placed on (or charged on) this core
    pub dispatched_at: Ticks,
}

impl CoreState {
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }
}

/// Everything the engine owns: cores, the job arena and the ready queue.
///
/// Jobs live in the arena for the whole run. Cores and the ready queue only
/// hold `JobKey`s into it.
#[derive(Debug)]
pub struct SchedCtx {
    pub cores: Vec<CoreState>,
    pub jobs: SlotMap<JobKey, Job>,
    pub job_keys: FxHashMap<JobId, JobKey>,
    pub ready: OrderedQueue<JobKey>,
}

impl SchedCtx {
    pub fn new(num_cores: usize) -> Self {
        Self {
            cores: (0..num_cores)
                .map(|id| CoreState {
                    id,
                    current: None,
                    dispatched_at: 0,
                })
                .collect(),
            jobs: SlotMap::with_key(),
            job_keys: FxHashMap::default(),
            ready: OrderedQueue::new(),
        }
    }

    pub fn create_job(
        &mut self,
        id: JobId,
        arrival_time: Ticks,
        running_time: Ticks,
        priority: Priority,
    ) -> JobKey {
        debug_assert!(
            !self.job_keys.contains_key(&id),
            "Job {id} already exists"
        );

        let key = self.jobs.insert(Job {
            id,
            priority,
            arrival_time,
            running_time,
            remaining_time: running_time,
            start_time: None,
            end_time: None,
            state: JobState::Unscheduled,
            current_core: None,
        });
        self.job_keys.insert(id, key);
        key
    }

    pub fn key_of(&self, id: JobId) -> Option<JobKey> {
        self.job_keys.get(&id).copied()
    }

    pub fn job(&self, key: JobKey) -> &Job {
        &self.jobs[key]
    }

    pub fn job_mut(&mut self, key: JobKey) -> &mut Job {
        &mut self.jobs[key]
    }

    pub fn num_cores(&self) -> usize {
        self.cores.len()
    }

    pub fn pick_idle_core(&self) -> Option<CoreId> {
        self.cores
            .iter()
            .find(|core| !core.is_busy())
            .map(|core| core.id)
    }

    pub fn running_on(&self, core: CoreId) -> Option<JobKey> {
        self.cores[core].current
    }

    /// Place `key` on an idle `core` at `time`. Returns true when this is the
    /// job's first dispatch.
    pub fn set_running(&mut self, core: CoreId, key: JobKey, time: Ticks) -> bool {
        debug_assert!(
            self.cores[core].current.is_none(),
            "Core {core} already running a job"
        );

        let slot = &mut self.cores[core];
        slot.current = Some(key);
        slot.dispatched_at = time;

        let job = self.job_mut(key);
        debug_assert!(
            matches!(job.state, JobState::Unscheduled | JobState::Waiting),
            "Job {} dispatched from state {:?}",
            job.id,
            job.state
        );
        job.state = JobState::Running;
        job.current_core = Some(core);

        let first = job.start_time.is_none();
        if first {
            job.start_time = Some(time);
        }
        first
    }

    /// Empty `core` and return its previous occupant.
    pub fn clear_core(&mut self, core: CoreId) -> Option<JobKey> {
        let key = self.cores[core].current.take()?;
        self.job_mut(key).current_core = None;
        Some(key)
    }

    /// Bill the occupant of `core` for the time it ran since its last
    /// dispatch (or last charge) and restart the meter at `time`.
    /// Returns the elapsed time and whether it overran the job's remaining time.
    pub fn charge(&mut self, core: CoreId, time: Ticks) -> Option<(Ticks, bool)> {
        let slot = &mut self.cores[core];
        let key = slot.current?;
        let elapsed = time - slot.dispatched_at;
        slot.dispatched_at = time;

        let job = self.job_mut(key);
        let overran = elapsed > job.remaining_time;
        job.remaining_time = job.remaining_time.saturating_sub(elapsed);
        Some((elapsed, overran))
    }

    pub fn mark_waiting(&mut self, key: JobKey) {
        let job = self.job_mut(key);
        debug_assert!(
            job.state != JobState::Completed,
            "Completed job {} cannot wait",
            job.id
        );
        job.state = JobState::Waiting;
        job.current_core = None;
    }

    pub fn mark_completed(&mut self, key: JobKey, end_time: Ticks) {
        let job = self.job_mut(key);
        debug_assert!(
            job.state == JobState::Running,
            "Job {} must have been running before marked complete",
            job.id
        );
        job.state = JobState::Completed;
        job.current_core = None;
        job.remaining_time = 0;
        job.end_time = Some(end_time);
    }
}
