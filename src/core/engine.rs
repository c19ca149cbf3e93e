use std::cmp::Ordering;

use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use super::{
    error::SchedError,
    event::SchedEvent,
    observer::Observer,
    state::{CoreId, Job, JobId, JobKey, Priority, SchedCtx, Ticks},
    stats::SchedStats,
};
use crate::scheduler::{Discipline, Preemption};

/// Event-driven scheduling engine.
///
/// The driver reports arrivals, completions and quantum expiries in
/// non-decreasing time order. Each call answers with the dispatch decision
/// the driver has to apply. The engine owns every job for the whole run.
pub struct SchedEngine {
    ctx: SchedCtx,
    discipline: Discipline,
    stats: SchedStats,
    observer: Observer,
    events: Vec<SchedEvent>,
    arrival_times: FxHashSet<Ticks>,
    last_time: Ticks,
}

impl SchedEngine {
    pub fn startup(num_cores: usize, discipline: Discipline) -> Result<Self, SchedError> {
        if num_cores == 0 {
            return Err(SchedError::InvalidCoreCount);
        }

        debug!(num_cores, %discipline, "scheduler startup");
        Ok(Self {
            ctx: SchedCtx::new(num_cores),
            discipline,
            stats: SchedStats::new(),
            observer: Observer::new(),
            events: Vec::new(),
            arrival_times: FxHashSet::default(),
            last_time: 0,
        })
    }

    /// A new job arrived at `time`. Returns the core it should run on, which
    /// may preempt that core's current job, or `None` if it has to wait.
    pub fn on_job_arrival(
        &mut self,
        id: JobId,
        time: Ticks,
        running_time: Ticks,
        priority: Priority,
    ) -> Result<Option<CoreId>, SchedError> {
        self.check_time(time)?;
        if self.ctx.key_of(id).is_some() {
            return Err(SchedError::DuplicateJob(id));
        }
        if self.arrival_times.contains(&time) {
            return Err(SchedError::DuplicateArrival { time });
        }

        self.last_time = time;
        self.arrival_times.insert(time);
        let key = self.ctx.create_job(id, time, running_time, priority);
        self.events.push(SchedEvent::Arrived { job: id, time });

        let decision = if let Some(core) = self.ctx.pick_idle_core() {
            self.dispatch(core, key, time);
            Some(core)
        } else if let Some(core) = self.preemption_victim(key, time) {
            self.preempt(core, time);
            self.dispatch(core, key, time);
            Some(core)
        } else {
            self.enqueue(key);
            None
        };

        self.observe();
        Ok(decision)
    }

    /// Job `id` finished on `core` at `time`. Returns the job to run next on
    /// that core, or `None` if it stays idle.
    pub fn on_job_finished(
        &mut self,
        core: CoreId,
        id: JobId,
        time: Ticks,
    ) -> Result<Option<JobId>, SchedError> {
        self.check_time(time)?;
        self.check_core(core)?;
        let key = self.ctx.key_of(id).ok_or(SchedError::UnknownJob(id))?;
        match self.ctx.job(key).current_core {
            Some(running_on) if running_on == core => {}
            Some(_) => return Err(SchedError::JobNotOnCore { job: id, core }),
            None => return Err(SchedError::JobNotRunning(id)),
        }

        self.last_time = time;
        self.charge(core, time);
        let remaining = self.ctx.job(key).remaining_time;
        if remaining != 0 {
            warn!(job = id, core, time, remaining, "job reported finished early");
        }

        self.ctx.clear_core(core);
        self.ctx.mark_completed(key, time);
        self.stats.record(self.ctx.job(key));
        debug!(job = id, core, time, "job completed");
        self.events.push(SchedEvent::Completed { job: id, core, time });

        let next = self.dispatch_next(core, time);
        self.observe();
        Ok(next)
    }

    /// The RR quantum ran out on `core` at `time`. The occupant goes to the
    /// back of the ready queue and the head of the queue takes the core.
    pub fn on_quantum_expired(
        &mut self,
        core: CoreId,
        time: Ticks,
    ) -> Result<Option<JobId>, SchedError> {
        if self.discipline.preemption() != Preemption::OnQuantum {
            return Err(SchedError::QuantumUnsupported(self.discipline));
        }
        self.check_time(time)?;
        self.check_core(core)?;
        self.last_time = time;

        let Some(key) = self.ctx.running_on(core) else {
            trace!(core, time, "quantum expired on idle core");
            self.observe();
            return Ok(None);
        };

        self.charge(core, time);
        let job = self.ctx.job(key);
        if job.remaining_time == 0 {
            // Completion still has to come through on_job_finished
            debug!(job = job.id, core, time, "quantum expired with no time left");
        }

        self.preempt(core, time);
        let next = self.dispatch_next(core, time);
        self.observe();
        Ok(next)
    }

    pub fn average_waiting_time(&self) -> f64 {
        self.stats.average_waiting_time()
    }

    pub fn average_turnaround_time(&self) -> f64 {
        self.stats.average_turnaround_time()
    }

    pub fn average_response_time(&self) -> f64 {
        self.stats.average_response_time()
    }

    /// Release every job and core. Returns the final statistics.
    pub fn cleanup(mut self) -> SchedStats {
        debug!(
            jobs = self.ctx.jobs.len(),
            completed = self.stats.completed(),
            waiting = self.ctx.ready.len(),
            steps = self.observer.steps(),
            "scheduler cleanup"
        );
        self.ctx.ready.clear();
        self.stats
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn num_cores(&self) -> usize {
        self.ctx.num_cores()
    }

    pub fn completed_jobs(&self) -> u64 {
        self.stats.completed()
    }

    pub fn stats(&self) -> &SchedStats {
        &self.stats
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.ctx.key_of(id).map(|key| self.ctx.job(key))
    }

    pub fn running_on(&self, core: CoreId) -> Option<JobId> {
        let key = self.ctx.cores.get(core)?.current?;
        Some(self.ctx.job(key).id)
    }

    /// Waiting jobs in queue order, then running jobs with their core.
    pub fn queue_snapshot(&self) -> Vec<(JobId, Option<CoreId>)> {
        let waiting = self
            .ctx
            .ready
            .iter()
            .map(|&key| (self.ctx.job(key).id, None));
        let running = self
            .ctx
            .cores
            .iter()
            .filter_map(|core| core.current.map(|key| (self.ctx.job(key).id, Some(core.id))));
        waiting.chain(running).collect()
    }

    pub fn drain_events(&mut self) -> Vec<SchedEvent> {
        std::mem::take(&mut self.events)
    }

    fn check_time(&self, time: Ticks) -> Result<(), SchedError> {
        if time < self.last_time {
            return Err(SchedError::TimeWentBackwards {
                time,
                last: self.last_time,
            });
        }
        Ok(())
    }

    fn check_core(&self, core: CoreId) -> Result<(), SchedError> {
        if core >= self.ctx.num_cores() {
            return Err(SchedError::InvalidCore {
                core,
                num_cores: self.ctx.num_cores(),
            });
        }
        Ok(())
    }

    // Among cores whose running job the arriving job strictly precedes on the
    // policy key, pick the one with the worst key, lowest core id on ties.
    fn preemption_victim(&mut self, incoming: JobKey, time: Ticks) -> Option<CoreId> {
        if self.discipline.preemption() != Preemption::OnArrival {
            return None;
        }

        // Remaining times of running jobs must be current before comparing
        for core in 0..self.ctx.num_cores() {
            self.charge(core, time);
        }

        let policy = self.discipline.policy();
        let incoming = self.ctx.job(incoming);
        let mut victim: Option<(CoreId, &Job)> = None;
        for core in &self.ctx.cores {
            let Some(key) = core.current else {
                continue;
            };
            let running = self.ctx.job(key);
            if policy.compare_key(incoming, running) != Ordering::Less {
                continue;
            }
            let worse = match victim {
                None => true,
                Some((_, worst)) => policy.compare_key(running, worst) == Ordering::Greater,
            };
            if worse {
                victim = Some((core.id, running));
            }
        }

        victim.map(|(core, _)| core)
    }

    fn charge(&mut self, core: CoreId, time: Ticks) {
        if let Some((elapsed, true)) = self.ctx.charge(core, time) {
            warn!(core, time, elapsed, "job ran past its remaining time");
        }
    }

    // Take the occupant off `core` and put it back in the ready queue.
    fn preempt(&mut self, core: CoreId, time: Ticks) {
        self.charge(core, time);
        let Some(key) = self.ctx.clear_core(core) else {
            return;
        };

        let job = self.ctx.job(key);
        debug!(job = job.id, core, time, remaining = job.remaining_time, "preempted");
        self.events.push(SchedEvent::Preempted {
            job: job.id,
            core,
            time,
        });
        self.enqueue(key);
    }

    fn enqueue(&mut self, key: JobKey) -> usize {
        self.ctx.mark_waiting(key);

        let discipline = self.discipline;
        let jobs = &self.ctx.jobs;
        let position = self
            .ctx
            .ready
            .offer_by(key, |a, b| discipline.compare(&jobs[*a], &jobs[*b]));

        let id = self.ctx.job(key).id;
        trace!(job = id, position, queued = self.ctx.ready.len(), "enqueued");
        self.events.push(SchedEvent::Enqueued { job: id, position });
        position
    }

    fn dispatch(&mut self, core: CoreId, key: JobKey, time: Ticks) {
        let first = self.ctx.set_running(core, key, time);
        let id = self.ctx.job(key).id;
        debug!(job = id, core, time, first, "dispatch");
        self.events.push(SchedEvent::Dispatched {
            job: id,
            core,
            time,
            first,
        });
    }

    fn dispatch_next(&mut self, core: CoreId, time: Ticks) -> Option<JobId> {
        match self.ctx.ready.poll() {
            Some(key) => {
                self.dispatch(core, key, time);
                Some(self.ctx.job(key).id)
            }
            None => {
                debug!(core, time, "core idle");
                self.events.push(SchedEvent::CoreIdle { core, time });
                None
            }
        }
    }

    fn observe(&mut self) {
        self.observer.observe(&self.ctx, self.discipline);
    }
}
