use std::num::NonZeroU64;

use average::{Estimate, Mean};
use rustc_hash::FxHashMap;
use tracing::trace;

use super::job::{JobOutcome, Slice, WorkloadJob};
use crate::{
    core::{CoreId, JobId, SchedEngine, SchedError, Ticks},
    scheduler::Discipline,
};

#[derive(Debug, Clone, Copy)]
struct Running {
    job: JobId,
    since: Ticks,
}

/// Replays a workload against a [`SchedEngine`], advancing simulated time
/// from one event to the next.
///
/// At each instant completions are delivered first, then quantum expiries,
/// then arrivals.
pub struct Sim {
    engine: SchedEngine,
    jobs: Vec<WorkloadJob>,
    job_cursor: usize,
    quantum: Option<NonZeroU64>,
    // What the driver believes each core is running
    cores: Vec<Option<Running>>,
    remaining: FxHashMap<JobId, Ticks>,
    slices: Vec<Slice>,
    now: Ticks,
}

#[derive(Debug, Clone)]
pub struct SimReport {
    pub discipline: Discipline,
    pub outcomes: Vec<JobOutcome>,
    pub slices: Vec<Slice>,
    pub end_time: Ticks,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
}

impl SimReport {
    /// Mean of `metric` over all outcomes, 0.0 when nothing completed.
    pub fn mean_by(&self, metric: impl Fn(&JobOutcome) -> Ticks) -> f64 {
        let mean: Mean = self.outcomes.iter().map(|o| metric(o) as f64).collect();
        if mean.is_empty() { 0.0 } else { mean.estimate() }
    }

    pub fn outcome(&self, id: JobId) -> Option<&JobOutcome> {
        self.outcomes.iter().find(|o| o.job.id == id)
    }

    pub fn slices_of(&self, id: JobId) -> impl Iterator<Item = &Slice> {
        self.slices.iter().filter(move |s| s.job == id)
    }
}

impl Sim {
    pub fn new(
        mut jobs: Vec<WorkloadJob>,
        num_cores: usize,
        discipline: Discipline,
        quantum: Option<NonZeroU64>,
    ) -> Result<Self, SchedError> {
        jobs.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        let engine = SchedEngine::startup(num_cores, discipline)?;
        // Quantum only means something under RR
        let quantum = quantum.filter(|_| discipline == Discipline::Rr);

        Ok(Self {
            engine,
            jobs,
            job_cursor: 0,
            quantum,
            cores: vec![None; num_cores],
            remaining: FxHashMap::default(),
            slices: Vec::new(),
            now: 0,
        })
    }

    pub fn run(mut self) -> Result<SimReport, SchedError> {
        while let Some(now) = self.next_event_time() {
            self.now = now;
            self.step()?;
        }
        Ok(self.into_report())
    }

    /// Deliver every event due at the current time.
    pub fn step(&mut self) -> Result<(), SchedError> {
        let now = self.now;

        for core in 0..self.cores.len() {
            let Some(running) = self.cores[core] else {
                continue;
            };
            if running.since + self.remaining_of(running.job) == now {
                self.stop(core);
                let next = self.engine.on_job_finished(core, running.job, now)?;
                self.start(core, next);
            }
        }

        if let Some(quantum) = self.quantum {
            for core in 0..self.cores.len() {
                let Some(running) = self.cores[core] else {
                    continue;
                };
                if running.since + quantum.get() == now {
                    self.stop(core);
                    let next = self.engine.on_quantum_expired(core, now)?;
                    self.start(core, next);
                }
            }
        }

        while let Some(job) = self.jobs.get(self.job_cursor) {
            if job.arrival_time != now {
                break;
            }
            let job = job.clone();
            self.job_cursor += 1;
            self.remaining.insert(job.id, job.running_time);

            let placed =
                self.engine
                    .on_job_arrival(job.id, job.arrival_time, job.running_time, job.priority)?;
            if let Some(core) = placed {
                if self.cores[core].is_some() {
                    self.stop(core);
                }
                self.start(core, Some(job.id));
            }
        }

        Ok(())
    }

    fn next_event_time(&self) -> Option<Ticks> {
        let arrival = self.jobs.get(self.job_cursor).map(|job| job.arrival_time);
        let running = self.cores.iter().flatten();
        let completion = running
            .clone()
            .map(|r| r.since + self.remaining_of(r.job))
            .min();
        let expiry = self
            .quantum
            .and_then(|q| running.map(|r| r.since + q.get()).min());

        [arrival, completion, expiry].into_iter().flatten().min()
    }

    fn remaining_of(&self, job: JobId) -> Ticks {
        self.remaining
            .get(&job)
            .copied()
            .expect("Running job missing remaining time")
    }

    // Take the current job off `core`, billing it for the time it ran.
    fn stop(&mut self, core: CoreId) {
        let Some(running) = self.cores[core].take() else {
            return;
        };

        let slice = Slice {
            job: running.job,
            core,
            start: running.since,
            end: self.now,
        };
        if let Some(left) = self.remaining.get_mut(&running.job) {
            *left = left.saturating_sub(slice.len());
        }
        if !slice.is_empty() {
            trace!(?slice, "slice");
            self.slices.push(slice);
        }
    }

    fn start(&mut self, core: CoreId, job: Option<JobId>) {
        self.cores[core] = job.map(|job| Running {
            job,
            since: self.now,
        });
    }

    fn into_report(self) -> SimReport {
        let outcomes = self
            .jobs
            .iter()
            .filter_map(|job| {
                let record = self.engine.job(job.id)?;
                Some(JobOutcome {
                    job: job.clone(),
                    start_time: record.start_time?,
                    end_time: record.end_time?,
                })
            })
            .collect();

        let discipline = self.engine.discipline();
        let stats = self.engine.cleanup();
        SimReport {
            discipline,
            outcomes,
            slices: self.slices,
            end_time: self.now,
            average_waiting_time: stats.average_waiting_time(),
            average_turnaround_time: stats.average_turnaround_time(),
            average_response_time: stats.average_response_time(),
        }
    }
}
