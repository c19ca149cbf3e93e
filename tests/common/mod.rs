#![allow(dead_code)]

use std::num::NonZeroU64;

use cpusched::{
    Discipline, SchedEngine, Sim, SimReport, WorkloadJob,
    core::{JobId, Priority, Ticks},
};

/// Initialize tracing from `RUST_LOG`. Safe to call from every test.
pub fn setup_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn engine(num_cores: usize, discipline: Discipline) -> SchedEngine {
    setup_test();
    SchedEngine::startup(num_cores, discipline).expect("valid engine config")
}

pub fn job(id: JobId, arrival_time: Ticks, running_time: Ticks, priority: Priority) -> WorkloadJob {
    WorkloadJob {
        id,
        arrival_time,
        running_time,
        priority,
    }
}

pub fn run(
    jobs: Vec<WorkloadJob>,
    num_cores: usize,
    discipline: Discipline,
    quantum: Option<u64>,
) -> SimReport {
    setup_test();
    Sim::new(jobs, num_cores, discipline, quantum.and_then(NonZeroU64::new))
        .expect("valid sim config")
        .run()
        .expect("simulation completes")
}

/// `(job, start, end)` for every slice, in execution order.
pub fn timeline(report: &SimReport) -> Vec<(JobId, Ticks, Ticks)> {
    report
        .slices
        .iter()
        .map(|s| (s.job, s.start, s.end))
        .collect()
}

#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
