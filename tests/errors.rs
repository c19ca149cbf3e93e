//! Contract violations and not-found conditions are reported, never absorbed.

use std::num::NonZeroU64;

use cpusched::{Discipline, JobState, SchedEngine, SchedError, Sim};

mod common;
use common::{engine, job};

#[test]
fn startup_needs_a_core() {
    assert_eq!(
        SchedEngine::startup(0, Discipline::Rr).err(),
        Some(SchedError::InvalidCoreCount)
    );
}

#[test]
fn core_out_of_range() {
    let mut engine = engine(2, Discipline::Rr);
    engine.on_job_arrival(1, 0, 4, 0).unwrap();
    assert_eq!(
        engine.on_job_finished(2, 1, 4),
        Err(SchedError::InvalidCore { core: 2, num_cores: 2 })
    );
    assert_eq!(
        engine.on_quantum_expired(7, 4),
        Err(SchedError::InvalidCore { core: 7, num_cores: 2 })
    );
    assert_eq!(engine.running_on(2), None);
}

#[test]
fn time_cannot_go_backwards() {
    let mut engine = engine(1, Discipline::Fcfs);
    engine.on_job_arrival(1, 5, 4, 0).unwrap();
    assert_eq!(
        engine.on_job_arrival(2, 3, 4, 0),
        Err(SchedError::TimeWentBackwards { time: 3, last: 5 })
    );
    assert_eq!(
        engine.on_job_finished(0, 1, 4),
        Err(SchedError::TimeWentBackwards { time: 4, last: 5 })
    );
    // Same instant is fine
    assert_eq!(engine.on_job_finished(0, 1, 5), Ok(None));
}

#[test]
fn quantum_only_under_rr() {
    for discipline in Discipline::ALL {
        let mut engine = engine(1, discipline);
        engine.on_job_arrival(1, 0, 4, 0).unwrap();
        let result = engine.on_quantum_expired(0, 2);
        if discipline == Discipline::Rr {
            assert_eq!(result, Ok(Some(1)));
        } else {
            assert_eq!(result, Err(SchedError::QuantumUnsupported(discipline)));
            assert_eq!(engine.job(1).unwrap().remaining_time, 4);
        }
    }
}

#[test]
fn duplicate_arrival_time_rejected() {
    let mut engine = engine(2, Discipline::Sjf);
    engine.on_job_arrival(1, 3, 4, 0).unwrap();
    assert_eq!(
        engine.on_job_arrival(2, 3, 4, 0),
        Err(SchedError::DuplicateArrival { time: 3 })
    );
    assert_eq!(engine.running_on(1), None);
}

#[test]
fn duplicate_arrival_surfaces_from_sim() {
    let jobs = vec![job(1, 2, 3, 0), job(2, 2, 3, 0)];
    let result = Sim::new(jobs, 1, Discipline::Fcfs, NonZeroU64::new(2))
        .unwrap()
        .run();
    assert!(matches!(result, Err(SchedError::DuplicateArrival { time: 2 })));
}

#[test]
fn finishing_unknown_job() {
    let mut engine = engine(1, Discipline::Fcfs);
    assert_eq!(engine.on_job_finished(0, 0, 1), Err(SchedError::UnknownJob(0)));
}

#[test]
fn finishing_waiting_or_completed_job() {
    let mut engine = engine(1, Discipline::Fcfs);
    engine.on_job_arrival(0, 0, 2, 0).unwrap();
    engine.on_job_arrival(1, 1, 2, 0).unwrap();
    assert_eq!(engine.on_job_finished(0, 1, 1), Err(SchedError::JobNotRunning(1)));

    assert_eq!(engine.on_job_finished(0, 0, 2), Ok(Some(1)));
    assert_eq!(engine.on_job_finished(0, 0, 3), Err(SchedError::JobNotRunning(0)));
    assert_eq!(engine.job(0).unwrap().state, JobState::Completed);
    assert_eq!(engine.completed_jobs(), 1);
}

#[test]
fn finishing_on_wrong_core() {
    let mut engine = engine(2, Discipline::Pri);
    engine.on_job_arrival(1, 0, 5, 0).unwrap();
    engine.on_job_arrival(2, 1, 5, 0).unwrap();
    assert_eq!(
        engine.on_job_finished(0, 2, 5),
        Err(SchedError::JobNotOnCore { job: 2, core: 0 })
    );
    assert_eq!(engine.running_on(0), Some(1));
    assert_eq!(engine.running_on(1), Some(2));
}

#[test]
fn averages_zero_before_any_completion() {
    let mut engine = engine(1, Discipline::Ppri);
    assert_eq!(engine.average_waiting_time(), 0.0);
    engine.on_job_arrival(1, 0, 5, 0).unwrap();
    assert_eq!(engine.average_waiting_time(), 0.0);
    assert_eq!(engine.average_turnaround_time(), 0.0);
    assert_eq!(engine.average_response_time(), 0.0);
}

#[test]
fn unknown_discipline_name() {
    let err = "mlfq".parse::<Discipline>().unwrap_err();
    assert_eq!(err, SchedError::UnknownDiscipline("mlfq".into()));
    assert_eq!(err.to_string(), "unknown scheduling discipline 'mlfq'");
}

#[test]
fn error_messages_name_the_offender() {
    assert_eq!(
        SchedError::JobNotOnCore { job: 4, core: 1 }.to_string(),
        "job 4 is not running on core 1"
    );
    assert_eq!(
        SchedError::QuantumUnsupported(Discipline::Psjf).to_string(),
        "quantum expiry is only defined under RR, engine runs PSJF"
    );
}
