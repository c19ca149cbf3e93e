//! Discrete-event, multi-core CPU scheduling engine.
//!
//! A driver feeds [`SchedEngine`] job arrivals, completions and RR quantum
//! expiries in simulated time. The engine decides which job runs on which
//! core under one of six disciplines and keeps waiting, turnaround and
//! response time statistics. [`sim`] holds a reference driver.

pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{CoreId, Job, JobId, JobState, SchedEngine, SchedError, SchedEvent, Ticks};
pub use scheduler::{Discipline, Policy, Preemption};
pub use sim::{Sim, SimReport, WorkloadJob};
