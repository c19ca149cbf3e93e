pub mod engine;
pub mod error;
pub mod event;
pub mod observer;
pub mod queue;
pub mod state;
pub mod stats;

pub use engine::SchedEngine;
pub use error::SchedError;
pub use event::SchedEvent;
pub use queue::OrderedQueue;
pub use state::{CoreId, CoreState, Job, JobId, JobKey, JobState, Priority, SchedCtx, Ticks};
pub use stats::SchedStats;
