use thiserror::Error;

use super::state::{CoreId, JobId, Ticks};
use crate::scheduler::Discipline;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedError {
    #[error("engine needs at least one core")]
    InvalidCoreCount,

    #[error("core {core} out of range, engine has {num_cores} cores")]
    InvalidCore { core: CoreId, num_cores: usize },

    #[error("event at t={time} is older than last event at t={last}")]
    TimeWentBackwards { time: Ticks, last: Ticks },

    #[error("another job already arrived at t={time}")]
    DuplicateArrival { time: Ticks },

    #[error("job {0} already exists")]
    DuplicateJob(JobId),

    #[error("job {0} never arrived")]
    UnknownJob(JobId),

    #[error("job {0} is not running")]
    JobNotRunning(JobId),

    #[error("job {job} is not running on core {core}")]
    JobNotOnCore { job: JobId, core: CoreId },

    #[error("quantum expiry is only defined under RR, engine runs {0}")]
    QuantumUnsupported(Discipline),

    #[error("unknown scheduling discipline '{0}'")]
    UnknownDiscipline(String),
}
