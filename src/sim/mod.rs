pub mod driver;
pub mod job;
pub mod workload;

pub use driver::{Sim, SimReport};
pub use job::{JobOutcome, Slice, WorkloadJob};
pub use workload::bernoulli_workload;
