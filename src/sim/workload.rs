use rand::prelude::*;

use super::job::WorkloadJob;
use crate::core::{Priority, Ticks};

/// Random workload where each tick independently sees at most one arrival,
/// so arrival times are always distinct.
pub fn bernoulli_workload(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    max_priority: Priority,
    seed: u64,
) -> Vec<WorkloadJob> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let running_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            jobs.push(WorkloadJob {
                id: jobs.len() as u64,
                arrival_time: t,
                running_time,
                priority: rng.random_range(0..=max_priority.max(0)),
            });
        }
    }

    jobs
}
