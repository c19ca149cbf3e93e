use average::{Estimate, Mean};

use super::state::{Job, Ticks};

/// Per-run timing accumulators, fed once per completed job.
#[derive(Debug, Clone, Default)]
pub struct SchedStats {
    waiting: Mean,
    turnaround: Mean,
    response: Mean,
}

impl SchedStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, job: &Job) {
        let (Some(start), Some(end)) = (job.start_time, job.end_time) else {
            debug_assert!(false, "Job {} recorded before completion", job.id);
            return;
        };

        let turnaround = end - job.arrival_time;
        self.turnaround.add(turnaround as f64);
        self.waiting.add(waiting_time(turnaround, job.running_time) as f64);
        self.response.add((start - job.arrival_time) as f64);
    }

    pub fn completed(&self) -> u64 {
        self.turnaround.len()
    }

    pub fn average_waiting_time(&self) -> f64 {
        mean_or_zero(&self.waiting)
    }

    pub fn average_turnaround_time(&self) -> f64 {
        mean_or_zero(&self.turnaround)
    }

    pub fn average_response_time(&self) -> f64 {
        mean_or_zero(&self.response)
    }
}

/// Turnaround minus burst. An early completion report counts as no wait.
pub fn waiting_time(turnaround: Ticks, running_time: Ticks) -> Ticks {
    turnaround.saturating_sub(running_time)
}

fn mean_or_zero(mean: &Mean) -> f64 {
    if mean.is_empty() { 0.0 } else { mean.mean() }
}
