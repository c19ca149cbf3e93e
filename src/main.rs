use std::num::NonZeroU64;

use clap::Parser;
use cpusched::{
    Discipline, SchedError, Sim,
    sim::{JobOutcome, bernoulli_workload},
};

#[derive(Parser)]
#[command(name = "schedsim", about = "Replay a random workload through the scheduling engine")]
struct Cli {
    /// Discipline to run (fcfs, sjf, psjf, pri, ppri, rr) or "all".
    #[arg(short, long, default_value = "all")]
    discipline: String,

    /// Number of simulated cores.
    #[arg(short, long, default_value_t = 2)]
    cores: usize,

    /// RR time quantum in ticks.
    #[arg(short, long, default_value = "2")]
    quantum: NonZeroU64,

    /// Length of the arrival window in ticks.
    #[arg(long, default_value_t = 500)]
    ticks: u64,

    /// Probability of a job arriving on any given tick.
    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    /// Probability that an arriving job is short.
    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    /// Burst of a short job.
    #[arg(long, default_value_t = 2)]
    short: u64,

    /// Burst of a long job.
    #[arg(long, default_value_t = 6)]
    long: u64,

    /// Priorities are drawn from 0..=max-priority.
    #[arg(long, default_value_t = 4)]
    max_priority: i32,

    /// PRNG seed for the workload.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print every execution slice.
    #[arg(long)]
    dump_slices: bool,
}

fn main() -> Result<(), SchedError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let disciplines = if cli.discipline.eq_ignore_ascii_case("all") {
        Discipline::ALL.to_vec()
    } else {
        vec![cli.discipline.parse::<Discipline>()?]
    };

    let jobs = bernoulli_workload(
        cli.ticks,
        cli.p_arrival,
        cli.p_short,
        cli.short,
        cli.long,
        cli.max_priority,
        cli.seed,
    );
    println!("{} jobs on {} cores", jobs.len(), cli.cores);

    for discipline in disciplines {
        let report = Sim::new(jobs.clone(), cli.cores, discipline, Some(cli.quantum))?.run()?;

        if cli.dump_slices {
            for slice in &report.slices {
                println!(
                    "[{discipline}] core {} job {} [{}, {})",
                    slice.core, slice.job, slice.start, slice.end
                );
            }
        }

        let longest_wait = report
            .outcomes
            .iter()
            .map(JobOutcome::waiting_time)
            .max()
            .unwrap_or(0);

        println!("{discipline}:");
        println!("  Average waiting time:    {:.2} ticks", report.average_waiting_time);
        println!("  Average turnaround time: {:.2} ticks", report.average_turnaround_time);
        println!("  Average response time:   {:.2} ticks", report.average_response_time);
        println!("  Longest wait:            {longest_wait} ticks");
        println!("  Finished at:             t={}", report.end_time);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn seed_and_discipline_come_from_flags() {
        let cli = Cli::try_parse_from(["schedsim", "--seed", "7", "-d", "rr", "-q", "3"]).unwrap();
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.discipline, "rr");
        assert_eq!(cli.quantum.get(), 3);

        let defaults = Cli::try_parse_from(["schedsim"]).unwrap();
        assert_eq!(defaults.seed, 0);
        assert_eq!(defaults.quantum.get(), 2);
        assert!(Cli::try_parse_from(["schedsim", "-q", "0"]).is_err());
    }
}
