mod aggregator;
mod config;
mod error;
mod helpers;
mod launcher;
mod manager;
mod myprocess;
mod report;
mod units;

use std::{
    io::{self, Write},
    process::ExitCode,
    time::Instant,
};

use gumdrop::Options;
use tracing::{error, info, warn};
use tracing_subscriber::filter::LevelFilter;

use crate::{
    aggregator::Interval,
    config::{Config, Overrides, Settings},
    error::Error,
    manager::ProcManager,
};

#[derive(Options)]
struct Args {
    #[options(free, help = "Command to execute and profile")]
    command: Vec<String>,

    #[options(help = "Select memory units to log (B, KB, MB, GB)", meta = "UNIT")]
    units: Option<String>,

    #[options(help = "Select time between measurements in seconds", meta = "SECS")]
    time: Option<f64>,

    #[options(help = "Output the current usage on every iteration")]
    monitor: bool,

    #[options(help = "Run the command through the system shell")]
    shell: bool,

    #[options(help = "Log level: off, error, warn, info, debug, trace", meta = "LEVEL")]
    log_level: Option<String>,

    #[options(help = "Print help message")]
    help: bool,
}

impl From<Args> for Overrides {
    fn from(args: Args) -> Self {
        Overrides {
            command: args.command,
            units: args.units,
            interval: args.time,
            monitor: args.monitor,
            shell: args.shell,
            log_level: args.log_level,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse_args_default_or_exit();
    let (config, config_problem) = match Config::load() {
        Ok(config) => (config, None),
        Err(problem) => (Config::default(), Some(problem)),
    };

    let settings = match Settings::resolve(args.into(), &config) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code() as u8);
        }
    };
    setup_logging(settings.log_level);
    if let Some(problem) = config_problem {
        warn!("{problem}");
    }

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            if err.is_config() {
                eprintln!("{err}");
            } else {
                eprintln!("Unknown error occurred: {err}");
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Logs go to stderr so stdout only carries the report.
fn setup_logging(level: LevelFilter) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("unable to set up logging: {err}");
    }
}

fn run(settings: &Settings) -> Result<(), Error> {
    manager::ensure_supported()?;

    let launched = launcher::launch(&settings.command, settings.shell)?;
    let pid = launched.pid;
    let start = Instant::now();

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", report::started(pid))?;
    info!(
        pid,
        unit = %settings.unit,
        interval = ?settings.interval,
        monitor = settings.monitor,
        "sampling"
    );

    let mut sampler = ProcManager::new(launched);
    let mut pacer = Interval(settings.interval);
    let aggregate = aggregator::run(
        &mut sampler,
        &mut pacer,
        settings.unit,
        settings.monitor,
        &mut stdout,
    )?;

    for line in report::summary(pid, &aggregate, settings.unit, start.elapsed()) {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;

    match sampler.exit_status() {
        Some(status) => info!(
            pid,
            %status,
            samples = aggregate.count(),
            total = aggregate.sum(),
            "done"
        ),
        None => warn!(pid, "process exit status unavailable"),
    }
    Ok(())
}
