//! The sampling loop: take a reading, optionally print it, fold it into the
//! running aggregate, pause, repeat until the monitored process is gone.

use std::{io::Write, thread, time::Duration};

use tracing::trace;

use crate::{error::Error, report, units::Unit};

/// Outcome of one sampling attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    /// Memory of the process tree, already in the display unit.
    Value(f64),
    /// The monitored process no longer exists.
    Ended,
}

pub trait Sampler {
    fn sample(&mut self, unit: Unit) -> Result<Sample, Error>;
}

/// Waits between two samples.
pub trait Pacer {
    fn pause(&mut self);
}

pub struct Interval(pub Duration);

impl Pacer for Interval {
    fn pause(&mut self) {
        thread::sleep(self.0);
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Aggregate {
    count: u64,
    sum: f64,
    peak: f64,
}

impl Aggregate {
    pub fn record(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.peak = self.peak.max(value);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    ///None until at least one sample was recorded
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    pub fn peak(&self) -> Option<f64> {
        (self.count > 0).then_some(self.peak)
    }
}

/// Sample until the process ends. Any sampler error other than the
/// process ending aborts the loop and is returned as is.
pub fn run<S, P, W>(
    sampler: &mut S,
    pacer: &mut P,
    unit: Unit,
    monitor: bool,
    out: &mut W,
) -> Result<Aggregate, Error>
where
    S: Sampler,
    P: Pacer,
    W: Write,
{
    let mut aggregate = Aggregate::default();
    loop {
        let value = match sampler.sample(unit)? {
            Sample::Ended => return Ok(aggregate),
            Sample::Value(value) => value,
        };
        if monitor {
            writeln!(
                out,
                "{}",
                report::sample_line(aggregate.count() + 1, value, unit)
            )?;
        }
        aggregate.record(value);
        trace!(count = aggregate.count(), value, "recorded sample");
        pacer.pause();
    }
}
