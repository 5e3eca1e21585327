use std::time::Duration;

use crate::{aggregator::Aggregate, helpers::nice_time, units::Unit};

pub fn started(pid: u32) -> String {
    format!("Process {pid} started...")
}

pub fn sample_line(n: u64, value: f64, unit: Unit) -> String {
    format!("[#{n}] Current memory use is {value:.3} {unit}")
}

pub fn average_line(pid: u32, mean: f64, unit: Unit) -> String {
    format!("Process {pid} & its children concluded with an average use of {mean:.3} {unit}")
}

/// Final report printed once the monitored process is gone.
pub fn summary(pid: u32, aggregate: &Aggregate, unit: Unit, elapsed: Duration) -> Vec<String> {
    let mut lines = vec!["-".repeat(72)];
    match (aggregate.mean(), aggregate.peak()) {
        (Some(mean), Some(peak)) => {
            lines.push(average_line(pid, mean, unit));
            lines.push(format!(
                "Peak use was {peak:.3} {unit} across {} samples in {}",
                aggregate.count(),
                nice_time(elapsed.as_secs())
            ));
        }
        _ => lines.push(format!(
            "Process {pid} & its children concluded before any sample was taken"
        )),
    }
    lines
}
