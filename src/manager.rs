use std::process::{Child, ExitStatus};

use sysinfo::{ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, ThreadKind};
use tracing::debug;

use crate::{
    aggregator::{Sample, Sampler},
    error::Error,
    helpers::nice_size,
    launcher::Launched,
    myprocess::{MyProcess, Snapshot, TreeUsage},
    units::Unit,
};

pub fn ensure_supported() -> Result<(), Error> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Ok(())
    } else {
        Err(Error::Unsupported)
    }
}

/// Samples the memory of a launched process and everything it spawned.
pub struct ProcManager {
    system: System,
    root: usize,
    child: Child,
    exit: Option<ExitStatus>,
}

impl ProcManager {
    pub fn new(launched: Launched) -> Self {
        Self {
            system: System::new(),
            root: launched.pid as usize,
            child: launched.child,
            exit: None,
        }
    }

    /// Exit status of the launched process, if it has been reaped.
    pub fn exit_status(&mut self) -> Option<ExitStatus> {
        let _ = self.reap();
        self.exit
    }

    ///collect our own child as soon as it exits, otherwise it lingers as a zombie
    fn reap(&mut self) -> Result<(), Error> {
        if self.exit.is_none() {
            self.exit = self.child.try_wait().map_err(Error::Sampling)?;
            if let Some(status) = self.exit {
                debug!(pid = self.root, %status, "reaped monitored process");
            }
        }
        Ok(())
    }

    fn measure(&mut self) -> Result<Option<TreeUsage>, Error> {
        self.reap()?;
        let snapshot = update_procs(&mut self.system);
        Ok(snapshot.tree_memory(self.root))
    }
}

impl Sampler for ProcManager {
    fn sample(&mut self, unit: Unit) -> Result<Sample, Error> {
        let Some(usage) = self.measure()? else {
            debug!(pid = self.root, "monitored process is gone");
            return Ok(Sample::Ended);
        };
        debug!(
            pid = self.root,
            bytes = usage.bytes,
            size = %nice_size(usage.bytes),
            descendants = usage.descendants,
            "sampled process tree"
        );
        Ok(Sample::Value(unit.convert(usage.bytes)))
    }
}

fn update_procs(sys: &mut System) -> Snapshot {
    sys.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );
    let procs = sys
        .processes()
        .values()
        .filter(|x| x.thread_kind() != Some(ThreadKind::Userland))
        .map(|x| MyProcess {
            pid: x.pid().into(),
            parent: x.parent().map_or(0, |f| f.into()),
            memory: x.memory(),
            zombie: x.status() == ProcessStatus::Zombie,
        })
        .filter(|x| x.pid != 0) //dont want root or errors
        .collect();
    Snapshot::new(procs)
}
