use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Clone, Debug)]
pub struct MyProcess {
    pub pid: usize,
    pub parent: usize,
    pub memory: u64,
    pub zombie: bool,
}

/// Memory of a process tree at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeUsage {
    pub bytes: u64,
    pub descendants: usize,
}

/// One reading of the process table.
pub struct Snapshot {
    procs: Vec<MyProcess>,
}

impl Snapshot {
    pub fn new(procs: Vec<MyProcess>) -> Self {
        Self { procs }
    }

    pub fn get(&self, pid: usize) -> Option<&MyProcess> {
        self.procs.iter().find(|p| p.pid == pid)
    }

    /// Resident memory of `root` plus every process below it.
    /// Returns None when `root` no longer exists (or is only a zombie).
    pub fn tree_memory(&self, root: usize) -> Option<TreeUsage> {
        let root_proc = self.get(root).filter(|p| !p.zombie)?;

        let mut children: HashMap<usize, Vec<&MyProcess>> = HashMap::new();
        for proc in self.procs.iter().filter(|p| p.pid != p.parent) {
            children.entry(proc.parent).or_default().push(proc);
        }

        //pid reuse can create parent loops, so never visit a pid twice
        let mut seen = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);
        let mut usage = TreeUsage {
            bytes: root_proc.memory,
            descendants: 0,
        };
        while let Some(pid) = queue.pop_front() {
            for child in children.get(&pid).into_iter().flatten() {
                if seen.insert(child.pid) {
                    usage.bytes += child.memory;
                    usage.descendants += 1;
                    queue.push_back(child.pid);
                }
            }
        }
        Some(usage)
    }
}
