//! Background job registry.
//!
//! Ordered most recent first. An entry owns its [`JobSpec`]: removing the
//! entry (reap, `fg`, shutdown) is what releases the job, so a record can
//! never outlive its spec and nothing is ever freed twice.

use std::collections::VecDeque;

use bosun_hal::Pid;
use bosun_parser::JobSpec;

/// One tracked background job: the pid of its last pipeline stage (the
/// stage whose completion and exit status matter) plus the owned spec.
#[derive(Debug)]
pub struct BackgroundEntry {
    pub pid: Pid,
    pub job: JobSpec,
    stamp: u64,
}

#[derive(Debug, Default)]
pub struct JobRegistry {
    entries: VecDeque<BackgroundEntry>,
    next_stamp: u64,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a newly launched job, keeping descending-stamp order.
    /// Pids are unique within the registry.
    pub fn insert(&mut self, pid: Pid, job: JobSpec) {
        debug_assert!(self.get(pid).is_none(), "pid already registered");
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        let at = self
            .entries
            .iter()
            .position(|entry| entry.stamp < stamp)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, BackgroundEntry { pid, job, stamp });
    }

    pub fn get(&self, pid: Pid) -> Option<&BackgroundEntry> {
        self.entries.iter().find(|entry| entry.pid == pid)
    }

    /// Remove and return the entry for `pid`; `None` (a no-op) if it is
    /// not tracked.
    pub fn remove(&mut self, pid: Pid) -> Option<BackgroundEntry> {
        let at = self.entries.iter().position(|entry| entry.pid == pid)?;
        self.entries.remove(at)
    }

    /// Remove and return the most recently started job.
    pub fn take_most_recent(&mut self) -> Option<BackgroundEntry> {
        self.entries.pop_front()
    }

    /// Entries most recent first; lazy, finite, restartable.
    pub fn iter(&self) -> impl Iterator<Item = &BackgroundEntry> {
        self.entries.iter()
    }

    /// Empty the registry, yielding ownership of every entry.
    pub fn drain(&mut self) -> impl Iterator<Item = BackgroundEntry> + '_ {
        self.entries.drain(..)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bosun_parser::ProcessSpec;

    fn job(line: &str) -> JobSpec {
        JobSpec {
            stages: vec![ProcessSpec {
                program: line.to_string(),
                args: Vec::new(),
                stderr_path: None,
            }],
            stdin_path: None,
            stdout_path: None,
            background: true,
            line: line.to_string(),
        }
    }

    fn pids(registry: &JobRegistry) -> Vec<i32> {
        registry.iter().map(|entry| entry.pid.as_raw()).collect()
    }

    #[test]
    fn iteration_is_most_recent_first() {
        let mut registry = JobRegistry::new();
        for pid in [10, 20, 30] {
            registry.insert(Pid::from_raw(pid), job("j"));
        }
        assert_eq!(pids(&registry), vec![30, 20, 10]);
        let stamps: Vec<u64> = registry.iter().map(|entry| entry.stamp).collect();
        assert!(stamps.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn remove_returns_the_owned_entry() {
        let mut registry = JobRegistry::new();
        registry.insert(Pid::from_raw(10), job("first"));
        registry.insert(Pid::from_raw(20), job("second"));
        let entry = registry.remove(Pid::from_raw(10)).expect("tracked pid");
        assert_eq!(entry.job.line, "first");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_of_untracked_pid_is_a_noop() {
        let mut registry = JobRegistry::new();
        registry.insert(Pid::from_raw(10), job("j"));
        assert!(registry.remove(Pid::from_raw(99)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn take_most_recent_pops_the_newest_entry() {
        let mut registry = JobRegistry::new();
        registry.insert(Pid::from_raw(10), job("old"));
        registry.insert(Pid::from_raw(20), job("new"));
        let entry = registry.take_most_recent().expect("non-empty");
        assert_eq!(entry.job.line, "new");
        assert_eq!(pids(&registry), vec![10]);
    }

    #[test]
    fn drain_empties_the_registry() {
        let mut registry = JobRegistry::new();
        registry.insert(Pid::from_raw(10), job("a"));
        registry.insert(Pid::from_raw(20), job("b"));
        let lines: Vec<String> = registry.drain().map(|entry| entry.job.line).collect();
        assert_eq!(lines, vec!["b".to_string(), "a".to_string()]);
        assert!(registry.is_empty());
    }
}
