//! Process status probe for the monitored VM.
//!
//! The probe keeps one `sysinfo::System` alive between polls. CPU usage is a
//! delta between two refreshes of the same process, so it is `None` until the
//! matched process has been seen by an earlier poll.

use crate::types::VmStatus;
use std::sync::Mutex;
use sysinfo::{ProcessRefreshKind, RefreshKind, System, UpdateKind};

pub struct ProcessProbe {
    pattern: String,
    state: Mutex<ProbeState>,
}

struct ProbeState {
    system: System,
    /// Process matched by the previous poll.
    last_pid: Option<u32>,
}

impl ProcessProbe {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            state: Mutex::new(ProbeState {
                system: System::new(),
                last_pid: None,
            }),
        }
    }

    /// Refresh the process table and report the first matching process.
    pub fn status(&self) -> VmStatus {
        let Ok(mut state) = self.state.lock() else {
            tracing::warn!("Process probe lock poisoned");
            return VmStatus::not_running();
        };
        let ProbeState { system, last_pid } = &mut *state;

        system.refresh_specifics(
            RefreshKind::new().with_processes(
                ProcessRefreshKind::new()
                    .with_cpu()
                    .with_memory()
                    .with_cmd(UpdateKind::OnlyIfNotSet),
            ),
        );

        let mut matches: Vec<_> = system
            .processes()
            .values()
            .filter(|p| command_line_matches(p.cmd(), &self.pattern))
            .collect();
        matches.sort_by_key(|p| p.pid());

        let status = match matches.first() {
            Some(process) => {
                let pid = process.pid().as_u32();
                VmStatus {
                    running: true,
                    pid: Some(pid),
                    cpu_percent: cpu_reading(*last_pid, pid, process.cpu_usage()),
                    memory_mb: Some(process.memory() as f64 / 1024.0 / 1024.0),
                }
            }
            None => VmStatus::not_running(),
        };
        *last_pid = status.pid;
        status
    }
}

/// CPU usage is only meaningful once the same process was sampled before.
fn cpu_reading(previous: Option<u32>, pid: u32, usage: f32) -> Option<f64> {
    (previous == Some(pid)).then_some(f64::from(usage))
}

/// Does the joined command line contain the pattern?
pub fn command_line_matches<S: AsRef<std::ffi::OsStr>>(cmd: &[S], pattern: &str) -> bool {
    if pattern.is_empty() || cmd.is_empty() {
        return false;
    }
    let joined = cmd
        .iter()
        .map(|part| part.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    joined.contains(pattern)
}
