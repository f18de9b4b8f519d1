// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! On-demand termination of supervised agent processes.

use super::Supervisor;
use crate::process::{ProcessProbe, SignalError, TermSignal};
use warden_core::{AgentId, AgentStatus, Clock};

impl<P, C> Supervisor<P, C>
where
    P: ProcessProbe + 'static,
    C: Clock + 'static,
{
    /// Terminate an agent's process, SIGTERM by default or SIGKILL when
    /// `force` is set.
    ///
    /// Returns whether the termination request was honored: `true` even
    /// when there was no process to signal (no pid on record, or the
    /// pid was already gone — the record still transitions), `false`
    /// for an unknown agent or when the OS refused the signal, in which
    /// case the record is left untouched.
    pub fn terminate(&self, id: &AgentId, force: bool) -> bool {
        let pid = {
            let agents = self.agents.lock();
            match agents.get(id) {
                Some(record) => record.process_id,
                None => return false,
            }
        };

        let Some(pid) = pid else {
            // Nothing to signal; honor the request by cancelling the record.
            self.update_status(id, AgentStatus::Cancelled, None);
            return true;
        };

        let signal = if force {
            TermSignal::Forced
        } else {
            TermSignal::Graceful
        };

        match self.probe.send_signal(pid, signal) {
            Ok(()) => {
                tracing::info!(agent_id = %id, pid, ?signal, "terminated agent");
                self.update_status(id, AgentStatus::Cancelled, None);
                true
            }
            Err(SignalError::NotFound(_)) => {
                tracing::warn!(agent_id = %id, pid, "agent process not found during terminate");
                self.update_status(id, AgentStatus::Failed, Some("Process not found"));
                true
            }
            Err(err) => {
                tracing::error!(agent_id = %id, pid, error = %err, "failed to signal agent process");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "terminate_tests.rs"]
mod tests;
