// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Health verdict derivation.
//!
//! A pure function over the record, the clock, and OS process-existence
//! facts. Precedence is ordered: terminal statuses dominate, then error
//! budget, then liveness signals. A stale heartbeat is a softer signal
//! than a missing process, so it is checked first but only yields
//! `degraded`.

use crate::config::SupervisorConfig;
use crate::process::{ProcessProbe, SignalError};
use warden_core::{AgentStatus, HealthRecord, HealthVerdict};

/// Derive the health verdict for one record. First matching rule wins.
pub fn evaluate<P: ProcessProbe + ?Sized>(
    record: &HealthRecord,
    now_ms: u64,
    config: &SupervisorConfig,
    probe: &P,
) -> HealthVerdict {
    // Terminal failure statuses dominate everything else, including a
    // clean error count.
    if matches!(
        record.status,
        AgentStatus::Failed | AgentStatus::Cancelled | AgentStatus::Timeout
    ) {
        return HealthVerdict::Unhealthy;
    }

    if record.status == AgentStatus::Completed {
        return HealthVerdict::Healthy;
    }

    if record.metrics.error_count >= config.max_error_count {
        return HealthVerdict::Unhealthy;
    }

    if record.is_running() {
        if !record.is_responsive(now_ms) {
            return HealthVerdict::Degraded;
        }

        if let Some(pid) = record.process_id {
            match probe.probe(pid) {
                Ok(()) => {}
                Err(SignalError::NotFound(_)) => return HealthVerdict::Unhealthy,
                // The process exists but we cannot signal it. Not gone.
                Err(SignalError::PermissionDenied(_)) => {}
                Err(err) => {
                    tracing::warn!(agent_id = %record.agent_id, pid, error = %err, "process probe failed");
                }
            }
        }
    }

    HealthVerdict::Healthy
}

#[cfg(test)]
#[path = "evaluate_tests.rs"]
mod tests;
