// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Per-agent health record held by the registry.

use crate::agent::{AgentId, AgentStatus, HealthVerdict};
use crate::metrics::AgentMetrics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// How long after the last heartbeat a running agent still counts as
/// responsive.
pub const RESPONSIVENESS_WINDOW: Duration = Duration::from_secs(30);

/// State snapshot for one supervised agent.
///
/// Invariants: `health` is only written by the evaluator; `start_ms`
/// only changes on (re-)registration; `process_id`, once set, stays
/// fixed for the life of the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub agent_id: AgentId,
    pub status: AgentStatus,
    pub health: HealthVerdict,
    /// Epoch milliseconds when the agent was (re-)registered.
    pub start_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_heartbeat_ms: Option<u64>,
    /// Epoch milliseconds of the most recent mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_id: Option<u32>,
    /// Agent log path; opaque to the engine, retained for callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub metrics: AgentMetrics,
    /// Opaque caller-supplied bag captured at registration.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl HealthRecord {
    /// Fresh record as registration creates it: status `initializing`,
    /// health `unknown`, empty metrics.
    pub fn new(agent_id: AgentId, start_ms: u64) -> Self {
        Self {
            agent_id,
            status: AgentStatus::Initializing,
            health: HealthVerdict::Unknown,
            start_ms,
            last_heartbeat_ms: None,
            last_update_ms: None,
            process_id: None,
            log_file: None,
            error_message: None,
            metrics: AgentMetrics::default(),
            metadata: BTreeMap::new(),
        }
    }

    /// Wall-clock time since registration.
    pub fn runtime(&self, now_ms: u64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.start_ms))
    }

    /// Whether the caller-asserted status implies a live process.
    pub fn is_running(&self) -> bool {
        self.status.is_running_like()
    }

    /// Whether a heartbeat arrived within [`RESPONSIVENESS_WINDOW`].
    ///
    /// An agent that never heartbeated is not responsive.
    pub fn is_responsive(&self, now_ms: u64) -> bool {
        match self.last_heartbeat_ms {
            Some(hb) => now_ms.saturating_sub(hb) < RESPONSIVENESS_WINDOW.as_millis() as u64,
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
