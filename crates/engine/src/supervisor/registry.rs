// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Registry mutators and queries.
//!
//! Every path reads `now` from the clock while holding the registry
//! lock, so `last_update_ms` is monotonically non-decreasing per agent.
//! Mutators on unregistered ids log a warning and no-op, which makes
//! the race between `unregister` and an in-flight heartbeat harmless.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Supervisor;
use crate::notify::Notification;
use crate::process::ProcessProbe;
use warden_core::{AgentId, AgentMetrics, AgentStatus, Clock, HealthRecord, HealthVerdict};

/// What the spawning collaborator knows about an agent at spawn time.
#[derive(Debug, Clone)]
pub struct Registration {
    pub agent_id: AgentId,
    pub process_id: Option<u32>,
    pub log_file: Option<PathBuf>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Registration {
    pub fn new(agent_id: impl Into<AgentId>) -> Self {
        Self {
            agent_id: agent_id.into(),
            process_id: None,
            log_file: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn process_id(mut self, pid: u32) -> Self {
        self.process_id = Some(pid);
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Aggregate counts over all registered agents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub health_counts: BTreeMap<String, usize>,
    pub mean_runtime_seconds: f64,
    pub total_errors: u64,
    pub healthy_percentage: f64,
}

impl<P, C> Supervisor<P, C>
where
    P: ProcessProbe + 'static,
    C: Clock + 'static,
{
    /// Register an agent for supervision, replacing any prior record
    /// for the same id (fresh `start_ms`, status `initializing`, health
    /// `unknown`, empty metrics).
    pub fn register(&self, registration: Registration) -> HealthRecord {
        let mut agents = self.agents.lock();
        let now = self.clock.epoch_ms();

        if agents.contains_key(&registration.agent_id) {
            tracing::warn!(agent_id = %registration.agent_id, "agent already registered, replacing record");
        }

        let mut record = HealthRecord::new(registration.agent_id.clone(), now);
        record.process_id = registration.process_id;
        record.log_file = registration.log_file;
        record.metadata = registration.metadata;

        agents.insert(registration.agent_id, record.clone());
        tracing::info!(agent_id = %record.agent_id, pid = ?record.process_id, "registered agent");
        record
    }

    /// Remove an agent's record. No-op if absent. Records are retained
    /// after completion unless the caller asks for removal, so
    /// post-mortem queries keep working.
    pub fn unregister(&self, id: &AgentId) {
        if self.agents.lock().remove(id).is_some() {
            tracing::info!(agent_id = %id, "unregistered agent");
        }
    }

    /// Record a caller-asserted status. Dispatches a status notification
    /// when the value actually changed, and an error notification when
    /// `error_message` is present (which also bumps `error_count`).
    pub fn update_status(&self, id: &AgentId, status: AgentStatus, error_message: Option<&str>) {
        let mut notifications = Vec::new();
        {
            let mut agents = self.agents.lock();
            let now = self.clock.epoch_ms();
            let Some(record) = agents.get_mut(id) else {
                tracing::warn!(agent_id = %id, %status, "status update for unregistered agent");
                return;
            };
            apply_status(record, status, error_message, now, &mut notifications);
        }
        self.observers.dispatch(notifications);
    }

    /// Record a heartbeat, optionally merging a metrics bundle.
    pub fn heartbeat(&self, id: &AgentId, metrics: Option<AgentMetrics>) {
        let mut agents = self.agents.lock();
        let now = self.clock.epoch_ms();
        let Some(record) = agents.get_mut(id) else {
            tracing::warn!(agent_id = %id, "heartbeat from unregistered agent");
            return;
        };

        record.last_heartbeat_ms = Some(now);
        record.last_update_ms = Some(now);
        if let Some(metrics) = metrics {
            record.metrics.merge_from(metrics);
            record.metrics.last_activity_ms = Some(now);
        }
    }

    /// Snapshot of one agent's record.
    pub fn get(&self, id: &AgentId) -> Option<HealthRecord> {
        self.agents.lock().get(id).cloned()
    }

    /// Snapshot of every record.
    pub fn get_all(&self) -> HashMap<AgentId, HealthRecord> {
        self.agents.lock().clone()
    }

    /// All agents currently reporting `status`.
    pub fn agents_with_status(&self, status: AgentStatus) -> Vec<HealthRecord> {
        self.agents
            .lock()
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect()
    }

    /// All agents currently judged `health`.
    pub fn agents_with_health(&self, health: HealthVerdict) -> Vec<HealthRecord> {
        self.agents
            .lock()
            .values()
            .filter(|r| r.health == health)
            .cloned()
            .collect()
    }

    /// All agents in a running-like status.
    pub fn running_agents(&self) -> Vec<HealthRecord> {
        self.agents
            .lock()
            .values()
            .filter(|r| r.is_running())
            .cloned()
            .collect()
    }

    /// Aggregate statistics across all agents. Zeroed for an empty
    /// registry.
    pub fn summary(&self) -> Summary {
        let agents = self.agents.lock();
        let now = self.clock.epoch_ms();

        let total = agents.len();
        if total == 0 {
            return Summary::default();
        }

        let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut health_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_runtime_seconds = 0.0;
        let mut total_errors = 0u64;

        for record in agents.values() {
            *status_counts.entry(record.status.to_string()).or_insert(0) += 1;
            *health_counts.entry(record.health.to_string()).or_insert(0) += 1;
            total_runtime_seconds += record.runtime(now).as_secs_f64();
            total_errors += record.metrics.error_count;
        }

        let healthy = health_counts
            .get(&HealthVerdict::Healthy.to_string())
            .copied()
            .unwrap_or(0);

        Summary {
            total,
            status_counts,
            health_counts,
            mean_runtime_seconds: total_runtime_seconds / total as f64,
            total_errors,
            healthy_percentage: healthy as f64 / total as f64 * 100.0,
        }
    }
}

/// Apply a status mutation to a record, queueing the notifications the
/// caller must dispatch once the registry lock is released.
///
/// Shared by caller-driven updates, the poller's timeout path, and the
/// termination controller.
pub(crate) fn apply_status(
    record: &mut HealthRecord,
    status: AgentStatus,
    error_message: Option<&str>,
    now_ms: u64,
    notifications: &mut Vec<Notification>,
) {
    let prior = record.status;
    record.status = status;
    record.last_update_ms = Some(now_ms);

    if let Some(message) = error_message {
        record.error_message = Some(message.to_string());
        record.metrics.error_count += 1;
        notifications.push(Notification::Error {
            id: record.agent_id.clone(),
            message: message.to_string(),
        });
    }

    if prior != status {
        tracing::info!(agent_id = %record.agent_id, from = %prior, to = %status, "agent status changed");
        notifications.push(Notification::Status {
            id: record.agent_id.clone(),
            status,
        });
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
