// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Resource and usage metrics reported alongside heartbeats.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metrics bundle supplied by the caller with a heartbeat.
///
/// All gauges are optional; a heartbeat merges field-by-field rather
/// than replacing the bundle, so omitting a gauge keeps the previous
/// value and `error_count` never decreases. A fresh registration is the
/// only way to reset the bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<f64>,
    /// Byte counters keyed by interface or direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_io: Option<BTreeMap<String, u64>>,
    /// Runtime as measured by the caller; the engine derives its own
    /// from `start_ms` and does not consume this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_calls: Option<u64>,
    #[serde(default)]
    pub error_count: u64,
    /// Epoch milliseconds; stamped by the engine on every metrics-bearing
    /// heartbeat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_ms: Option<u64>,
}

impl AgentMetrics {
    /// Merge a newer bundle into this one.
    ///
    /// `Some` fields overwrite, `None` fields preserve. `error_count`
    /// keeps the maximum so the counter stays monotonic even when a
    /// heartbeat carries a stale snapshot.
    pub fn merge_from(&mut self, newer: AgentMetrics) {
        if newer.cpu_usage.is_some() {
            self.cpu_usage = newer.cpu_usage;
        }
        if newer.memory_usage.is_some() {
            self.memory_usage = newer.memory_usage;
        }
        if newer.disk_usage.is_some() {
            self.disk_usage = newer.disk_usage;
        }
        if newer.network_io.is_some() {
            self.network_io = newer.network_io;
        }
        if newer.runtime_seconds.is_some() {
            self.runtime_seconds = newer.runtime_seconds;
        }
        if newer.tokens_used.is_some() {
            self.tokens_used = newer.tokens_used;
        }
        if newer.api_calls.is_some() {
            self.api_calls = newer.api_calls;
        }
        self.error_count = self.error_count.max(newer.error_count);
        self.last_activity_ms = match (self.last_activity_ms, newer.last_activity_ms) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => b.or(a),
        };
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
