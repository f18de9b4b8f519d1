// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Supervisor tuning knobs.

use std::time::Duration;

/// Tuning for evaluation cadence, timeout detection, and shutdown.
///
/// The responsiveness window (how stale a heartbeat may be before a
/// running agent counts as unresponsive) is fixed at
/// [`warden_core::RESPONSIVENESS_WINDOW`] and is not configurable here.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Interval between background health evaluation passes.
    pub health_check_interval: Duration,
    /// Runtime after which a running-like agent is forced to `timeout`
    /// status by the poller.
    pub timeout_threshold: Duration,
    /// Error count at or above which an agent is judged unhealthy.
    pub max_error_count: u64,
    /// How long `stop()` waits for the poller task to exit.
    pub poll_join_timeout: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            health_check_interval: Duration::from_secs(5),
            timeout_threshold: Duration::from_secs(300),
            max_error_count: 5,
            poll_join_timeout: Duration::from_secs(5),
        }
    }
}
