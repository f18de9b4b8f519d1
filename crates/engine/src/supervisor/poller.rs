// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Background evaluation loop.
//!
//! One tick evaluates every registered agent, records health
//! transitions, and forces `timeout` status on running-like agents whose
//! runtime exceeds the threshold — the only path by which the engine
//! itself asserts a status. A failure in one tick is logged and must not
//! stop the schedule.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::registry::apply_status;
use crate::config::SupervisorConfig;
use crate::evaluate::evaluate;
use crate::notify::{Notification, Observers};
use crate::process::ProcessProbe;
use warden_core::{AgentId, AgentStatus, Clock, HealthRecord};

/// Everything one evaluation pass needs, detached from the supervisor
/// so it can be moved into the background task.
pub(crate) struct PollTask<P, C> {
    pub(crate) config: SupervisorConfig,
    pub(crate) agents: Arc<Mutex<HashMap<AgentId, HealthRecord>>>,
    pub(crate) observers: Arc<Observers>,
    pub(crate) probe: Arc<P>,
    pub(crate) clock: C,
}

impl<P: ProcessProbe, C: Clock> PollTask<P, C> {
    pub(crate) async fn run(self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.config.health_check_interval);
        // First tick fires immediately; that gives a freshly started
        // supervisor an initial verdict without waiting a full interval.
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let tick = catch_unwind(AssertUnwindSafe(|| self.check_agents()));
                    if tick.is_err() {
                        tracing::error!("health check tick panicked");
                    }
                }
            }
        }
        tracing::debug!("supervisor poller exited");
    }

    /// One evaluation pass over every registered agent.
    pub(crate) fn check_agents(&self) {
        let mut notifications = Vec::new();
        {
            let mut agents = self.agents.lock();
            let now = self.clock.epoch_ms();

            for record in agents.values_mut() {
                let verdict = evaluate(record, now, &self.config, self.probe.as_ref());
                if verdict != record.health {
                    tracing::info!(
                        agent_id = %record.agent_id,
                        from = %record.health,
                        to = %verdict,
                        "agent health changed"
                    );
                    record.health = verdict;
                    notifications.push(Notification::Health {
                        id: record.agent_id.clone(),
                        health: verdict,
                    });
                }

                if record.is_running() && record.runtime(now) > self.config.timeout_threshold {
                    apply_status(
                        record,
                        AgentStatus::Timeout,
                        Some("Agent timed out"),
                        now,
                        &mut notifications,
                    );
                }
            }
        }
        self.observers.dispatch(notifications);
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
