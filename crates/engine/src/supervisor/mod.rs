// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! The agent supervisor: registry, background poller, termination.
//!
//! One supervisor value is constructed at composition time and shared by
//! reference with all collaborators — there is no process-wide singleton.
//! The background poller is started and stopped explicitly.

mod poller;
mod registry;
mod terminate;

#[cfg(test)]
pub(crate) mod test_support;

pub use registry::{Registration, Summary};

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::config::SupervisorConfig;
use crate::notify::Observers;
use crate::process::{NixProbe, ProcessProbe};
use warden_core::{AgentId, AgentStatus, Clock, HealthRecord, HealthVerdict, SystemClock};

/// Supervises the lifecycle and liveness of externally-spawned agents.
///
/// All registry state sits behind one coarse mutex; critical sections
/// are O(n) over a small agent set and never block on I/O. Notification
/// dispatch always happens after the lock is released.
pub struct Supervisor<P: ProcessProbe = NixProbe, C: Clock = SystemClock> {
    config: SupervisorConfig,
    agents: Arc<Mutex<HashMap<AgentId, HealthRecord>>>,
    observers: Arc<Observers>,
    probe: Arc<P>,
    clock: C,
    poller: Mutex<Option<PollerHandle>>,
}

/// Supervisor with the production probe and clock.
pub type AgentSupervisor = Supervisor;

/// Handle to the running background poller task.
struct PollerHandle {
    cancel: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

impl AgentSupervisor {
    /// Create a supervisor with real signal delivery and the system clock.
    pub fn new(config: SupervisorConfig) -> Self {
        Self::with_parts(config, NixProbe, SystemClock)
    }
}

impl Default for AgentSupervisor {
    fn default() -> Self {
        Self::new(SupervisorConfig::default())
    }
}

impl<P, C> Supervisor<P, C>
where
    P: ProcessProbe + 'static,
    C: Clock + 'static,
{
    /// Create a supervisor with an injected probe and clock.
    pub fn with_parts(config: SupervisorConfig, probe: P, clock: C) -> Self {
        Self {
            config,
            agents: Arc::new(Mutex::new(HashMap::new())),
            observers: Arc::new(Observers::default()),
            probe: Arc::new(probe),
            clock,
            poller: Mutex::new(None),
        }
    }

    /// Register an observer for caller-visible status transitions.
    pub fn on_status_change(&self, observer: impl Fn(&AgentId, AgentStatus) + Send + Sync + 'static) {
        self.observers.add_status(Arc::new(observer));
    }

    /// Register an observer for derived health transitions.
    pub fn on_health_change(
        &self,
        observer: impl Fn(&AgentId, HealthVerdict) + Send + Sync + 'static,
    ) {
        self.observers.add_health(Arc::new(observer));
    }

    /// Register an observer for error messages attached to status updates.
    pub fn on_error(&self, observer: impl Fn(&AgentId, &str) + Send + Sync + 'static) {
        self.observers.add_error(Arc::new(observer));
    }

    /// Start the background evaluation loop. No-op if already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut slot = self.poller.lock();
        if slot.is_some() {
            tracing::warn!("supervisor poller already running");
            return;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(self.poll_task().run(cancel.clone()));
        *slot = Some(PollerHandle { cancel, handle });
        tracing::info!(
            interval_ms = self.config.health_check_interval.as_millis() as u64,
            "agent health supervision started"
        );
    }

    /// Stop the background loop, waiting up to `poll_join_timeout` for
    /// the task to exit. In-flight mutator calls are unaffected.
    pub async fn stop(&self) {
        let Some(poller) = self.poller.lock().take() else {
            return;
        };
        poller.cancel.cancel();
        match tokio::time::timeout(self.config.poll_join_timeout, poller.handle).await {
            Ok(Ok(())) => tracing::info!("agent health supervision stopped"),
            Ok(Err(join_err)) => {
                tracing::error!(error = %join_err, "supervisor poller task failed")
            }
            Err(_) => tracing::warn!("timed out waiting for supervisor poller to stop"),
        }
    }

    /// Run one evaluation pass immediately, outside the background
    /// schedule. Useful for deterministic tests and final sweeps.
    pub fn check_now(&self) {
        self.poll_task().check_agents();
    }

    pub(crate) fn poll_task(&self) -> poller::PollTask<P, C> {
        poller::PollTask {
            config: self.config.clone(),
            agents: Arc::clone(&self.agents),
            observers: Arc::clone(&self.observers),
            probe: Arc::clone(&self.probe),
            clock: self.clock.clone(),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
