// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Observer registration and isolated dispatch.
//!
//! Mutators collect [`Notification`] values while the registry lock is
//! held and hand them to [`Observers::dispatch`] after releasing it, so
//! an observer can safely call back into the supervisor.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use warden_core::{AgentId, AgentStatus, HealthVerdict};

pub(crate) type StatusObserver = Arc<dyn Fn(&AgentId, AgentStatus) + Send + Sync>;
pub(crate) type HealthObserver = Arc<dyn Fn(&AgentId, HealthVerdict) + Send + Sync>;
pub(crate) type ErrorObserver = Arc<dyn Fn(&AgentId, &str) + Send + Sync>;

/// A transition to announce once the registry lock has been released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notification {
    Status { id: AgentId, status: AgentStatus },
    Health { id: AgentId, health: HealthVerdict },
    Error { id: AgentId, message: String },
}

/// Three independent observer lists: status changes, health changes,
/// errors.
///
/// Each invocation is individually wrapped in `catch_unwind`; a
/// panicking observer is logged and contained, and the remaining
/// observers still run. Dispatch snapshots each list and holds no lock
/// while callbacks run, so an observer may re-enter the supervisor,
/// including mutations that trigger further dispatch.
#[derive(Default)]
pub(crate) struct Observers {
    status: Mutex<Vec<StatusObserver>>,
    health: Mutex<Vec<HealthObserver>>,
    error: Mutex<Vec<ErrorObserver>>,
}

impl Observers {
    pub(crate) fn add_status(&self, observer: StatusObserver) {
        self.status.lock().push(observer);
    }

    pub(crate) fn add_health(&self, observer: HealthObserver) {
        self.health.lock().push(observer);
    }

    pub(crate) fn add_error(&self, observer: ErrorObserver) {
        self.error.lock().push(observer);
    }

    /// Deliver notifications in order, isolating each observer call.
    ///
    /// The per-list lock is released before any callback runs; a
    /// re-entrant mutation that dispatches again must not self-deadlock.
    pub(crate) fn dispatch(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            match notification {
                Notification::Status { id, status } => {
                    let observers = self.status.lock().clone();
                    for observer in &observers {
                        let call = catch_unwind(AssertUnwindSafe(|| observer(&id, status)));
                        if call.is_err() {
                            tracing::error!(agent_id = %id, %status, "status observer panicked");
                        }
                    }
                }
                Notification::Health { id, health } => {
                    let observers = self.health.lock().clone();
                    for observer in &observers {
                        let call = catch_unwind(AssertUnwindSafe(|| observer(&id, health)));
                        if call.is_err() {
                            tracing::error!(agent_id = %id, %health, "health observer panicked");
                        }
                    }
                }
                Notification::Error { id, message } => {
                    let observers = self.error.lock().clone();
                    for observer in &observers {
                        let call = catch_unwind(AssertUnwindSafe(|| observer(&id, &message)));
                        if call.is_err() {
                            tracing::error!(agent_id = %id, "error observer panicked");
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
