// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Scripted process probe for tests.

use super::{ProcessProbe, SignalError, TermSignal};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Probe whose per-pid behavior is scripted by the test.
///
/// Pids without a scripted failure behave as alive and signalable.
/// Clones share state, so a test can keep a handle after handing the
/// probe to the supervisor.
#[derive(Clone, Default)]
pub struct FakeProbe {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    failures: Mutex<HashMap<u32, SignalError>>,
    sent: Mutex<Vec<(u32, TermSignal)>>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every probe/signal call for `pid` fail with `err`.
    pub fn fail_with(&self, pid: u32, err: SignalError) {
        self.inner.failures.lock().insert(pid, err);
    }

    /// Clear a scripted failure, making `pid` behave as alive again.
    pub fn revive(&self, pid: u32) {
        self.inner.failures.lock().remove(&pid);
    }

    /// Signals delivered via `send_signal`, in order.
    pub fn sent(&self) -> Vec<(u32, TermSignal)> {
        self.inner.sent.lock().clone()
    }
}

impl ProcessProbe for FakeProbe {
    fn probe(&self, pid: u32) -> Result<(), SignalError> {
        match self.inner.failures.lock().get(&pid) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn send_signal(&self, pid: u32, signal: TermSignal) -> Result<(), SignalError> {
        if let Some(err) = self.inner.failures.lock().get(&pid) {
            return Err(err.clone());
        }
        self.inner.sent.lock().push((pid, signal));
        Ok(())
    }
}
