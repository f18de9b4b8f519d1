// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! OS boundary: process existence probes and termination signals.
//!
//! The trait exists so the evaluator and termination controller can be
//! tested with scripted failures instead of real pids.

use thiserror::Error;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod fake;

/// Strength of a termination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSignal {
    /// SIGTERM: ask the process to exit.
    Graceful,
    /// SIGKILL: remove it.
    Forced,
}

/// Failures from probing or signalling an OS process.
///
/// `NotFound` and `PermissionDenied` are distinguishable on purpose: a
/// pid the OS refuses to probe is alive, not gone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("process {0} not found")]
    NotFound(u32),
    #[error("permission denied signalling process {0}")]
    PermissionDenied(u32),
    #[error("signal to process {0} failed: {1}")]
    Os(u32, String),
}

/// Boundary to the OS for process existence checks and termination.
pub trait ProcessProbe: Send + Sync {
    /// Check that `pid` exists (signal 0). `Ok(())` means alive.
    fn probe(&self, pid: u32) -> Result<(), SignalError>;

    /// Deliver a termination signal to `pid`.
    fn send_signal(&self, pid: u32, signal: TermSignal) -> Result<(), SignalError>;
}

/// Probe backed by `nix::sys::signal::kill`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NixProbe;

impl ProcessProbe for NixProbe {
    fn probe(&self, pid: u32) -> Result<(), SignalError> {
        nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), None)
            .map_err(|errno| map_errno(pid, errno))
    }

    fn send_signal(&self, pid: u32, signal: TermSignal) -> Result<(), SignalError> {
        let sig = match signal {
            TermSignal::Graceful => nix::sys::signal::Signal::SIGTERM,
            TermSignal::Forced => nix::sys::signal::Signal::SIGKILL,
        };
        nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), sig)
            .map_err(|errno| map_errno(pid, errno))
    }
}

fn map_errno(pid: u32, errno: nix::errno::Errno) -> SignalError {
    match errno {
        nix::errno::Errno::ESRCH => SignalError::NotFound(pid),
        nix::errno::Errno::EPERM => SignalError::PermissionDenied(pid),
        other => SignalError::Os(pid, other.to_string()),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
