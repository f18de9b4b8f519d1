// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! warden-engine: health supervision for externally-spawned coding agents.
//!
//! The supervisor stores caller-asserted status per agent, derives a
//! health verdict on a background schedule, detects timeouts, and can
//! deliver termination signals to tracked process ids.
//!
//! The engine deliberately does not spawn agents or read their output —
//! status signals arrive from the spawning collaborator; the engine's
//! job is to store, age, evaluate, and act on them.

pub mod config;
pub mod evaluate;
pub mod notify;
pub mod process;
pub mod supervisor;

pub use config::SupervisorConfig;
pub use evaluate::evaluate;
pub use process::{NixProbe, ProcessProbe, SignalError, TermSignal};
#[cfg(any(test, feature = "test-support"))]
pub use process::fake::FakeProbe;
pub use supervisor::{AgentSupervisor, Registration, Summary, Supervisor};
