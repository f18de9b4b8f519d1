// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! warden-core: data model for the agent health supervisor.
//!
//! Pure types only — no async, no OS calls. The engine crate owns all
//! concurrency and signal delivery.

pub mod macros;

pub mod agent;
pub mod clock;
pub mod metrics;
pub mod record;

pub use agent::{AgentId, AgentStatus, HealthVerdict, StatusParseError};
pub use clock::{Clock, FakeClock, SystemClock};
pub use metrics::AgentMetrics;
pub use record::{HealthRecord, RESPONSIVENESS_WINDOW};
