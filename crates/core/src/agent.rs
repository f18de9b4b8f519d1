// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Agent identity and the caller-asserted lifecycle status.
//!
//! `AgentStatus` is what the spawning collaborator reports; the engine
//! never infers it from agent output. `HealthVerdict` is the engine's
//! derived opinion and is only ever written by the evaluator.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Caller-assigned identifier for a supervised agent.
///
/// The format is opaque to the engine. Uniqueness is the caller's
/// contract; re-registering an id replaces the prior record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(SmolStr);

impl AgentId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Lifecycle status asserted by the caller supervising the agent.
///
/// The sequence is not enforced. The engine writes `Timeout` itself when
/// runtime exceeds the configured threshold; every other value comes
/// from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Initializing,
    Running,
    WaitingApproval,
    Completing,
    Completed,
    Failed,
    Cancelled,
    Timeout,
    Unknown,
}

impl AgentStatus {
    /// Statuses in which the agent is expected to have a live process.
    pub fn is_running_like(self) -> bool {
        matches!(
            self,
            Self::Initializing | Self::Running | Self::WaitingApproval
        )
    }
}

crate::simple_display! {
    AgentStatus {
        Initializing => "initializing",
        Running => "running",
        WaitingApproval => "waiting_approval",
        Completing => "completing",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
        Timeout => "timeout",
        Unknown => "unknown",
    }
}

/// Error for an unrecognized status string.
///
/// Parsing rejects invalid input instead of degrading to `Unknown`, so
/// a typo at the boundary surfaces immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized agent status: {0}")]
pub struct StatusParseError(pub String);

impl FromStr for AgentStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "initializing" => Self::Initializing,
            "running" => Self::Running,
            "waiting_approval" => Self::WaitingApproval,
            "completing" => Self::Completing,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            "timeout" => Self::Timeout,
            "unknown" => Self::Unknown,
            other => return Err(StatusParseError(other.to_string())),
        })
    }
}

/// Engine-derived opinion of an agent's well-being.
///
/// Distinct from [`AgentStatus`]: a `running` agent may be `degraded`
/// (stale heartbeat) or `unhealthy` (process gone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthVerdict {
    Healthy,
    Degraded,
    Unhealthy,
    Unknown,
}

crate::simple_display! {
    HealthVerdict {
        Healthy => "healthy",
        Degraded => "degraded",
        Unhealthy => "unhealthy",
        Unknown => "unknown",
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
