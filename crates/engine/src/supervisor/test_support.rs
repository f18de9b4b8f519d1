// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Shared helpers for supervisor tests.

use crate::config::SupervisorConfig;
use crate::process::fake::FakeProbe;
use crate::supervisor::{Registration, Supervisor};
use warden_core::FakeClock;

/// Supervisor under test plus handles to its fake probe and clock.
pub(crate) struct Harness {
    pub(crate) supervisor: Supervisor<FakeProbe, FakeClock>,
    pub(crate) probe: FakeProbe,
    pub(crate) clock: FakeClock,
}

pub(crate) fn harness() -> Harness {
    harness_with(SupervisorConfig::default())
}

pub(crate) fn harness_with(config: SupervisorConfig) -> Harness {
    let probe = FakeProbe::new();
    let clock = FakeClock::new();
    let supervisor = Supervisor::with_parts(config, probe.clone(), clock.clone());
    Harness {
        supervisor,
        probe,
        clock,
    }
}

/// Registration for a plain agent with a pid.
pub(crate) fn agent(id: &str, pid: u32) -> Registration {
    Registration::new(id).process_id(pid)
}
