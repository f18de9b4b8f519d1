// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Supervisor lifecycle specs against real OS processes
//!
//! Uses short-lived `sleep` children to exercise the production probe
//! and signal path end to end.

use std::process::Command;
use std::time::Duration;

use warden_core::{AgentId, AgentStatus, HealthVerdict};
use warden_engine::{AgentSupervisor, Registration, SupervisorConfig};

fn spawn_sleeper() -> std::process::Child {
    Command::new("sleep").arg("30").spawn().unwrap()
}

#[test]
fn live_child_process_probes_healthy() {
    let mut child = spawn_sleeper();
    let supervisor = AgentSupervisor::new(SupervisorConfig::default());
    let id = AgentId::new("sleeper");

    supervisor.register(Registration::new("sleeper").process_id(child.id()));
    supervisor.update_status(&id, AgentStatus::Running, None);
    supervisor.heartbeat(&id, None);
    supervisor.check_now();

    assert_eq!(supervisor.get(&id).unwrap().health, HealthVerdict::Healthy);

    supervisor.terminate(&id, true);
    let _ = child.wait();
}

#[test]
fn terminate_delivers_a_real_signal() {
    let mut child = spawn_sleeper();
    let supervisor = AgentSupervisor::new(SupervisorConfig::default());
    let id = AgentId::new("sleeper");

    supervisor.register(Registration::new("sleeper").process_id(child.id()));
    supervisor.update_status(&id, AgentStatus::Running, None);

    assert!(supervisor.terminate(&id, false));
    assert_eq!(supervisor.get(&id).unwrap().status, AgentStatus::Cancelled);

    let status = child.wait().unwrap();
    assert!(!status.success(), "child was signalled, not a clean exit");
}

#[test]
fn reaped_child_is_reported_gone() {
    let mut child = spawn_sleeper();
    let pid = child.id();
    let supervisor = AgentSupervisor::new(SupervisorConfig::default());
    let id = AgentId::new("sleeper");

    supervisor.register(Registration::new("sleeper").process_id(pid));
    supervisor.update_status(&id, AgentStatus::Running, None);
    supervisor.heartbeat(&id, None);

    child.kill().unwrap();
    child.wait().unwrap();

    supervisor.check_now();
    assert_eq!(
        supervisor.get(&id).unwrap().health,
        HealthVerdict::Unhealthy
    );
}

#[tokio::test]
async fn background_supervision_starts_and_stops_cleanly() {
    let supervisor = AgentSupervisor::new(SupervisorConfig {
        health_check_interval: Duration::from_millis(20),
        ..SupervisorConfig::default()
    });
    let id = AgentId::new("agent-1");

    supervisor.register(Registration::new("agent-1"));
    supervisor.update_status(&id, AgentStatus::Running, None);
    supervisor.heartbeat(&id, None);

    supervisor.start();
    tokio::time::sleep(Duration::from_millis(60)).await;
    supervisor.stop().await;

    // The poller evaluated at least once before stopping
    assert_eq!(supervisor.get(&id).unwrap().health, HealthVerdict::Healthy);
}
