// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! End-to-end supervision specs
//!
//! Walk an agent through register -> heartbeat -> degradation ->
//! timeout -> terminate using injected clock and probe, the way a
//! spawning collaborator would drive the engine.

use std::sync::Arc;
use std::time::Duration;

use warden_core::{AgentId, AgentMetrics, AgentStatus, Clock, FakeClock, HealthVerdict};
use warden_engine::{FakeProbe, Registration, SignalError, Supervisor, SupervisorConfig, TermSignal};

fn build() -> (Supervisor<FakeProbe, FakeClock>, FakeProbe, FakeClock) {
    let probe = FakeProbe::new();
    let clock = FakeClock::new();
    let config = SupervisorConfig {
        timeout_threshold: Duration::from_secs(120),
        ..SupervisorConfig::default()
    };
    let supervisor = Supervisor::with_parts(config, probe.clone(), clock.clone());
    (supervisor, probe, clock)
}

#[test]
fn full_agent_lifecycle_happy_path() {
    let (supervisor, _probe, clock) = build();
    let id = AgentId::new("job-42-build");

    supervisor.register(
        Registration::new("job-42-build")
            .process_id(9001)
            .log_file("/tmp/job-42-build.log")
            .metadata("repo", serde_json::json!("acme/widget")),
    );
    supervisor.update_status(&id, AgentStatus::Running, None);

    for _ in 0..5 {
        clock.advance(Duration::from_secs(10));
        supervisor.heartbeat(
            &id,
            Some(AgentMetrics {
                tokens_used: Some(1200),
                ..AgentMetrics::default()
            }),
        );
        supervisor.check_now();
        assert_eq!(supervisor.get(&id).unwrap().health, HealthVerdict::Healthy);
    }

    supervisor.update_status(&id, AgentStatus::Completed, None);
    supervisor.check_now();

    let record = supervisor.get(&id).unwrap();
    assert_eq!(record.status, AgentStatus::Completed);
    assert_eq!(record.health, HealthVerdict::Healthy);
    assert_eq!(record.runtime(clock.epoch_ms()), Duration::from_secs(50));
}

#[test]
fn silent_agent_degrades_then_times_out_then_is_killed() {
    let (supervisor, probe, clock) = build();
    let id = AgentId::new("job-7-fix");

    supervisor.register(Registration::new("job-7-fix").process_id(9002));
    supervisor.update_status(&id, AgentStatus::Running, None);
    supervisor.heartbeat(&id, None);

    let transitions = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&transitions);
    supervisor.on_health_change(move |_, health| {
        sink.lock().push(health);
    });

    // Heartbeats stop: after the responsiveness window the agent is
    // degraded but not dead
    clock.advance(Duration::from_secs(60));
    supervisor.check_now();
    assert_eq!(supervisor.get(&id).unwrap().health, HealthVerdict::Degraded);

    // Past the timeout threshold the engine asserts timeout status
    clock.advance(Duration::from_secs(90));
    supervisor.check_now();
    assert_eq!(supervisor.get(&id).unwrap().status, AgentStatus::Timeout);
    supervisor.check_now();
    assert_eq!(supervisor.get(&id).unwrap().health, HealthVerdict::Unhealthy);

    assert_eq!(
        *transitions.lock(),
        vec![HealthVerdict::Degraded, HealthVerdict::Unhealthy]
    );

    // The control collaborator force-kills what is left
    assert!(supervisor.terminate(&id, true));
    assert_eq!(probe.sent(), vec![(9002, TermSignal::Forced)]);
    assert_eq!(supervisor.get(&id).unwrap().status, AgentStatus::Cancelled);
}

#[test]
fn crashed_process_is_detected_and_terminate_still_succeeds() {
    let (supervisor, probe, clock) = build();
    let id = AgentId::new("job-9-test");

    supervisor.register(Registration::new("job-9-test").process_id(9003));
    supervisor.update_status(&id, AgentStatus::Running, None);
    supervisor.heartbeat(&id, None);

    // The OS process dies between heartbeats
    probe.fail_with(9003, SignalError::NotFound(9003));
    clock.advance(Duration::from_secs(5));
    supervisor.heartbeat(&id, None);
    supervisor.check_now();
    assert_eq!(supervisor.get(&id).unwrap().health, HealthVerdict::Unhealthy);

    // Terminate finds nothing to kill but the request is honored
    assert!(supervisor.terminate(&id, false));
    let record = supervisor.get(&id).unwrap();
    assert_eq!(record.status, AgentStatus::Failed);
    assert_eq!(record.error_message.as_deref(), Some("Process not found"));
}

#[test]
fn observer_reentrancy_into_the_registry_is_safe() {
    let probe = FakeProbe::new();
    let clock = FakeClock::new();
    let supervisor = Arc::new(Supervisor::with_parts(
        SupervisorConfig::default(),
        probe,
        clock,
    ));

    let reentrant = Arc::clone(&supervisor);
    let totals = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&totals);
    supervisor.on_status_change(move |_, _| {
        // Calling back into the supervisor from a notification must not
        // deadlock: dispatch happens outside the registry lock
        sink.lock().push(reentrant.summary().total);
    });

    supervisor.register(Registration::new("a"));
    supervisor.update_status(&AgentId::new("a"), AgentStatus::Running, None);

    assert_eq!(*totals.lock(), vec![1]);
}

#[test]
fn retained_records_answer_post_mortem_queries() {
    let (supervisor, _probe, clock) = build();

    supervisor.register(Registration::new("done-1"));
    supervisor.register(Registration::new("done-2"));
    supervisor.update_status(&AgentId::new("done-1"), AgentStatus::Completed, None);
    supervisor.update_status(
        &AgentId::new("done-2"),
        AgentStatus::Failed,
        Some("compile error"),
    );
    supervisor.check_now();
    clock.advance(Duration::from_secs(30));

    // Completed agents stay queryable until explicitly unregistered
    let summary = supervisor.summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.status_counts["completed"], 1);
    assert_eq!(summary.status_counts["failed"], 1);
    assert_eq!(summary.total_errors, 1);

    supervisor.unregister(&AgentId::new("done-1"));
    assert_eq!(supervisor.summary().total, 1);
}
