mod common;

use common::{FakeServices, Harness};
use reactor_app_core::StartupOutcome;
use reactor_core::LifecycleState;

#[tokio::test]
async fn startup_brings_services_up_in_order() {
    let mut h = Harness::new(FakeServices::new());

    assert_eq!(h.orchestrator.run_startup().await, StartupOutcome::Completed);

    assert_eq!(
        h.services.calls(),
        vec![
            "navigation.initialize",
            "animation.initialize",
            "animation.set_hardware_acceleration:true",
            "state.initialize",
            "state.load_state",
            "performance.start_monitoring",
            "navigation.navigate_to:Overview",
        ]
    );

    h.kernel.tick();
    let vm = h.vm();
    assert!(!vm.is_loading);
    assert_eq!(vm.loading_progress, 100.0);
    assert_eq!(vm.status_message, reactor_config::READY_STATUS_MESSAGE);
    assert_eq!(vm.current_view_name(), Some("Overview"));
    assert!(!vm.is_navigating);
    assert_eq!(vm.lifecycle, LifecycleState::Ready);
    assert_eq!(h.orchestrator.state(), LifecycleState::Ready);
}

#[tokio::test]
async fn repeated_startup_is_a_no_op() {
    let h = Harness::new(FakeServices::new());

    assert_eq!(h.orchestrator.run_startup().await, StartupOutcome::Completed);
    assert_eq!(
        h.orchestrator.run_startup().await,
        StartupOutcome::AlreadyInitialized
    );

    assert_eq!(h.services.count("navigation.initialize"), 1);
    assert_eq!(h.services.count("animation.initialize"), 1);
    assert_eq!(h.services.count("state.load_state"), 1);
    assert_eq!(h.services.count("performance.start_monitoring"), 1);
}

#[tokio::test]
async fn concurrent_shown_notifications_initialize_once() {
    let h = Harness::new(FakeServices::new());

    let (a, b) = tokio::join!(h.orchestrator.run_startup(), h.orchestrator.run_startup());

    let mut outcomes = vec![a, b];
    outcomes.sort_by_key(|o| matches!(o, StartupOutcome::Completed));
    assert_eq!(
        outcomes,
        vec![StartupOutcome::AlreadyInitialized, StartupOutcome::Completed]
    );
    assert_eq!(h.services.count("navigation.initialize"), 1);
}

#[tokio::test]
async fn load_fault_enters_emergency_mode_and_skips_remaining_steps() {
    let services = FakeServices::new().fail("state.load_state", "disk unreadable");
    let mut h = Harness::new(services);

    let outcome = h.orchestrator.run_startup().await;
    match &outcome {
        StartupOutcome::Failed(message) => assert!(message.contains("disk unreadable")),
        other => panic!("expected startup failure, got {other:?}"),
    }

    assert_eq!(h.services.count("performance.start_monitoring"), 0);
    assert!(h
        .services
        .calls()
        .iter()
        .all(|c| !c.starts_with("navigation.navigate_to")));
    // Already-started services are left running.
    assert_eq!(h.services.count("animation.stop"), 0);

    h.kernel.tick();
    let vm = h.vm();
    assert!(vm.is_emergency_mode);
    assert!(vm.emergency_message.contains("disk unreadable"));
    assert!(vm
        .error_dialog
        .as_deref()
        .is_some_and(|m| m.contains("disk unreadable")));
    assert!(!vm.is_loading);
    assert_eq!(vm.loading_progress, 75.0);
    assert_eq!(vm.loading_text, "Loading saved state...");
    assert_eq!(h.orchestrator.state(), LifecycleState::EmergencyMode);
}

#[tokio::test]
async fn navigation_init_fault_stops_before_animation() {
    let services = FakeServices::new().fail("navigation.initialize", "no views registered");
    let mut h = Harness::new(services);

    assert!(matches!(
        h.orchestrator.run_startup().await,
        StartupOutcome::Failed(_)
    ));
    assert_eq!(h.services.calls(), vec!["navigation.initialize"]);

    h.kernel.tick();
    assert_eq!(h.vm().loading_progress, 25.0);
    assert!(h.vm().is_emergency_mode);
}

#[tokio::test]
async fn unavailable_default_view_does_not_abort_startup() {
    let services = FakeServices::new().fail("navigation.navigate_to", "view missing");
    let mut h = Harness::new(services);

    assert_eq!(h.orchestrator.run_startup().await, StartupOutcome::Completed);

    h.kernel.tick();
    let vm = h.vm();
    assert!(!vm.is_emergency_mode);
    assert!(!vm.is_loading);
    assert!(vm.current_view.is_none());
    assert_eq!(h.orchestrator.state(), LifecycleState::Ready);
}

#[tokio::test]
async fn start_runs_the_sequence_in_the_background() {
    let mut h = Harness::new(FakeServices::new());

    h.orchestrator.start();
    h.orchestrator.start();

    assert!(h.settle_until(|vm| !vm.is_loading).await);
    assert_eq!(h.services.count("navigation.initialize"), 1);
}
