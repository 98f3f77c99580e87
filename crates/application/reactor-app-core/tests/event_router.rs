mod common;

use std::time::Duration;

use common::{FakeServices, Harness};
use reactor_core::{
    ErrorKind, ErrorReport, LifecycleState, NavigationRequest, PerformanceSample, StatusReport,
};

#[tokio::test]
async fn critical_report_forces_emergency_mode() {
    let mut h = Harness::new(FakeServices::new());
    h.orchestrator.run_startup().await;
    h.kernel.tick();
    let status_before = h.vm().status_message.clone();

    h.kernel.events().report_error(
        ErrorReport::new(ErrorKind::Critical, "Reactor overheat").with_cause("sensor 3"),
    );

    assert!(h.settle_until(|vm| vm.is_emergency_mode).await);
    assert_eq!(h.vm().emergency_message, "Reactor overheat");
    assert_eq!(h.vm().status_message, status_before);
    assert_eq!(h.orchestrator.state(), LifecycleState::EmergencyMode);
}

#[tokio::test]
async fn serial_fault_marks_connection_offline() {
    let mut h = Harness::new(FakeServices::new());

    h.kernel
        .events()
        .report_status(StatusReport::new("Connected", "ONLINE", true));
    assert!(h.settle_until(|vm| vm.is_online).await);

    h.kernel.events().report_error(ErrorReport::new(
        ErrorKind::SerialCommunication,
        "COM3 timed out",
    ));
    assert!(h.settle_until(|vm| !vm.is_online).await);

    assert!(h.vm().status_message.contains("COM3 timed out"));
    assert!(!h.vm().is_emergency_mode);
}

#[tokio::test]
async fn non_critical_reports_only_change_status_text() {
    let mut h = Harness::new(FakeServices::new());

    h.kernel
        .events()
        .report_error(ErrorReport::new(ErrorKind::DataSave, "recipe not written"));
    assert!(
        h.settle_until(|vm| vm.status_message.contains("recipe not written"))
            .await
    );
    assert!(!h.vm().is_emergency_mode);

    h.kernel
        .events()
        .report_error(ErrorReport::new(ErrorKind::Navigation, "bad route"));
    assert!(h.settle_until(|vm| vm.status_message.contains("bad route")).await);
    assert!(!h.vm().is_emergency_mode);
}

#[tokio::test]
async fn status_reports_are_last_write_wins() {
    let mut h = Harness::new(FakeServices::new());

    h.kernel
        .events()
        .report_status(StatusReport::new("Heating", "RUNNING", true));
    h.kernel
        .events()
        .report_status(StatusReport::new("Cooling", "IDLE", false));

    assert!(h.settle_until(|vm| vm.status_message == "Cooling").await);
    assert_eq!(h.vm().system_status, "IDLE");
    assert!(!h.vm().is_online);
}

#[tokio::test]
async fn navigation_request_updates_current_view() {
    let mut h = Harness::new(FakeServices::new());
    h.orchestrator.run_startup().await;

    h.kernel
        .events()
        .request_navigation(NavigationRequest::new("Dosing"));

    assert!(
        h.settle_until(|vm| vm.current_view_name() == Some("Dosing"))
            .await
    );
    assert!(!h.vm().is_navigating);
    assert_eq!(h.services.count("navigation.navigate_to:Dosing"), 1);
    assert_eq!(h.orchestrator.state(), LifecycleState::Ready);
}

#[tokio::test]
async fn overlapping_navigation_requests_run_one_at_a_time() {
    let services = FakeServices::new().delay_navigation(Duration::from_millis(30));
    let mut h = Harness::new(services);

    h.kernel
        .events()
        .request_navigation(NavigationRequest::new("Temperature"));
    h.kernel
        .events()
        .request_navigation(NavigationRequest::new("Jacket"));

    assert!(
        h.settle_until(|vm| vm.current_view_name() == Some("Jacket") && !vm.is_navigating)
            .await
    );
    assert_eq!(h.services.max_concurrent_navigations(), 1);

    let first = h
        .services
        .position("navigation.navigate_to:Temperature")
        .unwrap();
    let second = h.services.position("navigation.navigate_to:Jacket").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn failed_navigation_clears_flag_and_reports() {
    let services = FakeServices::new().fail("navigation.navigate_to", "unknown view");
    let mut h = Harness::new(services);

    let result = h.orchestrator.navigate_to_view("Nowhere").await;
    assert!(result.is_err());

    h.kernel.tick();
    assert!(!h.vm().is_navigating);
    assert!(h.vm().status_message.contains("Navigation error"));
    assert!(h.vm().current_view.is_none());
}

#[tokio::test]
async fn navigate_to_view_returns_the_mounted_view() {
    let mut h = Harness::new(FakeServices::new());

    let view = h.orchestrator.navigate_to_view("Stirrer").await.unwrap();
    assert_eq!(view.name, "Stirrer");

    h.kernel.tick();
    assert_eq!(h.vm().current_view_name(), Some("Stirrer"));
}

#[tokio::test]
async fn performance_samples_reach_the_view_model() {
    let mut h = Harness::new(FakeServices::new());
    let sample = PerformanceSample::now(59.5, 212.0);

    h.services.emit(sample);

    assert!(h.settle_until(|vm| vm.performance.is_some()).await);
    assert_eq!(h.vm().performance, Some(sample));
}

#[tokio::test]
async fn emergency_mode_can_be_activated_by_the_host() {
    let mut h = Harness::new(FakeServices::new());

    h.orchestrator.activate_emergency_mode("Manual stop engaged");
    h.kernel.tick();

    assert!(h.vm().is_emergency_mode);
    assert_eq!(h.vm().emergency_message, "Manual stop engaged");
    assert!(!h.vm().is_interactive());
}

#[tokio::test]
async fn navigation_parameters_reach_the_service() {
    let mut h = Harness::new(FakeServices::new());
    h.orchestrator.run_startup().await;

    h.kernel.events().request_navigation(
        NavigationRequest::new("Jacket").with_parameters(serde_json::json!({ "zone": 2 })),
    );

    assert!(
        h.settle_until(|vm| vm.current_view_name() == Some("Jacket"))
            .await
    );
    assert_eq!(
        h.services.last_parameters(),
        Some(serde_json::json!({ "zone": 2 }))
    );
}
