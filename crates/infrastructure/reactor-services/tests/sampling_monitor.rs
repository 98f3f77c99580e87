use std::time::Duration;

use reactor_app_core::PerformanceMonitor;
use reactor_services::SamplingPerformanceMonitor;

#[tokio::test]
async fn running_monitor_publishes_samples() {
    let monitor = SamplingPerformanceMonitor::new(Duration::from_millis(10));
    let mut samples = monitor.subscribe();

    monitor.start_monitoring().await.unwrap();
    for _ in 0..5 {
        monitor.record_frame();
    }

    let sample = tokio::time::timeout(Duration::from_secs(2), samples.recv())
        .await
        .expect("sample within timeout")
        .unwrap();
    assert!(sample.frames_per_second >= 0.0);
    assert!(sample.memory_usage_mb >= 0.0);

    monitor.stop_monitoring().await.unwrap();
    assert!(!monitor.is_running());
}

#[tokio::test]
async fn pause_and_resume_require_a_running_monitor() {
    let monitor = SamplingPerformanceMonitor::new(Duration::from_millis(50));
    assert!(monitor.pause_monitoring().is_err());
    assert!(monitor.resume_monitoring().is_err());

    monitor.start_monitoring().await.unwrap();
    monitor.pause_monitoring().unwrap();
    assert!(monitor.is_paused());
    monitor.resume_monitoring().unwrap();
    assert!(!monitor.is_paused());

    monitor.stop_monitoring().await.unwrap();
}

#[tokio::test]
async fn update_frequency_rejects_zero() {
    let monitor = SamplingPerformanceMonitor::new(Duration::from_millis(100));

    assert!(monitor.set_update_frequency(Duration::ZERO).is_err());
    assert_eq!(monitor.update_frequency(), Duration::from_millis(100));

    monitor
        .set_update_frequency(Duration::from_secs(2))
        .unwrap();
    assert_eq!(monitor.update_frequency(), Duration::from_secs(2));
}

#[tokio::test]
async fn stopping_twice_is_harmless() {
    let monitor = SamplingPerformanceMonitor::new(Duration::from_millis(20));
    monitor.start_monitoring().await.unwrap();
    monitor.start_monitoring().await.unwrap();

    monitor.stop_monitoring().await.unwrap();
    monitor.stop_monitoring().await.unwrap();
}
