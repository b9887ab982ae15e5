use super::*;
use std::thread;

#[test]
fn test_search_limits_depth_only() {
    let limits = SearchLimits::depth(5);
    assert_eq!(limits.depth, 5);
    assert!(limits.time_control.remaining().is_none());
    assert!(!limits.should_stop());
}

#[test]
fn test_time_control_expiry() {
    let tc = TimeControl::new(Some(Duration::from_millis(10)));
    tc.start();
    assert!(!tc.is_stopped());

    thread::sleep(Duration::from_millis(20));
    assert!(tc.check_time());
    assert!(tc.is_stopped());
    assert_eq!(tc.remaining(), Some(Duration::ZERO));
}

#[test]
fn test_time_control_no_limit() {
    let tc = TimeControl::new(None);
    tc.start();
    thread::sleep(Duration::from_millis(5));
    assert!(!tc.check_time());
    assert!(tc.elapsed() > Duration::ZERO);
}

#[test]
fn test_stop_is_shared_between_clones() {
    let tc = TimeControl::new(None);
    let handle = tc.clone();
    handle.stop();
    assert!(tc.is_stopped());
}

#[test]
fn test_start_keeps_an_earlier_stop() {
    let limits = SearchLimits::depth(3);
    limits.time_control.stop();
    limits.start();
    assert!(limits.should_stop());
}

#[test]
fn test_check_interval() {
    let tc = TimeControl::default();
    assert!(tc.should_check_time(0));
    assert!(!tc.should_check_time(1));
    assert!(tc.should_check_time(2048));
}
