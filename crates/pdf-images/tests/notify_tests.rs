use chrono::{TimeDelta, TimeZone, Utc};
use pdf_images::notify::{DISPLAY_MS, FADE_OUT_MS};
use pdf_images::*;

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn ms(value: i64) -> TimeDelta {
    TimeDelta::milliseconds(value)
}

#[test]
fn test_notification_expires_after_display_and_fade() {
    let t0 = start();
    let mut stack = NotificationStack::new();
    stack.push_at("2 image(s) added successfully", Severity::Success, t0);

    stack.tick(t0 + ms(DISPLAY_MS - 1));
    assert_eq!(stack.len(), 1);
    assert!(!stack.latest().unwrap().is_removing());

    // Fading out, still rendered
    stack.tick(t0 + ms(DISPLAY_MS + 100));
    assert_eq!(stack.len(), 1);
    assert!(stack.latest().unwrap().is_removing());

    stack.tick(t0 + ms(DISPLAY_MS + FADE_OUT_MS));
    assert!(stack.is_empty());
}

#[test]
fn test_dismiss_starts_fade_immediately() {
    let t0 = start();
    let mut stack = NotificationStack::new();
    let id = stack.push_at("All images cleared", Severity::Info, t0);

    assert!(stack.dismiss_at(id, t0 + ms(1_000)));
    // Second dismissal of the same notification does nothing
    assert!(!stack.dismiss_at(id, t0 + ms(1_100)));

    stack.tick(t0 + ms(1_200));
    assert_eq!(stack.len(), 1);

    stack.tick(t0 + ms(1_000 + FADE_OUT_MS));
    assert!(stack.is_empty());

    assert!(!stack.dismiss_at(id, t0 + ms(2_000)));
}

#[test]
fn test_notifications_stack_independently() {
    let t0 = start();
    let mut stack = NotificationStack::new();
    let first = stack.push_at("first", Severity::Success, t0);
    let second = stack.push_at("second", Severity::Error, t0 + ms(2_000));
    assert_ne!(first, second);

    let messages: Vec<&str> = stack.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second"]);

    stack.tick(t0 + ms(DISPLAY_MS + FADE_OUT_MS));
    assert_eq!(stack.len(), 1);
    let remaining = stack.latest().unwrap();
    assert_eq!(remaining.id, second);
    assert_eq!(remaining.severity, Severity::Error);
}

#[test]
fn test_next_deadline_tracks_earliest_change() {
    let t0 = start();
    let mut stack = NotificationStack::new();
    assert!(stack.next_deadline().is_none());

    let id = stack.push_at("a", Severity::Info, t0);
    stack.push_at("b", Severity::Info, t0 + ms(1_000));
    assert_eq!(stack.next_deadline(), Some(t0 + ms(DISPLAY_MS)));

    stack.dismiss_at(id, t0 + ms(500));
    assert_eq!(stack.next_deadline(), Some(t0 + ms(500 + FADE_OUT_MS)));
}

#[test]
fn test_opacity_fades_to_zero() {
    let t0 = start();
    let mut stack = NotificationStack::new();
    let id = stack.push_at("bye", Severity::Warning, t0);

    let visible = stack.latest().unwrap();
    assert_eq!(visible.opacity(t0 + ms(4_000)), 1.0);

    stack.dismiss_at(id, t0);
    let fading = stack.latest().unwrap();
    let half = fading.opacity(t0 + ms(FADE_OUT_MS / 2));
    assert!((half - 0.5).abs() < 0.01);
    assert_eq!(fading.opacity(t0 + ms(FADE_OUT_MS * 2)), 0.0);
}

#[test]
fn test_severity_names() {
    assert_eq!(Severity::Success.name(), "success");
    assert_eq!(Severity::Error.name(), "error");
    assert_eq!(Severity::Info.name(), "info");
    assert_eq!(Severity::Warning.name(), "warning");
}
