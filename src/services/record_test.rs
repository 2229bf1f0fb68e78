use super::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn record() -> WidgetRecord {
    WidgetRecord::new(7, 10, 20, 100, 200, 5)
}

/// Make sure the next `now_utc()` reading is strictly later.
fn tick() {
    thread::sleep(Duration::from_millis(5));
}

#[test]
fn new_record_reports_initial_fields() {
    let r = record();
    assert_eq!(r.id(), 7);
    assert_eq!(r.x(), 10);
    assert_eq!(r.y(), 20);
    assert_eq!(r.width(), 100);
    assert_eq!(r.height(), 200);
    assert_eq!(r.z_index(), 5);
}

#[test]
fn setters_apply_new_values() {
    let r = record();
    assert!(r.set_x(-3));
    assert!(r.set_y(4));
    assert!(r.set_width(50));
    assert!(r.set_height(60));
    assert!(r.set_z_index(-9));
    assert_eq!((r.x(), r.y(), r.width(), r.height(), r.z_index()), (-3, 4, 50, 60, -9));
}

// =============================================================================
// Timestamp discipline
// =============================================================================

#[test]
fn setting_current_value_keeps_timestamp() {
    let r = record();
    let before = r.last_modified();
    tick();

    assert!(!r.set_x(10));
    assert!(!r.set_y(20));
    assert!(!r.set_width(100));
    assert!(!r.set_height(200));
    assert!(!r.set_z_index(5));

    assert_eq!(r.last_modified(), before);
}

#[test]
fn setting_different_value_refreshes_timestamp() {
    let r = record();
    let before = r.last_modified();
    tick();

    assert!(r.set_height(201));
    let after = r.last_modified();
    assert!(after > before);

    tick();
    assert!(r.set_z_index(6));
    assert!(r.last_modified() > after);
}

#[test]
fn update_z_index_identity_keeps_timestamp() {
    let r = record();
    let before = r.last_modified();
    tick();

    assert!(!r.update_z_index(|z| z));
    assert_eq!(r.z_index(), 5);
    assert_eq!(r.last_modified(), before);
}

#[test]
fn update_z_index_applies_closure() {
    let r = record();
    let before = r.last_modified();
    tick();

    assert!(r.update_z_index(|z| z + 3));
    assert_eq!(r.z_index(), 8);
    assert!(r.last_modified() > before);
}

// =============================================================================
// Snapshot
// =============================================================================

#[test]
fn snapshot_copies_all_fields() {
    let r = record();
    r.set_x(11);
    let snap = r.snapshot();
    assert_eq!(snap.id, 7);
    assert_eq!(snap.x, 11);
    assert_eq!(snap.y, 20);
    assert_eq!(snap.width, 100);
    assert_eq!(snap.height, 200);
    assert_eq!(snap.z_index, 5);
    assert_eq!(snap.last_modified, r.last_modified());
}

#[test]
fn snapshot_serializes_camel_case() {
    let snap = record().snapshot();
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["zIndex"], 5);
    assert_eq!(json["width"], 100);
    assert!(json["lastModified"].is_string());
    assert!(json.get("z_index").is_none());
}

#[test]
fn snapshot_serde_round_trip() {
    let snap = record().snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let restored: Widget = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snap);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrent_z_index_updates_are_not_lost() {
    let r = Arc::new(WidgetRecord::new(1, 0, 0, 1, 1, 0));
    thread::scope(|s| {
        for _ in 0..8 {
            let r = Arc::clone(&r);
            s.spawn(move || {
                for _ in 0..1000 {
                    r.update_z_index(|z| z + 1);
                }
            });
        }
    });
    assert_eq!(r.z_index(), 8000);
}

#[test]
fn concurrent_setters_leave_one_written_value() {
    let r = Arc::new(record());
    thread::scope(|s| {
        for value in 0..8 {
            let r = Arc::clone(&r);
            s.spawn(move || {
                r.set_x(value);
            });
        }
    });
    assert!((0..8).contains(&r.x()));
}
