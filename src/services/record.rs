//! Widget record — the mutable entity owned by the store.
//!
//! DESIGN
//! ======
//! The id is fixed at construction. Geometry, z-index, and the modification
//! timestamp live behind one mutex, so each setter compares, applies, and
//! stamps `last_modified` as a single step. A setter given the current value
//! is a no-op and leaves the timestamp alone. Readers never see a changed
//! value paired with a stale timestamp.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Point-in-time copy of a record. Doubles as the JSON wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: u64,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub z_index: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub last_modified: OffsetDateTime,
}

// =============================================================================
// RECORD
// =============================================================================

#[derive(Debug)]
struct Fields {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    z_index: i32,
    last_modified: OffsetDateTime,
}

/// A live widget. Shared between the store and in-flight operations as
/// `Arc<WidgetRecord>`; all mutation goes through `&self`.
#[derive(Debug)]
pub struct WidgetRecord {
    id: u64,
    fields: Mutex<Fields>,
}

impl WidgetRecord {
    #[must_use]
    pub fn new(id: u64, x: i32, y: i32, width: i32, height: i32, z_index: i32) -> Self {
        Self {
            id,
            fields: Mutex::new(Fields { x, y, width, height, z_index, last_modified: OffsetDateTime::now_utc() }),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.lock().x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.lock().y
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.lock().width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.lock().height
    }

    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.lock().z_index
    }

    #[must_use]
    pub fn last_modified(&self) -> OffsetDateTime {
        self.lock().last_modified
    }

    /// Returns `true` if the value changed.
    pub fn set_x(&self, x: i32) -> bool {
        self.set_field(|f| &mut f.x, x)
    }

    /// Returns `true` if the value changed.
    pub fn set_y(&self, y: i32) -> bool {
        self.set_field(|f| &mut f.y, y)
    }

    /// Returns `true` if the value changed.
    pub fn set_width(&self, width: i32) -> bool {
        self.set_field(|f| &mut f.width, width)
    }

    /// Returns `true` if the value changed.
    pub fn set_height(&self, height: i32) -> bool {
        self.set_field(|f| &mut f.height, height)
    }

    /// Returns `true` if the value changed.
    pub fn set_z_index(&self, z_index: i32) -> bool {
        self.set_field(|f| &mut f.z_index, z_index)
    }

    /// Read-modify-write of the z-index under the record lock. The timestamp
    /// follows the same rule as the setters: refreshed only on change.
    pub fn update_z_index(&self, f: impl FnOnce(i32) -> i32) -> bool {
        let mut fields = self.lock();
        let next = f(fields.z_index);
        if next == fields.z_index {
            return false;
        }
        fields.z_index = next;
        fields.last_modified = OffsetDateTime::now_utc();
        true
    }

    /// Copy every field under one lock acquisition.
    #[must_use]
    pub fn snapshot(&self) -> Widget {
        let fields = self.lock();
        Widget {
            id: self.id,
            x: fields.x,
            y: fields.y,
            width: fields.width,
            height: fields.height,
            z_index: fields.z_index,
            last_modified: fields.last_modified,
        }
    }

    fn set_field(&self, field: fn(&mut Fields) -> &mut i32, value: i32) -> bool {
        let mut fields = self.lock();
        let slot = field(&mut *fields);
        if *slot == value {
            return false;
        }
        *slot = value;
        fields.last_modified = OffsetDateTime::now_utc();
        true
    }

    // Critical sections never leave fields half-written.
    fn lock(&self) -> MutexGuard<'_, Fields> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
