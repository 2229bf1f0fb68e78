//! Widget store — create, read, update, delete, and z-ordered listing.
//!
//! DESIGN
//! ======
//! Records are shared as `Arc<WidgetRecord>` in a `RwLock<HashMap>` keyed by
//! id. Operations that can move a z-index (`create`, `update`) hold the write
//! lock across z-index resolution and the reindex pass, so no two widgets
//! share a z-index once the lock is released. The pass locks one record at a
//! time; nothing ever holds two record locks at once.
//!
//! Deleting leaves a gap in the z-order. Remaining widgets are not renumbered.
//!
//! REINDEX RULE
//! ============
//! After the reference record `R` lands on z-index `t`:
//! - Inserted: every other widget with `z >= t` moves up one.
//! - Moved up by `delta`: widgets in `(t - delta, t]` move down one, closing
//!   the slot `R` vacated.
//! - Moved down by `delta`: widgets in `[t, t - delta)` move up one, opening
//!   the slot `R` now holds.
//!
//! Each case is a single sweep against a fixed `(t, delta)`. Widgets other
//! than `R` keep their relative order, and the z-range only grows on insert.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::record::{Widget, WidgetRecord};

// =============================================================================
// TYPES
// =============================================================================

/// Full description of a widget for create and update. Geometry is always
/// replaced wholesale; `z_index: None` means "place on top".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetSpec {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub z_index: Option<i32>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error("widget not found: {0}")]
    NotFound(u64),
}

type WidgetMap = HashMap<u64, Arc<WidgetRecord>>;

/// How the reference record of a reindex pass reached its z-index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Inserted,
    Moved { delta: i64 },
}

/// Owns every widget plus the id counter. Construct one per service and
/// share it by reference.
#[derive(Debug, Default)]
pub struct WidgetStore {
    last_id: AtomicU64,
    widgets: RwLock<WidgetMap>,
}

impl WidgetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Insert a new widget and shift any widget at or above its z-index.
    pub fn create(&self, spec: WidgetSpec) -> Widget {
        let mut widgets = self.write();
        let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        let z_index = spec.z_index.unwrap_or_else(|| next_z_index(&widgets));

        let record = Arc::new(WidgetRecord::new(id, spec.x, spec.y, spec.width, spec.height, z_index));
        widgets.insert(id, Arc::clone(&record));
        let shifted = reindex(&widgets, &record, Placement::Inserted);

        debug!(id, z_index, shifted, "widget created");
        record.snapshot()
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// # Errors
    ///
    /// Returns `NotFound` if no widget has this id.
    pub fn get(&self, id: u64) -> Result<Widget, WidgetError> {
        self.find(id).ok_or(WidgetError::NotFound(id))
    }

    #[must_use]
    pub fn find(&self, id: u64) -> Option<Widget> {
        self.read().get(&id).map(|record| record.snapshot())
    }

    /// Every widget, bottom to top.
    #[must_use]
    pub fn list(&self) -> Vec<Widget> {
        let mut widgets = self
            .read()
            .values()
            .map(|record| record.snapshot())
            .collect::<Vec<_>>();
        widgets.sort_by_key(|widget| (widget.z_index, widget.id));
        widgets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Replace geometry and move the widget to its new z-index.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no widget has this id.
    pub fn update(&self, id: u64, spec: WidgetSpec) -> Result<Widget, WidgetError> {
        let widgets = self.write();
        let record = widgets.get(&id).cloned().ok_or(WidgetError::NotFound(id))?;
        let z_index = spec.z_index.unwrap_or_else(|| next_z_index(&widgets));

        record.set_x(spec.x);
        record.set_y(spec.y);
        record.set_width(spec.width);
        record.set_height(spec.height);

        let previous = record.z_index();
        record.set_z_index(z_index);
        let delta = i64::from(z_index) - i64::from(previous);
        let shifted = reindex(&widgets, &record, Placement::Moved { delta });

        debug!(id, z_index, delta, shifted, "widget updated");
        Ok(record.snapshot())
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Remove a widget. Other z-indexes are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no widget has this id.
    pub fn delete(&self, id: u64) -> Result<Widget, WidgetError> {
        let record = self.write().remove(&id).ok_or(WidgetError::NotFound(id))?;
        debug!(id, "widget deleted");
        Ok(record.snapshot())
    }

    fn read(&self) -> RwLockReadGuard<'_, WidgetMap> {
        self.widgets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, WidgetMap> {
        self.widgets.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Z-ORDER
// =============================================================================

/// One above the current top. An empty store yields `i32::MIN + 1`.
fn next_z_index(widgets: &WidgetMap) -> i32 {
    widgets
        .values()
        .map(|record| record.z_index())
        .max()
        .unwrap_or(i32::MIN)
        .saturating_add(1)
}

/// Shift every record other than `moved` so z-indexes stay unique. Returns
/// the number of records shifted.
fn reindex(widgets: &WidgetMap, moved: &WidgetRecord, placement: Placement) -> usize {
    if placement == (Placement::Moved { delta: 0 }) {
        return 0;
    }

    let target = i64::from(moved.z_index());
    let shift = |z: i64| match placement {
        Placement::Inserted if z >= target => z + 1,
        Placement::Moved { delta } if delta > 0 && z > target - delta && z <= target => z - 1,
        Placement::Moved { delta } if delta < 0 && z >= target && z < target - delta => z + 1,
        _ => z,
    };

    let mut shifted = 0;
    for record in widgets.values() {
        if record.id() == moved.id() {
            continue;
        }
        if record.update_z_index(|z| clamp_z(shift(i64::from(z)))) {
            shifted += 1;
        }
    }
    shifted
}

fn clamp_z(z: i64) -> i32 {
    i32::try_from(z).unwrap_or(if z < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
