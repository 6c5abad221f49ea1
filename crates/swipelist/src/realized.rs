#![forbid(unsafe_code)]

//! Lazily rebuilt lookup of realized rows.
//!
//! The host recycles views continuously, so identity → view lookups are only
//! valid until the next layout, scroll, or dataset change. The index caches
//! one snapshot of [`ListHost::realized_rows`] and is invalidated by the
//! coordinator whenever any of those happen.

use ahash::AHashMap;
use swipelist_core::geometry::Point;

use crate::host::{ListHost, RealizedRow, RowId};

/// Snapshot of the realized rows keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct RealizedIndex {
    rows: Vec<RealizedRow>,
    by_id: AHashMap<RowId, usize>,
    valid: bool,
}

impl RealizedIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the snapshot; the next lookup rebuilds it.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    fn ensure<H: ListHost + ?Sized>(&mut self, host: &H) {
        if self.valid {
            return;
        }
        self.rows = host.realized_rows();
        self.by_id.clear();
        for (slot, row) in self.rows.iter().enumerate() {
            self.by_id.entry(row.id).or_insert(slot);
        }
        self.valid = true;
    }

    /// The realized row showing `id`, if any.
    pub fn get<H: ListHost + ?Sized>(&mut self, host: &H, id: RowId) -> Option<RealizedRow> {
        self.ensure(host);
        self.by_id.get(&id).map(|&slot| self.rows[slot])
    }

    /// The realized row at `position`, if any.
    pub fn at_position<H: ListHost + ?Sized>(
        &mut self,
        host: &H,
        position: usize,
    ) -> Option<RealizedRow> {
        self.ensure(host);
        self.rows.iter().find(|row| row.position == position).copied()
    }

    /// First realized row, in realized order, whose bounds contain `point`.
    pub fn hit<H: ListHost + ?Sized>(&mut self, host: &H, point: Point) -> Option<RealizedRow> {
        self.ensure(host);
        self.rows.iter().find(|row| row.bounds.contains(point)).copied()
    }
}
