#![forbid(unsafe_code)]

//! Per-position visual state: open, opened-right, checked.
//!
//! # Invariants
//!
//! 1. The three sequences always have equal length.
//! 2. Length never decreases.
//! 3. Reads past the end return `false`.

/// Parallel open/opened-right/checked flags, one entry per row position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStateStore {
    open: Vec<bool>,
    opened_right: Vec<bool>,
    checked: Vec<bool>,
}

impl RowStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Grow every sequence to at least `count + 1` entries.
    pub fn ensure_capacity(&mut self, count: usize) {
        let target = count.saturating_add(1);
        if self.open.len() < target {
            self.open.resize(target, false);
            self.opened_right.resize(target, false);
            self.checked.resize(target, false);
        }
    }

    #[must_use]
    pub fn is_open(&self, position: usize) -> bool {
        self.open.get(position).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_opened_right(&self, position: usize) -> bool {
        self.opened_right.get(position).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_checked(&self, position: usize) -> bool {
        self.checked.get(position).copied().unwrap_or(false)
    }

    /// Record whether a row is open and on which side.
    pub fn set_open(&mut self, position: usize, open: bool, right: bool) {
        self.ensure_capacity(position);
        self.open[position] = open;
        self.opened_right[position] = right;
    }

    pub fn set_checked(&mut self, position: usize, checked: bool) {
        self.ensure_capacity(position);
        self.checked[position] = checked;
    }

    /// Exchange every flag of two positions.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.ensure_capacity(a.max(b));
        self.open.swap(a, b);
        self.opened_right.swap(a, b);
        self.checked.swap(a, b);
    }

    #[must_use]
    pub fn count_checked(&self) -> usize {
        self.checked.iter().filter(|&&c| c).count()
    }

    /// Checked positions, ascending.
    #[must_use]
    pub fn checked_positions(&self) -> Vec<usize> {
        positions_where(&self.checked)
    }

    /// Open positions, ascending.
    #[must_use]
    pub fn open_positions(&self) -> Vec<usize> {
        positions_where(&self.open)
    }
}

fn positions_where(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &set)| set.then_some(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_capacity_grows_to_count_plus_one() {
        let mut store = RowStateStore::new();
        store.ensure_capacity(4);
        assert_eq!(store.len(), 5);
        store.ensure_capacity(2);
        assert_eq!(store.len(), 5, "never shrinks");
    }

    #[test]
    fn out_of_range_reads_are_false() {
        let store = RowStateStore::new();
        assert!(!store.is_open(100));
        assert!(!store.is_opened_right(100));
        assert!(!store.is_checked(100));
    }

    #[test]
    fn writes_grow_on_demand() {
        let mut store = RowStateStore::new();
        store.set_open(7, true, true);
        assert!(store.len() >= 8);
        assert!(store.is_open(7));
        assert!(store.is_opened_right(7));
        store.set_checked(12, true);
        assert!(store.is_checked(12));
        assert_eq!(store.count_checked(), 1);
    }

    #[test]
    fn swap_exchanges_all_flags() {
        let mut store = RowStateStore::new();
        store.set_open(1, true, false);
        store.set_checked(1, true);
        store.set_open(3, true, true);
        store.swap(1, 3);
        assert!(store.is_open(1) && store.is_opened_right(1) && !store.is_checked(1));
        assert!(store.is_open(3) && !store.is_opened_right(3) && store.is_checked(3));
    }

    #[test]
    fn position_queries_ascend() {
        let mut store = RowStateStore::new();
        store.set_checked(4, true);
        store.set_checked(0, true);
        store.set_open(2, true, false);
        assert_eq!(store.checked_positions(), vec![0, 4]);
        assert_eq!(store.open_positions(), vec![2]);
    }
}
