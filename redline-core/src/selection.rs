use std::collections::BTreeSet;

/// Identifies the (file, sheet) pair a selection belongs to.
///
/// Files are identified by their index in the session's upload list,
/// not by display name: two uploads may share a name and must still
/// count as different files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetKey {
    pub file_index: usize,
    pub sheet: String,
}

impl SheetKey {
    pub fn new(file_index: usize, sheet: impl Into<String>) -> Self {
        Self {
            file_index,
            sheet: sheet.into(),
        }
    }
}

/// The set of marked row indices for the currently active sheet.
///
/// Row indices are positions in one specific table, so the store is
/// scoped to a single (file, sheet) pair and cleared the instant the
/// active pair changes. Reusing indices against a different table is
/// the stale-selection bug this type exists to prevent.
#[derive(Debug, Default)]
pub struct SelectionStore {
    scope: Option<SheetKey>,
    marked: BTreeSet<usize>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of a row index. Backing a checkbox, so a second
    /// toggle un-marks the row.
    pub fn toggle(&mut self, row: usize) {
        if !self.marked.remove(&row) {
            self.marked.insert(row);
        }
    }

    pub fn is_marked(&self, row: usize) -> bool {
        self.marked.contains(&row)
    }

    /// Clear all marks.
    pub fn reset(&mut self) {
        self.marked.clear();
    }

    /// Point the store at a (file, sheet) pair, clearing all marks if
    /// the pair changed. Must be called on every sheet activation.
    pub fn retarget(&mut self, key: SheetKey) {
        if self.scope.as_ref() != Some(&key) {
            self.marked.clear();
            self.scope = Some(key);
        }
    }

    pub fn scope(&self) -> Option<&SheetKey> {
        self.scope.as_ref()
    }

    /// Marked row indices in ascending order.
    pub fn current(&self) -> Vec<usize> {
        self.marked.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_an_involution() {
        let mut store = SelectionStore::new();
        store.toggle(3);
        store.toggle(1);
        assert_eq!(store.current(), vec![1, 3]);

        store.toggle(3);
        store.toggle(3);
        assert_eq!(store.current(), vec![1, 3]);
    }

    #[test]
    fn test_current_is_ascending() {
        let mut store = SelectionStore::new();
        for row in [9, 2, 7, 0] {
            store.toggle(row);
        }
        assert_eq!(store.current(), vec![0, 2, 7, 9]);
    }

    #[test]
    fn test_retarget_clears_on_sheet_change() {
        let mut store = SelectionStore::new();
        store.retarget(SheetKey::new(0, "Sheet1"));
        store.toggle(0);
        store.toggle(2);

        store.retarget(SheetKey::new(0, "Sheet2"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_retarget_clears_on_file_change() {
        let mut store = SelectionStore::new();
        store.retarget(SheetKey::new(0, "Sheet1"));
        store.toggle(1);

        store.retarget(SheetKey::new(1, "Sheet1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_retarget_same_pair_keeps_marks() {
        let mut store = SelectionStore::new();
        store.retarget(SheetKey::new(0, "Sheet1"));
        store.toggle(4);

        store.retarget(SheetKey::new(0, "Sheet1"));
        assert_eq!(store.current(), vec![4]);
    }

    #[test]
    fn test_reset_clears_marks() {
        let mut store = SelectionStore::new();
        store.toggle(0);
        store.reset();
        assert!(store.is_empty());
    }
}
