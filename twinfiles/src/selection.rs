//! Swipe-select state machine.
//!
//! A swipe release on a row selects it and enters selection mode. The
//! first swipe in selection mode records an anchor; the second selects
//! the whole inclusive range between anchor and release row, then clears
//! the anchor. Taps in selection mode toggle single rows; when the last
//! selected row is toggled off, selection mode exits.

use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct SelectionState {
    mode: bool,
    selected: BTreeSet<usize>,
    anchor: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_mode(&self) -> bool {
        self.mode
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Reset everything. Called whenever the listing is replaced.
    pub fn clear(&mut self) {
        self.mode = false;
        self.selected.clear();
        self.anchor = None;
    }

    /// Select every row. Enters selection mode when there are any rows.
    pub fn select_all(&mut self, first: usize, len: usize) {
        if first >= len {
            return;
        }
        self.selected.extend(first..len);
        self.mode = true;
        self.anchor = None;
    }

    /// A swipe gesture was released on `index`.
    pub fn swipe_release(&mut self, index: usize, len: usize) {
        if index >= len {
            return;
        }

        if !self.mode {
            self.selected.insert(index);
            self.mode = true;
            self.anchor = Some(index);
            return;
        }

        match self.anchor {
            None => {
                self.selected.insert(index);
                self.anchor = Some(index);
            }
            Some(anchor) => {
                let (start, end) = (anchor.min(index), anchor.max(index));
                self.selected.extend(start..=end);
                self.anchor = None;
            }
        }
    }

    /// A tap on `index` while in selection mode. No-op outside it.
    pub fn toggle(&mut self, index: usize, len: usize) {
        if !self.mode || index >= len {
            return;
        }
        if self.selected.remove(&index) {
            if self.selected.is_empty() {
                self.mode = false;
                self.anchor = None;
            }
        } else {
            self.selected.insert(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_swipe_enters_mode_and_sets_anchor() {
        let mut s = SelectionState::new();
        assert!(!s.in_mode());
        s.swipe_release(3, 10);
        assert!(s.in_mode());
        assert!(s.is_selected(3));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn second_swipe_selects_inclusive_range_and_clears_anchor() {
        let mut s = SelectionState::new();
        s.swipe_release(2, 10);
        s.swipe_release(6, 10);
        for i in 2..=6 {
            assert!(s.is_selected(i), "row {i} should be selected");
        }
        assert_eq!(s.len(), 5);

        // Anchor is gone: the next swipe starts a fresh anchor, not a range.
        s.swipe_release(9, 10);
        assert_eq!(s.len(), 6);
        assert!(!s.is_selected(8));
    }

    #[test]
    fn range_selection_is_symmetric() {
        let mut forward = SelectionState::new();
        forward.swipe_release(2, 10);
        forward.swipe_release(7, 10);

        let mut reverse = SelectionState::new();
        reverse.swipe_release(7, 10);
        reverse.swipe_release(2, 10);

        let a: Vec<usize> = forward.indices().collect();
        let b: Vec<usize> = reverse.indices().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn toggle_off_last_row_exits_mode() {
        let mut s = SelectionState::new();
        s.swipe_release(4, 10);
        s.toggle(5, 10);
        assert_eq!(s.len(), 2);
        s.toggle(5, 10);
        s.toggle(4, 10);
        assert!(s.is_empty());
        assert!(!s.in_mode());
    }

    #[test]
    fn toggle_outside_mode_is_ignored() {
        let mut s = SelectionState::new();
        s.toggle(1, 10);
        assert!(s.is_empty());
        assert!(!s.in_mode());
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut s = SelectionState::new();
        s.swipe_release(10, 10);
        assert!(s.is_empty());
        assert!(!s.in_mode());
    }

    #[test]
    fn select_all_spares_nothing_in_range() {
        let mut s = SelectionState::new();
        s.select_all(1, 5);
        assert!(s.in_mode());
        assert_eq!(s.len(), 4);
        assert!(!s.is_selected(0));
    }

    #[test]
    fn clear_resets_mode_and_anchor() {
        let mut s = SelectionState::new();
        s.swipe_release(2, 10);
        s.clear();
        assert!(!s.in_mode());
        assert!(s.is_empty());
        // A new swipe behaves like the very first one again.
        s.swipe_release(5, 10);
        assert_eq!(s.len(), 1);
    }
}
