//! Per-pane navigation history: independent back and forward stacks of
//! (path, scroll offset) pairs, with the standard browser invariant that
//! visiting a new directory clears the forward stack.

use std::path::{Path, PathBuf};

/// Where the pane was before a navigation, so back/forward can return
/// to the same directory at the same scroll position.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub path: PathBuf,
    pub scroll_offset: f32,
}

impl HistoryEntry {
    pub fn new(path: impl Into<PathBuf>, scroll_offset: f32) -> Self {
        Self {
            path: path.into(),
            scroll_offset,
        }
    }
}

#[derive(Debug, Default)]
pub struct History {
    back: Vec<HistoryEntry>,
    forward: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a navigation into a new directory: the departed state goes
    /// on the back stack and the forward stack empties.
    pub fn visit(&mut self, departed: HistoryEntry) {
        self.back.push(departed);
        self.forward.clear();
    }

    /// Pop the back stack, parking the current state on the forward
    /// stack. Returns where to go, or `None` if there is no history.
    pub fn go_back(&mut self, current: HistoryEntry) -> Option<HistoryEntry> {
        let target = self.back.pop()?;
        self.forward.push(current);
        Some(target)
    }

    /// Mirror of [`go_back`](Self::go_back).
    pub fn go_forward(&mut self, current: HistoryEntry) -> Option<HistoryEntry> {
        let target = self.forward.pop()?;
        self.back.push(current);
        Some(target)
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// The directory a back navigation would land in, if any.
    pub fn back_top(&self) -> Option<&Path> {
        self.back.last().map(|e| e.path.as_path())
    }

    #[cfg(test)]
    fn sizes(&self) -> (usize, usize) {
        (self.back.len(), self.forward.len())
    }
}
