//! Row swipe gesture tracking.
//!
//! Horizontal drags on a list row translate the row content, clamped to
//! a short travel, and report the row on release; the translation snaps
//! back instantly, with no settle animation. The synthetic ".." row has
//! a degenerate gesture area and never starts a swipe.

/// Maximum horizontal travel of a swiped row, in points.
pub const MAX_SWIPE_PX: f32 = 35.0;

#[derive(Debug, Default)]
pub struct SwipeTracker {
    row: Option<usize>,
    dx: f32,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to start a swipe on `row`. Returns false (and tracks nothing)
    /// when the row is not swipable.
    pub fn begin(&mut self, row: usize, swipable: bool) -> bool {
        if !swipable {
            return false;
        }
        self.row = Some(row);
        self.dx = 0.0;
        true
    }

    /// Accumulate horizontal drag motion for the active swipe.
    pub fn drag(&mut self, delta_x: f32) {
        if self.row.is_some() {
            self.dx += delta_x;
        }
    }

    /// Clamped translation to apply to `row`'s content this frame.
    pub fn offset(&self, row: usize) -> f32 {
        if self.row == Some(row) {
            self.dx.clamp(-MAX_SWIPE_PX, MAX_SWIPE_PX)
        } else {
            0.0
        }
    }

    pub fn active_row(&self) -> Option<usize> {
        self.row
    }

    /// End the gesture, reporting which row was swiped.
    pub fn release(&mut self) -> Option<usize> {
        self.dx = 0.0;
        self.row.take()
    }

    /// Abort without reporting (listing replaced mid-gesture).
    pub fn cancel(&mut self) {
        self.row = None;
        self.dx = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_is_clamped_both_ways() {
        let mut sw = SwipeTracker::new();
        assert!(sw.begin(3, true));
        sw.drag(200.0);
        assert_eq!(sw.offset(3), MAX_SWIPE_PX);
        sw.drag(-500.0);
        assert_eq!(sw.offset(3), -MAX_SWIPE_PX);
        // Other rows are untouched.
        assert_eq!(sw.offset(2), 0.0);
    }

    #[test]
    fn release_reports_row_and_resets() {
        let mut sw = SwipeTracker::new();
        sw.begin(5, true);
        sw.drag(12.0);
        assert_eq!(sw.release(), Some(5));
        assert_eq!(sw.offset(5), 0.0);
        assert_eq!(sw.release(), None);
    }

    #[test]
    fn unswipable_row_never_starts_a_gesture() {
        let mut sw = SwipeTracker::new();
        assert!(!sw.begin(0, false));
        sw.drag(50.0);
        assert_eq!(sw.offset(0), 0.0);
        assert_eq!(sw.release(), None);
    }
}
