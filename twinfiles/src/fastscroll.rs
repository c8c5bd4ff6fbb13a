//! Fast-scroll thumb overlay.
//!
//! The thumb only appears on long listings (over a count threshold) with
//! scrollable content. Its geometry is derived every frame from the
//! scroll range/extent/offset; dragging it maps pointer Y back through
//! the inverse mapping to a target offset. After 1.5 s without activity
//! it slides right and fades out over 300 ms; any scroll, touch, or drag
//! cancels the hide and restores full opacity.

use std::time::{Duration, Instant};

use twincore::anim::Tween;
use twincore::theme::PaneColors;

pub const THUMB_WIDTH: f32 = 8.0;
pub const MIN_THUMB_HEIGHT: f32 = 34.0;
pub const MAX_THUMB_HEIGHT: f32 = 48.0;
/// Listings at or below this entry count never show the thumb.
pub const ITEM_COUNT_THRESHOLD: usize = 45;
/// Extra hit-test slack around the thumb, in points.
pub const TOUCH_EXTENSION: f32 = 6.0;

const HIDE_DELAY: Duration = Duration::from_millis(1500);
const HIDE_DURATION_SECS: f32 = 0.3;
/// Drag targets closer than this to the last one are dropped.
const DRAG_DEDUPE_PX: f32 = 5.0;
/// Drag targets at or past this fraction of max scroll snap to the end.
const END_SNAP_FRACTION: f32 = 0.95;

/// Thumb geometry within a track of height `track`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbMetrics {
    pub top: f32,
    pub height: f32,
}

/// Proportional thumb height, clamped to the configured band and capped
/// at 40% of the track.
pub fn thumb_height(track: f32, extent: f32, range: f32) -> f32 {
    (extent / range * track)
        .max(MIN_THUMB_HEIGHT)
        .min(MAX_THUMB_HEIGHT)
        .min(track * 0.4)
}

/// Thumb geometry for the current scroll position.
pub fn thumb_metrics(track: f32, extent: f32, range: f32, offset: f32) -> ThumbMetrics {
    let height = thumb_height(track, extent, range);
    let max_scroll = (range - extent).max(f32::EPSILON);
    let top = (offset / max_scroll).clamp(0.0, 1.0) * (track - height);
    ThumbMetrics { top, height }
}

/// Whether the thumb may appear at all for this listing.
pub fn should_show(item_count: usize, range: f32, extent: f32) -> bool {
    range > extent && item_count > ITEM_COUNT_THRESHOLD
}

/// Map a drag Y coordinate (relative to the track top) to a target
/// scroll offset. Targets in the last 5% snap to the true end so the
/// thumb cannot stall short of the bottom.
pub fn drag_target_offset(y: f32, track: f32, extent: f32, range: f32) -> f32 {
    let height = thumb_height(track, extent, range);
    let min_y = height / 2.0;
    let max_y = (track - height / 2.0).max(min_y + f32::EPSILON);
    let fraction = (y.clamp(min_y, max_y) - min_y) / (max_y - min_y);

    let max_scroll = (range - extent).max(0.0);
    let target = fraction * max_scroll;
    if target >= max_scroll * END_SNAP_FRACTION {
        max_scroll
    } else {
        target
    }
}

/// Visibility/animation state driving the overlay.
#[derive(Debug, Default)]
pub struct FastScroll {
    visible: bool,
    dragging: bool,
    hide_tween: Option<Tween>,
    hide_deadline: Option<Instant>,
    last_drag_target: Option<f32>,
}

/// What the painter needs this frame.
#[derive(Debug, Clone, Copy)]
pub struct ThumbPaint {
    pub alpha: f32,
    /// Rightward slide while hiding, in points.
    pub x_slide: f32,
    pub dragging: bool,
}

impl FastScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Deadline for the pending auto-hide, for repaint scheduling.
    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_deadline
    }

    pub fn is_animating(&self) -> bool {
        self.hide_tween.is_some()
    }

    /// Drop all visibility when the listing stops qualifying.
    pub fn sync(&mut self, can_show: bool) {
        if !can_show {
            self.visible = false;
            self.dragging = false;
            self.hide_tween = None;
            self.hide_deadline = None;
            self.last_drag_target = None;
        }
    }

    fn reveal(&mut self, now: Instant) {
        self.visible = true;
        self.hide_tween = None;
        self.hide_deadline = Some(now + HIDE_DELAY);
    }

    /// The list scrolled (any source). Shows the thumb and re-arms the
    /// hide timer.
    pub fn on_scrolled(&mut self, can_show: bool, now: Instant) {
        if can_show && !self.dragging {
            self.reveal(now);
        }
    }

    /// Pointer activity over the list area.
    pub fn on_touch(&mut self, can_show: bool, now: Instant) {
        if can_show {
            self.reveal(now);
        }
    }

    pub fn begin_drag(&mut self, now: Instant) {
        self.dragging = true;
        self.visible = true;
        self.hide_tween = None;
        self.hide_deadline = None;
        self.last_drag_target = None;
        let _ = now;
    }

    /// Feed a drag position; returns the deduplicated target offset to
    /// scroll to, if it moved far enough from the last one.
    pub fn drag_to(&mut self, y: f32, track: f32, extent: f32, range: f32) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        let target = drag_target_offset(y, track, extent, range);
        match self.last_drag_target {
            Some(last) if (target - last).abs() <= DRAG_DEDUPE_PX => None,
            _ => {
                self.last_drag_target = Some(target);
                Some(target)
            }
        }
    }

    pub fn end_drag(&mut self, now: Instant) {
        self.dragging = false;
        self.last_drag_target = None;
        self.hide_deadline = Some(now + HIDE_DELAY);
    }

    /// Advance timers/animations. Returns the paint state, or `None`
    /// when nothing should be drawn.
    pub fn tick(&mut self, now: Instant, dt: f32) -> Option<ThumbPaint> {
        if let Some(deadline) = self.hide_deadline {
            if now >= deadline && self.visible && !self.dragging && self.hide_tween.is_none() {
                self.hide_deadline = None;
                self.hide_tween = Some(Tween::new(0.0, 1.0, HIDE_DURATION_SECS, 1.0));
            }
        }

        if let Some(tween) = &mut self.hide_tween {
            let progress = tween.update(dt);
            if tween.finished() {
                self.hide_tween = None;
                self.visible = false;
                return None;
            }
            return Some(ThumbPaint {
                alpha: 1.0 - progress,
                x_slide: THUMB_WIDTH * 1.5 * progress,
                dragging: false,
            });
        }

        if self.visible {
            Some(ThumbPaint {
                alpha: 1.0,
                x_slide: 0.0,
                dragging: self.dragging,
            })
        } else {
            None
        }
    }
}

/// Draw the thumb along the right edge of `track_rect`.
pub fn draw_thumb(
    painter: &egui::Painter,
    track_rect: egui::Rect,
    metrics: ThumbMetrics,
    paint: ThumbPaint,
) {
    let color = if paint.dragging {
        PaneColors::ACCENT
    } else {
        PaneColors::THUMB_IDLE
    };
    let left = track_rect.right() - THUMB_WIDTH + paint.x_slide;
    let rect = egui::Rect::from_min_size(
        egui::pos2(left, track_rect.top() + metrics.top),
        egui::vec2(THUMB_WIDTH, metrics.height),
    );
    painter.rect_filled(rect, 0.0, color.gamma_multiply(paint.alpha));
}

/// Thumb hit area (with touch slack) in screen coordinates.
pub fn thumb_hit_rect(track_rect: egui::Rect, metrics: ThumbMetrics) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(
            track_rect.right() - THUMB_WIDTH - TOUCH_EXTENSION,
            track_rect.top() + metrics.top - TOUCH_EXTENSION,
        ),
        egui::pos2(
            track_rect.right() + TOUCH_EXTENSION,
            track_rect.top() + metrics.top + metrics.height + TOUCH_EXTENSION,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_height_stays_in_band_and_track_cap() {
        // Whatever the content length, the result sits in
        // [min, max] ∩ [0, 0.4 * track].
        for range in [600.0, 1_000.0, 10_000.0, 1_000_000.0] {
            for track in [80.0, 200.0, 600.0, 2_000.0] {
                let h = thumb_height(track, 500.0, range);
                assert!(h <= MAX_THUMB_HEIGHT);
                assert!(h <= track * 0.4);
                assert!(h >= MIN_THUMB_HEIGHT.min(track * 0.4));
            }
        }
    }

    #[test]
    fn short_track_caps_below_min_height() {
        // 40% of an 80pt track is 32pt, under the 34pt minimum.
        let h = thumb_height(80.0, 500.0, 10_000.0);
        assert_eq!(h, 32.0);
    }

    #[test]
    fn visibility_threshold_is_45_items() {
        // 50 scrollable entries: visible. 10 entries: never.
        assert!(should_show(50, 2200.0, 500.0));
        assert!(!should_show(10, 2200.0, 500.0));
        // At the threshold exactly: still hidden.
        assert!(!should_show(45, 2200.0, 500.0));
        // Long listing that happens to fit the viewport: hidden.
        assert!(!should_show(50, 400.0, 500.0));
    }

    #[test]
    fn thumb_spans_track_ends() {
        let track = 600.0;
        let extent = 500.0;
        let range = 5_000.0;
        let at_top = thumb_metrics(track, extent, range, 0.0);
        assert_eq!(at_top.top, 0.0);
        let at_end = thumb_metrics(track, extent, range, range - extent);
        assert!((at_end.top + at_end.height - track).abs() < 0.5);
    }

    #[test]
    fn drag_near_bottom_snaps_to_true_end() {
        let track = 600.0;
        let extent = 500.0;
        let range = 5_000.0;
        let max_scroll = range - extent;
        // Just past 95% of the way down.
        let y = track * 0.97;
        assert_eq!(drag_target_offset(y, track, extent, range), max_scroll);
        // Mid-track maps linearly, not snapped.
        let mid = drag_target_offset(track / 2.0, track, extent, range);
        assert!((mid - max_scroll / 2.0).abs() < max_scroll * 0.02);
    }

    #[test]
    fn drag_targets_are_deduplicated() {
        let mut fs = FastScroll::new();
        let now = Instant::now();
        fs.begin_drag(now);
        let first = fs.drag_to(100.0, 600.0, 500.0, 5_000.0);
        assert!(first.is_some());
        // A hair's movement maps to well under 5px of scroll only when
        // ranges are small; use identical input to be exact.
        let repeat = fs.drag_to(100.0, 600.0, 500.0, 5_000.0);
        assert!(repeat.is_none());
        let far = fs.drag_to(160.0, 600.0, 500.0, 5_000.0);
        assert!(far.is_some());
    }

    #[test]
    fn hide_fires_after_delay_and_activity_cancels_it() {
        let mut fs = FastScroll::new();
        let t0 = Instant::now();
        fs.on_scrolled(true, t0);
        assert!(fs.is_visible());

        // Before the deadline: fully opaque.
        let paint = fs.tick(t0 + Duration::from_millis(100), 0.016);
        assert_eq!(paint.map(|p| p.alpha), Some(1.0));

        // New activity re-arms the timer.
        fs.on_touch(true, t0 + Duration::from_millis(1_000));
        let paint = fs.tick(t0 + Duration::from_millis(1_600), 0.016);
        assert_eq!(paint.map(|p| p.alpha), Some(1.0));

        // Past the re-armed deadline the fade starts and finishes.
        let late = t0 + Duration::from_millis(2_600);
        assert!(fs.tick(late, 0.016).is_some());
        assert!(fs.is_animating());
        assert!(fs.tick(late, 1.0).is_none());
        assert!(!fs.is_visible());
    }

    #[test]
    fn drag_blocks_the_hide_timer() {
        let mut fs = FastScroll::new();
        let t0 = Instant::now();
        fs.on_scrolled(true, t0);
        fs.begin_drag(t0 + Duration::from_millis(10));
        // Way past any deadline, still visible while dragging.
        let paint = fs.tick(t0 + Duration::from_secs(10), 0.016);
        assert!(matches!(paint, Some(p) if p.dragging && p.alpha == 1.0));
        fs.end_drag(t0 + Duration::from_secs(10));
        assert!(fs.hide_deadline().is_some());
    }

    #[test]
    fn sync_hides_when_listing_stops_qualifying() {
        let mut fs = FastScroll::new();
        let now = Instant::now();
        fs.on_scrolled(true, now);
        fs.sync(false);
        assert!(!fs.is_visible());
        assert!(fs.tick(now, 0.016).is_none());
    }
}
