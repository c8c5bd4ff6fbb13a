//! Pull-to-refresh gesture and its droplet header.
//!
//! Only armed while the list sits at scroll top. Downward drag is damped
//! by a resistance factor and clamped to a maximum; a droplet drawn with
//! a quadratic bezier travels across the pane width as the pull deepens.
//! Refresh triggers when the pull reaches the maximum or the droplet
//! reaches its far limit, whichever comes first, and the trigger latches
//! until `finish_refresh`. Release without a trigger settles back with a
//! displacement-proportional, bounded duration.

use twincore::anim::Tween;

/// Damping applied to raw drag distance.
pub const PULL_RESISTANCE: f32 = 0.3;
/// Maximum damped pull, in points (about three row heights).
pub const MAX_PULL_DISTANCE: f32 = 240.0;
/// Settle duration after a trigger, seconds.
const REFRESH_SETTLE_SECS: f32 = 0.3;
/// Release-without-trigger settle bounds, seconds.
const RELEASE_SETTLE_MIN_SECS: f32 = 0.25;
const RELEASE_SETTLE_MAX_SECS: f32 = 0.45;
/// Decelerate strength for the release settle.
const RELEASE_SETTLE_FACTOR: f32 = 2.0;

/// Droplet control-point travel limits (fractions of pane width).
const NEAR_LIMIT: f32 = 0.10;
const FAR_LIMIT: f32 = 0.90;
const FAR_LIMIT_EPSILON: f32 = 0.01;

/// Droplet bulge base cap, in points.
const MAX_BULGE_HEIGHT: f32 = 95.0;
/// Bulge scale at mid-travel.
const PEAK_BOOST: f32 = 2.2;

/// Which way the droplet travels. The left pane sweeps left-to-right,
/// the right pane right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullDirection {
    LeftToRight,
    RightToLeft,
}

/// What a drag step changed, for the caller to react to.
#[derive(Debug, Clone, Copy, Default)]
pub struct PullUpdate {
    /// This drag step started the pull (height left zero before it).
    pub started: bool,
    /// This drag step fired the refresh.
    pub triggered: bool,
}

#[derive(Debug)]
pub struct PullRefresh {
    direction: PullDirection,
    raw_drag: f32,
    pull: f32,
    refreshing: bool,
    triggered: bool,
    settle: Option<Tween>,
}

impl PullRefresh {
    pub fn new(direction: PullDirection) -> Self {
        Self {
            direction,
            raw_drag: 0.0,
            pull: 0.0,
            refreshing: false,
            triggered: false,
            settle: None,
        }
    }

    pub fn direction(&self) -> PullDirection {
        self.direction
    }

    /// Current downward content displacement, in points.
    pub fn offset(&self) -> f32 {
        match &self.settle {
            Some(tween) => tween.value(),
            None => self.pull,
        }
    }

    /// Droplet height for the header, zero once a refresh triggered.
    pub fn header_height(&self) -> f32 {
        if self.triggered {
            0.0
        } else {
            self.pull
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Droplet control-point position as a fraction of pane width.
    /// Travel easing is quadratic: slow start, fast finish.
    pub fn control_ratio(&self) -> f32 {
        let progress = (self.pull / MAX_PULL_DISTANCE).clamp(0.0, 1.0);
        let eased = progress * progress;
        match self.direction {
            PullDirection::LeftToRight => NEAR_LIMIT + (FAR_LIMIT - NEAR_LIMIT) * eased,
            PullDirection::RightToLeft => FAR_LIMIT - (FAR_LIMIT - NEAR_LIMIT) * eased,
        }
    }

    fn at_far_limit(&self) -> bool {
        let ratio = self.control_ratio();
        match self.direction {
            PullDirection::LeftToRight => ratio >= FAR_LIMIT - FAR_LIMIT_EPSILON,
            PullDirection::RightToLeft => ratio <= NEAR_LIMIT + FAR_LIMIT_EPSILON,
        }
    }

    /// Feed raw vertical drag motion (positive = downward). Ignored
    /// while refreshing or settling.
    pub fn drag(&mut self, raw_dy: f32) -> PullUpdate {
        let mut update = PullUpdate::default();
        if self.refreshing || self.settle.is_some() {
            return update;
        }

        let was_zero = self.pull <= 0.0;
        self.raw_drag = (self.raw_drag + raw_dy).max(0.0);
        self.pull = (self.raw_drag * PULL_RESISTANCE).min(MAX_PULL_DISTANCE);

        if self.pull > 0.0 && was_zero {
            update.started = true;
        }

        if !self.triggered && (self.pull >= MAX_PULL_DISTANCE || self.at_far_limit()) {
            self.triggered = true;
            self.refreshing = true;
            // Content re-enters from the full pull distance.
            self.settle = Some(Tween::new(MAX_PULL_DISTANCE, 0.0, REFRESH_SETTLE_SECS, 1.0));
            update.triggered = true;
        }
        update
    }

    /// Pointer released. Without a trigger, settle back to rest with a
    /// duration proportional to the displacement, bounded both ways.
    pub fn release(&mut self) {
        self.raw_drag = 0.0;
        if self.triggered || self.settle.is_some() || self.pull <= 0.0 {
            return;
        }
        let duration = (self.pull / MAX_PULL_DISTANCE * RELEASE_SETTLE_MAX_SECS)
            .max(RELEASE_SETTLE_MIN_SECS);
        self.settle = Some(Tween::new(self.pull, 0.0, duration, RELEASE_SETTLE_FACTOR));
    }

    /// The refresh work completed; unlatch for the next gesture. Any
    /// running settle animation keeps playing out.
    pub fn finish_refresh(&mut self) {
        self.refreshing = false;
        self.triggered = false;
        self.pull = 0.0;
        self.raw_drag = 0.0;
    }

    /// Advance the settle animation. Returns true while anything moves.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let Some(tween) = &mut self.settle {
            tween.update(dt);
            if tween.finished() {
                self.settle = None;
                self.pull = 0.0;
            }
            return true;
        }
        self.pull > 0.0
    }
}

/// Bulge scale factor over travel: rises 1.4 → 2.2 to mid-travel, then
/// decays to zero so the droplet vanishes at the far end.
fn height_factor(eased_progress: f32) -> f32 {
    if eased_progress <= 0.5 {
        let t = eased_progress / 0.5;
        1.4 + (PEAK_BOOST - 1.4) * t
    } else {
        let t = ((eased_progress - 0.5) / 0.5).min(1.0);
        PEAK_BOOST * (1.0 - t)
    }
}

/// Paint the droplet header across the top of `rect`.
pub fn draw_header(painter: &egui::Painter, rect: egui::Rect, pull: &PullRefresh, color: egui::Color32) {
    let pull_height = pull.header_height();
    if pull_height <= 0.0 {
        return;
    }
    let width = rect.width();
    let base_bulge = pull_height.min(MAX_BULGE_HEIGHT);
    let eased = {
        let p = (pull_height / MAX_PULL_DISTANCE).clamp(0.0, 1.0);
        p * p
    };
    let bulge = base_bulge * height_factor(eased);
    if bulge <= 0.0 {
        return;
    }

    let control = egui::pos2(
        rect.left() + width * pull.control_ratio(),
        rect.top() + bulge,
    );
    let start = rect.left_top();
    let end = rect.right_top();

    // Sample the quadratic bezier into a filled polygon.
    let mut points = Vec::with_capacity(34);
    points.push(start);
    for i in 1..=32 {
        let t = i as f32 / 32.0;
        let mt = 1.0 - t;
        let x = mt * mt * start.x + 2.0 * mt * t * control.x + t * t * end.x;
        let y = mt * mt * start.y + 2.0 * mt * t * control.y + t * t * end.y;
        points.push(egui::pos2(x, y));
    }
    painter.add(egui::Shape::convex_polygon(points, color, egui::Stroke::NONE));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_is_damped_and_clamped() {
        let mut pr = PullRefresh::new(PullDirection::LeftToRight);
        pr.drag(100.0);
        assert!((pr.offset() - 30.0).abs() < 1e-4);
        // Enough raw motion to exceed the cap.
        pr.drag(10_000.0);
        assert!(pr.offset() <= MAX_PULL_DISTANCE);
    }

    #[test]
    fn upward_motion_never_goes_negative() {
        let mut pr = PullRefresh::new(PullDirection::LeftToRight);
        pr.drag(-50.0);
        assert_eq!(pr.offset(), 0.0);
        pr.drag(20.0);
        pr.drag(-200.0);
        assert_eq!(pr.header_height(), 0.0);
    }

    #[test]
    fn reaching_max_triggers_exactly_once() {
        let mut pr = PullRefresh::new(PullDirection::LeftToRight);
        // Exactly the max after damping.
        let update = pr.drag(MAX_PULL_DISTANCE / PULL_RESISTANCE);
        assert!(update.triggered);
        assert!(pr.is_refreshing());

        // Dragging past the point before release must not re-trigger.
        let update = pr.drag(500.0);
        assert!(!update.triggered);
        pr.release();
        let update = pr.drag(500.0);
        assert!(!update.triggered);
    }

    #[test]
    fn finish_refresh_unlatches() {
        let mut pr = PullRefresh::new(PullDirection::RightToLeft);
        assert!(pr.drag(10_000.0).triggered);
        pr.finish_refresh();
        // Play out the settle before the next gesture.
        while pr.tick(0.1) {}
        assert!(!pr.is_refreshing());
        assert!(pr.drag(10_000.0).triggered);
    }

    #[test]
    fn first_movement_reports_started() {
        let mut pr = PullRefresh::new(PullDirection::LeftToRight);
        assert!(pr.drag(5.0).started);
        assert!(!pr.drag(5.0).started);
    }

    #[test]
    fn control_ratio_travels_with_quadratic_easing() {
        let mut pr = PullRefresh::new(PullDirection::LeftToRight);
        assert!((pr.control_ratio() - NEAR_LIMIT).abs() < 1e-5);
        pr.drag(MAX_PULL_DISTANCE / PULL_RESISTANCE / 2.0);
        // Half pull eases to a quarter of the travel.
        let expected = NEAR_LIMIT + (FAR_LIMIT - NEAR_LIMIT) * 0.25;
        assert!((pr.control_ratio() - expected).abs() < 1e-3);

        let mut rtl = PullRefresh::new(PullDirection::RightToLeft);
        assert!((rtl.control_ratio() - FAR_LIMIT).abs() < 1e-5);
        rtl.drag(10_000.0);
        assert!(rtl.control_ratio() <= NEAR_LIMIT + FAR_LIMIT_EPSILON);
    }

    #[test]
    fn release_settle_duration_is_proportional_and_bounded() {
        // Small pull: clamps to the minimum duration; the settle should
        // therefore finish within ~0.25s of ticking.
        let mut pr = PullRefresh::new(PullDirection::LeftToRight);
        pr.drag(50.0);
        pr.release();
        assert!(pr.is_settling());
        let mut elapsed = 0.0;
        while pr.is_settling() {
            pr.tick(0.05);
            elapsed += 0.05;
            assert!(elapsed < 1.0, "settle should finish quickly");
        }
        assert_eq!(pr.offset(), 0.0);
    }

    #[test]
    fn height_factor_peaks_mid_travel_and_vanishes_at_end() {
        assert!((height_factor(0.0) - 1.4).abs() < 1e-5);
        assert!((height_factor(0.5) - PEAK_BOOST).abs() < 1e-5);
        assert!(height_factor(1.0).abs() < 1e-5);
    }
}
