//! Repaint controller for TwinFiles.
//!
//! egui is an immediate-mode GUI: every frame redraws everything. Left
//! alone, eframe only repaints on input, which stalls animations; naive
//! `request_repaint()` every frame burns CPU while the app sits idle.
//!
//! `RepaintController` sits between the app and egui's repaint scheduler:
//!
//! 1. **Input-driven** — user clicked, typed, or scrolled. egui repaints
//!    on its own; nothing to do.
//! 2. **Continuous** — an animation is running (pull settle, thumb fade,
//!    highlight flash). Repaint at the animation interval.
//! 3. **Deadline** — something must happen at a known future instant
//!    (the fast-scroll auto-hide delay). Wake exactly then.
//! 4. **Idle** — schedule nothing; egui sleeps until the next input.
//!
//! Call [`begin_frame`](RepaintController::begin_frame) at the top of
//! `update()` and [`end_frame`](RepaintController::end_frame) at the
//! bottom. Deadlines are re-declared every frame by whoever needs them,
//! so a cancelled timer is simply one that stops being declared.

use std::time::{Duration, Instant};

/// Repaint interval while animations are running (~60 Hz).
const ANIMATION_REPAINT_INTERVAL: Duration = Duration::from_millis(16);

/// Controls when the egui context should request repaints.
pub struct RepaintController {
    /// Whether continuous (animation) repainting is active this frame.
    continuous: bool,
    /// Whether a one-shot repaint has been requested.
    needs_repaint: bool,
    /// Earliest wake deadline declared this frame.
    next_wake: Option<Instant>,
    /// Frame counter (0 = first frame).
    frame: u64,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            continuous: false,
            needs_repaint: false,
            next_wake: None,
            frame: 0,
        }
    }

    /// Enable or disable continuous repainting. Set this while any
    /// animation is in flight and clear it when the last one finishes.
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    /// Request a single repaint on the next opportunity.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Declare that the app must run a frame no later than `deadline`.
    /// Deadlines do not persist across frames; re-declare while pending.
    pub fn wake_at(&mut self, deadline: Instant) {
        self.next_wake = Some(match self.next_wake {
            Some(cur) => cur.min(deadline),
            None => deadline,
        });
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Call at the **start** of your `update()` method.
    pub fn begin_frame(&mut self, _ctx: &egui::Context) {
        // Deadlines are frame-scoped; pending ones get re-declared below.
        self.next_wake = None;
        self.needs_repaint = false;
    }

    /// Call at the **end** of your `update()` method.
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        self.frame += 1;

        if self.continuous {
            ctx.request_repaint_after(ANIMATION_REPAINT_INTERVAL);
        } else if self.needs_repaint {
            ctx.request_repaint();
        } else if let Some(deadline) = self.next_wake {
            let delay = deadline.saturating_duration_since(Instant::now());
            ctx.request_repaint_after(delay);
        }
        // else: idle — egui sleeps until the next input event.
    }
}
