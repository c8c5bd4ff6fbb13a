//! One file-listing pane: rows, gestures, navigation, overlays.
//!
//! Everything stateful about a pane lives here; the app owns two of
//! these in an array and routes the events they emit. A single pointer
//! gesture on the list is classified once by its dominant axis:
//! horizontal drags drive swipe-select, vertical drags drive either the
//! scroll position or, at scroll top, the pull-to-refresh header.

use std::path::{Path, PathBuf};
use std::time::Instant;

use egui::scroll_area::ScrollBarVisibility;
use egui::{Rect, ScrollArea, Sense, Ui};

use twincore::theme::PaneColors;

use crate::entry::{self, CreateKind, Entry, FsError};
use crate::fastscroll::{self, FastScroll};
use crate::history::{History, HistoryEntry};
use crate::pullrefresh::{self, PullDirection, PullRefresh};
use crate::selection::SelectionState;
use crate::swipe::SwipeTracker;
use crate::{badge, pathutil};

pub const ROW_HEIGHT: f32 = 44.0;
/// Accumulated pointer travel before a drag commits to an axis.
const AXIS_LOCK_PX: f32 = 8.0;
/// Row highlight flash after a history jump, seconds.
const HIGHLIGHT_SECS: f32 = 0.3;
/// Names longer than this are shortened with an ellipsis.
const MAX_NAME_CHARS: usize = 30;

/// What a pane wants the app to do, emitted from `show`.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneEvent {
    /// Pointer interaction landed in this pane; it becomes the active one.
    Activated,
    OpenDir(PathBuf),
    OpenFile(PathBuf),
    /// The synthetic ".." row was tapped.
    ParentActivated,
    /// Pull gesture latched; the app relists and finishes the refresh.
    RefreshTriggered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureAxis {
    Horizontal,
    Vertical,
}

/// In-flight pointer gesture, before and after axis lock.
#[derive(Debug)]
struct Gesture {
    row: usize,
    accumulated: egui::Vec2,
    axis: Option<GestureAxis>,
}

pub struct Pane {
    pub path: PathBuf,
    entries: Vec<Entry>,
    pub folders: usize,
    pub files: usize,

    pub selection: SelectionState,
    swipe: SwipeTracker,
    history: History,
    fast: FastScroll,
    pull: PullRefresh,

    scroll_offset: f32,
    scroll_to: Option<f32>,
    highlight: Option<(usize, f32)>,
    gesture: Option<Gesture>,
}

impl Pane {
    pub fn new(path: PathBuf, direction: PullDirection) -> Self {
        Self {
            path,
            entries: Vec::new(),
            folders: 0,
            files: 0,
            selection: SelectionState::new(),
            swipe: SwipeTracker::new(),
            history: History::new(),
            fast: FastScroll::new(),
            pull: PullRefresh::new(direction),
            scroll_offset: 0.0,
            scroll_to: None,
            highlight: None,
            gesture: None,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Re-read the current directory, keeping scroll and history.
    pub fn relist(&mut self, show_hidden: bool) -> Result<(), FsError> {
        let listing = entry::list_dir(&self.path, show_hidden)?;
        self.entries = listing.entries;
        badge::annotate(&mut self.entries);
        self.folders = listing.folders;
        self.files = listing.files;
        self.selection.clear();
        self.swipe.cancel();
        self.highlight = None;
        Ok(())
    }

    /// Navigate into a subdirectory, recording where we came from.
    pub fn enter_dir(&mut self, target: PathBuf, show_hidden: bool) -> Result<(), FsError> {
        let departed = HistoryEntry::new(self.path.clone(), self.scroll_offset);
        let previous = std::mem::replace(&mut self.path, target);
        if let Err(e) = self.relist(show_hidden) {
            self.path = previous;
            return Err(e);
        }
        self.history.visit(departed);
        self.scroll_to = Some(0.0);
        log::info!("entered {}", self.path.display());
        Ok(())
    }

    /// Go up one level. When the back stack already points at the
    /// parent this is a plain back navigation, so forward survives.
    pub fn activate_parent(&mut self, show_hidden: bool) -> Result<(), FsError> {
        let Some(parent) = self.path.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        if self.history.back_top() == Some(&parent) {
            self.go_back(show_hidden);
            return Ok(());
        }
        self.enter_dir(parent, show_hidden)
    }

    pub fn go_back(&mut self, show_hidden: bool) {
        let current = HistoryEntry::new(self.path.clone(), self.scroll_offset);
        if let Some(target) = self.history.go_back(current.clone()) {
            self.jump_to(target, &current.path, show_hidden);
        }
    }

    pub fn go_forward(&mut self, show_hidden: bool) {
        let current = HistoryEntry::new(self.path.clone(), self.scroll_offset);
        if let Some(target) = self.history.go_forward(current.clone()) {
            self.jump_to(target, &current.path, show_hidden);
        }
    }

    fn jump_to(&mut self, target: HistoryEntry, departed: &Path, show_hidden: bool) {
        self.path = target.path;
        if let Err(e) = self.relist(show_hidden) {
            log::warn!("history target unreadable: {e}");
        }
        self.scroll_to = Some(target.scroll_offset.max(0.0));
        // Flash the row we navigated away from, when it is in view of
        // the landing directory.
        self.highlight = self
            .entries
            .iter()
            .position(|e| !e.is_parent && e.path == departed)
            .map(|index| (index, HIGHLIGHT_SECS));
    }

    /// Jump straight to an absolute path (path bar dialog).
    pub fn jump_to_path(&mut self, raw: &str, show_hidden: bool) -> Result<(), FsError> {
        let target = pathutil::resolve(raw);
        if target == self.path {
            return Ok(());
        }
        self.enter_dir(target, show_hidden)
    }

    /// Create an entry in this directory, then relist, mark it, and
    /// scroll it into view.
    pub fn create(&mut self, name: &str, kind: CreateKind, show_hidden: bool) -> Result<(), FsError> {
        entry::create_entry(&self.path, name, kind)?;
        self.relist(show_hidden)?;
        if let Some(index) = entry::mark_newly_created(&mut self.entries, name) {
            self.scroll_to = Some(index as f32 * ROW_HEIGHT);
        }
        Ok(())
    }

    /// The pull gesture's refresh work: relist and unlatch.
    pub fn finish_refresh(&mut self, show_hidden: bool) -> Result<(), FsError> {
        let result = self.relist(show_hidden);
        self.pull.finish_refresh();
        result
    }

    /// Select every real row, skipping the synthetic parent.
    pub fn select_all(&mut self) {
        let first = usize::from(self.entries.first().is_some_and(|e| e.is_parent));
        self.selection.select_all(first, self.entries.len());
    }

    /// Display path with word-break markers, trailing slash included.
    pub fn display_path(&self) -> String {
        let clean = pathutil::strip_zero_width(&self.path.to_string_lossy());
        let mut text = pathutil::add_zero_width(&clean);
        if !text.ends_with('/') {
            text.push('/');
        }
        text
    }

    /// Whether any pane-local animation wants continuous repaints.
    pub fn is_animating(&self) -> bool {
        self.pull.is_settling()
            || self.pull.offset() > 0.0
            || self.fast.is_animating()
            || self.highlight.is_some()
    }

    pub fn fastscroll_deadline(&self) -> Option<Instant> {
        self.fast.hide_deadline()
    }

    // ---- frame ----

    pub fn show(&mut self, ui: &mut Ui, active: bool, now: Instant, dt: f32) -> Vec<PaneEvent> {
        let mut events = Vec::new();

        self.pull.tick(dt);
        if let Some((_, remaining)) = &mut self.highlight {
            *remaining -= dt;
        }
        if matches!(self.highlight, Some((_, remaining)) if remaining <= 0.0) {
            self.highlight = None;
        }

        let pane_rect = ui.available_rect_before_wrap();
        ui.painter().rect_filled(
            pane_rect,
            0.0,
            if active { PaneColors::SURFACE } else { PaneColors::BACKGROUND },
        );

        // Pull displacement: a gap opens above the list and the droplet
        // header is painted into it.
        let pull_offset = self.pull.offset();
        if pull_offset > 0.0 {
            let gap = Rect::from_min_size(
                pane_rect.left_top(),
                egui::vec2(pane_rect.width(), pull_offset),
            );
            pullrefresh::draw_header(ui.painter(), gap, &self.pull, PaneColors::TOOLBAR);
            ui.add_space(pull_offset);
        }

        let had_scroll_target = self.scroll_to.is_some();
        let mut area = ScrollArea::vertical()
            .id_source("pane_list")
            .auto_shrink([false, false])
            .scroll_bar_visibility(ScrollBarVisibility::AlwaysHidden);
        if let Some(target) = self.scroll_to.take() {
            area = area.vertical_scroll_offset(target.max(0.0));
        }

        let at_top = self.scroll_offset <= 0.5;
        let output = area.show(ui, |ui| {
            for index in 0..self.entries.len() {
                self.row_ui(ui, index, at_top, &mut events);
            }
        });

        let previous_offset = self.scroll_offset;
        self.scroll_offset = output.state.offset.y;
        let range = output.content_size.y;
        let inner_rect = output.inner_rect;
        let extent = inner_rect.height();

        if scrolled_by_user(had_scroll_target, previous_offset, self.scroll_offset) {
            events.push(PaneEvent::Activated);
        }

        self.fastscroll_ui(ui, inner_rect, range, extent, previous_offset, now, dt, &mut events);

        if !events.is_empty() && !events.contains(&PaneEvent::Activated) {
            events.insert(0, PaneEvent::Activated);
        }
        events
    }

    #[allow(clippy::too_many_arguments)]
    fn fastscroll_ui(
        &mut self,
        ui: &mut Ui,
        track_rect: Rect,
        range: f32,
        extent: f32,
        previous_offset: f32,
        now: Instant,
        dt: f32,
        events: &mut Vec<PaneEvent>,
    ) {
        let can_show = fastscroll::should_show(self.entries.len(), range, extent);
        self.fast.sync(can_show);

        if (self.scroll_offset - previous_offset).abs() > 0.5 {
            self.fast.on_scrolled(can_show, now);
        }

        let metrics = fastscroll::thumb_metrics(extent, extent, range.max(1.0), self.scroll_offset);
        let hit = fastscroll::thumb_hit_rect(track_rect, metrics);

        if self.fast.is_visible() || self.fast.is_dragging() {
            let response = ui.interact(hit, ui.id().with("fast_thumb"), Sense::drag());
            if response.drag_started() {
                self.fast.begin_drag(now);
                events.push(PaneEvent::Activated);
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let y = pos.y - track_rect.top();
                    if let Some(target) = self.fast.drag_to(y, extent, extent, range.max(1.0)) {
                        self.scroll_to = Some(target);
                    }
                }
            }
            if response.drag_stopped() {
                self.fast.end_drag(now);
            }
        }

        if let Some(paint) = self.fast.tick(now, dt) {
            fastscroll::draw_thumb(ui.painter(), track_rect, metrics, paint);
        }
    }

    fn row_ui(&mut self, ui: &mut Ui, index: usize, at_top: bool, events: &mut Vec<PaneEvent>) {
        let width = ui.available_width();
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(width, ROW_HEIGHT), Sense::click_and_drag());

        self.handle_row_gesture(index, &response, at_top, events);

        if ui.is_rect_visible(rect) {
            self.paint_row(ui, rect, index, response.hovered());
        }

        if response.clicked() {
            self.handle_row_tap(index, events);
        }
    }

    fn handle_row_gesture(
        &mut self,
        index: usize,
        response: &egui::Response,
        at_top: bool,
        events: &mut Vec<PaneEvent>,
    ) {
        if response.drag_started() {
            self.gesture = Some(Gesture {
                row: index,
                accumulated: egui::Vec2::ZERO,
                axis: None,
            });
            events.push(PaneEvent::Activated);
        }

        if response.dragged() {
            let delta = response.drag_delta();
            if let Some(gesture) = &mut self.gesture {
                if gesture.row != index {
                    return;
                }
                gesture.accumulated += delta;

                if gesture.axis.is_none() && gesture.accumulated.length() > AXIS_LOCK_PX {
                    let axis = if gesture.accumulated.x.abs() >= gesture.accumulated.y.abs() {
                        GestureAxis::Horizontal
                    } else {
                        GestureAxis::Vertical
                    };
                    gesture.axis = Some(axis);
                    if axis == GestureAxis::Horizontal {
                        let swipable = !self.entries[index].is_parent;
                        self.swipe.begin(index, swipable);
                    }
                }

                match gesture.axis {
                    Some(GestureAxis::Horizontal) => self.swipe.drag(delta.x),
                    Some(GestureAxis::Vertical) => {
                        let pulling = self.pull.offset() > 0.0;
                        if (at_top && delta.y > 0.0) || pulling {
                            let update = self.pull.drag(delta.y);
                            if update.started {
                                events.push(PaneEvent::Activated);
                            }
                            if update.triggered {
                                events.push(PaneEvent::RefreshTriggered);
                            }
                        } else {
                            // Dragging content down scrolls toward the top.
                            let base = self.scroll_to.unwrap_or(self.scroll_offset);
                            self.scroll_to = Some((base - delta.y).max(0.0));
                        }
                    }
                    None => {}
                }
            }
        }

        if response.drag_stopped() {
            if let Some(gesture) = self.gesture.take() {
                match gesture.axis {
                    Some(GestureAxis::Horizontal) => {
                        if let Some(row) = self.swipe.release() {
                            self.selection.swipe_release(row, self.entries.len());
                            events.push(PaneEvent::Activated);
                        }
                    }
                    Some(GestureAxis::Vertical) => self.pull.release(),
                    None => {}
                }
            }
        }
    }

    fn handle_row_tap(&mut self, index: usize, events: &mut Vec<PaneEvent>) {
        let entry = &self.entries[index];
        if self.selection.in_mode() && !entry.is_parent {
            self.selection.toggle(index, self.entries.len());
            events.push(PaneEvent::Activated);
            return;
        }
        if entry.is_parent {
            events.push(PaneEvent::ParentActivated);
        } else if entry.is_dir {
            events.push(PaneEvent::OpenDir(entry.path.clone()));
        } else {
            events.push(PaneEvent::OpenFile(entry.path.clone()));
        }
    }

    fn paint_row(&self, ui: &Ui, rect: Rect, index: usize, hovered: bool) {
        let entry = &self.entries[index];
        let painter = ui.painter();

        if self.selection.is_selected(index) {
            painter.rect_filled(rect, 0.0, PaneColors::ROW_SELECTED);
        } else if let Some((hl_index, remaining)) = self.highlight {
            if hl_index == index {
                let alpha = (remaining / HIGHLIGHT_SECS).clamp(0.0, 1.0);
                painter.rect_filled(rect, 0.0, PaneColors::ROW_SELECTED.gamma_multiply(alpha));
            }
        } else if hovered {
            painter.rect_filled(rect, 0.0, PaneColors::ROW_HOVER);
        }

        let dx = self.swipe.offset(index);
        let icon_pos = egui::pos2(rect.left() + 22.0 + dx, rect.center().y);
        let glyph = if entry.is_parent {
            "⬆"
        } else if entry.is_dir {
            "📁"
        } else {
            "📄"
        };
        painter.text(
            icon_pos,
            egui::Align2::CENTER_CENTER,
            glyph,
            egui::FontId::proportional(16.0),
            PaneColors::TEXT_DIM,
        );

        let name_color = if entry.newly_created {
            PaneColors::NEW_ITEM
        } else if entry.is_parent {
            PaneColors::TEXT_DIM
        } else {
            PaneColors::TEXT
        };
        painter.text(
            egui::pos2(rect.left() + 42.0 + dx, rect.center().y),
            egui::Align2::LEFT_CENTER,
            display_name(&entry.name),
            egui::FontId::proportional(14.0),
            name_color,
        );

        let mut right = rect.right() - 10.0 + dx;
        if !entry.modified.is_empty() {
            let date_rect = painter.text(
                egui::pos2(right, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                &entry.modified,
                egui::FontId::proportional(11.0),
                PaneColors::TEXT_DIM,
            );
            right = date_rect.left() - 8.0;
        }
        if entry.app_badge {
            painter.text(
                egui::pos2(right, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                "app",
                egui::FontId::proportional(11.0),
                PaneColors::ACCENT,
            );
        }

        painter.hline(
            rect.x_range(),
            rect.bottom() - 0.5,
            egui::Stroke::new(0.5, PaneColors::DIVIDER),
        );
    }
}

/// A scroll offset change counts as the user scrolling (and so claims
/// the active pane) only when no programmatic scroll target was applied
/// this frame; history restores and pane sync must not steal focus.
fn scrolled_by_user(had_scroll_target: bool, previous: f32, current: f32) -> bool {
    !had_scroll_target && (current - previous).abs() > 0.5
}

/// Shorten long names, keeping the listing single-line.
fn display_name(name: &str) -> String {
    let count = name.chars().count();
    if count <= MAX_NAME_CHARS {
        name.to_string()
    } else {
        let head: String = name.chars().take(MAX_NAME_CHARS - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn pane_at(path: &Path) -> Pane {
        let mut pane = Pane::new(path.to_path_buf(), PullDirection::LeftToRight);
        pane.relist(false).unwrap();
        pane
    }

    #[test]
    fn long_names_are_shortened_to_thirty_chars() {
        let long = "a".repeat(40);
        let shown = display_name(&long);
        assert_eq!(shown.chars().count(), MAX_NAME_CHARS);
        assert!(shown.ends_with("..."));
        assert_eq!(display_name("short.txt"), "short.txt");
        // Exactly at the limit: untouched.
        let exact = "b".repeat(30);
        assert_eq!(display_name(&exact), exact);
    }

    #[test]
    fn entering_a_directory_records_history() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut pane = pane_at(tmp.path());
        assert!(!pane.can_go_back());

        pane.enter_dir(tmp.path().join("sub"), false).unwrap();
        assert_eq!(pane.path, tmp.path().join("sub"));
        assert!(pane.can_go_back());
        assert!(!pane.can_go_forward());

        pane.go_back(false);
        assert_eq!(pane.path, tmp.path());
        assert!(pane.can_go_forward());

        pane.go_forward(false);
        assert_eq!(pane.path, tmp.path().join("sub"));
    }

    #[test]
    fn parent_tap_reuses_the_back_stack() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut pane = pane_at(tmp.path());
        pane.enter_dir(tmp.path().join("sub"), false).unwrap();

        // ".." lands where back would land, as a back navigation, so
        // forward is preserved.
        pane.activate_parent(false).unwrap();
        assert_eq!(pane.path, tmp.path());
        assert!(pane.can_go_forward());
    }

    #[test]
    fn parent_tap_from_a_fresh_pane_records_a_visit() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut pane = pane_at(&tmp.path().join("sub"));

        pane.activate_parent(false).unwrap();
        assert_eq!(pane.path, tmp.path());
        assert!(pane.can_go_back());
        assert!(!pane.can_go_forward());
    }

    #[test]
    fn failed_enter_keeps_the_current_listing() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), b"").unwrap();
        let mut pane = pane_at(tmp.path());
        let before = pane.entry_count();

        let missing = tmp.path().join("nope");
        assert!(pane.enter_dir(missing, false).is_err());
        assert_eq!(pane.path, tmp.path());
        assert_eq!(pane.entry_count(), before);
        assert!(!pane.can_go_back());
    }

    #[test]
    fn back_highlights_the_departed_row() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut pane = pane_at(tmp.path());
        pane.enter_dir(tmp.path().join("sub"), false).unwrap();

        pane.go_back(false);
        let (index, remaining) = pane.highlight.unwrap();
        assert_eq!(pane.entries()[index].name, "sub");
        assert!(remaining > 0.0);
    }

    #[test]
    fn create_marks_and_targets_the_new_row() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), b"").unwrap();
        let mut pane = pane_at(tmp.path());

        pane.create("b.txt", CreateKind::File, false).unwrap();
        let marked: Vec<&Entry> =
            pane.entries().iter().filter(|e| e.newly_created).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].name, "b.txt");
        // "..", "a.txt", "b.txt" -> row 2.
        assert_eq!(pane.scroll_to, Some(2.0 * ROW_HEIGHT));
    }

    #[test]
    fn relist_clears_selection_and_marks() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), b"").unwrap();
        let mut pane = pane_at(tmp.path());
        pane.create("b.txt", CreateKind::File, false).unwrap();
        pane.selection.swipe_release(1, pane.entry_count());
        assert!(pane.selection.in_mode());

        pane.relist(false).unwrap();
        assert!(!pane.selection.in_mode());
        assert!(pane.entries().iter().all(|e| !e.newly_created));
    }

    #[test]
    fn user_scroll_activates_but_programmatic_restore_does_not() {
        // Wheel or drag scrolling claims the pane.
        assert!(scrolled_by_user(false, 0.0, 120.0));
        // A restored offset (back/forward, sync) must not.
        assert!(!scrolled_by_user(true, 0.0, 120.0));
        // Sub-pixel jitter is not a scroll.
        assert!(!scrolled_by_user(false, 100.0, 100.2));
    }

    #[test]
    fn idle_frame_emits_no_events() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), b"").unwrap();
        let mut pane = pane_at(tmp.path());

        let ctx = egui::Context::default();
        let _ = ctx.run(Default::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let events = pane.show(ui, true, Instant::now(), 0.016);
                assert!(events.is_empty(), "no input, no events: {events:?}");
            });
        });
    }

    #[test]
    fn display_path_carries_trailing_slash_and_markers() {
        let pane = Pane::new(
            PathBuf::from("/storage/Android/data"),
            PullDirection::LeftToRight,
        );
        let shown = pane.display_path();
        assert!(shown.ends_with('/'));
        assert!(shown.contains('\u{200B}'));
    }
}
