//! Application shell: two panes, the chrome around them, and the event
//! loop glue.

use std::path::PathBuf;
use std::time::Instant;

use egui::{Align, Layout, Margin, Rect, RichText, Sense};

use twincore::gradient::{edge_shadow, ShadowEdge};
use twincore::theme::PaneColors;
use twincore::widgets::{pane_divider, status_bar, NavButton};
use twincore::RepaintController;

use crate::config::AppConfig;
use crate::entry::CreateKind;
use crate::pane::{Pane, PaneEvent};
use crate::permission::PermissionGate;
use crate::pullrefresh::PullDirection;

/// Transient status message lifetime, seconds.
const NOTICE_SECS: f32 = 2.5;
/// Inactive-pane shadow reach, in points.
const SHADOW_SIZE: f32 = 12.0;
const SHADOW_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 26);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Droplet travel sweeps away from the window edge on each side.
    pub fn pull_direction(self) -> PullDirection {
        match self {
            Side::Left => PullDirection::LeftToRight,
            Side::Right => PullDirection::RightToLeft,
        }
    }
}

#[derive(Default)]
struct AddDialog {
    open: bool,
    name: String,
}

#[derive(Default)]
struct JumpDialog {
    open: bool,
    text: String,
}

pub struct TwinFilesApp {
    panes: [Pane; 2],
    active: Side,
    config: AppConfig,
    gate: PermissionGate,
    notice: Option<(String, f32)>,
    add_dialog: AddDialog,
    jump_dialog: JumpDialog,
    repaint: RepaintController,
    last_frame: Instant,
}

impl TwinFilesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let start = config.start_dir();
        let gate = PermissionGate::new(&start);
        let mut panes = [
            Pane::new(start.clone(), Side::Left.pull_direction()),
            Pane::new(start, Side::Right.pull_direction()),
        ];
        if gate.is_granted() {
            for pane in &mut panes {
                if let Err(e) = pane.relist(config.show_hidden) {
                    log::warn!("initial listing failed: {e}");
                }
            }
        }
        Self {
            panes,
            active: Side::Left,
            config,
            gate,
            notice: None,
            add_dialog: AddDialog::default(),
            jump_dialog: JumpDialog::default(),
            repaint: RepaintController::new(),
            last_frame: Instant::now(),
        }
    }

    fn notify(&mut self, message: String) {
        self.notice = Some((message, NOTICE_SECS));
    }

    fn relist_both(&mut self) {
        let show_hidden = self.config.show_hidden;
        for pane in &mut self.panes {
            if let Err(e) = pane.relist(show_hidden) {
                log::warn!("relist failed: {e}");
            }
        }
    }

    fn handle_event(&mut self, side: Side, event: PaneEvent) {
        let show_hidden = self.config.show_hidden;
        match event {
            PaneEvent::Activated => self.active = side,
            PaneEvent::OpenDir(path) => {
                if let Err(e) = self.panes[side.index()].enter_dir(path, show_hidden) {
                    self.notify(e.to_string());
                }
            }
            PaneEvent::OpenFile(path) => self.open_file(path),
            PaneEvent::ParentActivated => {
                if let Err(e) = self.panes[side.index()].activate_parent(show_hidden) {
                    self.notify(e.to_string());
                }
            }
            PaneEvent::RefreshTriggered => {
                match self.panes[side.index()].finish_refresh(show_hidden) {
                    Ok(()) => self.notify("Refreshed".to_string()),
                    Err(e) => self.notify(e.to_string()),
                }
            }
        }
    }

    /// Copy the active pane's path into the other pane and refresh it.
    fn sync_panes(&mut self) {
        let show_hidden = self.config.show_hidden;
        let source = self.panes[self.active.index()].path.clone();
        let other = self.active.other();
        let result = if self.panes[other.index()].path == source {
            self.panes[other.index()].relist(show_hidden)
        } else {
            self.panes[other.index()].enter_dir(source, show_hidden)
        };
        if let Err(e) = result {
            self.notify(e.to_string());
        }
    }

    fn open_file(&mut self, path: PathBuf) {
        if let Err(e) = open::that_detached(&path) {
            log::warn!("opening {} failed: {e}", path.display());
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            self.notify(format!("Could not open {name}"));
        }
    }

    fn toolbar(&mut self, ctx: &egui::Context, enabled: bool) {
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::none()
                    .fill(PaneColors::TOOLBAR)
                    .inner_margin(Margin::symmetric(6.0, 4.0)),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| self.toolbar_contents(ui));
            });
    }

    fn toolbar_contents(&mut self, ui: &mut egui::Ui) {
        let show_hidden = self.config.show_hidden;
        let (can_back, can_forward) = {
            let pane = &self.panes[self.active.index()];
            (pane.can_go_back(), pane.can_go_forward())
        };

        ui.horizontal(|ui| {
            if ui.add(NavButton::new("◀").enabled(can_back)).clicked() {
                self.panes[self.active.index()].go_back(show_hidden);
            }
            if ui.add(NavButton::new("▶").enabled(can_forward)).clicked() {
                self.panes[self.active.index()].go_forward(show_hidden);
            }
            // Sync arrow points from the active pane toward the other one.
            let sync_glyph = match self.active {
                Side::Left => "⇥",
                Side::Right => "⇤",
            };
            if ui.add(NavButton::new(sync_glyph)).clicked() {
                self.sync_panes();
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.menu_button("⋮", |ui| {
                    if ui.button("Refresh").clicked() {
                        self.relist_both();
                        ui.close_menu();
                    }
                    let mut hidden = self.config.show_hidden;
                    if ui.checkbox(&mut hidden, "Hidden files").changed() {
                        self.config.show_hidden = hidden;
                        self.config.save();
                        self.relist_both();
                        ui.close_menu();
                    }
                    if ui.button("Select all").clicked() {
                        self.panes[self.active.index()].select_all();
                        ui.close_menu();
                    }
                });
                if ui.add(NavButton::new("＋")).clicked() {
                    self.add_dialog.open = true;
                    self.add_dialog.name.clear();
                }

                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    let path_text = self.panes[self.active.index()].display_path();
                    let label = egui::Label::new(
                        RichText::new(path_text).color(PaneColors::TEXT).size(13.0),
                    )
                    .wrap(true)
                    .sense(Sense::click());
                    if ui.add(label).clicked() {
                        self.jump_dialog.open = true;
                        self.jump_dialog.text = self.panes[self.active.index()]
                            .path
                            .to_string_lossy()
                            .to_string();
                    }
                });
            });
        });
    }

    fn status_line(&self) -> String {
        if let Some((message, _)) = &self.notice {
            return message.clone();
        }
        let pane = &self.panes[self.active.index()];
        if pane.selection.in_mode() {
            format!("{} selected", pane.selection.len())
        } else {
            format!("{} folders · {} files", pane.folders, pane.files)
        }
    }

    fn panes_ui(&mut self, ui: &mut egui::Ui, now: Instant, dt: f32) -> Vec<(Side, PaneEvent)> {
        let full = ui.available_rect_before_wrap();
        let half = ((full.width() - 1.0) / 2.0).max(0.0);
        let rects = [
            Rect::from_min_size(full.min, egui::vec2(half, full.height())),
            Rect::from_min_size(
                egui::pos2(full.min.x + half + 1.0, full.min.y),
                egui::vec2(half, full.height()),
            ),
        ];

        let mut events = Vec::new();
        for side in Side::BOTH {
            let mut pane_ui = pane_child_ui(ui, rects[side.index()], side);
            let active = self.active == side;
            for event in self.panes[side.index()].show(&mut pane_ui, active, now, dt) {
                events.push((side, event));
            }
        }

        {
            let mut divider_ui = ui.child_ui(
                Rect::from_min_size(
                    egui::pos2(full.min.x + half, full.min.y),
                    egui::vec2(1.0, full.height()),
                ),
                Layout::top_down(Align::Min),
            );
            pane_divider(&mut divider_ui, full.height());
        }

        // The inactive pane recedes under edge shadows; the active one
        // stays flat and bright.
        let inactive = self.active.other();
        let rect = rects[inactive.index()];
        let painter = ui.painter();
        edge_shadow(
            painter,
            Rect::from_min_size(rect.min, egui::vec2(rect.width(), SHADOW_SIZE)),
            ShadowEdge::Top,
            SHADOW_COLOR,
        );
        edge_shadow(
            painter,
            Rect::from_min_size(
                egui::pos2(rect.min.x, rect.max.y - SHADOW_SIZE),
                egui::vec2(rect.width(), SHADOW_SIZE),
            ),
            ShadowEdge::Bottom,
            SHADOW_COLOR,
        );
        let (inner_edge, inner_rect) = match inactive {
            Side::Right => (
                ShadowEdge::Left,
                Rect::from_min_size(rect.min, egui::vec2(SHADOW_SIZE, rect.height())),
            ),
            Side::Left => (
                ShadowEdge::Right,
                Rect::from_min_size(
                    egui::pos2(rect.max.x - SHADOW_SIZE, rect.min.y),
                    egui::vec2(SHADOW_SIZE, rect.height()),
                ),
            ),
        };
        edge_shadow(painter, inner_rect, inner_edge, SHADOW_COLOR);

        events
    }

    fn add_dialog_ui(&mut self, ctx: &egui::Context) {
        if !self.add_dialog.open {
            return;
        }
        let mut open = true;
        let mut submit: Option<CreateKind> = None;
        egui::Window::new("New entry")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Name");
                    let edit = ui.text_edit_singleline(&mut self.add_dialog.name);
                    if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = Some(CreateKind::File);
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Folder").clicked() {
                        submit = Some(CreateKind::Folder);
                    }
                    if ui.button("File").clicked() {
                        submit = Some(CreateKind::File);
                    }
                    if ui.button("Cancel").clicked() {
                        self.add_dialog.open = false;
                    }
                });
            });
        if !open {
            self.add_dialog.open = false;
        }
        if let Some(kind) = submit {
            self.submit_add(kind);
        }
    }

    fn submit_add(&mut self, kind: CreateKind) {
        let name = self.add_dialog.name.trim().to_string();
        if name.is_empty() {
            self.notify("Name cannot be empty".to_string());
            return;
        }
        let show_hidden = self.config.show_hidden;
        match self.panes[self.active.index()].create(&name, kind, show_hidden) {
            Ok(()) => self.add_dialog.open = false,
            Err(e) => self.notify(e.to_string()),
        }
    }

    fn jump_dialog_ui(&mut self, ctx: &egui::Context) {
        if !self.jump_dialog.open {
            return;
        }
        let mut open = true;
        let mut submit = false;
        egui::Window::new("Go to path")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                let edit = ui.text_edit_singleline(&mut self.jump_dialog.text);
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("Go").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        self.jump_dialog.open = false;
                    }
                });
            });
        if !open {
            self.jump_dialog.open = false;
        }
        if submit {
            let raw = self.jump_dialog.text.clone();
            let show_hidden = self.config.show_hidden;
            match self.panes[self.active.index()].jump_to_path(&raw, show_hidden) {
                Ok(()) => self.jump_dialog.open = false,
                Err(e) => self.notify(e.to_string()),
            }
        }
    }

    fn permission_ui(&mut self, ctx: &egui::Context) {
        egui::Window::new("Storage access")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("TwinFiles needs permission to read your files.");
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Open settings").clicked() {
                        self.gate.open_settings();
                    }
                    if ui.button("Continue anyway").clicked() {
                        self.gate.decline();
                    }
                });
            });
    }
}

/// Build a pane's child Ui with a per-side id, so the two panes'
/// persisted widget state (scroll offset, thumb drag) never collides.
fn pane_child_ui(ui: &mut egui::Ui, rect: Rect, side: Side) -> egui::Ui {
    ui.child_ui_with_id_source(rect, Layout::top_down(Align::Min), side.index())
}

impl eframe::App for TwinFilesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame(ctx);
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        let prompting = self.gate.prompting();
        if prompting && self.gate.probe() {
            self.relist_both();
        }

        if let Some((_, remaining)) = &mut self.notice {
            *remaining -= dt;
        }
        if matches!(self.notice, Some((_, remaining)) if remaining <= 0.0) {
            self.notice = None;
        }

        self.toolbar(ctx, !prompting);

        egui::TopBottomPanel::bottom("status")
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                status_bar(ui, &self.status_line());
            });

        let mut events = Vec::new();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(PaneColors::BACKGROUND))
            .show(ctx, |ui| {
                ui.add_enabled_ui(!prompting, |ui| {
                    events = self.panes_ui(ui, now, dt);
                });
                if prompting {
                    // Dim the whole browsing surface behind the prompt.
                    ui.painter().rect_filled(
                        ui.max_rect(),
                        0.0,
                        egui::Color32::from_black_alpha(60),
                    );
                }
            });

        for (side, event) in events {
            self.handle_event(side, event);
        }

        if prompting {
            self.permission_ui(ctx);
            // Poll for an externally granted permission.
            self.repaint
                .wake_at(now + std::time::Duration::from_millis(500));
        }
        self.add_dialog_ui(ctx);
        self.jump_dialog_ui(ctx);

        let animating =
            self.panes.iter().any(Pane::is_animating) || self.notice.is_some();
        self.repaint.set_continuous(animating);
        for pane in &self.panes {
            if let Some(deadline) = pane.fastscroll_deadline() {
                self.repaint.wake_at(deadline);
            }
        }

        self.repaint.end_frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pane_widget_ids_do_not_collide() {
        let ctx = egui::Context::default();
        let mut scroll_ids = Vec::new();
        let mut thumb_ids = Vec::new();
        let _ = ctx.run(Default::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let full = ui.available_rect_before_wrap();
                let half = full.width() / 2.0;
                let rects = [
                    Rect::from_min_size(full.min, egui::vec2(half, full.height())),
                    Rect::from_min_size(
                        egui::pos2(full.min.x + half, full.min.y),
                        egui::vec2(half, full.height()),
                    ),
                ];
                for side in Side::BOTH {
                    let child = pane_child_ui(ui, rects[side.index()], side);
                    // The ids each pane's list and thumb persist under.
                    scroll_ids.push(child.make_persistent_id("pane_list"));
                    thumb_ids.push(child.id().with("fast_thumb"));
                }
            });
        });
        assert_ne!(scroll_ids[0], scroll_ids[1]);
        assert_ne!(thumb_ids[0], thumb_ids[1]);
    }
}
