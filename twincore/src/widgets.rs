//! Shared widgets for the TwinFiles chrome.

use egui::{Response, Sense, Ui, Widget};

use crate::theme::PaneColors;

/// Toolbar icon button drawn from a glyph.
///
/// A disabled button renders at half opacity and swallows clicks, so
/// `clicked()` on the returned response is already gated.
pub struct NavButton<'a> {
    glyph: &'a str,
    enabled: bool,
    active: bool,
}

impl<'a> NavButton<'a> {
    pub fn new(glyph: &'a str) -> Self {
        Self {
            glyph,
            enabled: true,
            active: false,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Highlight the glyph with the accent color.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl<'a> Widget for NavButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = egui::vec2(30.0, 26.0);
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            if self.enabled && response.hovered() {
                painter.rect_filled(rect, 4.0, PaneColors::ROW_HOVER);
            }
            let base = if self.active { PaneColors::ACCENT } else { PaneColors::TEXT };
            // Stack emptiness maps to 1.0 / 0.5 opacity.
            let alpha = if self.enabled { 1.0 } else { 0.5 };
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.glyph,
                egui::FontId::proportional(16.0),
                base.gamma_multiply(alpha),
            );
        }

        response
    }
}

/// Bottom status bar: a single dimmed line over a divider.
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(PaneColors::SURFACE)
        .stroke(egui::Stroke::new(1.0, PaneColors::DIVIDER))
        .inner_margin(egui::Margin::symmetric(8.0, 3.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small().color(PaneColors::TEXT_DIM));
        });
}

/// Thin vertical divider between the two panes.
pub fn pane_divider(ui: &mut Ui, height: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(1.0, height), Sense::hover());
    if ui.is_rect_visible(rect) {
        ui.painter().vline(
            rect.center().x,
            rect.y_range(),
            egui::Stroke::new(1.0, PaneColors::DIVIDER),
        );
    }
}
