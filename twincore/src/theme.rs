//! TwinFiles theme — light, flat, blue accent.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Palette shared by both panes and the chrome around them.
pub struct PaneColors;

impl PaneColors {
    pub const BACKGROUND: Color32 = Color32::from_rgb(250, 250, 250);
    pub const SURFACE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const TEXT: Color32 = Color32::from_rgb(0, 0, 0);
    pub const TEXT_DIM: Color32 = Color32::from_rgb(120, 120, 120);
    /// Accent blue, also the fast-scroll thumb while dragging.
    pub const ACCENT: Color32 = Color32::from_rgb(0x42, 0xA5, 0xF5);
    /// Fast-scroll thumb at rest.
    pub const THUMB_IDLE: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);
    /// Name color for a just-created entry.
    pub const NEW_ITEM: Color32 = Color32::from_rgb(0x00, 0xC8, 0x53);
    /// Background of a selected row.
    pub const ROW_SELECTED: Color32 = Color32::from_rgb(0xE3, 0xF2, 0xFD);
    /// Row hover wash.
    pub const ROW_HOVER: Color32 = Color32::from_rgb(0xF0, 0xF4, 0xF8);
    /// Toolbar / pull-refresh droplet fill.
    pub const TOOLBAR: Color32 = Color32::from_rgb(0xE8, 0xEE, 0xF4);
    pub const DIVIDER: Color32 = Color32::from_rgb(0xDD, 0xDD, 0xDD);
}

/// Theme configuration for the TwinFiles window.
pub struct PaneTheme {
    pub font_size_body: f32,
    pub font_size_small: f32,
    pub font_size_heading: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for PaneTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_small: 11.0,
            font_size_heading: 20.0,
            window_padding: 0.0,
            item_spacing: 4.0,
        }
    }
}

impl PaneTheme {
    /// Apply the theme to an egui context. Uses egui's bundled fonts.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();

        visuals.window_fill = PaneColors::SURFACE;
        visuals.panel_fill = PaneColors::BACKGROUND;
        visuals.faint_bg_color = PaneColors::ROW_HOVER;
        visuals.extreme_bg_color = PaneColors::SURFACE;

        visuals.window_rounding = Rounding::same(4.0);
        visuals.menu_rounding = Rounding::same(4.0);
        visuals.window_stroke = Stroke::new(1.0, PaneColors::DIVIDER);

        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, PaneColors::TEXT);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, PaneColors::TEXT);
        visuals.widgets.hovered.bg_fill = PaneColors::ROW_HOVER;
        visuals.widgets.active.bg_fill = PaneColors::ROW_SELECTED;

        visuals.selection.bg_fill = PaneColors::ROW_SELECTED;
        visuals.selection.stroke = Stroke::new(1.0, PaneColors::ACCENT);

        apply_cursor_tint(&mut visuals, PaneColors::ACCENT);

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(8.0);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);

        ctx.set_style(style);
    }
}

/// Tint the text-edit cursor with the accent color using whatever the
/// toolkit exposes. egui models the cursor as a stroke, so this always
/// succeeds here; on a backend without a configurable cursor this
/// function is the place to degrade to a no-op.
pub fn apply_cursor_tint(visuals: &mut Visuals, color: Color32) {
    visuals.text_cursor = Stroke::new(2.0, color);
}
