//! twincore — shared UI library for TwinFiles

pub mod anim;
pub mod gradient;
pub mod repaint;
pub mod theme;
pub mod widgets;

pub use repaint::RepaintController;
pub use theme::PaneTheme;
