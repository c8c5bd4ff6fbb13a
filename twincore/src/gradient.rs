//! Gradient edge shadows.
//!
//! Painted as a two-triangle mesh with per-vertex colors fading from a
//! shadow tone to fully transparent. The app draws these on the edges of
//! the *inactive* pane so the pane under the user's hand reads as lifted.

use egui::epaint::{Mesh, Vertex, WHITE_UV};
use egui::{Color32, Painter, Pos2, Rect};

/// Which edge of a rect the shadow hugs (fading away from it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Paint a linear gradient inside `rect`, opaque along `edge` and
/// transparent at the opposite side.
pub fn edge_shadow(painter: &Painter, rect: Rect, edge: ShadowEdge, color: Color32) {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }
    let transparent = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 0);

    // Corner order: lt, rt, rb, lb.
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    let colors = match edge {
        ShadowEdge::Top => [color, color, transparent, transparent],
        ShadowEdge::Bottom => [transparent, transparent, color, color],
        ShadowEdge::Left => [color, transparent, transparent, color],
        ShadowEdge::Right => [transparent, color, color, transparent],
    };

    let mut mesh = Mesh::default();
    for (pos, col) in corners.iter().zip(colors.iter()) {
        mesh.vertices.push(vertex(*pos, *col));
    }
    mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    painter.add(mesh);
}

fn vertex(pos: Pos2, color: Color32) -> Vertex {
    Vertex {
        pos,
        uv: WHITE_UV,
        color,
    }
}
