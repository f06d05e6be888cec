//! Shape generation for 2D primitives
//!
//! Turns the geometric draw commands of a scene into triangle lists. Text is
//! left to the surface's font renderer.

use glam::Vec2;

use super::scene::DrawCommand;
use super::vertex::{Color, Vertex};

/// Two triangles covering an axis-aligned rectangle
pub fn rect(center: Vec2, size: Vec2, color: Color) -> [Vertex; 6] {
    let half = size / 2.0;
    let (l, r) = (center.x - half.x, center.x + half.x);
    let (b, t) = (center.y - half.y, center.y + half.y);
    [
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(l, t, color),
    ]
}

/// A line segment as a quad of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> [Vertex; 6] {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to - perp;
    let d = to + perp;
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Rectangle border drawn inside-out around the edges
pub fn rect_outline(center: Vec2, size: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let half = size / 2.0;
    let corners = [
        center + Vec2::new(-half.x, -half.y),
        center + Vec2::new(half.x, -half.y),
        center + Vec2::new(half.x, half.y),
        center + Vec2::new(-half.x, half.y),
    ];
    let mut vertices = Vec::with_capacity(24);
    for i in 0..4 {
        vertices.extend_from_slice(&line(corners[i], corners[(i + 1) % 4], width, color));
    }
    vertices
}

/// Triangle list for every geometric command, in draw order
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(commands.len() * 6);
    for command in commands {
        match command {
            DrawCommand::Rect {
                center,
                size,
                color,
            } => vertices.extend_from_slice(&rect(*center, *size, *color)),
            DrawCommand::RectOutline {
                center,
                size,
                width,
                color,
            } => vertices.extend(rect_outline(*center, *size, *width, *color)),
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => vertices.extend_from_slice(&line(*from, *to, *width, *color)),
            DrawCommand::Text { .. } => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scene::Anchor;
    use crate::renderer::vertex::colors;

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(400.0, 120.0), Vec2::new(40.0, 70.0), colors::WHITE);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 380.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 420.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 85.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 155.0);
    }

    #[test]
    fn test_vertical_line_width() {
        let v = line(Vec2::new(180.0, 0.0), Vec2::new(180.0, 600.0), 2.0, colors::ROAD_EDGE);
        for vertex in v {
            assert!((vertex.position[0] - 180.0).abs() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_text_is_skipped() {
        let commands = vec![
            DrawCommand::Rect {
                center: Vec2::ZERO,
                size: Vec2::ONE,
                color: colors::WHITE,
            },
            DrawCommand::Text {
                text: "SCORE".into(),
                pos: Vec2::ZERO,
                size: 24.0,
                color: colors::WHITE,
                anchor: Anchor::Left,
                bold: true,
            },
            DrawCommand::RectOutline {
                center: Vec2::ZERO,
                size: Vec2::ONE,
                width: 2.0,
                color: colors::WHITE,
            },
        ];
        assert_eq!(tessellate(&commands).len(), 6 + 24);
    }
}
