use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::api::types::Color;
use crate::coverage::strokes::{Stroke, StrokeHistory};

/// One colored point of a guide or stroke polyline.
/// 6 floats = 24 bytes per vertex, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GuideVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl GuideVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn new(p: Vec2, c: Color) -> Self {
        Self {
            x: p.x,
            y: p.y,
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Soft gray used for the dashed guide outline.
const GUIDE_COLOR: Color = Color::new(0.55, 0.55, 0.60, 0.9);

/// Flat vertex buffer handed to the host renderer: the sampled guide
/// outline first, then each stroke's polyline in draw order (the active,
/// uncommitted stroke last).
///
/// Rebuilt from session state once per frame; the host slices it using
/// `outline_count` and `stroke_counts`.
pub struct GuideBuffer {
    vertices: Vec<GuideVertex>,
    outline_count: u32,
    stroke_counts: Vec<u32>,
}

impl GuideBuffer {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(1024),
            outline_count: 0,
            stroke_counts: Vec::new(),
        }
    }

    pub fn rebuild(&mut self, outline: &[Vec2], history: &StrokeHistory, active: Option<&Stroke>) {
        self.vertices.clear();
        self.stroke_counts.clear();

        self.outline_count = outline.len() as u32;
        for &p in outline {
            self.vertices.push(GuideVertex::new(p, GUIDE_COLOR));
        }

        for stroke in history.iter().chain(active) {
            self.stroke_counts.push(stroke.points.len() as u32);
            for &p in &stroke.points {
                self.vertices.push(GuideVertex::new(p, stroke.color));
            }
        }
    }

    pub fn vertices(&self) -> &[GuideVertex] {
        &self.vertices
    }

    /// Raw pointer for hosts that copy into a shared buffer.
    pub fn ptr(&self) -> *const GuideVertex {
        self.vertices.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of leading vertices that belong to the guide outline.
    pub fn outline_count(&self) -> u32 {
        self.outline_count
    }

    /// Vertex count of each stroke polyline, in draw order.
    pub fn stroke_counts(&self) -> &[u32] {
        &self.stroke_counts
    }
}

impl Default for GuideBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn guide_vertex_is_24_bytes() {
        assert_eq!(size_of::<GuideVertex>(), 24);
        assert_eq!(GuideVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn rebuild_lays_out_outline_then_strokes() {
        let outline = vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let mut history = StrokeHistory::new();
        let mut committed = Stroke::new(Color::CRAYON_RED);
        committed.push(Vec2::new(1.0, 1.0));
        committed.push(Vec2::new(2.0, 2.0));
        history.push(committed);
        let mut active = Stroke::new(Color::CRAYON_GREEN);
        active.push(Vec2::new(5.0, 5.0));

        let mut buffer = GuideBuffer::new();
        buffer.rebuild(&outline, &history, Some(&active));

        assert_eq!(buffer.outline_count(), 3);
        assert_eq!(buffer.stroke_counts(), &[2, 1]);
        assert_eq!(buffer.len(), 6);

        // Stroke vertices carry their stroke's color.
        let red = &buffer.vertices()[3];
        assert!((red.r - Color::CRAYON_RED.r).abs() < 1e-6);
        let green = &buffer.vertices()[5];
        assert!((green.g - Color::CRAYON_GREEN.g).abs() < 1e-6);
    }

    #[test]
    fn rebuild_clears_previous_contents() {
        let mut buffer = GuideBuffer::new();
        buffer.rebuild(&[Vec2::ZERO; 5], &StrokeHistory::new(), None);
        assert_eq!(buffer.len(), 5);

        buffer.rebuild(&[], &StrokeHistory::new(), None);
        assert!(buffer.is_empty());
        assert_eq!(buffer.outline_count(), 0);
        assert!(buffer.stroke_counts().is_empty());
    }
}
