use glam::Vec2;

use crate::api::types::Color;

/// One continuous touch gesture, tagged with the color that was active
/// when it started.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Vec2>,
    pub color: Color,
}

impl Stroke {
    pub fn new(color: Color) -> Self {
        Self {
            points: Vec::with_capacity(64),
            color,
        }
    }

    pub fn push(&mut self, p: Vec2) {
        self.points.push(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Ordered list of committed strokes for the current round.
///
/// Strokes append on gesture end; undo removes the most recent one and
/// the tracker rebuilds coverage from what remains.
#[derive(Debug, Default, Clone)]
pub struct StrokeHistory {
    strokes: Vec<Stroke>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Remove and return the most recent stroke.
    pub fn undo_last(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_undo() {
        let mut history = StrokeHistory::new();
        let mut a = Stroke::new(Color::CRAYON_RED);
        a.push(Vec2::ZERO);
        let mut b = Stroke::new(Color::CRAYON_GREEN);
        b.push(Vec2::ONE);

        history.push(a);
        history.push(b.clone());
        assert_eq!(history.len(), 2);

        let undone = history.undo_last().unwrap();
        assert_eq!(undone, b);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn undo_on_empty_is_none() {
        let mut history = StrokeHistory::new();
        assert!(history.undo_last().is_none());
    }

    #[test]
    fn stroke_keeps_color() {
        let stroke = Stroke::new(Color::CRAYON_PURPLE);
        assert_eq!(stroke.color, Color::CRAYON_PURPLE);
        assert!(stroke.is_empty());
    }
}
