pub mod strokes;
pub mod tracker;
