use glam::Vec2;
use imageproc::contours::{find_contours, Contour};
use lyon::math::point;
use lyon::path::Path;

use crate::api::types::TargetRect;
use crate::outline::mask::AlphaMask;

/// Integer bounding box of a contour in mask coordinates.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl Bounds {
    fn of(contour: &Contour<u32>) -> Self {
        let mut b = Self {
            min_x: u32::MAX,
            min_y: u32::MAX,
            max_x: 0,
            max_y: 0,
        };
        for p in &contour.points {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        b
    }

    fn width(&self) -> f32 {
        (self.max_x - self.min_x) as f32
    }

    fn height(&self) -> f32 {
        (self.max_y - self.min_y) as f32
    }

    fn area(&self) -> f32 {
        self.width() * self.height()
    }
}

/// Extract the subject's outer boundary from a silhouette mask and fit it
/// into `rect`.
///
/// All contours of the padded mask (outer borders and holes alike) are
/// collected flat; contours whose bounding box spans more than
/// `border_reject_fraction` of the canvas in both dimensions are frame
/// artifacts and dropped, and the largest remaining bounding box wins.
/// The winner is remapped from its own bounding box onto `rect`,
/// stretching X and Y independently so the outline exactly fills the
/// rectangle.
///
/// Returns `None` when the mask is blank or no contour qualifies; the
/// activity then runs without a guide and without scoring.
pub fn extract_outline(
    mask: &AlphaMask,
    rect: TargetRect,
    border_reject_fraction: f32,
) -> Option<Path> {
    if mask.is_blank() {
        return None;
    }

    let contours: Vec<Contour<u32>> = find_contours(mask.image());
    let canvas_w = mask.width() as f32;
    let canvas_h = mask.height() as f32;

    let mut best: Option<(&Contour<u32>, Bounds)> = None;
    for contour in &contours {
        if contour.points.len() < 3 {
            continue;
        }
        let bounds = Bounds::of(contour);
        if bounds.width() > border_reject_fraction * canvas_w
            && bounds.height() > border_reject_fraction * canvas_h
        {
            continue;
        }
        if best.map_or(true, |(_, b)| bounds.area() > b.area()) {
            best = Some((contour, bounds));
        }
    }

    let (contour, bounds) = best?;
    log::debug!(
        "silhouette: {} contours, picked {} points, bbox {}x{}",
        contours.len(),
        contour.points.len(),
        bounds.width(),
        bounds.height()
    );

    // Normalize against the contour's own bounding box, then stretch onto
    // the target rect. Detection space is y-down like display space, so
    // orientation is carried entirely by this mapping.
    let denom_x = bounds.width().max(f32::EPSILON);
    let denom_y = bounds.height().max(f32::EPSILON);
    let remap = |x: u32, y: u32| -> Vec2 {
        let nx = (x - bounds.min_x) as f32 / denom_x;
        let ny = (y - bounds.min_y) as f32 / denom_y;
        rect.min + Vec2::new(nx * rect.size.x, ny * rect.size.y)
    };

    let mut builder = Path::builder();
    let first = remap(contour.points[0].x, contour.points[0].y);
    builder.begin(point(first.x, first.y));
    for p in &contour.points[1..] {
        let v = remap(p.x, p.y);
        builder.line_to(point(v.x, v.y));
    }
    builder.close();
    Some(builder.build())
}
