use glam::Vec2;

/// The outline expanded by a stroke-width margin.
///
/// Touch points outside this region are not scored at all; the
/// containment test is a distance check against the sampled outline,
/// with an expanded bounding box as the cheap first reject.
pub struct HitZone {
    points: Vec<Vec2>,
    margin_sq: f32,
    bbox_min: Vec2,
    bbox_max: Vec2,
}

impl HitZone {
    /// Build the zone from the sampled outline, treated as a closed loop.
    pub fn new(outline: &[Vec2], margin: f32) -> Self {
        let mut bbox_min = Vec2::splat(f32::MAX);
        let mut bbox_max = Vec2::splat(f32::MIN);
        for p in outline {
            bbox_min = bbox_min.min(*p);
            bbox_max = bbox_max.max(*p);
        }
        Self {
            points: outline.to_vec(),
            margin_sq: margin * margin,
            bbox_min: bbox_min - Vec2::splat(margin),
            bbox_max: bbox_max + Vec2::splat(margin),
        }
    }

    /// Whether `p` lies within the margin of the outline.
    pub fn contains(&self, p: Vec2) -> bool {
        if self.points.is_empty() {
            return false;
        }
        if p.x < self.bbox_min.x
            || p.y < self.bbox_min.y
            || p.x > self.bbox_max.x
            || p.y > self.bbox_max.y
        {
            return false;
        }
        if self.points.len() == 1 {
            return p.distance_squared(self.points[0]) <= self.margin_sq;
        }
        for i in 0..self.points.len() {
            let a = self.points[i];
            let b = self.points[(i + 1) % self.points.len()];
            if dist_sq_to_segment(p, a, b) <= self.margin_sq {
                return true;
            }
        }
        false
    }
}

/// Squared distance from `p` to the segment `a`-`b`.
fn dist_sq_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}
