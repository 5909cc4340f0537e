/// Tuning for one tracing activity, provided by the host application.
///
/// The defaults match the shipped drawing game; hosts normally only
/// override `sample_count` or the thresholds for accessibility modes.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Alpha value above which a pixel counts as foreground (default: 30).
    pub alpha_threshold: u8,
    /// Fraction of each image dimension added as background padding
    /// around the mask, so the contour pass never reads the image frame
    /// as a shape (default: 0.30).
    pub pad_fraction: f32,
    /// Contours whose bounding box spans more than this fraction of the
    /// padded canvas in both dimensions are frame artifacts, not the
    /// subject (default: 0.95).
    pub border_reject_fraction: f32,
    /// Number of uniform arc-length samples along the outline (default: 400).
    pub sample_count: usize,
    /// Maximum distance from a touch point to an unclaimed sample for the
    /// sample to count as hit, in display units (default: 16.0).
    pub capture_radius: f32,
    /// Half-width of the hit zone around the outline; touch points
    /// farther than this are not scored at all (default: 20.0, the guide
    /// stroke width).
    pub hit_margin: f32,
    /// Coverage at which the round completes (default: 0.88).
    pub completion_threshold: f32,
    /// Coverage cutoff for a three-star rating (default: 0.95).
    pub three_star_threshold: f32,
    /// Coverage cutoff for a two-star rating (default: 0.91).
    pub two_star_threshold: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: 30,
            pad_fraction: 0.30,
            border_reject_fraction: 0.95,
            sample_count: 400,
            capture_radius: 16.0,
            hit_margin: 20.0,
            completion_threshold: 0.88,
            three_star_threshold: 0.95,
            two_star_threshold: 0.91,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.alpha_threshold, 30);
        assert_eq!(cfg.pad_fraction, 0.30);
        assert_eq!(cfg.border_reject_fraction, 0.95);
        assert_eq!(cfg.sample_count, 400);
        assert_eq!(cfg.capture_radius, 16.0);
        assert_eq!(cfg.completion_threshold, 0.88);
        assert_eq!(cfg.three_star_threshold, 0.95);
        assert_eq!(cfg.two_star_threshold, 0.91);
    }
}
