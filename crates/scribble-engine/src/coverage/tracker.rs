use glam::Vec2;

use crate::api::config::SessionConfig;
use crate::api::types::StarRating;
use crate::coverage::strokes::StrokeHistory;
use crate::outline::hitzone::HitZone;

/// Milestone bucket width, in coverage percent.
const MILESTONE_STEP: f32 = 25.0;
/// Bucket reserved for full coverage; announced as completion, never as a
/// milestone.
const TOP_BUCKET: u8 = 4;

/// Scores touch points against the sampled outline and accumulates the
/// round's coverage.
///
/// Every sample can be claimed once; coverage is the claimed fraction.
/// A touch point claims the sample nearest to it, and only if that
/// sample is still unclaimed and within the capture radius. Feeding the
/// same point again is a no-op, and a finger resting in one spot cannot
/// sweep up its whole neighborhood.
pub struct CoverageTracker {
    samples: Vec<Vec2>,
    hit_zone: HitZone,
    claimed: Vec<bool>,
    claimed_count: usize,
    capture_radius_sq: f32,
    completion_threshold: f32,
    three_star_threshold: f32,
    two_star_threshold: f32,
    last_milestone: u8,
    stars: Option<StarRating>,
}

impl CoverageTracker {
    pub fn new(samples: Vec<Vec2>, config: &SessionConfig) -> Self {
        let hit_zone = HitZone::new(&samples, config.hit_margin);
        let claimed = vec![false; samples.len()];
        Self {
            samples,
            hit_zone,
            claimed,
            claimed_count: 0,
            capture_radius_sq: config.capture_radius * config.capture_radius,
            completion_threshold: config.completion_threshold,
            three_star_threshold: config.three_star_threshold,
            two_star_threshold: config.two_star_threshold,
            last_milestone: 0,
            stars: None,
        }
    }

    /// Score one touch point. Returns the index of the newly claimed
    /// sample, or `None` when the point is outside the hit zone, the
    /// nearest sample is already claimed or out of capture range, or the
    /// round is over.
    pub fn try_claim(&mut self, p: Vec2) -> Option<usize> {
        if self.is_complete() || self.samples.is_empty() {
            return None;
        }
        if !self.hit_zone.contains(p) {
            return None;
        }

        let mut best_idx = 0;
        let mut best_dist = f32::MAX;
        for (i, sample) in self.samples.iter().enumerate() {
            let d = p.distance_squared(*sample);
            if d < best_dist {
                best_dist = d;
                best_idx = i;
            }
        }
        if self.claimed[best_idx] || best_dist > self.capture_radius_sq {
            return None;
        }

        self.claimed[best_idx] = true;
        self.claimed_count += 1;
        Some(best_idx)
    }

    /// Claimed fraction of the sample set, always in [0, 1].
    pub fn coverage(&self) -> f32 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.claimed_count as f32 / self.samples.len() as f32
        }
    }

    fn bucket(&self) -> u8 {
        ((self.coverage() * 100.0 / MILESTONE_STEP) as u8).min(TOP_BUCKET)
    }

    /// Record the milestone bucket after forward drawing. Fires (returns
    /// the bucket index, 1-3) only when the bucket strictly increased;
    /// the top bucket belongs to completion and never fires here.
    pub fn advance_milestone(&mut self) -> Option<u8> {
        let bucket = self.bucket();
        if bucket <= self.last_milestone {
            return None;
        }
        self.last_milestone = bucket;
        (bucket < TOP_BUCKET).then_some(bucket)
    }

    /// One-way completion check. The star rating is banded from the
    /// coverage at the moment the threshold is first reached, and frozen
    /// from then on.
    pub fn check_completion(&mut self) -> Option<StarRating> {
        if self.stars.is_some() {
            return None;
        }
        let coverage = self.coverage();
        if coverage < self.completion_threshold {
            return None;
        }
        let stars =
            StarRating::for_coverage(coverage, self.three_star_threshold, self.two_star_threshold);
        self.stars = Some(stars);
        Some(stars)
    }

    /// Rebuild the claimed set from scratch by replaying every point of
    /// every remaining stroke, then recompute the milestone counter from
    /// the rebuilt coverage. Used after undo; coverage may drop and no
    /// milestone fires for the replayed points.
    pub fn rebuild_from(&mut self, history: &StrokeHistory) {
        for c in self.claimed.iter_mut() {
            *c = false;
        }
        self.claimed_count = 0;
        for stroke in history.iter() {
            for &p in &stroke.points {
                self.try_claim(p);
            }
        }
        self.last_milestone = self.bucket();
    }

    pub fn is_complete(&self) -> bool {
        self.stars.is_some()
    }

    /// Rating fixed at completion; `None` while the round is open.
    pub fn stars(&self) -> Option<StarRating> {
        self.stars
    }

    pub fn samples(&self) -> &[Vec2] {
        &self.samples
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed_count
    }
}
