use glam::Vec2;
use lyon::path::Path;

#[cfg(feature = "extract")]
use std::sync::Arc;

use crate::achievements::{AchievementStore, GameKind};
use crate::api::config::SessionConfig;
use crate::api::events::TraceEvent;
#[cfg(feature = "extract")]
use crate::api::types::TargetRect;
use crate::api::types::{Color, StarRating};
use crate::coverage::strokes::{Stroke, StrokeHistory};
use crate::coverage::tracker::CoverageTracker;
use crate::guide::GuideBuffer;
use crate::input::queue::{InputEvent, InputQueue};
#[cfg(feature = "extract")]
use crate::outline::job::OutlineJob;

/// Where a tracing round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Extraction has not finished (or not started); touch input is
    /// silently ignored.
    AwaitingOutline,
    /// The guide is installed and strokes are being scored.
    Tracing,
    /// No usable silhouette was found; the child can doodle freely but
    /// nothing is scored.
    NoOutline,
    /// Coverage reached the completion threshold; the rating is final
    /// and input is ignored.
    Complete,
}

/// Orchestrates one drawing activity: owns the outline state, the stroke
/// history, the coverage tracker and the feedback event queue.
///
/// All mutation happens on the host's frame loop. `tick()` polls the
/// background extraction, `update()` feeds queued pointer events through
/// the tracker, and `drain_events()` hands accumulated feedback to the
/// host, mirroring the usual run loop:
///
/// ```ignore
/// session.tick();
/// session.update(&input);
/// for event in session.drain_events() { /* sounds, speech, reward */ }
/// ```
pub struct TraceSession {
    config: SessionConfig,
    /// Achievement key of the activity being traced (e.g. "bunny").
    activity: String,
    phase: SessionPhase,
    generation: u64,
    #[cfg(feature = "extract")]
    rect: Option<TargetRect>,
    #[cfg(feature = "extract")]
    source: Option<Arc<image::RgbaImage>>,
    #[cfg(feature = "extract")]
    job: Option<OutlineJob>,
    outline_path: Option<Path>,
    tracker: Option<CoverageTracker>,
    history: StrokeHistory,
    active: Option<Stroke>,
    color: Color,
    events: Vec<TraceEvent>,
    guide: GuideBuffer,
    achievements: Box<dyn AchievementStore>,
}

impl TraceSession {
    pub fn new(
        activity: impl Into<String>,
        config: SessionConfig,
        achievements: Box<dyn AchievementStore>,
    ) -> Self {
        Self {
            config,
            activity: activity.into(),
            phase: SessionPhase::AwaitingOutline,
            generation: 0,
            #[cfg(feature = "extract")]
            rect: None,
            #[cfg(feature = "extract")]
            source: None,
            #[cfg(feature = "extract")]
            job: None,
            outline_path: None,
            tracker: None,
            history: StrokeHistory::new(),
            active: None,
            color: Color::default(),
            events: Vec::new(),
            guide: GuideBuffer::new(),
            achievements,
        }
    }

    /// Start a fresh round: kick off silhouette extraction for `image`
    /// fitted into `rect`. Any previous round state is discarded.
    #[cfg(feature = "extract")]
    pub fn begin_round(&mut self, image: Arc<image::RgbaImage>, rect: TargetRect) {
        self.source = Some(image.clone());
        self.rect = Some(rect);
        self.reset_round_state();
        self.generation += 1;
        self.job = Some(OutlineJob::spawn(image, rect, self.config, self.generation));
        log::debug!("extraction started for '{}' (generation {})", self.activity, self.generation);
    }

    /// The display rectangle changed (e.g. device rotation). The in-flight
    /// or installed outline no longer matches; re-extract for the new
    /// rect and restart the round.
    #[cfg(feature = "extract")]
    pub fn set_rect(&mut self, rect: TargetRect) {
        if self.rect == Some(rect) {
            return;
        }
        let Some(image) = self.source.clone() else {
            self.rect = Some(rect);
            return;
        };
        self.begin_round(image, rect);
    }

    /// Poll the background extraction and install its result once it is
    /// ready. Stale results (superseded generation) never install.
    #[cfg(feature = "extract")]
    pub fn tick(&mut self) {
        let Some(job) = &self.job else { return };
        let Some(result) = job.poll(self.generation) else {
            return;
        };
        self.job = None;
        match result.path {
            Some(path) if !result.samples.is_empty() => {
                self.install_outline(path, result.samples)
            }
            _ => self.install_unavailable(),
        }
    }

    /// Install an already-extracted outline. Hosts with their own
    /// detector (and tests) use this directly instead of `begin_round`.
    pub fn install_outline(&mut self, path: Path, samples: Vec<Vec2>) {
        let sample_count = samples.len();
        self.history.clear();
        self.active = None;
        self.tracker = Some(CoverageTracker::new(samples, &self.config));
        self.outline_path = Some(path);
        self.phase = SessionPhase::Tracing;
        self.events.push(TraceEvent::OutlineReady { sample_count });
        log::info!("outline ready for '{}' ({} samples)", self.activity, sample_count);
    }

    /// Record that no usable silhouette exists; the round runs unscored.
    pub fn install_unavailable(&mut self) {
        self.history.clear();
        self.active = None;
        self.tracker = None;
        self.outline_path = None;
        self.phase = SessionPhase::NoOutline;
        self.events.push(TraceEvent::OutlineUnavailable);
        log::info!("no outline for '{}', scoring disabled", self.activity);
    }

    /// Feed all queued pointer events through the round. The caller
    /// drains the queue afterwards, once every consumer has seen it.
    pub fn update(&mut self, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
                InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
                InputEvent::PointerUp { x, y } => self.pointer_up(Vec2::new(x, y)),
                InputEvent::PointerCancel => self.pointer_cancel(),
            }
        }
    }

    pub fn pointer_down(&mut self, p: Vec2) {
        if self.phase != SessionPhase::Tracing {
            return;
        }
        let mut stroke = Stroke::new(self.color);
        stroke.push(p);
        self.active = Some(stroke);
        self.score_point(p);
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        if self.active.is_none() {
            return;
        }
        if let Some(stroke) = &mut self.active {
            stroke.push(p);
        }
        self.score_point(p);
    }

    pub fn pointer_up(&mut self, p: Vec2) {
        let Some(mut stroke) = self.active.take() else {
            return;
        };
        stroke.push(p);
        if self.phase == SessionPhase::Tracing {
            self.score_point(p);
        }
        self.history.push(stroke);

        // Completion is judged on the committed gesture; the rating bands
        // over the stroke's final coverage.
        if self.phase == SessionPhase::Tracing {
            if let Some(stars) = self
                .tracker
                .as_mut()
                .and_then(|tracker| tracker.check_completion())
            {
                self.finish_round(stars);
            }
        }
    }

    /// The system interrupted the gesture; drop the partial stroke and
    /// rebuild coverage so it reflects exactly the committed strokes.
    pub fn pointer_cancel(&mut self) {
        if self.active.take().is_none() {
            return;
        }
        if self.phase != SessionPhase::Tracing {
            return;
        }
        if let Some(tracker) = &mut self.tracker {
            tracker.rebuild_from(&self.history);
            self.events.push(TraceEvent::CoverageChanged {
                coverage: tracker.coverage(),
            });
        }
    }

    /// Remove the most recent committed stroke and recompute coverage
    /// from what remains. Unavailable once the round is complete.
    pub fn undo(&mut self) {
        if self.phase != SessionPhase::Tracing || self.active.is_some() {
            return;
        }
        if self.history.undo_last().is_none() {
            return;
        }
        if let Some(tracker) = &mut self.tracker {
            tracker.rebuild_from(&self.history);
            self.events.push(TraceEvent::CoverageChanged {
                coverage: tracker.coverage(),
            });
        }
    }

    fn score_point(&mut self, p: Vec2) {
        if self.phase != SessionPhase::Tracing {
            return;
        }
        let Some(tracker) = &mut self.tracker else {
            return;
        };
        if tracker.try_claim(p).is_none() {
            return;
        }
        let coverage = tracker.coverage();
        self.events.push(TraceEvent::CoverageChanged { coverage });
        if let Some(index) = tracker.advance_milestone() {
            self.events.push(TraceEvent::MilestoneReached { index });
        }
    }

    fn finish_round(&mut self, stars: StarRating) {
        self.phase = SessionPhase::Complete;
        self.achievements
            .set_stars(&self.activity, GameKind::Draw, stars.count());
        log::info!(
            "round complete for '{}': coverage {:.3}, {} stars",
            self.activity,
            self.coverage(),
            stars.count()
        );
        self.events.push(TraceEvent::RoundComplete { stars });
    }

    /// Hand all accumulated feedback events to the host, oldest first.
    pub fn drain_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rebuild and expose the flat vertex buffer of guide and stroke
    /// polylines for the host renderer.
    pub fn guide_buffer(&mut self) -> &GuideBuffer {
        let samples = self
            .tracker
            .as_ref()
            .map(|t| t.samples())
            .unwrap_or_default();
        self.guide
            .rebuild(samples, &self.history, self.active.as_ref());
        &self.guide
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn coverage(&self) -> f32 {
        self.tracker.as_ref().map_or(0.0, |t| t.coverage())
    }

    pub fn stars(&self) -> Option<StarRating> {
        self.tracker.as_ref().and_then(|t| t.stars())
    }

    pub fn samples(&self) -> &[Vec2] {
        self.tracker
            .as_ref()
            .map(|t| t.samples())
            .unwrap_or_default()
    }

    pub fn outline_path(&self) -> Option<&Path> {
        self.outline_path.as_ref()
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn achievements(&self) -> &dyn AchievementStore {
        self.achievements.as_ref()
    }

    fn reset_round_state(&mut self) {
        self.phase = SessionPhase::AwaitingOutline;
        self.tracker = None;
        self.outline_path = None;
        self.history.clear();
        self.active = None;
    }
}
