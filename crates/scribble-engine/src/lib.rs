pub mod achievements;
pub mod api;
pub mod coverage;
pub mod guide;
pub mod input;
pub mod outline;
pub mod session;

// Re-export key types at crate root for convenience
pub use achievements::{AchievementStore, GameKind, MemoryAchievements};
pub use api::config::SessionConfig;
pub use api::events::{encouragement, TraceEvent, ENCOURAGEMENTS};
pub use api::types::{Color, StarRating, TargetRect};
pub use coverage::strokes::{Stroke, StrokeHistory};
pub use coverage::tracker::CoverageTracker;
pub use guide::{GuideBuffer, GuideVertex};
pub use input::queue::{InputEvent, InputQueue};
pub use outline::hitzone::HitZone;
pub use outline::sample::{flatten_path, resample, sample_path};
pub use session::{SessionPhase, TraceSession};

#[cfg(feature = "extract")]
pub use outline::extract::extract_outline;
#[cfg(feature = "extract")]
pub use outline::job::{OutlineJob, OutlineResult};
#[cfg(feature = "extract")]
pub use outline::mask::AlphaMask;
