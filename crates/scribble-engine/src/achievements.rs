//! Star-rating ledger boundary.
//!
//! The engine reports ratings through the [`AchievementStore`] trait; how
//! they are persisted (platform key-value store, file, nothing at all) is
//! the host's business. [`MemoryAchievements`] is the plain in-memory
//! ledger, JSON round-trippable so hosts can stash it wholesale.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which mini-game a rating belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    /// Trace-the-outline drawing rounds.
    Draw,
    /// Fill-in-the-blank word rounds.
    Fill,
}

impl GameKind {
    fn key_prefix(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Fill => "fill",
        }
    }
}

/// Where completed rounds report their star ratings.
///
/// Passed into the session explicitly so tests can substitute a fake and
/// nothing reaches for ambient global state.
pub trait AchievementStore {
    fn set_stars(&mut self, activity: &str, kind: GameKind, stars: u8);
    fn stars(&self, activity: &str, kind: GameKind) -> u8;
    fn total_stars(&self, kind: GameKind) -> u32;
}

/// HashMap-backed ledger keyed `"{kind}_{activity}"`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryAchievements {
    data: HashMap<String, u8>,
}

impl MemoryAchievements {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(activity: &str, kind: GameKind) -> String {
        format!("{}_{}", kind.key_prefix(), activity)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl AchievementStore for MemoryAchievements {
    fn set_stars(&mut self, activity: &str, kind: GameKind, stars: u8) {
        self.data.insert(Self::key(activity, kind), stars);
    }

    fn stars(&self, activity: &str, kind: GameKind) -> u8 {
        self.data
            .get(&Self::key(activity, kind))
            .copied()
            .unwrap_or(0)
    }

    fn total_stars(&self, kind: GameKind) -> u32 {
        let prefix = format!("{}_", kind.key_prefix());
        self.data
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, stars)| *stars as u32)
            .sum()
    }
}
