//! Experience points and badges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{EnrichedNode, ProgressStatus, RoadmapNode};
use crate::tree::Forest;

/// Experience awarded for completing nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpRules {
    /// Awarded for every first completion
    pub base_xp: u32,

    /// Added when the completed node is a checkpoint
    pub checkpoint_bonus: u32,

    /// Scores above this value earn no extra bonus
    pub score_bonus_cap: u32,

    /// The capped score is divided by this to get the score bonus
    pub score_bonus_divisor: u32,
}

impl Default for XpRules {
    fn default() -> Self {
        Self {
            base_xp: 20,
            checkpoint_bonus: 30,
            score_bonus_cap: 100,
            score_bonus_divisor: 10,
        }
    }
}

impl XpRules {
    /// Experience for completing `node` with `score`, ignoring history
    pub fn completion_xp(&self, node: &RoadmapNode, score: u32) -> u32 {
        let checkpoint = if node.checkpoint { self.checkpoint_bonus } else { 0 };
        let score_bonus = score.min(self.score_bonus_cap) / self.score_bonus_divisor.max(1);
        self.base_xp + checkpoint + score_bonus
    }

    /// Experience for a status change. Only the first transition into
    /// `completed` awards anything.
    pub fn award(&self, node: &RoadmapNode, previous: ProgressStatus, new: ProgressStatus, score: u32) -> u32 {
        if new.is_completed() && !previous.is_completed() {
            self.completion_xp(node, score)
        } else {
            0
        }
    }

    /// Experience implied by a progress snapshot: every completed node counts
    /// once with its recorded score
    pub fn experience(&self, forest: &Forest<EnrichedNode>) -> u32 {
        forest
            .iter()
            .filter(|n| n.status.is_completed())
            .map(|n| self.completion_xp(&n.node, n.score))
            .sum()
    }
}

/// Rank earned by accumulating experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Badge {
    /// 100 XP
    Apprentice,
    /// 300 XP
    Journeyman,
    /// 600 XP
    Adept,
    /// 1000 XP
    Master,
}

impl Badge {
    /// Every badge, lowest threshold first
    pub const ALL: [Badge; 4] = [Badge::Apprentice, Badge::Journeyman, Badge::Adept, Badge::Master];

    /// Experience needed for this badge
    pub fn threshold(&self) -> u32 {
        match self {
            Badge::Apprentice => 100,
            Badge::Journeyman => 300,
            Badge::Adept => 600,
            Badge::Master => 1000,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Badge::Apprentice => "Apprentice",
            Badge::Journeyman => "Journeyman",
            Badge::Adept => "Adept",
            Badge::Master => "Master",
        }
    }

    /// Badges held at the given experience
    pub fn earned(xp: u32) -> Vec<Badge> {
        Self::ALL.into_iter().filter(|b| xp >= b.threshold()).collect()
    }

    /// Badges reached at `xp` that are not in `existing`
    pub fn newly_earned(existing: &[Badge], xp: u32) -> Vec<Badge> {
        Self::earned(xp).into_iter().filter(|b| !existing.contains(b)).collect()
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
