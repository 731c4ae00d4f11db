//! Priority scoring for the packing queue

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::stock::{StockLevel, StockTier};
use crate::types::{is_falsy, or_default};

impl StockTier {
    /// Weight of the tier when ordering the packing queue (higher packs sooner)
    pub fn priority_rank(&self) -> u32 {
        match self {
            StockTier::Critical => 4,
            StockTier::Low => 3,
            StockTier::BelowMin => 2,
            StockTier::Normal => 1,
            StockTier::High | StockTier::Overstock | StockTier::Unknown => 0,
        }
    }
}

/// Score a stock level for packing: `rank × 100 + shortfall percentage`.
///
/// The shortfall is how far the quantity sits below the minimum, as a
/// percentage of the minimum, rounded. Without a minimum it is zero.
pub fn priority_score(level: &StockLevel) -> u32 {
    let rank = level.tier().priority_rank();
    rank * 100 + shortfall_percent(level)
}

fn shortfall_percent(level: &StockLevel) -> u32 {
    if is_falsy(level.min_level) || level.min_level < 0.0 {
        return 0;
    }
    let qty = or_default(level.current_qty, 0.0);
    let ratio = ((level.min_level - qty) / level.min_level).clamp(0.0, 1.0);
    (ratio * 100.0).round() as u32
}

/// Order two named stock levels for the packing queue.
///
/// Unknown tiers go last, then higher scores first, then names ascending.
pub fn packing_order(a: (&str, &StockLevel), b: (&str, &StockLevel)) -> Ordering {
    let unknown_a = a.1.tier() == StockTier::Unknown;
    let unknown_b = b.1.tier() == StockTier::Unknown;
    unknown_a
        .cmp(&unknown_b)
        .then_with(|| priority_score(b.1).cmp(&priority_score(a.1)))
        .then_with(|| a.0.cmp(b.0))
}

/// A named item waiting to be packed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackingCandidate {
    pub name: String,
    pub level: StockLevel,
}

/// A candidate with its computed tier and score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedCandidate {
    pub name: String,
    pub status: StockTier,
    pub score: u32,
    pub level: StockLevel,
}

/// Rank candidates for packing, most urgent first
pub fn rank_for_packing(mut candidates: Vec<PackingCandidate>) -> Vec<RankedCandidate> {
    candidates.sort_by(|a, b| packing_order((a.name.as_str(), &a.level), (b.name.as_str(), &b.level)));
    candidates
        .into_iter()
        .map(|c| RankedCandidate {
            status: c.level.tier(),
            score: priority_score(&c.level),
            name: c.name,
            level: c.level,
        })
        .collect()
}
