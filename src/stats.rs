//! Pure stat pipeline: base stat + IVs + EVs + level + nature, with the
//! classic floor-division formulas. Everything here is side-effect free and
//! bit-reproducible for identical integer inputs.

use crate::errors::StatError;
use schema::StatType;
use serde::{Deserialize, Serialize};

/// Aggregate EV cap across all six stats.
pub const EV_TOTAL_LIMIT: u16 = 510;
/// Per-stat EV cap.
pub const EV_STAT_LIMIT: u8 = 252;
/// Per-stat IV cap.
pub const IV_LIMIT: u8 = 31;

/// Individual values, one per stat, each clamped to 0-31 at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ivs([u8; 6]);

impl Ivs {
    pub fn new(values: [u8; 6]) -> Self {
        Ivs(values.map(|iv| iv.min(IV_LIMIT)))
    }

    /// All-31 spread, the common default for configured battles.
    pub fn perfect() -> Self {
        Ivs([IV_LIMIT; 6])
    }

    pub fn get(&self, stat: StatType) -> u8 {
        self.0[stat.index()]
    }
}

impl Default for Ivs {
    fn default() -> Self {
        Ivs::perfect()
    }
}

/// Effort values, one per stat. Each value is clamped to 0-252 at
/// construction; a spread whose clamped total exceeds 510 is rejected
/// outright rather than truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evs([u8; 6]);

impl Evs {
    pub fn new(values: [u8; 6]) -> Result<Self, StatError> {
        let clamped = values.map(|ev| ev.min(EV_STAT_LIMIT));
        let total: u16 = clamped.iter().map(|&ev| ev as u16).sum();
        if total > EV_TOTAL_LIMIT {
            return Err(StatError::EvLimitExceeded { total });
        }
        Ok(Evs(clamped))
    }

    pub fn get(&self, stat: StatType) -> u8 {
        self.0[stat.index()]
    }

    pub fn total(&self) -> u16 {
        self.0.iter().map(|&ev| ev as u16).sum()
    }

    /// Replace a single stat's EV, rejecting the update if it would push the
    /// total past the cap. The spread is left untouched on failure.
    pub fn set(&mut self, stat: StatType, value: u8) -> Result<(), StatError> {
        let mut updated = self.0;
        updated[stat.index()] = value.min(EV_STAT_LIMIT);
        let total: u16 = updated.iter().map(|&ev| ev as u16).sum();
        if total > EV_TOTAL_LIMIT {
            return Err(StatError::EvLimitExceeded { total });
        }
        self.0 = updated;
        Ok(())
    }
}

/// HP formula: `(2*base + iv + ev/4) * level / 100 + level + 10`, all
/// divisions flooring.
pub fn calc_hp(base: u8, iv: u8, ev: u8, level: u8) -> u32 {
    let base_value = 2 * base as u32 + iv as u32 + ev as u32 / 4;
    (base_value * level as u32) / 100 + level as u32 + 10
}

/// Non-HP formula: `floor(((2*base + iv + ev/4) * level / 100 + 5) * nature)`.
pub fn calc_stat(base: u8, iv: u8, ev: u8, level: u8, nature_modifier: f64) -> u32 {
    let base_value = 2 * base as u32 + iv as u32 + ev as u32 / 4;
    let intermediate = (base_value * level as u32) / 100 + 5;
    (intermediate as f64 * nature_modifier).floor() as u32
}
