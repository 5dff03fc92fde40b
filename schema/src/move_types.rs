use crate::pokemon_types::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

/// Non-volatile status conditions. Only the selection skeleton plus a small
/// subset of in-battle effects (residual damage, paralysis speed cut) are
/// modeled by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCondition {
    Sleep,
    Poison,
    Burn,
    Freeze,
    Paralysis,
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCondition::Sleep => write!(f, "Sleep"),
            StatusCondition::Poison => write!(f, "Poison"),
            StatusCondition::Burn => write!(f, "Burn"),
            StatusCondition::Freeze => write!(f, "Freeze"),
            StatusCondition::Paralysis => write!(f, "Paralysis"),
        }
    }
}

/// A single move as loaded from the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: String,
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// Base power; zero for status moves.
    #[serde(default)]
    pub power: u32,
    /// Percent chance to hit, 0-100.
    pub accuracy: u8,
    /// Status applied to the target by status-category moves.
    #[serde(default)]
    pub status_effect: Option<StatusCondition>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        !matches!(self.category, MoveCategory::Status)
    }
}
