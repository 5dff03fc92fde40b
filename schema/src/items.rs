use crate::move_types::MoveCategory;
use crate::pokemon_types::PokemonType;
use crate::stat_types::StatType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Typed battle effects carried by a held item. Unset fields mean the item
/// has no say in that mechanic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemEffects {
    /// Restricts the holder to the first move it uses until it leaves the field.
    #[serde(default)]
    pub choice_lock: bool,
    /// Flat multiplier applied to the power of every damaging move.
    #[serde(default)]
    pub power: Option<f64>,
    /// Multiplier applied only to physical moves.
    #[serde(default)]
    pub physical_power: Option<f64>,
    /// Multiplier applied only to special moves.
    #[serde(default)]
    pub special_power: Option<f64>,
    /// Per-type power multipliers (e.g. a charcoal boosting fire moves).
    #[serde(default)]
    pub type_power: HashMap<PokemonType, f64>,
    /// Extra multiplier when the move is super effective.
    #[serde(default)]
    pub super_effective_power: Option<f64>,
    /// Fraction of the holder's max HP lost after each damaging move it uses.
    #[serde(default)]
    pub recoil_fraction: Option<f64>,
    /// Fraction of the holder's max HP restored at the end of every turn.
    #[serde(default)]
    pub end_of_turn_heal_fraction: Option<f64>,
}

impl ItemEffects {
    /// Combined power multiplier for a move of the given category and type.
    /// `super_effective` reflects the already-computed type matchup.
    pub fn power_multiplier(
        &self,
        category: MoveCategory,
        move_type: PokemonType,
        super_effective: bool,
    ) -> f64 {
        let mut multiplier = self.power.unwrap_or(1.0);
        match category {
            MoveCategory::Physical => multiplier *= self.physical_power.unwrap_or(1.0),
            MoveCategory::Special => multiplier *= self.special_power.unwrap_or(1.0),
            MoveCategory::Status => {}
        }
        if let Some(boost) = self.type_power.get(&move_type) {
            multiplier *= boost;
        }
        if super_effective {
            multiplier *= self.super_effective_power.unwrap_or(1.0);
        }
        multiplier
    }
}

/// A held item as loaded from the catalog. Immutable once loaded; creatures
/// may gain or lose one between turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Multiplicative final-stat modifiers, keyed by stat.
    #[serde(default)]
    pub stat_modifiers: HashMap<StatType, f64>,
    #[serde(default)]
    pub effects: ItemEffects,
}

impl ItemData {
    /// Multiplier this item applies to `stat`, 1.0 when the item is silent on it.
    pub fn stat_modifier(&self, stat: StatType) -> f64 {
        self.stat_modifiers.get(&stat).copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_band() -> ItemData {
        ItemData {
            id: "choice-band".to_string(),
            name: "Choice Band".to_string(),
            description: String::new(),
            stat_modifiers: HashMap::from([(StatType::Attack, 1.5)]),
            effects: ItemEffects {
                choice_lock: true,
                ..ItemEffects::default()
            },
        }
    }

    #[test]
    fn test_stat_modifier_defaults_to_neutral() {
        let band = choice_band();
        assert_eq!(band.stat_modifier(StatType::Attack), 1.5);
        assert_eq!(band.stat_modifier(StatType::Speed), 1.0);
    }

    #[test]
    fn test_power_multiplier_stacks() {
        let effects = ItemEffects {
            power: Some(1.3),
            type_power: HashMap::from([(PokemonType::Fire, 1.2)]),
            super_effective_power: Some(1.2),
            ..ItemEffects::default()
        };
        let multiplier =
            effects.power_multiplier(MoveCategory::Special, PokemonType::Fire, true);
        assert!((multiplier - 1.3 * 1.2 * 1.2).abs() < 1e-9);

        let neutral = ItemEffects::default().power_multiplier(
            MoveCategory::Physical,
            PokemonType::Normal,
            false,
        );
        assert_eq!(neutral, 1.0);
    }
}
