use crate::stat_types::StatType;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// The 25 classic natures. Each non-neutral nature raises one stat by 10%
/// and lowers another by 10%; the five neutral natures touch nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Nature {
    /// Stable lowercase identifier used by catalogs and wire formats.
    pub fn id(self) -> &'static str {
        match self {
            Nature::Hardy => "hardy",
            Nature::Lonely => "lonely",
            Nature::Brave => "brave",
            Nature::Adamant => "adamant",
            Nature::Naughty => "naughty",
            Nature::Bold => "bold",
            Nature::Docile => "docile",
            Nature::Relaxed => "relaxed",
            Nature::Impish => "impish",
            Nature::Lax => "lax",
            Nature::Timid => "timid",
            Nature::Hasty => "hasty",
            Nature::Serious => "serious",
            Nature::Jolly => "jolly",
            Nature::Naive => "naive",
            Nature::Modest => "modest",
            Nature::Mild => "mild",
            Nature::Quiet => "quiet",
            Nature::Bashful => "bashful",
            Nature::Rash => "rash",
            Nature::Calm => "calm",
            Nature::Gentle => "gentle",
            Nature::Sassy => "sassy",
            Nature::Careful => "careful",
            Nature::Quirky => "quirky",
        }
    }

    pub fn from_id(id: &str) -> Option<Nature> {
        Nature::iter().find(|nature| nature.id() == id.to_ascii_lowercase())
    }

    pub fn all() -> Vec<Nature> {
        Nature::iter().collect()
    }

    /// The stat this nature boosts, if any.
    pub fn increased_stat(self) -> Option<StatType> {
        self.profile().map(|(up, _)| up)
    }

    /// The stat this nature hinders, if any.
    pub fn decreased_stat(self) -> Option<StatType> {
        self.profile().map(|(_, down)| down)
    }

    /// Multiplier applied to `stat` by this nature: 1.1, 0.9 or 1.0.
    pub fn modifier(self, stat: StatType) -> f64 {
        match self.profile() {
            Some((up, _)) if up == stat => 1.1,
            Some((_, down)) if down == stat => 0.9,
            _ => 1.0,
        }
    }

    fn profile(self) -> Option<(StatType, StatType)> {
        use StatType::*;
        match self {
            Nature::Hardy
            | Nature::Docile
            | Nature::Serious
            | Nature::Bashful
            | Nature::Quirky => None,
            Nature::Lonely => Some((Attack, Defense)),
            Nature::Brave => Some((Attack, Speed)),
            Nature::Adamant => Some((Attack, SpAttack)),
            Nature::Naughty => Some((Attack, SpDefense)),
            Nature::Bold => Some((Defense, Attack)),
            Nature::Relaxed => Some((Defense, Speed)),
            Nature::Impish => Some((Defense, SpAttack)),
            Nature::Lax => Some((Defense, SpDefense)),
            Nature::Timid => Some((Speed, Attack)),
            Nature::Hasty => Some((Speed, Defense)),
            Nature::Jolly => Some((Speed, SpAttack)),
            Nature::Naive => Some((Speed, SpDefense)),
            Nature::Modest => Some((SpAttack, Attack)),
            Nature::Mild => Some((SpAttack, Defense)),
            Nature::Quiet => Some((SpAttack, Speed)),
            Nature::Rash => Some((SpAttack, SpDefense)),
            Nature::Calm => Some((SpDefense, Attack)),
            Nature::Gentle => Some((SpDefense, Defense)),
            Nature::Sassy => Some((SpDefense, Speed)),
            Nature::Careful => Some((SpDefense, SpAttack)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nature_modifiers() {
        assert_eq!(Nature::Adamant.modifier(StatType::Attack), 1.1);
        assert_eq!(Nature::Adamant.modifier(StatType::SpAttack), 0.9);
        assert_eq!(Nature::Adamant.modifier(StatType::Speed), 1.0);
        assert_eq!(Nature::Hardy.modifier(StatType::Attack), 1.0);
    }

    #[test]
    fn test_nature_ids_round_trip() {
        for nature in Nature::all() {
            assert_eq!(Nature::from_id(nature.id()), Some(nature));
        }
        assert_eq!(Nature::from_id("JOLLY"), Some(Nature::Jolly));
        assert_eq!(Nature::from_id("bogus"), None);
    }

    #[test]
    fn test_neutral_natures_have_no_profile() {
        assert_eq!(Nature::Serious.increased_stat(), None);
        assert_eq!(Nature::Serious.decreased_stat(), None);
    }
}
