use crate::pokemon_types::PokemonType;
use crate::stat_types::BaseStats;
use serde::{Deserialize, Serialize};

/// A creature species as loaded from the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: String,
    #[serde(default)]
    pub pokedex_number: u16,
    pub name: String,
    /// One or two elemental types.
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    /// Ids of abilities members of this species may carry.
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Ids of moves this species can know.
    #[serde(default)]
    pub moves: Vec<String>,
}

impl SpeciesData {
    pub fn can_learn(&self, move_id: &str) -> bool {
        self.moves.iter().any(|known| known == move_id)
    }
}
