use crate::errors::{ActionError, BattleResult, StatError};
use crate::stats::{calc_hp, calc_stat, Evs, Ivs};
use schema::{BaseStats, ItemData, MoveData, Nature, PokemonType, SpeciesData, StatusCondition};
use schema::StatType;
use serde::{Deserialize, Serialize};

pub const MAX_SELECTED_MOVES: usize = 4;

/// A creature participating in battles.
///
/// Final stats are never stored: every accessor recomputes base stat -> IV/EV
/// pipeline (at the current level and nature) -> held-item multiplier. That
/// makes mid-battle configuration changes (item swap, nature change, level
/// change) take effect on the very next read without any recalculation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    id: String,
    pub name: String,
    types: Vec<PokemonType>,
    level: u8,
    base_stats: BaseStats,
    ivs: Ivs,
    evs: Evs,
    nature: Nature,
    /// Selected ability id. Carried for rosters and snapshots; no ability
    /// mechanics run in battle.
    ability: Option<String>,
    held_item: Option<ItemData>,
    /// Full known-move set.
    moves: Vec<MoveData>,
    /// Indices into `moves` forming the battle-selectable subset (at most 4).
    selected_moves: Vec<usize>,
    current_hp: u32,
    pub status: Option<StatusCondition>,
}

impl PokemonInst {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        name: String,
        types: Vec<PokemonType>,
        level: u8,
        base_stats: BaseStats,
        ivs: Ivs,
        evs: Evs,
        nature: Nature,
        moves: Vec<MoveData>,
    ) -> BattleResult<Self> {
        if types.is_empty() || types.len() > 2 {
            return Err(StatError::InvalidTypeCount(types.len()).into());
        }
        let selected_moves = (0..moves.len().min(MAX_SELECTED_MOVES)).collect();
        let mut pokemon = PokemonInst {
            id,
            name,
            types,
            level: level.clamp(1, 100),
            base_stats,
            ivs,
            evs,
            nature,
            ability: None,
            held_item: None,
            moves,
            selected_moves,
            current_hp: 0,
            status: None,
        };
        pokemon.current_hp = pokemon.max_hp();
        Ok(pokemon)
    }

    /// Build an instance from a catalog species record.
    pub fn from_species(
        id: String,
        species: &SpeciesData,
        level: u8,
        ivs: Ivs,
        evs: Evs,
        nature: Nature,
        moves: Vec<MoveData>,
    ) -> BattleResult<Self> {
        let mut pokemon = Self::new(
            id,
            species.name.clone(),
            species.types.clone(),
            level,
            species.base_stats.clone(),
            ivs,
            evs,
            nature,
            moves,
        )?;
        pokemon.ability = species.abilities.first().cloned();
        Ok(pokemon)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn types(&self) -> &[PokemonType] {
        &self.types
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn nature(&self) -> Nature {
        self.nature
    }

    pub fn ability(&self) -> Option<&str> {
        self.ability.as_deref()
    }

    pub fn held_item(&self) -> Option<&ItemData> {
        self.held_item.as_ref()
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    // --- Computed stats ---

    /// Max HP from the HP formula times the item's hp modifier, if any.
    pub fn max_hp(&self) -> u32 {
        let hp = calc_hp(
            self.base_stats.hp,
            self.ivs.get(StatType::Hp),
            self.evs.get(StatType::Hp),
            self.level,
        );
        (hp as f64 * self.item_modifier(StatType::Hp)) as u32
    }

    pub fn attack(&self) -> u32 {
        self.computed_stat(StatType::Attack)
    }

    pub fn defense(&self) -> u32 {
        self.computed_stat(StatType::Defense)
    }

    pub fn sp_attack(&self) -> u32 {
        self.computed_stat(StatType::SpAttack)
    }

    pub fn sp_defense(&self) -> u32 {
        self.computed_stat(StatType::SpDefense)
    }

    pub fn speed(&self) -> u32 {
        self.computed_stat(StatType::Speed)
    }

    pub fn computed_stat(&self, stat: StatType) -> u32 {
        if stat == StatType::Hp {
            return self.max_hp();
        }
        let base = calc_stat(
            self.base_stats.get(stat),
            self.ivs.get(stat),
            self.evs.get(stat),
            self.level,
            self.nature.modifier(stat),
        );
        (base as f64 * self.item_modifier(stat)) as u32
    }

    fn item_modifier(&self, stat: StatType) -> f64 {
        self.held_item
            .as_ref()
            .map(|item| item.stat_modifier(stat))
            .unwrap_or(1.0)
    }

    // --- Battle-mutable state ---

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp());
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    // --- Configuration between turns ---

    pub fn set_level(&mut self, level: u8) {
        self.level = level.clamp(1, 100);
        self.clamp_hp();
    }

    pub fn set_nature(&mut self, nature: Nature) {
        self.nature = nature;
        self.clamp_hp();
    }

    pub fn set_ability(&mut self, ability: Option<String>) {
        self.ability = ability;
    }

    pub fn set_held_item(&mut self, item: Option<ItemData>) {
        self.held_item = item;
        self.clamp_hp();
    }

    pub fn set_ev(&mut self, stat: StatType, value: u8) -> Result<(), StatError> {
        self.evs.set(stat, value)?;
        self.clamp_hp();
        Ok(())
    }

    fn clamp_hp(&mut self) {
        self.current_hp = self.current_hp.min(self.max_hp());
    }

    // --- Move management ---

    pub fn moves(&self) -> &[MoveData] {
        &self.moves
    }

    /// Replace the battle-selectable subset. At most four indices, each of
    /// which must point into the known-move list.
    pub fn set_selected_moves(&mut self, indices: Vec<usize>) -> BattleResult<()> {
        if let Some(&bad) = indices.iter().find(|&&index| index >= self.moves.len()) {
            return Err(ActionError::MoveIndexOutOfRange {
                creature: self.id.clone(),
                index: bad,
            }
            .into());
        }
        if indices.len() > MAX_SELECTED_MOVES {
            return Err(ActionError::MoveIndexOutOfRange {
                creature: self.id.clone(),
                index: indices[MAX_SELECTED_MOVES],
            }
            .into());
        }
        self.selected_moves = indices;
        Ok(())
    }

    pub fn selectable_moves(&self) -> impl Iterator<Item = &MoveData> {
        self.selected_moves.iter().map(|&index| &self.moves[index])
    }

    /// Look up a move in the selectable subset by id.
    pub fn selectable_move(&self, move_id: &str) -> Option<&MoveData> {
        self.selectable_moves().find(|move_data| move_data.id == move_id)
    }

    /// Test hook: pin current HP to an exact value (still clamped to max).
    #[cfg(test)]
    pub fn set_hp_for_test(&mut self, hp: u32) {
        self.current_hp = hp.min(self.max_hp());
    }
}
