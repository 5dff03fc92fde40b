use crate::battle::state::{Battle, TurnRng};
use crate::catalog::{Catalog, StaticCatalog};
use crate::errors::BattleResult;
use crate::pokemon::PokemonInst;
use crate::stats::{Evs, Ivs};
use schema::{ItemData, Nature, StatusCondition};

/// A builder for creating test creatures from the bundled catalog with
/// common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("pikachu", 50)
///     .with_moves(vec!["thunderbolt"])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species_id: String,
    id: Option<String>,
    level: u8,
    moves: Option<Vec<String>>,
    item: Option<String>,
    status: Option<StatusCondition>,
    current_hp: Option<u32>,
    nature: Nature,
}

impl TestPokemonBuilder {
    pub fn new(species_id: &str, level: u8) -> Self {
        Self {
            species_id: species_id.to_string(),
            id: None,
            level,
            moves: None,
            item: None,
            status: None,
            current_hp: None,
            nature: Nature::Hardy,
        }
    }

    /// Override the instance id. Needed for mirror matches, where two
    /// creatures of the same species must stay distinguishable.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Restrict the move set to the given ids. If not set, every catalog
    /// move of the species is learned (and the first four are selectable).
    pub fn with_moves(mut self, move_ids: Vec<&str>) -> Self {
        self.moves = Some(move_ids.into_iter().map(str::to_string).collect());
        self
    }

    pub fn with_item(mut self, item_id: &str) -> Self {
        self.item = Some(item_id.to_string());
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Pin current HP. If not set, HP starts at max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_nature(mut self, nature: Nature) -> Self {
        self.nature = nature;
        self
    }

    pub fn build(self) -> PokemonInst {
        let catalog = test_catalog();
        let species = catalog
            .require_species(&self.species_id)
            .unwrap_or_else(|err| panic!("test species missing: {}", err));

        let move_ids = self.moves.unwrap_or_else(|| species.moves.clone());
        let moves = move_ids
            .iter()
            .map(|id| {
                catalog
                    .require_move(id)
                    .cloned()
                    .unwrap_or_else(|err| panic!("test move missing: {}", err))
            })
            .collect();

        let instance_id = self
            .id
            .unwrap_or_else(|| format!("{}-test", self.species_id));
        let mut pokemon = PokemonInst::from_species(
            instance_id,
            species,
            self.level,
            Ivs::perfect(),
            Evs::default(),
            self.nature,
            moves,
        )
        .unwrap_or_else(|err| panic!("test pokemon invalid: {}", err));

        if let Some(item_id) = self.item {
            let item: ItemData = catalog
                .require_item(&item_id)
                .cloned()
                .unwrap_or_else(|err| panic!("test item missing: {}", err));
            pokemon.set_held_item(Some(item));
        }
        pokemon.status = self.status;
        if let Some(hp) = self.current_hp {
            pokemon.set_hp_for_test(hp);
        }
        pokemon
    }
}

/// The bundled catalog, which every battle test reads from.
pub fn test_catalog() -> StaticCatalog {
    StaticCatalog::bundled().unwrap_or_else(|err| panic!("bundled catalog broken: {}", err))
}

/// A standard 1v1 battle between two creatures.
pub fn create_test_battle(creature1: PokemonInst, creature2: PokemonInst) -> Battle {
    create_team_battle(vec![creature1], vec![creature2])
}

pub fn create_team_battle(team1: Vec<PokemonInst>, team2: Vec<PokemonInst>) -> Battle {
    Battle::new("test_battle".to_string(), team1, team2)
        .unwrap_or_else(|err| panic!("test battle invalid: {}", err))
}

/// A `TurnRng` with a generous buffer of mid-range values, for tests where
/// specific outcomes do not matter.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// A `TurnRng` that always hits and always rolls the maximum damage factor,
/// so damage numbers are exact.
pub fn max_roll_rng() -> TurnRng {
    TurnRng::new_for_test(vec![100; 100])
}

pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
