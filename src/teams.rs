//! Roster construction: wire-friendly member specs resolved against a
//! catalog into battle-ready creatures.

use crate::catalog::Catalog;
use crate::errors::{BattleResult, CatalogError};
use crate::pokemon::PokemonInst;
use crate::stats::{Evs, Ivs};
use rand::Rng;
use schema::Nature;
use serde::{Deserialize, Serialize};

/// One requested team member. Everything beyond species and level is
/// optional: nature defaults to a random pick, IVs to perfect, EVs to zero,
/// and the instance id to `<species>-<slot>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub species: String,
    pub level: u8,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nature: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub ivs: Option<[u8; 6]>,
    #[serde(default)]
    pub evs: Option<[u8; 6]>,
}

impl MemberSpec {
    pub fn new(species: &str, level: u8) -> Self {
        Self {
            species: species.to_string(),
            level,
            id: None,
            nature: None,
            ability: None,
            item: None,
            moves: Vec::new(),
            ivs: None,
            evs: None,
        }
    }
}

/// Resolve one member spec against the catalog.
///
/// Moves not named are taken from the species learn list (first four become
/// selectable); named moves must both exist and be learnable by the species.
pub fn build_member(
    catalog: &dyn Catalog,
    spec: &MemberSpec,
    slot: usize,
) -> BattleResult<PokemonInst> {
    let species = catalog.require_species(&spec.species)?;

    let move_ids: Vec<String> = if spec.moves.is_empty() {
        species.moves.clone()
    } else {
        spec.moves.clone()
    };
    let mut moves = Vec::with_capacity(move_ids.len());
    for move_id in &move_ids {
        if !species.can_learn(move_id) {
            return Err(CatalogError::MoveNotLearnable {
                species: species.id.clone(),
                move_id: move_id.clone(),
            }
            .into());
        }
        moves.push(catalog.require_move(move_id)?.clone());
    }

    let nature = match &spec.nature {
        Some(id) => catalog.require_nature(id)?,
        None => random_nature(),
    };
    let ivs = spec.ivs.map(Ivs::new).unwrap_or_default();
    let evs = match spec.evs {
        Some(values) => Evs::new(values)?,
        None => Evs::default(),
    };
    let id = spec
        .id
        .clone()
        .unwrap_or_else(|| format!("{}-{}", spec.species, slot + 1));

    let mut member = PokemonInst::from_species(
        id,
        species,
        spec.level,
        ivs,
        evs,
        nature,
        moves,
    )?;
    if let Some(ability) = &spec.ability {
        member.set_ability(Some(ability.clone()));
    }
    if let Some(item_id) = &spec.item {
        member.set_held_item(Some(catalog.require_item(item_id)?.clone()));
    }
    Ok(member)
}

/// Resolve a whole roster in order. Fails on the first invalid member.
pub fn build_team(catalog: &dyn Catalog, specs: &[MemberSpec]) -> BattleResult<Vec<PokemonInst>> {
    specs
        .iter()
        .enumerate()
        .map(|(slot, spec)| build_member(catalog, spec, slot))
        .collect()
}

fn random_nature() -> Nature {
    let natures = Nature::all();
    let index = rand::rng().random_range(0..natures.len());
    natures[index]
}
