use crate::pokemon::PokemonInst;
use schema::{MoveCategory, MoveData, StatusCondition};

/// Attack stat used by a move: physical moves read Attack, special moves
/// read Special Attack. Status moves never reach the damage pipeline.
pub fn effective_attack(attacker: &PokemonInst, move_data: &MoveData) -> u32 {
    match move_data.category {
        MoveCategory::Physical => attacker.attack(),
        MoveCategory::Special => attacker.sp_attack(),
        MoveCategory::Status => 0,
    }
}

/// Defense stat targeted by a move, chosen by the same category rule.
pub fn effective_defense(defender: &PokemonInst, move_data: &MoveData) -> u32 {
    match move_data.category {
        MoveCategory::Physical => defender.defense(),
        MoveCategory::Special => defender.sp_defense(),
        MoveCategory::Status => 0,
    }
}

/// Turn-order speed: the computed speed stat, quartered under paralysis.
pub fn effective_speed(creature: &PokemonInst) -> u32 {
    let speed = creature.speed();
    if creature.status == Some(StatusCondition::Paralysis) {
        speed / 4
    } else {
        speed
    }
}
