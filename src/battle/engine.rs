use crate::battle::state::{Battle, BattleEvent, EventBus, TurnRng};
use crate::battle::stats::{effective_attack, effective_defense, effective_speed};
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::pokemon::PokemonInst;
use schema::{MoveData, PokemonType};

/// Record a side's move selection for the pending turn, applying choice-lock
/// semantics.
///
/// If the creature holds a choice item: the first selected move becomes its
/// lock, and any later request for a different move is silently substituted
/// with the locked move. The client is told nothing; the commitment just
/// stays on the locked move. If the locked move is no longer in the
/// selectable subset, the requested move is committed instead. Creatures
/// without a choice item get any stale lock cleared.
pub fn select_move(battle: &mut Battle, creature_id: &str, move_id: &str) -> BattleResult<()> {
    if battle.is_concluded() {
        return Err(BattleStateError::BattleConcluded.into());
    }
    let side = battle
        .side_of(creature_id)
        .ok_or_else(|| ActionError::UnknownCreature(creature_id.to_string()))?;

    let (requested, choice_locked, locked_substitute) = {
        let creature = battle
            .creature(creature_id)
            .ok_or_else(|| ActionError::UnknownCreature(creature_id.to_string()))?;
        if creature.is_fainted() {
            return Err(ActionError::CreatureFainted(creature_id.to_string()).into());
        }
        if battle.active_creature(side).id() != creature_id {
            return Err(ActionError::CreatureNotActive(creature_id.to_string()).into());
        }
        let requested = creature.selectable_move(move_id).cloned().ok_or_else(|| {
            ActionError::MoveNotSelectable {
                creature: creature_id.to_string(),
                move_id: move_id.to_string(),
            }
        })?;
        let choice_locked = creature
            .held_item()
            .map(|item| item.effects.choice_lock)
            .unwrap_or(false);
        let locked_substitute = battle
            .locked_move(creature_id)
            .filter(|locked| locked.as_str() != move_id)
            .and_then(|locked| creature.selectable_move(locked))
            .cloned();
        (requested, choice_locked, locked_substitute)
    };

    let committed = if choice_locked {
        match battle.locked_move(creature_id).cloned() {
            None => {
                battle.lock_move(creature_id.to_string(), move_id.to_string());
                requested
            }
            Some(locked) if locked == move_id => requested,
            // A different move is locked in: substitute it, falling back to
            // the request if the lock points at nothing selectable.
            Some(_) => locked_substitute.unwrap_or(requested),
        }
    } else {
        battle.clear_lock(creature_id);
        requested
    };

    battle.commit_move(creature_id.to_string(), committed);
    Ok(())
}

/// Send a creature in for the given side (0 = team 1, 1 = team 2).
///
/// The incoming instance replaces the roster slot whose id matches it, so a
/// client may hand back a reconfigured copy (new held item, nature, ...) of
/// a benched creature. Rejected when no slot matches or the occupant has
/// fainted. A fresh switch-in is never pre-locked, and the switch counts as
/// this side's committed action for turn readiness.
pub fn switch_pokemon(
    battle: &mut Battle,
    new_creature: PokemonInst,
    side: usize,
) -> BattleResult<EventBus> {
    if battle.is_concluded() {
        return Err(BattleStateError::BattleConcluded.into());
    }
    let slot = battle
        .team(side)
        .iter()
        .position(|creature| creature.id() == new_creature.id())
        .ok_or_else(|| ActionError::NoRosterSlot(new_creature.id().to_string()))?;
    if !battle.team(side)[slot].is_alive() {
        return Err(ActionError::CreatureFainted(new_creature.id().to_string()).into());
    }

    let incoming = new_creature.id().to_string();
    battle.team_mut(side)[slot] = new_creature;
    battle.set_active(side, slot);
    battle.clear_lock(&incoming);
    battle.mark_switch_committed(side);

    let mut bus = EventBus::new();
    bus.push(BattleEvent::CreatureSwitched { side, incoming });
    Ok(bus)
}

/// True once both sides have committed an action (a move for the current
/// active creature, or a switch-in) for the pending turn.
pub fn ready_for_turn_resolution(battle: &Battle) -> bool {
    (0..2).all(|side| {
        battle.switch_committed(side)
            || battle
                .committed_move(battle.active_creature(side).id())
                .is_some()
    })
}

/// Resolve one turn.
///
/// When either side has not committed, this is a no-op that clears any
/// partial selections (so stale half-committed state never carries over)
/// and returns an empty event bus. Otherwise actions run in speed order,
/// with ties going to team 1, and the second action is skipped if the
/// first one concludes the battle.
pub fn resolve_turn(battle: &mut Battle, mut rng: TurnRng) -> BattleResult<EventBus> {
    if battle.is_concluded() {
        return Err(BattleStateError::BattleConcluded.into());
    }
    let mut bus = EventBus::new();
    if !ready_for_turn_resolution(battle) {
        battle.clear_commitments();
        return Ok(bus);
    }

    bus.push(BattleEvent::TurnStarted {
        turn_number: battle.turn_number(),
    });

    let pending: [Option<MoveData>; 2] = [0, 1].map(|side| {
        battle
            .committed_move(battle.active_creature(side).id())
            .cloned()
    });

    for side in determine_action_order(battle) {
        if battle.is_concluded() {
            break;
        }
        if let Some(move_data) = &pending[side] {
            execute_attack(battle, side, move_data, &mut rng, &mut bus);
            evaluate_battle_end(battle, &mut bus);
        }
    }

    if !battle.is_concluded() {
        execute_end_of_turn(battle, &mut bus);
        evaluate_battle_end(battle, &mut bus);
    }

    battle.clear_commitments();
    battle.advance_turn();
    bus.push(BattleEvent::TurnEnded);
    Ok(bus)
}

/// Sides in the order they act this turn: higher effective speed first,
/// team 1 on ties.
fn determine_action_order(battle: &Battle) -> [usize; 2] {
    let speed_1 = effective_speed(battle.active_creature(0));
    let speed_2 = effective_speed(battle.active_creature(1));
    if speed_1 >= speed_2 {
        [0, 1]
    } else {
        [1, 0]
    }
}

fn execute_attack(
    battle: &mut Battle,
    side: usize,
    move_data: &MoveData,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_side = 1 - side;
    // An attacker knocked out earlier in the turn loses its action; a felled
    // defender can no longer be targeted.
    if !battle.active_creature(side).is_alive() || !battle.active_creature(defender_side).is_alive()
    {
        return;
    }

    let attacker_id = battle.active_creature(side).id().to_string();
    bus.push(BattleEvent::MoveUsed {
        side,
        creature: attacker_id.clone(),
        move_id: move_data.id.clone(),
    });

    let accuracy_roll = rng.next_outcome("accuracy check");
    if accuracy_roll > move_data.accuracy {
        bus.push(BattleEvent::MoveMissed {
            attacker: attacker_id,
            move_id: move_data.id.clone(),
        });
        return;
    }

    if move_data.is_damaging() {
        apply_damaging_move(battle, side, move_data, rng, bus);
    } else {
        apply_status_move(battle, defender_side, move_data, bus);
    }
}

fn apply_status_move(
    battle: &mut Battle,
    defender_side: usize,
    move_data: &MoveData,
    bus: &mut EventBus,
) {
    let Some(status) = move_data.status_effect else {
        return;
    };
    let defender = battle.active_creature_mut(defender_side);
    // Non-volatile statuses do not stack or overwrite.
    if defender.status.is_none() {
        defender.status = Some(status);
        bus.push(BattleEvent::StatusApplied {
            target: defender.id().to_string(),
            status,
        });
    }
}

fn apply_damaging_move(
    battle: &mut Battle,
    side: usize,
    move_data: &MoveData,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_side = 1 - side;
    let attacker = battle.active_creature(side);
    let defender = battle.active_creature(defender_side);

    let effectiveness =
        PokemonType::effectiveness_against(move_data.move_type, defender.types());
    if effectiveness == 0.0 {
        bus.push(BattleEvent::AttackTypeEffectiveness { multiplier: 0.0 });
        return;
    }

    let base_damage = calculate_base_damage(attacker, defender, move_data);
    let item_multiplier = attacker
        .held_item()
        .map(|item| {
            item.effects.power_multiplier(
                move_data.category,
                move_data.move_type,
                effectiveness > 1.0,
            )
        })
        .unwrap_or(1.0);
    let factor = rng.damage_factor("damage roll");
    let damage =
        (base_damage as f64 * effectiveness * item_multiplier * factor).round() as u32;

    if effectiveness != 1.0 {
        bus.push(BattleEvent::AttackTypeEffectiveness {
            multiplier: effectiveness,
        });
    }

    let defender_id = battle.active_creature(defender_side).id().to_string();
    let recoil = battle
        .active_creature(side)
        .held_item()
        .and_then(|item| item.effects.recoil_fraction);

    let defender = battle.active_creature_mut(defender_side);
    defender.take_damage(damage);
    bus.push(BattleEvent::DamageDealt {
        target: defender_id.clone(),
        amount: damage,
        remaining_hp: defender.current_hp(),
    });
    if defender.is_fainted() {
        bus.push(BattleEvent::CreatureFainted {
            side: defender_side,
            creature: defender_id,
        });
    }

    // Recoil items bite their holder after every damaging hit.
    if damage > 0 {
        if let Some(fraction) = recoil {
            let attacker = battle.active_creature_mut(side);
            let recoil_damage = ((attacker.max_hp() as f64 * fraction).round() as u32).max(1);
            attacker.take_damage(recoil_damage);
            let holder = attacker.id().to_string();
            let fainted = attacker.is_fainted();
            bus.push(BattleEvent::ItemRecoil {
                holder: holder.clone(),
                amount: recoil_damage,
            });
            if fainted {
                bus.push(BattleEvent::CreatureFainted {
                    side,
                    creature: holder,
                });
            }
        }
    }
}

/// Classic base damage: `floor((((2*L/5 + 2) * attack * power) / defense) / 50) + 2`,
/// with L the attacker's current level.
fn calculate_base_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
) -> u32 {
    let attack_stat = effective_attack(attacker, move_data).max(1);
    let defense_stat = effective_defense(defender, move_data).max(1);
    let level_term = 2 * attacker.level() as u32 / 5 + 2;
    (level_term * attack_stat * move_data.power / defense_stat) / 50 + 2
}

/// End-of-turn residuals for both active creatures: status damage first
/// (burn 1/16, poison 1/8 of max HP), then held-item healing.
fn execute_end_of_turn(battle: &mut Battle, bus: &mut EventBus) {
    use schema::StatusCondition;

    for side in 0..2 {
        let creature = battle.active_creature_mut(side);
        if !creature.is_alive() {
            continue;
        }

        if let Some(status) = creature.status {
            let residual = match status {
                StatusCondition::Burn => Some(creature.max_hp() / 16),
                StatusCondition::Poison => Some(creature.max_hp() / 8),
                _ => None,
            };
            if let Some(amount) = residual {
                let amount = amount.max(1);
                creature.take_damage(amount);
                let target = creature.id().to_string();
                let fainted = creature.is_fainted();
                bus.push(BattleEvent::StatusDamage {
                    target: target.clone(),
                    status,
                    amount,
                });
                if fainted {
                    bus.push(BattleEvent::CreatureFainted {
                        side,
                        creature: target,
                    });
                    continue;
                }
            }
        }

        let creature = battle.active_creature_mut(side);
        let heal_fraction = creature
            .held_item()
            .and_then(|item| item.effects.end_of_turn_heal_fraction);
        if let Some(fraction) = heal_fraction {
            let max_hp = creature.max_hp();
            let missing = max_hp.saturating_sub(creature.current_hp());
            let amount = (((max_hp as f64 * fraction).round() as u32).max(1)).min(missing);
            if amount > 0 {
                creature.heal(amount);
                bus.push(BattleEvent::ItemHeal {
                    holder: creature.id().to_string(),
                    amount,
                });
            }
        }
    }
}

/// Conclude the battle if either roster is wiped out. A double knockout is
/// a draw (no winner). Safe to call repeatedly; only the transition emits
/// events.
pub fn evaluate_battle_end(battle: &mut Battle, bus: &mut EventBus) -> bool {
    if battle.is_concluded() {
        return true;
    }
    let defeated = [battle.is_team_defeated(0), battle.is_team_defeated(1)];
    if !defeated[0] && !defeated[1] {
        return false;
    }
    for (side, &down) in defeated.iter().enumerate() {
        if down {
            bus.push(BattleEvent::TeamDefeated { side });
        }
    }
    let winner = match defeated {
        [true, false] => Some(1),
        [false, true] => Some(0),
        _ => None,
    };
    battle.conclude();
    bus.push(BattleEvent::BattleEnded { winner });
    true
}
