use crate::errors::{BattleResult, BattleStateError};
use crate::pokemon::PokemonInst;
use schema::{MoveData, StatusCondition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle of a battle. Transitions only move forward; once `Concluded`,
/// every mutating operation is rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    Initializing,
    InProgress,
    Concluded,
}

/// Everything observable that happened while resolving a turn. The transport
/// layer narrates battles from these rather than from engine internals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    TurnStarted {
        turn_number: u32,
    },
    CreatureSwitched {
        side: usize,
        incoming: String,
    },
    MoveUsed {
        side: usize,
        creature: String,
        move_id: String,
    },
    MoveMissed {
        attacker: String,
        move_id: String,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: String,
        amount: u32,
        remaining_hp: u32,
    },
    StatusApplied {
        target: String,
        status: StatusCondition,
    },
    StatusDamage {
        target: String,
        status: StatusCondition,
        amount: u32,
    },
    ItemRecoil {
        holder: String,
        amount: u32,
    },
    ItemHeal {
        holder: String,
        amount: u32,
    },
    CreatureFainted {
        side: usize,
        creature: String,
    },
    TeamDefeated {
        side: usize,
    },
    BattleEnded {
        /// Winning side, or None for a double knockout.
        winner: Option<usize>,
    },
    TurnEnded,
}

/// Ordered collection of battle events produced by one engine call.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Injectable randomness for turn resolution.
///
/// Outcomes are pre-drawn values in 1..=100; tests supply a fixed script so
/// every damage roll and accuracy check is reproducible bit-for-bit.
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        // Pre-draw enough values for any single turn.
        let outcomes: Vec<u8> = (0..64).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    /// Next raw outcome in 1..=100. Exhausting the script is an internal
    /// fault; the engine never draws more values than a turn can consume.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            panic!("TurnRng ran out of outcomes while drawing for: {}", reason);
        }
        let outcome = self.outcomes[self.index];
        self.index += 1;
        outcome
    }

    /// Damage spread factor in [0.85, 1.00]. Outcome 1 maps to exactly 0.85
    /// and outcome 100 to exactly 1.00, so a scripted 100 pins the factor.
    pub fn damage_factor(&mut self, reason: &str) -> f64 {
        let outcome = self.next_outcome(reason);
        0.85 + 0.15 * ((outcome - 1) as f64 / 99.0)
    }
}

/// A running battle: two rosters, each side's active creature, and the
/// per-turn selection bookkeeping, including choice locks.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Battle {
    pub battle_id: String,
    teams: [Vec<PokemonInst>; 2],
    /// Index of each side's active creature within its roster.
    active: [usize; 2],
    phase: BattlePhase,
    turn_number: u32,
    /// creature id -> move id, present only while a choice item is held and
    /// a move has been used.
    locked_moves: HashMap<String, String>,
    /// creature id -> committed move for the pending turn. Cleared on every
    /// resolution attempt.
    committed_moves: HashMap<String, MoveData>,
    /// Set when a side's commitment for this turn was a switch-in.
    switch_committed: [bool; 2],
}

impl Battle {
    /// Start a battle from two non-empty rosters. Each side's first living
    /// creature is sent out immediately, so the battle is playable without
    /// an explicit opening switch.
    pub fn new(battle_id: String, team1: Vec<PokemonInst>, team2: Vec<PokemonInst>) -> BattleResult<Self> {
        if team1.is_empty() || team2.is_empty() {
            return Err(BattleStateError::EmptyTeam.into());
        }
        let mut battle = Battle {
            battle_id,
            teams: [team1, team2],
            active: [0; 2],
            phase: BattlePhase::Initializing,
            turn_number: 1,
            locked_moves: HashMap::new(),
            committed_moves: HashMap::new(),
            switch_committed: [false; 2],
        };
        for side in 0..2 {
            let first_living = battle.teams[side]
                .iter()
                .position(|creature| creature.is_alive())
                .ok_or(BattleStateError::NoActiveCreature(side))?;
            battle.active[side] = first_living;
        }
        battle.phase = BattlePhase::InProgress;
        Ok(battle)
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_concluded(&self) -> bool {
        self.phase == BattlePhase::Concluded
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn team(&self, side: usize) -> &[PokemonInst] {
        &self.teams[side]
    }

    pub fn active_creature(&self, side: usize) -> &PokemonInst {
        &self.teams[side][self.active[side]]
    }

    /// The side (0 or 1) whose roster contains the given creature id.
    pub fn side_of(&self, creature_id: &str) -> Option<usize> {
        (0..2).find(|&side| {
            self.teams[side]
                .iter()
                .any(|creature| creature.id() == creature_id)
        })
    }

    pub fn creature(&self, creature_id: &str) -> Option<&PokemonInst> {
        self.teams
            .iter()
            .flatten()
            .find(|creature| creature.id() == creature_id)
    }

    /// The winning side once concluded: None while in progress or on a
    /// double knockout.
    pub fn winner(&self) -> Option<usize> {
        if self.phase != BattlePhase::Concluded {
            return None;
        }
        match (self.is_team_defeated(0), self.is_team_defeated(1)) {
            (true, false) => Some(1),
            (false, true) => Some(0),
            _ => None,
        }
    }

    pub fn is_team_defeated(&self, side: usize) -> bool {
        self.teams[side].iter().all(|creature| creature.is_fainted())
    }

    // --- Crate-internal state transitions used by the engine ---

    pub(crate) fn conclude(&mut self) {
        self.phase = BattlePhase::Concluded;
    }

    pub(crate) fn set_active(&mut self, side: usize, index: usize) {
        self.active[side] = index;
    }

    pub(crate) fn team_mut(&mut self, side: usize) -> &mut Vec<PokemonInst> {
        &mut self.teams[side]
    }

    pub(crate) fn active_creature_mut(&mut self, side: usize) -> &mut PokemonInst {
        let index = self.active[side];
        &mut self.teams[side][index]
    }

    pub(crate) fn locked_move(&self, creature_id: &str) -> Option<&String> {
        self.locked_moves.get(creature_id)
    }

    pub(crate) fn lock_move(&mut self, creature_id: String, move_id: String) {
        self.locked_moves.insert(creature_id, move_id);
    }

    pub(crate) fn clear_lock(&mut self, creature_id: &str) {
        self.locked_moves.remove(creature_id);
    }

    pub(crate) fn committed_move(&self, creature_id: &str) -> Option<&MoveData> {
        self.committed_moves.get(creature_id)
    }

    pub(crate) fn commit_move(&mut self, creature_id: String, move_data: MoveData) {
        self.committed_moves.insert(creature_id, move_data);
    }

    pub(crate) fn switch_committed(&self, side: usize) -> bool {
        self.switch_committed[side]
    }

    pub(crate) fn mark_switch_committed(&mut self, side: usize) {
        self.switch_committed[side] = true;
    }

    /// Drop every pending commitment. Called after each resolution attempt
    /// so stale half-committed state never leaks into the next turn.
    pub(crate) fn clear_commitments(&mut self) {
        self.committed_moves.clear();
        self.switch_committed = [false; 2];
    }

    pub(crate) fn advance_turn(&mut self) {
        self.turn_number = self.turn_number.saturating_add(1);
    }
}
