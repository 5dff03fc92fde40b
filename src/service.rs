//! In-memory battle registry consumed by a transport layer.
//!
//! Each battle lives behind its own mutex, so operations on different
//! battles never contend. The registry lock is held only long enough to
//! find or insert a handle; turn resolution observes both sides' commits
//! under a single acquisition of the battle lock.

use crate::battle::engine;
use crate::battle::state::{Battle, BattleEvent, BattlePhase, TurnRng};
use crate::catalog::Catalog;
use crate::errors::{BattleResult, BattleStateError};
use crate::pokemon::PokemonInst;
use crate::teams::{build_member, build_team, MemberSpec};
use schema::{PokemonType, StatusCondition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// Transport-facing view of one creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: String,
    pub name: String,
    pub level: u8,
    pub current_hp: u32,
    pub max_hp: u32,
    pub status: Option<StatusCondition>,
    pub active: bool,
}

/// Transport-facing view of a whole battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub battle_id: String,
    pub phase: BattlePhase,
    pub turn_number: u32,
    pub teams: [Vec<CreatureSnapshot>; 2],
    pub winner: Option<usize>,
}

/// Stateful battle registry. Cheap to share: clone the `Arc` it is
/// constructed into, or wrap it yourself.
pub struct BattleService {
    catalog: Arc<dyn Catalog>,
    battles: Mutex<HashMap<String, Arc<Mutex<Battle>>>>,
}

impl BattleService {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            battles: Mutex::new(HashMap::new()),
        }
    }

    /// Build both rosters from the catalog and register a new battle.
    /// Returns the generated battle id.
    pub fn start_battle(
        &self,
        team1: &[MemberSpec],
        team2: &[MemberSpec],
    ) -> BattleResult<String> {
        let roster1 = build_team(self.catalog.as_ref(), team1)?;
        let roster2 = build_team(self.catalog.as_ref(), team2)?;
        let battle_id = Uuid::new_v4().to_string();
        let battle = Battle::new(battle_id.clone(), roster1, roster2)?;

        log::info!(
            "battle {} started: {} vs {}",
            battle_id,
            battle.active_creature(0).name,
            battle.active_creature(1).name
        );
        self.lock_registry()
            .insert(battle_id.clone(), Arc::new(Mutex::new(battle)));
        Ok(battle_id)
    }

    /// Record a move selection for the pending turn.
    pub fn select_move(
        &self,
        battle_id: &str,
        creature_id: &str,
        move_id: &str,
    ) -> BattleResult<()> {
        let handle = self.find_battle(battle_id)?;
        let mut battle = lock_battle(&handle);
        log::debug!("battle {}: {} selects {}", battle_id, creature_id, move_id);
        engine::select_move(&mut battle, creature_id, move_id)
    }

    /// Send a creature in for the given side. The spec's id (explicit or
    /// defaulted) must match a roster slot.
    pub fn switch_creature(
        &self,
        battle_id: &str,
        spec: &MemberSpec,
        side: usize,
    ) -> BattleResult<Vec<BattleEvent>> {
        let incoming: PokemonInst = build_member(self.catalog.as_ref(), spec, 0)?;
        let handle = self.find_battle(battle_id)?;
        let mut battle = lock_battle(&handle);
        log::debug!(
            "battle {}: side {} switches to {}",
            battle_id,
            side,
            incoming.id()
        );
        let bus = engine::switch_pokemon(&mut battle, incoming, side)?;
        Ok(bus.events().to_vec())
    }

    /// Resolve the pending turn with fresh randomness. An empty event list
    /// means one side had not committed yet (partial selections are
    /// dropped, as the engine does).
    pub fn process_turn(&self, battle_id: &str) -> BattleResult<Vec<BattleEvent>> {
        let handle = self.find_battle(battle_id)?;
        let mut battle = lock_battle(&handle);
        let bus = engine::resolve_turn(&mut battle, TurnRng::new_random())?;
        if battle.is_concluded() {
            log::info!("battle {} ended, winner: {:?}", battle_id, battle.winner());
        }
        Ok(bus.events().to_vec())
    }

    /// Current state of a battle, shaped for serialization.
    pub fn snapshot(&self, battle_id: &str) -> BattleResult<BattleSnapshot> {
        let handle = self.find_battle(battle_id)?;
        let battle = lock_battle(&handle);

        let teams = [0, 1].map(|side| {
            let active_id = battle.active_creature(side).id().to_string();
            battle
                .team(side)
                .iter()
                .map(|creature| CreatureSnapshot {
                    id: creature.id().to_string(),
                    name: creature.name.clone(),
                    level: creature.level(),
                    current_hp: creature.current_hp(),
                    max_hp: creature.max_hp(),
                    status: creature.status,
                    active: creature.id() == active_id,
                })
                .collect()
        });

        Ok(BattleSnapshot {
            battle_id: battle.battle_id.clone(),
            phase: battle.phase(),
            turn_number: battle.turn_number(),
            teams,
            winner: battle.winner(),
        })
    }

    /// Drop a finished (or abandoned) battle from the registry.
    pub fn remove_battle(&self, battle_id: &str) -> BattleResult<()> {
        self.lock_registry()
            .remove(battle_id)
            .map(|_| ())
            .ok_or_else(|| BattleStateError::BattleNotFound(battle_id.to_string()).into())
    }

    pub fn battle_count(&self) -> usize {
        self.lock_registry().len()
    }

    /// Stateless chart lookup for clients that want to preview matchups.
    pub fn type_effectiveness(attacking: PokemonType, defending: &[PokemonType]) -> f64 {
        PokemonType::effectiveness_against(attacking, defending)
    }

    fn find_battle(&self, battle_id: &str) -> BattleResult<Arc<Mutex<Battle>>> {
        self.lock_registry()
            .get(battle_id)
            .cloned()
            .ok_or_else(|| BattleStateError::BattleNotFound(battle_id.to_string()).into())
    }

    fn lock_registry(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Mutex<Battle>>>> {
        self.battles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn lock_battle(handle: &Arc<Mutex<Battle>>) -> std::sync::MutexGuard<'_, Battle> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::errors::BattleEngineError;
    use std::thread;

    fn service() -> BattleService {
        BattleService::new(Arc::new(StaticCatalog::bundled().unwrap()))
    }

    fn pikachu_spec(id: &str) -> MemberSpec {
        let mut spec = MemberSpec::new("pikachu", 50);
        spec.id = Some(id.to_string());
        spec.nature = Some("hardy".to_string());
        spec.moves = vec!["tackle".to_string(), "thunderbolt".to_string()];
        spec
    }

    fn snorlax_spec(id: &str) -> MemberSpec {
        let mut spec = MemberSpec::new("snorlax", 50);
        spec.id = Some(id.to_string());
        spec.nature = Some("hardy".to_string());
        spec.moves = vec!["tackle".to_string(), "body-slam".to_string()];
        spec
    }

    #[test]
    fn test_full_battle_round_trip() {
        let service = service();
        let battle_id = service
            .start_battle(&[pikachu_spec("pika")], &[snorlax_spec("lax")])
            .unwrap();

        let snapshot = service.snapshot(&battle_id).unwrap();
        assert_eq!(snapshot.phase, BattlePhase::InProgress);
        assert_eq!(snapshot.turn_number, 1);
        assert!(snapshot.teams[0][0].active);

        service.select_move(&battle_id, "pika", "thunderbolt").unwrap();
        service.select_move(&battle_id, "lax", "tackle").unwrap();
        let events = service.process_turn(&battle_id).unwrap();
        assert!(!events.is_empty());

        let snapshot = service.snapshot(&battle_id).unwrap();
        assert_eq!(snapshot.turn_number, 2);
        // Both sides took a hit (Thunderbolt cannot miss, Tackle either).
        assert!(snapshot.teams[1][0].current_hp < snapshot.teams[1][0].max_hp);
    }

    #[test]
    fn test_partial_commit_resolves_to_nothing() {
        let service = service();
        let battle_id = service
            .start_battle(&[pikachu_spec("pika")], &[snorlax_spec("lax")])
            .unwrap();

        service.select_move(&battle_id, "pika", "tackle").unwrap();
        let events = service.process_turn(&battle_id).unwrap();
        assert!(events.is_empty());
        assert_eq!(service.snapshot(&battle_id).unwrap().turn_number, 1);
    }

    #[test]
    fn test_unknown_battle_is_reported() {
        let service = service();
        let err = service.snapshot("no-such-battle").unwrap_err();
        assert!(matches!(
            err,
            BattleEngineError::BattleState(BattleStateError::BattleNotFound(_))
        ));
    }

    #[test]
    fn test_switch_through_service() {
        let service = service();
        let mut bench = snorlax_spec("lax-b");
        let battle_id = service
            .start_battle(
                &[pikachu_spec("pika")],
                &[snorlax_spec("lax-a"), bench.clone()],
            )
            .unwrap();

        bench.item = Some("leftovers".to_string());
        let events = service.switch_creature(&battle_id, &bench, 1).unwrap();
        assert_eq!(
            events,
            vec![BattleEvent::CreatureSwitched {
                side: 1,
                incoming: "lax-b".to_string(),
            }]
        );

        let snapshot = service.snapshot(&battle_id).unwrap();
        let active: Vec<&CreatureSnapshot> = snapshot.teams[1]
            .iter()
            .filter(|creature| creature.active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "lax-b");
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let service = service();
        let battle_id = service
            .start_battle(&[pikachu_spec("pika")], &[snorlax_spec("lax")])
            .unwrap();

        let snapshot = service.snapshot(&battle_id).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: BattleSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert!(json.contains("\"pika\""));
    }

    #[test]
    fn test_remove_battle() {
        let service = service();
        let battle_id = service
            .start_battle(&[pikachu_spec("pika")], &[snorlax_spec("lax")])
            .unwrap();
        assert_eq!(service.battle_count(), 1);
        service.remove_battle(&battle_id).unwrap();
        assert_eq!(service.battle_count(), 0);
        assert!(service.remove_battle(&battle_id).is_err());
    }

    #[test]
    fn test_parallel_selections_never_lose_a_commit() {
        let service = Arc::new(service());
        let battle_id = service
            .start_battle(&[pikachu_spec("pika")], &[snorlax_spec("lax")])
            .unwrap();

        let handles: Vec<_> = [("pika", "tackle"), ("lax", "body-slam")]
            .into_iter()
            .map(|(creature, move_id)| {
                let service = Arc::clone(&service);
                let battle_id = battle_id.clone();
                thread::spawn(move || service.select_move(&battle_id, creature, move_id).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let events = service.process_turn(&battle_id).unwrap();
        let movers: Vec<&str> = events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::MoveUsed { creature, .. } => Some(creature.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(movers.len(), 2);
        assert!(movers.contains(&"pika"));
        assert!(movers.contains(&"lax"));
    }
}
