use crate::battle::engine::{resolve_turn, select_move, switch_pokemon};
use crate::battle::state::{BattleEvent, BattlePhase};
use crate::battle::tests::common::{
    assert_ok, create_team_battle, create_test_battle, max_roll_rng, predictable_rng,
    TestPokemonBuilder,
};
use crate::errors::{ActionError, BattleEngineError, BattleStateError};
use pretty_assertions::assert_eq;
use schema::StatusCondition;

#[test]
fn test_knockout_of_last_creature_concludes_battle() {
    let charizard = TestPokemonBuilder::new("charizard", 50)
        .with_moves(vec!["flamethrower"])
        .build();
    let venusaur = TestPokemonBuilder::new("venusaur", 50)
        .with_moves(vec!["tackle"])
        .with_hp(1)
        .build();
    let mut battle = create_test_battle(charizard, venusaur);

    assert_ok(select_move(&mut battle, "charizard-test", "flamethrower"));
    assert_ok(select_move(&mut battle, "venusaur-test", "tackle"));
    let bus = assert_ok(resolve_turn(&mut battle, max_roll_rng()));

    assert!(bus.events().contains(&BattleEvent::CreatureFainted {
        side: 1,
        creature: "venusaur-test".to_string(),
    }));
    assert!(bus
        .events()
        .contains(&BattleEvent::TeamDefeated { side: 1 }));
    assert!(bus
        .events()
        .contains(&BattleEvent::BattleEnded { winner: Some(0) }));

    // The felled side never got to act.
    assert!(!bus.events().iter().any(|event| matches!(
        event,
        BattleEvent::MoveUsed { creature, .. } if creature == "venusaur-test"
    )));

    assert_eq!(battle.phase(), BattlePhase::Concluded);
    assert_eq!(battle.winner(), Some(0));

    // A concluded battle rejects everything.
    let err = select_move(&mut battle, "charizard-test", "flamethrower").unwrap_err();
    assert!(matches!(
        err,
        BattleEngineError::BattleState(BattleStateError::BattleConcluded)
    ));
    let err = resolve_turn(&mut battle, predictable_rng()).unwrap_err();
    assert!(matches!(
        err,
        BattleEngineError::BattleState(BattleStateError::BattleConcluded)
    ));
}

#[test]
fn test_faint_with_bench_keeps_battle_running() {
    let charizard = TestPokemonBuilder::new("charizard", 50)
        .with_moves(vec!["flamethrower"])
        .build();
    let venusaur = TestPokemonBuilder::new("venusaur", 50)
        .with_id("venu-a")
        .with_moves(vec!["tackle"])
        .with_hp(1)
        .build();
    let blastoise = TestPokemonBuilder::new("blastoise", 50)
        .with_id("blast-a")
        .with_moves(vec!["surf"])
        .build();
    let mut battle = create_team_battle(vec![charizard], vec![venusaur, blastoise]);

    assert_ok(select_move(&mut battle, "charizard-test", "flamethrower"));
    assert_ok(select_move(&mut battle, "venu-a", "tackle"));
    let bus = assert_ok(resolve_turn(&mut battle, max_roll_rng()));

    assert!(bus.events().contains(&BattleEvent::CreatureFainted {
        side: 1,
        creature: "venu-a".to_string(),
    }));
    assert!(!bus
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::BattleEnded { .. })));
    assert_eq!(battle.phase(), BattlePhase::InProgress);

    // The fainted active cannot be given a move; a switch is required.
    let err = select_move(&mut battle, "venu-a", "tackle").unwrap_err();
    assert!(matches!(
        err,
        BattleEngineError::Action(ActionError::CreatureFainted(_))
    ));

    let replacement = TestPokemonBuilder::new("blastoise", 50)
        .with_id("blast-a")
        .with_moves(vec!["surf"])
        .build();
    assert_ok(switch_pokemon(&mut battle, replacement, 1));
    assert_eq!(battle.active_creature(1).id(), "blast-a");

    assert_ok(select_move(&mut battle, "charizard-test", "flamethrower"));
    let bus = assert_ok(resolve_turn(&mut battle, predictable_rng()));
    assert!(!bus.is_empty());
}

#[test]
fn test_recoil_self_knockout_ends_battle() {
    let pikachu = TestPokemonBuilder::new("pikachu", 50)
        .with_moves(vec!["thunderbolt"])
        .with_item("life-orb")
        .with_hp(5)
        .build();
    let snorlax = TestPokemonBuilder::new("snorlax", 50)
        .with_moves(vec!["tackle"])
        .build();
    let mut battle = create_test_battle(pikachu, snorlax);

    assert_ok(select_move(&mut battle, "pikachu-test", "thunderbolt"));
    assert_ok(select_move(&mut battle, "snorlax-test", "tackle"));
    let bus = assert_ok(resolve_turn(&mut battle, max_roll_rng()));

    // Life Orb recoil is a tenth of max HP, more than the 5 HP left.
    assert!(bus.events().iter().any(|event| matches!(
        event,
        BattleEvent::ItemRecoil { holder, amount: 11 } if holder == "pikachu-test"
    )));
    assert!(bus.events().contains(&BattleEvent::CreatureFainted {
        side: 0,
        creature: "pikachu-test".to_string(),
    }));
    assert!(bus
        .events()
        .contains(&BattleEvent::BattleEnded { winner: Some(1) }));

    // Snorlax never needed to act.
    assert!(!bus.events().iter().any(|event| matches!(
        event,
        BattleEvent::MoveUsed { creature, .. } if creature == "snorlax-test"
    )));
}

#[test]
fn test_double_knockout_is_a_draw() {
    let pikachu = TestPokemonBuilder::new("pikachu", 50)
        .with_moves(vec!["thunder-wave"])
        .with_status(StatusCondition::Burn)
        .with_hp(1)
        .build();
    let gengar = TestPokemonBuilder::new("gengar", 50)
        .with_moves(vec!["will-o-wisp"])
        .with_status(StatusCondition::Burn)
        .with_hp(1)
        .build();
    let mut battle = create_test_battle(pikachu, gengar);

    assert_ok(select_move(&mut battle, "pikachu-test", "thunder-wave"));
    assert_ok(select_move(&mut battle, "gengar-test", "will-o-wisp"));

    // Neither status lands on an already-burned target; both sides then
    // faint to their own burn at end of turn.
    let bus = assert_ok(resolve_turn(&mut battle, predictable_rng()));

    assert!(bus.events().contains(&BattleEvent::TeamDefeated { side: 0 }));
    assert!(bus.events().contains(&BattleEvent::TeamDefeated { side: 1 }));
    assert!(bus
        .events()
        .contains(&BattleEvent::BattleEnded { winner: None }));
    assert_eq!(battle.winner(), None);
    assert!(battle.is_concluded());
}
