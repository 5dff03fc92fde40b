//! Pokemon Arena Battle Engine
//!
//! A turn-based battle engine with catalog-driven creature data, computed
//! stats, held-item effects, and an in-memory battle service. Randomness is
//! injected per turn, so every resolution is reproducible under test.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod errors;
pub mod pokemon;
pub mod service;
pub mod stats;
pub mod teams;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats,
    ItemData,
    ItemEffects,
    MoveCategory,
    MoveData,
    Nature,
    PokemonType,
    SpeciesData,
    StatType,
    StatusCondition,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::engine::{ready_for_turn_resolution, resolve_turn, select_move, switch_pokemon};
pub use battle::state::{Battle, BattleEvent, BattlePhase, EventBus, TurnRng};

// Creature construction and stat machinery.
pub use pokemon::PokemonInst;
pub use stats::{Evs, Ivs};
pub use teams::{build_team, MemberSpec};

// Data access.
pub use catalog::{Catalog, Readiness, StaticCatalog};

// Transport-facing service.
pub use service::{BattleService, BattleSnapshot, CreatureSnapshot};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, CatalogError, CatalogResult,
    StatError,
};
