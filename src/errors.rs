use std::fmt;

/// Main error type for the Pokemon Arena battle engine
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEngineError {
    /// Error related to catalog lookups (species, moves, items, natures)
    Catalog(CatalogError),
    /// Error related to stat configuration (IVs, EVs, levels)
    Stats(StatError),
    /// Error related to invalid battle state
    BattleState(BattleStateError),
    /// Error related to invalid side actions
    Action(ActionError),
}

/// Errors related to catalog operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The specified species was not found in the catalog
    SpeciesNotFound(String),
    /// The specified move was not found in the catalog
    MoveNotFound(String),
    /// The specified item was not found in the catalog
    ItemNotFound(String),
    /// The specified nature was not found in the catalog
    NatureNotFound(String),
    /// The species exists but cannot learn the requested move
    MoveNotLearnable { species: String, move_id: String },
    /// Catalog data is malformed or incomplete
    MalformedData(String),
}

/// Errors related to stat configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    /// Total EVs across all stats exceed the aggregate cap of 510
    EvLimitExceeded { total: u16 },
    /// A species record carried fewer than one or more than two types
    InvalidTypeCount(usize),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleStateError {
    /// A mutating operation was attempted on a concluded battle
    BattleConcluded,
    /// A battle was started with an empty team roster
    EmptyTeam,
    /// No active creature is set for the given side
    NoActiveCreature(usize),
    /// The referenced battle does not exist in the registry
    BattleNotFound(String),
}

/// Errors related to side actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The referenced creature is on neither roster
    UnknownCreature(String),
    /// The referenced creature has fainted and cannot act or be sent in
    CreatureFainted(String),
    /// The acting creature is not the active creature for its side
    CreatureNotActive(String),
    /// The requested move is not in the creature's selectable subset
    MoveNotSelectable { creature: String, move_id: String },
    /// A selectable-move index does not point into the known-move list
    MoveIndexOutOfRange { creature: String, index: usize },
    /// No roster slot matches the creature offered for a switch
    NoRosterSlot(String),
}

impl fmt::Display for BattleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEngineError::Catalog(err) => write!(f, "Catalog error: {}", err),
            BattleEngineError::Stats(err) => write!(f, "Stat error: {}", err),
            BattleEngineError::BattleState(err) => write!(f, "Battle state error: {}", err),
            BattleEngineError::Action(err) => write!(f, "Action error: {}", err),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::SpeciesNotFound(id) => write!(f, "Species not found: {}", id),
            CatalogError::MoveNotFound(id) => write!(f, "Move not found: {}", id),
            CatalogError::ItemNotFound(id) => write!(f, "Item not found: {}", id),
            CatalogError::NatureNotFound(id) => write!(f, "Nature not found: {}", id),
            CatalogError::MoveNotLearnable { species, move_id } => {
                write!(f, "Species {} cannot learn move {}", species, move_id)
            }
            CatalogError::MalformedData(details) => write!(f, "Malformed catalog data: {}", details),
        }
    }
}

impl fmt::Display for StatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatError::EvLimitExceeded { total } => {
                write!(f, "Total EVs ({}) exceed the cap of 510", total)
            }
            StatError::InvalidTypeCount(count) => {
                write!(f, "A creature must have 1 or 2 types, got {}", count)
            }
        }
    }
}

impl fmt::Display for BattleStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleStateError::BattleConcluded => write!(f, "Battle has already concluded"),
            BattleStateError::EmptyTeam => {
                write!(f, "Both teams must contain at least one creature")
            }
            BattleStateError::NoActiveCreature(side) => {
                write!(f, "No active creature for side {}", side)
            }
            BattleStateError::BattleNotFound(id) => write!(f, "Battle not found: {}", id),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::UnknownCreature(id) => write!(f, "Unknown creature: {}", id),
            ActionError::CreatureFainted(id) => write!(f, "Creature has fainted: {}", id),
            ActionError::CreatureNotActive(id) => write!(f, "Creature is not active: {}", id),
            ActionError::MoveNotSelectable { creature, move_id } => {
                write!(f, "Move {} is not selectable for {}", move_id, creature)
            }
            ActionError::MoveIndexOutOfRange { creature, index } => {
                write!(f, "Move index {} is out of range for {}", index, creature)
            }
            ActionError::NoRosterSlot(id) => {
                write!(f, "No roster slot matches creature: {}", id)
            }
        }
    }
}

impl std::error::Error for BattleEngineError {}
impl std::error::Error for CatalogError {}
impl std::error::Error for StatError {}
impl std::error::Error for BattleStateError {}
impl std::error::Error for ActionError {}

impl From<CatalogError> for BattleEngineError {
    fn from(err: CatalogError) -> Self {
        BattleEngineError::Catalog(err)
    }
}

impl From<StatError> for BattleEngineError {
    fn from(err: StatError) -> Self {
        BattleEngineError::Stats(err)
    }
}

impl From<BattleStateError> for BattleEngineError {
    fn from(err: BattleStateError) -> Self {
        BattleEngineError::BattleState(err)
    }
}

impl From<ActionError> for BattleEngineError {
    fn from(err: ActionError) -> Self {
        BattleEngineError::Action(err)
    }
}

/// Result alias used throughout the engine
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Result alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
