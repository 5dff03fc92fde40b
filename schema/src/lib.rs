// Pokemon Arena Schema - Shared type definitions
// This crate contains the core enums and data records shared between the
// battle engine, the catalog layer, and any transport frontend: elemental
// types and the effectiveness chart, move and species records, natures,
// and held items.

// Re-export the main types
pub use items::*;
pub use move_types::*;
pub use natures::*;
pub use pokemon_types::*;
pub use species::*;
pub use stat_types::*;

pub mod items;
pub mod move_types;
pub mod natures;
pub mod pokemon_types;
pub mod species;
pub mod stat_types;
