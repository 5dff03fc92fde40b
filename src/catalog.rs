//! Read-only catalog of species, moves, items, and natures.
//!
//! The catalog is an explicit capability rather than ambient global state:
//! the service receives a `Catalog` implementation at construction time and
//! the engine treats every record it hands out as immutable. A catalog
//! whose backing source is still being populated reports
//! `Readiness::Partial` so callers can distinguish "not found" from "not
//! loaded yet".

use crate::errors::{CatalogError, CatalogResult};
use schema::{ItemData, MoveData, Nature, SpeciesData};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Population state of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    /// Every record the catalog will ever serve is present.
    Ready,
    /// Lookups may miss records that a fully-populated catalog would have.
    Partial,
}

/// Read-only lookup interface the engine and service are built against.
pub trait Catalog: Send + Sync {
    fn readiness(&self) -> Readiness;

    fn species(&self, id: &str) -> Option<&SpeciesData>;
    fn move_data(&self, id: &str) -> Option<&MoveData>;
    fn item(&self, id: &str) -> Option<&ItemData>;

    fn all_species(&self) -> Vec<&SpeciesData>;
    fn all_moves(&self) -> Vec<&MoveData>;
    fn all_items(&self) -> Vec<&ItemData>;

    /// Natures are a closed set; catalogs only translate identifiers.
    fn nature(&self, id: &str) -> Option<Nature> {
        Nature::from_id(id)
    }

    fn all_natures(&self) -> Vec<Nature> {
        Nature::all()
    }

    fn require_species(&self, id: &str) -> CatalogResult<&SpeciesData> {
        self.species(id)
            .ok_or_else(|| CatalogError::SpeciesNotFound(id.to_string()))
    }

    fn require_move(&self, id: &str) -> CatalogResult<&MoveData> {
        self.move_data(id)
            .ok_or_else(|| CatalogError::MoveNotFound(id.to_string()))
    }

    fn require_item(&self, id: &str) -> CatalogResult<&ItemData> {
        self.item(id)
            .ok_or_else(|| CatalogError::ItemNotFound(id.to_string()))
    }

    fn require_nature(&self, id: &str) -> CatalogResult<Nature> {
        self.nature(id)
            .ok_or_else(|| CatalogError::NatureNotFound(id.to_string()))
    }
}

/// On-disk/bundled catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    species: Vec<SpeciesData>,
    #[serde(default)]
    moves: Vec<MoveData>,
    #[serde(default)]
    items: Vec<ItemData>,
}

/// In-memory catalog backed by hash maps. The default data set ships with
/// the crate as RON; callers with their own data can build one by hand.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    species: HashMap<String, SpeciesData>,
    moves: HashMap<String, MoveData>,
    items: HashMap<String, ItemData>,
    partial: bool,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a RON catalog document.
    pub fn from_ron_str(source: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = ron::from_str(source)
            .map_err(|err| CatalogError::MalformedData(err.to_string()))?;
        let mut catalog = StaticCatalog::new();
        for species in document.species {
            catalog.add_species(species);
        }
        for move_data in document.moves {
            catalog.add_move(move_data);
        }
        for item in document.items {
            catalog.add_item(item);
        }
        Ok(catalog)
    }

    /// The demo data set bundled with the crate.
    pub fn bundled() -> CatalogResult<Self> {
        Self::from_ron_str(include_str!("../data/catalog.ron"))
    }

    pub fn add_species(&mut self, species: SpeciesData) {
        self.species.insert(species.id.clone(), species);
    }

    pub fn add_move(&mut self, move_data: MoveData) {
        self.moves.insert(move_data.id.clone(), move_data);
    }

    pub fn add_item(&mut self, item: ItemData) {
        self.items.insert(item.id.clone(), item);
    }

    /// Mark this catalog as still being populated.
    pub fn mark_partial(&mut self) {
        self.partial = true;
    }
}

impl Catalog for StaticCatalog {
    fn readiness(&self) -> Readiness {
        if self.partial {
            Readiness::Partial
        } else {
            Readiness::Ready
        }
    }

    fn species(&self, id: &str) -> Option<&SpeciesData> {
        self.species.get(id)
    }

    fn move_data(&self, id: &str) -> Option<&MoveData> {
        self.moves.get(id)
    }

    fn item(&self, id: &str) -> Option<&ItemData> {
        self.items.get(id)
    }

    fn all_species(&self) -> Vec<&SpeciesData> {
        let mut all: Vec<&SpeciesData> = self.species.values().collect();
        all.sort_by(|a, b| a.pokedex_number.cmp(&b.pokedex_number));
        all
    }

    fn all_moves(&self) -> Vec<&MoveData> {
        let mut all: Vec<&MoveData> = self.moves.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    fn all_items(&self) -> Vec<&ItemData> {
        let mut all: Vec<&ItemData> = self.items.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}
