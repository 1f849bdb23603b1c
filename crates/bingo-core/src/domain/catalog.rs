//! Golfer catalog: the draftable golfers and their salaries for one tournament.
//!
//! Salaries change every week, so the catalog is data handed to the engine at
//! startup (see the `[[golfers]]` table of the CLI configuration) rather than
//! a compiled-in list.

use std::collections::HashMap;

use thiserror::Error;

use super::board::{name_key, Board, GolferAssignment};

/// Errors raised when building a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("golfer '{0}' is listed more than once")]
    DuplicateGolfer(String),

    #[error("golfer '{0}' must have a salary greater than zero")]
    ZeroSalary(String),

    #[error("catalog entries must have a non-empty name")]
    EmptyName,
}

/// Immutable lookup table of golfers by name.
#[derive(Debug, Clone, Default)]
pub struct GolferCatalog {
    golfers: Vec<GolferAssignment>,
    /// `name_key` → position in `golfers`.
    by_name: HashMap<String, usize>,
}

impl GolferCatalog {
    /// Builds a catalog, preserving the given order for listings.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for blank names, zero salaries, or names that
    /// collide case-insensitively.
    pub fn new(golfers: Vec<GolferAssignment>) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::with_capacity(golfers.len());
        for (position, golfer) in golfers.iter().enumerate() {
            let key = name_key(&golfer.name);
            if key.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if golfer.salary == 0 {
                return Err(CatalogError::ZeroSalary(golfer.name.clone()));
            }
            if by_name.insert(key, position).is_some() {
                return Err(CatalogError::DuplicateGolfer(golfer.name.clone()));
            }
        }
        Ok(Self { golfers, by_name })
    }

    /// Looks up a golfer by name, ignoring case and surrounding whitespace.
    pub fn lookup(&self, name: &str) -> Option<&GolferAssignment> {
        self.by_name
            .get(&name_key(name))
            .map(|&position| &self.golfers[position])
    }

    /// Iterates over every golfer in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &GolferAssignment> {
        self.golfers.iter()
    }

    /// Golfers not yet placed on `board`, in catalog order.
    pub fn available<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = &'a GolferAssignment> {
        self.golfers
            .iter()
            .filter(move |golfer| board.position_of(&golfer.name).is_none())
    }

    pub fn len(&self) -> usize {
        self.golfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.golfers.is_empty()
    }
}
