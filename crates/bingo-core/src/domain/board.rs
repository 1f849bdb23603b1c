//! The 25-cell board and the golfers placed on it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::CELL_COUNT;

/// Position of a cell on the board, `0..25`, row-major from the top-left.
pub type CellIndex = usize;

/// Canonical form of a golfer name used for every equality check:
/// surrounding whitespace trimmed, lower-cased.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A golfer drafted onto a cell, copied by value from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GolferAssignment {
    pub name: String,
    /// Draft cost charged against the zone budget.  Always greater than zero.
    pub salary: u32,
}

impl GolferAssignment {
    pub fn new(name: impl Into<String>, salary: u32) -> Self {
        Self {
            name: name.into(),
            salary,
        }
    }

    /// Returns `true` if `name` refers to this golfer (case-insensitive).
    pub fn is_named(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }
}

/// Errors raised when building a board from raw cells.
#[derive(Debug, Error, PartialEq)]
pub enum BoardError {
    #[error("a board has exactly 25 cells, got {0}")]
    WrongCellCount(usize),

    #[error("golfer '{0}' appears in more than one cell")]
    DuplicateGolfer(String),

    #[error("golfer '{0}' has a zero salary")]
    ZeroSalary(String),

    #[error("a golfer in cell {0} has a blank name")]
    BlankName(CellIndex),
}

/// A player's board: 25 cells, each empty or holding one golfer.
///
/// `Board` is an immutable value from the rules engine's point of view.  The
/// operations in [`crate::rules`] take a `&Board` and return a new one; the
/// caller owns the "current board" and swaps it on success.
///
/// The set of used golfers is derived from the cells, so a golfer can never be
/// both "used" and absent from the board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Option<GolferAssignment>; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from exactly 25 cells.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::WrongCellCount`] if `cells.len() != 25`,
    /// [`BoardError::DuplicateGolfer`] if a golfer appears twice,
    /// [`BoardError::ZeroSalary`] if any golfer has a zero salary, and
    /// [`BoardError::BlankName`] if any golfer's name is empty or whitespace.
    pub fn from_cells(cells: Vec<Option<GolferAssignment>>) -> Result<Self, BoardError> {
        let count = cells.len();
        let cells: [Option<GolferAssignment>; CELL_COUNT] = cells
            .try_into()
            .map_err(|_| BoardError::WrongCellCount(count))?;

        let mut seen = std::collections::HashSet::new();
        for (index, cell) in cells.iter().enumerate() {
            let Some(golfer) = cell else {
                continue;
            };
            if golfer.name.trim().is_empty() {
                return Err(BoardError::BlankName(index));
            }
            if golfer.salary == 0 {
                return Err(BoardError::ZeroSalary(golfer.name.clone()));
            }
            if !seen.insert(name_key(&golfer.name)) {
                return Err(BoardError::DuplicateGolfer(golfer.name.clone()));
            }
        }

        Ok(Self { cells })
    }

    /// Returns the golfer in `index`, or `None` if the cell is empty or off the board.
    pub fn cell(&self, index: CellIndex) -> Option<&GolferAssignment> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Returns all 25 cells in board order.
    pub fn cells(&self) -> &[Option<GolferAssignment>; CELL_COUNT] {
        &self.cells
    }

    /// Returns `true` if `index` holds a golfer.
    pub fn is_filled(&self, index: CellIndex) -> bool {
        self.cell(index).is_some()
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    pub fn is_full(&self) -> bool {
        self.filled_count() == CELL_COUNT
    }

    /// Returns the cell holding the golfer called `name`, if any.
    pub fn position_of(&self, name: &str) -> Option<CellIndex> {
        self.cells.iter().position(|cell| {
            cell.as_ref()
                .is_some_and(|golfer| golfer.is_named(name))
        })
    }

    /// Names of every golfer on the board, in cell order.
    pub fn used_names(&self) -> Vec<String> {
        self.cells
            .iter()
            .flatten()
            .map(|golfer| golfer.name.clone())
            .collect()
    }

    /// Returns an empty board (full-board clear).
    pub fn cleared(&self) -> Self {
        Self::new()
    }

    /// Returns a copy of this board with `index` replaced.
    ///
    /// Callers are the rules functions, which have already range-checked
    /// `index` and enforced golfer uniqueness.
    pub(crate) fn with_cell(&self, index: CellIndex, value: Option<GolferAssignment>) -> Self {
        let mut next = self.clone();
        next.cells[index] = value;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn golfer(name: &str, salary: u32) -> Option<GolferAssignment> {
        Some(GolferAssignment::new(name, salary))
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.filled_count(), 0);
        assert!(board.used_names().is_empty());
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        let result = Board::from_cells(vec![None; 24]);
        assert_eq!(result, Err(BoardError::WrongCellCount(24)));
    }

    #[test]
    fn test_from_cells_rejects_duplicate_golfer_case_insensitively() {
        let mut cells = vec![None; CELL_COUNT];
        cells[0] = golfer("Rory McIlroy", 13_000);
        cells[9] = golfer("rory mcilroy ", 13_000);

        assert_eq!(
            Board::from_cells(cells),
            Err(BoardError::DuplicateGolfer("rory mcilroy ".to_string()))
        );
    }

    #[test]
    fn test_from_cells_rejects_zero_salary() {
        let mut cells = vec![None; CELL_COUNT];
        cells[3] = golfer("Free Agent", 0);

        assert_eq!(
            Board::from_cells(cells),
            Err(BoardError::ZeroSalary("Free Agent".to_string()))
        );
    }

    #[test]
    fn test_from_cells_rejects_blank_name() {
        let mut cells = vec![None; CELL_COUNT];
        cells[6] = golfer("   ", 5_000);

        assert_eq!(Board::from_cells(cells), Err(BoardError::BlankName(6)));
    }

    #[test]
    fn test_used_names_follow_cell_order() {
        let mut cells = vec![None; CELL_COUNT];
        cells[7] = golfer("Jon Rahm", 12_000);
        cells[2] = golfer("Adam Scott", 7_000);
        let board = Board::from_cells(cells).unwrap();

        assert_eq!(board.used_names(), vec!["Adam Scott", "Jon Rahm"]);
        assert_eq!(board.position_of("jon rahm"), Some(7));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_cell_out_of_range_is_none() {
        assert!(Board::new().cell(99).is_none());
        assert!(!Board::new().is_filled(25));
    }

    #[test]
    fn test_cleared_returns_empty_board() {
        let mut cells = vec![None; CELL_COUNT];
        cells[0] = golfer("Tiger Woods", 6_500);
        let board = Board::from_cells(cells).unwrap();

        assert!(board.cleared().is_empty());
        assert!(!board.is_empty(), "original board must be untouched");
    }

    #[test]
    fn test_name_key_trims_and_lowercases() {
        assert_eq!(name_key("  Ludvig ABERG "), "ludvig aberg");
    }
}
