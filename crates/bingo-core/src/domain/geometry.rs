//! Board geometry: the 12 bingo lines and the budgeted colour zones.
//!
//! Cells are numbered row-major from the top-left corner:
//!
//! ```text
//!  0  1  2  3  4
//!  5  6  7  8  9
//! 10 11 12 13 14
//! 15 16 17 18 19
//! 20 21 22 23 24
//! ```
//!
//! Lines are fixed by the shape of the grid.  Zones are data: a tournament
//! may recolour the board, so a [`BoardGeometry`] is built from a list of
//! [`Zone`]s and refuses any list that does not partition the 25 cells
//! exactly (no overlap, full coverage).

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::CellIndex;

/// Number of cells along one side of the board.
pub const BOARD_SIDE: usize = 5;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// Number of scoring lines: 5 rows, 5 columns, 2 diagonals.
pub const LINE_COUNT: usize = 12;

/// Identifies one of the 12 five-cell scoring lines.
///
/// `Row` and `Column` carry a zero-based index in `0..5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineId {
    Row(u8),
    Column(u8),
    /// Top-left to bottom-right: 0, 6, 12, 18, 24.
    Diagonal,
    /// Top-right to bottom-left: 4, 8, 12, 16, 20.
    AntiDiagonal,
}

/// All lines in canonical order: rows, then columns, then the two diagonals.
pub const ALL_LINES: [LineId; LINE_COUNT] = [
    LineId::Row(0),
    LineId::Row(1),
    LineId::Row(2),
    LineId::Row(3),
    LineId::Row(4),
    LineId::Column(0),
    LineId::Column(1),
    LineId::Column(2),
    LineId::Column(3),
    LineId::Column(4),
    LineId::Diagonal,
    LineId::AntiDiagonal,
];

impl LineId {
    /// Returns every line in canonical order.
    pub fn all() -> &'static [LineId; LINE_COUNT] {
        &ALL_LINES
    }

    /// Returns the `k`-th line in canonical order, or `None` if `k >= 12`.
    pub fn from_index(k: usize) -> Option<LineId> {
        ALL_LINES.get(k).copied()
    }

    /// Returns the five cell indices that make up this line, in grid order.
    pub fn cells(self) -> [CellIndex; BOARD_SIDE] {
        let mut cells = [0; BOARD_SIDE];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = match self {
                LineId::Row(r) => r as usize * BOARD_SIDE + i,
                LineId::Column(c) => i * BOARD_SIDE + c as usize,
                LineId::Diagonal => i * BOARD_SIDE + i,
                LineId::AntiDiagonal => i * BOARD_SIDE + (BOARD_SIDE - 1 - i),
            };
        }
        cells
    }

    /// Returns `true` if `index` is one of this line's cells.
    pub fn contains(self, index: CellIndex) -> bool {
        self.cells().contains(&index)
    }

    /// Iterates over the lines passing through `index` in canonical order.
    ///
    /// A corner lies on three lines, the centre on four, every other cell on
    /// two or three.
    pub fn through(index: CellIndex) -> impl Iterator<Item = LineId> {
        ALL_LINES
            .iter()
            .copied()
            .filter(move |line| line.contains(index))
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineId::Row(r) => write!(f, "row {}", r + 1),
            LineId::Column(c) => write!(f, "column {}", c + 1),
            LineId::Diagonal => f.write_str("diagonal"),
            LineId::AntiDiagonal => f.write_str("anti-diagonal"),
        }
    }
}

/// A named group of cells sharing one salary budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Display name, usually the zone colour (e.g. `"orange"`).
    pub name: String,
    /// Total salary allowed across every cell of the zone.
    pub budget: u32,
    /// Cell indices belonging to the zone.
    pub cells: Vec<CellIndex>,
}

impl Zone {
    pub fn new(name: impl Into<String>, budget: u32, cells: Vec<CellIndex>) -> Self {
        Self {
            name: name.into(),
            budget,
            cells,
        }
    }

    /// Returns `true` if `index` belongs to this zone.
    pub fn contains(&self, index: CellIndex) -> bool {
        self.cells.contains(&index)
    }
}

/// Errors raised when a zone table does not form a valid board geometry.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// A zone lists no cells.
    #[error("zone '{0}' has no cells")]
    EmptyZone(String),

    /// Two zones share a name (compared case-insensitively).
    #[error("zone '{0}' is defined more than once")]
    DuplicateZone(String),

    /// A zone lists a cell outside `0..25`.
    #[error("zone '{zone}' lists cell {cell}, which is outside the 5x5 board")]
    CellOutOfRange { zone: String, cell: CellIndex },

    /// A cell is claimed by two zones (or twice by the same zone).
    #[error("cell {cell} is claimed by both '{first}' and '{second}'")]
    OverlappingZones {
        cell: CellIndex,
        first: String,
        second: String,
    },

    /// A cell belongs to no zone.
    #[error("cell {0} does not belong to any zone")]
    UncoveredCell(CellIndex),

    /// A zone has a zero budget, so nothing could ever be placed in its last cell.
    #[error("zone '{0}' must have a budget greater than zero")]
    ZeroBudget(String),
}

/// The zone partition of a board plus the fixed line table.
///
/// Construction validates the partition invariant once; afterwards every
/// cell index in `0..25` maps to exactly one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardGeometry {
    zones: Vec<Zone>,
    /// `owner[cell]` is the position in `zones` of the zone holding `cell`.
    owner: [usize; CELL_COUNT],
}

impl BoardGeometry {
    /// Builds a geometry from a zone table.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if any zone is empty, duplicated, has a zero
    /// budget, or lists an out-of-range cell, or if the zones do not cover all
    /// 25 cells exactly once.
    pub fn new(zones: Vec<Zone>) -> Result<Self, GeometryError> {
        let mut owner: [Option<usize>; CELL_COUNT] = [None; CELL_COUNT];
        let mut names = HashSet::new();

        for (position, zone) in zones.iter().enumerate() {
            if zone.cells.is_empty() {
                return Err(GeometryError::EmptyZone(zone.name.clone()));
            }
            if zone.budget == 0 {
                return Err(GeometryError::ZeroBudget(zone.name.clone()));
            }
            if !names.insert(zone.name.trim().to_lowercase()) {
                return Err(GeometryError::DuplicateZone(zone.name.clone()));
            }
            for &cell in &zone.cells {
                if cell >= CELL_COUNT {
                    return Err(GeometryError::CellOutOfRange {
                        zone: zone.name.clone(),
                        cell,
                    });
                }
                if let Some(previous) = owner[cell] {
                    return Err(GeometryError::OverlappingZones {
                        cell,
                        first: zones[previous].name.clone(),
                        second: zone.name.clone(),
                    });
                }
                owner[cell] = Some(position);
            }
        }

        let mut resolved = [0usize; CELL_COUNT];
        for (cell, slot) in owner.iter().enumerate() {
            resolved[cell] = slot.ok_or(GeometryError::UncoveredCell(cell))?;
        }

        Ok(Self {
            zones,
            owner: resolved,
        })
    }

    /// The zone table of the current board design.
    ///
    /// | zone          | cells                      | budget |
    /// |---------------|----------------------------|--------|
    /// | orange        | corners                    | 40000  |
    /// | green         | cross around the centre    | 50000  |
    /// | baby-blue     | edge midpoints             | 40000  |
    /// | light-magenta | centre and inner diagonals | 40000  |
    /// | white         | everything else            | 80000  |
    pub fn standard_zones() -> Vec<Zone> {
        vec![
            Zone::new("orange", 40_000, vec![0, 4, 20, 24]),
            Zone::new("green", 50_000, vec![7, 11, 13, 17]),
            Zone::new("baby-blue", 40_000, vec![2, 10, 14, 22]),
            Zone::new("light-magenta", 40_000, vec![6, 8, 12, 16, 18]),
            Zone::new("white", 80_000, vec![1, 3, 5, 9, 15, 19, 21, 23]),
        ]
    }

    /// Returns the geometry built from [`BoardGeometry::standard_zones`].
    pub fn standard() -> Self {
        // The standard table is a fixed literal covered by unit tests, so
        // construction cannot fail.
        Self::new(Self::standard_zones()).expect("standard zone table is a valid partition")
    }

    /// Returns every zone in definition order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Returns the zone owning `index`, or `None` if `index` is off the board.
    pub fn zone_of(&self, index: CellIndex) -> Option<&Zone> {
        self.owner.get(index).map(|&position| &self.zones[position])
    }

    /// Looks up a zone by name (case-insensitive).
    pub fn zone_named(&self, name: &str) -> Option<&Zone> {
        let wanted = name.trim().to_lowercase();
        self.zones
            .iter()
            .find(|zone| zone.name.trim().to_lowercase() == wanted)
    }

    /// Returns the fixed line table.
    pub fn lines(&self) -> &'static [LineId; LINE_COUNT] {
        LineId::all()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
