//! Assignment validation and cell clearing.
//!
//! # Budget checkpoints
//!
//! Zone budgets are not enforced on every placement.  A placement is checked
//! only at a *checkpoint*, i.e. when the target cell is
//!
//! - the last empty cell of its zone, or
//! - the fifth cell of a line whose other four cells are already filled.
//!
//! At a checkpoint the remaining budget is the target zone's budget minus the
//! salaries already placed in that zone; the golfer is rejected if their
//! salary exceeds it.  Every triggered checkpoint is evaluated (zone first,
//! then completing lines in canonical line order) and the first failure is
//! reported.  Placements that trigger nothing are accepted regardless of
//! salary.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::domain::board::{Board, CellIndex, GolferAssignment};
use crate::domain::geometry::{BoardGeometry, LineId, Zone, CELL_COUNT};

/// Which checkpoint a budget rejection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetScope {
    /// The target was the last empty cell of its zone.
    Zone,
    /// The target completed the given line.
    Line(LineId),
}

impl fmt::Display for BudgetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetScope::Zone => f.write_str("completing the zone"),
            BudgetScope::Line(line) => write!(f, "completing {line}"),
        }
    }
}

/// Reasons a placement or clear is refused.
///
/// The `Display` text is meant to be shown to the player as-is.
#[derive(Debug, Error, PartialEq)]
pub enum RuleViolation {
    #[error("cell {0} is not on the board (valid cells are 0 to 24)")]
    InvalidIndex(CellIndex),

    #[error("'{name}' with salary {salary} cannot be placed: golfers need a name and a positive salary")]
    InvalidAssignment { name: String, salary: u32 },

    #[error("{name} is already on the board in cell {cell}")]
    GolferAlreadyUsed { name: String, cell: CellIndex },

    #[error("cell {cell} already holds {occupant}; clear it first")]
    CellOccupied { cell: CellIndex, occupant: String },

    #[error(
        "{scope} would exceed the {zone} budget: {remaining} remaining, {attempted} attempted"
    )]
    BudgetExceeded {
        scope: BudgetScope,
        zone: String,
        /// May be negative if earlier unconstrained placements overspent the zone.
        remaining: i64,
        attempted: u32,
    },
}

/// Budget summary for one zone, for rendering hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneStatus {
    pub name: String,
    pub budget: u32,
    /// Filled cells in the zone.
    pub filled: usize,
    /// Total cells in the zone.
    pub cells: usize,
    pub spent: u64,
    pub remaining: i64,
}

impl ZoneStatus {
    /// Returns `true` when exactly one cell of the zone is still empty, so the
    /// next placement there is a checkpoint.
    pub fn at_checkpoint(&self) -> bool {
        self.filled + 1 == self.cells
    }
}

/// Places `assignment` in cell `index`, returning the new board.
///
/// Checks run in this order: index range, assignment shape (non-blank name,
/// positive salary), golfer uniqueness, cell occupancy, then the budget
/// checkpoints described in the module docs.  `board` is never modified.
///
/// # Errors
///
/// Returns the first [`RuleViolation`] encountered.
pub fn validate_and_assign(
    board: &Board,
    index: CellIndex,
    assignment: &GolferAssignment,
    geometry: &BoardGeometry,
) -> Result<Board, RuleViolation> {
    if index >= CELL_COUNT {
        return Err(RuleViolation::InvalidIndex(index));
    }

    if assignment.name.trim().is_empty() || assignment.salary == 0 {
        return Err(RuleViolation::InvalidAssignment {
            name: assignment.name.clone(),
            salary: assignment.salary,
        });
    }

    if let Some(cell) = board.position_of(&assignment.name) {
        return Err(RuleViolation::GolferAlreadyUsed {
            name: assignment.name.clone(),
            cell,
        });
    }

    if let Some(occupant) = board.cell(index) {
        return Err(RuleViolation::CellOccupied {
            cell: index,
            occupant: occupant.name.clone(),
        });
    }

    let zone = geometry
        .zone_of(index)
        .ok_or(RuleViolation::InvalidIndex(index))?;
    let remaining = i64::from(zone.budget) - zone_spent(board, zone) as i64;

    for scope in triggered_checkpoints(board, index, geometry) {
        if i64::from(assignment.salary) > remaining {
            debug!(
                golfer = %assignment.name,
                cell = index,
                zone = %zone.name,
                %scope,
                remaining,
                "placement rejected at budget checkpoint"
            );
            return Err(RuleViolation::BudgetExceeded {
                scope,
                zone: zone.name.clone(),
                remaining,
                attempted: assignment.salary,
            });
        }
    }

    debug!(golfer = %assignment.name, cell = index, zone = %zone.name, "placement accepted");
    Ok(board.with_cell(index, Some(assignment.clone())))
}

/// Lists the checkpoints a placement into the empty cell `index` would
/// trigger: the zone checkpoint first, then completed lines in canonical
/// order.  Returns an empty list for off-board indices.
pub fn triggered_checkpoints(
    board: &Board,
    index: CellIndex,
    geometry: &BoardGeometry,
) -> Vec<BudgetScope> {
    let Some(zone) = geometry.zone_of(index) else {
        return Vec::new();
    };

    let mut scopes = Vec::new();
    let zone_completes = zone
        .cells
        .iter()
        .filter(|&&cell| cell != index)
        .all(|&cell| board.is_filled(cell));
    if zone_completes {
        scopes.push(BudgetScope::Zone);
    }

    scopes.extend(
        LineId::through(index)
            .filter(|line| {
                line.cells()
                    .iter()
                    .filter(|&&cell| cell != index)
                    .all(|&cell| board.is_filled(cell))
            })
            .map(BudgetScope::Line),
    );
    scopes
}

/// Empties cell `index`, returning the new board and the golfer that was
/// there (now free to place again).  Clearing an empty cell is a no-op.
///
/// # Errors
///
/// Returns [`RuleViolation::InvalidIndex`] if `index` is off the board.
pub fn clear_cell(
    board: &Board,
    index: CellIndex,
) -> Result<(Board, Option<GolferAssignment>), RuleViolation> {
    if index >= CELL_COUNT {
        return Err(RuleViolation::InvalidIndex(index));
    }
    let removed = board.cell(index).cloned();
    if let Some(golfer) = &removed {
        debug!(golfer = %golfer.name, cell = index, "cell cleared");
    }
    Ok((board.with_cell(index, None), removed))
}

/// Reports spend against every zone's budget, in zone definition order.
pub fn zone_budget_status(board: &Board, geometry: &BoardGeometry) -> Vec<ZoneStatus> {
    geometry
        .zones()
        .iter()
        .map(|zone| {
            let spent = zone_spent(board, zone);
            ZoneStatus {
                name: zone.name.clone(),
                budget: zone.budget,
                filled: zone.cells.iter().filter(|&&c| board.is_filled(c)).count(),
                cells: zone.cells.len(),
                spent,
                remaining: i64::from(zone.budget) - spent as i64,
            }
        })
        .collect()
}

fn zone_spent(board: &Board, zone: &Zone) -> u64 {
    zone.cells
        .iter()
        .filter_map(|&cell| board.cell(cell))
        .map(|golfer| u64::from(golfer.salary))
        .sum()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn golfer(name: &str, salary: u32) -> GolferAssignment {
        GolferAssignment::new(name, salary)
    }

    /// Places each `(cell, name, salary)` in order, panicking on any rejection.
    fn board_with(placements: &[(CellIndex, &str, u32)]) -> Board {
        let geometry = BoardGeometry::standard();
        placements
            .iter()
            .fold(Board::new(), |board, &(cell, name, salary)| {
                validate_and_assign(&board, cell, &golfer(name, salary), &geometry)
                    .unwrap_or_else(|e| panic!("setup placement of {name} failed: {e}"))
            })
    }

    // ── Basic checks ──────────────────────────────────────────────────────────

    #[test]
    fn test_assign_to_empty_board_returns_new_board() {
        // Arrange
        let geometry = BoardGeometry::standard();
        let board = Board::new();

        // Act
        let next = validate_and_assign(&board, 12, &golfer("Jon Rahm", 12_000), &geometry)
            .expect("first placement is unconstrained");

        // Assert
        assert_eq!(next.cell(12).map(|g| g.name.as_str()), Some("Jon Rahm"));
        assert!(board.is_empty(), "input board must not change");
    }

    #[test]
    fn test_assign_rejects_index_off_board() {
        let geometry = BoardGeometry::standard();
        assert_eq!(
            validate_and_assign(&Board::new(), 25, &golfer("Adam Scott", 7_000), &geometry),
            Err(RuleViolation::InvalidIndex(25))
        );
    }

    #[test]
    fn test_assign_rejects_zero_salary_and_blank_name() {
        // Arrange
        let geometry = BoardGeometry::standard();
        let board = Board::new();

        // Act
        let free = validate_and_assign(&board, 3, &golfer("Freebie", 0), &geometry);
        let blank = validate_and_assign(&board, 3, &golfer("   ", 5_000), &geometry);

        // Assert
        assert_eq!(
            free,
            Err(RuleViolation::InvalidAssignment {
                name: "Freebie".to_string(),
                salary: 0,
            })
        );
        assert!(matches!(blank, Err(RuleViolation::InvalidAssignment { salary: 5_000, .. })));
    }

    #[test]
    fn test_accepted_boards_survive_snapshot_round_trip() {
        let geometry = BoardGeometry::standard();
        let board = validate_and_assign(&Board::new(), 3, &golfer("Tom Kim", 6_000), &geometry)
            .expect("valid placement");

        let snapshot = crate::snapshot::codec::serialize(&board, chrono::Utc::now());

        assert_eq!(crate::snapshot::codec::deserialize(&snapshot), Ok(board));
    }

    #[test]
    fn test_assign_rejects_golfer_already_used_anywhere() {
        let geometry = BoardGeometry::standard();
        let board = board_with(&[(3, "Shane Lowry", 8_000)]);

        let result = validate_and_assign(&board, 19, &golfer("shane lowry", 8_000), &geometry);

        assert_eq!(
            result,
            Err(RuleViolation::GolferAlreadyUsed {
                name: "shane lowry".to_string(),
                cell: 3,
            })
        );
    }

    #[test]
    fn test_assign_never_overwrites_occupied_cell() {
        let geometry = BoardGeometry::standard();
        let board = board_with(&[(3, "Shane Lowry", 8_000)]);

        let result = validate_and_assign(&board, 3, &golfer("Justin Rose", 7_200), &geometry);

        assert_eq!(
            result,
            Err(RuleViolation::CellOccupied {
                cell: 3,
                occupant: "Shane Lowry".to_string(),
            })
        );
    }

    #[test]
    fn test_used_golfer_is_reported_before_occupied_cell() {
        let geometry = BoardGeometry::standard();
        let board = board_with(&[(3, "Shane Lowry", 8_000)]);

        let result = validate_and_assign(&board, 3, &golfer("Shane Lowry", 8_000), &geometry);

        assert!(matches!(result, Err(RuleViolation::GolferAlreadyUsed { cell: 3, .. })));
    }

    // ── Checkpoints ───────────────────────────────────────────────────────────

    #[test]
    fn test_orange_last_cell_rejects_salary_above_remaining() {
        // Arrange: three orange corners hold 32 000 of the 40 000 budget.
        let geometry = BoardGeometry::standard();
        let board = board_with(&[
            (0, "Scottie Scheffler", 14_000),
            (4, "Collin Morikawa", 10_000),
            (20, "Shane Lowry", 8_000),
        ]);

        // Act
        let result = validate_and_assign(&board, 24, &golfer("Hideki Matsuyama", 9_000), &geometry);

        // Assert
        assert_eq!(
            result,
            Err(RuleViolation::BudgetExceeded {
                scope: BudgetScope::Zone,
                zone: "orange".to_string(),
                remaining: 8_000,
                attempted: 9_000,
            })
        );
    }

    #[test]
    fn test_orange_last_cell_accepts_salary_equal_to_remaining() {
        let geometry = BoardGeometry::standard();
        let board = board_with(&[
            (0, "Scottie Scheffler", 14_000),
            (4, "Collin Morikawa", 10_000),
            (20, "Shane Lowry", 8_000),
        ]);

        let next = validate_and_assign(&board, 24, &golfer("Matt Fitzpatrick", 8_000), &geometry)
            .expect("exactly the remaining budget is allowed");

        assert_eq!(next.filled_count(), 4);
    }

    #[test]
    fn test_non_checkpoint_placement_ignores_budget() {
        // A single golfer may cost more than the whole zone as long as the
        // placement neither finishes the zone nor completes a line.
        let geometry = BoardGeometry::standard();
        let result = validate_and_assign(&Board::new(), 0, &golfer("Big Spender", 90_000), &geometry);
        assert!(result.is_ok());
    }

    #[test]
    fn test_line_completion_checks_target_zone_budget() {
        // Arrange: row 0 has four cells filled; baby-blue (2, 10, 14, 22) has
        // 27 000 spent in cells 10 and 14, and cell 22 is still empty.
        let geometry = BoardGeometry::standard();
        let board = board_with(&[
            (0, "Tiger Woods", 6_500),
            (1, "Adam Scott", 7_000),
            (3, "Justin Rose", 7_200),
            (4, "Louis Oosthuizen", 6_800),
            (10, "Scottie Scheffler", 14_000),
            (14, "Rory McIlroy", 13_000),
        ]);
        assert_eq!(
            triggered_checkpoints(&board, 2, &geometry),
            vec![BudgetScope::Line(LineId::Row(0))]
        );

        // Act
        let result = validate_and_assign(&board, 2, &golfer("Jon Rahm", 13_500), &geometry);

        // Assert
        assert_eq!(
            result,
            Err(RuleViolation::BudgetExceeded {
                scope: BudgetScope::Line(LineId::Row(0)),
                zone: "baby-blue".to_string(),
                remaining: 13_000,
                attempted: 13_500,
            })
        );
    }

    #[test]
    fn test_zone_and_line_checkpoints_fire_together() {
        // Arrange: cell 4 is the last orange corner and also completes row 0.
        let geometry = BoardGeometry::standard();
        let board = board_with(&[
            (0, "Scottie Scheffler", 14_000),
            (20, "Rory McIlroy", 13_000),
            (24, "Jon Rahm", 12_000),
            (1, "Adam Scott", 7_000),
            (2, "Justin Rose", 7_200),
            (3, "Tiger Woods", 6_500),
        ]);

        // Act
        let scopes = triggered_checkpoints(&board, 4, &geometry);
        let rejected = validate_and_assign(&board, 4, &golfer("Sungjae Im", 7_800), &geometry);
        let accepted = validate_and_assign(&board, 4, &golfer("Cheap Pick", 1_000), &geometry);

        // Assert: both checkpoints apply, the zone one is reported first.
        assert_eq!(scopes, vec![BudgetScope::Zone, BudgetScope::Line(LineId::Row(0))]);
        assert_eq!(
            rejected,
            Err(RuleViolation::BudgetExceeded {
                scope: BudgetScope::Zone,
                zone: "orange".to_string(),
                remaining: 1_000,
                attempted: 7_800,
            })
        );
        assert!(accepted.is_ok());
    }

    #[test]
    fn test_overspent_zone_reports_negative_remaining() {
        let geometry = BoardGeometry::standard();
        let board = board_with(&[
            (0, "Big Spender", 30_000),
            (4, "Another Spender", 20_000),
            (20, "Third Spender", 1_000),
        ]);

        let result = validate_and_assign(&board, 24, &golfer("Anyone", 1), &geometry);

        assert!(matches!(
            result,
            Err(RuleViolation::BudgetExceeded { remaining: -11_000, .. })
        ));
    }

    #[test]
    fn test_triggered_checkpoints_off_board_is_empty() {
        assert!(triggered_checkpoints(&Board::new(), 30, &BoardGeometry::standard()).is_empty());
    }

    // ── clear_cell ────────────────────────────────────────────────────────────

    #[test]
    fn test_clear_cell_frees_golfer_for_reuse() {
        // Arrange
        let geometry = BoardGeometry::standard();
        let board = board_with(&[(7, "Viktor Hovland", 9_800)]);
        let hovland = golfer("Viktor Hovland", 9_800);
        assert!(matches!(
            validate_and_assign(&board, 11, &hovland, &geometry),
            Err(RuleViolation::GolferAlreadyUsed { .. })
        ));

        // Act
        let (cleared, removed) = clear_cell(&board, 7).expect("cell 7 is on the board");

        // Assert
        assert_eq!(removed, Some(hovland.clone()));
        assert!(validate_and_assign(&cleared, 11, &hovland, &geometry).is_ok());
    }

    #[test]
    fn test_clear_empty_cell_is_noop() {
        let (board, removed) = clear_cell(&Board::new(), 0).unwrap();
        assert!(board.is_empty());
        assert!(removed.is_none());
    }

    #[test]
    fn test_clear_cell_rejects_index_off_board() {
        assert_eq!(clear_cell(&Board::new(), 25), Err(RuleViolation::InvalidIndex(25)));
    }

    // ── zone_budget_status ────────────────────────────────────────────────────

    #[test]
    fn test_zone_budget_status_reports_spend() {
        let geometry = BoardGeometry::standard();
        let board = board_with(&[(0, "Scottie Scheffler", 14_000), (4, "Collin Morikawa", 10_000)]);

        let status = zone_budget_status(&board, &geometry);
        let orange = status.iter().find(|s| s.name == "orange").unwrap();

        assert_eq!(status.len(), 5);
        assert_eq!(orange.filled, 2);
        assert_eq!(orange.cells, 4);
        assert_eq!(orange.spent, 24_000);
        assert_eq!(orange.remaining, 16_000);
        assert!(!orange.at_checkpoint());
    }

    #[test]
    fn test_violation_display_is_readable() {
        let err = RuleViolation::BudgetExceeded {
            scope: BudgetScope::Line(LineId::Column(2)),
            zone: "green".to_string(),
            remaining: 4_000,
            attempted: 9_000,
        };
        assert_eq!(
            err.to_string(),
            "completing column 3 would exceed the green budget: 4000 remaining, 9000 attempted"
        );
    }
}
