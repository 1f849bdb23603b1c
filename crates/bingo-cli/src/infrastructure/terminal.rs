//! Plain-text rendering for the terminal.
//!
//! Every function returns a `String` so the output can be asserted in tests
//! and printed by `main` in one call.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use bingo_core::{
    Board, BestLine, BoardGeometry, CellIndex, GolferCatalog, ZoneStatus, CELL_COUNT,
};

use crate::application::leaderboard::LeaderboardEntry;
use crate::infrastructure::score_feed::FeedStatus;

/// Characters of a golfer name shown in a board cell.
const NAME_WIDTH: usize = 18;

/// Formats a score to par the way leaderboards print it: `-5`, `E`, `+3`.
pub fn format_to_par(total: i64) -> String {
    match total {
        0 => "E".to_string(),
        t if t > 0 => format!("+{t}"),
        t => t.to_string(),
    }
}

/// Renders the 5×5 grid.  Each cell shows its index, the first letter of its
/// zone, and the golfer; cells in `highlight` are marked with `*`.
pub fn render_board(board: &Board, geometry: &BoardGeometry, highlight: &BTreeSet<CellIndex>) -> String {
    let width = NAME_WIDTH;
    let mut out = String::new();
    for row in 0..5 {
        let cells: Vec<String> = (0..5)
            .map(|column| {
                let index = row * 5 + column;
                let marker = if highlight.contains(&index) { '*' } else { ' ' };
                let zone = geometry
                    .zone_of(index)
                    .and_then(|zone| zone.name.chars().next())
                    .map(|c| c.to_ascii_uppercase())
                    .unwrap_or('?');
                let name: String = match board.cell(index) {
                    Some(golfer) => golfer.name.chars().take(NAME_WIDTH).collect(),
                    None => "-".to_string(),
                };
                format!("{marker}{index:>2} {zone} {name:<width$}")
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" |").trim_end());
    }
    let _ = writeln!(out, "Filled: {} / {}", board.filled_count(), CELL_COUNT);
    out
}

/// One line per zone with spend against budget.
pub fn render_zone_status(statuses: &[ZoneStatus]) -> String {
    let mut out = String::new();
    for status in statuses {
        let _ = write!(
            out,
            "{:<14} {}/{} filled  spent {:>6} of {:>6}  remaining {:>6}",
            status.name, status.filled, status.cells, status.spent, status.budget, status.remaining
        );
        if status.at_checkpoint() {
            out.push_str("  (last cell: budget enforced)");
        }
        out.push('\n');
    }
    out
}

/// Summary line for the best line(s) of a board.
pub fn render_best_line(best: Option<&BestLine>) -> String {
    match best {
        Some(best) => {
            let lines: Vec<String> = best.lines.iter().map(ToString::to_string).collect();
            let label = if lines.len() == 1 { "Best line" } else { "Best lines" };
            format!("{label}: {} (total {})\n", lines.join(", "), format_to_par(best.total))
        }
        None => "No complete line with scores yet\n".to_string(),
    }
}

/// Cache state line printed under the best line.
pub fn render_feed_status(status: &FeedStatus) -> String {
    match (status.age, status.last_update) {
        (Some(age), Some(updated)) => format!(
            "Scores: {} golfers, updated {} ({}s ago, {})\n",
            status.golfers,
            updated.format("%Y-%m-%d %H:%M:%S UTC"),
            age.as_secs(),
            if status.valid { "fresh" } else { "stale" }
        ),
        _ => "Scores: not loaded\n".to_string(),
    }
}

pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No saved boards yet\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let rank = entry
            .rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let score = match &entry.best {
            Some(best) => {
                let lines: Vec<String> = best.lines.iter().map(ToString::to_string).collect();
                format!("{:>4}  {}", format_to_par(best.total), lines.join(", "))
            }
            None => format!("{:>4}  no complete line", "-"),
        };
        let _ = writeln!(
            out,
            "{rank:>3}  {:<16} {:>2}/{}  {score}",
            entry.user, entry.filled, CELL_COUNT
        );
    }
    out
}

/// The golfer catalog, marking golfers already on `board`.
pub fn render_golfers(catalog: &GolferCatalog, board: Option<&Board>) -> String {
    let mut out = String::new();
    for golfer in catalog.iter() {
        let used = board.is_some_and(|b| b.position_of(&golfer.name).is_some());
        let _ = writeln!(
            out,
            "{:<24} {:>6}{}",
            golfer.name,
            golfer.salary,
            if used { "  (on board)" } else { "" }
        );
    }
    out
}
