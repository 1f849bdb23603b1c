//! Best-line scoring against live scores to par.
//!
//! Golf is scored low, so the "best" line is the complete line whose five
//! golfers have the smallest summed score.  Every line tied at that minimum
//! is reported, not just the first one found.
//!
//! A line competes only when all five of its cells are filled *and* every
//! golfer on it has a score.  Missing data is never an error; it just means
//! fewer (possibly zero) lines qualify.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::board::{name_key, Board, CellIndex};
use crate::domain::geometry::LineId;

/// One row of the score feed, as delivered by the upstream leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub name: String,
    /// A row without a score reads as [`FeedScore::Other`] holding `null`.
    #[serde(default)]
    pub score: FeedScore,
}

impl FeedEntry {
    pub fn new(name: impl Into<String>, score: FeedScore) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// A score as it appears in the feed: either a plain number or display text
/// such as `"-3"`, `"+2"` or `"E"`.
///
/// Any other JSON value (`null` for a golfer yet to tee off, a float such as
/// `-1.0`, ...) lands in `Other` so one odd row never fails the whole feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedScore {
    Strokes(i32),
    Text(String),
    Other(serde_json::Value),
}

impl Default for FeedScore {
    fn default() -> Self {
        FeedScore::Other(serde_json::Value::Null)
    }
}

impl FeedScore {
    /// Converts the feed value to a score relative to par.
    ///
    /// Returns `None` for text that is not a signed integer or "even"
    /// (for example `"CUT"` or `"WD"`), for non-integral or out-of-range
    /// numbers, and for every other JSON value.
    pub fn to_par(&self) -> Option<i32> {
        match self {
            FeedScore::Strokes(strokes) => Some(*strokes),
            FeedScore::Other(serde_json::Value::Number(number)) => {
                let value = number.as_f64()?;
                let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
                (value.fract() == 0.0 && in_range).then_some(value as i32)
            }
            FeedScore::Other(_) => None,
            FeedScore::Text(text) => {
                let text = text.trim();
                if text.eq_ignore_ascii_case("e") || text.eq_ignore_ascii_case("even") {
                    return Some(0);
                }
                text.strip_prefix('+').unwrap_or(text).parse().ok()
            }
        }
    }
}

/// Golfer name (case-insensitive) → score to par.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    scores: HashMap<String, i32>,
    skipped: usize,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from raw feed rows.
    ///
    /// Rows whose score cannot be read are dropped with a warning and counted
    /// in [`ScoreTable::skipped`].  When a name appears twice the later row wins.
    pub fn from_feed<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = FeedEntry>,
    {
        let mut table = Self::new();
        for entry in entries {
            match entry.score.to_par() {
                Some(score) => table.insert(&entry.name, score),
                None => {
                    warn!(golfer = %entry.name, score = ?entry.score, "skipping unreadable feed score");
                    table.skipped += 1;
                }
            }
        }
        debug!(golfers = table.len(), skipped = table.skipped, "score table built");
        table
    }

    pub fn insert(&mut self, name: &str, score: i32) {
        self.scores.insert(name_key(name), score);
    }

    /// Looks up a golfer's score, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<i32> {
        self.scores.get(&name_key(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Number of feed rows dropped by [`ScoreTable::from_feed`].
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<S: AsRef<str>> FromIterator<(S, i32)> for ScoreTable {
    fn from_iter<T: IntoIterator<Item = (S, i32)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (name, score) in iter {
            table.insert(name.as_ref(), score);
        }
        table
    }
}

/// Total of one qualifying line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScore {
    pub line: LineId,
    pub total: i64,
}

/// The winning line(s) of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestLine {
    /// The minimum line total.
    pub total: i64,
    /// Every line tied at `total`, in canonical order.
    pub lines: Vec<LineId>,
    /// Union of the cells of `lines`.
    pub cells: BTreeSet<CellIndex>,
}

/// Scores every qualifying line in canonical order.
pub fn score_lines(board: &Board, scores: &ScoreTable) -> Vec<LineScore> {
    LineId::all()
        .iter()
        .filter_map(|&line| {
            let total = line
                .cells()
                .iter()
                .map(|&cell| {
                    board
                        .cell(cell)
                        .and_then(|golfer| scores.get(&golfer.name))
                        .map(i64::from)
                })
                .sum::<Option<i64>>()?;
            Some(LineScore { line, total })
        })
        .collect()
}

/// Finds the lowest-scoring line(s), or `None` if no line qualifies.
pub fn best_line(board: &Board, scores: &ScoreTable) -> Option<BestLine> {
    let lines = score_lines(board, scores);
    let total = lines.iter().map(|score| score.total).min()?;

    let winners: Vec<LineId> = lines
        .iter()
        .filter(|score| score.total == total)
        .map(|score| score.line)
        .collect();
    let cells = winners.iter().flat_map(|line| line.cells()).collect();

    Some(BestLine {
        total,
        lines: winners,
        cells,
    })
}

/// Returns the cells of every line tied for the lowest total, or an empty set
/// when no line qualifies.
pub fn compute_best_line(board: &Board, scores: &ScoreTable) -> BTreeSet<CellIndex> {
    best_line(board, scores)
        .map(|best| best.cells)
        .unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
