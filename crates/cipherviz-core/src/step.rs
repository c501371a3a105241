//! Step records: one snapshot of engine state per meaningful sub-operation.
//!
//! A [`StepRecord`] carries the fields every record shares (id, title,
//! description, final/error flags) and a [`StepDetail`] with the
//! engine-specific snapshot. Snapshots are owned values; a grid captured at
//! step 3 is unaffected by anything the engine does afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::StepId;

/// One recorded step of a transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub id: StepId,
    /// Short label, e.g. "Shift 'H'".
    pub title: String,
    /// Human-readable explanation of what happened at this step.
    pub description: String,
    /// True only on the last record of a trace.
    pub is_final: bool,
    /// True only on the sole record of a fail-soft error trace.
    #[serde(default)]
    pub is_error: bool,
    pub detail: StepDetail,
}

impl StepRecord {
    /// The running result at this step.
    pub fn result_so_far(&self) -> &str {
        match &self.detail {
            StepDetail::Caesar(step) => &step.result_so_far,
            StepDetail::RailFence(step) => &step.result_so_far,
        }
    }
}

/// Engine-specific part of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StepDetail {
    Caesar(CaesarStep),
    RailFence(RailFenceStep),
}

/// Snapshot of a Caesar transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaesarStep {
    pub input_text: String,
    /// -1 before the first character, `len(text)` after the last.
    pub cursor_index: i64,
    pub current_char: Option<char>,
    /// Signed shift applied per letter; negative when decrypting.
    pub shift_amount: i32,
    pub original_alphabet_position: Option<u8>,
    pub new_alphabet_position: Option<u8>,
    pub output_char: Option<char>,
    pub result_so_far: String,
    pub skipped_non_alphabetic: bool,
}

/// Snapshot of a rail fence transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailFenceStep {
    /// Rail count as requested, which may be invalid on an error record.
    pub rails: i64,
    pub grid_snapshot: Grid,
    pub cursor_column: Option<usize>,
    pub cursor_row: Option<usize>,
    /// Heading after the current zig-zag cell. Records outside the zig-zag
    /// walk (setup, completion, fill, read) carry `Down`.
    pub zigzag_direction: Direction,
    pub read_order_so_far: Vec<ReadPosition>,
    pub result_so_far: String,
    pub phase: Phase,
}

/// What the rail fence engine is doing at a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Writing characters into the grid.
    Filling,
    /// Decrypt only: placing placeholders along the zig-zag.
    Marking,
    /// Collecting characters out of the grid.
    Reading,
    Complete,
}

/// Vertical heading of the zig-zag. Serialized as `1` (down) / `-1` (up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    pub fn delta(self) -> i8 {
        match self {
            Direction::Down => 1,
            Direction::Up => -1,
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> i8 {
        direction.delta()
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::Down),
            -1 => Ok(Direction::Up),
            other => Err(format!("zig-zag direction must be 1 or -1, got {}", other)),
        }
    }
}

/// A character read out of the grid, with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadPosition {
    pub row: usize,
    pub col: usize,
    pub ch: char,
}

/// One cell of the rail fence grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cell {
    #[default]
    Empty,
    /// Placeholder (`*`) set during decrypt's marking phase.
    Marked,
    Filled(char),
}

impl Cell {
    pub fn char(self) -> Option<char> {
        match self {
            Cell::Filled(ch) => Some(ch),
            _ => None,
        }
    }
}

/// Fixed-size `rows x cols` rail fence grid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            cols,
            cells: vec![vec![Cell::Empty; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Row-major iterator over `(row, col, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, cells)| cells.iter().enumerate().map(move |(c, cell)| (r, c, *cell)))
    }

    /// Each row as text: `.` for empty, `*` for marked.
    pub fn render_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| match cell {
                        Cell::Empty => '.',
                        Cell::Marked => '*',
                        Cell::Filled(ch) => *ch,
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.render_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_empty() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert!(grid.iter().all(|(_, _, cell)| cell == Cell::Empty));
    }

    #[test]
    fn zero_column_grid_keeps_its_rows() {
        let grid = Grid::new(4, 0);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 0);
        assert_eq!(grid.render_rows(), vec!["", "", "", ""]);
    }

    #[test]
    fn grid_renders_placeholders_and_chars() {
        let mut grid = Grid::new(2, 3);
        grid.set(0, 0, Cell::Filled('A'));
        grid.set(1, 1, Cell::Marked);
        assert_eq!(grid.to_string(), "A..\n.*.");
        assert_eq!(grid.get(0, 0).and_then(Cell::char), Some('A'));
        assert_eq!(grid.get(1, 1).and_then(Cell::char), None);
        assert_eq!(grid.get(5, 5), None);
    }

    #[test]
    fn snapshot_is_independent_of_later_writes() {
        let mut grid = Grid::new(2, 2);
        let snapshot = grid.clone();
        grid.set(0, 0, Cell::Filled('Z'));
        assert_eq!(snapshot.get(0, 0), Some(Cell::Empty));
    }

    #[test]
    fn direction_serializes_as_signed_delta() {
        assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "-1");
        let up: Direction = serde_json::from_str("-1").unwrap();
        assert_eq!(up, Direction::Up);
        assert!(serde_json::from_str::<Direction>("0").is_err());
    }

    #[test]
    fn cell_serde_roundtrip() {
        let cells = vec![Cell::Empty, Cell::Marked, Cell::Filled('q')];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"["empty","marked",{"filled":"q"}]"#);
        let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cells);
    }
}
