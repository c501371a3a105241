//! Rail fence transposition cipher with a grid-snapshot trace.
//!
//! Encrypt writes the text along the zig-zag and reads the rails row by row.
//! Decrypt cannot write along the zig-zag directly because it does not know
//! which ciphertext character belongs to which column, so it runs three
//! phases:
//!
//! 1. **Marking**: walk the zig-zag placing `*` placeholders.
//! 2. **Filling**: scan the grid row-major, giving each placeholder the next
//!    ciphertext character.
//! 3. **Reading**: walk the zig-zag again, collecting the plaintext.
//!
//! A rail count below 2, or one whose grid would exceed [`MAX_GRID_CELLS`],
//! does not panic or return `Err`; the engine returns the input unchanged
//! with a single error-flagged record.

use crate::config::RailFenceConfig;
use crate::engine::{CipherOutput, Mode, TraceEngine};
use crate::error::CipherError;
use crate::step::{Cell, Direction, Grid, Phase, RailFenceStep, ReadPosition, StepDetail};
use crate::trace::{StepTrace, TraceBuilder};
use crate::zigzag::ZigZag;

/// Upper bound on `rails x columns`. Every record clones the grid, so the
/// bound keeps a single request from exhausting memory.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Zig-zag transposition over a configurable number of rails.
#[derive(Debug, Clone, Default)]
pub struct RailFenceEngine {
    config: RailFenceConfig,
}

impl RailFenceEngine {
    pub fn new(config: RailFenceConfig) -> Self {
        RailFenceEngine { config }
    }

    pub fn config(&self) -> &RailFenceConfig {
        &self.config
    }

    /// Validates a rail count, returning it as a grid height.
    pub fn check_rails(rails: i64) -> Result<usize, CipherError> {
        usize::try_from(rails)
            .ok()
            .filter(|&n| n >= 2)
            .ok_or(CipherError::InvalidRails { rails })
    }

    /// Validates a rail count for a text of `cols` characters.
    ///
    /// On top of [`check_rails`](Self::check_rails), the grid must fit in
    /// [`MAX_GRID_CELLS`]. An empty text still counts as one column.
    pub fn check_grid(rails: i64, cols: usize) -> Result<usize, CipherError> {
        let n = Self::check_rails(rails)?;
        match n.checked_mul(cols.max(1)) {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(n),
            _ => Err(CipherError::GridTooLarge {
                rails,
                cols,
                limit: MAX_GRID_CELLS,
            }),
        }
    }

    fn encrypt_rails(&self, text: &str, rails: usize) -> CipherOutput {
        let chars: Vec<char> = text.chars().collect();
        let mut fence = Fence::new(rails, chars.len());
        let mut builder = TraceBuilder::new();

        builder.push(
            "Setup",
            format!(
                "Encrypting {} character(s) on {} rails: an empty {}x{} grid",
                chars.len(),
                rails,
                rails,
                chars.len()
            ),
            fence.snapshot(None, Phase::Filling),
        );

        for visit in ZigZag::new(rails, chars.len()) {
            let ch = chars[visit.col];
            fence.grid.set(visit.row, visit.col, Cell::Filled(ch));
            fence.direction = visit.direction;
            builder.push(
                format!("Place {:?}", ch),
                format!(
                    "Write {:?} on rail {} at column {}, then head {}",
                    ch,
                    visit.row,
                    visit.col,
                    heading(visit.direction)
                ),
                fence.snapshot(Some((visit.row, visit.col)), Phase::Filling),
            );
        }

        fence.direction = Direction::Down;
        builder.push(
            "Placement complete",
            "Every character sits on its rail",
            fence.snapshot(None, Phase::Filling),
        );

        let positions: Vec<(usize, usize)> = fence
            .grid
            .iter()
            .filter(|(_, _, cell)| *cell != Cell::Empty)
            .map(|(row, col, _)| (row, col))
            .collect();
        fence.read(positions);
        builder.push(
            "Read rails",
            format!("Read the rails top to bottom, left to right: {:?}", fence.result),
            fence.snapshot(None, Phase::Reading),
        );

        self.seal(builder, fence, Mode::Encrypt, chars.len())
    }

    fn decrypt_rails(&self, text: &str, rails: usize) -> CipherOutput {
        let chars: Vec<char> = text.chars().collect();
        let mut fence = Fence::new(rails, chars.len());
        let mut builder = TraceBuilder::new();

        builder.push(
            "Setup",
            format!(
                "Decrypting {} character(s) on {} rails: mark the zig-zag on an empty {}x{} grid",
                chars.len(),
                rails,
                rails,
                chars.len()
            ),
            fence.snapshot(None, Phase::Marking),
        );

        let path: Vec<(usize, usize)> = ZigZag::new(rails, chars.len())
            .map(|visit| {
                fence.grid.set(visit.row, visit.col, Cell::Marked);
                fence.direction = visit.direction;
                builder.push(
                    format!("Mark column {}", visit.col),
                    format!(
                        "The zig-zag visits rail {} at column {}",
                        visit.row, visit.col
                    ),
                    fence.snapshot(Some((visit.row, visit.col)), Phase::Marking),
                );
                (visit.row, visit.col)
            })
            .collect();

        fence.direction = Direction::Down;
        builder.push(
            "Marking complete",
            format!("{} position(s) marked; fill them rail by rail", path.len()),
            fence.snapshot(None, Phase::Marking),
        );

        let slots: Vec<(usize, usize)> = fence
            .grid
            .iter()
            .filter(|(_, _, cell)| *cell == Cell::Marked)
            .map(|(row, col, _)| (row, col))
            .collect();
        let stride = self.config.fill_stride_for(chars.len());
        for (index, (&(row, col), &ch)) in slots.iter().zip(&chars).enumerate() {
            fence.grid.set(row, col, Cell::Filled(ch));
            let filled = index + 1;
            if filled % stride == 0 || filled == slots.len() {
                builder.push(
                    "Fill rails",
                    format!(
                        "Filled {} of {} cell(s); {:?} went to rail {} column {}",
                        filled,
                        slots.len(),
                        ch,
                        row,
                        col
                    ),
                    fence.snapshot(Some((row, col)), Phase::Filling),
                );
            }
        }

        fence.read(path);
        builder.push(
            "Read zig-zag",
            format!("Follow the zig-zag to recover the text: {:?}", fence.result),
            fence.snapshot(None, Phase::Reading),
        );

        self.seal(builder, fence, Mode::Decrypt, chars.len())
    }

    fn seal(&self, builder: TraceBuilder, fence: Fence, mode: Mode, chars: usize) -> CipherOutput {
        let trace = builder.finish(
            "Complete",
            format!("{} finished: {:?}", capitalize(mode), fence.result),
            fence.snapshot(None, Phase::Complete),
        );
        tracing::debug!(
            engine = "rail_fence",
            %mode,
            rails = fence.rails,
            chars,
            records = trace.len(),
            "transform complete"
        );
        CipherOutput {
            text: fence.result,
            trace,
        }
    }

    /// Fail-soft path: the input comes back unchanged with an error record.
    fn reject(&self, text: &str, rails: i64, mode: Mode, error: CipherError) -> CipherOutput {
        tracing::warn!(rails, %mode, "rail fence request rejected: {}", error);
        let detail = StepDetail::RailFence(RailFenceStep {
            rails,
            grid_snapshot: Grid::default(),
            cursor_column: None,
            cursor_row: None,
            zigzag_direction: Direction::Down,
            read_order_so_far: Vec::new(),
            result_so_far: text.to_string(),
            phase: Phase::Complete,
        });
        CipherOutput {
            text: text.to_string(),
            trace: StepTrace::error(
                format!("{}; the text is returned unchanged", error),
                detail,
            ),
        }
    }
}

impl TraceEngine for RailFenceEngine {
    fn name(&self) -> &'static str {
        "rail-fence"
    }

    fn encrypt(&self, text: &str, rails: i64) -> CipherOutput {
        match Self::check_grid(rails, text.chars().count()) {
            Ok(n) => self.encrypt_rails(text, n),
            Err(error) => self.reject(text, rails, Mode::Encrypt, error),
        }
    }

    fn decrypt(&self, text: &str, rails: i64) -> CipherOutput {
        match Self::check_grid(rails, text.chars().count()) {
            Ok(n) => self.decrypt_rails(text, n),
            Err(error) => self.reject(text, rails, Mode::Decrypt, error),
        }
    }
}

/// Mutable working state of one transform; records are cloned out of it.
struct Fence {
    rails: usize,
    grid: Grid,
    direction: Direction,
    read_order: Vec<ReadPosition>,
    result: String,
}

impl Fence {
    fn new(rails: usize, cols: usize) -> Self {
        Fence {
            rails,
            grid: Grid::new(rails, cols),
            direction: Direction::Down,
            read_order: Vec::with_capacity(cols),
            result: String::with_capacity(cols),
        }
    }

    /// Collects the filled cells at `positions`, in that order.
    fn read(&mut self, positions: impl IntoIterator<Item = (usize, usize)>) {
        for (row, col) in positions {
            if let Some(ch) = self.grid.get(row, col).and_then(Cell::char) {
                self.read_order.push(ReadPosition { row, col, ch });
                self.result.push(ch);
            }
        }
    }

    fn snapshot(&self, cursor: Option<(usize, usize)>, phase: Phase) -> StepDetail {
        StepDetail::RailFence(RailFenceStep {
            rails: self.rails as i64,
            grid_snapshot: self.grid.clone(),
            cursor_column: cursor.map(|(_, col)| col),
            cursor_row: cursor.map(|(row, _)| row),
            zigzag_direction: self.direction,
            read_order_so_far: self.read_order.clone(),
            result_so_far: self.result.clone(),
            phase,
        })
    }
}

fn heading(direction: Direction) -> &'static str {
    match direction {
        Direction::Down => "down",
        Direction::Up => "up",
    }
}

fn capitalize(mode: Mode) -> &'static str {
    match mode {
        Mode::Encrypt => "Encryption",
        Mode::Decrypt => "Decryption",
    }
}
