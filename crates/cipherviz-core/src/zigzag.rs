//! Zig-zag traversal of a rail fence grid.
//!
//! Visits one cell per column, starting at rail 0 heading down and bouncing
//! off the top and bottom rails. Encrypt placement, decrypt marking and
//! decrypt read-back all walk this same path.

use crate::step::Direction;

/// One cell on the zig-zag path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub row: usize,
    pub col: usize,
    /// Heading after this cell, i.e. towards the next visit.
    pub direction: Direction,
}

/// Iterator over the zig-zag path of a `rails x cols` grid.
///
/// `rails` must be at least 2; callers validate it first.
#[derive(Debug, Clone)]
pub struct ZigZag {
    rails: usize,
    cols: usize,
    col: usize,
    rail: usize,
    direction: Direction,
}

impl ZigZag {
    pub fn new(rails: usize, cols: usize) -> Self {
        debug_assert!(rails >= 2, "zig-zag needs at least two rails");
        ZigZag {
            rails,
            cols,
            col: 0,
            rail: 0,
            direction: Direction::Down,
        }
    }
}

impl Iterator for ZigZag {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        if self.col >= self.cols {
            return None;
        }
        let row = self.rail;
        if self.rail == 0 {
            self.direction = Direction::Down;
        } else if self.rail == self.rails - 1 {
            self.direction = Direction::Up;
        }
        let visit = Visit {
            row,
            col: self.col,
            direction: self.direction,
        };
        self.rail = match self.direction {
            Direction::Down => self.rail + 1,
            Direction::Up => self.rail - 1,
        };
        self.col += 1;
        Some(visit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cols - self.col;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ZigZag {}
