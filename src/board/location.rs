//! Grid locations, distances and directions.
//!
//! Row 0 is the top of the board. `Up` points toward row 0, `Left` toward
//! column 0.

use serde::{Deserialize, Serialize};

/// A board cell address. Signed so that ray arithmetic can step off the
/// board before the bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Location shifted by a row and column delta.
    #[must_use]
    pub const fn offset(self, rows: i32, cols: i32) -> Self {
        Self::new(self.row + rows, self.col + cols)
    }

    /// Location `distance` cells away in a direction.
    #[must_use]
    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let (dr, dc) = direction.delta();
        self.offset(dr * distance, dc * distance)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Facing or travel direction.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum_macros::Display, strum_macros::EnumString,
)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// The four ray directions.
    pub const ORTHOGONAL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Row and column delta of one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::None => (0, 0),
        }
    }

    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Manhattan distance.
#[must_use]
pub fn calculate_distance(a: Location, b: Location) -> u32 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Vertical component of the move from `src` to `dst`.
#[must_use]
pub fn get_row_direction(src: Location, dst: Location) -> Direction {
    match dst.row.cmp(&src.row) {
        std::cmp::Ordering::Less => Direction::Up,
        std::cmp::Ordering::Greater => Direction::Down,
        std::cmp::Ordering::Equal => Direction::None,
    }
}

/// Horizontal component of the move from `src` to `dst`.
#[must_use]
pub fn get_column_direction(src: Location, dst: Location) -> Direction {
    match dst.col.cmp(&src.col) {
        std::cmp::Ordering::Less => Direction::Left,
        std::cmp::Ordering::Greater => Direction::Right,
        std::cmp::Ordering::Equal => Direction::None,
    }
}

/// Facing of a champion acting from `src` toward `dst`.
///
/// The axis with the larger displacement wins; ties go to the row axis.
#[must_use]
pub fn get_champion_direction(src: Location, dst: Location) -> Direction {
    if src.row.abs_diff(dst.row) >= src.col.abs_diff(dst.col) {
        match get_row_direction(src, dst) {
            Direction::None => get_column_direction(src, dst),
            vertical => vertical,
        }
    } else {
        get_column_direction(src, dst)
    }
}
