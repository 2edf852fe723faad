//! Fixed-size board grid of optional card keys.

use serde::{Deserialize, Serialize};

use super::location::Location;
use crate::core::CardGuid;

/// Row-major grid. Cells hold arena keys of champions and crystals.
///
/// ```
/// use crystal_tactics::board::{Board, Location};
/// use crystal_tactics::core::CardGuid;
///
/// let mut board = Board::new(7, 5);
/// board.place(Location::new(6, 2), CardGuid(1));
///
/// assert_eq!(board.get(Location::new(6, 2)), Some(CardGuid(1)));
/// assert_eq!(board.find(CardGuid(1)), Some(Location::new(6, 2)));
/// assert_eq!(board.get(Location::new(9, 9)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: i32,
    cols: i32,
    cells: Vec<Option<CardGuid>>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "Board needs at least one cell");
        Self {
            rows,
            cols,
            cells: vec![None; (rows * cols) as usize],
        }
    }

    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[must_use]
    pub fn in_bounds(&self, location: Location) -> bool {
        (0..self.rows).contains(&location.row) && (0..self.cols).contains(&location.col)
    }

    fn index(&self, location: Location) -> Option<usize> {
        self.in_bounds(location)
            .then(|| (location.row * self.cols + location.col) as usize)
    }

    /// Card at a location. Out-of-bounds locations are empty.
    #[must_use]
    pub fn get(&self, location: Location) -> Option<CardGuid> {
        self.index(location).and_then(|i| self.cells[i])
    }

    #[must_use]
    pub fn is_empty_at(&self, location: Location) -> bool {
        self.in_bounds(location) && self.get(location).is_none()
    }

    /// Put a card in a cell, returning the previous occupant.
    ///
    /// Ignored for out-of-bounds locations.
    pub fn place(&mut self, location: Location, card: CardGuid) -> Option<CardGuid> {
        let i = self.index(location)?;
        self.cells[i].replace(card)
    }

    /// Empty a cell, returning its occupant.
    pub fn clear(&mut self, location: Location) -> Option<CardGuid> {
        let i = self.index(location)?;
        self.cells[i].take()
    }

    /// Location of a card, if it is on the board.
    #[must_use]
    pub fn find(&self, card: CardGuid) -> Option<Location> {
        self.occupied().find(|&(_, guid)| guid == card).map(|(loc, _)| loc)
    }

    /// Every cell location, row by row.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Location::new(row, col)))
    }

    /// Occupied cells, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (Location, CardGuid)> + '_ {
        self.locations()
            .filter_map(move |loc| self.get(loc).map(|guid| (loc, guid)))
    }
}
