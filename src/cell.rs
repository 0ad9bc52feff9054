use std::fmt;

/// Grid address of a cell: `Point(row, col)`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Point(pub usize, pub usize);

impl Point {
    pub fn row(&self) -> usize {
        self.0
    }

    pub fn col(&self) -> usize {
        self.1
    }

    pub fn distance(&self, other: &Point) -> usize {
        //l-inf norm, neighbors are exactly the points at distance 1
        let rows = (self.0 as i64 - other.0 as i64).abs();
        let cols = (self.1 as i64 - other.1 as i64).abs();
        rows.max(cols) as usize
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// One square of the grid. Cells carry no behaviour of their own; the board
/// mutates them and everything else only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub(crate) has_mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent_mines: usize,
    pub(crate) neighbors: Vec<Point>,
}

impl Cell {
    pub(crate) fn create_empty() -> Cell {
        Cell {
            has_mine: false,
            revealed: false,
            flagged: false,
            adjacent_mines: 0,
            neighbors: Vec::with_capacity(8),
        }
    }

    pub fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn adjacent_mine_count(&self) -> usize {
        self.adjacent_mines
    }

    /// Addresses of the up-to-8 cells touching this one, resolved through the
    /// owning board.
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    /// A safe cell with no mined neighbors, the seed of a cascade.
    pub fn is_null_cell(&self) -> bool {
        !self.has_mine && self.adjacent_mines == 0
    }

    pub(crate) fn to_str(&self) -> String {
        match (self.revealed, self.flagged, self.has_mine) {
            (false, true, _) => String::from("▶"),
            (false, false, _) => String::from("□"),
            (true, _, true) => String::from("X"),
            (true, _, false) => {
                if self.adjacent_mines == 0 {
                    String::from("_")
                } else {
                    self.adjacent_mines.to_string()
                }
            }
        }
    }
}

#[cfg(test)]
mod cell_tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_cell_is_blank() {
        let cell = Cell::create_empty();
        assert!(!cell.has_mine());
        assert!(!cell.is_revealed());
        assert!(!cell.is_flagged());
        assert_eq!(cell.adjacent_mine_count(), 0);
        assert!(cell.neighbors().is_empty());
        assert!(cell.is_null_cell());
    }

    #[test]
    fn to_str_correctness() {
        let mut cell = Cell::create_empty();
        assert_eq!(cell.to_str(), "□");
        cell.flagged = true;
        assert_eq!(cell.to_str(), "▶");
        cell.flagged = false;
        cell.revealed = true;
        assert_eq!(cell.to_str(), "_");
        cell.adjacent_mines = 3;
        assert_eq!(cell.to_str(), "3");
        cell.has_mine = true;
        assert_eq!(cell.to_str(), "X");
        assert!(!cell.is_null_cell());
    }

    #[test]
    fn point_displays_row_then_col() {
        let point = Point(4, 7);
        assert_eq!((point.row(), point.col()), (4, 7));
        assert_eq!(point.to_string(), "(4, 7)");
    }

    proptest! {
        #[test]
        fn distance_to_self_is_zero(x in 0..10_000usize, y in 0..10_000usize) {
            let point = Point(x, y);
            prop_assert_eq!(point.distance(&point), 0);
        }

        #[test]
        fn distance_is_symmetric(x1 in 0..1000usize, y1 in 0..1000usize,
                                 x2 in 0..1000usize, y2 in 0..1000usize) {
            let point1 = Point(x1, y1);
            let point2 = Point(x2, y2);
            prop_assert_eq!(point1.distance(&point2), point2.distance(&point1));
            match point1 == point2 {
                true => prop_assert_eq!(point1.distance(&point2), 0),
                false => prop_assert_ne!(point1.distance(&point2), 0)
            }
        }
    }
}
