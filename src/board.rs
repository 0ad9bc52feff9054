use std::fmt;

use itertools::{iproduct, Itertools};
use rand::Rng;
use tracing::debug;

use crate::cell::{Cell, Point};
use crate::error::{GameError, Result};

/// Board dimensions. The grid holds `width` rows of `height` cells each, so a
/// point is on the board when `row < width && col < height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize,
}

impl BoardSize {
    pub fn new(width: usize, height: usize) -> BoardSize {
        BoardSize { width, height }
    }

    /// Cell count, saturating for dimensions no board could be built with.
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    pub fn checked_area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.row() < self.width && point.col() < self.height
    }

    pub fn points(&self) -> Vec<Point> {
        (0..self.area()).filter_map(|x| self.point_from_integer(x)).collect()
    }

    pub fn point_from_integer(&self, x: usize) -> Option<Point> {
        if x >= self.area() {
            return None;
        }
        Some(Point(x / self.height, x % self.height))
    }

    /// Every in-bounds point among the 8 compass directions around `point`.
    pub fn neighbor_points(&self, point: &Point) -> Vec<Point> {
        iproduct!(-1i64..=1, -1i64..=1)
            .filter(|&(i, j)| i != 0 || j != 0)
            .map(|(i, j)| (point.0 as i64 + i, point.1 as i64 + j))
            .filter(|&(x, y)| x >= 0 && y >= 0)
            .map(|(x, y)| Point(x as usize, y as usize))
            .filter(|neighbor| self.contains(neighbor))
            .collect()
    }

    fn check_capacity(&self, num_mines: usize) -> Result<()> {
        match self.checked_area() {
            Some(capacity) if num_mines <= capacity => Ok(()),
            _ => Err(GameError::InvalidConfiguration {
                width: self.width,
                height: self.height,
                mines: num_mines,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    size: BoardSize,
    field: Vec<Vec<Cell>>,
    num_mines: usize,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl Board {
    /// Builds a board with `num_mines` mines placed at random. The steps run in
    /// a fixed order: allocate the grid, link neighbors, place mines, count.
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        num_mines: usize,
        rng: &mut R,
    ) -> Result<Board> {
        let size = BoardSize::new(width, height);
        size.check_capacity(num_mines)?;

        let mut board = Board::allocate(size, num_mines);
        board.find_neighbors();
        board.add_mines(rng);
        board.update_counts();
        debug!(width, height, num_mines, "board generated");
        Ok(board)
    }

    /// Builds a board with mines exactly at `mines`. Repeated points count once.
    pub fn with_mines(width: usize, height: usize, mines: &[Point]) -> Result<Board> {
        let size = BoardSize::new(width, height);
        if let Some(point) = mines.iter().find(|point| !size.contains(point)) {
            return Err(GameError::InvalidCoordinates {
                row: point.0,
                col: point.1,
            });
        }
        let mines: Vec<Point> = mines.iter().copied().unique().collect();
        size.check_capacity(mines.len())?;

        let mut board = Board::allocate(size, mines.len());
        board.find_neighbors();
        for point in &mines {
            board.retrieve_cell_mutable(point).has_mine = true;
        }
        board.update_counts();
        debug!(width, height, num_mines = mines.len(), "board laid out");
        Ok(board)
    }

    fn allocate(size: BoardSize, num_mines: usize) -> Board {
        let mut field = Vec::with_capacity(size.width);
        for _ in 0..size.width {
            let mut row_vec = Vec::with_capacity(size.height);
            for _ in 0..size.height {
                row_vec.push(Cell::create_empty());
            }
            field.push(row_vec);
        }

        Board {
            size,
            field,
            num_mines,
        }
    }

    fn find_neighbors(&mut self) {
        for point in self.size.points() {
            let neighbors = self.size.neighbor_points(&point);
            self.retrieve_cell_mutable(&point).neighbors = neighbors;
        }
    }

    // rejection sampling, terminates because capacity was checked up front
    fn add_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut placed = 0;
        while placed < self.num_mines {
            let point = Point(
                rng.gen_range(0..self.size.width),
                rng.gen_range(0..self.size.height),
            );
            let cell = self.retrieve_cell_mutable(&point);
            if !cell.has_mine {
                cell.has_mine = true;
                placed += 1;
            }
        }
    }

    fn update_counts(&mut self) {
        for point in self.size.points() {
            let count = self.count_mined_neighbors(&point);
            self.retrieve_cell_mutable(&point).adjacent_mines = count;
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn num_mines(&self) -> usize {
        self.num_mines
    }

    /// Validates raw input coordinates, which may be negative or past the edge.
    pub fn point_at(&self, row: i32, col: i32) -> Option<Point> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        let point = Point(row, col);
        if self.size.contains(&point) {
            Some(point)
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// Panics if `point` is not on the board.
    pub fn cell(&self, point: &Point) -> &Cell {
        self.retrieve_cell(point)
    }

    pub fn get(&self, point: &Point) -> Option<&Cell> {
        self.field.get(point.0).and_then(|row| row.get(point.1))
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.field
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.field.iter().flatten()
    }

    fn retrieve_cell(&self, point: &Point) -> &Cell {
        &self.field[point.0][point.1]
    }

    pub(crate) fn retrieve_cell_mutable(&mut self, point: &Point) -> &mut Cell {
        &mut self.field[point.0][point.1]
    }

    pub fn neighbor_points(&self, point: &Point) -> &[Point] {
        self.retrieve_cell(point).neighbors()
    }

    pub fn mine_points(&self) -> Vec<Point> {
        self.size
            .points()
            .into_iter()
            .filter(|point| self.retrieve_cell(point).has_mine)
            .collect()
    }

    pub fn count_mined_neighbors(&self, point: &Point) -> usize {
        self.neighbor_points(point)
            .iter()
            .filter(|neighbor| self.retrieve_cell(neighbor).has_mine)
            .count()
    }

    pub fn unrevealed_count(&self) -> usize {
        self.cells().filter(|cell| !cell.revealed).count()
    }

    /// Reveals `point`, cascading through connected null cells and stopping at
    /// the numbered border around them. Flagged cells are left covered and the
    /// cascade does not pass through them.
    /// Returns how many cells were newly revealed.
    pub fn reveal_flood_from(&mut self, point: &Point) -> usize {
        let mut revealed = 0;
        let was_null = {
            let cell = self.retrieve_cell_mutable(point);
            if !cell.revealed {
                cell.revealed = true;
                revealed += 1;
            }
            cell.is_null_cell()
        };
        if !was_null {
            return revealed;
        }

        let mut pending = vec![*point];
        while let Some(current) = pending.pop() {
            let neighbors = self.retrieve_cell(&current).neighbors.clone();
            for neighbor in neighbors {
                let cell = self.retrieve_cell_mutable(&neighbor);
                if cell.revealed || cell.flagged {
                    continue;
                }
                cell.revealed = true;
                revealed += 1;
                if cell.is_null_cell() {
                    pending.push(neighbor);
                }
            }
        }
        revealed
    }

    pub fn reveal_all(&mut self) {
        self.field
            .iter_mut()
            .flatten()
            .for_each(|cell| cell.revealed = true);
    }

    pub fn reveal_mines(&mut self) {
        self.field
            .iter_mut()
            .flatten()
            .filter(|cell| cell.has_mine)
            .for_each(|cell| cell.revealed = true);
    }

    fn to_string(&self) -> String {
        let mut result = "   ".to_owned();
        result += &(0..self.size.height).map(|j| format!("{:>2}", j)).join("");
        result += "\n";
        for (i, row) in self.field.iter().enumerate() {
            result += &format!("{:>2} ", i);
            result += &row.iter().map(|cell| format!("{:>2}", cell.to_str())).join("");
            result += "\n";
        }
        result
    }
}
