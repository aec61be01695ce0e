//! Line scanning shared by move legality, end-of-game detection and the
//! heuristic.
//!
//! [`lines`] enumerates every maximal line of the board in the four canonical
//! directions, and [`windows`] slides a fixed-width window along one line,
//! keeping per-player piece counts incrementally (add the entering cell,
//! subtract the leaving cell). [`ray`] walks outward from a single cell and
//! backs the flank rule and run-length checks.

use super::board::{Board, Cell, COLS, ROWS};

/// The four canonical line directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Down-right: row and column both increase.
    DiagonalDown,
    /// Up-right: row decreases while the column increases.
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// (row, col) step of one cell along this direction
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }
}

/// All eight compass steps, used by the flank rule.
pub const COMPASS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A maximal run of cells across the board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub len: usize,
}

impl Line {
    /// Position of the `i`-th cell of the line. `i` must be below `len`.
    pub fn cell(&self, i: usize) -> (usize, usize) {
        let (dr, dc) = self.direction.step();
        let row = self.row as isize + dr * i as isize;
        let col = self.col as isize + dc * i as isize;
        (row as usize, col as usize)
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len).map(move |i| self.cell(i))
    }
}

/// Every line holding at least `min_len` cells.
///
/// Order: rows top to bottom, columns left to right, down-right diagonals
/// (anchored on the left edge from the lowest usable row upward, then along
/// the top edge), up-right diagonals (anchored on the left edge from the
/// highest usable row downward, then along the bottom edge). Diagonals shorter
/// than `min_len` are never produced.
pub fn lines(min_len: usize) -> impl Iterator<Item = Line> {
    let min_len = min_len.max(1);
    let line = |row, col, direction, len| Line {
        row,
        col,
        direction,
        len,
    };

    let rows = (0..ROWS).map(move |row| line(row, 0, Direction::Horizontal, COLS));
    let cols = (0..COLS).map(move |col| line(0, col, Direction::Vertical, ROWS));

    let down = (1..=ROWS.saturating_sub(min_len))
        .rev()
        .map(move |row| line(row, 0, Direction::DiagonalDown, (ROWS - row).min(COLS)))
        .chain(
            (0..=COLS.saturating_sub(min_len))
                .map(move |col| line(0, col, Direction::DiagonalDown, (COLS - col).min(ROWS))),
        );

    let up = (min_len - 1..ROWS - 1)
        .map(move |row| line(row, 0, Direction::DiagonalUp, (row + 1).min(COLS)))
        .chain(
            (0..=COLS.saturating_sub(min_len)).map(move |col| {
                line(ROWS - 1, col, Direction::DiagonalUp, (COLS - col).min(ROWS))
            }),
        );

    rows.chain(cols)
        .chain(down)
        .chain(up)
        .filter(move |l| l.len >= min_len)
}

/// Piece counts of one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowCounts {
    pub black: usize,
    pub white: usize,
}

impl WindowCounts {
    fn add(&mut self, cell: Cell) {
        match cell {
            Cell::Black => self.black += 1,
            Cell::White => self.white += 1,
            Cell::Empty => {}
        }
    }

    fn remove(&mut self, cell: Cell) {
        match cell {
            Cell::Black => self.black -= 1,
            Cell::White => self.white -= 1,
            Cell::Empty => {}
        }
    }
}

/// Sliding window over a single line.
pub struct Windows<'a> {
    board: &'a Board,
    line: Line,
    width: usize,
    next: usize,
    counts: WindowCounts,
}

impl Iterator for Windows<'_> {
    type Item = WindowCounts;

    fn next(&mut self) -> Option<WindowCounts> {
        if self.next >= self.line.len {
            return None;
        }

        let (row, col) = self.line.cell(self.next);
        self.counts.add(self.board.get(row, col));
        let current = self.counts;

        let (row, col) = self.line.cell(self.next + 1 - self.width);
        self.counts.remove(self.board.get(row, col));
        self.next += 1;

        Some(current)
    }
}

/// Slide a `width`-cell window along `line`, yielding the counts of every
/// full window in order.
pub fn windows(board: &Board, line: Line, width: usize) -> Windows<'_> {
    let width = width.max(1);
    let mut counts = WindowCounts::default();
    let next = if line.len < width {
        line.len
    } else {
        for i in 0..width - 1 {
            let (row, col) = line.cell(i);
            counts.add(board.get(row, col));
        }
        width - 1
    };

    Windows {
        board,
        line,
        width,
        next,
        counts,
    }
}

/// Every `width`-cell window on the board, line by line in [`lines`] order.
pub fn all_windows(board: &Board, width: usize) -> impl Iterator<Item = WindowCounts> + '_ {
    lines(width).flat_map(move |line| windows(board, line, width))
}

/// Cells walked outward from (row, col) along `step`, excluding the origin,
/// until the edge of the board.
pub fn ray(
    board: &Board,
    row: usize,
    col: usize,
    step: (isize, isize),
) -> impl Iterator<Item = Cell> + '_ {
    let (dr, dc) = step;
    (1..).map_while(move |i: isize| board.get_signed(row as isize + dr * i, col as isize + dc * i))
}

/// Length of the unbroken run of `cell` starting next to (row, col) along `step`.
pub fn run_length(board: &Board, row: usize, col: usize, step: (isize, isize), cell: Cell) -> usize {
    ray(board, row, col, step).take_while(|&c| c == cell).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(direction: Direction, min_len: usize) -> usize {
        lines(min_len).filter(|l| l.direction == direction).count()
    }

    #[test]
    fn test_five_cell_lines() {
        assert_eq!(count(Direction::Horizontal, 5), 8);
        assert_eq!(count(Direction::Vertical, 5), 8);
        // Diagonals of length 5..=8 exist in 7 positions per orientation.
        assert_eq!(count(Direction::DiagonalDown, 5), 7);
        assert_eq!(count(Direction::DiagonalUp, 5), 7);
        assert!(lines(5).all(|l| l.len >= 5));
    }

    #[test]
    fn test_three_cell_lines_cover_short_diagonals() {
        assert_eq!(count(Direction::DiagonalDown, 3), 11);
        assert_eq!(count(Direction::DiagonalUp, 3), 11);
        assert!(lines(3).any(|l| l.direction == Direction::DiagonalDown && l.len == 3));
    }

    #[test]
    fn test_diagonal_cells_stay_on_board() {
        for line in lines(1) {
            for (row, col) in line.cells() {
                assert!(row < ROWS && col < COLS, "{line:?} left the board");
            }
        }
    }

    #[test]
    fn test_every_diagonal_cell_pair_covered_once() {
        // Each cell lies on exactly one diagonal of each orientation.
        for direction in [Direction::DiagonalDown, Direction::DiagonalUp] {
            let mut seen = [[0; COLS]; ROWS];
            for line in lines(1).filter(|l| l.direction == direction) {
                for (row, col) in line.cells() {
                    seen[row][col] += 1;
                }
            }
            assert!(seen.iter().flatten().all(|&n| n == 1), "{direction:?}");
        }
    }

    #[test]
    fn test_line_order_starts_with_rows() {
        let first: Vec<Line> = lines(5).take(2).collect();
        assert_eq!(first[0].direction, Direction::Horizontal);
        assert_eq!(first[0].row, 0);
        assert_eq!(first[1].row, 1);
    }

    #[test]
    fn test_windows_slide_incrementally() {
        let mut board = Board::new();
        board.set(7, 0, Cell::Black);
        board.set(7, 1, Cell::Black);
        board.set(7, 3, Cell::White);

        let bottom = lines(3)
            .find(|l| l.direction == Direction::Horizontal && l.row == 7)
            .unwrap();
        let got: Vec<(usize, usize)> = windows(&board, bottom, 3)
            .map(|w| (w.black, w.white))
            .collect();
        assert_eq!(got, vec![(2, 0), (1, 1), (0, 1), (0, 1), (0, 0), (0, 0)]);
    }

    #[test]
    fn test_windows_on_short_line() {
        let board = Board::new();
        let line = Line {
            row: 0,
            col: 5,
            direction: Direction::DiagonalDown,
            len: 3,
        };
        assert_eq!(windows(&board, line, 5).count(), 0);
        assert_eq!(windows(&board, line, 3).count(), 1);
    }

    #[test]
    fn test_all_windows_count() {
        let board = Board::new();
        // rows + cols: 16 lines * 4 windows; diagonals: 2 * (1+2+3+4+3+2+1)
        assert_eq!(all_windows(&board, 5).count(), 16 * 4 + 2 * 16);
    }

    #[test]
    fn test_ray_and_run_length() {
        let mut board = Board::new();
        board.set(7, 1, Cell::White);
        board.set(7, 2, Cell::White);
        board.set(7, 3, Cell::Black);

        let cells: Vec<Cell> = ray(&board, 7, 0, (0, 1)).take(3).collect();
        assert_eq!(cells, vec![Cell::White, Cell::White, Cell::Black]);
        assert_eq!(run_length(&board, 7, 0, (0, 1), Cell::White), 2);
        assert_eq!(ray(&board, 7, 0, (1, 0)).count(), 0);
    }
}
