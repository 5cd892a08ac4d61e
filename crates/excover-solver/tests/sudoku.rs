//! Solving sudoku puzzles through their exact cover encoding.

use excover_core::Matrix;
use excover_solver::solve_rows;

/// Candidate rows in (cell, digit) order, with candidates that contradict a
/// given left out. Returns the rows and the (cell, digit) of each.
fn encode(puzzle: &str) -> (Vec<Vec<bool>>, Vec<(usize, u8)>) {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for (cell, ch) in puzzle.chars().enumerate() {
        let given = ch.to_digit(10).filter(|&d| d > 0);
        let (y, x) = (cell / 9, cell % 9);
        let b = (y / 3) * 3 + x / 3;
        for digit in 0..9_usize {
            if given.is_some_and(|given| given as usize != digit + 1) {
                continue;
            }
            let mut row = vec![false; 324];
            row[cell] = true;
            row[81 + y * 9 + digit] = true;
            row[162 + x * 9 + digit] = true;
            row[243 + b * 9 + digit] = true;
            rows.push(row);
            labels.push((cell, u8::try_from(digit + 1).unwrap()));
        }
    }
    (rows, labels)
}

fn solve_sudoku(puzzle: &str) -> Option<String> {
    assert_eq!(puzzle.len(), 81);
    let (rows, labels) = encode(puzzle);
    let solution = solve_rows(324, &rows).unwrap()?;
    assert_eq!(solution.len(), 81);

    let mut grid = [0_u8; 81];
    for &row in solution.rows() {
        let (cell, digit) = labels[row];
        assert_eq!(grid[cell], 0, "cell {cell} filled twice");
        grid[cell] = digit;
    }
    Some(grid.iter().map(|d| char::from(b'0' + d)).collect())
}

fn assert_valid_grid(grid: &str) {
    let digits = grid.bytes().map(|b| b - b'0').collect::<Vec<_>>();
    let houses = (0..9).flat_map(|i| {
        let row = (0..9).map(move |j| i * 9 + j).collect::<Vec<_>>();
        let column = (0..9).map(move |j| j * 9 + i).collect::<Vec<_>>();
        let boxed = (0..9)
            .map(move |j| (i / 3 * 3 + j / 3) * 9 + i % 3 * 3 + j % 3)
            .collect::<Vec<_>>();
        [row, column, boxed]
    });
    for house in houses {
        let mut seen = house.iter().map(|&cell| digits[cell]).collect::<Vec<_>>();
        seen.sort_unstable();
        assert_eq!(seen, (1..=9).collect::<Vec<u8>>(), "invalid house {house:?}");
    }
}

#[test]
fn test_classic_puzzle() {
    let puzzle =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    let solution = solve_sudoku(puzzle).unwrap();
    assert_eq!(
        solution,
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179"
    );
}

#[test]
fn test_hard_puzzle() {
    let puzzle =
        "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..";
    let solution = solve_sudoku(puzzle).unwrap();
    assert_valid_grid(&solution);
    for (given, solved) in puzzle.chars().zip(solution.chars()) {
        if given != '.' {
            assert_eq!(given, solved);
        }
    }
}

#[test]
fn test_empty_grid() {
    let solution = solve_sudoku(&".".repeat(81)).unwrap();
    assert_valid_grid(&solution);
}

#[test]
fn test_contradictory_givens() {
    let mut puzzle = ".".repeat(81);
    puzzle.replace_range(0..2, "11");
    assert_eq!(solve_sudoku(&puzzle), None);
}

#[test]
fn test_encoding_is_a_matrix() {
    let (rows, _) = encode(&".".repeat(81));
    let matrix = Matrix::from_rows(324, &rows).unwrap();
    assert_eq!(matrix.height(), 729);
    assert_eq!(matrix.ones(), 729 * 4);
    assert!((0..324).all(|column| matrix.column_population(column) == 9));
}
