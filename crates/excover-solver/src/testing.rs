//! Test utilities shared by the solver's unit tests.

use excover_core::Matrix;
use proptest::prelude::*;

/// The 6x7 instance from Knuth's "Dancing Links" paper.
///
/// Its only exact cover is rows 0, 3 and 4.
pub fn knuth_matrix() -> Matrix {
    "
    0010110
    1001001
    0110010
    1001000
    0100001
    0001101
    "
    .parse()
    .unwrap()
}

/// Panics with the offending column if `rows` is not an exact cover of `matrix`.
#[track_caller]
pub fn assert_exact_cover(matrix: &Matrix, rows: &[usize]) {
    if let Err(violation) = matrix.verify_cover(rows) {
        panic!("rows {rows:?} are not an exact cover: {violation}\n{matrix}");
    }
}

/// Returns whether any subset of rows covers `matrix` exactly, by enumeration.
pub fn has_exact_cover(matrix: &Matrix) -> bool {
    assert!(matrix.height() < 16, "brute force is limited to small matrices");
    (0_u32..1 << matrix.height()).any(|mask| {
        let rows: Vec<usize> = (0..matrix.height())
            .filter(|row| mask & (1 << row) != 0)
            .collect();
        matrix.is_exact_cover(&rows)
    })
}

/// Small matrices, dense enough that both outcomes are common.
pub fn matrix_strategy() -> impl Strategy<Value = Matrix> {
    (0_usize..=7, 0_usize..=6).prop_flat_map(|(height, width)| {
        prop::collection::vec(prop::bool::weighted(0.35), height * width)
            .prop_map(move |cells| Matrix::new(height, width, cells).unwrap())
    })
}
