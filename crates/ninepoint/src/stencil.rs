//! System matrix of the nine-point Laplacian on the interior nodes.
//!
//! Up to the factor $1/(6h^2)$ the stencil reads
//! ```text
//!  1   4   1
//!  4 -20   4
//!  1   4   1
//! ```
//! With the y index running fastest, the matrix is block tridiagonal:
//! [`self_block`] couples a column of nodes with itself,
//! [`neighbor_block`] couples it with the columns to its left and right.

use crate::grid::Grid;

use common::linalg::nalgebra::{
  block_tridiagonal, matrix_from_const_diagonals, CooMatrixExt, Matrix,
};

pub type SparseStencil = nas::CooMatrix<f64>;

pub const CENTER_WEIGHT: f64 = -20.0;
pub const DIRECT_WEIGHT: f64 = 4.0;
pub const DIAGONAL_WEIGHT: f64 = 1.0;

/// Weight of the stencil tap at offset `(di, dj)` from the center.
pub fn stencil_weight(di: isize, dj: isize) -> f64 {
  assert!(di.abs() <= 1 && dj.abs() <= 1, "offset outside of stencil");
  match (di, dj) {
    (0, 0) => CENTER_WEIGHT,
    (0, _) | (_, 0) => DIRECT_WEIGHT,
    _ => DIAGONAL_WEIGHT,
  }
}

/// Coupling of a column of `n` nodes with itself.
pub fn self_block(n: usize) -> Matrix {
  matrix_from_const_diagonals(
    &[DIRECT_WEIGHT, CENTER_WEIGHT, DIRECT_WEIGHT],
    &[-1, 0, 1],
    n,
    n,
  )
}

/// Coupling of a column of `n` nodes with an adjacent column.
pub fn neighbor_block(n: usize) -> Matrix {
  matrix_from_const_diagonals(
    &[DIAGONAL_WEIGHT, DIRECT_WEIGHT, DIAGONAL_WEIGHT],
    &[-1, 0, 1],
    n,
    n,
  )
}

/// Dense coefficient matrix $A = I times.o S + T times.o N$ of size `grid.ninterior()`.
pub fn assemble_stencil_matrix(grid: &Grid) -> Matrix {
  let ncolumn = grid.ninterior_y();
  let ncolumns = grid.ninterior_x();

  let matrix = block_tridiagonal(&self_block(ncolumn), &neighbor_block(ncolumn), ncolumns);
  tracing::debug!(size = matrix.nrows(), "assembled dense stencil matrix");
  matrix
}

/// Same matrix as [`assemble_stencil_matrix`], composed block-wise in COO form.
///
/// Input for sparse solvers outside this crate. The dense pipeline
/// uses [`assemble_stencil_matrix`].
pub fn assemble_stencil_matrix_sparse(grid: &Grid) -> SparseStencil {
  let ncolumn = grid.ninterior_y();
  let ncolumns = grid.ninterior_x();

  let self_coo = SparseStencil::from(&self_block(ncolumn));
  let neighbor_coo = SparseStencil::from(&neighbor_block(ncolumn));
  let zero_coo = SparseStencil::zeros(ncolumn, ncolumn);

  let block_rows: Vec<Vec<&SparseStencil>> = (0..ncolumns)
    .map(|r| {
      (0..ncolumns)
        .map(|c| match r.abs_diff(c) {
          0 => &self_coo,
          1 => &neighbor_coo,
          _ => &zero_coo,
        })
        .collect()
    })
    .collect();
  let block_grid: Vec<&[&SparseStencil]> = block_rows.iter().map(Vec::as_slice).collect();

  let matrix = SparseStencil::block(&block_grid);
  tracing::debug!(
    size = matrix.nrows(),
    nnz = matrix.nnz(),
    "assembled sparse stencil matrix"
  );
  matrix
}
