//! Solution of the assembled linear system and conversion to a grid field.

use crate::{
  error::{LaplaceError, Result},
  grid::Grid,
};

use common::linalg::nalgebra::{Matrix, Vector};

/// Solves $A u = b$ for square $A$.
///
/// Implement this to replace the dense factorization, e.g. for large grids.
pub trait LinearSolver {
  fn solve(&self, a: &Matrix, b: &Vector) -> Result<Vector>;
}

/// Dense LU factorization with partial pivoting.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenseLu;

impl LinearSolver for DenseLu {
  fn solve(&self, a: &Matrix, b: &Vector) -> Result<Vector> {
    assert!(a.is_square(), "system matrix must be square");
    assert_eq!(a.nrows(), b.len(), "system matrix and rhs must match");

    let lu = na::LU::new(a.clone());
    if !lu.is_invertible() {
      return Err(LaplaceError::SingularMatrix);
    }
    let sol = lu.solve(b).ok_or(LaplaceError::SingularMatrix)?;

    tracing::debug!(size = a.nrows(), "solved dense system");
    Ok(sol)
  }
}

/// Interior field with rows along y and columns along x.
pub fn reshape_solution(sol: &Vector, grid: &Grid) -> Matrix {
  assert_eq!(sol.len(), grid.ninterior());
  Matrix::from_fn(grid.ninterior_y(), grid.ninterior_x(), |r, c| {
    sol[grid.node_to_linear(c, r)]
  })
}

/// Inverse of [`reshape_solution`].
pub fn flatten_field(field: &Matrix, grid: &Grid) -> Vector {
  assert_eq!(field.shape(), (grid.ninterior_y(), grid.ninterior_x()));
  Vector::from_fn(grid.ninterior(), |k, _| {
    let [i, j] = grid.linear_to_node(k);
    field[(j, i)]
  })
}
