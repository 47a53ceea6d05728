//! Tensor-product grid on a rectangle.
//!
//! The rectangle $[x_0, x_1] times [y_0, y_1]$ is split into `ncells_x` columns
//! and `ncells_y` rows of cells, giving `(ncells_x+1) * (ncells_y+1)` vertices.
//! Vertices are addressed by `[p, q]` with `p` along x and `q` along y.
//! Interior nodes are addressed by `(i, j) = (p-1, q-1)` and
//! flattened with the y index running fastest.

use crate::error::{LaplaceError, Result};

use common::linalg::nalgebra::Vector;

/// Relative tolerance under which the two mesh widths count as equal.
const SQUARE_CELL_RTOL: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
  x_range: [f64; 2],
  y_range: [f64; 2],
  ncells_x: usize,
  ncells_y: usize,
}

// constructors
impl Grid {
  pub fn new(
    x_range: [f64; 2],
    y_range: [f64; 2],
    ncells_x: usize,
    ncells_y: usize,
  ) -> Result<Self> {
    if ncells_x < 2 || ncells_y < 2 {
      return Err(LaplaceError::InvalidGrid(format!(
        "need at least 2 cells per axis for an interior node, got {ncells_x}x{ncells_y}"
      )));
    }
    for (axis, [min, max]) in [("x", x_range), ("y", y_range)] {
      if !min.is_finite() || !max.is_finite() {
        return Err(LaplaceError::InvalidGrid(format!(
          "{axis}-extent [{min}, {max}] is not finite"
        )));
      }
      if max <= min {
        return Err(LaplaceError::InvalidGrid(format!(
          "{axis}-extent [{min}, {max}] is empty or inverted"
        )));
      }
      if !(max - min).is_finite() {
        return Err(LaplaceError::InvalidGrid(format!(
          "{axis}-extent [{min}, {max}] has a span that overflows"
        )));
      }
    }

    let grid = Self {
      x_range,
      y_range,
      ncells_x,
      ncells_y,
    };

    let [hx, hy] = grid.spacing();
    if (hx - hy).abs() > SQUARE_CELL_RTOL * hx.max(hy) {
      tracing::warn!(
        hx,
        hy,
        "cells are not square; nine-point weights are only consistent for hx == hy"
      );
    }
    tracing::debug!(ncells_x, ncells_y, ninterior = grid.ninterior(), "built grid");

    Ok(grid)
  }

  pub fn new_unit_square(ncells_axis: usize) -> Result<Self> {
    Self::new([0.0, 1.0], [0.0, 1.0], ncells_axis, ncells_axis)
  }
}

// getters
impl Grid {
  pub fn x_range(&self) -> [f64; 2] {
    self.x_range
  }
  pub fn y_range(&self) -> [f64; 2] {
    self.y_range
  }
  pub fn ncells_x(&self) -> usize {
    self.ncells_x
  }
  pub fn ncells_y(&self) -> usize {
    self.ncells_y
  }
  pub fn ninterior_x(&self) -> usize {
    self.ncells_x - 1
  }
  pub fn ninterior_y(&self) -> usize {
    self.ncells_y - 1
  }
  /// Number of unknowns of the linear system.
  pub fn ninterior(&self) -> usize {
    self.ninterior_x() * self.ninterior_y()
  }

  /// Mesh widths `[hx, hy]`.
  pub fn spacing(&self) -> [f64; 2] {
    [
      (self.x_range[1] - self.x_range[0]) / self.ncells_x as f64,
      (self.y_range[1] - self.y_range[0]) / self.ncells_y as f64,
    ]
  }

  pub fn x(&self, p: usize) -> f64 {
    axis_coord(self.x_range, self.ncells_x, p)
  }
  pub fn y(&self, q: usize) -> f64 {
    axis_coord(self.y_range, self.ncells_y, q)
  }

  /// All `ncells_x + 1` x-coordinates, both endpoints included.
  pub fn xs(&self) -> Vector {
    Vector::from_fn(self.ncells_x + 1, |p, _| self.x(p))
  }
  /// All `ncells_y + 1` y-coordinates, both endpoints included.
  pub fn ys(&self) -> Vector {
    Vector::from_fn(self.ncells_y + 1, |q, _| self.y(q))
  }

  pub fn interior_xs(&self) -> Vector {
    Vector::from_fn(self.ninterior_x(), |i, _| self.x(i + 1))
  }
  pub fn interior_ys(&self) -> Vector {
    Vector::from_fn(self.ninterior_y(), |j, _| self.y(j + 1))
  }
}

// interior node numbering
impl Grid {
  pub fn node_to_linear(&self, i: usize, j: usize) -> usize {
    debug_assert!(i < self.ninterior_x() && j < self.ninterior_y());
    i * self.ninterior_y() + j
  }

  pub fn linear_to_node(&self, k: usize) -> [usize; 2] {
    debug_assert!(k < self.ninterior());
    [k / self.ninterior_y(), k % self.ninterior_y()]
  }

  /// Grid vertex `[p, q]` of interior node `(i, j)`.
  pub fn node_vertex(&self, i: usize, j: usize) -> [usize; 2] {
    [i + 1, j + 1]
  }

  pub fn is_boundary_vertex(&self, [p, q]: [usize; 2]) -> bool {
    p == 0 || q == 0 || p == self.ncells_x || q == self.ncells_y
  }
}

fn axis_coord([min, max]: [f64; 2], ncells: usize, ivertex: usize) -> f64 {
  debug_assert!(ivertex <= ncells);
  if ivertex == ncells {
    max
  } else {
    min + ivertex as f64 * (max - min) / ncells as f64
  }
}
