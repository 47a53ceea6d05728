//! The Laplace boundary value problem on a rectangle and its solution pipeline.

use crate::{
  boundary::{assemble_boundary_vector, BoundaryConditions},
  error::Result,
  grid::Grid,
  lse::{reshape_solution, DenseLu, LinearSolver},
  render::SurfaceRenderer,
  stencil::assemble_stencil_matrix,
};

use common::linalg::nalgebra::{Matrix, Vector};

use std::path::Path;

pub const FIGURE_FILE_NAME: &str = "figure_nine_points.png";

/// $Delta u = 0$ in $[x_0, x_1] times [y_0, y_1]$, $u = g$ on the boundary.
#[derive(Debug)]
pub struct LaplaceProblem {
  x_range: [f64; 2],
  y_range: [f64; 2],
  ncells_x: usize,
  ncells_y: usize,
  boundary: BoundaryConditions,
}

impl LaplaceProblem {
  pub fn new(
    x_range: [f64; 2],
    y_range: [f64; 2],
    ncells_x: usize,
    ncells_y: usize,
    boundary: BoundaryConditions,
  ) -> Self {
    Self {
      x_range,
      y_range,
      ncells_x,
      ncells_y,
      boundary,
    }
  }

  pub fn new_unit_square(ncells_axis: usize, boundary: BoundaryConditions) -> Self {
    Self::new([0.0, 1.0], [0.0, 1.0], ncells_axis, ncells_axis, boundary)
  }

  pub fn with_boundary(mut self, boundary: BoundaryConditions) -> Self {
    self.boundary = boundary;
    self
  }

  pub fn boundary(&self) -> &BoundaryConditions {
    &self.boundary
  }

  pub fn grid(&self) -> Result<Grid> {
    Grid::new(self.x_range, self.y_range, self.ncells_x, self.ncells_y)
  }

  pub fn assemble(&self) -> Result<LinearSystem> {
    let grid = self.grid()?;
    let matrix = assemble_stencil_matrix(&grid);
    let rhs = assemble_boundary_vector(&grid, &self.boundary)?;
    Ok(LinearSystem { grid, matrix, rhs })
  }

  pub fn solve(&self) -> Result<LaplaceSolution> {
    self.solve_with(&DenseLu)
  }

  pub fn solve_with(&self, solver: &impl LinearSolver) -> Result<LaplaceSolution> {
    let _span = tracing::info_span!("solve", ncells_x = self.ncells_x, ncells_y = self.ncells_y)
      .entered();

    let LinearSystem { grid, matrix, rhs } = self.assemble()?;
    let sol = solver.solve(&matrix, &rhs)?;
    let field = reshape_solution(&sol, &grid);

    tracing::info!(
      nunknowns = grid.ninterior(),
      min = field.min(),
      max = field.max(),
      "solved laplace problem"
    );
    Ok(LaplaceSolution { grid, field })
  }
}

/// $A u = b$ over the interior nodes of `grid`.
#[derive(Debug, Clone)]
pub struct LinearSystem {
  pub grid: Grid,
  pub matrix: Matrix,
  pub rhs: Vector,
}

#[derive(Debug, Clone)]
pub struct LaplaceSolution {
  grid: Grid,
  field: Matrix,
}

impl LaplaceSolution {
  pub fn grid(&self) -> &Grid {
    &self.grid
  }
  pub fn interior_xs(&self) -> Vector {
    self.grid.interior_xs()
  }
  pub fn interior_ys(&self) -> Vector {
    self.grid.interior_ys()
  }
  /// Interior values, rows along y, columns along x.
  pub fn field(&self) -> &Matrix {
    &self.field
  }
  pub fn into_field(self) -> Matrix {
    self.field
  }

  /// Value at interior node `(i, j)`, `i` along x and `j` along y.
  pub fn value_at(&self, i: usize, j: usize) -> f64 {
    self.field[(j, i)]
  }

  /// Largest deviation from `exact` over the interior nodes.
  pub fn max_error(&self, exact: impl Fn(f64, f64) -> f64) -> f64 {
    let xs = self.interior_xs();
    let ys = self.interior_ys();
    let mut error: f64 = 0.0;
    for (j, &y) in ys.iter().enumerate() {
      for (i, &x) in xs.iter().enumerate() {
        error = error.max((self.value_at(i, j) - exact(x, y)).abs());
      }
    }
    error
  }

  pub fn render(&self, renderer: &impl SurfaceRenderer, path: impl AsRef<Path>) -> Result<()> {
    renderer.render(
      &self.interior_xs(),
      &self.interior_ys(),
      &self.field,
      path.as_ref(),
    )
  }
}

/// Solves with the dense solver and saves the surface plot.
pub fn solve_and_render(
  problem: &LaplaceProblem,
  renderer: &impl SurfaceRenderer,
  path: impl AsRef<Path>,
) -> Result<LaplaceSolution> {
  solve_and_render_with(problem, &DenseLu, renderer, path)
}

/// Nothing is rendered if the solve fails.
pub fn solve_and_render_with(
  problem: &LaplaceProblem,
  solver: &impl LinearSolver,
  renderer: &impl SurfaceRenderer,
  path: impl AsRef<Path>,
) -> Result<LaplaceSolution> {
  let solution = problem.solve_with(solver)?;
  solution.render(renderer, path)?;
  Ok(solution)
}
