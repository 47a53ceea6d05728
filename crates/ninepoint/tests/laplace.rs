//! End-to-end checks of the nine-point solver against exact solutions.
//!
//! Harmonic polynomials up to degree 3 are reproduced exactly by the stencil
//! on square cells, linear ones for any cell aspect ratio.
//! The separable solution of the unit square is only approximated,
//! with the error decreasing under refinement.

use approx::assert_relative_eq;
use common::{
  linalg::nalgebra::{Matrix, Vector},
  util::algebraic_convergence_rate,
};
use ninepoint::{
  boundary::BoundaryConditions,
  lse::LinearSolver,
  problem::{solve_and_render, solve_and_render_with, LaplaceProblem},
  render::{PlottersSurface, SurfaceRenderer},
  LaplaceError,
};

use std::{cell::RefCell, f64::consts::PI, path::Path};

fn sine_top() -> BoundaryConditions {
  BoundaryConditions::new(
    |_, _| 0.0,
    |_, _| 0.0,
    |_, _| 0.0,
    |x, _| 10.0 * (PI * x).sin(),
  )
}

fn sine_top_exact(x: f64, y: f64) -> f64 {
  10.0 * (PI * x).sin() * (PI * y).sinh() / PI.sinh()
}

#[test]
fn homogeneous_data_gives_zero_field() {
  for (m, n) in [(2, 2), (2, 5), (3, 3), (4, 7), (9, 4)] {
    let problem = LaplaceProblem::new(
      [-1.0, 1.0],
      [0.0, 3.0],
      m,
      n,
      BoundaryConditions::homogeneous(),
    );
    let solution = problem.solve().unwrap();
    assert_eq!(solution.field().shape(), (n - 1, m - 1));
    assert!(solution.field().iter().all(|&v| v == 0.0), "{m}x{n}");
  }
}

#[test]
fn linear_data_is_exact_on_anisotropic_grid() {
  let exact = |x: f64, y: f64| 3.0 * x - 2.0 * y + 1.0;
  let problem = LaplaceProblem::new(
    [0.0, 1.0],
    [-1.0, 2.0],
    5,
    8,
    BoundaryConditions::uniform(exact),
  );
  let solution = problem.solve().unwrap();
  assert!(solution.max_error(exact) < 1e-12);
}

#[test]
fn harmonic_quadratic_is_exact() {
  let exact = |x: f64, y: f64| x * x - y * y;
  let problem = LaplaceProblem::new_unit_square(6, BoundaryConditions::uniform(exact));
  let solution = problem.solve().unwrap();
  assert!(solution.max_error(exact) < 1e-12);
}

/// Non-square domain with square cells, more cells along x than y.
#[test]
fn harmonic_cubic_is_exact_on_wide_domain() {
  let exact = |x: f64, y: f64| x * x * x - 3.0 * x * y * y + x * y;
  let problem = LaplaceProblem::new(
    [0.0, 2.0],
    [0.0, 1.0],
    8,
    4,
    BoundaryConditions::uniform(exact),
  );
  let solution = problem.solve().unwrap();
  assert_eq!(solution.field().shape(), (3, 7));
  assert!(solution.max_error(exact) < 1e-11);
}

/// Same as above with the roles of x and y swapped.
#[test]
fn harmonic_cubic_is_exact_on_tall_domain() {
  let exact = |x: f64, y: f64| y * y * y - 3.0 * y * x * x - x * y;
  let problem = LaplaceProblem::new(
    [0.0, 1.0],
    [0.0, 2.0],
    4,
    8,
    BoundaryConditions::uniform(exact),
  );
  let solution = problem.solve().unwrap();
  assert_eq!(solution.field().shape(), (7, 3));
  assert!(solution.max_error(exact) < 1e-11);
}

#[test]
fn each_side_feeds_its_own_function() {
  // u = x*y vanishes on bottom and left, equals y on the right and x on the top.
  let exact = |x: f64, y: f64| x * y;
  let bcs = BoundaryConditions::new(|_, _| 0.0, |_, _| 0.0, |_, y| y, |x, _| x);
  let problem = LaplaceProblem::new([0.0, 1.0], [0.0, 1.0], 5, 5, bcs);
  let solution = problem.solve().unwrap();
  assert!(solution.max_error(exact) < 1e-12);
}

#[test]
fn sine_top_converges_to_separable_solution() {
  let errors: Vec<f64> = [5, 10, 20]
    .into_iter()
    .map(|ncells| {
      let problem = LaplaceProblem::new_unit_square(ncells, sine_top());
      problem.solve().unwrap().max_error(sine_top_exact)
    })
    .collect();

  assert!(errors[2] < 1e-2, "errors: {errors:?}");
  for pair in errors.windows(2) {
    assert!(pair[1] < pair[0], "errors: {errors:?}");
    let rate = algebraic_convergence_rate(pair[1], pair[0]);
    assert!(rate > 2.0, "rate {rate}, errors: {errors:?}");
  }
}

#[test]
fn sine_top_solution_is_symmetric_in_x() {
  let solution = LaplaceProblem::new_unit_square(8, sine_top())
    .solve()
    .unwrap();
  let field = solution.field();
  let ncols = field.ncols();
  for r in 0..field.nrows() {
    for c in 0..ncols {
      assert_relative_eq!(field[(r, c)], field[(r, ncols - 1 - c)], epsilon = 1e-10);
    }
  }
}

#[test]
fn bottom_data_only_touches_bottom_rows() {
  let base = LaplaceProblem::new([0.0, 2.0], [0.0, 1.0], 6, 5, sine_top());
  let perturbed_bcs = BoundaryConditions::new(
    |x, _| 1.0 + x * x,
    |_, _| 0.0,
    |_, _| 0.0,
    |x, _| 10.0 * (PI * x).sin(),
  );
  let perturbed =
    LaplaceProblem::new([0.0, 2.0], [0.0, 1.0], 6, 5, BoundaryConditions::homogeneous())
      .with_boundary(perturbed_bcs);

  let base = base.assemble().unwrap();
  let perturbed = perturbed.assemble().unwrap();
  assert_eq!(base.matrix, perturbed.matrix);

  let grid = &base.grid;
  for k in 0..grid.ninterior() {
    let [_, j] = grid.linear_to_node(k);
    if j == 0 {
      assert_ne!(base.rhs[k], perturbed.rhs[k], "row {k}");
    } else {
      assert_eq!(base.rhs[k], perturbed.rhs[k], "row {k}");
    }
  }
}

struct SingularSolver;
impl LinearSolver for SingularSolver {
  fn solve(&self, _a: &Matrix, _b: &Vector) -> ninepoint::Result<Vector> {
    Err(LaplaceError::SingularMatrix)
  }
}

#[derive(Default)]
struct RecordingRenderer {
  calls: RefCell<Vec<(Vector, Vector, Matrix, String)>>,
}
impl SurfaceRenderer for RecordingRenderer {
  fn render(&self, xs: &Vector, ys: &Vector, field: &Matrix, path: &Path) -> ninepoint::Result<()> {
    self.calls.borrow_mut().push((
      xs.clone(),
      ys.clone(),
      field.clone(),
      path.display().to_string(),
    ));
    Ok(())
  }
}

#[test]
fn renderer_receives_interior_coordinates() {
  let renderer = RecordingRenderer::default();
  let problem = LaplaceProblem::new([0.0, 1.0], [0.0, 2.0], 4, 4, sine_top());
  let solution =
    solve_and_render_with(&problem, &ninepoint::lse::DenseLu, &renderer, "out.png").unwrap();

  let calls = renderer.calls.borrow();
  assert_eq!(calls.len(), 1);
  let (xs, ys, field, path) = &calls[0];
  assert_eq!(xs.as_slice(), &[0.25, 0.5, 0.75]);
  assert_eq!(ys.as_slice(), &[0.5, 1.0, 1.5]);
  assert_eq!(field, solution.field());
  assert_eq!(path, "out.png");
}

#[test]
fn failed_solve_renders_nothing() {
  let renderer = RecordingRenderer::default();
  let problem = LaplaceProblem::new_unit_square(4, sine_top());
  let err = solve_and_render_with(&problem, &SingularSolver, &renderer, "never.png").unwrap_err();
  assert_eq!(err, LaplaceError::SingularMatrix);
  assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn invalid_grid_renders_nothing() {
  let renderer = RecordingRenderer::default();
  let problem = LaplaceProblem::new(
    [1.0, 0.0],
    [0.0, 1.0],
    4,
    4,
    BoundaryConditions::homogeneous(),
  );
  let err = solve_and_render_with(&problem, &SingularSolver, &renderer, "never.png").unwrap_err();
  assert!(matches!(err, LaplaceError::InvalidGrid(_)));
  assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn non_finite_boundary_data_is_not_a_singular_matrix() {
  for bad in [f64::NAN, f64::INFINITY] {
    let renderer = RecordingRenderer::default();
    let bcs = BoundaryConditions::new(|_, _| 0.0, |_, _| 0.0, |_, _| 0.0, move |_, _| bad);
    let problem = LaplaceProblem::new_unit_square(4, bcs);
    let err = solve_and_render_with(&problem, &ninepoint::lse::DenseLu, &renderer, "never.png")
      .unwrap_err();
    assert!(matches!(err, LaplaceError::NonFiniteBoundary(_)), "{bad}: {err:?}");
    assert!(renderer.calls.borrow().is_empty());
  }
}

#[test]
fn overflowing_extent_is_an_invalid_grid() {
  let problem = LaplaceProblem::new(
    [-1e308, 1e308],
    [-1e308, 1e308],
    4,
    4,
    BoundaryConditions::homogeneous(),
  );
  assert!(matches!(problem.grid(), Err(LaplaceError::InvalidGrid(_))));
  assert!(matches!(problem.solve(), Err(LaplaceError::InvalidGrid(_))));
}

#[test]
fn smallest_grids_render_to_png() {
  for (m, n) in [(2, 2), (2, 6), (6, 2), (6, 6)] {
    let problem = LaplaceProblem::new([0.0, 1.0], [0.0, 1.0], m, n, sine_top());
    let path = std::env::temp_dir().join(format!("ninepoint-{}-{m}x{n}.png", std::process::id()));
    let renderer = PlottersSurface::default().with_size(320, 240);
    solve_and_render(&problem, &renderer, &path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0, "{m}x{n}");
    std::fs::remove_file(&path).unwrap();
  }
}

#[test]
fn solution_satisfies_assembled_system() {
  let problem = LaplaceProblem::new([0.0, 1.0], [0.0, 1.5], 4, 6, sine_top());
  let system = problem.assemble().unwrap();
  let solution = problem.solve().unwrap();
  let sol = ninepoint::lse::flatten_field(solution.field(), &system.grid);
  let residual = &system.matrix * sol - &system.rhs;
  assert!(residual.norm() < 1e-10);
}
