//! Laplace equation on the unit square with a sine profile on the top side.
//!
//! The exact solution is $u(x, y) = 10 sin(pi x) sinh(pi y) / sinh(pi)$.

use ninepoint::{
  boundary::BoundaryConditions,
  problem::{solve_and_render, LaplaceProblem, FIGURE_FILE_NAME},
  render::PlottersSurface,
};

use std::f64::consts::PI;

fn main() -> ninepoint::Result<()> {
  tracing_subscriber::fmt::init();

  let boundary = BoundaryConditions::new(
    |_, _| 0.0,
    |_, _| 0.0,
    |_, _| 0.0,
    |x, _| 10.0 * (PI * x).sin(),
  );

  // Dense solve: the system has (ncells-1)^2 unknowns.
  let ncells_axis = 50;
  let problem = LaplaceProblem::new_unit_square(ncells_axis, boundary);

  let solution = solve_and_render(&problem, &PlottersSurface::default(), FIGURE_FILE_NAME)?;

  let exact = |x: f64, y: f64| 10.0 * (PI * x).sin() * (PI * y).sinh() / PI.sinh();
  let error = solution.max_error(exact);
  println!("max nodal error: {error:.3e}");
  println!("saved {FIGURE_FILE_NAME}");

  Ok(())
}
