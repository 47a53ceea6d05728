//! Dirichlet data and its contribution to the right-hand side.
//!
//! Stencil taps of an interior node that land on the boundary are known values.
//! They are moved to the right-hand side of $A u = b$ with flipped sign.
//!
//! Boundary vertices are owned by exactly one side:
//! the bottom row (corners included) by [`Side::Bottom`],
//! the remaining left and right columns (top corners included) by [`Side::Left`] and [`Side::Right`],
//! the rest of the top row by [`Side::Top`].

use crate::{
  error::{LaplaceError, Result},
  grid::Grid,
  stencil::stencil_weight,
};

use common::linalg::nalgebra::Vector;
use itertools::iproduct;

pub type BoundaryFn = Box<dyn Fn(f64, f64) -> f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
  Bottom,
  Left,
  Right,
  Top,
}

/// Dirichlet values $g(x, y)$ on the four sides of the rectangle.
pub struct BoundaryConditions {
  bottom: BoundaryFn,
  left: BoundaryFn,
  right: BoundaryFn,
  top: BoundaryFn,
}

impl BoundaryConditions {
  pub fn new(
    bottom: impl Fn(f64, f64) -> f64 + 'static,
    left: impl Fn(f64, f64) -> f64 + 'static,
    right: impl Fn(f64, f64) -> f64 + 'static,
    top: impl Fn(f64, f64) -> f64 + 'static,
  ) -> Self {
    Self {
      bottom: Box::new(bottom),
      left: Box::new(left),
      right: Box::new(right),
      top: Box::new(top),
    }
  }

  /// Same function on all sides.
  pub fn uniform(g: impl Fn(f64, f64) -> f64 + Clone + 'static) -> Self {
    Self::new(g.clone(), g.clone(), g.clone(), g)
  }

  pub fn homogeneous() -> Self {
    Self::uniform(|_, _| 0.0)
  }

  pub fn eval(&self, side: Side, x: f64, y: f64) -> f64 {
    let g = match side {
      Side::Bottom => &self.bottom,
      Side::Left => &self.left,
      Side::Right => &self.right,
      Side::Top => &self.top,
    };
    g(x, y)
  }
}

impl std::fmt::Debug for BoundaryConditions {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BoundaryConditions").finish_non_exhaustive()
  }
}

/// Position of an interior node relative to the boundary along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisAdjacency {
  Interior,
  /// First interior node, next to the low boundary.
  Low,
  /// Last interior node, next to the high boundary.
  High,
  /// Single interior node, next to both boundaries.
  Both,
}

impl AxisAdjacency {
  fn of(inode: usize, ninterior: usize) -> Self {
    match (inode == 0, inode + 1 == ninterior) {
      (true, true) => Self::Both,
      (true, false) => Self::Low,
      (false, true) => Self::High,
      (false, false) => Self::Interior,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeClass {
  pub x: AxisAdjacency,
  pub y: AxisAdjacency,
}

impl NodeClass {
  pub fn is_interior(&self) -> bool {
    self.x == AxisAdjacency::Interior && self.y == AxisAdjacency::Interior
  }
  pub fn is_corner(&self) -> bool {
    self.x != AxisAdjacency::Interior && self.y != AxisAdjacency::Interior
  }
  pub fn is_edge(&self) -> bool {
    !self.is_interior() && !self.is_corner()
  }
}

pub fn classify(grid: &Grid, i: usize, j: usize) -> NodeClass {
  NodeClass {
    x: AxisAdjacency::of(i, grid.ninterior_x()),
    y: AxisAdjacency::of(j, grid.ninterior_y()),
  }
}

/// Side owning the boundary vertex `[p, q]`, `None` for interior vertices.
pub fn owning_side(grid: &Grid, [p, q]: [usize; 2]) -> Option<Side> {
  if q == 0 {
    Some(Side::Bottom)
  } else if p == 0 {
    Some(Side::Left)
  } else if p == grid.ncells_x() {
    Some(Side::Right)
  } else if q == grid.ncells_y() {
    Some(Side::Top)
  } else {
    None
  }
}

/// A stencil tap landing on a boundary vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryTap {
  pub side: Side,
  pub vertex: [usize; 2],
  pub weight: f64,
}

/// Taps of the stencil centered at interior node `(i, j)` that land on the boundary.
///
/// Edge nodes have 3 taps, corner nodes 5. A node next to two opposite sides
/// (only one interior row or column) has more.
pub fn boundary_taps(grid: &Grid, i: usize, j: usize) -> Vec<BoundaryTap> {
  let [pc, qc] = grid.node_vertex(i, j);
  iproduct!(-1isize..=1, -1isize..=1)
    .filter(|&offset| offset != (0, 0))
    .filter_map(|(di, dj)| {
      let vertex = [pc.checked_add_signed(di)?, qc.checked_add_signed(dj)?];
      let side = owning_side(grid, vertex)?;
      Some(BoundaryTap {
        side,
        vertex,
        weight: stencil_weight(di, dj),
      })
    })
    .collect()
}

/// Right-hand side entry of interior node `(i, j)`.
pub fn boundary_contribution(grid: &Grid, bcs: &BoundaryConditions, i: usize, j: usize) -> f64 {
  if classify(grid, i, j).is_interior() {
    return 0.0;
  }
  -boundary_taps(grid, i, j)
    .iter()
    .map(|tap| {
      let [p, q] = tap.vertex;
      tap.weight * bcs.eval(tap.side, grid.x(p), grid.y(q))
    })
    .sum::<f64>()
}

/// Fails if some entry is not finite, i.e. a boundary function produced NaN or infinity.
pub fn assemble_boundary_vector(grid: &Grid, bcs: &BoundaryConditions) -> Result<Vector> {
  let rhs = Vector::from_fn(grid.ninterior(), |k, _| {
    let [i, j] = grid.linear_to_node(k);
    boundary_contribution(grid, bcs, i, j)
  });

  if let Some(k) = rhs.iter().position(|v| !v.is_finite()) {
    let [i, j] = grid.linear_to_node(k);
    let culprits: Vec<_> = boundary_taps(grid, i, j)
      .into_iter()
      .filter_map(|tap| {
        let [p, q] = tap.vertex;
        let (x, y) = (grid.x(p), grid.y(q));
        let value = bcs.eval(tap.side, x, y);
        (!value.is_finite()).then(|| format!("{:?}({x}, {y}) = {value}", tap.side))
      })
      .collect();
    return Err(LaplaceError::NonFiniteBoundary(format!(
      "right-hand side of interior node ({i}, {j}) is {}; {}",
      rhs[k],
      culprits.join(", ")
    )));
  }

  tracing::debug!(len = rhs.len(), norm = rhs.norm(), "assembled boundary vector");
  Ok(rhs)
}
