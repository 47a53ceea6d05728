//! Nine-point finite difference solver for the Laplace equation
//! on a rectangle with Dirichlet boundary data.
//!
//! Pipeline: [`grid::Grid`] → [`stencil`] matrix and [`boundary`] vector
//! → [`lse`] solve → [`render`] surface plot.

extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod boundary;
pub mod error;
pub mod grid;
pub mod lse;
pub mod problem;
pub mod render;
pub mod stencil;

pub use error::{LaplaceError, Result};
