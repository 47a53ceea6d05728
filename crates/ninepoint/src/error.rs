use thiserror::Error;

pub type Result<T, E = LaplaceError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LaplaceError {
  /// Too few cells or a degenerate/inverted domain.
  #[error("invalid grid: {0}")]
  InvalidGrid(String),

  /// A boundary function returned NaN or an infinite value.
  #[error("non-finite boundary data: {0}")]
  NonFiniteBoundary(String),

  #[error("coefficient matrix is singular")]
  SingularMatrix,

  /// The surface plot could not be written.
  #[error("failed to render surface: {0}")]
  RenderFailure(String),
}
