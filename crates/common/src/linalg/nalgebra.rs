use crate::util::{CumsumExt, IterAllEqExt};

pub type Vector<T = f64> = na::DVector<T>;
pub type Matrix<T = f64> = na::DMatrix<T>;
pub type CooMatrix<T = f64> = nas::CooMatrix<T>;

pub trait DMatrixExt {
  fn is_symmetric(&self, eps: f64) -> bool;
  fn is_full_rank(&self, eps: f64) -> bool;
}
impl DMatrixExt for Matrix<f64> {
  fn is_symmetric(&self, eps: f64) -> bool {
    self.is_square()
      && approx::relative_eq!(*self, self.transpose(), epsilon = eps, max_relative = eps)
  }
  fn is_full_rank(&self, eps: f64) -> bool {
    self.rank(eps) == self.nrows().min(self.ncols())
  }
}

pub fn matrix_from_const_diagonals<T>(
  values: &[T],
  offsets: &[isize],
  nrows: usize,
  ncols: usize,
) -> Matrix<T>
where
  T: num_traits::Zero + na::Scalar + Copy,
{
  assert_eq!(values.len(), offsets.len());
  let mut matrix = Matrix::zeros(nrows, ncols);

  for (idiag, &offset) in offsets.iter().enumerate() {
    let [start_row, start_col] = if offset >= 0 {
      [0, offset as usize]
    } else {
      [(-offset) as usize, 0]
    };

    let mut r = start_row;
    let mut c = start_col;
    while r < nrows && c < ncols {
      matrix[(r, c)] = values[idiag];
      r += 1;
      c += 1;
    }
  }

  matrix
}

/// Block tridiagonal matrix with `nblocks` copies of `diag` on the block diagonal
/// and `offdiag` on the first block sub- and super-diagonal.
///
/// Equals $I_n times.o D + T_n times.o O$, where $T_n$ is the $n times n$ matrix
/// with ones on its first sub- and super-diagonal.
pub fn block_tridiagonal<T>(diag: &Matrix<T>, offdiag: &Matrix<T>, nblocks: usize) -> Matrix<T>
where
  T: na::Scalar
    + Copy
    + num_traits::Zero
    + num_traits::One
    + na::ClosedMulAssign
    + na::ClosedAddAssign,
{
  assert!(diag.is_square() && offdiag.shape() == diag.shape());

  let eye = Matrix::identity(nblocks, nblocks);
  let shift = matrix_from_const_diagonals(&[T::one(), T::one()], &[-1, 1], nblocks, nblocks);
  eye.kronecker(diag) + shift.kronecker(offdiag)
}

pub trait CooMatrixExt {
  fn block(block_grid: &[&[&Self]]) -> Self;
}

impl CooMatrixExt for CooMatrix<f64> {
  /// Concatenates a matrix block grid row-wise and column-wise, automatically computing offsets.
  fn block(block_grid: &[&[&Self]]) -> Self {
    block_grid
      .iter()
      .map(|row| row.len())
      .all_eq()
      .expect("Each block row must contain the same number of matrices.");

    let mut row_offsets: Vec<usize> = block_grid
      .iter()
      .map(|row| {
        let nrows = row.first().map_or(0, |m| m.nrows());
        assert!(row.iter().all(|m| nrows == m.nrows()));
        nrows
      })
      .cumsum()
      .collect();
    let nrows_total = row_offsets.pop().unwrap_or(0);
    row_offsets.insert(0, 0);

    let mut col_offsets: Vec<usize> = block_grid
      .iter()
      .map(|row| row.iter().map(|mat| mat.ncols()).cumsum().collect::<Vec<_>>())
      .all_eq()
      .expect("Each row must have matrices at the same offsets.");
    let ncols_total = col_offsets.pop().unwrap_or(0);
    col_offsets.insert(0, 0);

    let mut result = Self::zeros(nrows_total, ncols_total);

    for (i, row) in block_grid.iter().enumerate() {
      for (j, block) in row.iter().enumerate() {
        let row_offset = row_offsets[i];
        let col_offset = col_offsets[j];

        for (r, c, &v) in block.triplet_iter() {
          result.push(row_offset + r, col_offset + c, v);
        }
      }
    }

    result
  }
}
