//! Dense linear algebra over a [`Field`].
//!
//! [`Matrix`] owns a row-major buffer. [`View`] and [`ViewMut`] borrow a
//! buffer and reinterpret it as a dense, transposed or packed
//! upper-triangular matrix without copying; writes through a [`ViewMut`]
//! land in the borrowed buffer. All arithmetic is generic over
//! [`MatrixRef`], so owned matrices and views mix freely.

use zeroize::Zeroize;

use crate::error::{check_len, MqError, Result};
use crate::field::Field;

/// Computes the index into an upper triangular matrix stored as a flat vector.
///
/// For an n×n upper triangular matrix, element (i,j) where i <= j is stored at
/// position i*n - i*(i+1)/2 + j.
#[inline]
pub fn idx_ut(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i <= j, "idx_ut requires i <= j");
    i * n - (i * (i + 1)) / 2 + j
}

/// Number of coefficients in a packed n×n upper triangular matrix.
#[inline]
pub const fn ut_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Read access shared by owned matrices and views.
pub trait MatrixRef<F: Field> {
    /// Returns (rows, cols).
    fn dims(&self) -> (usize, usize);

    /// Returns entry (i, j).
    fn at(&self, i: usize, j: usize) -> F;
}

/// An owned, row-major matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<F: Field> {
    rows: usize,
    cols: usize,
    data: Vec<F>,
}

impl<F: Field> Matrix<F> {
    /// The all-zero rows×cols matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![F::ZERO; rows * cols],
        }
    }

    /// The n×n identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = F::ONE;
        }
        m
    }

    /// Wraps a row-major buffer of length rows*cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<F>) -> Result<Self> {
        check_len("Matrix::from_vec", rows * cols, data.len())?;
        Ok(Matrix { rows, cols, data })
    }

    /// Sets entry (i, j).
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: F) {
        self.data[i * self.cols + j] = v;
    }

    /// Borrows row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[F] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// The row-major backing buffer.
    #[inline]
    pub fn as_slice(&self) -> &[F] {
        &self.data
    }

    /// Consumes the matrix, returning its backing buffer.
    pub fn into_vec(self) -> Vec<F> {
        self.data
    }

    /// A dense view of this matrix.
    pub fn view(&self) -> View<'_, F> {
        View {
            shape: Shape::new(ViewKind::Dense, self.rows, self.cols),
            data: &self.data,
        }
    }

    /// A transposed view of this matrix.
    pub fn t(&self) -> View<'_, F> {
        self.view().t()
    }

    /// A mutable dense view of this matrix.
    pub fn view_mut(&mut self) -> ViewMut<'_, F> {
        ViewMut {
            shape: Shape::new(ViewKind::Dense, self.rows, self.cols),
            data: &mut self.data,
        }
    }
}

impl<F: Field> MatrixRef<F> for Matrix<F> {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> F {
        self.data[i * self.cols + j]
    }
}

impl<F: Field> Zeroize for Matrix<F> {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

/// How a view maps (row, col) onto its backing buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// Row-major rows×cols.
    Dense,
    /// Transpose of a row-major buffer.
    Transposed,
    /// Packed upper triangle of an n×n matrix; entries below the diagonal are zero.
    UpperTriangular,
    /// Transpose of a packed upper triangle (lower triangular).
    TransposedUpperTriangular,
}

impl ViewKind {
    fn transposed(self) -> Self {
        match self {
            ViewKind::Dense => ViewKind::Transposed,
            ViewKind::Transposed => ViewKind::Dense,
            ViewKind::UpperTriangular => ViewKind::TransposedUpperTriangular,
            ViewKind::TransposedUpperTriangular => ViewKind::UpperTriangular,
        }
    }

    fn is_transposed(self) -> bool {
        matches!(
            self,
            ViewKind::Transposed | ViewKind::TransposedUpperTriangular
        )
    }
}

/// Geometry of a view: its kind plus the dimensions of the stored,
/// untransposed matrix.
#[derive(Clone, Copy, Debug)]
struct Shape {
    kind: ViewKind,
    rows: usize,
    cols: usize,
}

impl Shape {
    fn new(kind: ViewKind, rows: usize, cols: usize) -> Self {
        Shape { kind, rows, cols }
    }

    fn dims(&self) -> (usize, usize) {
        if self.kind.is_transposed() {
            (self.cols, self.rows)
        } else {
            (self.rows, self.cols)
        }
    }

    /// Storage index of (i, j), or `None` for a structural zero.
    #[inline]
    fn index(&self, i: usize, j: usize) -> Option<usize> {
        let (r, c) = if self.kind.is_transposed() { (j, i) } else { (i, j) };
        match self.kind {
            ViewKind::Dense | ViewKind::Transposed => Some(r * self.cols + c),
            ViewKind::UpperTriangular | ViewKind::TransposedUpperTriangular => {
                if c < r {
                    None
                } else {
                    Some(idx_ut(self.cols, r, c))
                }
            }
        }
    }

    fn transposed(self) -> Self {
        Shape {
            kind: self.kind.transposed(),
            ..self
        }
    }
}

/// A borrowed, read-only reinterpretation of a buffer.
#[derive(Clone, Copy, Debug)]
pub struct View<'a, F: Field> {
    shape: Shape,
    data: &'a [F],
}

impl<'a, F: Field> View<'a, F> {
    /// Views `data` as a row-major rows×cols matrix.
    pub fn dense(rows: usize, cols: usize, data: &'a [F]) -> Result<Self> {
        check_len("View::dense", rows * cols, data.len())?;
        Ok(View {
            shape: Shape::new(ViewKind::Dense, rows, cols),
            data,
        })
    }

    /// Views `data` as a packed n×n upper triangular matrix.
    pub fn upper_triangular(n: usize, data: &'a [F]) -> Result<Self> {
        check_len("View::upper_triangular", ut_len(n), data.len())?;
        Ok(View {
            shape: Shape::new(ViewKind::UpperTriangular, n, n),
            data,
        })
    }

    /// The transpose of this view, sharing the same buffer.
    pub fn t(self) -> Self {
        View {
            shape: self.shape.transposed(),
            data: self.data,
        }
    }

    /// Which reinterpretation this view applies.
    pub fn kind(&self) -> ViewKind {
        self.shape.kind
    }

    /// Copies the view into an owned dense matrix.
    pub fn to_matrix(&self) -> Matrix<F> {
        let (rows, cols) = self.dims();
        let mut out = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                out.set(i, j, self.at(i, j));
            }
        }
        out
    }
}

impl<F: Field> MatrixRef<F> for View<'_, F> {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        self.shape.dims()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> F {
        match self.shape.index(i, j) {
            Some(k) => self.data[k],
            None => F::ZERO,
        }
    }
}

/// A borrowed, writable reinterpretation of a buffer.
#[derive(Debug)]
pub struct ViewMut<'a, F: Field> {
    shape: Shape,
    data: &'a mut [F],
}

impl<'a, F: Field> ViewMut<'a, F> {
    /// Views `data` as a mutable row-major rows×cols matrix.
    pub fn dense(rows: usize, cols: usize, data: &'a mut [F]) -> Result<Self> {
        check_len("ViewMut::dense", rows * cols, data.len())?;
        Ok(ViewMut {
            shape: Shape::new(ViewKind::Dense, rows, cols),
            data,
        })
    }

    /// Views `data` as a mutable packed n×n upper triangular matrix.
    pub fn upper_triangular(n: usize, data: &'a mut [F]) -> Result<Self> {
        check_len("ViewMut::upper_triangular", ut_len(n), data.len())?;
        Ok(ViewMut {
            shape: Shape::new(ViewKind::UpperTriangular, n, n),
            data,
        })
    }

    /// The transpose of this view, still writing to the same buffer.
    pub fn t(self) -> Self {
        ViewMut {
            shape: self.shape.transposed(),
            data: self.data,
        }
    }

    /// Which reinterpretation this view applies.
    pub fn kind(&self) -> ViewKind {
        self.shape.kind
    }

    /// Writes entry (i, j) into the backing buffer.
    ///
    /// Structural zeros of a triangular view cannot be written.
    pub fn set(&mut self, i: usize, j: usize, v: F) -> Result<()> {
        match self.shape.index(i, j) {
            Some(k) => {
                self.data[k] = v;
                Ok(())
            }
            None => Err(MqError::InvalidInput {
                field: "ViewMut::set",
                reason: "entry lies outside the stored triangle",
            }),
        }
    }
}

impl<F: Field> MatrixRef<F> for ViewMut<'_, F> {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        self.shape.dims()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> F {
        match self.shape.index(i, j) {
            Some(k) => self.data[k],
            None => F::ZERO,
        }
    }
}

/// Matrix product A·B.
pub fn mul<F, A, B>(a: &A, b: &B) -> Result<Matrix<F>>
where
    F: Field,
    A: MatrixRef<F> + ?Sized,
    B: MatrixRef<F> + ?Sized,
{
    let (rows_a, cols_a) = a.dims();
    let (rows_b, cols_b) = b.dims();
    check_len("mul", cols_a, rows_b)?;

    let mut c = Matrix::zeros(rows_a, cols_b);
    for i in 0..rows_a {
        for k in 0..cols_a {
            let aik = a.at(i, k);
            if !aik.is_zero() {
                for j in 0..cols_b {
                    c.data[i * cols_b + j] += aik * b.at(k, j);
                }
            }
        }
    }
    Ok(c)
}

/// Entry-wise sum A + B.
pub fn add<F, A, B>(a: &A, b: &B) -> Result<Matrix<F>>
where
    F: Field,
    A: MatrixRef<F> + ?Sized,
    B: MatrixRef<F> + ?Sized,
{
    let (rows, cols) = a.dims();
    let (rows_b, cols_b) = b.dims();
    check_len("add (rows)", rows, rows_b)?;
    check_len("add (cols)", cols, cols_b)?;

    let mut c = Matrix::zeros(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            c.set(i, j, a.at(i, j) + b.at(i, j));
        }
    }
    Ok(c)
}

/// Scalar multiple s·A.
pub fn scale<F, A>(a: &A, s: F) -> Matrix<F>
where
    F: Field,
    A: MatrixRef<F> + ?Sized,
{
    let (rows, cols) = a.dims();
    let mut c = Matrix::zeros(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            c.set(i, j, s * a.at(i, j));
        }
    }
    c
}

/// Matrix-vector product A·x.
pub fn mul_vec<F, A>(a: &A, x: &[F]) -> Result<Vec<F>>
where
    F: Field,
    A: MatrixRef<F> + ?Sized,
{
    let (rows, cols) = a.dims();
    check_len("mul_vec", cols, x.len())?;
    Ok((0..rows)
        .map(|i| {
            x.iter()
                .enumerate()
                .fold(F::ZERO, |acc, (j, &xj)| acc + a.at(i, j) * xj)
        })
        .collect())
}

/// Row-vector-matrix product xᵗ·A.
pub fn vec_mul<F, A>(x: &[F], a: &A) -> Result<Vec<F>>
where
    F: Field,
    A: MatrixRef<F> + ?Sized,
{
    let (rows, cols) = a.dims();
    check_len("vec_mul", rows, x.len())?;
    let mut out = vec![F::ZERO; cols];
    for (i, &xi) in x.iter().enumerate() {
        if xi.is_zero() {
            continue;
        }
        for (j, o) in out.iter_mut().enumerate() {
            *o += xi * a.at(i, j);
        }
    }
    Ok(out)
}

/// The quadratic form xᵗ·A·x.
pub fn quadratic_form<F, A>(a: &A, x: &[F]) -> Result<F>
where
    F: Field,
    A: MatrixRef<F> + ?Sized,
{
    let row = vec_mul(x, a)?;
    dot(&row, x)
}

/// Inner product of two vectors.
pub fn dot<F: Field>(x: &[F], y: &[F]) -> Result<F> {
    check_len("dot", x.len(), y.len())?;
    Ok(x.iter().zip(y).fold(F::ZERO, |acc, (&a, &b)| acc + a * b))
}

/// Solves the square system A·x = b by Gauss-Jordan elimination.
///
/// Returns [`MqError::SingularSystem`] when some column has no non-zero pivot.
pub fn solve<F, A>(a: &A, b: &[F]) -> Result<Vec<F>>
where
    F: Field,
    A: MatrixRef<F> + ?Sized,
{
    let (rows, cols) = a.dims();
    check_len("solve (square)", rows, cols)?;
    check_len("solve (rhs)", rows, b.len())?;
    let n = rows;

    let mut m: Vec<Vec<F>> = (0..n)
        .map(|i| (0..n).map(|j| a.at(i, j)).collect())
        .collect();
    let mut x = b.to_vec();

    for col in 0..n {
        let piv = (col..n)
            .find(|&r| !m[r][col].is_zero())
            .ok_or(MqError::SingularSystem)?;

        if piv != col {
            m.swap(piv, col);
            x.swap(piv, col);
        }

        let inv = m[col][col].inverse();
        for j in col..n {
            m[col][j] *= inv;
        }
        x[col] *= inv;

        for i in 0..n {
            if i == col {
                continue;
            }
            let f = m[i][col];
            if !f.is_zero() {
                for j in col..n {
                    let pivot_val = m[col][j];
                    m[i][j] -= f * pivot_val;
                }
                let x_pivot = x[col];
                x[i] -= f * x_pivot;
            }
        }
    }

    Ok(x)
}
