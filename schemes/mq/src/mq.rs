//! Multivariate quadratic maps and their polar forms.
//!
//! A quadratic map sends x ∈ F^n to m values, each a homogeneous quadratic
//! form Σ_{i<=j} c_ij x_i x_j. The polar form
//! G(x, y) = F(x + y) - F(x) - F(y) is bilinear, and over GF(2^8) it also
//! satisfies G(x, x) = 0; MQDSS relies on both facts.

use crate::error::{check_len, Result};
use crate::field::Field;
use crate::matrix::ut_len;

/// A system of quadratic forms that can be evaluated on a vector.
///
/// Implementations are `Sync` so independent evaluations (MQDSS rounds)
/// may run concurrently.
pub trait QuadraticMap: Sync {
    /// The field the system is defined over.
    type Elem: Field;

    /// Number of input variables n.
    fn num_vars(&self) -> usize;

    /// Number of quadratic forms m.
    fn num_forms(&self) -> usize;

    /// Evaluates all m forms at `x`.
    fn eval(&self, x: &[Self::Elem]) -> Result<Vec<Self::Elem>>;

    /// Evaluates the polar form G(x, y) = F(x + y) - F(x) - F(y).
    fn polar(&self, x: &[Self::Elem], y: &[Self::Elem]) -> Result<Vec<Self::Elem>> {
        check_len("polar (x)", self.num_vars(), x.len())?;
        check_len("polar (y)", self.num_vars(), y.len())?;

        let sum: Vec<Self::Elem> = x.iter().zip(y).map(|(&a, &b)| a + b).collect();
        let f_sum = self.eval(&sum)?;
        let f_x = self.eval(x)?;
        let f_y = self.eval(y)?;

        Ok(f_sum
            .into_iter()
            .zip(f_x.into_iter().zip(f_y))
            .map(|(s, (a, b))| s - a - b)
            .collect())
    }
}

/// The n(n+1)/2 upper triangular monomials x_i·x_j (i <= j), row-major.
pub fn monomials<F: Field>(x: &[F]) -> Vec<F> {
    let n = x.len();
    let mut out = Vec::with_capacity(ut_len(n));
    for i in 0..n {
        for j in i..n {
            out.push(x[i] * x[j]);
        }
    }
    out
}

/// A quadratic system stored as m consecutive packed upper triangular
/// coefficient blocks of n(n+1)/2 entries each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseSystem<F: Field> {
    n: usize,
    m: usize,
    coeffs: Vec<F>,
}

impl<F: Field> DenseSystem<F> {
    /// Wraps a flattened coefficient vector of length m·n(n+1)/2.
    pub fn new(n: usize, m: usize, coeffs: Vec<F>) -> Result<Self> {
        check_len("DenseSystem::new", Self::coeff_len(n, m), coeffs.len())?;
        Ok(DenseSystem { n, m, coeffs })
    }

    /// Derives a system from a public seed.
    pub fn from_seed(seed: &[u8], n: usize, m: usize) -> Self {
        DenseSystem {
            n,
            m,
            coeffs: F::expand_system(&[seed], Self::coeff_len(n, m)),
        }
    }

    /// Number of coefficients for m forms in n variables.
    pub const fn coeff_len(n: usize, m: usize) -> usize {
        m * ut_len(n)
    }

    /// The packed coefficients of form `k`.
    pub fn form(&self, k: usize) -> &[F] {
        let len = ut_len(self.n);
        &self.coeffs[k * len..(k + 1) * len]
    }

    /// All coefficients, form after form.
    pub fn coeffs(&self) -> &[F] {
        &self.coeffs
    }
}

impl<F: Field> QuadraticMap for DenseSystem<F> {
    type Elem = F;

    fn num_vars(&self) -> usize {
        self.n
    }

    fn num_forms(&self) -> usize {
        self.m
    }

    fn eval(&self, x: &[F]) -> Result<Vec<F>> {
        check_len("DenseSystem::eval", self.n, x.len())?;
        let xij = monomials(x);
        Ok((0..self.m)
            .map(|k| {
                self.form(k)
                    .iter()
                    .zip(&xij)
                    .fold(F::ZERO, |acc, (&c, &t)| acc + c * t)
            })
            .collect())
    }
}
