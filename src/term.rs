//! Interaction terms of spin Hamiltonians.
//!
//! Terms are classified by the number of centers they act on.  Each term
//! knows how to deposit its matrix elements for one row of the
//! lexicographic basis into a `LexMatrix`.  Terms only ever write; they never
//! read what is already there.
use std::f64;
use super::error::{invalid_argument, Error};
use super::index_converter::{ladder_coefficient, IndexConverter, Ladder, LexIndex};
use super::lex_cache::LexMatrix;
use super::matrix::Matrix;

/// Symmetric table of coefficients indexed by pairs of centers.
///
/// `NaN` marks pairs that do not interact.
#[derive(Clone, Debug)]
pub struct PairTable(Matrix<f64>);

impl PairTable {
    /// A table with no interacting pairs.
    pub fn new(num_centers: usize) -> Self {
        PairTable(Matrix::replicate(num_centers, num_centers, f64::NAN))
    }

    /// A table in which every pair of distinct centers interacts with the
    /// same coefficient.
    pub fn uniform(num_centers: usize, value: f64) -> Self {
        let mut table = Self::new(num_centers);
        for a in 0 .. num_centers {
            for b in 0 .. num_centers {
                if a != b {
                    table.0[(a, b)] = value;
                }
            }
        }
        table
    }

    pub fn num_centers(&self) -> usize {
        self.0.num_rows()
    }

    /// Set the coefficient of the unordered pair `{a, b}`.
    pub fn set(&mut self, a: usize, b: usize, value: f64) -> Result<(), Error> {
        let n = self.num_centers();
        if a >= n || b >= n {
            return Err(invalid_argument(
                format!("center pair ({}, {}) out of range", a, b)));
        }
        if a == b {
            return Err(invalid_argument(
                format!("center pair ({}, {}) is not a pair", a, b)));
        }
        self.0[(a, b)] = value;
        self.0[(b, a)] = value;
        Ok(())
    }

    /// Returns `None` if the pair does not interact.
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        let value = self.0[(a, b)];
        if value.is_nan() { None } else { Some(value) }
    }

    /// Whether `J[a][b] == J[p[a]][p[b]]` for every pair.  Non-interacting
    /// pairs must map onto non-interacting pairs.
    pub fn is_invariant_under(&self, permutation: &[usize]) -> bool {
        let n = self.num_centers();
        (0 .. n).all(|a| (0 .. n).all(|b| {
            same_or_both_nan(self.0[(a, b)],
                             self.0[(permutation[a], permutation[b])])
        }))
    }
}

fn same_or_both_nan(x: f64, y: f64) -> bool {
    x == y || (x.is_nan() && y.is_nan())
}

#[derive(Clone, Debug)]
pub enum ZeroCenterTerm {
    /// Adds the same value to every diagonal element.
    Constant(f64),
}

impl ZeroCenterTerm {
    #[inline]
    pub fn construct(&self, matrix: &mut LexMatrix, lex: LexIndex) {
        match *self {
            ZeroCenterTerm::Constant(value) => matrix.add(value, lex, lex),
        }
    }
}

#[derive(Clone, Debug)]
pub enum OneCenterTerm {
    /// `D[i] (Sz[i])²` with one coefficient per center; `NaN` means absent.
    SingleIonAnisotropy(Vec<f64>),
}

impl OneCenterTerm {
    pub fn parameters(&self) -> &[f64] {
        match *self {
            OneCenterTerm::SingleIonAnisotropy(ref d) => d,
        }
    }

    #[inline]
    pub fn construct(
        &self,
        converter: &IndexConverter,
        matrix: &mut LexMatrix,
        lex: LexIndex,
        center: usize,
    ) {
        match *self {
            OneCenterTerm::SingleIonAnisotropy(ref d) => {
                let d = d[center];
                if d.is_nan() {
                    return;
                }
                let n = converter.decode_one(lex, center);
                let sz = converter.spin(center).projection(n).to_f64();
                matrix.add(d * sz * sz, lex, lex);
            }
        }
    }

    pub fn is_invariant_under(&self, permutation: &[usize]) -> bool {
        let d = self.parameters();
        (0 .. d.len()).all(|i| same_or_both_nan(d[i], d[permutation[i]]))
    }
}

#[derive(Clone, Debug)]
pub enum TwoCenterTerm {
    /// `J[a][b] (S[a] · S[b])`
    ScalarProduct(PairTable),
}

impl TwoCenterTerm {
    pub fn parameters(&self) -> &PairTable {
        match *self {
            TwoCenterTerm::ScalarProduct(ref j) => j,
        }
    }

    /// Writes row `lex` only.  The scalar product is symmetric, so the
    /// transposed elements are produced when their own row is constructed.
    #[inline]
    pub fn construct(
        &self,
        converter: &IndexConverter,
        matrix: &mut LexMatrix,
        lex: LexIndex,
        a: usize,
        b: usize,
    ) {
        match *self {
            TwoCenterTerm::ScalarProduct(ref table) => {
                let j = match table.get(a, b) {
                    Some(j) => j,
                    None => return,
                };
                let na = converter.decode_one(lex, a);
                let nb = converter.decode_one(lex, b);
                let ma = converter.multiplicity(a);
                let mb = converter.multiplicity(b);

                // Sz[a] Sz[b]
                let sza = converter.spin(a).projection(na).to_f64();
                let szb = converter.spin(b).projection(nb).to_f64();
                matrix.add(j * sza * szb, lex, lex);

                // (S+[a] S−[b] + S−[a] S+[b]) / 2
                if na + 1 < ma && nb > 0 {
                    let other = converter.ladder(
                        converter.ladder(lex, a, Ladder::Up), b, Ladder::Down);
                    matrix.add(0.5 * j
                               * ladder_coefficient(ma, na, Ladder::Up)
                               * ladder_coefficient(mb, nb, Ladder::Down),
                               lex, other);
                }
                if na > 0 && nb + 1 < mb {
                    let other = converter.ladder(
                        converter.ladder(lex, a, Ladder::Down), b, Ladder::Up);
                    matrix.add(0.5 * j
                               * ladder_coefficient(ma, na, Ladder::Down)
                               * ladder_coefficient(mb, nb, Ladder::Up),
                               lex, other);
                }
            }
        }
    }

    pub fn is_invariant_under(&self, permutation: &[usize]) -> bool {
        self.parameters().is_invariant_under(permutation)
    }
}
