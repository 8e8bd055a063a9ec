use std::sync::Arc;
use super::error::{invalid_argument, Error};
use super::index_converter::{IndexConverter, LexIndex};
use super::lex_cache::LexMatrix;
use super::term::{OneCenterTerm, PairTable, TwoCenterTerm, ZeroCenterTerm};

/// A sum of interaction terms.  Immutable once built; shared read-only by
/// every block during matrix construction.
#[derive(Clone, Debug, Default)]
pub struct Operator {
    pub zero_center: Vec<Arc<ZeroCenterTerm>>,
    pub one_center: Vec<Arc<OneCenterTerm>>,
    pub two_center: Vec<Arc<TwoCenterTerm>>,
}

impl Operator {
    /// Deposit the elements of row `lex`: zero-center terms first, then the
    /// one-center terms of each center, then the two-center terms of each
    /// pair `a < b`.
    pub fn construct_row(
        &self,
        converter: &IndexConverter,
        matrix: &mut LexMatrix,
        lex: LexIndex,
    ) {
        for term in &self.zero_center {
            term.construct(matrix, lex);
        }
        let n = converter.num_centers();
        if !self.one_center.is_empty() {
            for center in 0 .. n {
                for term in &self.one_center {
                    term.construct(converter, matrix, lex, center);
                }
            }
        }
        if !self.two_center.is_empty() {
            for a in 0 .. n {
                for b in a + 1 .. n {
                    for term in &self.two_center {
                        term.construct(converter, matrix, lex, a, b);
                    }
                }
            }
        }
    }

    /// Check that every parameter table covers exactly the centers of
    /// `converter`.
    pub fn validate(&self, converter: &IndexConverter) -> Result<(), Error> {
        let n = converter.num_centers();
        for term in &self.one_center {
            if term.parameters().len() != n {
                return Err(invalid_argument(format!(
                    "one-center term has {} parameters but there are {} centers",
                    term.parameters().len(), n)));
            }
        }
        for term in &self.two_center {
            if term.parameters().num_centers() != n {
                return Err(invalid_argument(format!(
                    "two-center term spans {} centers but there are {}",
                    term.parameters().num_centers(), n)));
            }
        }
        Ok(())
    }

    pub fn is_invariant_under(&self, permutation: &[usize]) -> bool {
        self.one_center.iter().all(|t| t.is_invariant_under(permutation))
            && self.two_center.iter().all(|t| t.is_invariant_under(permutation))
    }

    /// Heisenberg Hamiltonian `∑ J[a][b] S[a] · S[b]` over the given pairs.
    pub fn heisenberg(num_centers: usize, pairs: &[((usize, usize), f64)])
                      -> Result<Self, Error> {
        let mut table = PairTable::new(num_centers);
        for &((a, b), j) in pairs {
            table.set(a, b, j)?;
        }
        Ok(Self {
            two_center: vec![Arc::new(TwoCenterTerm::ScalarProduct(table))],
            .. Default::default()
        })
    }

    /// Total spin squared:
    ///
    /// ```text
    /// S² = ∑[i] S[i] (S[i] + 1) + 2 ∑[a < b] S[a] · S[b]
    /// ```
    pub fn total_spin_squared(converter: &IndexConverter) -> Self {
        let n = converter.num_centers();
        let casimir = (0 .. n).map(|i| converter.spin(i).casimir()).sum();
        let table = PairTable::uniform(n, 2.0);
        Self {
            zero_center: vec![Arc::new(ZeroCenterTerm::Constant(casimir))],
            one_center: Vec::default(),
            two_center: vec![Arc::new(TwoCenterTerm::ScalarProduct(table))],
        }
    }
}
