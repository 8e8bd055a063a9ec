//! Sparse operator matrices over the lexicographic basis, built lazily one
//! row at a time.
use fnv::{FnvHashMap, FnvHashSet};
use super::index_converter::{IndexConverter, LexIndex};
use super::operator::Operator;
use super::utils;

/// Sparse matrix keyed by lexicographic row and column indices.
#[derive(Clone, Debug, Default)]
pub struct LexMatrix {
    rows: FnvHashMap<LexIndex, FnvHashMap<LexIndex, f64>>,
}

impl LexMatrix {
    /// Accumulate `value` into cell `(i, j)`.
    #[inline]
    pub fn add(&mut self, value: f64, i: LexIndex, j: LexIndex) {
        *self.rows.entry(i).or_insert_with(utils::default_hash_map)
            .entry(j).or_insert(0.0) += value;
    }

    #[inline]
    pub fn get(&self, i: LexIndex, j: LexIndex) -> f64 {
        self.rows.get(&i)
            .and_then(|row| row.get(&j))
            .cloned()
            .unwrap_or(0.0)
    }

    pub fn row(&self, i: LexIndex) -> Option<&FnvHashMap<LexIndex, f64>> {
        self.rows.get(&i)
    }
}

/// Rows of an operator in the lexicographic basis, each constructed on
/// first access.  Scoped to the evaluation of a single block.
#[derive(Debug)]
pub struct LexCache<'a> {
    converter: &'a IndexConverter,
    operator: &'a Operator,
    matrix: LexMatrix,
    built: FnvHashSet<LexIndex>,
}

impl<'a> LexCache<'a> {
    pub fn new(converter: &'a IndexConverter, operator: &'a Operator) -> Self {
        Self {
            converter,
            operator,
            matrix: Default::default(),
            built: utils::default_hash_set(),
        }
    }

    pub fn ensure_row(&mut self, lex: LexIndex) {
        if self.built.insert(lex) {
            self.operator.construct_row(self.converter, &mut self.matrix, lex);
        }
    }

    pub fn get(&mut self, i: LexIndex, j: LexIndex) -> f64 {
        self.ensure_row(i);
        self.matrix.get(i, j)
    }

    /// Nonzero-structure of row `lex`, or `None` if the operator has no
    /// elements in it.
    pub fn row(&mut self, lex: LexIndex) -> Option<&FnvHashMap<LexIndex, f64>> {
        self.ensure_row(lex);
        self.matrix.row(lex)
    }

    pub fn num_built_rows(&self) -> usize {
        self.built.len()
    }
}
