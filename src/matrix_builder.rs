//! Operator matrices in the reduced basis, one dense matrix per block.
//!
//! For a block with basis vectors `v[p]` the matrix is
//!
//! ```text
//! M[p][q] = ∑[k, l] v[p][k] A[k][l] v[q][l]
//! ```
//!
//! where `A` is the operator in the lexicographic basis.  Only the rows of
//! `A` touched by the block are ever constructed.
use fnv::FnvHashMap;
use rayon::prelude::*;
use super::index_converter::{IndexConverter, LexIndex};
use super::lex_cache::LexCache;
use super::matrix::Matrix;
use super::operator::Operator;
use super::space::{Block, Space};
use super::utils;

#[derive(Clone, Copy, Debug)]
pub struct MatrixBuilder<'a> {
    converter: &'a IndexConverter,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(converter: &'a IndexConverter) -> Self {
        Self { converter }
    }

    pub fn build_block(&self, block: &Block, operator: &Operator) -> Matrix<f64> {
        let n = block.len();
        let mut matrix = Matrix::replicate(n, n, 0.0);
        let mut cache = LexCache::new(self.converter, operator);

        // lex → [(q, v[q][lex])]
        let mut columns: FnvHashMap<LexIndex, Vec<(usize, f64)>> =
            utils::default_hash_map();
        for (q, v) in block.basis.iter().enumerate() {
            for (lex, c) in v.iter() {
                columns.entry(lex).or_insert_with(Vec::new).push((q, c));
            }
        }

        for (p, v) in block.basis.iter().enumerate() {
            for (lk, vk) in v.iter() {
                let row = match cache.row(lk) {
                    Some(row) => row,
                    None => continue,
                };
                for (ll, &cell) in row {
                    if cell == 0.0 {
                        continue;
                    }
                    if let Some(entries) = columns.get(ll) {
                        for &(q, vl) in entries {
                            matrix[(p, q)] += vk * cell * vl;
                        }
                    }
                }
            }
        }
        matrix
    }

    /// One matrix per block, in block order.  Blocks are evaluated in
    /// parallel.
    pub fn build(&self, space: &Space, operator: &Operator) -> Vec<Matrix<f64>> {
        space.blocks.par_iter()
            .map(|block| self.build_block(block, operator))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use super::*;
    use super::super::term::ZeroCenterTerm;

    #[test]
    fn test_constant() {
        let conv = IndexConverter::new(vec![2, 2]).unwrap();
        let space = Space::trivial(&conv);
        for c in (0 .. 10).map(|i| 11.0 * i as f64) {
            let op = Operator {
                zero_center: vec![Arc::new(ZeroCenterTerm::Constant(c))],
                .. Default::default()
            };
            let matrices = MatrixBuilder::new(&conv).build(&space, &op);
            assert_eq!(matrices.len(), 1);
            let m = &matrices[0];
            assert_eq!(m.dims(), (4, 4));
            for i in 0 .. 4 {
                for j in 0 .. 4 {
                    assert_eq!(m[(i, j)], if i == j { c } else { 0.0 });
                }
            }
        }
    }

    #[test]
    fn test_symmetric() {
        let conv = IndexConverter::new(vec![2, 3, 2]).unwrap();
        let s2 = Operator::total_spin_squared(&conv);
        let m = MatrixBuilder::new(&conv)
            .build_block(&Space::trivial(&conv).blocks[0], &s2);
        for i in 0 .. m.num_rows() {
            for j in 0 .. i {
                assert!((m[(i, j)] - m[(j, i)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_non_interacting_pairs() {
        // a chain of three spin-1/2 where only the first pair interacts
        let conv = IndexConverter::new(vec![2, 2, 2]).unwrap();
        let h = Operator::heisenberg(3, &[((0, 1), 1.0)]).unwrap();
        let m = MatrixBuilder::new(&conv)
            .build_block(&Space::trivial(&conv).blocks[0], &h);
        // S[0] · S[1] in the basis ↓↓, ↓↑, ↑↓, ↑↑
        let pair = [
            [0.25, 0.0, 0.0, 0.0],
            [0.0, -0.25, 0.5, 0.0],
            [0.0, 0.5, -0.25, 0.0],
            [0.0, 0.0, 0.0, 0.25],
        ];
        for p in 0 .. 8 {
            for q in 0 .. 8 {
                assert!(!m[(p, q)].is_nan(), "({}, {}) is NaN", p, q);
                // the last center is the least significant digit
                let expected = if p % 2 == q % 2 { pair[p / 2][q / 2] } else { 0.0 };
                assert_eq!(m[(p, q)], expected, "({}, {})", p, q);
            }
        }
    }
}
