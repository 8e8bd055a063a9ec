//! Conversion between lexicographic indices and per-center projections.
//!
//! A tensor-product basis state of `N` centers is labeled by the projections
//! `n[i] ∈ [0, m[i])`, where `m[i]` is the multiplicity of center `i`.  The
//! lexicographic index is the mixed-radix number with digits `n[i]`, the
//! first center being the most significant digit.
//!
//! Naming convention:
//!
//!   - `lex` = lexicographic index
//!   - `n` = projection counted from the lowest state (`0 ≤ n < m`)
//!   - `m` = multiplicity (`2 S + 1`)
//!
use super::error::{invalid_argument, Error};
use super::half::Half;
use super::utils::cast;

/// Lexicographic index of a tensor-product basis state.
pub type LexIndex = u32;

/// Projection of one center, counted from the lowest state.
pub type Projection = u8;

/// Direction of a ladder operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ladder {
    /// `S+`: increases the projection by one.
    Up,
    /// `S−`: decreases the projection by one.
    Down,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexConverter {
    mults: Vec<Projection>,
    /// `weights[i] == ∏[j > i] mults[j]`
    weights: Vec<LexIndex>,
    total_size: LexIndex,
}

impl IndexConverter {
    /// Fails if any multiplicity is zero, if there are no centers, or if the
    /// tensor-product space does not fit into a `LexIndex`.
    pub fn new(mults: Vec<Projection>) -> Result<Self, Error> {
        if mults.is_empty() {
            return Err(invalid_argument("at least one center is required"));
        }
        if let Some(i) = mults.iter().position(|&m| m == 0) {
            return Err(invalid_argument(
                format!("center {} has zero multiplicity", i)));
        }
        let mut weights = vec![0; mults.len()];
        let mut total_size: LexIndex = 1;
        for (i, &m) in mults.iter().enumerate().rev() {
            weights[i] = total_size;
            total_size = total_size.checked_mul(LexIndex::from(m))
                .ok_or_else(|| invalid_argument(
                    "tensor-product space is too large"))?;
        }
        Ok(Self { mults, weights, total_size })
    }

    pub fn multiplicities(&self) -> &[Projection] {
        &self.mults
    }

    pub fn num_centers(&self) -> usize {
        self.mults.len()
    }

    pub fn total_size(&self) -> LexIndex {
        self.total_size
    }

    pub fn multiplicity(&self, center: usize) -> Projection {
        self.mults[center]
    }

    pub fn spin(&self, center: usize) -> Half<i32> {
        Half::spin_of_multiplicity(self.mults[center])
    }

    /// Largest possible total projection `∑ (m[i] − 1)`.  Total projections
    /// range over `0 ..= max_total_projection()`.
    pub fn max_total_projection(&self) -> u32 {
        self.mults.iter().map(|&m| u32::from(m) - 1).sum()
    }

    #[inline]
    pub fn decode_one(&self, lex: LexIndex, center: usize) -> Projection {
        cast((lex / self.weights[center]) % LexIndex::from(self.mults[center]))
    }

    /// Decode into a caller-provided buffer of length `num_centers()`.
    #[inline]
    pub fn decode_into(&self, mut lex: LexIndex, ns: &mut [Projection]) {
        debug_assert_eq!(ns.len(), self.mults.len());
        for (i, n) in ns.iter_mut().enumerate().rev() {
            let m = LexIndex::from(self.mults[i]);
            *n = cast(lex % m);
            lex /= m;
        }
    }

    pub fn decode_all(&self, lex: LexIndex) -> Vec<Projection> {
        let mut ns = vec![0; self.mults.len()];
        self.decode_into(lex, &mut ns);
        ns
    }

    pub fn decode_total_projection(&self, mut lex: LexIndex) -> u32 {
        let mut total = 0;
        for &m in self.mults.iter().rev() {
            let m = LexIndex::from(m);
            total += lex % m;
            lex /= m;
        }
        total
    }

    #[inline]
    pub fn encode(&self, ns: &[Projection]) -> LexIndex {
        debug_assert_eq!(ns.len(), self.mults.len());
        ns.iter()
            .zip(&self.weights)
            .map(|(&n, &w)| LexIndex::from(n) * w)
            .sum()
    }

    /// Shift the projection of `center` by one quantum.
    ///
    /// The caller must make sure the new projection stays within
    /// `[0, multiplicity(center))`; this is only checked in debug builds.
    #[inline]
    pub fn ladder(&self, lex: LexIndex, center: usize, dir: Ladder) -> LexIndex {
        debug_assert!(self.can_ladder(lex, center, dir));
        match dir {
            Ladder::Up => lex + self.weights[center],
            Ladder::Down => lex - self.weights[center],
        }
    }

    #[inline]
    pub fn can_ladder(&self, lex: LexIndex, center: usize, dir: Ladder) -> bool {
        let n = self.decode_one(lex, center);
        match dir {
            Ladder::Up => n + 1 < self.mults[center],
            Ladder::Down => n > 0,
        }
    }
}

/// Matrix element `√(S (S + 1) − m (m ± 1))` of `S±` acting on the `n`-th
/// state of a multiplet of multiplicity `mult`, written in terms of `n`:
/// `(2 S − n)(n + 1)` for `S+` and `n (2 S + 1 − n)` for `S−`.
#[inline]
pub fn ladder_coefficient(mult: Projection, n: Projection, dir: Ladder) -> f64 {
    let m = f64::from(mult);
    let n = f64::from(n);
    match dir {
        Ladder::Up => ((m - 1.0 - n) * (n + 1.0)).sqrt(),
        Ladder::Down => (n * (m - n)).sqrt(),
    }
}
