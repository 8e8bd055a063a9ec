//! Reduced bases of the tensor-product Hilbert space.
//!
//! A `Space` partitions the Hilbert space into blocks.  Each `Block` holds
//! mutually orthogonal basis vectors that share the same symmetry labels
//! (`BlockProperties`).  Each `BasisVector` is a sparse linear combination
//! of lexicographic basis states.
//!
//! Throughout every reduction the dimension is conserved:
//!
//! ```text
//! ∑[block] len(block) × degeneracy(block) == total_size
//! ```
//!
use std::{fmt, mem};
use std::sync::Arc;
use fnv::FnvHashMap;
use super::error::Error;
use super::group::Group;
use super::index_converter::{IndexConverter, LexIndex};

/// Sparse mapping from lexicographic index to coefficient.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BasisVector(FnvHashMap<LexIndex, f64>);

impl BasisVector {
    pub fn unit(lex: LexIndex) -> Self {
        let mut v = Self::default();
        v.0.insert(lex, 1.0);
        v
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (LexIndex, f64)> + 'a {
        self.0.iter().map(|(&lex, &c)| (lex, c))
    }

    pub fn indices<'a>(&'a self) -> impl Iterator<Item = LexIndex> + 'a {
        self.0.keys().cloned()
    }

    pub fn get(&self, lex: LexIndex) -> f64 {
        self.0.get(&lex).cloned().unwrap_or(0.0)
    }

    pub fn add(&mut self, lex: LexIndex, value: f64) {
        *self.0.entry(lex).or_insert(0.0) += value;
    }

    /// The smallest lexicographic index present.  Any index would do as a
    /// representative; the smallest one keeps the choice deterministic.
    pub fn first_index(&self) -> Option<LexIndex> {
        self.0.keys().min().cloned()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().map(|(lex, c)| c * large.get(lex)).sum()
    }

    pub fn norm_sqr(&self) -> f64 {
        self.0.values().map(|c| c * c).sum()
    }

    /// `self ← self + alpha × other`
    pub fn axpy(&mut self, alpha: f64, other: &Self) {
        for (lex, c) in other.iter() {
            self.add(lex, alpha * c);
        }
    }

    pub fn scale(&mut self, alpha: f64) {
        for c in self.0.values_mut() {
            *c *= alpha;
        }
    }

    /// Remove entries whose magnitude does not exceed `threshold`.
    pub fn prune(&mut self, threshold: f64) {
        self.0.retain(|_, c| c.abs() > threshold);
    }

    /// Scale to unit norm.  Returns the original norm.
    pub fn normalize(&mut self) -> f64 {
        let norm = self.norm_sqr().sqrt();
        if norm > 0.0 {
            self.scale(1.0 / norm);
        }
        norm
    }
}

impl std::iter::FromIterator<(LexIndex, f64)> for BasisVector {
    fn from_iter<I: IntoIterator<Item = (LexIndex, f64)>>(iter: I) -> Self {
        let mut v = Self::default();
        for (lex, c) in iter {
            v.add(lex, c);
        }
        v
    }
}

/// Symmetry labels shared by all basis vectors of a block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockProperties {
    /// Total projection `∑ n[i]`, absent until `TzSorter` has been applied.
    pub total_projection: Option<u32>,
    /// Number of identical copies of this block in the full space.
    pub degeneracy: u32,
    /// Representation index for each applied group, in order of
    /// application.
    pub representations: Vec<usize>,
}

impl Default for BlockProperties {
    fn default() -> Self {
        Self {
            total_projection: None,
            degeneracy: 1,
            representations: Vec::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub properties: BlockProperties,
    pub basis: Vec<BasisVector>,
}

impl Block {
    pub fn new(properties: BlockProperties) -> Self {
        Self { properties, basis: Vec::default() }
    }

    pub fn len(&self) -> usize {
        self.basis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }

    /// Contribution of this block to the dimension of the space.
    pub fn dimension(&self) -> u64 {
        self.basis.len() as u64 * u64::from(self.properties.degeneracy)
    }

    /// Whether every basis vector is a single lexicographic state.
    pub fn is_lexicographic(&self) -> bool {
        self.basis.iter().all(|v| v.len() == 1)
    }
}

/// Bookkeeping of the reductions already applied to a `Space`.
#[derive(Clone, Debug, Default)]
pub struct History {
    /// Groups in order of application.  Entry `k` corresponds to entry `k`
    /// of `BlockProperties::representations`.
    pub groups: Vec<Arc<Group>>,
    pub tz_sorted: bool,
    pub positive_projections_eliminated: bool,
    pub non_abelian_simplified: bool,
}

impl History {
    pub fn has_group(&self, group: &Group) -> bool {
        self.groups.iter().any(|g| g.is_same_group(group))
    }

    pub fn non_abelian_groups<'a>(&'a self)
                                  -> impl Iterator<Item = (usize, &'a Arc<Group>)> + 'a
    {
        self.groups.iter().enumerate().filter(|&(_, g)| !g.is_abelian())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Space {
    pub blocks: Vec<Block>,
    pub history: History,
}

impl Space {
    /// A single unlabeled block containing every lexicographic basis state.
    pub fn trivial(converter: &IndexConverter) -> Self {
        let block = Block {
            properties: Default::default(),
            basis: (0 .. converter.total_size()).map(BasisVector::unit).collect(),
        };
        Self {
            blocks: vec![block],
            history: Default::default(),
        }
    }

    pub fn dimension(&self) -> u64 {
        self.blocks.iter().map(Block::dimension).sum()
    }

    pub fn check_dimension(&self, converter: &IndexConverter)
                           -> Result<(), Error> {
        let expected = u64::from(converter.total_size());
        let found = self.dimension();
        if expected == found {
            Ok(())
        } else {
            Err(Error::DimensionMismatch { expected, found })
        }
    }

    /// Move the blocks out, leaving the space empty.
    pub fn take_blocks(&mut self) -> Vec<Block> {
        mem::replace(&mut self.blocks, Vec::default())
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            let props = &block.properties;
            write!(f, "[{}]", i)?;
            if let Some(tz) = props.total_projection {
                write!(f, " tz={}", tz)?;
            }
            if !props.representations.is_empty() {
                write!(f, " repr=[")?;
                for (k, &r) in props.representations.iter().enumerate() {
                    if k != 0 {
                        write!(f, ", ")?;
                    }
                    match self.history.groups.get(k) {
                        Some(group) => write!(
                            f, "{}", group.representations()[r].name)?,
                        None => write!(f, "{}", r)?,
                    }
                }
                write!(f, "]")?;
            }
            writeln!(f, " degeneracy={} size={}", props.degeneracy, block.len())?;
        }
        write!(f, "dimension={}", self.dimension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial() {
        let conv = IndexConverter::new(vec![2, 3]).unwrap();
        let space = Space::trivial(&conv);
        assert_eq!(space.blocks.len(), 1);
        assert_eq!(space.blocks[0].len(), 6);
        assert!(space.blocks[0].is_lexicographic());
        space.check_dimension(&conv).unwrap();
        let mut space = space;
        space.blocks[0].properties.degeneracy = 2;
        match space.check_dimension(&conv) {
            Err(Error::DimensionMismatch { expected: 6, found: 12 }) => (),
            r => panic!("unexpected: {:?}", r),
        }
    }

    #[test]
    fn test_basis_vector() {
        let mut v: BasisVector = vec![(3, 1.0), (5, 2.0), (3, 1.0)]
            .into_iter().collect();
        assert_eq!(v.len(), 2);
        assert_eq!(v.get(3), 2.0);
        assert_eq!(v.first_index(), Some(3));
        let w: BasisVector = vec![(5, 1.0), (7, 4.0)].into_iter().collect();
        assert_eq!(v.dot(&w), 2.0);
        assert_eq!(w.dot(&v), 2.0);
        v.axpy(-2.0, &w);
        assert_eq!(v.get(5), 0.0);
        v.prune(1e-12);
        assert_eq!(v.len(), 2);
        assert_eq!(v.normalize(), (4.0f64 + 64.0).sqrt());
        assert!((v.norm_sqr() - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_block() {
        let block = Block {
            properties: Default::default(),
            basis: vec![
                vec![(0, 1.0), (1, 1.0)].into_iter().collect(),
                vec![(1, 1.0), (2, -1.0)].into_iter().collect(),
            ],
        };
        assert!(!block.is_lexicographic());
        assert_eq!(block.dimension(), 2);
    }
}
