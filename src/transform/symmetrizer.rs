//! Reduction by the irreducible representations of a permutation group.
//!
//! For each parent block and each irreducible representation `ρ` of
//! dimension `d`, the child block holds an orthonormal basis of the vectors
//! transforming as row 0 of `ρ`, obtained with the projectors `P_0k`.  The
//! other rows carry the same spectrum for any invariant operator, so they
//! are not stored; the degeneracy of the child is that of the parent times
//! `d`.
use std::sync::Arc;
use fnv::FnvHashMap;
use rayon::prelude::*;
use super::Transform;
use super::super::error::{invalid_argument, Error};
use super::super::group::{permute_into, Group};
use super::super::index_converter::{IndexConverter, LexIndex, Projection};
use super::super::space::{BasisVector, Block, BlockProperties, Space};
use super::super::utils;

/// Coefficients at or below this magnitude are dropped from projected
/// vectors.
const PRUNE_THRESHOLD: f64 = 1e-9;

/// Projected vectors whose norm falls below this are treated as zero.
const NEGLIGIBLE_NORM: f64 = 1e-3;

/// Overlaps below this are treated as orthogonal.
const OVERLAP_THRESHOLD: f64 = 1e-9;

#[derive(Clone, Debug)]
pub struct Symmetrizer<'a> {
    converter: &'a IndexConverter,
    group: Arc<Group>,
}

impl<'a> Symmetrizer<'a> {
    /// Fails unless the group acts on exactly the centers of `converter` and
    /// only ever maps a center onto a center of the same multiplicity.
    pub fn new(converter: &'a IndexConverter, group: Arc<Group>)
               -> Result<Self, Error> {
        if group.num_centers() != converter.num_centers() {
            return Err(invalid_argument(format!(
                "group acts on {} centers, but there are {}",
                group.num_centers(), converter.num_centers())));
        }
        let mults = converter.multiplicities();
        for p in group.elements() {
            if let Some(i) = (0 .. p.len()).find(|&i| mults[p[i]] != mults[i]) {
                return Err(invalid_argument(format!(
                    "{:?} maps center {} (multiplicity {}) onto center {} \
                     (multiplicity {})", p, i, mults[i], p[i], mults[p[i]])));
            }
        }
        Ok(Self { converter, group })
    }

    /// Lexicographic index of `lex` under every group element.
    fn orbit(&self, lex: LexIndex, ns: &mut [Projection], out: &mut [Projection])
             -> Vec<LexIndex> {
        self.converter.decode_into(lex, ns);
        self.group.elements().iter().map(|p| {
            permute_into(p, ns, out);
            self.converter.encode(out)
        }).collect()
    }

    fn symmetrize_block(&self, parent: Block) -> Vec<Block> {
        let reps = self.group.representations();
        let n = self.converter.num_centers();
        let mut ns = vec![0; n];
        let mut out = vec![0; n];

        let mut destinations: Vec<Destination> = reps.iter()
            .map(|_| Destination::default())
            .collect();

        // Skipping vectors whose orbit has already been covered is only
        // valid if each basis vector is a single lexicographic state.
        let skip_covered = parent.is_lexicographic();
        let degeneracy = parent.properties.degeneracy;
        let mut coverage: FnvHashMap<LexIndex, u32> = utils::default_hash_map();

        for v in &parent.basis {
            let first = match v.first_index() {
                Some(first) => first,
                None => continue,
            };
            if skip_covered
                && coverage.get(&first).cloned().unwrap_or(0) >= degeneracy
            {
                continue;
            }

            // images[g] = g applied to v
            let mut images: Vec<Vec<(LexIndex, f64)>> =
                vec![Vec::with_capacity(v.len()); self.group.order()];
            for (lex, c) in v.iter() {
                for (g, image) in self.orbit(lex, &mut ns, &mut out)
                    .into_iter().enumerate()
                {
                    images[g].push((image, c));
                }
            }

            for (r, rep) in reps.iter().enumerate() {
                for proj in rep.projectors.iter().filter(|p| p.row == 0) {
                    let mut candidate = BasisVector::default();
                    for (g, &coeff) in proj.coefficients.iter().enumerate() {
                        if coeff == 0.0 {
                            continue;
                        }
                        for &(lex, c) in &images[g] {
                            candidate.add(lex, coeff * c);
                        }
                    }
                    candidate.prune(PRUNE_THRESHOLD);
                    if candidate.normalize() < NEGLIGIBLE_NORM {
                        continue;
                    }
                    destinations[r].insert(candidate);
                }
            }

            if skip_covered {
                let mut orbit = self.orbit(first, &mut ns, &mut out);
                orbit.sort();
                orbit.dedup();
                for lex in orbit {
                    *coverage.entry(lex).or_insert(0) += 1;
                }
            }
        }

        destinations.into_iter().zip(reps).enumerate()
            .filter(|(_, (dest, _))| !dest.vectors.is_empty())
            .map(|(r, (dest, rep))| {
                let mut properties: BlockProperties = parent.properties.clone();
                properties.representations.push(r);
                properties.degeneracy *= rep.dimension as u32;
                Block { properties, basis: dest.vectors }
            })
            .collect()
    }
}

impl<'a> Transform for Symmetrizer<'a> {
    fn name(&self) -> String {
        format!("Symmetrizer({})", self.group.kind())
    }

    /// Applying a group that the space already carries leaves the space
    /// unchanged.
    fn apply(&self, mut space: Space) -> Result<Space, Error> {
        if space.history.has_group(&self.group) {
            warn!("{} has already been applied; skipping", self.group);
            return Ok(space);
        }
        if let Some(g) = space.history.groups.iter()
            .find(|g| !g.commutes_with(&self.group))
        {
            return Err(invalid_argument(format!(
                "{} does not commute with the previously applied {}",
                self.group.kind(), g.kind())));
        }
        let blocks = space.take_blocks();
        let num_parents = blocks.len();
        space.blocks = blocks.into_par_iter()
            .map(|block| self.symmetrize_block(block))
            .collect::<Vec<_>>()
            .into_iter()
            .flat_map(|children| children)
            .collect();
        space.history.groups.push(self.group.clone());
        debug!("{}: {} -> {} blocks",
               self.name(), num_parents, space.blocks.len());
        Ok(space)
    }
}

/// Orthonormal vectors of one representation, with an index from each
/// lexicographic state to the vectors that touch it.
#[derive(Debug, Default)]
struct Destination {
    vectors: Vec<BasisVector>,
    touching: FnvHashMap<LexIndex, Vec<usize>>,
}

impl Destination {
    /// Append the part of the normalized `candidate` that is orthogonal to
    /// the existing vectors, unless it is negligible.
    fn insert(&mut self, mut candidate: BasisVector) {
        // twice for numerical stability
        for _ in 0 .. 2 {
            let mut overlapping: Vec<usize> = candidate.indices()
                .filter_map(|lex| self.touching.get(&lex))
                .flat_map(|ids| ids.iter().cloned())
                .collect();
            overlapping.sort();
            overlapping.dedup();
            let mut changed = false;
            for id in overlapping {
                let overlap = self.vectors[id].dot(&candidate);
                if overlap.abs() > OVERLAP_THRESHOLD {
                    candidate.axpy(-overlap, &self.vectors[id]);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            candidate.prune(PRUNE_THRESHOLD);
        }
        if candidate.normalize() < NEGLIGIBLE_NORM {
            return;
        }
        let id = self.vectors.len();
        for lex in candidate.indices() {
            self.touching.entry(lex).or_insert_with(Vec::new).push(id);
        }
        self.vectors.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::group::GroupKind;
    use super::super::TzSorter;

    fn swap2() -> Arc<Group> {
        Arc::new(Group::new(GroupKind::S2, vec![vec![1, 0]]).unwrap())
    }

    #[test]
    fn test_two_spins() {
        let conv = IndexConverter::new(vec![2, 2]).unwrap();
        let sym = Symmetrizer::new(&conv, swap2()).unwrap();
        let space = sym.apply(Space::trivial(&conv)).unwrap();
        space.check_dimension(&conv).unwrap();
        // symmetric: ↓↓, ↑↑, ↓↑ + ↑↓; antisymmetric: ↓↑ − ↑↓
        assert_eq!(space.blocks.len(), 2);
        assert_eq!(space.blocks[0].properties.representations, vec![0]);
        assert_eq!(space.blocks[0].len(), 3);
        assert_eq!(space.blocks[1].properties.representations, vec![1]);
        let singlet = &space.blocks[1].basis[0];
        assert_eq!(singlet.len(), 2);
        assert!((singlet.get(1) + singlet.get(2)).abs() < 1e-12);
        assert!((singlet.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_dimensional_representation() {
        let conv = IndexConverter::new(vec![2, 2, 2]).unwrap();
        let group = Arc::new(Group::new(
            GroupKind::S3, vec![vec![1, 2, 0], vec![0, 2, 1]]).unwrap());
        let space = Symmetrizer::new(&conv, group).unwrap()
            .apply(Space::trivial(&conv)).unwrap();
        space.check_dimension(&conv).unwrap();
        // three spin-1/2: A1 holds the quartet, E one row of the two doublets
        assert_eq!(space.blocks.len(), 2);
        let a1 = &space.blocks[0];
        assert_eq!(a1.properties.representations, vec![0]);
        assert_eq!((a1.len(), a1.properties.degeneracy), (4, 1));
        let e = &space.blocks[1];
        assert_eq!(e.properties.representations, vec![2]);
        assert_eq!((e.len(), e.properties.degeneracy), (2, 2));
    }

    #[test]
    fn test_orthogonality() {
        let conv = IndexConverter::new(vec![3, 3, 3]).unwrap();
        let group = Arc::new(Group::new(
            GroupKind::S3, vec![vec![1, 2, 0], vec![0, 2, 1]]).unwrap());
        let space = TzSorter::new(&conv).apply(Space::trivial(&conv)).unwrap();
        let space = Symmetrizer::new(&conv, group).unwrap()
            .apply(space).unwrap();
        space.check_dimension(&conv).unwrap();
        for block in &space.blocks {
            for (i, u) in block.basis.iter().enumerate() {
                assert!((u.norm_sqr() - 1.0).abs() < 1e-10);
                for w in &block.basis[.. i] {
                    assert!(u.dot(w).abs() < 1e-10);
                }
            }
        }
    }

    #[test]
    fn test_reapply_is_noop() {
        let conv = IndexConverter::new(vec![2, 2]).unwrap();
        let sym = Symmetrizer::new(&conv, swap2()).unwrap();
        let once = sym.apply(Space::trivial(&conv)).unwrap();
        let twice = sym.apply(once.clone()).unwrap();
        assert_eq!(once.blocks, twice.blocks);
        assert_eq!(twice.history.groups.len(), 1);
    }

    #[test]
    fn test_invalid_group() {
        let conv = IndexConverter::new(vec![2, 3]).unwrap();
        assert!(Symmetrizer::new(&conv, swap2()).is_err());
        let conv = IndexConverter::new(vec![2, 2, 2]).unwrap();
        assert!(Symmetrizer::new(&conv, swap2()).is_err());
    }
}
