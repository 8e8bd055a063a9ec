//! Eigenvalues of block-diagonal operators and observables of the
//! eigenstates.
use std::cmp::Ordering;
use rayon::prelude::*;
use super::error::Error;
use super::linalg::{self, Eigensolver, Eigensystem};
use super::matrix::Matrix;
use super::space::Space;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Level {
    pub energy: f64,
    /// Block the level belongs to.
    pub block: usize,
    /// Index of the eigenvalue within its block.
    pub index: usize,
    pub degeneracy: u32,
}

/// Levels of all blocks sorted by energy.
#[derive(Clone, Debug, Default)]
pub struct Spectrum {
    pub levels: Vec<Level>,
    pub eigensystems: Vec<Eigensystem>,
}

/// A set of levels sharing the same energy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegenerateLevel {
    pub energy: f64,
    /// Total number of states, counting block degeneracies.
    pub multiplicity: u64,
    /// Sum of a per-level quantity over all states.
    pub sum: f64,
}

impl Spectrum {
    /// Diagonalize `matrices[b]`, the operator restricted to block `b` of
    /// `space`.
    pub fn compute<E: Eigensolver + Sync>(
        solver: &E,
        space: &Space,
        matrices: &[Matrix<f64>],
    ) -> Result<Self, Error> {
        assert_eq!(space.blocks.len(), matrices.len());
        let eigensystems = matrices.par_iter()
            .map(|m| solver.eigensystem(m))
            .collect::<Result<Vec<_>, Error>>()?;
        let mut levels = Vec::new();
        for (block, es) in eigensystems.iter().enumerate() {
            let degeneracy = space.blocks[block].properties.degeneracy;
            for (index, &energy) in es.values.iter().enumerate() {
                levels.push(Level { energy, block, index, degeneracy });
            }
        }
        levels.sort_by(|a, b| {
            a.energy.partial_cmp(&b.energy).unwrap_or(Ordering::Equal)
        });
        Ok(Self { levels, eigensystems })
    }

    pub fn dimension(&self) -> u64 {
        self.levels.iter().map(|l| u64::from(l.degeneracy)).sum()
    }

    /// Energies with every level repeated `degeneracy` times, ascending.
    pub fn expanded_energies(&self) -> Vec<f64> {
        self.levels.iter()
            .flat_map(|l| (0 .. l.degeneracy).map(move |_| l.energy))
            .collect()
    }

    /// `⟨ψ|O|ψ⟩` for each level, in the order of `levels`.  `observable[b]`
    /// must be the observable restricted to block `b` of the same space.
    pub fn expectation_values(&self, observable: &[Matrix<f64>]) -> Vec<f64> {
        assert_eq!(observable.len(), self.eigensystems.len());
        let per_block: Vec<Vec<f64>> = observable.par_iter()
            .zip(&self.eigensystems)
            .map(|(o, es)| linalg::expectation_values(o, &es.vectors))
            .collect();
        self.levels.iter()
            .map(|l| per_block[l.block][l.index])
            .collect()
    }

    /// Group levels whose energies differ by at most `toler` from their
    /// neighbor and sum `values` (one per level) over each group, weighted
    /// by degeneracy.  The sums do not depend on the choice of basis within
    /// a degenerate eigenspace.
    pub fn degenerate_sums(&self, values: &[f64], toler: f64) -> Vec<DegenerateLevel> {
        assert_eq!(values.len(), self.levels.len());
        let mut groups: Vec<DegenerateLevel> = Vec::new();
        let mut prev_energy = None;
        for (l, &x) in self.levels.iter().zip(values) {
            let deg = u64::from(l.degeneracy);
            let joins = prev_energy.map_or(false, |e| l.energy - e <= toler);
            prev_energy = Some(l.energy);
            if joins {
                if let Some(group) = groups.last_mut() {
                    group.multiplicity += deg;
                    group.sum += x * deg as f64;
                    continue;
                }
            }
            groups.push(DegenerateLevel {
                energy: l.energy,
                multiplicity: deg,
                sum: x * deg as f64,
            });
        }
        groups
    }
}
