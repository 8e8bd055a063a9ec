extern crate netlib_src;
#[macro_use]
extern crate spinblock;

use std::sync::Arc;
use spinblock::group::{Group, GroupKind};
use spinblock::index_converter::IndexConverter;
use spinblock::linalg::{Eigensolver, Lapack};
use spinblock::matrix_builder::MatrixBuilder;
use spinblock::model::{Reduction, Step};
use spinblock::operator::Operator;
use spinblock::space::Space;
use spinblock::spectrum::{DegenerateLevel, Spectrum};
use spinblock::term::ZeroCenterTerm;
use spinblock::utils::Toler;

const TOLER: Toler = Toler { relerr: 1e-9, abserr: 1e-9 };

#[test]
fn test_constant_operator() {
    let conv = IndexConverter::new(vec![2, 2]).unwrap();
    let space = Space::trivial(&conv);
    for i in 0 .. 10 {
        let c = 11.0 * i as f64;
        let op = Operator {
            zero_center: vec![Arc::new(ZeroCenterTerm::Constant(c))],
            .. Default::default()
        };
        let matrices = MatrixBuilder::new(&conv).build(&space, &op);
        assert_eq!(matrices.len(), 1);
        for p in 0 .. 4 {
            for q in 0 .. 4 {
                assert_eq!(matrices[0][(p, q)], if p == q { c } else { 0.0 });
            }
        }
    }
}

/// Multiplicities `2 S + 1` of the eigenstates of `S²`, sorted.
fn spin_multiplicities(mults: Vec<u8>) -> Vec<u32> {
    let conv = IndexConverter::new(mults).unwrap();
    let space = Space::trivial(&conv);
    let s2 = Operator::total_spin_squared(&conv);
    let m = &MatrixBuilder::new(&conv).build(&space, &s2)[0];
    let mut result: Vec<u32> = Lapack::default().eigenvalues(m).unwrap()
        .into_iter()
        .map(|x| (1.0 + 4.0 * x).sqrt().round() as u32)
        .collect();
    result.sort();
    result
}

/// Each multiplicity `m` repeated `m` times.
fn expand(mults: &[u32]) -> Vec<u32> {
    let mut result: Vec<u32> = mults.iter()
        .flat_map(|&m| (0 .. m).map(move |_| m))
        .collect();
    result.sort();
    result
}

#[test]
fn test_spin_addition() {
    assert_eq!(spin_multiplicities(vec![2, 2]), expand(&[1, 3]));
    assert_eq!(spin_multiplicities(vec![2, 2, 2, 2]),
               expand(&[1, 1, 3, 3, 3, 5]));
    // 1 ⊗ 1/2 = 1/2 ⊕ 3/2
    assert_eq!(spin_multiplicities(vec![3, 2]), expand(&[2, 4]));
}

struct Ring {
    conv: IndexConverter,
    hamiltonian: Operator,
    s2: Operator,
    d4: Arc<Group>,
    inversion: Arc<Group>,
}

impl Ring {
    fn new(mult: u8, j1: f64, j2: f64) -> Self {
        let conv = IndexConverter::new(vec![mult; 4]).unwrap();
        let hamiltonian = Operator::heisenberg(4, &[
            ((0, 1), j1), ((1, 2), j1), ((2, 3), j1), ((3, 0), j1),
            ((0, 2), j2), ((1, 3), j2),
        ]).unwrap();
        let s2 = Operator::total_spin_squared(&conv);
        let d4 = Arc::new(Group::new(
            GroupKind::D4, vec![vec![1, 2, 3, 0], vec![0, 3, 2, 1]]).unwrap());
        let inversion = Arc::new(Group::new(
            GroupKind::S2, vec![vec![2, 3, 0, 1]]).unwrap());
        Self { conv, hamiltonian, s2, d4, inversion }
    }

    /// Energies and degenerate-eigenspace sums of `S²`.
    fn levels(&self, steps: Vec<Step>) -> (Vec<f64>, Vec<DegenerateLevel>) {
        let space = Reduction::new(steps).unwrap()
            .run(&self.conv, Space::trivial(&self.conv)).unwrap();
        space.check_dimension(&self.conv).unwrap();
        let builder = MatrixBuilder::new(&self.conv);
        let spectrum = Spectrum::compute(
            &Lapack::default(), &space,
            &builder.build(&space, &self.hamiltonian)).unwrap();
        let s2 = spectrum.expectation_values(&builder.build(&space, &self.s2));
        (spectrum.expanded_energies(), spectrum.degenerate_sums(&s2, 1e-7))
    }
}

#[test]
fn test_ring_order_independence() {
    for &mult in &[2, 3] {
        let ring = Ring::new(mult, 1.0, 0.37);
        let d4 = || Step::Symmetrize(ring.d4.clone());
        let (ref_energies, ref_levels) = ring.levels(vec![]);
        assert_eq!(ref_energies.len(), ring.conv.total_size() as usize);
        let pipelines = vec![
            vec![Step::TzSort],
            vec![d4()],
            vec![d4(), Step::SimplifyNonAbelian],
            vec![Step::TzSort, d4()],
            vec![d4(), Step::TzSort, Step::EliminatePositiveProjections],
            vec![Step::TzSort, Step::EliminatePositiveProjections],
            vec![Step::TzSort, d4(), Step::EliminatePositiveProjections,
                 Step::SimplifyNonAbelian],
            vec![Step::Symmetrize(ring.inversion.clone()), Step::TzSort, d4(),
                 Step::SimplifyNonAbelian],
        ];
        for steps in pipelines {
            let desc = format!("{:?}", steps);
            let (energies, levels) = ring.levels(steps);
            assert_eq!(energies.len(), ref_energies.len(), "{}", desc);
            toler_assert_all_eq!(TOLER, energies, ref_energies);
            assert_eq!(levels.len(), ref_levels.len(), "{}", desc);
            for (l, r) in levels.iter().zip(&ref_levels) {
                toler_assert_eq!(TOLER, l.energy, r.energy);
                assert_eq!(l.multiplicity, r.multiplicity, "{}", desc);
                toler_assert_eq!(Toler { relerr: 1e-8, abserr: 1e-8 },
                                 l.sum, r.sum);
            }
        }
    }
}
