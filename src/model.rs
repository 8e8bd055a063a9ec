//! Model configuration and the reduction pipeline.
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use serde_yaml;
use super::error::{invalid_argument, unsupported, Error};
use super::group::{Group, GroupKind, Permutation};
use super::index_converter::{IndexConverter, Projection};
use super::linalg::Eigensolver;
use super::matrix_builder::MatrixBuilder;
use super::operator::Operator;
use super::space::Space;
use super::spectrum::Spectrum;
use super::term::{OneCenterTerm, PairTable, TwoCenterTerm, ZeroCenterTerm};
use super::transform::{NonAbelianSimplifier, PositiveProjectionsEliminator,
                       Symmetrizer, Transform, TzSorter};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExchangeConf {
    pub centers: (usize, usize),
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymmetryConf {
    pub group: GroupKind,
    pub generators: Vec<Permutation>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReductionConf {
    pub tz_sorter: bool,
    pub positive_projections: bool,
    pub non_abelian_simplifier: bool,
}

/// Contents of a model file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConf {
    pub multiplicities: Vec<Projection>,
    /// Zero-center constant.
    pub constant: f64,
    /// Single-ion anisotropy per center; empty if absent.
    pub anisotropy: Vec<f64>,
    /// Isotropic exchange `J S[a] · S[b]`.
    pub exchange: Vec<ExchangeConf>,
    pub symmetries: Vec<SymmetryConf>,
    pub reduction: ReductionConf,
}

impl ModelConf {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(serde_yaml::from_reader(File::open(path)?)?)
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Fails if the model is malformed or if the Hamiltonian is not invariant
    /// under one of the requested symmetries.
    pub fn make_model(&self) -> Result<Model, Error> {
        let converter = IndexConverter::new(self.multiplicities.clone())?;
        let n = converter.num_centers();

        let mut hamiltonian = Operator::default();
        if self.constant != 0.0 {
            hamiltonian.zero_center.push(
                Arc::new(ZeroCenterTerm::Constant(self.constant)));
        }
        if !self.anisotropy.is_empty() {
            hamiltonian.one_center.push(Arc::new(
                OneCenterTerm::SingleIonAnisotropy(self.anisotropy.clone())));
        }
        if !self.exchange.is_empty() {
            let mut table = PairTable::new(n);
            for x in &self.exchange {
                let (a, b) = x.centers;
                table.set(a, b, x.value)?;
            }
            hamiltonian.two_center.push(
                Arc::new(TwoCenterTerm::ScalarProduct(table)));
        }
        hamiltonian.validate(&converter)?;

        let mut steps = Vec::new();
        if self.reduction.tz_sorter {
            steps.push(Step::TzSort);
        }
        for sym in &self.symmetries {
            let group = Arc::new(Group::new(sym.group, sym.generators.clone())?);
            check_invariance(&hamiltonian, &group)?;
            steps.push(Step::Symmetrize(group));
        }
        if self.reduction.positive_projections {
            steps.push(Step::EliminatePositiveProjections);
        }
        if self.reduction.non_abelian_simplifier {
            steps.push(Step::SimplifyNonAbelian);
        }
        Ok(Model {
            converter,
            hamiltonian,
            reduction: Reduction::new(steps)?,
        })
    }
}

/// Fails unless every element of `group` leaves every parameter table of
/// `operator` unchanged.
pub fn check_invariance(operator: &Operator, group: &Group) -> Result<(), Error> {
    match group.elements().iter().find(|p| !operator.is_invariant_under(p)) {
        None => Ok(()),
        Some(p) => Err(invalid_argument(format!(
            "operator is not invariant under {:?} of {}", p, group.kind()))),
    }
}

#[derive(Clone, Debug)]
pub enum Step {
    TzSort,
    Symmetrize(Arc<Group>),
    EliminatePositiveProjections,
    /// Folds the rows of the (unique) non-Abelian group applied before it.
    SimplifyNonAbelian,
}

/// A validated sequence of reductions.
#[derive(Clone, Debug, Default)]
pub struct Reduction {
    steps: Vec<Step>,
}

impl Reduction {
    /// Rejects repeated groups, `EliminatePositiveProjections` without a
    /// preceding `TzSort` or more than once, and `SimplifyNonAbelian` more
    /// than once or without exactly one preceding non-Abelian group.
    pub fn new(steps: Vec<Step>) -> Result<Self, Error> {
        let mut tz_sorted = false;
        let mut ppe = false;
        let mut simplified = false;
        let mut groups: Vec<&Arc<Group>> = Vec::new();
        for step in &steps {
            match *step {
                Step::TzSort => tz_sorted = true,
                Step::Symmetrize(ref group) => {
                    if groups.iter().any(|g| g.is_same_group(group)) {
                        return Err(invalid_argument(format!(
                            "{} is applied more than once", group.kind())));
                    }
                    groups.push(group);
                }
                Step::EliminatePositiveProjections => {
                    if !tz_sorted {
                        return Err(unsupported(
                            "positive projections can only be eliminated \
                             after TzSorter"));
                    }
                    if ppe {
                        return Err(unsupported(
                            "positive projections are eliminated twice"));
                    }
                    ppe = true;
                }
                Step::SimplifyNonAbelian => {
                    if simplified {
                        return Err(unsupported(
                            "NonAbelianSimplifier is applied twice"));
                    }
                    let count = groups.iter().filter(|g| !g.is_abelian()).count();
                    if count != 1 {
                        return Err(unsupported(format!(
                            "NonAbelianSimplifier requires exactly one \
                             non-Abelian group, found {}", count)));
                    }
                    simplified = true;
                }
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Apply every step in order, verifying the dimension after each.
    pub fn run(&self, converter: &IndexConverter, mut space: Space)
               -> Result<Space, Error> {
        for step in &self.steps {
            let transform: Box<dyn Transform + '_> = match *step {
                Step::TzSort => Box::new(TzSorter::new(converter)),
                Step::Symmetrize(ref group) => {
                    Box::new(Symmetrizer::new(converter, group.clone())?)
                }
                Step::EliminatePositiveProjections => {
                    Box::new(PositiveProjectionsEliminator::new(converter))
                }
                Step::SimplifyNonAbelian => {
                    let group = space.history.non_abelian_groups()
                        .map(|(_, g)| g.clone())
                        .next()
                        .ok_or_else(|| unsupported(
                            "NonAbelianSimplifier requires a non-Abelian group"))?;
                    Box::new(NonAbelianSimplifier::new(converter, group)?)
                }
            };
            space = transform.apply(space)?;
            space.check_dimension(converter)?;
            info!("{}: {} blocks", transform.name(), space.blocks.len());
        }
        Ok(space)
    }
}

#[derive(Clone, Debug)]
pub struct Model {
    pub converter: IndexConverter,
    pub hamiltonian: Operator,
    pub reduction: Reduction,
}

impl Model {
    pub fn reduce(&self) -> Result<Space, Error> {
        self.reduction.run(&self.converter, Space::trivial(&self.converter))
    }

    pub fn spectrum<E: Eigensolver + Sync>(&self, solver: &E, space: &Space)
                                           -> Result<Spectrum, Error> {
        let matrices = MatrixBuilder::new(&self.converter)
            .build(space, &self.hamiltonian);
        Spectrum::compute(solver, space, &matrices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RING: &str = "
multiplicities: [2, 2, 2, 2]
exchange:
  - { centers: [0, 1], value: 1.0 }
  - { centers: [1, 2], value: 1.0 }
  - { centers: [2, 3], value: 1.0 }
  - { centers: [3, 0], value: 1.0 }
symmetries:
  - { group: D4, generators: [[1, 2, 3, 0], [0, 3, 2, 1]] }
reduction:
  tz_sorter: true
  positive_projections: true
  non_abelian_simplifier: true
";

    #[test]
    fn test_parse() {
        let conf = ModelConf::parse(RING).unwrap();
        assert_eq!(conf.multiplicities, vec![2, 2, 2, 2]);
        assert_eq!(conf.exchange[3].centers, (3, 0));
        assert_eq!(conf.symmetries[0].group, GroupKind::D4);
        assert!(conf.anisotropy.is_empty());
        let model = conf.make_model().unwrap();
        assert_eq!(model.reduction.steps().len(), 4);
        let space = model.reduce().unwrap();
        space.check_dimension(&model.converter).unwrap();
        assert!(space.history.non_abelian_simplified);
        assert!(ModelConf::parse("multiplicities: [2]\nbogus: 1\n").is_err());
    }

    #[test]
    fn test_not_invariant() {
        let mut conf = ModelConf::parse(RING).unwrap();
        conf.exchange[0].value = 2.0;
        match conf.make_model() {
            Err(Error::InvalidArgument(_)) => (),
            r => panic!("unexpected: {:?}", r.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_plans() {
        let d4 = Arc::new(Group::new(
            GroupKind::D4, vec![vec![1, 2, 3, 0], vec![0, 3, 2, 1]]).unwrap());
        let s3 = Arc::new(Group::new(
            GroupKind::S3, vec![vec![1, 2, 0, 3], vec![0, 2, 1, 3]]).unwrap());
        assert!(Reduction::new(vec![Step::EliminatePositiveProjections]).is_err());
        assert!(Reduction::new(vec![
            Step::TzSort,
            Step::EliminatePositiveProjections,
            Step::EliminatePositiveProjections,
        ]).is_err());
        assert!(Reduction::new(vec![
            Step::Symmetrize(d4.clone()),
            Step::Symmetrize(d4.clone()),
        ]).is_err());
        assert!(Reduction::new(vec![Step::SimplifyNonAbelian]).is_err());
        assert!(Reduction::new(vec![
            Step::Symmetrize(d4.clone()),
            Step::SimplifyNonAbelian,
            Step::SimplifyNonAbelian,
        ]).is_err());
        assert!(Reduction::new(vec![
            Step::Symmetrize(d4.clone()),
            Step::Symmetrize(s3.clone()),
            Step::SimplifyNonAbelian,
        ]).is_err());
        assert!(Reduction::new(vec![
            Step::Symmetrize(d4),
            Step::TzSort,
            Step::EliminatePositiveProjections,
            Step::SimplifyNonAbelian,
        ]).is_ok());
    }
}
