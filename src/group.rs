//! Finite permutation groups acting on spin centers, together with their
//! irreducible representations and projector coefficients.
//!
//! A group is specified by its kind (which fixes the abstract group and its
//! irreducible representation matrices on the generators) and one
//! permutation per generator.  The full group is obtained by closing the
//! generators under composition.
//!
//! Permutations act on centers: `p` moves center `i` to `p[i]`, so a
//! projection vector `n` becomes `n'` with `n'[p[i]] == n[i]`.  Products
//! compose as functions: `(g h)[i] == g[h[i]]`.
use std::fmt;
use std::collections::VecDeque;
use super::error::{invalid_argument, Error};
use super::matrix::Matrix;
use super::utils;

pub type Permutation = Vec<usize>;

/// Abstract groups with built-in character tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupKind {
    /// Generated by one involution.
    S2,
    /// Klein four-group, generated by two commuting involutions.
    D2,
    /// Generated by `a` of order 3 and `b` of order 2, `b a b = a⁻¹`.
    S3,
    /// Generated by `r` of order 4 and `s` of order 2, `s r s = r⁻¹`.
    D4,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl GroupKind {
    pub fn order(self) -> usize {
        match self {
            GroupKind::S2 => 2,
            GroupKind::D2 => 4,
            GroupKind::S3 => 6,
            GroupKind::D4 => 8,
        }
    }

    pub fn num_generators(self) -> usize {
        match self {
            GroupKind::S2 => 1,
            _ => 2,
        }
    }

    pub fn is_abelian(self) -> bool {
        match self {
            GroupKind::S2 | GroupKind::D2 => true,
            GroupKind::S3 | GroupKind::D4 => false,
        }
    }

    /// Names of the irreducible representations together with their
    /// matrices on each generator.
    fn irreps(self) -> Vec<(&'static str, Vec<Matrix<f64>>)> {
        fn one(x: f64) -> Matrix<f64> {
            Matrix::replicate(1, 1, x)
        }
        fn two(rows: [[f64; 2]; 2]) -> Matrix<f64> {
            Matrix::from(rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>())
        }
        let reflection = two([[1.0, 0.0], [0.0, -1.0]]);
        match self {
            GroupKind::S2 => vec![
                ("A", vec![one(1.0)]),
                ("B", vec![one(-1.0)]),
            ],
            GroupKind::D2 => vec![
                ("A", vec![one(1.0), one(1.0)]),
                ("B1", vec![one(1.0), one(-1.0)]),
                ("B2", vec![one(-1.0), one(1.0)]),
                ("B3", vec![one(-1.0), one(-1.0)]),
            ],
            GroupKind::S3 => {
                let (c, s) = (-0.5, 0.75f64.sqrt());
                vec![
                    ("A1", vec![one(1.0), one(1.0)]),
                    ("A2", vec![one(1.0), one(-1.0)]),
                    ("E", vec![two([[c, -s], [s, c]]), reflection]),
                ]
            }
            GroupKind::D4 => vec![
                ("A1", vec![one(1.0), one(1.0)]),
                ("A2", vec![one(1.0), one(-1.0)]),
                ("B1", vec![one(-1.0), one(1.0)]),
                ("B2", vec![one(-1.0), one(-1.0)]),
                ("E", vec![two([[0.0, -1.0], [1.0, 0.0]]), reflection]),
            ],
        }
    }
}

/// Coefficients of `P[row][column] = (d / |G|) ∑[g] D[row][column](g) g`,
/// one per group element.
#[derive(Clone, Debug)]
pub struct Projector {
    pub row: usize,
    pub column: usize,
    pub coefficients: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct Representation {
    pub name: &'static str,
    pub dimension: usize,
    /// All `dimension²` projectors, row-major.
    pub projectors: Vec<Projector>,
}

impl Representation {
    pub fn projector(&self, row: usize, column: usize) -> &Projector {
        &self.projectors[row * self.dimension + column]
    }
}

#[derive(Clone, Debug)]
pub struct Group {
    kind: GroupKind,
    /// Identity first, then in breadth-first order from the generators.
    elements: Vec<Permutation>,
    sorted_elements: Vec<Permutation>,
    representations: Vec<Representation>,
}

impl Group {
    /// Fails if the generators are not permutations of equal length or if
    /// they do not generate a group of the given kind.
    pub fn new(kind: GroupKind, generators: Vec<Permutation>) -> Result<Self, Error> {
        if generators.len() != kind.num_generators() {
            return Err(invalid_argument(format!(
                "{} requires {} generators, got {}",
                kind, kind.num_generators(), generators.len())));
        }
        let n = generators[0].len();
        for gen in &generators {
            validate_permutation(gen, n)?;
        }

        let irreps = kind.irreps();
        let identity: Permutation = (0 .. n).collect();
        let identity_mats: Vec<_> = irreps.iter()
            .map(|&(_, ref gens)| {
                let d = gens[0].num_rows();
                let mut m = Matrix::replicate(d, d, 0.0);
                for i in 0 .. d {
                    m[(i, i)] = 1.0;
                }
                m
            })
            .collect();

        let mut elements = vec![identity.clone()];
        let mut matrices = vec![identity_mats];
        let mut index = utils::default_hash_map();
        index.insert(identity, 0);
        let mut queue = VecDeque::new();
        queue.push_back(0);
        while let Some(i) = queue.pop_front() {
            for (s, gen) in generators.iter().enumerate() {
                let product = compose(gen, &elements[i]);
                let product_mats: Vec<_> = irreps.iter()
                    .zip(&matrices[i])
                    .map(|(&(_, ref gens), m)| mat_mul(&gens[s], m))
                    .collect();
                if let Some(&k) = index.get(&product) {
                    let consistent = matrices[k].iter()
                        .zip(&product_mats)
                        .all(|(a, b)| mat_approx_eq(a, b));
                    if !consistent {
                        return Err(invalid_argument(format!(
                            "generators do not satisfy the relations of {}",
                            kind)));
                    }
                    continue;
                }
                if elements.len() == kind.order() {
                    return Err(invalid_argument(format!(
                        "generators produce more than {} elements", kind.order())));
                }
                index.insert(product.clone(), elements.len());
                queue.push_back(elements.len());
                elements.push(product);
                matrices.push(product_mats);
            }
        }
        if elements.len() != kind.order() {
            return Err(invalid_argument(format!(
                "generators produce {} elements, but {} has order {}",
                elements.len(), kind, kind.order())));
        }

        let order = elements.len() as f64;
        let representations = irreps.iter().enumerate().map(|(r, &(name, ref gens))| {
            let d = gens[0].num_rows();
            let scale = d as f64 / order;
            let mut projectors = Vec::with_capacity(d * d);
            for row in 0 .. d {
                for column in 0 .. d {
                    projectors.push(Projector {
                        row,
                        column,
                        coefficients: matrices.iter()
                            .map(|mats| scale * mats[r][(row, column)])
                            .collect(),
                    });
                }
            }
            Representation { name, dimension: d, projectors }
        }).collect();

        let mut sorted_elements = elements.clone();
        sorted_elements.sort();
        Ok(Self { kind, elements, sorted_elements, representations })
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn order(&self) -> usize {
        self.elements.len()
    }

    pub fn num_centers(&self) -> usize {
        self.elements[0].len()
    }

    pub fn is_abelian(&self) -> bool {
        self.kind.is_abelian()
    }

    pub fn elements(&self) -> &[Permutation] {
        &self.elements
    }

    pub fn representations(&self) -> &[Representation] {
        &self.representations
    }

    /// Same abstract group acting through the same set of permutations.
    pub fn is_same_group(&self, other: &Group) -> bool {
        self.kind == other.kind && self.sorted_elements == other.sorted_elements
    }

    /// Whether every element of `self` commutes with every element of
    /// `other`.
    pub fn commutes_with(&self, other: &Group) -> bool {
        self.num_centers() == other.num_centers()
            && self.elements.iter().all(|g| other.elements.iter().all(|h| {
                compose(g, h) == compose(h, g)
            }))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (order {}, irreps:", self.kind, self.order())?;
        for r in &self.representations {
            write!(f, " {}", r.name)?;
        }
        write!(f, ")")
    }
}

/// `(g h)[i] == g[h[i]]`
pub fn compose(g: &[usize], h: &[usize]) -> Permutation {
    h.iter().map(|&i| g[i]).collect()
}

/// Move the projection of center `i` to center `p[i]`.
#[inline]
pub fn permute_into<T: Copy>(p: &[usize], input: &[T], output: &mut [T]) {
    for (i, &x) in input.iter().enumerate() {
        output[p[i]] = x;
    }
}

fn validate_permutation(p: &[usize], n: usize) -> Result<(), Error> {
    if p.len() != n {
        return Err(invalid_argument(format!(
            "permutation {:?} has length {}, expected {}", p, p.len(), n)));
    }
    let mut seen = vec![false; n];
    for &i in p {
        if i >= n || seen[i] {
            return Err(invalid_argument(format!(
                "{:?} is not a permutation", p)));
        }
        seen[i] = true;
    }
    Ok(())
}

fn mat_mul(a: &Matrix<f64>, b: &Matrix<f64>) -> Matrix<f64> {
    let (m, k) = a.dims();
    let n = b.num_cols();
    let mut c = Matrix::replicate(m, n, 0.0);
    for i in 0 .. m {
        for j in 0 .. n {
            c[(i, j)] = (0 .. k).map(|l| a[(i, l)] * b[(l, j)]).sum();
        }
    }
    c
}

fn mat_approx_eq(a: &Matrix<f64>, b: &Matrix<f64>) -> bool {
    a.dims() == b.dims()
        && a.as_slice().iter().zip(b.as_slice())
            .all(|(x, y)| (x - y).abs() < 1e-9)
}
