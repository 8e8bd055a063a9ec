//! Dense linear algebra through BLAS and LAPACK.
use cblas;
use lapacke;
use super::error::Error;
use super::matrix::Matrix;
use super::utils::cast;

pub use cblas::Transpose;

/// Eigenvalues in ascending order together with the orthonormal
/// eigenvectors, stored as the columns of `vectors`.
#[derive(Clone, Debug, Default)]
pub struct Eigensystem {
    pub values: Vec<f64>,
    pub vectors: Matrix<f64>,
}

/// Diagonalizes real symmetric matrices.
pub trait Eigensolver {
    fn eigensystem(&self, a: &Matrix<f64>) -> Result<Eigensystem, Error>;

    fn eigenvalues(&self, a: &Matrix<f64>) -> Result<Vec<f64>, Error> {
        Ok(self.eigensystem(a)?.values)
    }
}

/// Eigensolver backed by LAPACK `dsyevr`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lapack {
    pub abstol: f64,
}

impl Eigensolver for Lapack {
    fn eigensystem(&self, a: &Matrix<f64>) -> Result<Eigensystem, Error> {
        let (n, ncols) = a.dims();
        assert_eq!(n, ncols, "matrix must be square");
        if n == 0 {
            return Ok(Default::default());
        }
        let mut a = a.clone();
        let mut values = vec![0.0; n];
        let mut vectors = Matrix::replicate(n, n, 0.0);
        let mut isuppz = vec![0; 2 * n];
        let mut m = 0;
        let info = unsafe {
            lapacke::dsyevr(
                lapacke::Layout::RowMajor,
                b'V',
                b'A',
                b'U',
                cast(n),
                a.as_mut_slice(),
                cast(n),
                0.0,
                0.0,
                0,
                0,
                self.abstol,
                &mut m,
                &mut values,
                vectors.as_mut_slice(),
                cast(n),
                &mut isuppz,
            )
        };
        if info != 0 {
            return Err(Error::Lapack(info));
        }
        debug_assert_eq!(m as usize, n);
        Ok(Eigensystem { values, vectors })
    }
}

/// `c ← α × op(a) × op(b) + β × c`
///
/// Panics if the dimensions don't match.
pub fn gemm(
    transa: Transpose,
    transb: Transpose,
    alpha: f64,
    a: &Matrix<f64>,
    b: &Matrix<f64>,
    beta: f64,
    c: &mut Matrix<f64>,
) {
    let (ma, ka) = swap_if(transa != Transpose::None, a.dims());
    let (kb, nb) = swap_if(transb != Transpose::None, b.dims());
    let (mc, nc) = c.dims();
    assert_eq!(ma, mc);
    assert_eq!(nb, nc);
    assert_eq!(ka, kb);
    if mc == 0 || nc == 0 {
        return;
    }
    let lda = cast(a.num_cols().max(1));
    let ldb = cast(b.num_cols().max(1));
    let ldc = cast(nc);
    unsafe {
        cblas::dgemm(
            cblas::Layout::RowMajor,
            transa,
            transb,
            cast(ma),
            cast(nb),
            cast(ka),
            alpha,
            a.as_slice(),
            lda,
            b.as_slice(),
            ldb,
            beta,
            c.as_mut_slice(),
            ldc,
        );
    }
}

/// Diagonal of `uᵀ × o × u`: the expectation values of `o` in each column
/// of `u`.
pub fn expectation_values(o: &Matrix<f64>, u: &Matrix<f64>) -> Vec<f64> {
    let mut ou = Matrix::replicate(o.num_rows(), u.num_cols(), 0.0);
    gemm(Transpose::None, Transpose::None, 1.0, o, u, 0.0, &mut ou);
    (0 .. u.num_cols()).map(|k| {
        (0 .. u.num_rows()).map(|i| u[(i, k)] * ou[(i, k)]).sum()
    }).collect()
}

fn swap_if<T>(cond: bool, (a, b): (T, T)) -> (T, T) {
    if cond { (b, a) } else { (a, b) }
}
