//! Dense row-major matrices.
use std::fmt;
use std::ops::{Index, IndexMut};

/// Owned, row-major, contiguous matrix.
#[derive(Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: fmt::Debug> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self { data: Vec::default(), nrows: 0, ncols: 0 }
    }
}

impl<T> From<Vec<Vec<T>>> for Matrix<T> {
    /// Panics if the rows have unequal lengths.
    fn from(rows: Vec<Vec<T>>) -> Self {
        let nrows = rows.len();
        let ncols = if nrows == 0 { 0 } else { rows[0].len() };
        let mut data = Vec::with_capacity(nrows * ncols);
        for mut row in rows {
            assert_eq!(row.len(), ncols, "ragged rows");
            data.extend(row.drain(..));
        }
        Self { data, nrows, ncols }
    }
}

impl<T: Clone> Matrix<T> {
    pub fn replicate(nrows: usize, ncols: usize, value: T) -> Self {
        Self { data: vec![value; nrows * ncols], nrows, ncols }
    }
}

impl<T> Matrix<T> {
    pub fn num_rows(&self) -> usize {
        self.nrows
    }

    pub fn num_cols(&self) -> usize {
        self.ncols
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.nrows && j < self.ncols {
            Some(&self.data[i * self.ncols + j])
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols .. (i + 1) * self.ncols]
    }

    pub fn rows<'a>(&'a self) -> impl Iterator<Item = &'a [T]> + 'a {
        (0 .. self.nrows).map(move |i| self.row(i))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Clone> Matrix<T> {
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0 .. self.ncols {
            for i in 0 .. self.nrows {
                data.push(self[(i, j)].clone());
            }
        }
        Self { data, nrows: self.ncols, ncols: self.nrows }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(j < self.ncols, "column index out of range");
        &self.data[i * self.ncols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        assert!(j < self.ncols, "column index out of range");
        &mut self.data[i * self.ncols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix() {
        let mut a = Matrix::from(vec![vec![1, 2, 3],
                                      vec![4, 5, 6]]);
        assert_eq!(a.dims(), (2, 3));
        assert_eq!(a[(1, 0)], 4);
        assert_eq!(a.get(2, 0), None);
        a[(0, 2)] = 9;
        assert_eq!(a.row(0), &[1, 2, 9]);
        assert_eq!(a.transpose(), Matrix::from(vec![vec![1, 4],
                                                    vec![2, 5],
                                                    vec![9, 6]]));
        assert_eq!(Matrix::replicate(2, 2, 0.0).as_slice(), &[0.0; 4]);
    }
}
