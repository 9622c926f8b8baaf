//! Dense row-major matrices shared by the cost and transport stages

use std::ops::Deref;

use crate::Error;

/// Dense row-major matrix of reals
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// # Errors
    ///
    /// `ShapeMismatch` if `data` does not hold exactly `rows * cols` values
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, Error> {
        if data.len() != rows * cols {
            return Err(Error::ShapeMismatch(format!(
                "{rows}x{cols} matrix needs {} values, got {}",
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// # Errors
    ///
    /// `ShapeMismatch` if the rows are ragged
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(row_count * cols);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(Error::ShapeMismatch(format!(
                    "row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            data.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// If `row` is out of bounds
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(|row| self.row(row))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.iter_rows().map(|row| row.iter().sum()).collect()
    }

    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for row in self.iter_rows() {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums
    }

    pub(crate) fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&value| f(value)).collect(),
        }
    }
}

/// Shortest path distances, rows are restaurants and columns are users.
/// Unreachable pairs hold `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    matrix: Matrix,
}

impl CostMatrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, Error> {
        Matrix::new(rows, cols, data).map(Self::from)
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        Matrix::from_rows(rows).map(Self::from)
    }

    pub fn has_unreachable(&self) -> bool {
        self.matrix.as_slice().iter().any(|value| value.is_infinite())
    }

    /// Copy of the matrix with every infinite entry replaced by `penalty`
    ///
    /// # Errors
    ///
    /// `InvalidTransportInput` if `penalty` is negative or not finite
    pub fn with_unreachable_penalty(&self, penalty: f64) -> Result<Self, Error> {
        validate_penalty(penalty)?;
        Ok(Self {
            matrix: self
                .matrix
                .map(|value| if value.is_infinite() { penalty } else { value }),
        })
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

pub(crate) fn validate_penalty(penalty: f64) -> Result<(), Error> {
    if !penalty.is_finite() || penalty < 0.0 {
        return Err(Error::InvalidTransportInput(format!(
            "unreachable penalty must be finite and non-negative, got {penalty}"
        )));
    }
    Ok(())
}

impl From<Matrix> for CostMatrix {
    fn from(matrix: Matrix) -> Self {
        Self { matrix }
    }
}

impl Deref for CostMatrix {
    type Target = Matrix;

    fn deref(&self) -> &Self::Target {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_rejected() {
        let result = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(Error::ShapeMismatch(_))));
        assert!(matches!(
            Matrix::new(2, 2, vec![1.0; 3]),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn sums_follow_layout() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m.get(0, 2), Some(3.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.row_sums(), vec![6.0, 15.0]);
        assert_eq!(m.column_sums(), vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn unreachable_entries_get_penalised() {
        let cost = CostMatrix::from_rows(vec![vec![1.0, f64::INFINITY], vec![2.0, 3.0]]).unwrap();
        assert!(cost.has_unreachable());

        let penalised = cost.with_unreachable_penalty(10.0).unwrap();
        assert!(!penalised.has_unreachable());
        assert_eq!(penalised.row(0), &[1.0, 10.0]);
        assert_eq!(penalised.row(1), &[2.0, 3.0]);

        assert!(matches!(
            cost.with_unreachable_penalty(f64::INFINITY),
            Err(Error::InvalidTransportInput(_))
        ));
        assert!(matches!(
            cost.with_unreachable_penalty(-1.0),
            Err(Error::InvalidTransportInput(_))
        ));
    }
}
