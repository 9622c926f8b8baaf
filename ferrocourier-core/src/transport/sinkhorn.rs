use std::ops::Deref;

use log::{debug, trace, warn};

use super::config::SinkhornConfig;
use crate::{Axis, CostMatrix, Error, Matrix};

/// Joint distribution over (restaurant, user) pairs.
///
/// Rows approximate the restaurant marginal, columns the user marginal.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportPlan {
    plan: Matrix,
    iterations: usize,
    converged: bool,
}

impl TransportPlan {
    /// Wraps a plan computed elsewhere, e.g. received from a caller.
    /// It reports zero iterations and no convergence.
    pub fn from_matrix(plan: Matrix) -> Self {
        Self {
            plan,
            iterations: 0,
            converged: false,
        }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.plan
    }

    /// Scaling iterations actually performed
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the early-stop tolerance was reached.
    /// Always false when no tolerance was configured.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Transport objective `sum(P * C)`
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `cost` has a different shape than the plan
    pub fn total_cost(&self, cost: &CostMatrix) -> Result<f64, Error> {
        if cost.shape() != self.plan.shape() {
            return Err(Error::ShapeMismatch(format!(
                "plan is {:?}, cost matrix is {:?}",
                self.plan.shape(),
                cost.shape()
            )));
        }
        Ok(self
            .plan
            .as_slice()
            .iter()
            .zip(cost.as_slice())
            .map(|(p, c)| p * c)
            .sum())
    }
}

impl Deref for TransportPlan {
    type Target = Matrix;

    fn deref(&self) -> &Self::Target {
        &self.plan
    }
}

/// Sinkhorn scaling of the Gibbs kernel `exp(-C / epsilon)`.
///
/// `row_marginal` and `column_marginal` default to uniform distributions.
/// Without a tolerance the solver runs exactly `max_iterations` rounds.
///
/// # Errors
///
/// - `InvalidTransportInput` for an empty matrix, negative or non-finite
///   costs, bad marginals or bad solver parameters
/// - `NumericalDegeneracy` if a scaling step divides by zero, which happens
///   when epsilon is too small for the cost magnitudes
pub fn solve_transport(
    cost: &CostMatrix,
    row_marginal: Option<&[f64]>,
    column_marginal: Option<&[f64]>,
    config: &SinkhornConfig,
) -> Result<TransportPlan, Error> {
    config.validate()?;
    validate_costs(cost)?;

    let (rows, cols) = cost.shape();
    let a = marginal(row_marginal, rows, Axis::Row)?;
    let b = marginal(column_marginal, cols, Axis::Column)?;

    let mass_gap = (a.iter().sum::<f64>() - b.iter().sum::<f64>()).abs();
    if mass_gap > 1e-9 {
        warn!("Row and column marginals differ in total mass by {mass_gap:e}");
    }

    let epsilon = config.epsilon;
    let kernel = cost.map(|c| (-c / epsilon).exp());

    let mut u = vec![1.0; rows];
    let mut v = vec![1.0; cols];
    let mut iterations = 0;
    let mut converged = false;

    for iteration in 0..config.max_iterations {
        let kv = kernel_dot(&kernel, &v);
        rescale(&mut u, &a, &kv, iteration, Axis::Row)?;

        let ktu = kernel_transpose_dot(&kernel, &u);
        rescale(&mut v, &b, &ktu, iteration, Axis::Column)?;

        iterations = iteration + 1;

        if let Some(tolerance) = config.tolerance {
            let deviation = row_deviation(&kernel, &u, &v, &a);
            trace!("Sinkhorn iteration {iterations}: row deviation {deviation:e}");
            if deviation < tolerance {
                converged = true;
                break;
            }
        }
    }

    let mut data = Vec::with_capacity(rows * cols);
    for (i, row) in kernel.iter_rows().enumerate() {
        data.extend(row.iter().zip(&v).map(|(k, vj)| u[i] * k * vj));
    }
    let plan = Matrix::new(rows, cols, data)?;

    debug!(
        "Sinkhorn finished after {iterations} iterations on a {rows}x{cols} problem (epsilon {epsilon})"
    );

    Ok(TransportPlan {
        plan,
        iterations,
        converged,
    })
}

fn validate_costs(cost: &CostMatrix) -> Result<(), Error> {
    if cost.is_empty() {
        return Err(Error::InvalidTransportInput(
            "cost matrix is empty".to_string(),
        ));
    }
    for (i, row) in cost.iter_rows().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidTransportInput(format!(
                    "cost ({i}, {j}) must be finite and non-negative, got {value}"
                )));
            }
        }
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn marginal(given: Option<&[f64]>, len: usize, axis: Axis) -> Result<Vec<f64>, Error> {
    let Some(values) = given else {
        return Ok(vec![1.0 / len as f64; len]);
    };

    if values.len() != len {
        return Err(Error::InvalidTransportInput(format!(
            "{axis} marginal has {} entries, expected {len}",
            values.len()
        )));
    }
    if let Some(bad) = values.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::InvalidTransportInput(format!(
            "{axis} marginal entries must be finite and non-negative, got {bad}"
        )));
    }
    if values.iter().sum::<f64>() <= 0.0 {
        return Err(Error::InvalidTransportInput(format!(
            "{axis} marginal has no mass"
        )));
    }
    Ok(values.to_vec())
}

/// `K * v`
fn kernel_dot(kernel: &Matrix, v: &[f64]) -> Vec<f64> {
    kernel
        .iter_rows()
        .map(|row| row.iter().zip(v).map(|(k, vj)| k * vj).sum())
        .collect()
}

/// `K^T * u`
fn kernel_transpose_dot(kernel: &Matrix, u: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; kernel.cols()];
    for (row, ui) in kernel.iter_rows().zip(u) {
        for (acc, k) in out.iter_mut().zip(row) {
            *acc += k * ui;
        }
    }
    out
}

/// `scaling = target / product`, refusing zero or overflowing divisions
fn rescale(
    scaling: &mut [f64],
    target: &[f64],
    product: &[f64],
    iteration: usize,
    axis: Axis,
) -> Result<(), Error> {
    for (index, ((s, t), p)) in scaling.iter_mut().zip(target).zip(product).enumerate() {
        let value = t / p;
        if *p == 0.0 || !value.is_finite() {
            return Err(Error::NumericalDegeneracy {
                iteration,
                axis,
                index,
            });
        }
        *s = value;
    }
    Ok(())
}

/// `max_i |u_i (K v)_i - a_i|`
fn row_deviation(kernel: &Matrix, u: &[f64], v: &[f64], a: &[f64]) -> f64 {
    kernel_dot(kernel, v)
        .iter()
        .zip(u)
        .zip(a)
        .map(|((kv, ui), ai)| (ui * kv - ai).abs())
        .fold(0.0, f64::max)
}
