use tracing::trace;

use crate::utils::ChartError;

/// Pivots smaller than this fraction of the largest input entry are treated as zero
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Solve `matrix * x = vector` by Gaussian elimination with partial pivoting
///
/// The inputs are copied; the caller's matrix and vector are left untouched.
/// A pivot that is zero, or negligible next to the largest entry of the input
/// matrix, fails with [`ChartError::SingularSystem`] instead of letting NaN or
/// infinity leak into the solution.
pub fn solve(matrix: &[Vec<f64>], vector: &[f64]) -> Result<Vec<f64>, ChartError> {
    let n = vector.len();
    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return Err(ChartError::DimensionMismatch {
            rows: matrix.len(),
            cols: matrix.first().map_or(0, |row| row.len()),
            len: n,
        });
    }

    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut b: Vec<f64> = vector.to_vec();

    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let threshold = scale * SINGULAR_EPSILON;

    // Forward elimination
    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if a[k][i].abs() > a[max_row][i].abs() {
                max_row = k;
            }
        }

        let pivot = a[max_row][i];
        if !pivot.is_finite() || pivot.abs() <= threshold {
            trace!("Pivot {} in column {} below threshold {}", pivot, i, threshold);
            return Err(ChartError::SingularSystem { column: i, pivot });
        }

        if max_row != i {
            a.swap(i, max_row);
            b.swap(i, max_row);
        }

        for k in (i + 1)..n {
            let factor = a[k][i] / a[i][i];
            if factor == 0.0 {
                continue;
            }
            for j in i..n {
                a[k][j] -= factor * a[i][j];
            }
            b[k] -= factor * b[i];
        }
    }

    // Back substitution, column by column from the bottom
    let mut solution = vec![0.0; n];
    for i in (0..n).rev() {
        solution[i] = b[i] / a[i][i];
        for k in 0..i {
            b[k] -= a[k][i] * solution[i];
        }
    }

    if let Some(column) = solution.iter().position(|v| !v.is_finite()) {
        return Err(ChartError::SingularSystem {
            column,
            pivot: a[column][column],
        });
    }

    Ok(solution)
}
