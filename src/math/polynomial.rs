use tracing::debug;

use crate::math::linear_solver;
use crate::models::{Point, PolynomialCoefficients};
use crate::utils::ChartError;

/// Degree used for the chart's trend curve
pub const TREND_DEGREE: usize = 2;

/// Least-squares polynomial fit of `price` against `mileage`
///
/// Builds the normal equations `(XᵀX)β = Xᵀy`, i.e.
/// `matrix[i][j] = Σ t^(i+j)` and `vector[i] = Σ t^i·y`, and solves them.
/// `t = (x - center) / half_span` maps the mileages onto `[-1, 1]` so that
/// clustered mileages far from zero stay well conditioned; the solution is
/// re-expanded into coefficients of powers of `x` before returning.
/// Fails with [`ChartError::InsufficientDataForDegree`] when there are fewer
/// than `degree + 1` distinct mileage values.
pub fn fit(points: &[Point], degree: usize) -> Result<PolynomialCoefficients, ChartError> {
    let size = degree + 1;
    let distinct = distinct_mileages(points);
    if distinct < size {
        return Err(ChartError::InsufficientDataForDegree {
            degree,
            required: size,
            distinct,
        });
    }

    let (center, half_span) = normalization(points);

    // power_sums[k] = Σ t^k for k in 0..=2*degree
    let mut power_sums = vec![0.0; 2 * degree + 1];
    let mut vector = vec![0.0; size];

    for point in points {
        let t = (point.mileage - center) / half_span;
        let mut t_pow = 1.0;
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum += t_pow;
            if k < size {
                vector[k] += t_pow * point.price;
            }
            t_pow *= t;
        }
    }

    let matrix: Vec<Vec<f64>> = (0..size)
        .map(|i| (0..size).map(|j| power_sums[i + j]).collect())
        .collect();

    let normalized = linear_solver::solve(&matrix, &vector)?;
    let coefficients = expand(&normalized, center, half_span);
    debug!(
        "Fitted degree {} trend over {} points: {:?}",
        degree,
        points.len(),
        coefficients
    );

    Ok(PolynomialCoefficients(coefficients))
}

/// Evaluate `Σ coefficients[i] * x^i`
pub fn evaluate(coefficients: &PolynomialCoefficients, x: f64) -> f64 {
    coefficients
        .as_slice()
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * x + c)
}

/// Midpoint and half-width of the mileages; a zero width becomes 1
fn normalization(points: &[Point]) -> (f64, f64) {
    let min = points.iter().map(|p| p.mileage).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.mileage).fold(f64::NEG_INFINITY, f64::max);

    let half_span = (max - min) / 2.0;
    if half_span > 0.0 && half_span.is_finite() {
        (min + half_span, half_span)
    } else if min.is_finite() {
        (min, 1.0)
    } else {
        (0.0, 1.0)
    }
}

/// Rewrite `Σ b[k]·((x - center) / half_span)^k` as `Σ c[j]·x^j`
///
/// Horner's scheme over polynomials: multiply the running result by the
/// linear factor `x/half_span - center/half_span`, then add the next `b[k]`.
fn expand(normalized: &[f64], center: f64, half_span: f64) -> Vec<f64> {
    let size = normalized.len();
    let slope = 1.0 / half_span;
    let offset = -center / half_span;

    let mut result = vec![0.0; size];
    for &b in normalized.iter().rev() {
        let mut next = vec![0.0; size];
        for (j, &c) in result.iter().enumerate() {
            next[j] += c * offset;
            if j + 1 < size {
                next[j + 1] += c * slope;
            }
        }
        if let Some(constant) = next.first_mut() {
            *constant += b;
        }
        result = next;
    }
    result
}

fn distinct_mileages(points: &[Point]) -> usize {
    let mut mileages: Vec<f64> = points.iter().map(|p| p.mileage).collect();
    mileages.sort_by(|a, b| a.total_cmp(b));
    mileages.dedup();
    mileages.len()
}
