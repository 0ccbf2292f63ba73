//! Exact Lagrange interpolation over the rationals.

use std::collections::BTreeSet;

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::{
    error::InterpolationError, fraction::Fraction, traits::PointSource,
};

type Coordinates = Vec<(BigInt, BigInt)>;

fn collect_coordinates<P: PointSource>(
    points: &[P],
) -> Result<Coordinates, InterpolationError> {
    if points.is_empty() {
        return Err(InterpolationError::NoPoints);
    }

    let coordinates: Coordinates =
        points.iter().map(|point| (point.x(), point.y())).collect();

    let mut seen = BTreeSet::new();
    for (x, _) in &coordinates {
        if !seen.insert(x) {
            return Err(InterpolationError::DuplicateAbscissa(x.clone()));
        }
    }

    Ok(coordinates)
}

/// Evaluate the unique polynomial of degree `< points.len()` through
/// `points` at `x`, exactly.
///
/// Each Lagrange term `y_i · Π_{j≠i} (x − x_j) / (x_i − x_j)` is built as a
/// single reduced fraction and the terms are summed without rounding.
pub fn interpolate_at<P: PointSource>(
    points: &[P],
    x: &BigInt,
) -> Result<Fraction, InterpolationError> {
    let coordinates = collect_coordinates(points)?;
    let mut sum = Fraction::zero();

    for (i, (xi, yi)) in coordinates.iter().enumerate() {
        if yi.is_zero() {
            continue;
        }

        let mut numerator = yi.clone();
        let mut denominator = BigInt::one();
        for (j, (xj, _)) in coordinates.iter().enumerate() {
            if i != j {
                numerator *= x - xj;
                denominator *= xi - xj;
            }
        }

        // Distinct abscissae keep the denominator non-zero.
        let term = Fraction::new(numerator, denominator).ok_or_else(|| {
            InterpolationError::DuplicateAbscissa(xi.clone())
        })?;
        sum += term;
    }

    Ok(sum)
}

/// Recover the constant term from exactly `threshold` points.
///
/// Fails with [`InterpolationError::NonIntegerResult`] instead of rounding
/// when the points do not describe an integer polynomial value at zero.
///
/// ```
/// use math::lagrange::interpolate_at_zero;
/// use num_bigint::BigInt;
///
/// let points = [(1i64, 4i64), (2, 7), (3, 12)];
/// assert_eq!(interpolate_at_zero(&points, 3).unwrap(), BigInt::from(3));
/// ```
pub fn interpolate_at_zero<P: PointSource>(
    points: &[P],
    threshold: usize,
) -> Result<BigInt, InterpolationError> {
    if points.is_empty() {
        return Err(InterpolationError::NoPoints);
    }
    if points.len() != threshold {
        return Err(InterpolationError::PointCountMismatch {
            expected: threshold,
            found: points.len(),
        });
    }

    interpolate_at(points, &BigInt::zero())?
        .into_integer()
        .map_err(InterpolationError::NonIntegerResult)
}
