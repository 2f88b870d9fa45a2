use crate::error::{Error, Result};

/// Squared Euclidean distance, accumulated in `f64` so large `f32` coordinates cannot overflow.
#[inline]
pub(crate) fn squared_euclidean(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum()
}

/// Check that `data` is non-empty, finite, and every point shares the first point's dimension.
///
/// Returns the common dimension.
pub(crate) fn validate_points(data: &[Vec<f32>]) -> Result<usize> {
    let first = data.first().ok_or(Error::EmptyInput)?;
    let d = first.len();
    if d == 0 {
        return Err(Error::InvalidParameter {
            name: "dimension",
            message: "must be at least 1",
        });
    }
    for point in data {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
        if !point.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "data",
                message: "must be finite",
            });
        }
    }
    Ok(d)
}
