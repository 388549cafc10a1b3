//! # Redshift grid derivation
//!
//! Builds the ordered redshift grid a parameter record carries, either
//! linearly or logarithmically spaced over an inclusive `[zmin, zmax]`
//! interval, and provides the monotonicity check applied to user-supplied
//! grids.
//!
//! ## Conventions
//! -----------------
//! - Endpoints are pinned exactly: the first grid point is `zmin` and the
//!   last is `zmax`, regardless of floating-point rounding in the step.
//! - A degenerate interval (`zmin == zmax`) collapses to a single point.
//! - Logarithmic spacing is uniform in log₁₀ and requires `zmin > 0`.

use crate::sedparam_errors::SedParamError;

/// Derive a redshift grid of `nzz` points over `zminmax = [zmin, zmax]`.
///
/// Arguments
/// -----------------
/// * `zminmax` – Two-element inclusive interval, `zmin <= zmax`.
/// * `nzz` – Number of grid points, must be positive.
/// * `zlog` – Space the points uniformly in log₁₀ instead of linearly.
///
/// Return
/// ----------
/// * The ordered grid, or a [`SedParamError`] if `zminmax` does not have
///   exactly 2 elements, `nzz` is zero, the bounds are out of order, or a
///   logarithmic grid is requested with a non-positive lower bound.
///
/// Edge cases
/// -----------------
/// * `zmin == zmax` → a single-element grid `[zmin]` for any valid `nzz`.
/// * `nzz == 1` with `zmin < zmax` → `[zmin]` (grid anchored at the lower
///   bound).
pub fn redshift_grid(zminmax: &[f64], nzz: usize, zlog: bool) -> Result<Vec<f64>, SedParamError> {
    if zminmax.len() != 2 {
        return Err(SedParamError::InvalidRangeField {
            field: "zminmax",
            len: zminmax.len(),
        });
    }
    if nzz == 0 {
        return Err(SedParamError::InvalidRedshiftCount(nzz));
    }

    let (zmin, zmax) = (zminmax[0], zminmax[1]);
    if zmin > zmax {
        return Err(SedParamError::InvalidRedshiftBounds { zmin, zmax });
    }
    if zmin == zmax || nzz == 1 {
        return Ok(vec![zmin]);
    }

    let mut grid = Vec::with_capacity(nzz);
    if zlog {
        if zmin <= 0.0 {
            return Err(SedParamError::NonPositiveLogBound(zmin));
        }
        let (lmin, lmax) = (zmin.log10(), zmax.log10());
        let step = (lmax - lmin) / (nzz - 1) as f64;
        for i in 0..nzz {
            grid.push(10f64.powf(lmin + step * i as f64));
        }
    } else {
        let step = (zmax - zmin) / (nzz - 1) as f64;
        for i in 0..nzz {
            grid.push(zmin + step * i as f64);
        }
    }

    // Pin the endpoints exactly
    grid[0] = zmin;
    grid[nzz - 1] = zmax;
    Ok(grid)
}

/// True if `values` is strictly increasing.
///
/// Applied to user-supplied redshift grids; empty and single-element
/// sequences are trivially monotonic.
pub fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}

#[cfg(test)]
mod redshift_test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::sedparam_errors::SedParamError;

    #[test]
    fn test_linear_grid_inclusive_endpoints() {
        let grid = redshift_grid(&[0.01, 1.0], 5, false).unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], 0.01);
        assert_eq!(grid[4], 1.0);
        assert_relative_eq!(grid[1], 0.2575, epsilon = 1e-12);
        assert_relative_eq!(grid[2], 0.505, epsilon = 1e-12);
        assert_relative_eq!(grid[3], 0.7525, epsilon = 1e-12);
    }

    #[test]
    fn test_log_grid_decades() {
        let grid = redshift_grid(&[0.1, 10.0], 3, true).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0], 0.1);
        assert_relative_eq!(grid[1], 1.0, epsilon = 1e-12);
        assert_eq!(grid[2], 10.0);
    }

    #[test]
    fn test_degenerate_interval_single_point() {
        let grid = redshift_grid(&[0.5, 0.5], 50, false).unwrap();
        assert_eq!(grid, vec![0.5]);
    }

    #[test]
    fn test_single_point_grid() {
        let grid = redshift_grid(&[0.1, 2.0], 1, false).unwrap();
        assert_eq!(grid, vec![0.1]);
    }

    #[test]
    fn test_bounds_out_of_order() {
        let err = redshift_grid(&[1.0, 0.1], 5, false).unwrap_err();
        assert_eq!(
            err,
            SedParamError::InvalidRedshiftBounds {
                zmin: 1.0,
                zmax: 0.1
            }
        );
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = redshift_grid(&[0.0, 1.0], 0, false).unwrap_err();
        assert_eq!(err, SedParamError::InvalidRedshiftCount(0));
    }

    #[test]
    fn test_wrong_shape_rejected() {
        let err = redshift_grid(&[0.0, 0.5, 1.0], 5, false).unwrap_err();
        assert_eq!(
            err,
            SedParamError::InvalidRangeField {
                field: "zminmax",
                len: 3
            }
        );
    }

    #[test]
    fn test_log_grid_nonpositive_lower_bound() {
        let err = redshift_grid(&[0.0, 1.0], 5, true).unwrap_err();
        assert_eq!(err, SedParamError::NonPositiveLogBound(0.0));
    }

    #[test]
    fn test_strictly_increasing() {
        assert!(is_strictly_increasing(&[0.1, 0.2, 0.3]));
        assert!(is_strictly_increasing(&[]));
        assert!(is_strictly_increasing(&[0.5]));
        assert!(!is_strictly_increasing(&[0.1, 0.1, 0.3]));
        assert!(!is_strictly_increasing(&[0.3, 0.2]));
    }
}
