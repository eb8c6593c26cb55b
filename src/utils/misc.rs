use crate::errors::{AcqError, Result};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, ErrorKind, Ix1, Ix2, ShapeError};

/// Check `xlimits` specifies a search space as `[[lower, upper], ...]`,
/// one row per input component. Bound values are not inspected.
pub fn check_xlimits(xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<()> {
    if xlimits.nrows() == 0 || xlimits.ncols() != 2 {
        return Err(AcqError::InvalidConfigError(format!(
            "xlimits should be a (nx, 2) matrix with nx > 0, got shape {:?}",
            xlimits.shape()
        )));
    }
    Ok(())
}

/// Check predictions (or their gradients) hold one value (or one row) per point
pub fn check_nb_points(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
    }
    Ok(())
}

/// Lower confidence bound combination `-mean + weight * std` of predictions
pub fn lcb_combine(
    mean: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    std: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    weight: f64,
) -> Result<Array1<f64>> {
    check_nb_points(mean.len(), std.len())?;
    Ok(std.mapv(|s| weight * s) - mean)
}

/// Lower confidence bound combination of prediction derivatives, row `i` being
/// the gradient at the ith point
pub fn lcb_combine_gradients(
    dmean_dx: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    dstd_dx: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    weight: f64,
) -> Result<Array2<f64>> {
    if dmean_dx.dim() != dstd_dx.dim() {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
    }
    Ok(dstd_dx.mapv(|ds| weight * ds) - dmean_dx)
}

/// Recovers standard deviations and their derivatives from variances and their derivatives
/// using `std = sqrt(var)` and `dstd_dx = dvar_dx / (2 * std)`.
///
/// Derivatives are singular where the variance vanishes: a zero std gives
/// non finite components (inf or NaN) which are returned as is.
pub fn std_from_var_gradients(
    var: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    dvar_dx: &ArrayBase<impl Data<Elem = f64>, Ix2>,
) -> Result<(Array1<f64>, Array2<f64>)> {
    check_nb_points(var.len(), dvar_dx.nrows())?;
    let std = var.mapv(f64::sqrt);
    let twice_std = std.mapv(|s| 2. * s).insert_axis(Axis(1));
    let dstd_dx = dvar_dx / &twice_std;
    Ok((std, dstd_dx))
}
