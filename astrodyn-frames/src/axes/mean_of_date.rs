//! Mean-of-date axes: the mean equator (or ecliptic) and equinox of the
//! epoch being computed.
//!
//! `P` is the IAU 1976 precession matrix from J2000 to the mean equator of
//! date, evaluated at `T`, the TDB Julian centuries since J2000 of the TT
//! epoch. It is stored row-major and used transposed, so the axes rotate
//! vectors from the date frame to MJ2000Eq:
//!
//! ```text
//! MODEq:  R = Pᵀ
//! MODEc:  R = Pᵀ · Rx(ε)ᵀ      ε = 84381.448″ − 46.8150″ T − 0.00059″ T² + 0.001813″ T³
//! Ṙ = 0
//! ```
//!
//! The precession rate is neglected. `P` is reused while the epoch stays
//! within the update interval of the last evaluation; with
//! `override_origin_interval` set (the default) that interval is the origin
//! body's nutation update interval.

use astrodyn_core::obliquity::iau_1980_mean_obliquity;
use astrodyn_core::{Matrix3, PrecessionIAU1976};
use astrodyn_time::{tdb_centuries, ToTT, A1};

use super::{AxisContext, ReferencePlane, Rotation, RotationProvider};
use crate::FrameResult;

/// IAU 1976 precession terms, refreshed at most once per update interval.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct PrecessionCache {
    prec_data: [f64; 9],
    tdb_centuries: f64,
    computed_at: Option<A1>,
}

impl PrecessionCache {
    /// Precession matrix (J2000 to mean of date) and the TDB centuries it was
    /// evaluated at.
    pub(crate) fn update(
        &mut self,
        instance: &str,
        epoch: &A1,
        interval: f64,
        force: bool,
    ) -> FrameResult<(Matrix3, f64)> {
        let reusable = match self.computed_at {
            Some(at) => !force && epoch.seconds_since(&at).abs() < interval,
            None => false,
        };

        if reusable {
            log::debug!("{}: precession cache hit", instance);
        } else {
            let t = tdb_centuries(&epoch.to_tt()?);
            self.prec_data = PrecessionIAU1976::new().matrix(t).to_row_major();
            self.tdb_centuries = t;
            self.computed_at = Some(*epoch);
            log::debug!("{}: precession recomputed at T = {:.12}", instance, t);
        }

        Ok((Matrix3::from_row_major(&self.prec_data), self.tdb_centuries))
    }
}

/// Mean-of-date rotation to MJ2000Eq from a precession matrix.
///
/// Equatorial: `Pᵀ`. Ecliptic: `Pᵀ · Rx(ε)ᵀ` with `ε` the IAU 1980 mean
/// obliquity at `tdb_centuries`.
pub(crate) fn mean_of_date_matrix(plane: ReferencePlane, precession: &Matrix3, tdb_centuries: f64) -> Matrix3 {
    let prec_t = precession.transpose();
    match plane {
        ReferencePlane::Equator => prec_t,
        ReferencePlane::Ecliptic => {
            let obliquity = Matrix3::rot_x(iau_1980_mean_obliquity(tdb_centuries));
            prec_t.multiply(&obliquity.transpose())
        }
    }
}

/// Mean equator (or ecliptic) and equinox of the current epoch.
///
/// The precession rate is neglected, so the rotation derivative is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanOfDateAxes {
    plane: ReferencePlane,
    cache: PrecessionCache,
}

impl MeanOfDateAxes {
    pub fn new(plane: ReferencePlane) -> Self {
        Self {
            plane,
            cache: PrecessionCache::default(),
        }
    }

    pub fn plane(&self) -> ReferencePlane {
        self.plane
    }
}

impl RotationProvider for MeanOfDateAxes {
    fn compute(&mut self, epoch: &A1, ctx: &AxisContext<'_>) -> FrameResult<Rotation> {
        let (precession, t) =
            self.cache
                .update(ctx.base.instance_name(), epoch, ctx.update_interval, ctx.force)?;
        Ok(Rotation::fixed(mean_of_date_matrix(self.plane, &precession, t)))
    }
}
