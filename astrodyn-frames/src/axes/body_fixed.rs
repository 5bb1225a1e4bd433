//! Axes rotating with a celestial body.
//!
//! Earth uses precession, Greenwich mean sidereal time and polar motion:
//!
//! ```text
//! R = Pᵀ · Rz(θ)ᵀ · Wᵀ          W = Rx(−y_p) · Ry(−x_p)
//! Ṙ = Pᵀ · (dRz(θ)/dt)ᵀ · Wᵀ    dθ/dt = ω(LOD)
//! ```
//!
//! with θ the IAU 1982 GMST of UT1. Nutation is not modeled. Without EOP data
//! polar motion, UT1 − UTC and LOD are taken as zero.
//!
//! Other bodies use their IAU pole and prime meridian:
//!
//! ```text
//! R = (Rz(W) · Rx(90° − δ₀) · Rz(90° + α₀))ᵀ
//! ```

use astrodyn_core::constants::{ARCSEC_TO_RAD, DAYS_PER_JULIAN_CENTURY, HALF_PI, SECONDS_PER_DAY};
use astrodyn_core::utils::normalize_angle_to_positive;
use astrodyn_core::Matrix3;
use astrodyn_time::{
    earth_rotation_rate, tdb_centuries, ToTT, ToUT1WithDUT1, ToUTC, A1, GMST,
};

use super::mean_of_date::PrecessionCache;
use super::{AxisContext, Rotation, RotationProvider};
use crate::coordinate_base::CoordinateBase;
use crate::eop::EopRecord;
use crate::solar_system::{IauRotationElements, RotationModel, SolarSystem};
use crate::{FrameError, FrameResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyFixedAxes {
    cache: PrecessionCache,
}

impl BodyFixedAxes {
    pub fn new() -> Self {
        Self::default()
    }

    fn earth_rotation(&mut self, epoch: &A1, ctx: &AxisContext<'_>) -> FrameResult<Rotation> {
        let utc = epoch.to_utc()?;
        let mjd = utc.to_julian_date().mjd();
        let eop = match ctx.env.eop {
            Some(data) => data.get(mjd)?,
            None => EopRecord::zero(mjd),
        };

        let ut1 = utc.to_ut1_with_dut1(eop.ut1_utc)?;
        let theta = GMST::iau1982(&ut1)?.radians();
        let omega = earth_rotation_rate(eop.lod);

        let (precession, _) =
            self.cache
                .update(ctx.base.instance_name(), epoch, ctx.update_interval, ctx.force)?;

        let mut polar = Matrix3::identity();
        polar.rotate_y(-eop.x_p * ARCSEC_TO_RAD);
        polar.rotate_x(-eop.y_p * ARCSEC_TO_RAD);

        let prec_t = precession.transpose();
        let polar_t = polar.transpose();

        Ok(Rotation::new(
            prec_t * Matrix3::rot_z(theta).transpose() * polar_t,
            prec_t * Matrix3::rot_z_derivative(theta, omega).transpose() * polar_t,
        ))
    }
}

fn iau_rotation(elements: &IauRotationElements, epoch: &A1) -> FrameResult<Rotation> {
    let t = tdb_centuries(&epoch.to_tt()?);
    let d = t * DAYS_PER_JULIAN_CENTURY;

    let alpha0 = (elements.alpha0 + elements.alpha_rate * t).to_radians();
    let delta0 = (elements.delta0 + elements.delta_rate * t).to_radians();
    let w = normalize_angle_to_positive((elements.w0 + elements.w_rate * d).to_radians());
    let w_dot = elements.w_rate.to_radians() / SECONDS_PER_DAY;

    let mut pole = Matrix3::identity();
    pole.rotate_z(HALF_PI + alpha0);
    pole.rotate_x(HALF_PI - delta0);

    Ok(Rotation::new(
        (Matrix3::rot_z(w) * pole).transpose(),
        (Matrix3::rot_z_derivative(w, w_dot) * pole).transpose(),
    ))
}

impl RotationProvider for BodyFixedAxes {
    fn initialize(
        &mut self,
        base: &CoordinateBase,
        solar_system: &SolarSystem,
    ) -> FrameResult<Option<Rotation>> {
        let origin = base.require_origin()?;
        if solar_system.body(origin).is_none() {
            return Err(FrameError::configuration(
                base.instance_name(),
                format!(
                    "origin \"{}\" of body-fixed axes must be a celestial body",
                    base.origin_name()
                ),
            ));
        }
        self.cache = PrecessionCache::default();
        Ok(None)
    }

    fn compute(&mut self, epoch: &A1, ctx: &AxisContext<'_>) -> FrameResult<Rotation> {
        let origin = ctx.base.require_origin()?;
        let body = ctx.env.solar_system.body(origin).ok_or_else(|| {
            FrameError::configuration(
                ctx.base.instance_name(),
                format!("central body \"{}\" is not available", ctx.base.origin_name()),
            )
        })?;

        match &body.rotation {
            RotationModel::EarthOrientation => self.earth_rotation(epoch, ctx),
            RotationModel::IauElements(elements) => iau_rotation(elements, epoch),
        }
    }
}
