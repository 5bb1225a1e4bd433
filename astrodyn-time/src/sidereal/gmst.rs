use crate::scales::UT1;
use crate::{TimeError, TimeResult};
use astrodyn_core::constants::{
    DAYS_PER_JULIAN_CENTURY, EARTH_ANGULAR_VELOCITY, J2000_JD, SECONDS_PER_DAY,
};
use astrodyn_core::utils::normalize_angle_to_positive;

/// Seconds of time to radians.
#[allow(clippy::excessive_precision)]
const SECONDS_OF_TIME_TO_RAD: f64 = 7.272205216643039903848712e-5;

/// Greenwich mean sidereal time, radians in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GMST(f64);

impl GMST {
    /// IAU 1982 GMST, consistent with IAU 1976 precession.
    ///
    /// ```text
    /// GMST = 24110.54841 + 8640184.812866 Tu + 0.093104 Tu² − 6.2e-6 Tu³  (s)
    ///        + UT1 fraction of day
    /// ```
    pub fn iau1982(ut1: &UT1) -> TimeResult<Self> {
        let jd = ut1.to_julian_date();
        let (d1, d2) = if jd.jd1 < jd.jd2 {
            (jd.jd1, jd.jd2)
        } else {
            (jd.jd2, jd.jd1)
        };

        let t = (d1 + (d2 - J2000_JD)) / DAYS_PER_JULIAN_CENTURY;
        if !t.is_finite() || t.abs() > 1.0e6 {
            return Err(TimeError::CalculationError(format!(
                "UT1 {} is out of range for sidereal time",
                ut1
            )));
        }

        // 24110.54841 shifted by half a day: JD days start at noon.
        const A: f64 = 24110.54841 - SECONDS_PER_DAY / 2.0;
        const B: f64 = 8640184.812866;
        const C: f64 = 0.093104;
        const D: f64 = -6.2e-6;

        let f = SECONDS_PER_DAY * (libm::fmod(d1, 1.0) + libm::fmod(d2, 1.0));
        let gmst = SECONDS_OF_TIME_TO_RAD * ((A + (B + (C + D * t) * t) * t) + f);

        Ok(Self(normalize_angle_to_positive(gmst)))
    }

    pub fn radians(&self) -> f64 {
        self.0
    }

    pub fn hours(&self) -> f64 {
        self.0 * 12.0 / std::f64::consts::PI
    }
}

impl std::fmt::Display for GMST {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GMST {:.6}h", self.hours())
    }
}

/// Earth rotation rate in rad/s for an excess length of day `lod_seconds`.
pub fn earth_rotation_rate(lod_seconds: f64) -> f64 {
    EARTH_ANGULAR_VELOCITY * (1.0 - lod_seconds / SECONDS_PER_DAY)
}
