//! Mean obliquity of the ecliptic (IAU 1980).
//!
//! The obliquity is the angle between the mean equator and the ecliptic. The
//! mean-of-date ecliptic axes and the J2000 ecliptic axes both tilt the mean
//! equator by this angle about the X axis (the mean equinox).
//!
//! ```text
//! ε = 84381.448″ − 46.8150″ T − 0.00059″ T² + 0.001813″ T³
//! ```
//!
//! with `T` in Julian centuries of TDB from J2000.0.
//!
//! ```
//! use astrodyn_core::obliquity::iau_1980_mean_obliquity;
//!
//! let eps = iau_1980_mean_obliquity(0.0);
//! assert!((eps.to_degrees() - 23.4392911).abs() < 1e-6);
//! ```

use crate::constants::{ARCSEC_TO_RAD, J2000_OBLIQUITY_ARCSEC};

/// Mean obliquity in radians for `tdb_centuries` from J2000.0.
pub fn iau_1980_mean_obliquity(tdb_centuries: f64) -> f64 {
    let t = tdb_centuries;
    let obliquity_arcsec =
        J2000_OBLIQUITY_ARCSEC + (-46.8150 + (-0.00059 + 0.001813 * t) * t) * t;

    obliquity_arcsec * ARCSEC_TO_RAD
}

/// Mean obliquity at J2000.0 in radians.
#[inline]
pub fn j2000_mean_obliquity() -> f64 {
    J2000_OBLIQUITY_ARCSEC * ARCSEC_TO_RAD
}
