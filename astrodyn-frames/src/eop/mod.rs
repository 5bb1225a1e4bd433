//! Earth orientation parameters.
//!
//! [`EopData`] holds daily polar motion, UT1 − UTC and excess length of day,
//! read from IERS `finals2000A` text or built from records, and interpolates
//! them linearly to an epoch. The Earth body-fixed axes read polar motion and
//! UT1 − UTC from it; the harmonic field requires one at initialization.

mod interpolate;
mod parse;

pub use interpolate::EopData;
pub use parse::{parse_finals, parse_finals_line};

/// One day (or one interpolated instant) of Earth orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EopRecord {
    /// Standard Modified Julian Date (UTC).
    pub mjd: f64,
    /// Polar motion x, arcseconds.
    pub x_p: f64,
    /// Polar motion y, arcseconds.
    pub y_p: f64,
    /// UT1 − UTC, seconds.
    pub ut1_utc: f64,
    /// Excess length of day, seconds.
    pub lod: f64,
}

impl EopRecord {
    pub fn new(mjd: f64, x_p: f64, y_p: f64, ut1_utc: f64, lod: f64) -> Self {
        Self {
            mjd,
            x_p,
            y_p,
            ut1_utc,
            lod,
        }
    }

    /// Zero corrections at `mjd`.
    pub fn zero(mjd: f64) -> Self {
        Self::new(mjd, 0.0, 0.0, 0.0, 0.0)
    }
}
