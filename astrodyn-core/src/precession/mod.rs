//! Precession of the mean equator and equinox.
//!
//! Only the IAU 1976 (Lieske) model is provided. It is the model paired with
//! the IAU 1980 obliquity, and mean-of-date and mean-of-epoch axis systems are
//! built from it.
//!
//! The matrix returned by [`PrecessionIAU1976::matrix`] rotates a vector from
//! the mean equator and equinox of J2000.0 to the mean equator and equinox of
//! date. Axis systems that report "to J2000" rotations use its transpose.

mod iau1976;

pub use iau1976::{PrecessionAngles, PrecessionIAU1976};
