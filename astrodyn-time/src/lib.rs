//! Time scales for frame and force-model evaluation.
//!
//! Epochs are split Julian dates ([`JulianDate`]) tagged by scale. The working
//! scale of the frame crates is [`A1`]; precession wants TDB centuries derived
//! from [`TT`], and Earth rotation wants [`UT1`].
//!
//! ```text
//! A1 = TAI + 0.0343817 s
//! TT = TAI + 32.184 s
//! TAI = UTC + ΔAT          (post-1972 leap second table)
//! UT1 = UTC + (UT1 − UTC)  (from Earth orientation data)
//! ```
//!
//! Modified Julian dates in this workspace use the reference JD 2430000.0
//! (1941-01-05 12:00), see [`JulianDate::gmat_mjd`].

pub mod constants;
pub mod julian;
pub mod scales;
pub mod sidereal;

pub use julian::JulianDate;
pub use scales::{tdb_centuries, ToA1, ToTAI, ToTT, ToUT1WithDUT1, ToUTC, A1, TAI, TT, UT1, UTC};
pub use sidereal::{earth_rotation_rate, GMST};

use thiserror::Error;

pub type TimeResult<T> = Result<T, TimeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("Calculation error: {0}")]
    CalculationError(String),
    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),
}
