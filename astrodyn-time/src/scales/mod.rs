//! Scale-tagged epochs.
//!
//! Each scale wraps a [`JulianDate`] so an A1 epoch cannot be handed to code
//! expecting TT. Conversions live in [`conversions`] as `ToXxx` traits.

pub mod conversions;

pub use conversions::{tai_minus_utc, ToA1, ToTAI, ToTT, ToUT1WithDUT1, ToUTC};

use crate::constants::JD_MJD_OFFSET_TO_J2000;
use crate::julian::JulianDate;
use astrodyn_core::constants::DAYS_PER_JULIAN_CENTURY;
use std::fmt;

macro_rules! time_scale {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(JulianDate);

        impl $name {
            pub fn from_julian_date(jd: JulianDate) -> Self {
                Self(jd)
            }

            /// From a Modified Julian date on the JD 2430000.0 reference.
            pub fn from_gmat_mjd(mjd: f64) -> Self {
                Self(JulianDate::from_gmat_mjd(mjd))
            }

            pub fn j2000() -> Self {
                Self(JulianDate::j2000())
            }

            pub fn to_julian_date(&self) -> JulianDate {
                self.0
            }

            pub fn gmat_mjd(&self) -> f64 {
                self.0.gmat_mjd()
            }

            pub fn add_seconds(&self, seconds: f64) -> Self {
                Self(self.0.add_seconds(seconds))
            }

            pub fn add_days(&self, days: f64) -> Self {
                Self(self.0.add_days(days))
            }

            /// Signed seconds from `earlier` to `self`.
            pub fn seconds_since(&self, earlier: &Self) -> f64 {
                self.0.seconds_since(&earlier.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", $label, self.0)
            }
        }

        impl From<JulianDate> for $name {
            fn from(jd: JulianDate) -> Self {
                Self::from_julian_date(jd)
            }
        }
    };
}

time_scale!(
    /// A.1 atomic time, the working scale of axis and force computations.
    A1,
    "A1"
);
time_scale!(
    /// International Atomic Time.
    TAI,
    "TAI"
);
time_scale!(
    /// Terrestrial Time.
    TT,
    "TT"
);
time_scale!(
    /// Coordinated Universal Time (post-1972 leap-second era only).
    UTC,
    "UTC"
);
time_scale!(
    /// Universal Time UT1, the Earth rotation angle argument.
    UT1,
    "UT1"
);

/// Julian centuries of TDB since J2000.0, approximating TDB by TT.
///
/// Uses the TT Modified Julian date plus the fixed day offset between the
/// MJD reference and J2000.0.
pub fn tdb_centuries(tt: &TT) -> f64 {
    (tt.gmat_mjd() + JD_MJD_OFFSET_TO_J2000) / DAYS_PER_JULIAN_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tdb_centuries_zero_at_j2000() {
        assert_eq!(tdb_centuries(&TT::j2000()), 0.0);
        assert_eq!(tdb_centuries(&TT::from_gmat_mjd(21545.0)), 0.0);
    }

    #[test]
    fn test_tdb_centuries_one_century() {
        let tt = TT::from_gmat_mjd(21545.0 + 36525.0);
        assert!((tdb_centuries(&tt) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_display_carries_scale() {
        assert!(A1::j2000().to_string().starts_with("A1 JD"));
        assert!(UT1::j2000().to_string().starts_with("UT1 JD"));
    }
}
