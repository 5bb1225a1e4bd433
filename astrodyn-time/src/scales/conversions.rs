//! Conversions between A1, TAI, TT, UTC and UT1.
//!
//! Fixed offsets:
//!
//! ```text
//! A1 − TAI = 0.0343817 s
//! TT − TAI = 32.184 s
//! ```
//!
//! TAI − UTC comes from [`LEAP_SECONDS`]. UTC epochs before 1972-01-01 are
//! rejected; the drift-rate era is not modeled. UT1 needs the externally
//! supplied UT1 − UTC, so it is reachable only through [`ToUT1WithDUT1`].
//!
//! ```
//! use astrodyn_time::{JulianDate, ToTAI, UTC};
//!
//! let utc = UTC::from_julian_date(JulianDate::j2000());
//! let tai = utc.to_tai().unwrap();
//! let offset = tai.to_julian_date().seconds_since(&utc.to_julian_date());
//! assert!((offset - 32.0).abs() < 1e-6);
//! ```

use super::{A1, TAI, TT, UT1, UTC};
use crate::constants::{A1_TAI_OFFSET_SECONDS, LEAP_SECONDS, TT_TAI_OFFSET_SECONDS};
use crate::{TimeError, TimeResult};

/// TAI − UTC in seconds at the standard MJD `utc_mjd`.
pub fn tai_minus_utc(utc_mjd: f64) -> TimeResult<f64> {
    let first = LEAP_SECONDS[0].0;
    if utc_mjd < first || !utc_mjd.is_finite() {
        return Err(TimeError::InvalidEpoch(format!(
            "UTC MJD {} precedes the leap second table (MJD {})",
            utc_mjd, first
        )));
    }

    let idx = LEAP_SECONDS.partition_point(|(mjd, _)| *mjd <= utc_mjd);
    Ok(LEAP_SECONDS[idx - 1].1)
}

pub trait ToTAI {
    fn to_tai(&self) -> TimeResult<TAI>;
}

pub trait ToTT {
    fn to_tt(&self) -> TimeResult<TT>;
}

pub trait ToA1 {
    fn to_a1(&self) -> TimeResult<A1>;
}

pub trait ToUTC {
    fn to_utc(&self) -> TimeResult<UTC>;
}

pub trait ToUT1WithDUT1 {
    /// `dut1_seconds` is UT1 − UTC at this epoch.
    fn to_ut1_with_dut1(&self, dut1_seconds: f64) -> TimeResult<UT1>;
}

impl ToTAI for TAI {
    fn to_tai(&self) -> TimeResult<TAI> {
        Ok(*self)
    }
}

impl ToTAI for A1 {
    fn to_tai(&self) -> TimeResult<TAI> {
        Ok(TAI::from_julian_date(
            self.to_julian_date().add_seconds(-A1_TAI_OFFSET_SECONDS),
        ))
    }
}

impl ToTAI for TT {
    fn to_tai(&self) -> TimeResult<TAI> {
        Ok(TAI::from_julian_date(
            self.to_julian_date().add_seconds(-TT_TAI_OFFSET_SECONDS),
        ))
    }
}

impl ToTAI for UTC {
    fn to_tai(&self) -> TimeResult<TAI> {
        let jd = self.to_julian_date();
        let offset = tai_minus_utc(jd.mjd())?;
        Ok(TAI::from_julian_date(jd.add_seconds(offset)))
    }
}

impl ToTT for TT {
    fn to_tt(&self) -> TimeResult<TT> {
        Ok(*self)
    }
}

impl ToTT for TAI {
    fn to_tt(&self) -> TimeResult<TT> {
        Ok(TT::from_julian_date(
            self.to_julian_date().add_seconds(TT_TAI_OFFSET_SECONDS),
        ))
    }
}

impl ToTT for A1 {
    fn to_tt(&self) -> TimeResult<TT> {
        self.to_tai()?.to_tt()
    }
}

impl ToTT for UTC {
    fn to_tt(&self) -> TimeResult<TT> {
        self.to_tai()?.to_tt()
    }
}

impl ToA1 for A1 {
    fn to_a1(&self) -> TimeResult<A1> {
        Ok(*self)
    }
}

impl ToA1 for TAI {
    fn to_a1(&self) -> TimeResult<A1> {
        Ok(A1::from_julian_date(
            self.to_julian_date().add_seconds(A1_TAI_OFFSET_SECONDS),
        ))
    }
}

impl ToA1 for TT {
    fn to_a1(&self) -> TimeResult<A1> {
        self.to_tai()?.to_a1()
    }
}

impl ToA1 for UTC {
    fn to_a1(&self) -> TimeResult<A1> {
        self.to_tai()?.to_a1()
    }
}

impl ToUTC for UTC {
    fn to_utc(&self) -> TimeResult<UTC> {
        Ok(*self)
    }
}

impl ToUTC for TAI {
    fn to_utc(&self) -> TimeResult<UTC> {
        let tai = self.to_julian_date();
        // Refine the UTC guess until the table lookup is stable.
        let mut utc = tai;
        for _ in 0..3 {
            let offset = tai_minus_utc(utc.mjd())?;
            utc = tai.add_seconds(-offset);
        }
        Ok(UTC::from_julian_date(utc))
    }
}

impl ToUTC for A1 {
    fn to_utc(&self) -> TimeResult<UTC> {
        self.to_tai()?.to_utc()
    }
}

impl ToUTC for TT {
    fn to_utc(&self) -> TimeResult<UTC> {
        self.to_tai()?.to_utc()
    }
}

impl ToUT1WithDUT1 for UTC {
    fn to_ut1_with_dut1(&self, dut1_seconds: f64) -> TimeResult<UT1> {
        Ok(UT1::from_julian_date(
            self.to_julian_date().add_seconds(dut1_seconds),
        ))
    }
}

impl ToUT1WithDUT1 for TAI {
    fn to_ut1_with_dut1(&self, dut1_seconds: f64) -> TimeResult<UT1> {
        self.to_utc()?.to_ut1_with_dut1(dut1_seconds)
    }
}

impl ToUT1WithDUT1 for A1 {
    fn to_ut1_with_dut1(&self, dut1_seconds: f64) -> TimeResult<UT1> {
        self.to_utc()?.to_ut1_with_dut1(dut1_seconds)
    }
}

impl ToUT1WithDUT1 for TT {
    fn to_ut1_with_dut1(&self, dut1_seconds: f64) -> TimeResult<UT1> {
        self.to_utc()?.to_ut1_with_dut1(dut1_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::JulianDate;

    #[test]
    fn test_leap_second_lookup() {
        assert_eq!(tai_minus_utc(41317.0).unwrap(), 10.0);
        assert_eq!(tai_minus_utc(51544.5).unwrap(), 32.0);
        assert_eq!(tai_minus_utc(57753.999).unwrap(), 36.0);
        assert_eq!(tai_minus_utc(57754.0).unwrap(), 37.0);
        assert_eq!(tai_minus_utc(60000.0).unwrap(), 37.0);
    }

    #[test]
    fn test_pre_1972_rejected() {
        assert!(matches!(
            tai_minus_utc(41000.0),
            Err(TimeError::InvalidEpoch(_))
        ));
    }

    #[test]
    fn test_a1_tt_offsets() {
        let tai = TAI::from_julian_date(JulianDate::j2000());
        let a1 = tai.to_a1().unwrap();
        let tt = tai.to_tt().unwrap();
        assert!((a1.to_julian_date().seconds_since(&tai.to_julian_date()) - 0.0343817).abs() < 1e-6);
        assert!((tt.to_julian_date().seconds_since(&tai.to_julian_date()) - 32.184).abs() < 1e-6);

        let back = a1.to_tt().unwrap();
        assert!(back.seconds_since(&tt).abs() < 1e-6);
    }

    #[test]
    fn test_utc_tai_round_trip() {
        let utc = UTC::from_julian_date(JulianDate::from_calendar(2017, 6, 1, 3, 0, 0.0));
        let back = utc.to_tai().unwrap().to_utc().unwrap();
        assert!(back.seconds_since(&utc).abs() < 1e-6);
    }

    #[test]
    fn test_ut1_from_a1() {
        let a1 = A1::from_julian_date(JulianDate::j2000());
        let utc = a1.to_utc().unwrap();
        let ut1 = a1.to_ut1_with_dut1(0.355).unwrap();
        assert!(
            (ut1.to_julian_date().seconds_since(&utc.to_julian_date()) - 0.355).abs() < 1e-6
        );
    }
}
