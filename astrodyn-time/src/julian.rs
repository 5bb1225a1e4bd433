use crate::constants::{GMAT_MJD_OFFSET, SECONDS_TO_DAYS};
use astrodyn_core::constants::{J2000_JD, MJD_ZERO_POINT, SECONDS_PER_DAY};
use std::fmt;

/// Two-part Julian date; `jd1 + jd2` is the date, split to keep precision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    /// From a Modified Julian date on the JD 2430000.0 reference.
    pub fn from_gmat_mjd(mjd: f64) -> Self {
        Self::new(GMAT_MJD_OFFSET, mjd)
    }

    pub fn jd1(&self) -> f64 {
        self.jd1
    }

    pub fn jd2(&self) -> f64 {
        self.jd2
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    /// Modified Julian date on the JD 2430000.0 reference.
    pub fn gmat_mjd(&self) -> f64 {
        (self.jd1 - GMAT_MJD_OFFSET) + self.jd2
    }

    /// Standard Modified Julian date (JD − 2400000.5).
    pub fn mjd(&self) -> f64 {
        (self.jd1 - MJD_ZERO_POINT) + self.jd2
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.jd1, self.jd2 + days)
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds * SECONDS_TO_DAYS)
    }

    /// Signed seconds from `other` to `self`.
    pub fn seconds_since(&self, other: &Self) -> f64 {
        ((self.jd1 - other.jd1) + (self.jd2 - other.jd2)) * SECONDS_PER_DAY
    }

    /// Gregorian calendar date to Julian date (ERFA `cal2jd` + `dtf2d` split).
    pub fn from_calendar(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: f64) -> Self {
        let my = (month as i32 - 14) / 12;
        let iypmy = year + my;

        let mjd = ((1461 * (iypmy + 4800)) / 4 + (367 * (month as i32 - 2 - 12 * my)) / 12
            - (3 * ((iypmy + 4900) / 100)) / 4
            + day as i32
            - 2432076) as f64;

        let jd1 = MJD_ZERO_POINT + mjd;
        let jd2 = (60.0 * (60 * hour as i32 + minute as i32) as f64 + second) / SECONDS_PER_DAY;

        Self::new(jd1, jd2)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self::from_f64(jd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julian_date_creation() {
        let jd = JulianDate::new(J2000_JD, 0.5);
        assert_eq!(jd.jd1(), J2000_JD);
        assert_eq!(jd.jd2(), 0.5);
        assert_eq!(jd.to_f64(), 2451545.5);
    }

    #[test]
    fn test_gmat_mjd_of_j2000() {
        assert_eq!(JulianDate::j2000().gmat_mjd(), 21545.0);
        assert_eq!(JulianDate::from_gmat_mjd(21545.0).to_f64(), J2000_JD);
        assert_eq!(JulianDate::j2000().mjd(), 51544.5);
    }

    #[test]
    fn test_from_calendar_j2000() {
        let jd = JulianDate::from_calendar(2000, 1, 1, 12, 0, 0.0);
        assert_eq!(jd.to_f64(), J2000_JD);
    }

    #[test]
    fn test_seconds_since() {
        let a = JulianDate::from_gmat_mjd(25000.0);
        let b = a.add_seconds(90.0);
        assert!((b.seconds_since(&a) - 90.0).abs() < 1e-6);
        assert!((a.seconds_since(&b) + 90.0).abs() < 1e-6);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_preserves_split() {
        let original = JulianDate::new(2451545.5, 0.123456789);
        let json = serde_json::to_string(&original).unwrap();
        let back: JulianDate = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
