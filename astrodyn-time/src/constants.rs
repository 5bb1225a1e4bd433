use astrodyn_core::constants::{MJD_ZERO_POINT, SECONDS_PER_DAY};

/// Julian date of the Modified Julian reference used throughout the workspace.
pub const GMAT_MJD_OFFSET: f64 = 2_430_000.0;

/// Days from the workspace MJD reference to J2000.0 (negated).
pub const JD_MJD_OFFSET_TO_J2000: f64 = GMAT_MJD_OFFSET - astrodyn_core::constants::J2000_JD;

/// Standard MJD (JD − 2400000.5) of the workspace MJD reference.
pub const GMAT_MJD_AS_STANDARD_MJD: f64 = GMAT_MJD_OFFSET - MJD_ZERO_POINT;

pub const TT_TAI_OFFSET_SECONDS: f64 = 32.184;

pub const A1_TAI_OFFSET_SECONDS: f64 = 0.0343817;

pub const SECONDS_TO_DAYS: f64 = 1.0 / SECONDS_PER_DAY;

/// TAI − UTC in seconds, keyed by the standard MJD (UTC) the offset takes effect.
pub const LEAP_SECONDS: &[(f64, f64)] = &[
    (41317.0, 10.0),
    (41499.0, 11.0),
    (41683.0, 12.0),
    (42048.0, 13.0),
    (42413.0, 14.0),
    (42778.0, 15.0),
    (43144.0, 16.0),
    (43509.0, 17.0),
    (43874.0, 18.0),
    (44239.0, 19.0),
    (44786.0, 20.0),
    (45151.0, 21.0),
    (45516.0, 22.0),
    (46247.0, 23.0),
    (47161.0, 24.0),
    (47892.0, 25.0),
    (48257.0, 26.0),
    (48804.0, 27.0),
    (49169.0, 28.0),
    (49534.0, 29.0),
    (50083.0, 30.0),
    (50630.0, 31.0),
    (51179.0, 32.0),
    (53736.0, 33.0),
    (54832.0, 34.0),
    (56109.0, 35.0),
    (57204.0, 36.0),
    (57754.0, 37.0),
];
