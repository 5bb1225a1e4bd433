pub const J2000_JD: f64 = 2451545.0;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-6;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const HALF_PI: f64 = 1.5707963267948966192313216;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const TWOPI: f64 = 6.283185307179586476925287;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

/// Mean obliquity of the ecliptic at J2000.0 (IAU 1980), arcseconds.
pub const J2000_OBLIQUITY_ARCSEC: f64 = 84381.448;

/// Earth gravitational parameter, km³/s².
pub const EARTH_MU: f64 = 398_600.4415;

/// Earth equatorial radius, km.
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6378.1363;

pub const EARTH_FLATTENING: f64 = 0.0033527;

/// Nominal Earth rotation rate, rad/s (length of day = 86400 s).
#[allow(clippy::excessive_precision)]
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.292115146706979e-5;
