//! IAU 1976 precession angles (Lieske et al. 1977).
//!
//! The three equatorial angles, in arcseconds for `T` Julian centuries of TDB
//! from J2000.0:
//!
//! ```text
//! ζ = 2306.2181 T + 0.30188 T² + 0.017998 T³
//! θ = 2004.3109 T − 0.42665 T² − 0.041833 T³
//! z = 2306.2181 T + 1.09468 T² + 0.018203 T³
//! ```
//!
//! and the J2000 → mean-of-date matrix is `R3(−z) · R2(θ) · R3(−ζ)`.

use crate::constants::ARCSEC_TO_RAD;
use crate::matrix::Matrix3;

/// Equatorial precession angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionAngles {
    pub zeta: f64,
    pub theta: f64,
    pub z: f64,
}

/// IAU 1976 precession calculator.
///
/// ```
/// use astrodyn_core::PrecessionIAU1976;
///
/// let p = PrecessionIAU1976::new().matrix(0.1);
/// assert!(p.is_rotation_matrix(1e-14));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecessionIAU1976;

impl PrecessionIAU1976 {
    pub fn new() -> Self {
        Self
    }

    pub fn angles(&self, tdb_centuries: f64) -> PrecessionAngles {
        let t = tdb_centuries;
        let t2 = t * t;
        let t3 = t2 * t;

        PrecessionAngles {
            zeta: (2306.2181 * t + 0.30188 * t2 + 0.017998 * t3) * ARCSEC_TO_RAD,
            theta: (2004.3109 * t - 0.42665 * t2 - 0.041833 * t3) * ARCSEC_TO_RAD,
            z: (2306.2181 * t + 1.09468 * t2 + 0.018203 * t3) * ARCSEC_TO_RAD,
        }
    }

    /// Rotation from mean J2000.0 axes to mean-of-date axes.
    pub fn matrix(&self, tdb_centuries: f64) -> Matrix3 {
        let angles = self.angles(tdb_centuries);

        let mut m = Matrix3::identity();
        m.rotate_z(-angles.zeta);
        m.rotate_y(angles.theta);
        m.rotate_z(-angles.z);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_at_j2000() {
        let m = PrecessionIAU1976::new().matrix(0.0);
        assert!(m.max_difference(&Matrix3::identity()) < 1e-15);
    }

    #[test]
    fn test_matrix_is_orthonormal_over_centuries() {
        let p = PrecessionIAU1976::new();
        for t in [-2.0, -0.5, 0.07, 1.0, 3.0] {
            assert!(p.matrix(t).is_rotation_matrix(1e-14), "t = {}", t);
        }
    }

    #[test]
    fn test_pole_moves_toward_equinox_by_theta() {
        // The J2000 pole seen in mean-of-date axes is tilted by theta.
        let p = PrecessionIAU1976::new();
        let t = 0.2;
        let angles = p.angles(t);
        let pole = p.matrix(t).column(2);
        assert!((pole.z - angles.theta.cos()).abs() < 1e-14);
    }

    #[test]
    fn test_general_precession_rate() {
        // ζ + z grows by ~4612″ per century.
        let a = PrecessionIAU1976::new().angles(1.0);
        let total_arcsec = (a.zeta + a.z) / ARCSEC_TO_RAD;
        assert!((total_arcsec - 4613.868961).abs() < 1e-6);
    }
}
