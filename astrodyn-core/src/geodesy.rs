//! Geodetic latitude and longitude of points fixed to an oblate body.
//!
//! Topocentric axes need the local vertical of a ground station, which is the
//! ellipsoid normal at the station's geodetic latitude. Given the body-fixed
//! position, the latitude is found by fixed-point iteration:
//!
//! ```text
//! φ₀     = atan2(z, ρ)              ρ = √(x² + y²)
//! C      = R / √(1 − e² sin² φ)
//! φₖ₊₁   = atan((z + C e² sin φₖ) / ρ)
//! ```
//!
//! with `e² = 2f − f²`, stopping when successive latitudes differ by no more
//! than the tolerance. The longitude is `atan2(y, x)` directly.
//!
//! Points within 1 m of the polar axis have no well-defined longitude and are
//! rejected as a [`Singularity`](crate::MathErrorKind::Singularity).

use crate::errors::{AstroError, AstroResult, MathErrorKind};
use crate::matrix::Vector3;

/// Minimum distance from the polar axis, km.
pub const POLAR_AXIS_THRESHOLD: f64 = 1.0e-3;

/// Result of a geodetic solve. Angles are radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticSolution {
    pub latitude: f64,
    pub longitude: f64,
    pub iterations: usize,
}

/// Iterative geodetic-latitude solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticSolver {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for GeodeticSolver {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-11,
            max_iterations: 100,
        }
    }
}

impl GeodeticSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Solves for geodetic latitude/longitude of a body-fixed `position` (km).
    ///
    /// # Errors
    ///
    /// - [`MathErrorKind::Singularity`] when the point lies on the polar axis.
    /// - [`MathErrorKind::NoConvergence`] when the iteration cap is reached.
    /// - [`MathErrorKind::InvalidInput`] for a non-positive radius or a
    ///   flattening outside `[0, 1)`.
    pub fn solve(
        &self,
        position: &Vector3,
        equatorial_radius: f64,
        flattening: f64,
    ) -> AstroResult<GeodeticSolution> {
        if !(equatorial_radius > 0.0) || !(0.0..1.0).contains(&flattening) {
            return Err(AstroError::math_error(
                "geodetic_solve",
                MathErrorKind::InvalidInput,
                &format!(
                    "radius {} and flattening {} do not describe an oblate body",
                    equatorial_radius, flattening
                ),
            ));
        }

        let rxy = libm::sqrt(position.x * position.x + position.y * position.y);
        if rxy < POLAR_AXIS_THRESHOLD {
            return Err(AstroError::math_error(
                "geodetic_solve",
                MathErrorKind::Singularity,
                "point lies on the polar axis; longitude is undefined",
            ));
        }

        let e2 = 2.0 * flattening - flattening * flattening;
        let mut latitude = libm::atan2(position.z, rxy);

        for iteration in 1..=self.max_iterations {
            let sin_lat = latitude.sin();
            let c = equatorial_radius / libm::sqrt(1.0 - e2 * sin_lat * sin_lat);
            let next = libm::atan((position.z + c * e2 * sin_lat) / rxy);
            let delta = (next - latitude).abs();
            latitude = next;

            if delta <= self.tolerance {
                return Ok(GeodeticSolution {
                    latitude,
                    longitude: libm::atan2(position.y, position.x),
                    iterations: iteration,
                });
            }
        }

        Err(AstroError::math_error(
            "geodetic_solve",
            MathErrorKind::NoConvergence,
            &format!(
                "latitude did not converge to {:e} rad in {} iterations",
                self.tolerance, self.max_iterations
            ),
        ))
    }
}

/// Body-fixed position (km) of a point at geodetic `latitude`/`longitude`
/// (radians) and `height` (km) above the reference ellipsoid.
pub fn geodetic_to_body_fixed(
    latitude: f64,
    longitude: f64,
    height: f64,
    equatorial_radius: f64,
    flattening: f64,
) -> Vector3 {
    let e2 = 2.0 * flattening - flattening * flattening;
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();
    let n = equatorial_radius / libm::sqrt(1.0 - e2 * sin_lat * sin_lat);

    Vector3::new(
        (n + height) * cos_lat * cos_lon,
        (n + height) * cos_lat * sin_lon,
        (n * (1.0 - e2) + height) * sin_lat,
    )
}

/// Local vertical (ellipsoid normal) at a geodetic latitude/longitude.
pub fn local_vertical(latitude: f64, longitude: f64) -> Vector3 {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEG_TO_RAD, EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING};

    #[test]
    fn test_cape_canaveral_round_trip() {
        let lat = 28.5 * DEG_TO_RAD;
        let lon = -80.6 * DEG_TO_RAD;
        let position =
            geodetic_to_body_fixed(lat, lon, 0.0, EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING);

        let solution = GeodeticSolver::default()
            .solve(&position, EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING)
            .unwrap();

        assert!((solution.latitude - lat).abs() < 1e-9);
        assert!((solution.longitude - lon).abs() < 1e-12);
        assert!(solution.iterations < 10);
    }

    #[test]
    fn test_sphere_needs_one_step() {
        let position = Vector3::new(4000.0, 3000.0, 2000.0);
        let solution = GeodeticSolver::default().solve(&position, 6000.0, 0.0).unwrap();
        assert!((solution.latitude - libm::atan2(2000.0, 5000.0)).abs() < 1e-15);
        assert_eq!(solution.iterations, 1);
    }

    #[test]
    fn test_polar_axis_is_singular() {
        let err = GeodeticSolver::default()
            .solve(&Vector3::new(0.0, 0.0, 6356.0), EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING)
            .unwrap_err();
        assert_eq!(err.math_kind(), MathErrorKind::Singularity);

        let near = Vector3::new(0.0009, 0.0, 6356.0);
        let err = GeodeticSolver::default()
            .solve(&near, EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING)
            .unwrap_err();
        assert_eq!(err.math_kind(), MathErrorKind::Singularity);
    }

    #[test]
    fn test_iteration_cap() {
        let position = geodetic_to_body_fixed(
            0.7,
            0.1,
            0.0,
            EARTH_EQUATORIAL_RADIUS,
            EARTH_FLATTENING,
        );
        let err = GeodeticSolver::new(0.0, 1)
            .solve(&position, EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING)
            .unwrap_err();
        assert_eq!(err.math_kind(), MathErrorKind::NoConvergence);
    }

    #[test]
    fn test_rejects_bad_ellipsoid() {
        let p = Vector3::new(7000.0, 0.0, 0.0);
        assert!(GeodeticSolver::default().solve(&p, -1.0, 0.0).is_err());
        assert!(GeodeticSolver::default().solve(&p, 6378.0, 1.0).is_err());
    }

    #[test]
    fn test_local_vertical_is_unit() {
        let up = local_vertical(0.3, -1.2);
        assert!((up.magnitude() - 1.0).abs() < 1e-15);
    }
}
