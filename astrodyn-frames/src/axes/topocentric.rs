//! Local horizon axes at a body-fixed point.
//!
//! The axes are south, east and up (SEZ) at the point's geodetic location:
//!
//! ```text
//! ẑ = (cos φ cos λ, cos φ sin λ, sin φ)
//! ŷ = normalize(k̂ × ẑ)
//! x̂ = ŷ × ẑ
//! ```
//!
//! Stacked as columns these give `R_FT`, topocentric to body-fixed. The
//! rotation to MJ2000Eq is `R_bf · R_FT`, where `R_bf` is the freshly computed
//! rotation of the point's body-fixed coordinate system, supplied through
//! [`AxisEnvironment::body_fixed`](super::AxisEnvironment). `R_FT` is treated
//! as constant, so the derivative is `Ṙ_bf · R_FT`.

use astrodyn_core::geodesy::local_vertical;
use astrodyn_core::{AstroError, GeodeticSolver, MathErrorKind, Matrix3, Vector3};
use astrodyn_time::A1;

use super::{AxisContext, Rotation, RotationProvider};
use crate::coordinate_base::CoordinateBase;
use crate::solar_system::{BodyFixedPoint, SolarSystem};
use crate::{FrameError, FrameResult};

pub const HORIZON_SPHERE: &str = "Sphere";
pub const HORIZON_ELLIPSOID: &str = "Ellipsoid";

#[derive(Debug, Clone, PartialEq)]
pub struct TopocentricAxes {
    solver: GeodeticSolver,
    body_fixed_cs: Option<String>,
    central_body: String,
    equatorial_radius: f64,
    flattening: f64,
    horizon_reference: String,
    bf_location: Option<Vector3>,
    rft: Matrix3,
}

impl Default for TopocentricAxes {
    fn default() -> Self {
        Self {
            solver: GeodeticSolver::default(),
            body_fixed_cs: None,
            central_body: String::new(),
            equatorial_radius: 0.0,
            flattening: 0.0,
            horizon_reference: HORIZON_ELLIPSOID.to_string(),
            bf_location: None,
            rft: Matrix3::identity(),
        }
    }
}

impl TopocentricAxes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_solver(mut self, solver: GeodeticSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Topocentric-to-body-fixed rotation from the last compute.
    pub fn rft(&self) -> &Matrix3 {
        &self.rft
    }

    pub fn central_body(&self) -> &str {
        &self.central_body
    }

    pub fn horizon_reference(&self) -> &str {
        &self.horizon_reference
    }

    /// Body-fixed location the cached `R_FT` was built for.
    pub fn bf_location(&self) -> Option<Vector3> {
        self.bf_location
    }

    fn body_fixed_point<'s>(
        base: &CoordinateBase,
        solar_system: &'s SolarSystem,
    ) -> FrameResult<&'s BodyFixedPoint> {
        let origin = base.require_origin()?;
        solar_system
            .point(origin)
            .and_then(|p| p.as_body_fixed_point())
            .ok_or_else(|| {
                FrameError::configuration(
                    base.instance_name(),
                    format!(
                        "origin \"{}\" of topocentric axes must be a body-fixed point",
                        base.origin_name()
                    ),
                )
            })
    }

    /// Builds `R_FT` from the body-fixed location.
    fn horizon_matrix(&self, instance: &str, location: &Vector3) -> FrameResult<Matrix3> {
        let flattening = if self.horizon_reference == HORIZON_SPHERE {
            0.0
        } else {
            self.flattening
        };

        let solution = self
            .solver
            .solve(location, self.equatorial_radius, flattening)
            .map_err(|err| self.solver_error(instance, err))?;

        log::debug!(
            "{}: horizon rebuilt at lat {:.9} lon {:.9} rad ({} iterations)",
            instance,
            solution.latitude,
            solution.longitude,
            solution.iterations
        );

        let z_unit = local_vertical(solution.latitude, solution.longitude);
        let y_unit = Vector3::z_axis().cross(&z_unit).normalize();
        let x_unit = y_unit.cross(&z_unit);
        Ok(Matrix3::from_columns(&x_unit, &y_unit, &z_unit))
    }

    fn solver_error(&self, instance: &str, err: AstroError) -> FrameError {
        match err.math_kind() {
            MathErrorKind::Singularity => FrameError::singularity(
                instance,
                format!("body-fixed point lies on the rotation axis of {}", self.central_body),
            ),
            MathErrorKind::NoConvergence => FrameError::Convergence {
                instance: instance.to_string(),
                iterations: self.solver.max_iterations,
            },
            MathErrorKind::InvalidInput => FrameError::Core(err),
        }
    }
}

impl RotationProvider for TopocentricAxes {
    fn initialize(
        &mut self,
        base: &CoordinateBase,
        solar_system: &SolarSystem,
    ) -> FrameResult<Option<Rotation>> {
        let point = Self::body_fixed_point(base, solar_system)?;
        self.body_fixed_cs = Some(point.body_fixed_cs.clone());
        self.bf_location = None;
        Ok(None)
    }

    fn compute(&mut self, _epoch: &A1, ctx: &AxisContext<'_>) -> FrameResult<Rotation> {
        let instance = ctx.base.instance_name();
        let point = Self::body_fixed_point(ctx.base, ctx.env.solar_system)?;

        let body = ctx
            .env
            .solar_system
            .body_by_name(&point.central_body)
            .ok_or_else(|| {
                FrameError::configuration(
                    instance,
                    format!("central body \"{}\" is not available", point.central_body),
                )
            })?;
        self.central_body = point.central_body.clone();
        self.equatorial_radius = body.equatorial_radius;
        self.flattening = body.flattening;

        if point.horizon_reference != HORIZON_SPHERE && point.horizon_reference != HORIZON_ELLIPSOID {
            return Err(FrameError::configuration(
                instance,
                format!(
                    "horizon reference \"{}\" must be \"Sphere\" or \"Ellipsoid\"",
                    point.horizon_reference
                ),
            ));
        }
        if self.horizon_reference != point.horizon_reference {
            self.horizon_reference = point.horizon_reference.clone();
            self.bf_location = None;
        }

        let location = point.body_fixed_location(self.equatorial_radius, self.flattening);
        if self.bf_location != Some(location) {
            self.rft = self.horizon_matrix(instance, &location)?;
            self.bf_location = Some(location);
        }

        let rif = ctx.env.body_fixed.ok_or_else(|| {
            FrameError::configuration(
                instance,
                format!(
                    "rotation of body-fixed system \"{}\" has not been computed",
                    point.body_fixed_cs
                ),
            )
        })?;

        Ok(Rotation::new(rif.matrix * self.rft, rif.matrix_dot * self.rft))
    }

    fn dependency(&self) -> Option<&str> {
        self.body_fixed_cs.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrodyn_core::test_helpers::{assert_matrix_close, assert_vector_close};

    use crate::{AxisEnvironment, AxisSystem};

    fn setup(point: BodyFixedPoint) -> (SolarSystem, AxisSystem) {
        let mut ss = SolarSystem::with_default_bodies();
        ss.add_body_fixed_point("Pad", point);
        let mut axes = AxisSystem::topocentric("PadTopo", "Pad");
        axes.set_solar_system(&mut ss);
        axes.initialize(&ss).unwrap();
        (ss, axes)
    }

    fn topocentric(axes: &AxisSystem) -> &TopocentricAxes {
        match axes.kind() {
            crate::AxisKind::Topocentric(t) => t,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_cape_canaveral_horizon() {
        let (ss, mut axes) = setup(BodyFixedPoint::geodetic("Earth", 28.5, -80.6, 0.0));
        assert_eq!(axes.dependency(), Some("EarthFixed"));

        let rif = Rotation::identity();
        let env = AxisEnvironment::new(&ss).with_body_fixed(Some(&rif));
        axes.calculate_rotation_matrix(&A1::j2000(), &env, false).unwrap();

        let lat = 28.5f64.to_radians();
        let lon = (-80.6f64).to_radians();
        let up = local_vertical(lat, lon);
        let east = Vector3::new(-lon.sin(), lon.cos(), 0.0);
        let south = east.cross(&up);

        let rft = topocentric(&axes).rft();
        assert_vector_close(&rft.column(2), &up, 1e-10, "up");
        assert_vector_close(&rft.column(1), &east, 1e-10, "east");
        assert_vector_close(&rft.column(0), &south, 1e-10, "south");
        assert!(south.z < 0.0);
        assert!(axes.rot_matrix().is_rotation_matrix(1e-9));
        assert_eq!(topocentric(&axes).central_body(), "Earth");
    }

    #[test]
    fn test_rotation_composes_body_fixed() {
        let (ss, mut axes) = setup(BodyFixedPoint::geodetic("Earth", -33.0, 151.0, 0.1));
        let rif = Rotation::new(Matrix3::rot_z(0.7).transpose(), Matrix3::rot_z_derivative(0.7, 7.3e-5).transpose());
        let env = AxisEnvironment::new(&ss).with_body_fixed(Some(&rif));
        axes.calculate_rotation_matrix(&A1::j2000(), &env, false).unwrap();

        let rft = *topocentric(&axes).rft();
        assert_matrix_close(axes.rot_matrix(), &(rif.matrix * rft), 0.0, "R");
        assert_matrix_close(axes.rot_dot_matrix(), &(rif.matrix_dot * rft), 0.0, "Rdot");
        assert!(axes.rot_matrix().is_rotation_matrix(1e-9));
    }

    #[test]
    fn test_rft_cached_against_location() {
        let (mut ss, mut axes) = setup(BodyFixedPoint::geodetic("Earth", 40.0, 10.0, 0.0));
        let rif = Rotation::identity();
        {
            let env = AxisEnvironment::new(&ss).with_body_fixed(Some(&rif));
            axes.calculate_rotation_matrix(&A1::j2000(), &env, false).unwrap();
        }
        let first_location = topocentric(&axes).bf_location();
        let first = *topocentric(&axes).rft();

        let pad = ss.get_body("Pad").unwrap();
        ss.point_mut(pad)
            .unwrap()
            .as_body_fixed_point_mut()
            .unwrap()
            .location = crate::BodyFixedLocation::Cartesian(Vector3::new(0.0, 6378.0, 0.0));

        let env = AxisEnvironment::new(&ss).with_body_fixed(Some(&rif));
        axes.calculate_rotation_matrix(&A1::j2000(), &env, false).unwrap();
        assert_ne!(topocentric(&axes).bf_location(), first_location);
        assert_ne!(*topocentric(&axes).rft(), first);
        assert_vector_close(&topocentric(&axes).rft().column(2), &Vector3::y_axis(), 1e-12, "up");
    }

    #[test]
    fn test_polar_point_is_singular() {
        let (ss, mut axes) = setup(BodyFixedPoint::cartesian("Earth", Vector3::new(0.0, 0.0, 6356.75)));
        let rif = Rotation::identity();
        let env = AxisEnvironment::new(&ss).with_body_fixed(Some(&rif));
        let err = axes
            .calculate_rotation_matrix(&A1::j2000(), &env, false)
            .unwrap_err();
        assert!(matches!(err, FrameError::Singularity { .. }));
        assert!(err.is_configuration_error());
        assert_eq!(err.instance(), Some("PadTopo"));
    }

    #[test]
    fn test_bad_horizon_reference() {
        let (ss, mut axes) =
            setup(BodyFixedPoint::geodetic("Earth", 10.0, 10.0, 0.0).with_horizon_reference("Geoid"));
        let rif = Rotation::identity();
        let env = AxisEnvironment::new(&ss).with_body_fixed(Some(&rif));
        let err = axes
            .calculate_rotation_matrix(&A1::j2000(), &env, false)
            .unwrap_err();
        assert!(matches!(err, FrameError::Configuration { .. }));
        assert!(err.to_string().contains("Geoid"));
    }

    #[test]
    fn test_sphere_uses_geocentric_vertical() {
        let (ss, mut axes) =
            setup(BodyFixedPoint::geodetic("Earth", 45.0, 0.0, 0.0).with_horizon_reference("Sphere"));
        let rif = Rotation::identity();
        let env = AxisEnvironment::new(&ss).with_body_fixed(Some(&rif));
        axes.calculate_rotation_matrix(&A1::j2000(), &env, false).unwrap();

        let location = topocentric(&axes).bf_location().unwrap();
        let up = topocentric(&axes).rft().column(2);
        assert_vector_close(&up, &location.normalize(), 1e-12, "radial up");
    }

    #[test]
    fn test_missing_body_fixed_rotation() {
        let (ss, mut axes) = setup(BodyFixedPoint::geodetic("Earth", 10.0, 10.0, 0.0));
        let err = axes
            .calculate_rotation_matrix(&A1::j2000(), &AxisEnvironment::new(&ss), false)
            .unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("EarthFixed"));
    }

    #[test]
    fn test_origin_must_be_body_fixed_point() {
        let mut ss = SolarSystem::with_default_bodies();
        let mut axes = AxisSystem::topocentric("EarthTopo", "Earth");
        axes.set_solar_system(&mut ss);
        let err = axes.initialize(&ss).unwrap_err();
        assert!(err.to_string().contains("body-fixed point"));
    }

    #[test]
    fn test_iteration_cap_reports_convergence() {
        let mut ss = SolarSystem::with_default_bodies();
        ss.add_body_fixed_point("Pad", BodyFixedPoint::geodetic("Earth", 60.0, 0.0, 0.0));
        let mut axes = AxisSystem::new(
            "PadTopo",
            "Pad",
            crate::AxisKind::Topocentric(TopocentricAxes::new().with_solver(GeodeticSolver::new(1e-30, 2))),
        );
        axes.set_solar_system(&mut ss);
        axes.initialize(&ss).unwrap();

        let rif = Rotation::identity();
        let env = AxisEnvironment::new(&ss).with_body_fixed(Some(&rif));
        let err = axes
            .calculate_rotation_matrix(&A1::j2000(), &env, false)
            .unwrap_err();
        assert!(matches!(err, FrameError::Convergence { iterations: 2, .. }));
    }
}
