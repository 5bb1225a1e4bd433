use std::fs;
use std::path::Path;
use std::sync::Arc;

use astrodyn_core::test_helpers::assert_vector_close;
use astrodyn_frames::{
    AxisSystem, CelestialBody, CoordinateSystem, EopData, EopRecord, FrameGraph, SolarSystem,
    StateVector,
};
use astrodyn_gravity::{
    normalization_factor, ForceModelSet, GravityError, HarmonicField, PhysicalModel,
    PointMassForce, Vector3, A1,
};

const J2: f64 = 1.0826e-3;
const FILE_MU: f64 = 398600.4415;
const FILE_RADIUS: f64 = 6378.1363;

fn write_field(dir: &Path) {
    let c20 = -J2 / normalization_factor(2, 0);
    let content = format!(
        "C    zonal test field\n\
         POTFIELD   8  6   1 .3986004415E+15 .6378136300E+07 1.\n\
         RECOEF     2  0 {:.15E}  0.0\n\
         END\n",
        c20
    );
    fs::write(dir.join("ZONAL.cof"), content).unwrap();
}

fn eop() -> Arc<EopData> {
    let records = (0..30).map(|day| EopRecord::zero(54985.0 + day as f64)).collect();
    Arc::new(EopData::from_records(records))
}

fn earth_fixed_graph() -> FrameGraph {
    let mut frames = FrameGraph::new();
    frames.add(CoordinateSystem::new(
        "EarthFixed",
        "Earth",
        AxisSystem::body_fixed("EarthFixed", "Earth"),
    ));
    frames
}

struct Setup {
    _dir: tempfile::TempDir,
    ss: SolarSystem,
    frames: FrameGraph,
    field: HarmonicField,
}

fn setup(degree: i64, order: i64) -> Setup {
    let dir = tempfile::tempdir().unwrap();
    write_field(dir.path());
    let mut ss = SolarSystem::new();
    ss.add_body("Earth", CelestialBody::earth().with_potential_file_path(dir.path()));
    ss.add_body("Luna", CelestialBody::luna());

    let mut field = HarmonicField::new("EarthGravity", "Earth");
    field.set_degree_order(degree, order);
    field.set_filename("DFLT__ZONAL.cof", &mut ss).unwrap();
    field.set_eop(Some(eop()));

    let mut frames = earth_fixed_graph();
    field.set_solar_system(&ss);
    assert!(field.bind_coordinate_systems(&mut frames).is_empty());
    frames.initialize(&mut ss).unwrap();
    field.initialize(&ss).unwrap();

    Setup {
        _dir: dir,
        ss,
        frames,
        field,
    }
}

fn zonal_closed_form(p: &Vector3, mu: f64, radius: f64, j2: f64) -> Vector3 {
    let r2 = p.magnitude_squared();
    let r = r2.sqrt();
    let k = 1.5 * j2 * mu * radius * radius / (r2 * r2 * r);
    let zr2 = 5.0 * p.z * p.z / r2;
    *p * (-mu / (r2 * r)) + Vector3::new(k * p.x * (zr2 - 1.0), k * p.y * (zr2 - 1.0), k * p.z * (zr2 - 3.0))
}

fn j2_closed_form(p: &Vector3) -> Vector3 {
    zonal_closed_form(p, FILE_MU, FILE_RADIUS, J2)
}

#[test]
fn central_term_is_frame_independent() {
    let mut s = setup(0, 0);
    let r = Vector3::new(-4200.0, 5100.0, 2300.0);
    let epoch = A1::from_gmat_mjd(25000.25);

    let a = s.field.acceleration(&r, &epoch, &mut s.frames, &s.ss).unwrap();
    let mag = r.magnitude();
    let mu = s.field.coefficients().unwrap().mu;
    assert_vector_close(&a, &(r * (-mu / (mag * mag * mag))), 1e-15, "central term");
}

#[test]
fn zonal_field_is_evaluated_in_the_fixed_frame() {
    let mut s = setup(2, 0);
    let r = Vector3::new(5200.0, -3100.0, 3900.0);
    let epoch = A1::from_gmat_mjd(25000.25);

    let a = s.field.acceleration(&r, &epoch, &mut s.frames, &s.ss).unwrap();

    let to_fixed = s.frames.rotation_between("EarthMJ2000Eq", "EarthFixed").unwrap().matrix;
    let expected = to_fixed.transpose() * j2_closed_form(&(to_fixed * r));
    assert_vector_close(&a, &expected, 1e-15, "J2 about EarthMJ2000Eq");
}

#[test]
fn target_frame_receives_the_acceleration() {
    let mut s = setup(2, 0);
    s.field
        .set_string_parameter("TargetCoordinateSystem", "EarthFixed", &mut s.ss)
        .unwrap();
    assert!(s.field.bind_coordinate_systems(&mut s.frames).is_empty());
    s.field.initialize(&s.ss).unwrap();

    let r = Vector3::new(5200.0, -3100.0, 3900.0);
    let epoch = A1::from_gmat_mjd(25000.25);
    let a = s.field.acceleration(&r, &epoch, &mut s.frames, &s.ss).unwrap();

    let to_fixed = s.frames.rotation_between("EarthMJ2000Eq", "EarthFixed").unwrap().matrix;
    assert_vector_close(&a, &j2_closed_form(&(to_fixed * r)), 1e-15, "J2 in EarthFixed");
}

const MARS_J2: f64 = 1.9566e-3;

#[test]
fn force_origin_moves_inputs_to_another_body() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("MARS.grv"),
        format!(
            "Degree 2\nOrder 0\nGm 4.2828314e13\nRefDistance 3396000.0\nNormalized No\n2 0 {:e} 0.0\n",
            -MARS_J2
        ),
    )
    .unwrap();
    let mut ss = SolarSystem::new();
    ss.add_body("Earth", CelestialBody::earth());
    ss.add_body("Mars", CelestialBody::mars().with_potential_file_path(dir.path()));

    let mut field = HarmonicField::new("MarsGravity", "Mars");
    field.set_degree_order(2, 0);
    field.set_filename("DFLT__MARS.grv", &mut ss).unwrap();
    field.set_eop(Some(eop()));

    field.set_force_origin("Earth");
    assert_eq!(field.input_cs_name(), "EarthMJ2000Eq");
    field.set_force_origin("Mars");
    assert_eq!(field.input_cs_name(), "MarsMJ2000Eq");
    assert_eq!(field.target_cs_name(), "MarsMJ2000Eq");
    assert_eq!(field.fixed_cs_name(), "MarsFixed");
    assert_eq!(field.ref_object_names(), vec!["MarsMJ2000Eq", "MarsFixed"]);

    let mut frames = FrameGraph::new();
    frames.add(CoordinateSystem::new(
        "MarsFixed",
        "Mars",
        AxisSystem::body_fixed("MarsFixed", "Mars"),
    ));
    field.set_solar_system(&ss);
    assert!(field.bind_coordinate_systems(&mut frames).is_empty());
    assert!(frames.get("MarsMJ2000Eq").is_some());
    frames.initialize(&mut ss).unwrap();
    field.initialize(&ss).unwrap();

    let r = Vector3::new(2100.0, -3300.0, 1800.0);
    let epoch = A1::from_gmat_mjd(25000.25);
    let a = field.acceleration(&r, &epoch, &mut frames, &ss).unwrap();

    let to_fixed = frames.rotation_between("MarsMJ2000Eq", "MarsFixed").unwrap().matrix;
    let expected =
        to_fixed.transpose() * zonal_closed_form(&(to_fixed * r), 42828.314, 3396.0, MARS_J2);
    assert_vector_close(&a, &expected, 1e-15, "J2 about MarsMJ2000Eq");
}

#[test]
fn field_about_a_foreign_origin_is_rejected() {
    let mut s = setup(2, 0);
    s.field.set_force_origin("Luna");
    assert!(s.field.bind_coordinate_systems(&mut s.frames).is_empty());
    let err = s.field.initialize(&s.ss).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("origin Luna"));
}

#[test]
fn request_above_file_degree_is_clamped_at_initialize() {
    let s = setup(20, 20);
    assert_eq!(s.field.max_degree(), 8);
    assert_eq!(s.field.max_order(), 6);
    assert_eq!((s.field.degree(), s.field.order()), (8, 6));
    assert!(s.field.using_default_file());
}

#[test]
fn initialize_requires_eop() {
    let dir = tempfile::tempdir().unwrap();
    write_field(dir.path());
    let mut ss = SolarSystem::new();
    ss.add_body("Earth", CelestialBody::earth().with_potential_file_path(dir.path()));

    let mut field = HarmonicField::new("EarthGravity", "Earth");
    field.set_filename("ZONAL.cof", &mut ss).unwrap();
    let mut frames = earth_fixed_graph();
    field.set_solar_system(&ss);
    field.bind_coordinate_systems(&mut frames);

    let err = field.initialize(&ss).unwrap_err();
    assert!(matches!(err, GravityError::Configuration { .. }));
    assert!(err.to_string().contains("EOP"));
}

#[test]
fn force_set_sums_field_and_third_body() {
    let dir = tempfile::tempdir().unwrap();
    write_field(dir.path());
    let mut ss = SolarSystem::new();
    ss.add_body("Earth", CelestialBody::earth().with_potential_file_path(dir.path()));
    ss.add_body(
        "Luna",
        CelestialBody::luna().with_state(StateVector::from_position(Vector3::new(
            -120_000.0, 350_000.0, 90_000.0,
        ))),
    );

    let mut field = HarmonicField::new("EarthGravity", "Earth");
    field.set_degree_order(2, 0);
    field.set_filename("DFLT__ZONAL.cof", &mut ss).unwrap();
    field.set_eop(Some(eop()));
    let mut moon = PointMassForce::new("LunaPointMass", "Luna");

    let mut frames = earth_fixed_graph();
    let mut forces = ForceModelSet::new();
    forces.add(Box::new(field.clone()));
    moon.set_force_origin("Earth");
    forces.add(Box::new(moon.clone()));
    forces.initialize(&mut ss, &mut frames).unwrap();
    assert_eq!(forces.len(), 2);

    let r = Vector3::new(6800.0, 900.0, -1500.0);
    let epoch = A1::from_gmat_mjd(25000.25);
    let total = forces.acceleration(&r, &epoch, &mut frames, &ss).unwrap();

    field.set_solar_system(&ss);
    field.bind_coordinate_systems(&mut frames);
    field.initialize(&ss).unwrap();
    moon.set_solar_system(&ss);
    moon.bind_coordinate_systems(&mut frames);
    moon.initialize(&ss).unwrap();
    let parts = field.acceleration(&r, &epoch, &mut frames, &ss).unwrap()
        + moon.acceleration(&r, &epoch, &mut frames, &ss).unwrap();

    assert_vector_close(&total, &parts, 1e-18, "force set");
    assert!(total.max_difference(&field.acceleration(&r, &epoch, &mut frames, &ss).unwrap()) > 0.0);
}
