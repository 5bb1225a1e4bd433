//! Registry of space points that coordinate systems and force models refer to.
//!
//! [`SolarSystem`] is an arena: each celestial body or body-fixed point lives at
//! a stable [`SpacePointId`], and consumers hold ids rather than references.
//! Re-adding a point under an existing name replaces it in place, so ids held
//! elsewhere stay valid when a body is reconfigured.
//!
//! Each registry carries a process-unique [`SolarSystemId`], which is what
//! coordinate objects remember to detect being handed the same registry twice.
//!
//! Body ephemerides are not modeled. A body's state relative to its J2000 body
//! is a fixed, user-settable [`StateVector`] (zero by default).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use astrodyn_core::constants::{EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING, EARTH_MU};
use astrodyn_core::geodesy::geodetic_to_body_fixed;
use astrodyn_core::Vector3;

use crate::state::StateVector;
use crate::{DEFAULT_J2000_BODY, DEFAULT_UPDATE_INTERVAL};

static NEXT_SOLAR_SYSTEM_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolarSystemId(u64);

/// Handle to a point in a [`SolarSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpacePointId(usize);

impl SpacePointId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What a space point can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacePointKind {
    CelestialBody,
    BodyFixedPoint,
}

/// How a body's body-fixed axes rotate relative to MJ2000Eq.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationModel {
    /// Precession, sidereal time and polar motion from Earth orientation data.
    EarthOrientation,
    /// IAU/WGCCRE pole and prime-meridian elements.
    IauElements(IauRotationElements),
}

/// Pole right ascension/declination and prime meridian angle, degrees.
///
/// ```text
/// α₀ = alpha0 + alpha_rate · T      (T: Julian centuries since J2000)
/// δ₀ = delta0 + delta_rate · T
/// W  = w0 + w_rate · d              (d: days since J2000)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IauRotationElements {
    pub alpha0: f64,
    pub alpha_rate: f64,
    pub delta0: f64,
    pub delta_rate: f64,
    pub w0: f64,
    pub w_rate: f64,
}

/// Physical constants of a celestial body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CelestialBody {
    /// Gravitational parameter, km³/s².
    pub mu: f64,
    /// Equatorial radius, km.
    pub equatorial_radius: f64,
    pub flattening: f64,
    /// Seconds between precession/nutation refreshes.
    pub nutation_update_interval: f64,
    /// Directory searched for relative potential file names.
    pub potential_file_path: PathBuf,
    /// Coefficient file currently associated with the body.
    pub potential_filename: Option<PathBuf>,
    pub rotation: RotationModel,
    /// State relative to the J2000 body in MJ2000Eq axes.
    pub mj2000_state: StateVector,
}

impl CelestialBody {
    pub fn earth() -> Self {
        Self {
            mu: EARTH_MU,
            equatorial_radius: EARTH_EQUATORIAL_RADIUS,
            flattening: EARTH_FLATTENING,
            nutation_update_interval: DEFAULT_UPDATE_INTERVAL,
            potential_file_path: PathBuf::from("data/gravity/earth"),
            potential_filename: None,
            rotation: RotationModel::EarthOrientation,
            mj2000_state: StateVector::zeros(),
        }
    }

    pub fn luna() -> Self {
        Self {
            mu: 4902.8005821478,
            equatorial_radius: 1738.2,
            flattening: 0.0,
            nutation_update_interval: DEFAULT_UPDATE_INTERVAL,
            potential_file_path: PathBuf::from("data/gravity/luna"),
            potential_filename: None,
            rotation: RotationModel::IauElements(IauRotationElements {
                alpha0: 269.9949,
                alpha_rate: 0.0031,
                delta0: 66.5392,
                delta_rate: 0.0130,
                w0: 38.3213,
                w_rate: 13.17635815,
            }),
            mj2000_state: StateVector::zeros(),
        }
    }

    pub fn sun() -> Self {
        Self {
            mu: 132_712_440_017.99,
            equatorial_radius: 695_990.0,
            flattening: 0.0,
            nutation_update_interval: DEFAULT_UPDATE_INTERVAL,
            potential_file_path: PathBuf::from("data/gravity/sun"),
            potential_filename: None,
            rotation: RotationModel::IauElements(IauRotationElements {
                alpha0: 286.13,
                alpha_rate: 0.0,
                delta0: 63.87,
                delta_rate: 0.0,
                w0: 84.176,
                w_rate: 14.1844,
            }),
            mj2000_state: StateVector::zeros(),
        }
    }

    pub fn mars() -> Self {
        Self {
            mu: 42_828.314258067,
            equatorial_radius: 3396.19,
            flattening: 0.0064763,
            nutation_update_interval: DEFAULT_UPDATE_INTERVAL,
            potential_file_path: PathBuf::from("data/gravity/mars"),
            potential_filename: None,
            rotation: RotationModel::IauElements(IauRotationElements {
                alpha0: 317.68143,
                alpha_rate: -0.1061,
                delta0: 52.88650,
                delta_rate: -0.0609,
                w0: 176.630,
                w_rate: 350.89198226,
            }),
            mj2000_state: StateVector::zeros(),
        }
    }

    pub fn with_potential_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.potential_file_path = path.into();
        self
    }

    pub fn with_state(mut self, state: StateVector) -> Self {
        self.mj2000_state = state;
        self
    }

    pub fn with_nutation_update_interval(mut self, seconds: f64) -> Self {
        self.nutation_update_interval = seconds;
        self
    }
}

/// Where a body-fixed point sits on its central body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyFixedLocation {
    /// Latitude/longitude in radians, altitude in km.
    Geodetic {
        latitude: f64,
        longitude: f64,
        altitude: f64,
    },
    /// Body-fixed Cartesian position, km.
    Cartesian(Vector3),
}

/// A point fixed to a body's surface, such as a ground station.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyFixedPoint {
    pub central_body: String,
    pub location: BodyFixedLocation,
    /// `"Sphere"` or `"Ellipsoid"`; checked when topocentric axes use it.
    pub horizon_reference: String,
    /// Name of the central body's body-fixed coordinate system.
    pub body_fixed_cs: String,
}

impl BodyFixedPoint {
    /// A point at geodetic latitude/longitude (degrees) and altitude (km).
    pub fn geodetic(central_body: &str, latitude_deg: f64, longitude_deg: f64, altitude: f64) -> Self {
        Self::with_location(
            central_body,
            BodyFixedLocation::Geodetic {
                latitude: latitude_deg.to_radians(),
                longitude: longitude_deg.to_radians(),
                altitude,
            },
        )
    }

    pub fn cartesian(central_body: &str, position: Vector3) -> Self {
        Self::with_location(central_body, BodyFixedLocation::Cartesian(position))
    }

    fn with_location(central_body: &str, location: BodyFixedLocation) -> Self {
        Self {
            central_body: central_body.to_string(),
            location,
            horizon_reference: "Ellipsoid".to_string(),
            body_fixed_cs: format!("{}Fixed", central_body),
        }
    }

    pub fn with_horizon_reference(mut self, reference: &str) -> Self {
        self.horizon_reference = reference.to_string();
        self
    }

    pub fn with_body_fixed_cs(mut self, name: &str) -> Self {
        self.body_fixed_cs = name.to_string();
        self
    }

    /// Body-fixed Cartesian position (km) on a body of the given shape.
    pub fn body_fixed_location(&self, equatorial_radius: f64, flattening: f64) -> Vector3 {
        match self.location {
            BodyFixedLocation::Geodetic {
                latitude,
                longitude,
                altitude,
            } => geodetic_to_body_fixed(latitude, longitude, altitude, equatorial_radius, flattening),
            BodyFixedLocation::Cartesian(position) => position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpacePointData {
    CelestialBody(CelestialBody),
    BodyFixedPoint(BodyFixedPoint),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpacePoint {
    name: String,
    j2000_body_name: String,
    j2000_body: Option<SpacePointId>,
    data: SpacePointData,
}

impl SpacePoint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SpacePointKind {
        match self.data {
            SpacePointData::CelestialBody(_) => SpacePointKind::CelestialBody,
            SpacePointData::BodyFixedPoint(_) => SpacePointKind::BodyFixedPoint,
        }
    }

    /// Name of the J2000 body this point requires; empty when it needs none.
    pub fn j2000_body_name(&self) -> &str {
        &self.j2000_body_name
    }

    pub fn j2000_body(&self) -> Option<SpacePointId> {
        self.j2000_body
    }

    pub fn set_j2000_body(&mut self, id: Option<SpacePointId>) {
        self.j2000_body = id;
    }

    pub fn data(&self) -> &SpacePointData {
        &self.data
    }

    pub fn as_body(&self) -> Option<&CelestialBody> {
        match &self.data {
            SpacePointData::CelestialBody(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_body_mut(&mut self) -> Option<&mut CelestialBody> {
        match &mut self.data {
            SpacePointData::CelestialBody(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_body_fixed_point(&self) -> Option<&BodyFixedPoint> {
        match &self.data {
            SpacePointData::BodyFixedPoint(point) => Some(point),
            _ => None,
        }
    }

    pub fn as_body_fixed_point_mut(&mut self) -> Option<&mut BodyFixedPoint> {
        match &mut self.data {
            SpacePointData::BodyFixedPoint(point) => Some(point),
            _ => None,
        }
    }
}

/// Arena of named space points.
#[derive(Debug)]
pub struct SolarSystem {
    id: SolarSystemId,
    points: Vec<SpacePoint>,
    by_name: HashMap<String, SpacePointId>,
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            id: SolarSystemId(NEXT_SOLAR_SYSTEM_ID.fetch_add(1, Ordering::Relaxed)),
            points: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Sun, Earth, Luna and Mars with default constants.
    pub fn with_default_bodies() -> Self {
        let mut ss = Self::new();
        ss.add_body("Sun", CelestialBody::sun());
        ss.add_body("Earth", CelestialBody::earth());
        ss.add_body("Luna", CelestialBody::luna());
        ss.add_body("Mars", CelestialBody::mars());
        ss
    }

    pub fn id(&self) -> SolarSystemId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Adds or replaces a celestial body. Its J2000 body is Earth.
    pub fn add_body(&mut self, name: &str, body: CelestialBody) -> SpacePointId {
        self.insert(name, DEFAULT_J2000_BODY, SpacePointData::CelestialBody(body))
    }

    /// Adds or replaces a body-fixed point. Its J2000 body is Earth.
    pub fn add_body_fixed_point(&mut self, name: &str, point: BodyFixedPoint) -> SpacePointId {
        self.insert(name, DEFAULT_J2000_BODY, SpacePointData::BodyFixedPoint(point))
    }

    fn insert(&mut self, name: &str, j2000_body_name: &str, data: SpacePointData) -> SpacePointId {
        let point = SpacePoint {
            name: name.to_string(),
            j2000_body_name: j2000_body_name.to_string(),
            j2000_body: None,
            data,
        };

        if let Some(&id) = self.by_name.get(name) {
            self.points[id.0] = point;
            return id;
        }

        let id = SpacePointId(self.points.len());
        self.points.push(point);
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Looks up any space point by name.
    pub fn get_body(&self, name: &str) -> Option<SpacePointId> {
        self.by_name.get(name).copied()
    }

    pub fn point(&self, id: SpacePointId) -> Option<&SpacePoint> {
        self.points.get(id.0)
    }

    pub fn point_mut(&mut self, id: SpacePointId) -> Option<&mut SpacePoint> {
        self.points.get_mut(id.0)
    }

    pub fn body(&self, id: SpacePointId) -> Option<&CelestialBody> {
        self.point(id)?.as_body()
    }

    pub fn body_by_name(&self, name: &str) -> Option<&CelestialBody> {
        self.body(self.get_body(name)?)
    }

    pub fn body_mut(&mut self, id: SpacePointId) -> Option<&mut CelestialBody> {
        self.point_mut(id)?.as_body_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.name())
    }

    /// Default potential directory of `body_name`, if it is a celestial body.
    pub fn potential_file_path(&self, body_name: &str) -> Option<&Path> {
        Some(self.body_by_name(body_name)?.potential_file_path.as_path())
    }
}
