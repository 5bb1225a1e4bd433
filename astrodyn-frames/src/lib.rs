//! Coordinate systems and the axis-system rotations behind them.
//!
//! Every [`AxisSystem`] produces the rotation from its own axes to MJ2000Eq
//! (and that rotation's time derivative) at a requested A1 epoch. A
//! [`CoordinateSystem`] pairs axes with an origin point, and a [`FrameGraph`]
//! owns a set of coordinate systems, evaluates them in dependency order and
//! converts states between them.
//!
//! Bodies and ground points live in a [`SolarSystem`] arena; coordinate
//! objects refer to them by [`SpacePointId`].

pub mod axes;
pub mod coordinate_base;
pub mod coordinate_system;
pub mod eop;
pub mod errors;
pub mod frame_graph;
pub mod solar_system;
pub mod state;

pub use axes::{
    AxesConfig, AxisContext, AxisEnvironment, AxisKind, AxisSystem, BodyFixedAxes, InertialAxes,
    MeanOfDateAxes, MeanOfEpochAxes, ReferencePlane, Rotation, RotationProvider,
    TopocentricAxes,
};
pub use coordinate_base::{CoordinateBase, RefObjectType};
pub use coordinate_system::{CoordinateSystem, CoordinateSystemConfig};
pub use eop::{EopData, EopRecord};
pub use errors::{FrameError, FrameResult};
pub use frame_graph::{CoordinateSystemId, FrameGraph};
pub use solar_system::{
    BodyFixedLocation, BodyFixedPoint, CelestialBody, IauRotationElements, RotationModel,
    SolarSystem, SolarSystemId, SpacePoint, SpacePointData, SpacePointId, SpacePointKind,
};
pub use state::StateVector;

pub use astrodyn_core::{Matrix3, Vector3};
pub use astrodyn_time::A1;

/// J2000 body assumed when none is configured.
pub const DEFAULT_J2000_BODY: &str = "Earth";

/// Seconds between refreshes of precession terms.
pub const DEFAULT_UPDATE_INTERVAL: f64 = 60.0;
