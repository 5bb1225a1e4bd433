use astrodyn_core::obliquity::j2000_mean_obliquity;
use astrodyn_core::Matrix3;
use astrodyn_time::A1;

use super::{AxisContext, ReferencePlane, Rotation, RotationProvider};
use crate::FrameResult;

/// Mean-of-J2000 axes, equatorial or ecliptic.
///
/// Neither rotates with time: MJ2000Eq is the identity, MJ2000Ec is the fixed
/// tilt by the J2000 mean obliquity.
#[derive(Debug, Clone, PartialEq)]
pub struct InertialAxes {
    plane: ReferencePlane,
}

impl InertialAxes {
    pub fn new(plane: ReferencePlane) -> Self {
        Self { plane }
    }

    pub fn plane(&self) -> ReferencePlane {
        self.plane
    }

    fn matrix(&self) -> Matrix3 {
        match self.plane {
            ReferencePlane::Equator => Matrix3::identity(),
            ReferencePlane::Ecliptic => Matrix3::rot_x(j2000_mean_obliquity()).transpose(),
        }
    }
}

impl RotationProvider for InertialAxes {
    fn compute(&mut self, _epoch: &A1, _ctx: &AxisContext<'_>) -> FrameResult<Rotation> {
        Ok(Rotation::fixed(self.matrix()))
    }
}
