//! Mean-of-epoch axes: mean-of-date axes frozen at a reference epoch `t₀`.
//!
//! ```text
//! MOEEq:  R = Pᵀ(t₀)
//! MOEEc:  R = Pᵀ(t₀) · Rx(ε(t₀))ᵀ
//! Ṙ = 0
//! ```
//!
//! The matrices follow the same conventions as
//! [`mean_of_date`](super::mean_of_date). They are evaluated once when the
//! axes are initialized. Later computations ignore both the requested epoch
//! and `force`, and [`uses_epoch`](super::RotationProvider::uses_epoch)
//! reports true so dependents know the reference epoch matters.

use astrodyn_core::PrecessionIAU1976;
use astrodyn_time::{tdb_centuries, ToTT, A1};

use super::mean_of_date::mean_of_date_matrix;
use super::{AxisContext, ReferencePlane, Rotation, RotationProvider};
use crate::coordinate_base::CoordinateBase;
use crate::solar_system::SolarSystem;
use crate::{FrameError, FrameResult};

/// Mean-of-date axes frozen at a reference epoch.
///
/// The matrix is evaluated once, in `initialize`, and every later compute
/// returns it unchanged, whatever the requested epoch or `force` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanOfEpochAxes {
    plane: ReferencePlane,
    reference_epoch: A1,
    frozen: Option<Rotation>,
}

impl MeanOfEpochAxes {
    pub fn new(plane: ReferencePlane, reference_epoch: A1) -> Self {
        Self {
            plane,
            reference_epoch,
            frozen: None,
        }
    }

    pub fn plane(&self) -> ReferencePlane {
        self.plane
    }

    pub fn reference_epoch(&self) -> A1 {
        self.reference_epoch
    }

    /// Takes effect at the next initialization.
    pub fn set_reference_epoch(&mut self, epoch: A1) {
        self.reference_epoch = epoch;
        self.frozen = None;
    }
}

impl RotationProvider for MeanOfEpochAxes {
    fn initialize(
        &mut self,
        base: &CoordinateBase,
        _solar_system: &SolarSystem,
    ) -> FrameResult<Option<Rotation>> {
        let t = tdb_centuries(&self.reference_epoch.to_tt()?);
        let precession = PrecessionIAU1976::new().matrix(t);
        let rotation = Rotation::fixed(mean_of_date_matrix(self.plane, &precession, t));
        log::debug!(
            "{}: frozen at {} (T = {:.12})",
            base.instance_name(),
            self.reference_epoch,
            t
        );
        self.frozen = Some(rotation);
        Ok(Some(rotation))
    }

    fn compute(&mut self, _epoch: &A1, ctx: &AxisContext<'_>) -> FrameResult<Rotation> {
        // Computed in initialize.
        self.frozen.ok_or_else(|| {
            FrameError::configuration(
                ctx.base.instance_name(),
                "mean-of-epoch rotation has not been initialized",
            )
        })
    }

    fn uses_epoch(&self) -> bool {
        true
    }
}
