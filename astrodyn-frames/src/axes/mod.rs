//! Axis systems: time-dependent rotations to MJ2000Eq.
//!
//! An [`AxisSystem`] wraps one [`AxisKind`] variant together with the state
//! every variant shares: the [`CoordinateBase`] references, the last computed
//! [`Rotation`], the epoch it was computed for, and the update interval that
//! governs how often precession terms are refreshed.
//!
//! | Variant | Rotation to MJ2000Eq | Rate |
//! |---------|----------------------|------|
//! | `MJ2000Eq` | identity | zero |
//! | `MJ2000Ec` | `Rx(ε₀)ᵀ` | zero |
//! | `MODEq` | `Pᵀ` at the current epoch | zero |
//! | `MODEc` | `Pᵀ · Rx(ε)ᵀ` at the current epoch | zero |
//! | `MOEEq` / `MOEEc` | as MOD, frozen at the reference epoch | zero |
//! | `BodyFixed` | body orientation model | from the spin rate |
//! | `Topocentric` | `R_bf · R_FT` | `Ṙ_bf · R_FT` |
//!
//! The matrix `Rotation::matrix` maps a vector expressed in these axes into
//! MJ2000Eq: `r_mj2000 = R · r_axes`.
//!
//! ```
//! use astrodyn_frames::{AxisEnvironment, AxisSystem, SolarSystem, A1};
//!
//! let mut ss = SolarSystem::with_default_bodies();
//! let mut axes = AxisSystem::mod_eq("EarthMODEq", "Earth");
//! axes.set_solar_system(&mut ss);
//! axes.initialize(&ss).unwrap();
//!
//! let env = AxisEnvironment::new(&ss);
//! axes.calculate_rotation_matrix(&A1::j2000(), &env, false).unwrap();
//! assert!(axes.rot_matrix().is_rotation_matrix(1e-12));
//! ```

mod body_fixed;
mod inertial;
mod mean_of_date;
mod mean_of_epoch;
mod topocentric;

pub use body_fixed::BodyFixedAxes;
pub use inertial::InertialAxes;
pub use mean_of_date::MeanOfDateAxes;
pub use mean_of_epoch::MeanOfEpochAxes;
pub use topocentric::TopocentricAxes;

use astrodyn_core::Matrix3;
use astrodyn_time::A1;

use crate::coordinate_base::CoordinateBase;
use crate::eop::EopData;
use crate::solar_system::SolarSystem;
use crate::{FrameError, FrameResult, DEFAULT_UPDATE_INTERVAL};

/// Rotation to MJ2000Eq and its time derivative (1/s).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    pub matrix: Matrix3,
    pub matrix_dot: Matrix3,
}

impl Rotation {
    pub fn new(matrix: Matrix3, matrix_dot: Matrix3) -> Self {
        Self { matrix, matrix_dot }
    }

    /// A constant rotation.
    pub fn fixed(matrix: Matrix3) -> Self {
        Self::new(matrix, Matrix3::zeros())
    }

    pub fn identity() -> Self {
        Self::fixed(Matrix3::identity())
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Which fundamental plane a mean-of-J2000/date/epoch system uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferencePlane {
    Equator,
    Ecliptic,
}

/// Inputs an axis system reads from outside itself during a compute.
///
/// `body_fixed` carries the freshly computed rotation of the coordinate system
/// this one depends on (see [`RotationProvider::dependency`]); topocentric
/// axes fail without it.
#[derive(Debug, Clone, Copy)]
pub struct AxisEnvironment<'a> {
    pub solar_system: &'a SolarSystem,
    pub eop: Option<&'a EopData>,
    pub body_fixed: Option<&'a Rotation>,
}

impl<'a> AxisEnvironment<'a> {
    pub fn new(solar_system: &'a SolarSystem) -> Self {
        Self {
            solar_system,
            eop: None,
            body_fixed: None,
        }
    }

    pub fn with_eop(mut self, eop: Option<&'a EopData>) -> Self {
        self.eop = eop;
        self
    }

    pub fn with_body_fixed(mut self, rotation: Option<&'a Rotation>) -> Self {
        self.body_fixed = rotation;
        self
    }
}

/// Per-call context handed to a [`RotationProvider`].
pub struct AxisContext<'a> {
    pub base: &'a CoordinateBase,
    pub env: &'a AxisEnvironment<'a>,
    /// Seconds between precession refreshes.
    pub update_interval: f64,
    pub force: bool,
}

/// Behavior each axis variant supplies.
pub trait RotationProvider {
    /// Variant-specific checks once the base references are resolved. A
    /// returned rotation is stored as the current matrices.
    fn initialize(
        &mut self,
        _base: &CoordinateBase,
        _solar_system: &SolarSystem,
    ) -> FrameResult<Option<Rotation>> {
        Ok(None)
    }

    fn compute(&mut self, epoch: &A1, ctx: &AxisContext<'_>) -> FrameResult<Rotation>;

    /// True when the orientation is pinned to a reference epoch.
    fn uses_epoch(&self) -> bool {
        false
    }

    /// Coordinate system whose rotation must be computed first.
    fn dependency(&self) -> Option<&str> {
        None
    }
}

/// The concrete axis variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisKind {
    Inertial(InertialAxes),
    MeanOfDate(MeanOfDateAxes),
    MeanOfEpoch(MeanOfEpochAxes),
    BodyFixed(BodyFixedAxes),
    Topocentric(TopocentricAxes),
}

impl AxisKind {
    /// Script-style type name, e.g. `"MODEq"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Inertial(axes) => match axes.plane() {
                ReferencePlane::Equator => "MJ2000Eq",
                ReferencePlane::Ecliptic => "MJ2000Ec",
            },
            Self::MeanOfDate(axes) => match axes.plane() {
                ReferencePlane::Equator => "MODEq",
                ReferencePlane::Ecliptic => "MODEc",
            },
            Self::MeanOfEpoch(axes) => match axes.plane() {
                ReferencePlane::Equator => "MOEEq",
                ReferencePlane::Ecliptic => "MOEEc",
            },
            Self::BodyFixed(_) => "BodyFixed",
            Self::Topocentric(_) => "Topocentric",
        }
    }

    fn provider(&self) -> &dyn RotationProvider {
        match self {
            Self::Inertial(axes) => axes,
            Self::MeanOfDate(axes) => axes,
            Self::MeanOfEpoch(axes) => axes,
            Self::BodyFixed(axes) => axes,
            Self::Topocentric(axes) => axes,
        }
    }

    fn provider_mut(&mut self) -> &mut dyn RotationProvider {
        match self {
            Self::Inertial(axes) => axes,
            Self::MeanOfDate(axes) => axes,
            Self::MeanOfEpoch(axes) => axes,
            Self::BodyFixed(axes) => axes,
            Self::Topocentric(axes) => axes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSystem {
    base: CoordinateBase,
    kind: AxisKind,
    rotation: Rotation,
    epoch: Option<A1>,
    update_interval: f64,
    override_origin_interval: bool,
    update_interval_to_use: f64,
    initialized: bool,
}

impl AxisSystem {
    pub fn new(instance_name: &str, origin_name: &str, kind: AxisKind) -> Self {
        Self {
            base: CoordinateBase::new(instance_name, origin_name),
            kind,
            rotation: Rotation::identity(),
            epoch: None,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            override_origin_interval: true,
            update_interval_to_use: DEFAULT_UPDATE_INTERVAL,
            initialized: false,
        }
    }

    pub fn mj2000_eq(instance_name: &str, origin_name: &str) -> Self {
        Self::new(
            instance_name,
            origin_name,
            AxisKind::Inertial(InertialAxes::new(ReferencePlane::Equator)),
        )
    }

    pub fn mj2000_ec(instance_name: &str, origin_name: &str) -> Self {
        Self::new(
            instance_name,
            origin_name,
            AxisKind::Inertial(InertialAxes::new(ReferencePlane::Ecliptic)),
        )
    }

    pub fn mod_eq(instance_name: &str, origin_name: &str) -> Self {
        Self::new(
            instance_name,
            origin_name,
            AxisKind::MeanOfDate(MeanOfDateAxes::new(ReferencePlane::Equator)),
        )
    }

    pub fn mod_ec(instance_name: &str, origin_name: &str) -> Self {
        Self::new(
            instance_name,
            origin_name,
            AxisKind::MeanOfDate(MeanOfDateAxes::new(ReferencePlane::Ecliptic)),
        )
    }

    pub fn moe_eq(instance_name: &str, origin_name: &str, reference_epoch: A1) -> Self {
        Self::new(
            instance_name,
            origin_name,
            AxisKind::MeanOfEpoch(MeanOfEpochAxes::new(ReferencePlane::Equator, reference_epoch)),
        )
    }

    pub fn moe_ec(instance_name: &str, origin_name: &str, reference_epoch: A1) -> Self {
        Self::new(
            instance_name,
            origin_name,
            AxisKind::MeanOfEpoch(MeanOfEpochAxes::new(ReferencePlane::Ecliptic, reference_epoch)),
        )
    }

    pub fn body_fixed(instance_name: &str, origin_name: &str) -> Self {
        Self::new(instance_name, origin_name, AxisKind::BodyFixed(BodyFixedAxes::new()))
    }

    pub fn topocentric(instance_name: &str, origin_name: &str) -> Self {
        Self::new(instance_name, origin_name, AxisKind::Topocentric(TopocentricAxes::new()))
    }

    pub fn base(&self) -> &CoordinateBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut CoordinateBase {
        &mut self.base
    }

    pub fn kind(&self) -> &AxisKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn instance_name(&self) -> &str {
        self.base.instance_name()
    }

    pub fn rot_matrix(&self) -> &Matrix3 {
        &self.rotation.matrix
    }

    pub fn rot_dot_matrix(&self) -> &Matrix3 {
        &self.rotation.matrix_dot
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Epoch of the last computation.
    pub fn epoch(&self) -> Option<A1> {
        self.epoch
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn uses_epoch(&self) -> bool {
        self.kind.provider().uses_epoch()
    }

    pub fn dependency(&self) -> Option<&str> {
        self.kind.provider().dependency()
    }

    pub fn update_interval(&self) -> f64 {
        self.update_interval
    }

    pub fn set_update_interval(&mut self, seconds: f64) {
        self.update_interval = seconds;
    }

    pub fn override_origin_interval(&self) -> bool {
        self.override_origin_interval
    }

    pub fn set_override_origin_interval(&mut self, flag: bool) {
        self.override_origin_interval = flag;
    }

    /// Interval in effect since the last [`initialize`](Self::initialize).
    pub fn update_interval_to_use(&self) -> f64 {
        self.update_interval_to_use
    }

    pub fn set_solar_system(&mut self, ss: &mut SolarSystem) -> bool {
        self.base.set_solar_system(ss)
    }

    /// Validates references and prepares the variant for computation.
    pub fn initialize(&mut self, ss: &SolarSystem) -> FrameResult<()> {
        self.initialized = false;
        self.base.initialize()?;

        self.update_interval_to_use = if self.override_origin_interval {
            self.base
                .origin()
                .and_then(|id| ss.body(id))
                .map(|body| body.nutation_update_interval)
                .unwrap_or(self.update_interval)
        } else {
            self.update_interval
        };

        if let Some(rotation) = self.kind.provider_mut().initialize(&self.base, ss)? {
            self.rotation = rotation;
        }
        self.epoch = None;
        self.initialized = true;
        Ok(())
    }

    /// Brings the rotation up to date for `epoch`.
    ///
    /// A repeated epoch is a no-op unless `force` is set. Topocentric axes
    /// always recompute because the body-fixed rotation they read may have
    /// moved.
    pub fn calculate_rotation_matrix(
        &mut self,
        epoch: &A1,
        env: &AxisEnvironment<'_>,
        force: bool,
    ) -> FrameResult<()> {
        if !self.initialized {
            return Err(FrameError::configuration(
                self.base.instance_name(),
                "axis system used before initialization",
            ));
        }

        let always = matches!(self.kind, AxisKind::Topocentric(_));
        if !force && !always && self.epoch.as_ref() == Some(epoch) {
            return Ok(());
        }

        let ctx = AxisContext {
            base: &self.base,
            env,
            update_interval: self.update_interval_to_use,
            force,
        };
        self.rotation = self.kind.provider_mut().compute(epoch, &ctx)?;
        self.epoch = Some(*epoch);

        log::trace!("{} ({}) rotation at {}", self.base.instance_name(), self.type_name(), epoch);
        Ok(())
    }
}

/// Serializable description of an axis system.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum AxesConfig {
    MJ2000Eq,
    MJ2000Ec,
    MODEq,
    MODEc,
    /// Reference epoch as an A1 Modified Julian date (JD 2430000.0 based).
    MOEEq { epoch: f64 },
    MOEEc { epoch: f64 },
    BodyFixed,
    Topocentric,
}

impl AxesConfig {
    pub fn build(&self, instance_name: &str, origin_name: &str) -> AxisSystem {
        match *self {
            Self::MJ2000Eq => AxisSystem::mj2000_eq(instance_name, origin_name),
            Self::MJ2000Ec => AxisSystem::mj2000_ec(instance_name, origin_name),
            Self::MODEq => AxisSystem::mod_eq(instance_name, origin_name),
            Self::MODEc => AxisSystem::mod_ec(instance_name, origin_name),
            Self::MOEEq { epoch } => {
                AxisSystem::moe_eq(instance_name, origin_name, A1::from_gmat_mjd(epoch))
            }
            Self::MOEEc { epoch } => {
                AxisSystem::moe_ec(instance_name, origin_name, A1::from_gmat_mjd(epoch))
            }
            Self::BodyFixed => AxisSystem::body_fixed(instance_name, origin_name),
            Self::Topocentric => AxisSystem::topocentric(instance_name, origin_name),
        }
    }
}
