use crate::axes::{AxesConfig, AxisEnvironment, AxisSystem};
use crate::coordinate_base::{CoordinateBase, RefObjectType};
use crate::solar_system::{SolarSystem, SpacePointId};
use crate::state::StateVector;
use crate::{FrameResult, A1};

/// An origin plus a set of axes.
///
/// The origin and J2000 body live in the axes' [`CoordinateBase`]; this type
/// only adds the state conversions. States are converted to and from MJ2000Eq
/// axes with the rotation the axes last computed; the origin offset is
/// supplied by the caller (see [`FrameGraph`](crate::FrameGraph) for a
/// version that resolves it).
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSystem {
    axes: AxisSystem,
}

impl CoordinateSystem {
    /// The axes are renamed to `name` and re-pointed at `origin_name`. Their
    /// J2000 body, update settings and any binding that still applies are kept.
    pub fn new(name: &str, origin_name: &str, axes: AxisSystem) -> Self {
        let mut axes = axes;
        let base = axes.base_mut();
        base.set_instance_name(name);
        base.set_origin_name(origin_name);
        Self { axes }
    }

    /// `"<body>MJ2000Eq"` centered on `body`.
    pub fn mj2000_eq(body: &str) -> Self {
        let name = format!("{}MJ2000Eq", body);
        Self::new(&name, body, AxisSystem::mj2000_eq(&name, body))
    }

    pub fn name(&self) -> &str {
        self.base().instance_name()
    }

    pub fn origin_name(&self) -> &str {
        self.base().origin_name()
    }

    pub fn origin(&self) -> Option<SpacePointId> {
        self.base().origin()
    }

    pub fn base(&self) -> &CoordinateBase {
        self.axes.base()
    }

    pub fn axes(&self) -> &AxisSystem {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut AxisSystem {
        &mut self.axes
    }

    pub fn set_origin_name(&mut self, name: &str) {
        self.axes.base_mut().set_origin_name(name);
    }

    pub fn set_j2000_body_name(&mut self, name: &str) {
        self.axes.base_mut().set_j2000_body_name(name);
    }

    pub fn set_solar_system(&mut self, ss: &mut SolarSystem) -> bool {
        self.axes.set_solar_system(ss)
    }

    pub fn ref_object_names(&self, object_type: RefObjectType) -> Vec<String> {
        self.base().ref_object_names(object_type)
    }

    pub fn set_ref_object(
        &mut self,
        object: Option<SpacePointId>,
        object_type: RefObjectType,
        name: &str,
        ss: &mut SolarSystem,
    ) -> bool {
        self.axes.base_mut().set_ref_object(object, object_type, name, ss)
    }

    pub fn initialize(&mut self, ss: &SolarSystem) -> FrameResult<()> {
        self.axes.initialize(ss)
    }

    pub fn calculate_rotation_matrix(
        &mut self,
        epoch: &A1,
        env: &AxisEnvironment<'_>,
        force: bool,
    ) -> FrameResult<()> {
        self.axes.calculate_rotation_matrix(epoch, env, force)
    }

    /// State in this system to MJ2000Eq axes about the J2000 body.
    ///
    /// `origin_state` is this system's origin relative to the J2000 body in
    /// MJ2000Eq axes.
    ///
    /// ```text
    /// r' = R r + r_o
    /// v' = Ṙ r + R v + v_o
    /// ```
    pub fn to_mj2000eq(&self, state: &StateVector, origin_state: &StateVector) -> StateVector {
        let r = self.axes.rot_matrix();
        let r_dot = self.axes.rot_dot_matrix();
        StateVector::new(
            r * state.position + origin_state.position,
            r_dot * state.position + r * state.velocity + origin_state.velocity,
        )
    }

    /// Inverse of [`to_mj2000eq`](Self::to_mj2000eq).
    ///
    /// ```text
    /// r = Rᵀ (r' − r_o)
    /// v = Rᵀ (v' − v_o) + Ṙᵀ (r' − r_o)
    /// ```
    pub fn from_mj2000eq(&self, state: &StateVector, origin_state: &StateVector) -> StateVector {
        let r_t = self.axes.rot_matrix().transpose();
        let r_dot_t = self.axes.rot_dot_matrix().transpose();
        let relative = *state - *origin_state;
        StateVector::new(
            r_t * relative.position,
            r_t * relative.velocity + r_dot_t * relative.position,
        )
    }
}

/// Serializable description of a coordinate system.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateSystemConfig {
    pub name: String,
    pub origin: String,
    pub axes: AxesConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub j2000_body: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub update_interval: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub override_origin_interval: Option<bool>,
}

impl CoordinateSystemConfig {
    pub fn new(name: &str, origin: &str, axes: AxesConfig) -> Self {
        Self {
            name: name.to_string(),
            origin: origin.to_string(),
            axes,
            j2000_body: None,
            update_interval: None,
            override_origin_interval: None,
        }
    }

    pub fn build(&self) -> CoordinateSystem {
        let mut cs = CoordinateSystem::new(&self.name, &self.origin, self.axes.build(&self.name, &self.origin));
        if let Some(body) = &self.j2000_body {
            cs.set_j2000_body_name(body);
        }
        if let Some(interval) = self.update_interval {
            cs.axes_mut().set_update_interval(interval);
        }
        if let Some(flag) = self.override_origin_interval {
            cs.axes_mut().set_override_origin_interval(flag);
        }
        cs
    }
}

impl From<&CoordinateSystemConfig> for CoordinateSystem {
    fn from(config: &CoordinateSystemConfig) -> Self {
        config.build()
    }
}
