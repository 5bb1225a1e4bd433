//! The force-model interface and a summing container.
//!
//! Each model computes its acceleration contribution at a position expressed
//! in its input coordinate system and returns it in its target coordinate
//! system. Coordinate systems live in a [`FrameGraph`]; models hold only their
//! names and the handles bound through the reference-object protocol.

use astrodyn_frames::{CoordinateSystemId, FrameGraph, SolarSystem};
use astrodyn_time::A1;

use crate::{GravityResult, Vector3};

/// A contributor to the net acceleration on a spacecraft.
pub trait PhysicalModel {
    /// Instance name for diagnostics.
    fn name(&self) -> &str;

    /// Body whose field this model represents.
    fn body_name(&self) -> &str;

    /// Makes `body` the origin of integration; input and target coordinate
    /// systems follow it.
    fn set_force_origin(&mut self, body: &str);

    fn set_solar_system(&mut self, ss: &SolarSystem);

    /// Names of the coordinate systems this model needs bound.
    fn ref_object_names(&self) -> Vec<String>;

    /// Binds the coordinate system called `name`. Returns false when `id` is
    /// `None` or no reference uses `name`.
    fn set_ref_object(&mut self, id: Option<CoordinateSystemId>, name: &str) -> bool;

    fn initialize(&mut self, ss: &SolarSystem) -> GravityResult<()>;

    /// Acceleration (km/s²) at `position` (km, input coordinate system),
    /// expressed in the target coordinate system.
    fn acceleration(
        &mut self,
        position: &Vector3,
        epoch: &A1,
        frames: &mut FrameGraph,
        ss: &SolarSystem,
    ) -> GravityResult<Vector3>;

    fn is_enabled(&self) -> bool {
        true
    }

    /// Binds every referenced coordinate system found in `frames`, creating
    /// missing `"<Body>MJ2000Eq"` systems. Returns the names left unbound.
    ///
    /// The graph must be (re)initialized afterwards if anything was created.
    fn bind_coordinate_systems(&mut self, frames: &mut FrameGraph) -> Vec<String> {
        let mut unbound = Vec::new();
        for name in self.ref_object_names() {
            let id = match frames.get(&name) {
                Some(id) => Some(id),
                None => name
                    .strip_suffix("MJ2000Eq")
                    .filter(|body| !body.is_empty())
                    .map(|body| frames.ensure_mj2000eq(body)),
            };
            if !self.set_ref_object(id, &name) {
                unbound.push(name);
            }
        }
        unbound
    }
}

/// Sums the contributions of its enabled models.
#[derive(Default)]
pub struct ForceModelSet {
    models: Vec<Box<dyn PhysicalModel>>,
}

impl ForceModelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, model: Box<dyn PhysicalModel>) {
        log::debug!("adding force model: {}", model.name());
        self.models.push(model);
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn models(&self) -> impl Iterator<Item = &dyn PhysicalModel> {
        self.models.iter().map(|m| m.as_ref())
    }

    pub fn set_force_origin(&mut self, body: &str) {
        for model in &mut self.models {
            model.set_force_origin(body);
        }
    }

    /// Wires every model to `ss` and `frames`, then initializes the graph and
    /// the models.
    ///
    /// # Errors
    ///
    /// A coordinate system a model needs is missing, or any graph or model
    /// initialization fails.
    pub fn initialize(&mut self, ss: &mut SolarSystem, frames: &mut FrameGraph) -> GravityResult<()> {
        for model in &mut self.models {
            model.set_solar_system(ss);
            let unbound = model.bind_coordinate_systems(frames);
            if !unbound.is_empty() {
                return Err(crate::GravityError::configuration(
                    model.name(),
                    format!("coordinate systems not available: {}", unbound.join(", ")),
                ));
            }
        }
        frames.initialize(ss)?;
        for model in &mut self.models {
            model.initialize(ss)?;
        }
        Ok(())
    }

    /// Net acceleration; every model must share one target frame.
    pub fn acceleration(
        &mut self,
        position: &Vector3,
        epoch: &A1,
        frames: &mut FrameGraph,
        ss: &SolarSystem,
    ) -> GravityResult<Vector3> {
        let mut total = Vector3::zeros();
        for model in self.models.iter_mut().filter(|m| m.is_enabled()) {
            let contribution = model.acceleration(position, epoch, frames, ss)?;
            log::trace!("{}: {}", model.name(), contribution);
            total += contribution;
        }
        Ok(total)
    }
}
