use astrodyn_frames::{CoordinateSystemId, FrameGraph, SolarSystem, SolarSystemId, SpacePointId};
use astrodyn_time::A1;

use crate::model::PhysicalModel;
use crate::{GravityError, GravityResult, Vector3};

const MIN_RADIUS: f64 = 1.0e-6;

/// Newtonian attraction of one body.
///
/// About the force origin this is the central term `-μ r / |r|³`. For any
/// other body it is the third-body perturbation relative to the origin:
///
/// ```text
/// a = μ ((s − r) / |s − r|³ − s / |s|³)
/// ```
///
/// with `s` the body's position relative to the origin.
#[derive(Debug, Clone)]
pub struct PointMassForce {
    name: String,
    body_name: String,
    force_origin: String,
    mu: Option<f64>,
    input_cs_name: String,
    target_cs_name: String,
    input_cs: Option<CoordinateSystemId>,
    target_cs: Option<CoordinateSystemId>,
    solar_system: Option<SolarSystemId>,
    body: Option<SpacePointId>,
    origin: Option<SpacePointId>,
    initialized: bool,
}

impl PointMassForce {
    /// `body` attracting about itself until [`set_force_origin`](PhysicalModel::set_force_origin).
    pub fn new(name: &str, body_name: &str) -> Self {
        let inertial = format!("{}MJ2000Eq", body_name);
        Self {
            name: name.to_string(),
            body_name: body_name.to_string(),
            force_origin: body_name.to_string(),
            mu: None,
            input_cs_name: inertial.clone(),
            target_cs_name: inertial,
            input_cs: None,
            target_cs: None,
            solar_system: None,
            body: None,
            origin: None,
            initialized: false,
        }
    }

    /// Uses `mu` (km³/s²) instead of the body's value.
    pub fn with_mu(mut self, mu: f64) -> Self {
        self.mu = Some(mu);
        self
    }

    pub fn force_origin(&self) -> &str {
        &self.force_origin
    }

    pub fn is_third_body(&self) -> bool {
        self.force_origin != self.body_name
    }

    fn unresolved(&self, what: &str, name: &str) -> GravityError {
        GravityError::configuration(
            &self.name,
            format!("{} \"{}\" is not a celestial body in the solar system", what, name),
        )
    }
}

impl PhysicalModel for PointMassForce {
    fn name(&self) -> &str {
        &self.name
    }

    fn body_name(&self) -> &str {
        &self.body_name
    }

    fn set_force_origin(&mut self, body: &str) {
        self.force_origin = body.to_string();
        self.input_cs_name = format!("{}MJ2000Eq", body);
        self.target_cs_name = self.input_cs_name.clone();
        self.input_cs = None;
        self.target_cs = None;
        self.origin = None;
        self.initialized = false;
    }

    fn set_solar_system(&mut self, ss: &SolarSystem) {
        if self.solar_system == Some(ss.id()) {
            return;
        }
        self.solar_system = Some(ss.id());
        self.body = ss.get_body(&self.body_name);
        self.origin = ss.get_body(&self.force_origin);
        self.initialized = false;
    }

    fn ref_object_names(&self) -> Vec<String> {
        let mut names = vec![self.input_cs_name.clone()];
        if self.target_cs_name != self.input_cs_name {
            names.push(self.target_cs_name.clone());
        }
        names
    }

    fn set_ref_object(&mut self, id: Option<CoordinateSystemId>, name: &str) -> bool {
        let Some(id) = id else {
            return false;
        };
        let mut bound = false;
        if name == self.input_cs_name {
            self.input_cs = Some(id);
            bound = true;
        }
        if name == self.target_cs_name {
            self.target_cs = Some(id);
            bound = true;
        }
        bound
    }

    fn initialize(&mut self, ss: &SolarSystem) -> GravityResult<()> {
        self.initialized = false;
        if self.solar_system.is_none() {
            return Err(GravityError::configuration(&self.name, "solar system has not been set"));
        }

        let body = self.body.or_else(|| ss.get_body(&self.body_name));
        if body.and_then(|id| ss.body(id)).is_none() {
            return Err(self.unresolved("body", &self.body_name));
        }
        let origin = self.origin.or_else(|| ss.get_body(&self.force_origin));
        if origin.and_then(|id| ss.body(id)).is_none() {
            return Err(self.unresolved("force origin", &self.force_origin));
        }
        self.body = body;
        self.origin = origin;

        if self.input_cs.is_none() {
            return Err(GravityError::configuration(
                &self.name,
                format!("input coordinate system \"{}\" has not been set", self.input_cs_name),
            ));
        }
        if self.target_cs.is_none() {
            self.target_cs = self.input_cs;
            self.target_cs_name = self.input_cs_name.clone();
        }

        self.initialized = true;
        Ok(())
    }

    fn acceleration(
        &mut self,
        position: &Vector3,
        epoch: &A1,
        frames: &mut FrameGraph,
        ss: &SolarSystem,
    ) -> GravityResult<Vector3> {
        if !self.initialized {
            return Err(GravityError::configuration(
                &self.name,
                "acceleration requested before initialize",
            ));
        }
        let body = self
            .body
            .and_then(|id| ss.body(id))
            .ok_or_else(|| self.unresolved("body", &self.body_name))?;
        let mu = self.mu.unwrap_or(body.mu);

        frames.compute(epoch, ss, false)?;
        let r = frames.rotation_to_mj2000eq(&self.input_cs_name)?.matrix * *position;

        let inertial = if self.is_third_body() {
            let origin = self
                .origin
                .and_then(|id| ss.body(id))
                .ok_or_else(|| self.unresolved("force origin", &self.force_origin))?;
            let s = body.mj2000_state.position - origin.mj2000_state.position;
            let d = s - r;
            let d_mag = d.magnitude();
            let s_mag = s.magnitude();
            if d_mag < MIN_RADIUS || s_mag < MIN_RADIUS {
                return Err(GravityError::invalid_state(
                    &self.name,
                    format!("position coincides with {}", self.body_name),
                ));
            }
            d * (mu / (d_mag * d_mag * d_mag)) - s * (mu / (s_mag * s_mag * s_mag))
        } else {
            let r_mag = r.magnitude();
            if r_mag < MIN_RADIUS {
                return Err(GravityError::invalid_state(
                    &self.name,
                    format!("position is at the center of {}", self.body_name),
                ));
            }
            r * (-mu / (r_mag * r_mag * r_mag))
        };

        let to_target = frames.rotation_to_mj2000eq(&self.target_cs_name)?.matrix.transpose();
        Ok(to_target * inertial)
    }
}
