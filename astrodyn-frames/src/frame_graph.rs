//! Dependency-ordered evaluation of a set of coordinate systems.
//!
//! Topocentric axes read the rotation of their point's body-fixed system, so
//! that system has to be computed first at every epoch. [`FrameGraph`] owns
//! the coordinate systems, resolves those dependencies once at
//! [`initialize`](FrameGraph::initialize) into a topological order, and
//! computes in that order, handing each system the rotation it depends on.
//!
//! ```
//! use astrodyn_frames::{
//!     AxisSystem, BodyFixedPoint, CoordinateSystem, FrameGraph, SolarSystem, StateVector,
//!     Vector3, A1,
//! };
//!
//! let mut ss = SolarSystem::with_default_bodies();
//! ss.add_body_fixed_point("Pad", BodyFixedPoint::geodetic("Earth", 28.5, -80.6, 0.0));
//!
//! let mut graph = FrameGraph::new();
//! graph.add(CoordinateSystem::new("PadTopo", "Pad", AxisSystem::topocentric("PadTopo", "Pad")));
//! graph.add(CoordinateSystem::new("EarthFixed", "Earth", AxisSystem::body_fixed("EarthFixed", "Earth")));
//! graph.ensure_mj2000eq("Earth");
//! graph.initialize(&mut ss).unwrap();
//!
//! let up = StateVector::from_position(Vector3::new(0.0, 0.0, 1.0));
//! let epoch = A1::from_gmat_mjd(25000.0);
//! let inertial = graph.convert(&up, &epoch, "PadTopo", "EarthMJ2000Eq", &ss).unwrap();
//! assert!(inertial.position.magnitude() > 6300.0);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::axes::{AxisEnvironment, Rotation};
use crate::coordinate_system::CoordinateSystem;
use crate::eop::EopData;
use crate::solar_system::{SolarSystem, SpacePointData};
use crate::state::StateVector;
use crate::{FrameError, FrameResult, A1};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateSystemId(usize);

impl CoordinateSystemId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FrameGraph {
    systems: Vec<CoordinateSystem>,
    by_name: HashMap<String, CoordinateSystemId>,
    dependencies: Vec<Option<CoordinateSystemId>>,
    order: Vec<CoordinateSystemId>,
    eop: Option<Arc<EopData>>,
    initialized: bool,
}

impl FrameGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces (by name) a coordinate system.
    pub fn add(&mut self, cs: CoordinateSystem) -> CoordinateSystemId {
        self.initialized = false;
        if let Some(&id) = self.by_name.get(cs.name()) {
            self.systems[id.0] = cs;
            return id;
        }
        let id = CoordinateSystemId(self.systems.len());
        self.by_name.insert(cs.name().to_string(), id);
        self.systems.push(cs);
        id
    }

    /// Returns `"<body>MJ2000Eq"`, creating it when absent.
    pub fn ensure_mj2000eq(&mut self, body: &str) -> CoordinateSystemId {
        let name = format!("{}MJ2000Eq", body);
        match self.by_name.get(&name) {
            Some(&id) => id,
            None => {
                log::debug!("creating coordinate system {}", name);
                self.add(CoordinateSystem::mj2000_eq(body))
            }
        }
    }

    pub fn set_eop(&mut self, eop: Option<Arc<EopData>>) {
        self.eop = eop;
    }

    pub fn eop(&self) -> Option<&EopData> {
        self.eop.as_deref()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<CoordinateSystemId> {
        self.by_name.get(name).copied()
    }

    pub fn system(&self, id: CoordinateSystemId) -> Option<&CoordinateSystem> {
        self.systems.get(id.0)
    }

    pub fn system_mut(&mut self, id: CoordinateSystemId) -> Option<&mut CoordinateSystem> {
        self.initialized = false;
        self.systems.get_mut(id.0)
    }

    pub fn system_by_name(&self, name: &str) -> Option<&CoordinateSystem> {
        self.system(self.get(name)?)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|cs| cs.name())
    }

    /// Evaluation order from the last initialization.
    pub fn order(&self) -> &[CoordinateSystemId] {
        &self.order
    }

    fn require(&self, name: &str) -> FrameResult<CoordinateSystemId> {
        self.get(name).ok_or_else(|| {
            FrameError::configuration(name, "coordinate system is not defined")
        })
    }

    /// Resolves every system against `ss` and fixes the evaluation order.
    ///
    /// # Errors
    ///
    /// The first system that fails its own initialization, a dependency on a
    /// system not in the graph, or a dependency cycle.
    pub fn initialize(&mut self, ss: &mut SolarSystem) -> FrameResult<()> {
        self.initialized = false;
        for cs in &mut self.systems {
            cs.set_solar_system(ss);
        }
        for cs in &mut self.systems {
            cs.initialize(ss)?;
        }

        let mut dependencies = Vec::with_capacity(self.systems.len());
        for cs in &self.systems {
            let dependency = match cs.axes().dependency() {
                Some(name) => Some(self.get(name).ok_or_else(|| {
                    FrameError::configuration(
                        cs.name(),
                        format!("depends on undefined coordinate system \"{}\"", name),
                    )
                })?),
                None => None,
            };
            dependencies.push(dependency);
        }

        self.order = topological_order(&dependencies).map_err(|start| FrameError::DependencyCycle {
            systems: self.cycle_from(&dependencies, start),
        })?;
        self.dependencies = dependencies;
        self.initialized = true;

        log::debug!(
            "frame graph order: {}",
            self.order
                .iter()
                .map(|id| self.systems[id.0].name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(())
    }

    fn cycle_from(&self, dependencies: &[Option<CoordinateSystemId>], start: CoordinateSystemId) -> Vec<String> {
        let mut path = vec![start];
        let mut current = start;
        while let Some(next) = dependencies[current.0] {
            if let Some(pos) = path.iter().position(|&id| id == next) {
                let mut cycle: Vec<String> = path[pos..]
                    .iter()
                    .map(|id| self.systems[id.0].name().to_string())
                    .collect();
                cycle.push(self.systems[next.0].name().to_string());
                return cycle;
            }
            path.push(next);
            current = next;
        }
        path.iter().map(|id| self.systems[id.0].name().to_string()).collect()
    }

    /// Computes every system's rotation at `epoch`, dependencies first.
    pub fn compute(&mut self, epoch: &A1, ss: &SolarSystem, force: bool) -> FrameResult<()> {
        if !self.initialized {
            return Err(FrameError::configuration(
                "FrameGraph",
                "compute called before initialize",
            ));
        }

        for &id in &self.order {
            let dependency = self.dependencies[id.0].map(|dep| *self.systems[dep.0].axes().rotation());
            let env = AxisEnvironment::new(ss)
                .with_eop(self.eop.as_deref())
                .with_body_fixed(dependency.as_ref());
            self.systems[id.0].calculate_rotation_matrix(epoch, &env, force)?;
        }
        Ok(())
    }

    /// Last computed rotation of `name` to MJ2000Eq.
    pub fn rotation_to_mj2000eq(&self, name: &str) -> FrameResult<Rotation> {
        let id = self.require(name)?;
        Ok(*self.systems[id.0].axes().rotation())
    }

    /// Rotation taking axes of `from` into axes of `to`.
    ///
    /// ```text
    /// R = R_toᵀ R_from
    /// Ṙ = Ṙ_toᵀ R_from + R_toᵀ Ṙ_from
    /// ```
    pub fn rotation_between(&self, from: &str, to: &str) -> FrameResult<Rotation> {
        let from = self.rotation_to_mj2000eq(from)?;
        let to = self.rotation_to_mj2000eq(to)?;
        let to_t = to.matrix.transpose();
        Ok(Rotation::new(
            to_t * from.matrix,
            to.matrix_dot.transpose() * from.matrix + to_t * from.matrix_dot,
        ))
    }

    /// Origin of `name` relative to the J2000 body, in MJ2000Eq axes.
    ///
    /// A body-fixed point rides on its central body, rotated by its body-fixed
    /// system, which must be part of this graph.
    pub fn origin_state(&self, name: &str, ss: &SolarSystem) -> FrameResult<StateVector> {
        let id = self.require(name)?;
        let cs = &self.systems[id.0];
        let origin = cs.origin().ok_or_else(|| {
            FrameError::configuration(cs.name(), format!("origin \"{}\" has not been set", cs.origin_name()))
        })?;
        let point = ss.point(origin).ok_or_else(|| {
            FrameError::configuration(cs.name(), format!("origin \"{}\" is not in the solar system", cs.origin_name()))
        })?;

        match point.data() {
            SpacePointData::CelestialBody(body) => Ok(body.mj2000_state),
            SpacePointData::BodyFixedPoint(bfp) => {
                let central = ss.body_by_name(&bfp.central_body).ok_or_else(|| {
                    FrameError::configuration(
                        cs.name(),
                        format!("central body \"{}\" is not available", bfp.central_body),
                    )
                })?;
                let rotation = self.rotation_to_mj2000eq(&bfp.body_fixed_cs)?;
                let location = bfp.body_fixed_location(central.equatorial_radius, central.flattening);
                Ok(central.mj2000_state
                    + StateVector::new(rotation.matrix * location, rotation.matrix_dot * location))
            }
        }
    }

    /// Converts `state` from `from` to `to` at `epoch`.
    pub fn convert(
        &mut self,
        state: &StateVector,
        epoch: &A1,
        from: &str,
        to: &str,
        ss: &SolarSystem,
    ) -> FrameResult<StateVector> {
        let from_id = self.require(from)?;
        let to_id = self.require(to)?;
        self.compute(epoch, ss, false)?;

        let inertial = self.systems[from_id.0].to_mj2000eq(state, &self.origin_state(from, ss)?);
        Ok(self.systems[to_id.0].from_mj2000eq(&inertial, &self.origin_state(to, ss)?))
    }
}

/// Kahn's algorithm over single-parent dependencies. On a cycle, returns a
/// node left unsorted.
fn topological_order(
    dependencies: &[Option<CoordinateSystemId>],
) -> Result<Vec<CoordinateSystemId>, CoordinateSystemId> {
    let n = dependencies.len();
    let mut in_degree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, dep) in dependencies.iter().enumerate() {
        if let Some(dep) = dep {
            in_degree[i] += 1;
            dependents[dep.0].push(i);
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(i) = queue.pop_front() {
        order.push(CoordinateSystemId(i));
        for &j in &dependents[i] {
            in_degree[j] -= 1;
            if in_degree[j] == 0 {
                queue.push_back(j);
            }
        }
    }

    if order.len() == n {
        Ok(order)
    } else {
        let stuck = (0..n).find(|&i| in_degree[i] > 0).unwrap_or(0);
        Err(CoordinateSystemId(stuck))
    }
}
