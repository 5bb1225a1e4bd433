//! Origin and J2000-body bookkeeping shared by coordinate and axis systems.
//!
//! A [`CoordinateBase`] names two space points, its origin and its J2000 body,
//! and resolves them to [`SpacePointId`]s once a [`SolarSystem`] is supplied.
//! Resolution happens in [`set_solar_system`](CoordinateBase::set_solar_system)
//! or through the reference-object protocol
//! ([`ref_object_names`](CoordinateBase::ref_object_names) /
//! [`set_ref_object`](CoordinateBase::set_ref_object)) an external wiring pass
//! drives.

use crate::solar_system::{SolarSystem, SolarSystemId, SpacePointId};
use crate::{FrameError, FrameResult, DEFAULT_J2000_BODY};

/// Categories of objects exchanged through the reference-object protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefObjectType {
    SpacePoint,
    CelestialBody,
    CoordinateSystem,
    Unknown,
}

impl RefObjectType {
    fn is_space_point(&self) -> bool {
        matches!(self, Self::SpacePoint | Self::CelestialBody)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateBase {
    instance_name: String,
    origin_name: String,
    j2000_body_name: String,
    origin: Option<SpacePointId>,
    j2000_body: Option<SpacePointId>,
    solar_system: Option<SolarSystemId>,
}

impl CoordinateBase {
    /// Unresolved base with the J2000 body defaulting to Earth.
    pub fn new(instance_name: &str, origin_name: &str) -> Self {
        Self {
            instance_name: instance_name.to_string(),
            origin_name: origin_name.to_string(),
            j2000_body_name: DEFAULT_J2000_BODY.to_string(),
            origin: None,
            j2000_body: None,
            solar_system: None,
        }
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn origin_name(&self) -> &str {
        &self.origin_name
    }

    pub fn j2000_body_name(&self) -> &str {
        &self.j2000_body_name
    }

    pub fn origin(&self) -> Option<SpacePointId> {
        self.origin
    }

    pub fn j2000_body(&self) -> Option<SpacePointId> {
        self.j2000_body
    }

    pub fn solar_system(&self) -> Option<SolarSystemId> {
        self.solar_system
    }

    pub fn set_instance_name(&mut self, name: &str) {
        self.instance_name = name.to_string();
    }

    /// Renames the origin; the old binding is dropped until the next resolution.
    pub fn set_origin_name(&mut self, name: &str) {
        if self.origin_name != name {
            self.origin_name = name.to_string();
            self.origin = None;
        }
    }

    pub fn set_j2000_body_name(&mut self, name: &str) {
        if self.j2000_body_name != name {
            self.j2000_body_name = name.to_string();
            self.j2000_body = None;
        }
    }

    /// Binds the origin directly, bypassing name lookup.
    pub fn set_origin(&mut self, id: SpacePointId) {
        self.origin = Some(id);
    }

    pub fn set_j2000_body(&mut self, id: SpacePointId) {
        self.j2000_body = Some(id);
    }

    /// Resolves the origin and J2000 body against `ss`.
    ///
    /// Returns `false` when `ss` is the registry already held; bound
    /// references are then left alone and only names cleared by a rename are
    /// looked up again. Names that cannot be found leave the binding empty for
    /// later resolution. When the resolved origin itself requires a J2000 body,
    /// that binding is resolved on the origin as well.
    pub fn set_solar_system(&mut self, ss: &mut SolarSystem) -> bool {
        if self.solar_system == Some(ss.id()) {
            if self.origin.is_none() {
                self.origin = ss.get_body(&self.origin_name);
                self.fix_up_origin(ss);
            }
            if self.j2000_body.is_none() {
                self.j2000_body = ss.get_body(&self.j2000_body_name);
            }
            return false;
        }

        self.solar_system = Some(ss.id());
        self.origin = ss.get_body(&self.origin_name);
        self.j2000_body = ss.get_body(&self.j2000_body_name);
        self.fix_up_origin(ss);

        log::trace!(
            "{}: origin {:?} ({}), J2000 body {:?} ({})",
            self.instance_name,
            self.origin,
            self.origin_name,
            self.j2000_body,
            self.j2000_body_name
        );
        true
    }

    fn fix_up_origin(&self, ss: &mut SolarSystem) {
        if let Some(origin_id) = self.origin {
            let required = ss
                .point(origin_id)
                .map(|p| p.j2000_body_name().to_string())
                .unwrap_or_default();
            if !required.is_empty() {
                let resolved = ss.get_body(&required);
                if let Some(origin) = ss.point_mut(origin_id) {
                    origin.set_j2000_body(resolved);
                }
            }
        }
    }

    /// Fails naming the first unset reference.
    pub fn initialize(&self) -> FrameResult<()> {
        check_references(
            &self.instance_name,
            &[
                ("solar system", self.solar_system.is_some()),
                (&format!("origin \"{}\"", self.origin_name), self.origin.is_some()),
                (
                    &format!("J2000 body \"{}\"", self.j2000_body_name),
                    self.j2000_body.is_some(),
                ),
            ],
        )
    }

    /// Resolved origin, or a configuration error naming it.
    pub fn require_origin(&self) -> FrameResult<SpacePointId> {
        self.origin.ok_or_else(|| {
            FrameError::configuration(
                &self.instance_name,
                format!("origin \"{}\" has not been set", self.origin_name),
            )
        })
    }

    /// Names this object needs bound, without duplicates.
    pub fn ref_object_names(&self, object_type: RefObjectType) -> Vec<String> {
        match object_type {
            RefObjectType::SpacePoint | RefObjectType::CelestialBody | RefObjectType::Unknown => {
                let mut names = vec![self.origin_name.clone()];
                if self.j2000_body_name != self.origin_name {
                    names.push(self.j2000_body_name.clone());
                }
                names
            }
            RefObjectType::CoordinateSystem => Vec::new(),
        }
    }

    /// Binds a reference object by name. Returns `false` only when `object` is `None`.
    pub fn set_ref_object(
        &mut self,
        object: Option<SpacePointId>,
        object_type: RefObjectType,
        name: &str,
        ss: &mut SolarSystem,
    ) -> bool {
        let Some(id) = object else {
            return false;
        };

        if !object_type.is_space_point() {
            return true;
        }

        if name == self.origin_name {
            self.origin = Some(id);
        }
        if name == self.j2000_body_name {
            self.j2000_body = Some(id);
        }

        if let Some(origin) = self.origin.and_then(|o| ss.point_mut(o)) {
            if origin.j2000_body_name() == name {
                origin.set_j2000_body(Some(id));
            }
        }

        true
    }
}

/// Shared precondition check: each `(description, present)` pair must hold.
pub fn check_references(instance: &str, references: &[(&str, bool)]) -> FrameResult<()> {
    for (description, present) in references {
        if !present {
            return Err(FrameError::configuration(
                instance,
                format!("{} has not been set", description),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar_system::{BodyFixedPoint, CelestialBody};

    #[test]
    fn test_set_solar_system_resolves_names() {
        let mut ss = SolarSystem::with_default_bodies();
        let mut base = CoordinateBase::new("LunaMJ2000Eq", "Luna");
        assert!(base.set_solar_system(&mut ss));
        assert_eq!(base.origin(), ss.get_body("Luna"));
        assert_eq!(base.j2000_body(), ss.get_body("Earth"));
        assert!(base.initialize().is_ok());
    }

    #[test]
    fn test_set_solar_system_is_idempotent() {
        let mut ss = SolarSystem::with_default_bodies();
        let mut base = CoordinateBase::new("EarthMJ2000Eq", "Earth");
        base.set_solar_system(&mut ss);

        let sun = ss.get_body("Sun").unwrap();
        base.set_origin(sun);
        assert!(!base.set_solar_system(&mut ss));
        assert_eq!(base.origin(), Some(sun));
    }

    #[test]
    fn test_transitive_j2000_fixup() {
        let mut ss = SolarSystem::with_default_bodies();
        let pad = ss.add_body_fixed_point("Pad", BodyFixedPoint::geodetic("Earth", 28.5, -80.6, 0.0));
        assert_eq!(ss.point(pad).unwrap().j2000_body(), None);

        let mut base = CoordinateBase::new("PadTopo", "Pad");
        base.set_solar_system(&mut ss);
        assert_eq!(ss.point(pad).unwrap().j2000_body(), ss.get_body("Earth"));
    }

    #[test]
    fn test_unresolved_origin_fails_initialize() {
        let mut ss = SolarSystem::with_default_bodies();
        let mut base = CoordinateBase::new("PlutoMJ2000Eq", "Pluto");
        base.set_solar_system(&mut ss);
        let err = base.initialize().unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("PlutoMJ2000Eq"));
        assert!(err.to_string().contains("Pluto"));
    }

    #[test]
    fn test_missing_solar_system_named_first() {
        let base = CoordinateBase::new("EarthMJ2000Eq", "Earth");
        let err = base.initialize().unwrap_err();
        assert!(err.to_string().contains("solar system"));
    }

    #[test]
    fn test_ref_object_names_deduplicated() {
        let base = CoordinateBase::new("EarthMJ2000Eq", "Earth");
        assert_eq!(base.ref_object_names(RefObjectType::SpacePoint), vec!["Earth"]);

        let base = CoordinateBase::new("LunaMJ2000Eq", "Luna");
        assert_eq!(
            base.ref_object_names(RefObjectType::Unknown),
            vec!["Luna", "Earth"]
        );
        assert!(base.ref_object_names(RefObjectType::CoordinateSystem).is_empty());
    }

    #[test]
    fn test_set_ref_object_binds_by_name() {
        let mut ss = SolarSystem::with_default_bodies();
        let mut base = CoordinateBase::new("LunaMJ2000Eq", "Luna");
        assert!(!base.set_ref_object(None, RefObjectType::SpacePoint, "Luna", &mut ss));

        let luna = ss.get_body("Luna").unwrap();
        let earth = ss.get_body("Earth").unwrap();
        assert!(base.set_ref_object(Some(luna), RefObjectType::CelestialBody, "Luna", &mut ss));
        assert!(base.set_ref_object(Some(earth), RefObjectType::SpacePoint, "Earth", &mut ss));
        assert_eq!(base.origin(), Some(luna));
        assert_eq!(base.j2000_body(), Some(earth));
        assert_eq!(ss.point(luna).unwrap().j2000_body(), Some(earth));
    }

    #[test]
    fn test_rename_clears_binding() {
        let mut ss = SolarSystem::new();
        ss.add_body("Earth", CelestialBody::earth());
        let mut base = CoordinateBase::new("X", "Earth");
        base.set_solar_system(&mut ss);
        base.set_origin_name("Mars");
        assert_eq!(base.origin(), None);
        assert_eq!(base.origin_name(), "Mars");
    }

    #[test]
    fn test_renamed_origin_resolves_against_same_registry() {
        let mut ss = SolarSystem::with_default_bodies();
        let mut base = CoordinateBase::new("X", "Earth");
        base.set_solar_system(&mut ss);
        base.set_origin_name("Luna");
        assert!(!base.set_solar_system(&mut ss));
        assert_eq!(base.origin(), ss.get_body("Luna"));
        assert_eq!(base.j2000_body(), ss.get_body("Earth"));
    }
}
