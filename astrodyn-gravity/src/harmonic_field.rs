//! Spherical-harmonic gravity of one body.
//!
//! The satellite position arrives in the input coordinate system, is rotated
//! into the body-fixed system where the series is evaluated, and the
//! acceleration is rotated into the target coordinate system.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use astrodyn_frames::{
    CoordinateSystemId, EopData, FrameGraph, SolarSystem, SolarSystemId, SpacePointId,
};
use astrodyn_time::A1;

use crate::coefficients::GravityCoefficients;
use crate::harmonics;
use crate::model::PhysicalModel;
use crate::{GravityError, GravityResult, Vector3};

/// Prefix marking a potential file name as "look in the body's default directory".
pub const DEFAULT_FILE_PREFIX: &str = "DFLT__";

/// Highest degree the model evaluates.
pub const MAX_DEGREE: usize = 360;
/// Highest order the model evaluates.
pub const MAX_ORDER: usize = 360;

pub const DEFAULT_DEGREE: usize = 4;
pub const DEFAULT_ORDER: usize = 4;

/// Positions closer than this to the body center (km) are rejected.
const MIN_RADIUS: f64 = 1.0e-6;

#[derive(Debug, Clone)]
pub struct HarmonicField {
    name: String,
    body_name: String,
    force_origin: String,
    max_degree: usize,
    max_order: usize,
    degree: usize,
    order: usize,
    potential_file: String,
    filename: Option<PathBuf>,
    using_default_file: bool,
    file_read: bool,
    coefficients: Option<GravityCoefficients>,
    input_cs_name: String,
    fixed_cs_name: String,
    target_cs_name: String,
    input_cs: Option<CoordinateSystemId>,
    fixed_cs: Option<CoordinateSystemId>,
    target_cs: Option<CoordinateSystemId>,
    eop: Option<Arc<EopData>>,
    solar_system: Option<SolarSystemId>,
    body: Option<SpacePointId>,
    show_default_notice: bool,
    initialized: bool,
}

impl HarmonicField {
    pub fn new(name: &str, body_name: &str) -> Self {
        let inertial = format!("{}MJ2000Eq", body_name);
        Self {
            name: name.to_string(),
            body_name: body_name.to_string(),
            force_origin: body_name.to_string(),
            max_degree: MAX_DEGREE,
            max_order: MAX_ORDER,
            degree: DEFAULT_DEGREE,
            order: DEFAULT_ORDER,
            potential_file: String::new(),
            filename: None,
            using_default_file: false,
            file_read: false,
            coefficients: None,
            input_cs_name: inertial.clone(),
            fixed_cs_name: format!("{}Fixed", body_name),
            target_cs_name: inertial,
            input_cs: None,
            fixed_cs: None,
            target_cs: None,
            eop: None,
            solar_system: None,
            body: None,
            show_default_notice: true,
            initialized: false,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Resolved coefficient file.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn using_default_file(&self) -> bool {
        self.using_default_file
    }

    pub fn coefficients(&self) -> Option<&GravityCoefficients> {
        self.coefficients.as_ref()
    }

    pub fn input_cs_name(&self) -> &str {
        &self.input_cs_name
    }

    pub fn fixed_cs_name(&self) -> &str {
        &self.fixed_cs_name
    }

    pub fn target_cs_name(&self) -> &str {
        &self.target_cs_name
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn set_eop(&mut self, eop: Option<Arc<EopData>>) {
        self.eop = eop;
    }

    /// Stores `degree` clamped to `[0, max_degree]` and `order` clamped to
    /// `[0, min(degree, max_order)]`.
    ///
    /// Returns false when either value had to be adjusted; the adjustment is
    /// logged, never raised.
    pub fn set_degree_order(&mut self, degree: i64, order: i64) -> bool {
        let degree_ok = (0..=self.max_degree as i64).contains(&degree);
        let new_degree = degree.clamp(0, self.max_degree as i64) as usize;

        let order_limit = new_degree.min(self.max_order);
        let order_ok = (0..=order_limit as i64).contains(&order);
        let new_order = order.clamp(0, order_limit as i64) as usize;

        if !degree_ok || !order_ok {
            log::warn!(
                "{}: degree/order ({}, {}) outside [0, {}]/[0, {}]; using ({}, {})",
                self.name,
                degree,
                order,
                self.max_degree,
                order_limit,
                new_degree,
                new_order
            );
        }

        self.degree = new_degree;
        self.order = new_order;
        degree_ok && order_ok
    }

    /// Resolves and records the coefficient file.
    ///
    /// A [`DEFAULT_FILE_PREFIX`] is stripped; relative names resolve against
    /// the body's potential directory. A changed file is pushed to the body
    /// in `ss` and will be re-read at the next initialization.
    ///
    /// # Errors
    ///
    /// The body is not a celestial body in `ss` (relative names only), or the
    /// resolved file does not exist.
    pub fn set_filename(&mut self, name: &str, ss: &mut SolarSystem) -> GravityResult<()> {
        let (stripped, using_default) = match name.strip_prefix(DEFAULT_FILE_PREFIX) {
            Some(rest) => (rest, true),
            None => (name, false),
        };

        let mut path = PathBuf::from(stripped);
        if path.is_relative() {
            let directory = ss.potential_file_path(&self.body_name).ok_or_else(|| {
                GravityError::configuration(
                    &self.name,
                    format!("body \"{}\" is not a celestial body in the solar system", self.body_name),
                )
            })?;
            path = directory.join(path);
        }

        if !path.is_file() {
            return Err(GravityError::FileNotFound { path });
        }

        self.potential_file = name.to_string();
        self.using_default_file = using_default;

        if self.filename.as_ref() != Some(&path) {
            log::debug!("{}: potential file is now {}", self.name, path.display());
            if let Some(body) = ss.get_body(&self.body_name).and_then(|id| ss.body_mut(id)) {
                body.potential_filename = Some(path.clone());
            }
            self.filename = Some(path);
            self.file_read = false;
            self.coefficients = None;
            self.initialized = false;
        }
        Ok(())
    }

    pub fn integer_parameter(&self, label: &str) -> GravityResult<i64> {
        match label {
            "Degree" => Ok(self.degree as i64),
            "Order" => Ok(self.order as i64),
            "MaxDegree" => Ok(self.max_degree as i64),
            "MaxOrder" => Ok(self.max_order as i64),
            _ => Err(GravityError::unknown_parameter(&self.name, label)),
        }
    }

    /// Sets `Degree` or `Order` through [`set_degree_order`](Self::set_degree_order)
    /// and returns the stored value.
    pub fn set_integer_parameter(&mut self, label: &str, value: i64) -> GravityResult<i64> {
        match label {
            "Degree" => {
                self.set_degree_order(value, self.order as i64);
                Ok(self.degree as i64)
            }
            "Order" => {
                self.set_degree_order(self.degree as i64, value);
                Ok(self.order as i64)
            }
            "MaxDegree" | "MaxOrder" => Err(GravityError::configuration(
                &self.name,
                format!("{} is fixed by the model and the potential file", label),
            )),
            _ => Err(GravityError::unknown_parameter(&self.name, label)),
        }
    }

    pub fn string_parameter(&self, label: &str) -> GravityResult<String> {
        match label {
            "PotentialFile" => Ok(self.potential_file.clone()),
            "InputCoordinateSystem" => Ok(self.input_cs_name.clone()),
            "FixedCoordinateSystem" => Ok(self.fixed_cs_name.clone()),
            "TargetCoordinateSystem" => Ok(self.target_cs_name.clone()),
            "BodyName" => Ok(self.body_name.clone()),
            _ => Err(GravityError::unknown_parameter(&self.name, label)),
        }
    }

    /// `PotentialFile` goes through [`set_filename`](Self::set_filename), which
    /// needs `ss`; the other labels only rename references.
    pub fn set_string_parameter(
        &mut self,
        label: &str,
        value: &str,
        ss: &mut SolarSystem,
    ) -> GravityResult<()> {
        match label {
            "PotentialFile" => return self.set_filename(value, ss),
            "InputCoordinateSystem" => {
                self.input_cs_name = value.to_string();
                self.input_cs = None;
            }
            "FixedCoordinateSystem" => {
                self.fixed_cs_name = value.to_string();
                self.fixed_cs = None;
            }
            "TargetCoordinateSystem" => {
                self.target_cs_name = value.to_string();
                self.target_cs = None;
            }
            "BodyName" => {
                self.body_name = value.to_string();
                self.fixed_cs_name = format!("{}Fixed", value);
                self.fixed_cs = None;
                self.body = ss.get_body(value);
            }
            _ => return Err(GravityError::unknown_parameter(&self.name, label)),
        }
        self.initialized = false;
        Ok(())
    }

    fn load_coefficients(&mut self, path: &Path) -> GravityResult<()> {
        let coefficients = GravityCoefficients::from_file(path)?;
        log::debug!(
            "{}: read {} (degree {}, order {})",
            self.name,
            path.display(),
            coefficients.degree(),
            coefficients.order()
        );

        self.max_degree = MAX_DEGREE.min(coefficients.degree());
        self.max_order = MAX_ORDER.min(coefficients.order());
        if self.degree > self.max_degree || self.order > self.max_order.min(self.degree) {
            self.set_degree_order(self.degree as i64, self.order as i64);
        }

        self.coefficients = Some(coefficients);
        self.file_read = true;
        Ok(())
    }

    fn missing(&self, what: &str) -> GravityError {
        GravityError::configuration(&self.name, format!("{} has not been set", what))
    }
}

impl PhysicalModel for HarmonicField {
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
        self.initialized = false;
    }

    fn set_solar_system(&mut self, ss: &SolarSystem) {
        if self.solar_system == Some(ss.id()) {
            return;
        }
        self.solar_system = Some(ss.id());
        self.body = ss.get_body(&self.body_name);
        self.initialized = false;
    }

    fn ref_object_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(3);
        for name in [&self.input_cs_name, &self.fixed_cs_name, &self.target_cs_name] {
            if !name.is_empty() && !names.contains(name) {
                names.push(name.clone());
            }
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
        if name == self.fixed_cs_name {
            self.fixed_cs = Some(id);
            bound = true;
        }
        if name == self.target_cs_name {
            self.target_cs = Some(id);
            bound = true;
        }
        bound
    }

    /// # Errors
    ///
    /// Missing solar system, body, input or fixed coordinate system, EOP data
    /// or potential file; a force origin other than the field's body; or a
    /// coefficient file that cannot be read.
    fn initialize(&mut self, ss: &SolarSystem) -> GravityResult<()> {
        self.initialized = false;

        if self.solar_system.is_none() {
            return Err(self.missing("solar system"));
        }
        let body_id = self.body.or_else(|| ss.get_body(&self.body_name));
        let body = body_id.and_then(|id| ss.body(id)).ok_or_else(|| {
            GravityError::configuration(
                &self.name,
                format!("body \"{}\" is not a celestial body in the solar system", self.body_name),
            )
        })?;
        self.body = body_id;

        if self.force_origin != self.body_name {
            return Err(GravityError::configuration(
                &self.name,
                format!(
                    "field of {} cannot be evaluated about origin {}",
                    self.body_name, self.force_origin
                ),
            ));
        }
        if self.input_cs.is_none() {
            return Err(self.missing(&format!("input coordinate system \"{}\"", self.input_cs_name)));
        }
        if self.fixed_cs.is_none() {
            return Err(self.missing(&format!("fixed coordinate system \"{}\"", self.fixed_cs_name)));
        }
        if self.target_cs.is_none() {
            self.target_cs = self.input_cs;
            self.target_cs_name = self.input_cs_name.clone();
        }
        if self.eop.is_none() {
            return Err(self.missing("EOP data"));
        }

        if self.filename.is_none() {
            self.filename = body.potential_filename.clone();
        }
        let path = self.filename.clone().ok_or_else(|| self.missing("potential file"))?;
        if !self.file_read || self.coefficients.is_none() {
            self.load_coefficients(&path)?;
        }

        if self.using_default_file && self.show_default_notice {
            log::info!("{}: using default potential file {}", self.name, path.display());
            self.show_default_notice = false;
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
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or_else(|| self.missing("potential coefficients"))?;

        if frames.eop().is_none() {
            frames.set_eop(self.eop.clone());
        }
        frames.compute(epoch, ss, false)?;

        let to_fixed = frames.rotation_between(&self.input_cs_name, &self.fixed_cs_name)?;
        let fixed_position = to_fixed.matrix * *position;
        if fixed_position.magnitude() < MIN_RADIUS {
            return Err(GravityError::invalid_state(
                &self.name,
                format!("position is at the center of {}", self.body_name),
            ));
        }

        let fixed_acceleration =
            harmonics::acceleration(coefficients, self.degree, self.order, &fixed_position);
        let to_target = frames.rotation_between(&self.fixed_cs_name, &self.target_cs_name)?;
        Ok(to_target.matrix * fixed_acceleration)
    }
}

/// Serializable description of a [`HarmonicField`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HarmonicFieldConfig {
    pub name: String,
    pub body: String,
    #[cfg_attr(feature = "serde", serde(default = "default_degree"))]
    pub degree: i64,
    #[cfg_attr(feature = "serde", serde(default = "default_order"))]
    pub order: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub potential_file: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub input_coordinate_system: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_coordinate_system: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_coordinate_system: Option<String>,
}

#[cfg(feature = "serde")]
fn default_degree() -> i64 {
    DEFAULT_DEGREE as i64
}

#[cfg(feature = "serde")]
fn default_order() -> i64 {
    DEFAULT_ORDER as i64
}

impl HarmonicFieldConfig {
    pub fn new(name: &str, body: &str) -> Self {
        Self {
            name: name.to_string(),
            body: body.to_string(),
            degree: DEFAULT_DEGREE as i64,
            order: DEFAULT_ORDER as i64,
            potential_file: None,
            input_coordinate_system: None,
            fixed_coordinate_system: None,
            target_coordinate_system: None,
        }
    }

    /// Builds the field; a potential file is resolved against `ss`.
    pub fn build(&self, ss: &mut SolarSystem) -> GravityResult<HarmonicField> {
        let mut field = HarmonicField::new(&self.name, &self.body);
        field.set_degree_order(self.degree, self.order);
        let names = [
            ("InputCoordinateSystem", &self.input_coordinate_system),
            ("FixedCoordinateSystem", &self.fixed_coordinate_system),
            ("TargetCoordinateSystem", &self.target_coordinate_system),
        ];
        for (label, value) in names {
            if let Some(value) = value {
                field.set_string_parameter(label, value, ss)?;
            }
        }
        if let Some(file) = &self.potential_file {
            field.set_filename(file, ss)?;
        }
        Ok(field)
    }
}
