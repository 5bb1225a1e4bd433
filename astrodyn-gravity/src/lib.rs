//! Gravity models evaluated through astrodyn coordinate systems.
//!
//! [`HarmonicField`] evaluates a body's spherical-harmonic field in the
//! body-fixed frame and hands the acceleration back in the caller's frame;
//! [`PointMassForce`] covers central and third-body point masses. Both
//! implement [`PhysicalModel`] and can be summed with a [`ForceModelSet`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use astrodyn_frames::{AxisSystem, CoordinateSystem, EopData, FrameGraph, SolarSystem};
//! use astrodyn_gravity::{ForceModelSet, HarmonicField, PhysicalModel, Vector3, A1};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ss = SolarSystem::with_default_bodies();
//! let mut frames = FrameGraph::new();
//! frames.add(CoordinateSystem::new(
//!     "EarthFixed",
//!     "Earth",
//!     AxisSystem::body_fixed("EarthFixed", "Earth"),
//! ));
//!
//! let mut field = HarmonicField::new("EarthGravity", "Earth");
//! field.set_degree_order(8, 8);
//! field.set_filename("DFLT__JGM2.cof", &mut ss)?;
//! field.set_eop(Some(Arc::new(EopData::from_file("finals2000A.data")?)));
//!
//! let mut forces = ForceModelSet::new();
//! forces.add(Box::new(field));
//! forces.initialize(&mut ss, &mut frames)?;
//!
//! let epoch = A1::from_gmat_mjd(25000.0);
//! let accel = forces.acceleration(&Vector3::new(7000.0, 0.0, 0.0), &epoch, &mut frames, &ss)?;
//! println!("{}", accel);
//! # Ok(())
//! # }
//! ```

pub mod coefficients;
pub mod errors;
pub mod harmonic_field;
pub mod harmonics;
pub mod model;
pub mod point_mass;

pub use coefficients::{normalization_factor, GravityCoefficients};
pub use errors::{GravityError, GravityResult};
pub use harmonic_field::{HarmonicField, HarmonicFieldConfig, DEFAULT_FILE_PREFIX, MAX_DEGREE, MAX_ORDER};
pub use model::{ForceModelSet, PhysicalModel};
pub use point_mass::PointMassForce;

pub use astrodyn_core::Vector3;
pub use astrodyn_time::A1;
