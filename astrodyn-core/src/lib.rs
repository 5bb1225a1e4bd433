//! Numerical building blocks for mission-analysis reference frames.
//!
//! `astrodyn-core` holds the pure math that axis systems and force models sit on:
//! 3×3 matrices and vectors, IAU 1976 precession, the IAU 1980 mean obliquity,
//! and an iterative geodetic solver for oblate bodies. Nothing here knows about
//! epochs or named frames; callers pass Julian centuries and body radii directly.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`matrix`] | [`Matrix3`] (rotations and their time derivatives) and [`Vector3`] |
//! | [`precession`] | IAU 1976 precession angles and matrix |
//! | [`obliquity`] | Mean obliquity of the ecliptic (IAU 1980) |
//! | [`geodesy`] | Geodetic latitude/longitude of a body-fixed point |
//! | [`constants`] | Epochs, unit conversions, default Earth parameters |
//! | [`errors`] | [`AstroError`] and [`AstroResult`] |
//!
//! # Re-exports
//!
//! ```
//! use astrodyn_core::{Matrix3, Vector3};
//! use astrodyn_core::{AstroError, AstroResult, MathErrorKind};
//! ```
//!
//! # Conventions
//!
//! - Angles are radians unless a name says otherwise (`_deg`, `_arcsec`).
//! - Elementary rotations follow the passive (frame-rotating) convention:
//!   `Matrix3::rot_z(a)` maps `[1, 0, 0]` to `[cos a, -sin a, 0]`.
//! - Distances are kilometers.

pub mod constants;
pub mod errors;
pub mod geodesy;
pub mod matrix;
pub mod obliquity;
pub mod precession;
pub mod utils;

pub use errors::{AstroError, AstroResult, MathErrorKind};
pub use geodesy::{GeodeticSolution, GeodeticSolver};
pub use matrix::{Matrix3, Vector3};
pub use precession::{PrecessionAngles, PrecessionIAU1976};

pub mod test_helpers;
