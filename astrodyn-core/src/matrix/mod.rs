//! 3×3 matrices and 3-vectors for frame transformations.
//!
//! - [`Matrix3`]: rotation matrices and their time derivatives
//! - [`Vector3`]: Cartesian position, velocity and acceleration

mod matrix3;
mod vector3;

pub use matrix3::Matrix3;
pub use vector3::Vector3;
