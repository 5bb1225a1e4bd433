//! Sidereal time for the Earth body-fixed rotation.

mod gmst;

pub use gmst::{earth_rotation_rate, GMST};
