use astrodyn_core::Vector3;
use std::fmt;

/// Cartesian position (km) and velocity (km/s).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateVector {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl StateVector {
    pub fn new(position: Vector3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }

    pub fn from_position(position: Vector3) -> Self {
        Self::new(position, Vector3::zeros())
    }

    pub fn zeros() -> Self {
        Self::default()
    }
}

impl std::ops::Add for StateVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.position + rhs.position, self.velocity + rhs.velocity)
    }
}

impl std::ops::Sub for StateVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.position - rhs.position, self.velocity - rhs.velocity)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r = {} km, v = {} km/s", self.position, self.velocity)
    }
}
