//! 3×3 matrices for axis-system rotations and their time derivatives.
//!
//! Every axis system carries two of these: the rotation matrix taking vectors
//! from the axis system to the J2000 equatorial axes, and its time derivative.
//! The derivative is not orthogonal, so [`Matrix3`] is a general matrix with
//! rotation-specific helpers rather than a rotation-only type.
//!
//! # Rotation Conventions
//!
//! Elementary rotations are passive (they rotate the frame, not the vector):
//!
//! ```text
//! rot_z(a) = | cos a   sin a   0 |
//!            |-sin a   cos a   0 |
//!            |   0       0     1 |
//! ```
//!
//! The in-place `rotate_*` methods pre-multiply, so
//! `m.rotate_z(a)` turns `m` into `rot_z(a) * m`. Chains read right to left:
//!
//! ```
//! use astrodyn_core::Matrix3;
//!
//! let mut chained = Matrix3::identity();
//! chained.rotate_z(-0.01);
//! chained.rotate_x(0.02);
//!
//! let explicit = Matrix3::rot_x(0.02) * Matrix3::rot_z(-0.01);
//! assert!(chained.max_difference(&explicit) < 1e-16);
//! ```
//!
//! # Storage Layout
//!
//! Row-major `[[f64; 3]; 3]`. [`to_row_major`](Matrix3::to_row_major) and
//! [`from_row_major`](Matrix3::from_row_major) flatten to the 9-element form
//! that cached precession data is kept in.

use std::fmt;

use super::Vector3;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix3 {
    elements: [[f64; 3]; 3],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix3 {
    pub const fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub const fn zeros() -> Self {
        Self {
            elements: [[0.0; 3]; 3],
        }
    }

    /// Builds a matrix from row-major elements without validation.
    pub const fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    pub fn from_row_major(data: &[f64; 9]) -> Self {
        Self::from_array([
            [data[0], data[1], data[2]],
            [data[3], data[4], data[5]],
            [data[6], data[7], data[8]],
        ])
    }

    pub fn to_row_major(&self) -> [f64; 9] {
        let e = &self.elements;
        [
            e[0][0], e[0][1], e[0][2], e[1][0], e[1][1], e[1][2], e[2][0], e[2][1], e[2][2],
        ]
    }

    /// Builds a matrix whose columns are the given vectors.
    ///
    /// With three orthonormal axis unit vectors expressed in a parent frame,
    /// the result maps child-frame components to parent-frame components.
    pub fn from_columns(c0: &Vector3, c1: &Vector3, c2: &Vector3) -> Self {
        Self::from_array([
            [c0.x, c1.x, c2.x],
            [c0.y, c1.y, c2.y],
            [c0.z, c1.z, c2.z],
        ])
    }

    /// Passive rotation about X.
    pub fn rot_x(angle: f64) -> Self {
        let mut m = Self::identity();
        m.rotate_x(angle);
        m
    }

    /// Passive rotation about Z.
    pub fn rot_z(angle: f64) -> Self {
        let mut m = Self::identity();
        m.rotate_z(angle);
        m
    }

    /// Time derivative of [`rot_z`](Self::rot_z) for an angle advancing at `rate` rad/s.
    pub fn rot_z_derivative(angle: f64, rate: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_array([
            [-s * rate, c * rate, 0.0],
            [-c * rate, -s * rate, 0.0],
            [0.0, 0.0, 0.0],
        ])
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.elements[row][col] = value;
    }

    pub fn elements(&self) -> &[[f64; 3]; 3] {
        &self.elements
    }

    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::from_array(self.elements[i])
    }

    pub fn column(&self, j: usize) -> Vector3 {
        Vector3::new(
            self.elements[0][j],
            self.elements[1][j],
            self.elements[2][j],
        )
    }

    /// Pre-multiplies by `rot_x(phi)` in place.
    pub fn rotate_x(&mut self, phi: f64) {
        let (s, c) = phi.sin_cos();

        let a10 = c * self.elements[1][0] + s * self.elements[2][0];
        let a11 = c * self.elements[1][1] + s * self.elements[2][1];
        let a12 = c * self.elements[1][2] + s * self.elements[2][2];
        let a20 = -s * self.elements[1][0] + c * self.elements[2][0];
        let a21 = -s * self.elements[1][1] + c * self.elements[2][1];
        let a22 = -s * self.elements[1][2] + c * self.elements[2][2];

        self.elements[1] = [a10, a11, a12];
        self.elements[2] = [a20, a21, a22];
    }

    /// Pre-multiplies by the passive y-axis rotation through `theta` in place.
    pub fn rotate_y(&mut self, theta: f64) {
        let (s, c) = theta.sin_cos();

        let a00 = c * self.elements[0][0] - s * self.elements[2][0];
        let a01 = c * self.elements[0][1] - s * self.elements[2][1];
        let a02 = c * self.elements[0][2] - s * self.elements[2][2];
        let a20 = s * self.elements[0][0] + c * self.elements[2][0];
        let a21 = s * self.elements[0][1] + c * self.elements[2][1];
        let a22 = s * self.elements[0][2] + c * self.elements[2][2];

        self.elements[0] = [a00, a01, a02];
        self.elements[2] = [a20, a21, a22];
    }

    /// Pre-multiplies by `rot_z(psi)` in place.
    pub fn rotate_z(&mut self, psi: f64) {
        let (s, c) = psi.sin_cos();

        let a00 = c * self.elements[0][0] + s * self.elements[1][0];
        let a01 = c * self.elements[0][1] + s * self.elements[1][1];
        let a02 = c * self.elements[0][2] + s * self.elements[1][2];
        let a10 = -s * self.elements[0][0] + c * self.elements[1][0];
        let a11 = -s * self.elements[0][1] + c * self.elements[1][1];
        let a12 = -s * self.elements[0][2] + c * self.elements[1][2];

        self.elements[0] = [a00, a01, a02];
        self.elements[1] = [a10, a11, a12];
    }

    /// Returns `self * other`; `other` acts on a vector first.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0; 3]; 3];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..3 {
                    *cell += self.elements[i][k] * other.elements[k][j];
                }
            }
        }

        Self::from_array(result)
    }

    pub fn apply_to_vector(&self, vector: [f64; 3]) -> [f64; 3] {
        let e = &self.elements;
        [
            e[0][0] * vector[0] + e[0][1] * vector[1] + e[0][2] * vector[2],
            e[1][0] * vector[0] + e[1][1] * vector[1] + e[1][2] * vector[2],
            e[2][0] * vector[0] + e[2][1] * vector[1] + e[2][2] * vector[2],
        ]
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.elements;

        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    pub fn transpose(&self) -> Self {
        let e = &self.elements;
        Self::from_array([
            [e[0][0], e[1][0], e[2][0]],
            [e[0][1], e[1][1], e[2][1]],
            [e[0][2], e[1][2], e[2][2]],
        ])
    }

    pub fn scale(&self, factor: f64) -> Self {
        let mut out = *self;
        for row in out.elements.iter_mut() {
            for cell in row.iter_mut() {
                *cell *= factor;
            }
        }
        out
    }

    /// Largest deviation of `self * selfᵀ` from the identity.
    pub fn orthonormality_error(&self) -> f64 {
        self.multiply(&self.transpose())
            .max_difference(&Self::identity())
    }

    /// Checks `R·Rᵀ = I` and `det R = +1` within `tolerance`.
    ///
    /// ```
    /// use astrodyn_core::Matrix3;
    ///
    /// let m = Matrix3::rot_z(0.5) * Matrix3::rot_x(0.3);
    /// assert!(m.is_rotation_matrix(1e-14));
    /// assert!(!Matrix3::identity().scale(2.0).is_rotation_matrix(1e-14));
    /// ```
    pub fn is_rotation_matrix(&self, tolerance: f64) -> bool {
        (self.determinant() - 1.0).abs() <= tolerance && self.orthonormality_error() <= tolerance
    }

    pub fn max_difference(&self, other: &Self) -> f64 {
        let mut max_diff: f64 = 0.0;

        for i in 0..3 {
            for j in 0..3 {
                let diff = (self.elements[i][j] - other.elements[i][j]).abs();
                max_diff = max_diff.max(diff);
            }
        }

        max_diff
    }

    pub fn is_finite(&self) -> bool {
        self.elements.iter().flatten().all(|v| v.is_finite())
    }
}

impl std::ops::Mul for Matrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Matrix3> for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: &Matrix3) -> Matrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::Mul<Matrix3> for &Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Matrix3> for &Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: &Matrix3) -> Matrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::Add for Matrix3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for i in 0..3 {
            for j in 0..3 {
                out.elements[i][j] += rhs.elements[i][j];
            }
        }
        out
    }
}

impl std::ops::Index<(usize, usize)> for Matrix3 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix3 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.elements[row][col]
    }
}

impl std::ops::Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        Vector3::from_array(self.apply_to_vector(vec.to_array()))
    }
}

impl std::ops::Mul<Vector3> for &Matrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        Vector3::from_array(self.apply_to_vector(vec.to_array()))
    }
}

impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix3:")?;
        for row in &self.elements {
            writeln!(f, "  [{:15.12} {:15.12} {:15.12}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
