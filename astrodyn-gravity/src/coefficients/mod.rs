//! Spherical-harmonic coefficient tables and the text formats they come from.
//!
//! Two formats are recognized by file extension:
//!
//! | Extension | Layout |
//! |-----------|--------|
//! | `.cof` | `POTFIELD` header card, one `RECOEF` card per coefficient pair, `END` |
//! | `.grv` | keyword header (`Degree`, `Order`, `Gm`, `RefDistance`, `Normalized`), then `n m C S` rows |
//!
//! Both files give `mu` in m³/s² and the reference radius in m; tables are
//! returned in km³/s² and km, always fully normalized. A file declaring more
//! than [`MAX_DEGREE`](crate::MAX_DEGREE) / [`MAX_ORDER`](crate::MAX_ORDER) is
//! rejected before its table is allocated.

mod cof;
mod grv;

use std::fs;
use std::path::Path;

pub use cof::parse_cof;
pub use grv::parse_grv;

use crate::{GravityError, GravityResult, MAX_DEGREE, MAX_ORDER};

/// Fully normalized coefficients `C̄nm`, `S̄nm` for `0 <= m <= min(n, order)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GravityCoefficients {
    /// Gravitational parameter, km³/s².
    pub mu: f64,
    /// Reference radius, km.
    pub radius: f64,
    degree: usize,
    order: usize,
    c: Vec<Vec<f64>>,
    s: Vec<Vec<f64>>,
}

impl GravityCoefficients {
    /// Zero table with `C̄00 = 1`.
    pub fn new(mu: f64, radius: f64, degree: usize, order: usize) -> Self {
        let order = order.min(degree);
        let c: Vec<Vec<f64>> = (0..=degree).map(|n| vec![0.0; n.min(order) + 1]).collect();
        let s = c.clone();
        let mut table = Self {
            mu,
            radius,
            degree,
            order,
            c,
            s,
        };
        table.c[0][0] = 1.0;
        table
    }

    /// A field with only the central term.
    pub fn point_mass(mu: f64, radius: f64) -> Self {
        Self::new(mu, radius, 0, 0)
    }

    /// Reads a `.cof` or `.grv` file.
    pub fn from_file(path: &Path) -> GravityResult<Self> {
        if !path.is_file() {
            return Err(GravityError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("cof") => parse_cof(&content, path),
            Some("grv") => parse_grv(&content, path),
            _ => Err(GravityError::parsing(
                path,
                "unrecognized potential file format (expected .cof or .grv)",
            )),
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// `C̄nm`, zero outside the table.
    pub fn c(&self, n: usize, m: usize) -> f64 {
        self.c.get(n).and_then(|row| row.get(m)).copied().unwrap_or(0.0)
    }

    /// `S̄nm`, zero outside the table.
    pub fn s(&self, n: usize, m: usize) -> f64 {
        self.s.get(n).and_then(|row| row.get(m)).copied().unwrap_or(0.0)
    }

    /// Stores one coefficient pair. Returns false when `(n, m)` lies outside
    /// the table.
    pub fn set(&mut self, n: usize, m: usize, c: f64, s: f64) -> bool {
        match (self.c.get_mut(n), self.s.get_mut(n)) {
            (Some(c_row), Some(s_row)) if m < c_row.len() => {
                c_row[m] = c;
                s_row[m] = s;
                true
            }
            _ => false,
        }
    }

    /// The unnormalized `J2 = -C20`.
    pub fn j2(&self) -> f64 {
        -self.c(2, 0) * normalization_factor(2, 0)
    }
}

/// `Nnm` such that `Cnm = Nnm C̄nm`:
///
/// ```text
/// Nnm = sqrt((2 - δ0m)(2n + 1)(n - m)! / (n + m)!)
/// ```
pub fn normalization_factor(n: usize, m: usize) -> f64 {
    let delta = if m == 0 { 1.0 } else { 2.0 };
    let ln_ratio: f64 = ((n - m + 1)..=(n + m)).map(|k| (k as f64).ln()).sum();
    (0.5 * (delta * (2 * n + 1) as f64).ln() - 0.5 * ln_ratio).exp()
}

/// Rejects a declared size the field could never evaluate.
pub(crate) fn check_declared_size(path: &Path, degree: usize, order: usize) -> GravityResult<()> {
    if degree > MAX_DEGREE || order > MAX_ORDER {
        return Err(GravityError::parsing(
            path,
            format!(
                "declared degree/order ({}, {}) exceeds ({}, {})",
                degree, order, MAX_DEGREE, MAX_ORDER
            ),
        ));
    }
    Ok(())
}

/// Parses a number that may use a Fortran `D` exponent.
pub(crate) fn parse_number(token: &str) -> Option<f64> {
    token.replace(|c: char| c == 'D' || c == 'd', "E").parse::<f64>().ok()
}
