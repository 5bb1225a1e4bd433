//! Gradient of a fully normalized spherical-harmonic potential.
//!
//! Uses the Cunningham V/W recursion (Montenbruck & Gill, §3.2) rewritten for
//! normalized coefficients. With `x0 = R x / r²` (likewise y0, z0) and
//! `ρ = R² / r²`:
//!
//! ```text
//! V̄00 = R / r                      W̄00 = 0
//! V̄mm = f_m (x0 V̄m-1,m-1 − y0 W̄m-1,m-1)
//! W̄mm = f_m (x0 W̄m-1,m-1 + y0 V̄m-1,m-1)      f_1 = √3, f_m = √((2m+1)/2m)
//! V̄nm = a_nm z0 V̄n-1,m − b_nm ρ V̄n-2,m
//! a_nm = √((2n−1)(2n+1) / ((n−m)(n+m)))
//! b_nm = √((2n+1)(n+m−1)(n−m−1) / ((2n−3)(n+m)(n−m)))
//! ```
//!
//! The acceleration sums over `0 <= m <= n <= degree`, `m <= order`, and
//! therefore needs V̄/W̄ up to `degree + 1`, `order + 1`.

use astrodyn_core::Vector3;

use crate::coefficients::GravityCoefficients;

/// Acceleration in km/s² at `position` (km, body-fixed axes).
///
/// `degree`/`order` are clipped to the table. The caller guarantees a
/// non-zero position.
pub fn acceleration(
    coefficients: &GravityCoefficients,
    degree: usize,
    order: usize,
    position: &Vector3,
) -> Vector3 {
    let degree = degree.min(coefficients.degree());
    let order = order.min(degree).min(coefficients.order());
    let (v, w) = cunningham(coefficients.radius, position, degree + 1, order + 1);

    let mut ax = 0.0;
    let mut ay = 0.0;
    let mut az = 0.0;

    for n in 0..=degree {
        let nf = n as f64;
        let degree_ratio = (2.0 * nf + 1.0) / (2.0 * nf + 3.0);

        for m in 0..=n.min(order) {
            let mf = m as f64;
            let c = coefficients.c(n, m);
            let s = coefficients.s(n, m);
            if c == 0.0 && s == 0.0 {
                continue;
            }

            let f3 = (degree_ratio * (nf + mf + 1.0) * (nf - mf + 1.0)).sqrt();
            az += f3 * (-c * v[n + 1][m] - s * w[n + 1][m]);

            if m == 0 {
                let f1 = (0.5 * degree_ratio * (nf + 1.0) * (nf + 2.0)).sqrt();
                ax -= c * f1 * v[n + 1][1];
                ay -= c * f1 * w[n + 1][1];
            } else {
                let f1 = (degree_ratio * (nf + mf + 1.0) * (nf + mf + 2.0)).sqrt();
                let sectoral = if m == 1 { 2.0 } else { 1.0 };
                let f2 = (sectoral * degree_ratio * (nf - mf + 1.0) * (nf - mf + 2.0)).sqrt();

                ax += 0.5
                    * (f1 * (-c * v[n + 1][m + 1] - s * w[n + 1][m + 1])
                        + f2 * (c * v[n + 1][m - 1] + s * w[n + 1][m - 1]));
                ay += 0.5
                    * (f1 * (-c * w[n + 1][m + 1] + s * v[n + 1][m + 1])
                        + f2 * (-c * w[n + 1][m - 1] + s * v[n + 1][m - 1]));
            }
        }
    }

    let scale = coefficients.mu / (coefficients.radius * coefficients.radius);
    Vector3::new(ax * scale, ay * scale, az * scale)
}

/// Normalized V̄nm, W̄nm for `n <= max_degree`, `m <= min(n, max_order)`.
fn cunningham(
    radius: f64,
    position: &Vector3,
    max_degree: usize,
    max_order: usize,
) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let r2 = position.magnitude_squared();
    let x0 = radius * position.x / r2;
    let y0 = radius * position.y / r2;
    let z0 = radius * position.z / r2;
    let rho = radius * radius / r2;

    let mut v = vec![vec![0.0; max_order + 2]; max_degree + 1];
    let mut w = vec![vec![0.0; max_order + 2]; max_degree + 1];

    v[0][0] = radius / r2.sqrt();

    for m in 0..=max_order.min(max_degree) {
        let mf = m as f64;
        if m > 0 {
            let f = if m == 1 {
                3f64.sqrt()
            } else {
                ((2.0 * mf + 1.0) / (2.0 * mf)).sqrt()
            };
            v[m][m] = f * (x0 * v[m - 1][m - 1] - y0 * w[m - 1][m - 1]);
            w[m][m] = f * (x0 * w[m - 1][m - 1] + y0 * v[m - 1][m - 1]);
        }

        for n in (m + 1)..=max_degree {
            let nf = n as f64;
            let a = ((2.0 * nf - 1.0) * (2.0 * nf + 1.0) / ((nf - mf) * (nf + mf))).sqrt();
            v[n][m] = a * z0 * v[n - 1][m];
            w[n][m] = a * z0 * w[n - 1][m];
            if n >= m + 2 {
                let b = ((2.0 * nf + 1.0) * (nf + mf - 1.0) * (nf - mf - 1.0)
                    / ((2.0 * nf - 3.0) * (nf + mf) * (nf - mf)))
                    .sqrt();
                v[n][m] -= b * rho * v[n - 2][m];
                w[n][m] -= b * rho * w[n - 2][m];
            }
        }
    }

    (v, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::normalization_factor;
    use astrodyn_core::constants::{EARTH_EQUATORIAL_RADIUS, EARTH_MU};
    use astrodyn_core::test_helpers::assert_vector_close;

    fn earth(degree: usize, order: usize) -> GravityCoefficients {
        GravityCoefficients::new(EARTH_MU, EARTH_EQUATORIAL_RADIUS, degree, order)
    }

    #[test]
    fn test_central_term_is_point_mass() {
        let position = Vector3::new(4000.0, -3000.0, 5000.0);
        let r = position.magnitude();
        let expected = position * (-EARTH_MU / (r * r * r));
        let accel = acceleration(&earth(0, 0), 0, 0, &position);
        assert_vector_close(&accel, &expected, 1e-16, "point mass");
    }

    #[test]
    fn test_zonal_j2_closed_form() {
        let j2 = 1.08262668e-3;
        let mut table = earth(2, 0);
        table.set(2, 0, -j2 / normalization_factor(2, 0), 0.0);

        let position = Vector3::new(5000.0, 3000.0, 4000.0);
        let r = position.magnitude();
        let r2 = r * r;
        let k = 1.5 * j2 * EARTH_MU * EARTH_EQUATORIAL_RADIUS * EARTH_EQUATORIAL_RADIUS / (r2 * r2 * r);
        let zr2 = 5.0 * position.z * position.z / r2;
        let perturbation = Vector3::new(
            k * position.x * (zr2 - 1.0),
            k * position.y * (zr2 - 1.0),
            k * position.z * (zr2 - 3.0),
        );
        let expected = position * (-EARTH_MU / (r2 * r)) + perturbation;

        let accel = acceleration(&table, 2, 0, &position);
        assert_vector_close(&accel, &expected, 1e-16, "J2");
    }

    #[test]
    fn test_sectoral_term_matches_potential_gradient() {
        let mut table = earth(2, 2);
        table.set(2, 2, 2.43914352398e-6, -1.40016683654e-6);
        table.set(2, 1, -2.0e-10, 1.2e-9);

        // Unnormalized potential of the (2,1) and (2,2) terms, differentiated numerically.
        let potential = |p: &Vector3| {
            let r = p.magnitude();
            let rxy = p.x.hypot(p.y);
            let sin_phi = p.z / r;
            let cos_phi = rxy / r;
            let lambda = p.y.atan2(p.x);
            let ratio = EARTH_EQUATORIAL_RADIUS / r;
            let p21 = 3.0 * sin_phi * cos_phi;
            let p22 = 3.0 * cos_phi * cos_phi;
            let n21 = normalization_factor(2, 1);
            let n22 = normalization_factor(2, 2);
            EARTH_MU / r
                * ratio
                * ratio
                * (p21 * n21 * (table.c(2, 1) * lambda.cos() + table.s(2, 1) * lambda.sin())
                    + p22 * n22 * (table.c(2, 2) * (2.0 * lambda).cos() + table.s(2, 2) * (2.0 * lambda).sin()))
        };

        let position = Vector3::new(-2500.0, 6100.0, 1800.0);
        let h = 1e-3;
        let gradient = |axis: usize| {
            let mut plus = position.to_array();
            let mut minus = position.to_array();
            plus[axis] += h;
            minus[axis] -= h;
            (potential(&Vector3::from_array(plus)) - potential(&Vector3::from_array(minus))) / (2.0 * h)
        };
        let r = position.magnitude();
        let central = position * (-EARTH_MU / (r * r * r));
        let expected = central + Vector3::new(gradient(0), gradient(1), gradient(2));

        let accel = acceleration(&table, 2, 2, &position);
        assert_vector_close(&accel, &expected, 1e-13, "sectoral");
    }

    #[test]
    fn test_request_clipped_to_table() {
        let mut table = earth(2, 0);
        table.set(2, 0, -4.84e-4, 0.0);
        let position = Vector3::new(7000.0, 0.0, 1000.0);
        let a = acceleration(&table, 2, 0, &position);
        let b = acceleration(&table, 50, 50, &position);
        assert_eq!(a.to_array(), b.to_array());
    }

    #[test]
    fn test_high_degree_recursion_stays_finite() {
        let mut table = earth(360, 360);
        table.set(360, 360, 1e-9, 1e-9);
        let accel = acceleration(&table, 360, 360, &Vector3::new(6500.0, 1200.0, 900.0));
        assert!(accel.is_finite());
    }
}
