use std::path::Path;

use super::{check_declared_size, normalization_factor, parse_number, GravityCoefficients};
use crate::{GravityError, GravityResult};

/// Parses `.grv` keyword content.
///
/// ```text
/// stk.v.4.0
/// BEGIN Gravity
///     Degree       70
///     Order        70
///     Gm           3.986004415e+14
///     RefDistance  6378136.3
///     Normalized   Yes
/// BEGIN Coefficients
///     2  0  -4.841653748864e-04  0.0
/// END Coefficients
/// END Gravity
/// ```
///
/// Rows starting with a degree are coefficients; `Normalized No` tables are
/// normalized on load. Keywords are case-insensitive and `#` starts a comment.
pub fn parse_grv(content: &str, path: &Path) -> GravityResult<GravityCoefficients> {
    let mut degree: Option<usize> = None;
    let mut order: Option<usize> = None;
    let mut mu: Option<f64> = None;
    let mut radius: Option<f64> = None;
    let mut normalized = true;
    let mut rows: Vec<(usize, usize, f64, f64)> = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut fields = line.split_whitespace();
        let Some(first) = fields.next() else {
            continue;
        };
        let malformed = |what: &str| {
            GravityError::parsing(path, format!("line {}: malformed {}", index + 1, what))
        };

        if let Ok(n) = first.parse::<usize>() {
            let m = fields.next().and_then(|t| t.parse::<usize>().ok());
            let c = fields.next().and_then(parse_number);
            let s = fields.next().map(parse_number).unwrap_or(Some(0.0));
            match (m, c, s) {
                (Some(m), Some(c), Some(s)) => rows.push((n, m, c, s)),
                _ => return Err(malformed("coefficient row")),
            }
            continue;
        }

        let value = fields.next();
        match first.to_ascii_lowercase().as_str() {
            "degree" => {
                degree = Some(value.and_then(|v| v.parse().ok()).ok_or_else(|| malformed("Degree"))?)
            }
            "order" => {
                order = Some(value.and_then(|v| v.parse().ok()).ok_or_else(|| malformed("Order"))?)
            }
            "gm" => mu = Some(value.and_then(parse_number).ok_or_else(|| malformed("Gm"))?),
            "refdistance" => {
                radius = Some(value.and_then(parse_number).ok_or_else(|| malformed("RefDistance"))?)
            }
            "normalized" => {
                normalized = match value.map(str::to_ascii_lowercase).as_deref() {
                    Some("yes") | Some("true") => true,
                    Some("no") | Some("false") => false,
                    _ => return Err(malformed("Normalized")),
                }
            }
            _ => {}
        }
    }

    let degree = degree.ok_or_else(|| GravityError::parsing(path, "missing Degree"))?;
    let mu = mu.ok_or_else(|| GravityError::parsing(path, "missing Gm"))?;
    let radius = radius.ok_or_else(|| GravityError::parsing(path, "missing RefDistance"))?;
    let order = order.unwrap_or(degree);
    check_declared_size(path, degree, order)?;

    let mut table = GravityCoefficients::new(mu / 1.0e9, radius / 1.0e3, degree, order);
    for (n, m, c, s) in rows {
        let (c, s) = if normalized || m > n {
            (c, s)
        } else {
            let factor = normalization_factor(n, m);
            (c / factor, s / factor)
        };
        if !c.is_finite() || !s.is_finite() {
            return Err(GravityError::parsing(
                path,
                format!("coefficient ({}, {}) cannot be normalized", n, m),
            ));
        }
        table.set(n, m, c, s);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMALIZED: &str = "\
stk.v.4.0
# test model
BEGIN Gravity
    Degree       3
    Order        2
    Gm           4.902800066e+12
    RefDistance  1738000.0
    Normalized   Yes
BEGIN Coefficients
    2  0  -9.0888e-05  0.0
    2  2   3.4673e-05  1.5e-09
    3  1   2.8e-05     5.9e-06
    3  3   1.0         1.0
END Coefficients
END Gravity
";

    #[test]
    fn test_parse_normalized() {
        let table = parse_grv(NORMALIZED, Path::new("moon.grv")).unwrap();
        assert_eq!(table.degree(), 3);
        assert_eq!(table.order(), 2);
        assert!((table.mu - 4902.800066).abs() < 1e-9);
        assert!((table.radius - 1738.0).abs() < 1e-12);
        assert_eq!(table.c(2, 0), -9.0888e-5);
        assert_eq!(table.s(2, 2), 1.5e-9);
        assert_eq!(table.s(3, 1), 5.9e-6);
        // beyond the order
        assert_eq!(table.c(3, 3), 0.0);
    }

    #[test]
    fn test_unnormalized_rows_are_normalized() {
        let content = "\
Degree 2
Gm 3.986004415e14
RefDistance 6378136.3
Normalized No
2 0 -1.0826e-3 0.0
";
        let table = parse_grv(content, Path::new("j2.grv")).unwrap();
        assert_eq!(table.order(), 2);
        assert!((table.c(2, 0) + 1.0826e-3 / 5f64.sqrt()).abs() < 1e-15);
        assert!((table.j2() - 1.0826e-3).abs() < 1e-15);
    }

    #[test]
    fn test_missing_keywords() {
        let err = parse_grv("Degree 2\nRefDistance 1.0\n", Path::new("x.grv")).unwrap_err();
        assert!(err.to_string().contains("missing Gm"));
        let err = parse_grv("Degree 2\nGm 1.0\nRefDistance 1.0\n2 0 x\n", Path::new("x.grv")).unwrap_err();
        assert!(err.to_string().contains("coefficient row"));
    }

    #[test]
    fn test_oversized_degree_is_rejected() {
        let err = parse_grv("Degree 361\nOrder 0\nGm 1.0\nRefDistance 1.0\n", Path::new("x.grv")).unwrap_err();
        assert!(err.to_string().contains("exceeds (360, 360)"));
        assert!(parse_grv("Degree 360\nOrder 0\nGm 1.0\nRefDistance 1.0\n", Path::new("x.grv")).is_ok());
    }
}
