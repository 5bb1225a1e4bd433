use std::path::Path;

use super::{check_declared_size, parse_number, GravityCoefficients};
use crate::{GravityError, GravityResult};

/// Parses `.cof` card-image content.
///
/// ```text
/// POTFIELD  70 70   1 .3986004415E+15 .6378136300E+07 1.
/// RECOEF     2  0 -.48416537488647E-03 .00000000000000E+00
/// END
/// ```
///
/// Cards are read as whitespace-separated fields; when that fails (values
/// running into each other) the fixed card columns are used instead. Any other
/// card, such as `C` comments, is skipped.
pub fn parse_cof(content: &str, path: &Path) -> GravityResult<GravityCoefficients> {
    let mut table: Option<GravityCoefficients> = None;

    for (index, line) in content.lines().enumerate() {
        let card = line.split_whitespace().next().unwrap_or("");
        match card {
            "POTFIELD" => {
                let (degree, order, mu, radius) = potfield_card(line).ok_or_else(|| {
                    GravityError::parsing(path, format!("line {}: malformed POTFIELD card", index + 1))
                })?;
                check_declared_size(path, degree, order)?;
                table = Some(GravityCoefficients::new(mu / 1.0e9, radius / 1.0e3, degree, order));
            }
            "RECOEF" => {
                let table = table.as_mut().ok_or_else(|| {
                    GravityError::parsing(path, format!("line {}: RECOEF card before POTFIELD", index + 1))
                })?;
                let (n, m, c, s) = recoef_card(line).ok_or_else(|| {
                    GravityError::parsing(path, format!("line {}: malformed RECOEF card", index + 1))
                })?;
                table.set(n, m, c, s);
            }
            "END" => break,
            _ => {}
        }
    }

    table.ok_or_else(|| GravityError::parsing(path, "no POTFIELD card found"))
}

fn potfield_card(line: &str) -> Option<(usize, usize, f64, f64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() >= 6 {
        if let (Ok(degree), Ok(order), Some(mu), Some(radius)) = (
            fields[1].parse::<usize>(),
            fields[2].parse::<usize>(),
            parse_number(fields[4]),
            parse_number(fields[5]),
        ) {
            return Some((degree, order, mu, radius));
        }
    }

    let degree = column(line, 8, 11)?.parse().ok()?;
    let order = column(line, 11, 14)?.parse().ok()?;
    let mu = parse_number(column(line, 17, 38)?)?;
    let radius = parse_number(column(line, 38, 59)?)?;
    Some((degree, order, mu, radius))
}

fn recoef_card(line: &str) -> Option<(usize, usize, f64, f64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() >= 4 {
        if let (Ok(n), Ok(m), Some(c)) = (
            fields[1].parse::<usize>(),
            fields[2].parse::<usize>(),
            parse_number(fields[3]),
        ) {
            let s = match fields.get(4) {
                Some(token) => parse_number(token)?,
                None => 0.0,
            };
            return Some((n, m, c, s));
        }
    }

    let n = column(line, 8, 11)?.parse().ok()?;
    let m = column(line, 11, 14)?.parse().ok()?;
    let c = parse_number(column(line, 17, 38)?)?;
    let s = match column(line, 38, 59) {
        Some(text) => parse_number(text)?,
        None => 0.0,
    };
    Some((n, m, c, s))
}

/// Trimmed, non-empty text of columns `start..end`, clipped to the line.
fn column(line: &str, start: usize, end: usize) -> Option<&str> {
    let text = line.get(start..end.min(line.len()))?.trim();
    (!text.is_empty()).then_some(text)
}
