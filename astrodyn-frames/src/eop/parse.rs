use super::EopRecord;
use crate::{FrameError, FrameResult};

/// Parses IERS `finals2000A` content, skipping lines without Bulletin A values.
pub fn parse_finals(content: &str) -> FrameResult<Vec<EopRecord>> {
    let mut records: Vec<EopRecord> = content.lines().filter_map(parse_finals_line).collect();

    if records.is_empty() {
        return Err(FrameError::parsing(
            "No valid records found in finals2000A data",
        ));
    }

    records.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
    Ok(records)
}

/// Parses one fixed-column `finals2000A` line.
///
/// Columns (0-based, end exclusive): MJD 7..15, x_p 18..27, y_p 37..46,
/// UT1 − UTC 58..68, LOD 79..86 (milliseconds).
pub fn parse_finals_line(line: &str) -> Option<EopRecord> {
    if line.len() < 68 {
        return None;
    }

    let mjd = parse_field(line, 7, 15)?;
    let x_p = parse_field(line, 18, 27)?;
    let y_p = parse_field(line, 37, 46)?;
    let ut1_utc = parse_field(line, 58, 68)?;
    let lod = parse_field(line, 79, 86).unwrap_or(0.0) * 0.001;

    Some(EopRecord::new(mjd, x_p, y_p, ut1_utc, lod))
}

fn parse_field(line: &str, start: usize, end: usize) -> Option<f64> {
    let s = line.get(start..end)?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finals_line(mjd: &[u8], lod: Option<&[u8]>) -> String {
        let mut line = vec![b' '; 188];
        line[7..7 + mjd.len()].copy_from_slice(mjd);
        line[18..27].copy_from_slice(b"  0.10000");
        line[37..46].copy_from_slice(b"  0.25000");
        line[58..68].copy_from_slice(b" -0.050000");
        if let Some(lod) = lod {
            line[79..79 + lod.len()].copy_from_slice(lod);
        }
        String::from_utf8(line).unwrap()
    }

    #[test]
    fn test_parse_single_line() {
        let record = parse_finals_line(&finals_line(b"60000.00", Some(b"  1.500"))).unwrap();
        assert_eq!(record.mjd, 60000.0);
        assert!((record.x_p - 0.1).abs() < 1e-12);
        assert!((record.y_p - 0.25).abs() < 1e-12);
        assert!((record.ut1_utc + 0.05).abs() < 1e-12);
        assert!((record.lod - 0.0015).abs() < 1e-12);
    }

    #[test]
    fn test_lod_zero_when_missing() {
        let record = parse_finals_line(&finals_line(b"60000.00", None)).unwrap();
        assert_eq!(record.lod, 0.0);
    }

    #[test]
    fn test_short_or_blank_lines_skipped() {
        assert!(parse_finals_line("short line").is_none());
        assert!(parse_finals_line(&" ".repeat(188)).is_none());
    }

    #[test]
    fn test_parse_finals_sorts_and_skips() {
        let content = format!(
            "header\n{}\n{}\n",
            finals_line(b"60001.00", None),
            finals_line(b"60000.00", None)
        );
        let records = parse_finals(&content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mjd, 60000.0);
    }

    #[test]
    fn test_parse_finals_empty_errors() {
        assert!(matches!(
            parse_finals("bad\nlines\n"),
            Err(FrameError::Parsing { .. })
        ));
    }
}
