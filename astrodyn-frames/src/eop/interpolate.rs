use std::path::Path;

use super::{parse_finals, EopRecord};
use crate::{FrameError, FrameResult};

/// Sorted EOP table with linear interpolation.
#[derive(Debug, Clone)]
pub struct EopData {
    records: Vec<EopRecord>,
    max_gap_days: f64,
}

impl EopData {
    pub fn from_records(mut records: Vec<EopRecord>) -> Self {
        records.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));

        Self {
            records,
            max_gap_days: 5.0,
        }
    }

    pub fn parse_finals(content: &str) -> FrameResult<Self> {
        Ok(Self::from_records(parse_finals(content)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> FrameResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FrameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_finals(&content)
    }

    pub fn with_max_gap(mut self, max_gap_days: f64) -> Self {
        self.max_gap_days = max_gap_days;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last MJD covered.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        Some((self.records.first()?.mjd, self.records.last()?.mjd))
    }

    /// Interpolated parameters at the standard UTC MJD `mjd`.
    pub fn get(&self, mjd: f64) -> FrameResult<EopRecord> {
        let (first, last) = self.time_span().ok_or_else(|| {
            FrameError::data_unavailable("No EOP records available for interpolation")
        })?;

        if mjd < first || mjd > last {
            return Err(FrameError::data_unavailable(format!(
                "MJD {:.3} is outside the EOP table span [{:.1}, {:.1}]",
                mjd, first, last
            )));
        }

        let after = self.records.partition_point(|r| r.mjd <= mjd);
        if after == 0 {
            return Ok(self.records[0]);
        }
        let r1 = &self.records[after - 1];
        if r1.mjd == mjd || after == self.records.len() {
            return Ok(EopRecord { mjd, ..*r1 });
        }
        let r2 = &self.records[after];

        let gap = r2.mjd - r1.mjd;
        if gap > self.max_gap_days {
            return Err(FrameError::data_unavailable(format!(
                "Gap of {:.1} days exceeds maximum interpolation gap of {:.1} days",
                gap, self.max_gap_days
            )));
        }

        let t = (mjd - r1.mjd) / gap;
        let lerp = |a: f64, b: f64| a + t * (b - a);

        Ok(EopRecord {
            mjd,
            x_p: lerp(r1.x_p, r2.x_p),
            y_p: lerp(r1.y_p, r2.y_p),
            ut1_utc: lerp(r1.ut1_utc, r2.ut1_utc),
            lod: lerp(r1.lod, r2.lod),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EopData {
        EopData::from_records(vec![
            EopRecord::new(60001.0, 0.2, 0.4, -0.1, 0.002),
            EopRecord::new(60000.0, 0.1, 0.3, 0.0, 0.001),
        ])
    }

    #[test]
    fn test_linear_interpolation() {
        let p = table().get(60000.25).unwrap();
        assert!((p.x_p - 0.125).abs() < 1e-12);
        assert!((p.y_p - 0.325).abs() < 1e-12);
        assert!((p.ut1_utc + 0.025).abs() < 1e-12);
        assert!((p.lod - 0.00125).abs() < 1e-12);
    }

    #[test]
    fn test_exact_match_and_endpoints() {
        let eop = table();
        assert_eq!(eop.get(60000.0).unwrap().x_p, 0.1);
        assert_eq!(eop.get(60001.0).unwrap().x_p, 0.2);
        assert_eq!(eop.time_span(), Some((60000.0, 60001.0)));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            table().get(59999.0),
            Err(FrameError::DataUnavailable { .. })
        ));
        assert!(table().get(60002.0).is_err());
    }

    #[test]
    fn test_max_gap_enforcement() {
        let eop = EopData::from_records(vec![
            EopRecord::zero(60000.0),
            EopRecord::zero(60010.0),
        ]);
        assert!(eop.get(60005.0).is_err());
        assert!(eop.with_max_gap(20.0).get(60005.0).is_ok());
    }

    #[test]
    fn test_empty_table() {
        let eop = EopData::from_records(Vec::new());
        assert!(eop.is_empty());
        assert!(eop.get(60000.0).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EopData::from_file("/nonexistent/finals2000A.data").unwrap_err();
        assert!(matches!(err, FrameError::Io { .. }));
    }
}
