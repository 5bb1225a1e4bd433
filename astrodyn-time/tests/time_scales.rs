use astrodyn_core::constants::EARTH_ANGULAR_VELOCITY;
use astrodyn_time::{
    earth_rotation_rate, tdb_centuries, JulianDate, TimeError, ToA1, ToTT, ToUT1WithDUT1, ToUTC,
    GMST, A1, TT, UT1, UTC,
};

#[test]
fn a1_leads_utc_by_leap_seconds_plus_offset() {
    let utc = UTC::from_julian_date(JulianDate::from_calendar(2017, 1, 1, 6, 0, 0.0));
    let a1 = utc.to_a1().unwrap();
    let offset = a1.to_julian_date().seconds_since(&utc.to_julian_date());
    assert!((offset - (37.0 + 0.0343817)).abs() < 1e-6);
}

#[test]
fn tt_and_a1_differ_by_fixed_offset() {
    let a1 = A1::from_gmat_mjd(26000.123);
    let tt = a1.to_tt().unwrap();
    let offset = tt.to_julian_date().seconds_since(&a1.to_julian_date());
    assert!((offset - (32.184 - 0.0343817)).abs() < 1e-6);
}

#[test]
fn utc_round_trip_through_a1() {
    for mjd in [22000.0, 25000.5, 27000.99] {
        let a1 = A1::from_gmat_mjd(mjd);
        let back = a1.to_utc().unwrap().to_a1().unwrap();
        assert!(back.seconds_since(&a1).abs() < 1e-6, "mjd {}", mjd);
    }
}

#[test]
fn utc_before_leap_second_table_is_rejected() {
    let utc = UTC::from_julian_date(JulianDate::from_calendar(1965, 6, 1, 0, 0, 0.0));
    assert!(matches!(utc.to_a1(), Err(TimeError::InvalidEpoch(_))));
}

#[test]
fn ut1_applies_dut1() {
    let utc = UTC::from_gmat_mjd(25000.0);
    let ut1: UT1 = utc.to_ut1_with_dut1(0.3).unwrap();
    let offset = ut1.to_julian_date().seconds_since(&utc.to_julian_date());
    assert!((offset - 0.3).abs() < 1e-6);
}

#[test]
fn gmst_at_j2000() {
    let gmst = GMST::iau1982(&UT1::j2000()).unwrap();
    assert!((gmst.hours() - 18.697374558).abs() < 1e-6);
}

#[test]
fn tdb_centuries_count_julian_centuries() {
    let later = TT::from_gmat_mjd(21545.0 + 36525.0);
    assert!((tdb_centuries(&later) - 1.0).abs() < 1e-12);
    let earlier = TT::from_gmat_mjd(21545.0 - 3652.5);
    assert!((tdb_centuries(&earlier) + 0.1).abs() < 1e-12);
}

#[test]
fn length_of_day_slows_rotation() {
    assert_eq!(earth_rotation_rate(0.0), EARTH_ANGULAR_VELOCITY);
    let slower = earth_rotation_rate(0.002);
    assert!(slower < EARTH_ANGULAR_VELOCITY);
    assert!((EARTH_ANGULAR_VELOCITY - slower - EARTH_ANGULAR_VELOCITY * 0.002 / 86400.0).abs() < 1e-20);
}
