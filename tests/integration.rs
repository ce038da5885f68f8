use attochron::{
    CalendarDate, CalendarDateTime, ClockTime, ExactOffset, GlonassScale, Instant, OffsetModel,
    TangentInstant, TimeError, TimeScale, TimeUnit, UtcScale, BDT, GPS, GST, TAI, TCB, TCG, TDB,
    TT,
};
use chrono::{DateTime, NaiveDate};
use std::sync::Arc;
use std::thread;

fn utc() -> UtcScale {
    UtcScale::with_default_history().expect("embedded history")
}

fn secs(text: &str) -> ExactOffset {
    ExactOffset::parse(text).expect("offset literal")
}

#[test]
fn readings_round_trip_in_every_uniform_scale() {
    let reading = CalendarDateTime::parse("2024-02-29T17:45:12.123456789012345678").unwrap();
    let scales: [&dyn TimeScale; 5] = [&TAI, &TT, &GPS, &GST, &BDT];
    for scale in scales {
        let t = Instant::from_calendar(&reading, scale);
        assert_eq!(t.to_calendar(scale), reading, "{}", scale.name());
    }
    // iterative inverses are exact to well under a nanosecond
    for scale in [&TCG as &dyn TimeScale, &TDB, &TCB] {
        let t = Instant::from_calendar(&reading, scale);
        let back = t.to_calendar(scale);
        assert!(back.offset_from(&reading).abs() < ExactOffset::NANOSECOND, "{}", scale.name());
    }
}

#[test]
fn physical_durations_do_not_depend_on_the_scale() {
    let a = Instant::parse("2010-05-01T00:00:00", &TT).unwrap();
    let b = Instant::parse("2010-05-01T06:30:00.5", &TT).unwrap();
    let dt = b.duration_from(a);
    assert_eq!(dt, secs("23400.5"));
    assert_eq!(a.shifted_by(dt), b);
    assert_eq!(b - a, dt);
    assert_eq!(b.offset_from(a, &GPS), dt);
    assert_eq!(b.offset_from(a, &TAI), dt);
}

#[test]
fn gnss_scales_read_fixed_offsets() {
    let t = Instant::parse("2020-01-01T00:00:00", &TAI).unwrap();
    assert_eq!(t.time_scales_offset(&TT, &TAI), secs("32.184"));
    assert_eq!(t.time_scales_offset(&GPS, &TAI), ExactOffset::new(-19, 0));
    assert_eq!(t.time_scales_offset(&BDT, &GPS), ExactOffset::new(-14, 0));
    assert_eq!(t.time_scales_offset(&GST, &GPS), ExactOffset::ZERO);
}

#[test]
fn gps_tracks_utc_after_its_epoch() {
    let utc = utc();
    assert_eq!(Instant::gps_epoch(), Instant::parse("1980-01-06", &utc).unwrap());
    assert_eq!(Instant::beidou_epoch(), Instant::parse("2006-01-01", &utc).unwrap());
    let t = Instant::parse("2020-06-01T00:00:00", &utc).unwrap();
    assert_eq!(t.time_scales_offset(&GPS, &utc), ExactOffset::new(18, 0));
}

#[test]
fn leap_second_of_2016() {
    let utc = utc();
    let before = Instant::parse("2016-12-31T23:59:59", &utc).unwrap();
    let after = Instant::parse("2017-01-01T00:00:00", &utc).unwrap();

    assert_eq!(after.duration_from(before), ExactOffset::new(2, 0));
    assert_eq!(after.offset_from(before, &utc), ExactOffset::SECOND);

    let leap = before + secs("1.25");
    assert!(utc.inside_leap(leap));
    assert_eq!(leap.to_calendar(&utc).to_string(), "2016-12-31T23:59:60.25+00:00");
    assert_eq!(leap.format(&utc, 1), "2016-12-31T23:59:60.3");
    assert_eq!(leap.to_rfc3339(&utc), "2016-12-31T23:59:60.25Z");
    assert_eq!(
        Instant::from_modified_julian_day(57_753, secs("86400.25"), &utc).unwrap(),
        leap
    );
    assert!(matches!(
        Instant::from_modified_julian_day(57_752, secs("86400.25"), &utc),
        Err(TimeError::OutOfRangeSeconds { .. })
    ));
}

#[test]
fn tai_minus_utc_through_history() {
    let utc = utc();
    let cases = [
        ("1961-06-01", "1.618514"),
        ("1966-01-02", "4.315762"),
        ("1970-01-01", "8.000082"),
        ("1972-01-01", "10"),
        ("1999-06-01", "32"),
        ("2017-01-01", "37"),
        ("2030-01-01", "37"),
    ];
    for (date, expected) in cases {
        let t = Instant::parse(date, &utc).unwrap();
        let tai_minus_utc = -utc.offset_from_tai(t);
        assert!(
            (tai_minus_utc - secs(expected)).abs() < ExactOffset::new(0, 100_000_000_000_000),
            "{date}: {tai_minus_utc}"
        );
    }
}

#[test]
fn custom_history_tables() {
    let rows = vec![
        OffsetModel::constant(CalendarDate::new(1999, 1, 1).unwrap(), ExactOffset::new(32, 0)),
        OffsetModel::constant(CalendarDate::new(2006, 1, 1).unwrap(), ExactOffset::new(33, 0)),
    ];
    let spliced = UtcScale::new(rows.clone()).unwrap();
    assert_eq!(spliced.entries().len(), 15);

    let bare = UtcScale::without_linear_history(rows).unwrap();
    assert_eq!(bare.entries().len(), 2);
    // the first row is a 32 s jump from TAI
    assert_eq!(bare.entries()[0].leap(), ExactOffset::new(32, 0));
    let t = Instant::parse("2005-12-31T23:59:60.5", &bare).unwrap();
    assert_eq!(t.to_calendar(&bare), CalendarDateTime::parse("2005-12-31T23:59:60.5").unwrap());
    assert_eq!(UtcScale::new(Vec::new()), Err(TimeError::NoLeapSecondHistory));
}

#[test]
fn chrono_interop_counts_leap_seconds() {
    let utc = utc();
    let a = DateTime::from_timestamp(1_483_228_799, 0).unwrap();
    let b = DateTime::from_timestamp(1_483_228_800, 0).unwrap();
    let ta = Instant::from_utc(a, &utc);
    let tb = Instant::from_utc(b, &utc);
    assert_eq!(tb.duration_from(ta), ExactOffset::new(2, 0));
    assert_eq!(ta.to_utc(&utc), Some(a));

    let chrono_leap = NaiveDate::from_ymd_opt(2016, 12, 31)
        .unwrap()
        .and_hms_nano_opt(23, 59, 59, 1_500_000_000)
        .unwrap()
        .and_utc();
    let leap = Instant::from_utc(chrono_leap, &utc);
    assert_eq!(leap.duration_from(ta), secs("1.5"));
    assert_eq!(leap.to_utc(&utc), Some(chrono_leap));
}

#[test]
fn julian_days_and_centuries() {
    let j2000 = Instant::j2000_epoch();
    assert_eq!(j2000.julian_day(&TT).value(), 2_451_545.0);
    assert_eq!(j2000.modified_julian_day(&TT).value(), 51_544.5);
    assert_eq!(j2000.julian_centuries().value(), 0.0);
    assert_eq!(Instant::from_julian_day(2_451_545, ExactOffset::ZERO, &TT), j2000);
    assert_eq!(
        Instant::from_modified_julian_day(51_544, ExactOffset::new(43_200, 0), &TT).unwrap(),
        j2000
    );
    let next = Instant::julian_epoch_year(2100.0);
    assert!((next.julian_centuries().value() - 1.0).abs() < 1e-12);
}

#[test]
fn calendar_reform_and_validation() {
    let before = CalendarDate::new(1582, 10, 4).unwrap();
    let after = CalendarDate::new(1582, 10, 15).unwrap();
    assert_eq!(after.days_from(&before), 1);
    assert!(matches!(
        CalendarDate::new(1582, 10, 10),
        Err(TimeError::InvalidCalendarDate { .. })
    ));
    assert!(CalendarDateTime::parse("2001-02-29").is_err());
    assert!(ClockTime::new(24, 0, ExactOffset::ZERO).is_err());
    assert!(ClockTime::new(23, 59, ExactOffset::new(62, 0)).is_err());
}

#[test]
fn local_offsets_shift_hours_only() {
    let utc = utc();
    let leap = Instant::parse("2016-12-31T23:59:60.5", &utc).unwrap();
    let paris = leap.to_calendar_with_offset(&utc, 60).unwrap();
    assert_eq!(paris.to_string(), "2017-01-01T00:59:60.5+01:00");
    assert_eq!(Instant::from_calendar(&paris, &utc), leap);
}

#[test]
fn glonass_shares_the_utc_table_across_threads() {
    let utc = Arc::new(utc());
    let glonass = Arc::new(GlonassScale::new(Arc::clone(&utc)));
    let handles: Vec<_> = (0..4)
        .map(|hour| {
            let glonass = Arc::clone(&glonass);
            let utc = Arc::clone(&utc);
            thread::spawn(move || {
                let text = format!("2015-03-01T{:02}:00:00", hour + 3);
                let t = Instant::parse(&text, glonass.as_ref()).unwrap();
                t.time_scales_offset(glonass.as_ref(), utc.as_ref())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), ExactOffset::new(10_800, 0));
    }
}

#[test]
fn exact_arithmetic_and_units() {
    let day = ExactOffset::from_value(1, TimeUnit::Day);
    assert_eq!(day, ExactOffset::DAY);
    assert_eq!(ExactOffset::SECOND.divide(3) * 3, ExactOffset::SECOND - ExactOffset::ATTOSECOND);
    assert_eq!(ExactOffset::new(i64::MAX, 0).checked_add(ExactOffset::SECOND), None);
    assert!((ExactOffset::new(i64::MAX, 0) + ExactOffset::SECOND).is_infinite());
    assert_eq!(format!("{:.3}", secs("1.23456")), "1.235");
}

#[test]
fn tangent_instants_keep_the_exact_anchor() {
    let utc = utc();
    let start = TangentInstant::<f64>::new(Instant::parse("2016-12-31T23:59:58", &utc).unwrap());
    let later = start.shifted_by(2.5);
    assert_eq!(later.duration_from(&start), 2.5);
    assert_eq!(later.to_calendar(&utc).to_string(), "2016-12-31T23:59:60.5+00:00");
}

#[test]
fn infinities_and_nan() {
    assert!(Instant::PAST_INFINITY < Instant::j2000_epoch());
    assert!(Instant::FUTURE_INFINITY > Instant::j2000_epoch());
    let nan = Instant::j2000_epoch() + ExactOffset::NAN;
    assert!(nan.is_nan());
    assert!(nan.to_calendar(&TAI).time().second().is_nan());
    assert_eq!(
        Instant::FUTURE_INFINITY.to_calendar(&TAI).date(),
        CalendarDate::max_epoch()
    );
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trips_value_types() {
    let utc = utc();
    let t = Instant::parse("2016-12-31T23:59:60.5", &utc).unwrap();
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(serde_json::from_str::<Instant>(&json).unwrap(), t);

    let reading = t.to_calendar(&utc);
    let json = serde_json::to_string(&reading).unwrap();
    assert_eq!(serde_json::from_str::<CalendarDateTime>(&json).unwrap(), reading);

    let row = OffsetModel::linear(CalendarDate::new(1966, 1, 1).unwrap(), 39_126, secs("4.31317"), 2_592_000);
    let json = serde_json::to_string(&row).unwrap();
    assert!(json.contains("slope_nanos_per_day"));
    assert_eq!(serde_json::from_str::<OffsetModel>(&json).unwrap(), row);
}

#[test]
fn repeated_addition_does_not_drift() {
    let tenth = secs("0.1");
    let total: ExactOffset = (0..10_000).map(|_| tenth).sum();
    assert_eq!(total, ExactOffset::new(1_000, 0));
    let lossy = ExactOffset::from_seconds_f64(0.1);
    let total: ExactOffset = (0..10_000).map(|_| lossy).sum();
    assert!((total - ExactOffset::new(1_000, 0)).abs() < ExactOffset::new(0, 100_000) * 10_000);
}

#[test]
fn duration_sign_matches_order() {
    let utc = utc();
    let instants = [
        Instant::parse("1965-03-01T00:00:00.1", &utc).unwrap(),
        Instant::parse("2005-12-31T23:59:60.5", &utc).unwrap(),
        Instant::parse("2006-01-01", &utc).unwrap(),
        Instant::j2000_epoch(),
        Instant::FUTURE_INFINITY,
    ];
    for a in instants {
        for b in instants {
            assert_eq!(a.duration_from(b) > ExactOffset::ZERO, a > b, "{a} vs {b}");
        }
    }
}

#[test]
fn iso_fixed_points() {
    assert_eq!(
        CalendarDateTime::parse("1858-W46-3").unwrap().date(),
        CalendarDate::MODIFIED_JULIAN_EPOCH
    );
    assert_eq!(
        Instant::parse("1958-001", &TAI).unwrap(),
        Instant::ccsds_epoch()
    );
}
