use std::sync::Arc;

use lunisolar::delta_t::{delta_t_days, delta_t_minutes};
use lunisolar::new_moon::{reference_month_index, true_new_moon};
use lunisolar::perturbation::perturbation;
use lunisolar::solar_term::vernal_equinox;
use lunisolar::{
    calendar_from_julian_day, julian_day, CalendarConfig, CalendarError, ChineseCalendar,
    CivilDateTime, JulianDay, JulianEphemerisDay, LunarYearTable, SolarTerm,
};
use qtty::Days;

fn china() -> Days {
    CalendarConfig::default().utc_offset()
}

#[test]
fn reference_scenarios() {
    let jd = julian_day(1581, 1, 1, 12, 0, 0, 0).unwrap();
    assert_eq!(jd.value(), 2_298_519.0);

    assert!((delta_t_days(2021, 12).unwrap().value() - 0.000_840_638_6).abs() < 1e-9);
    assert!((delta_t_minutes(2021, 12).unwrap() - 1.210_519_6).abs() < 1e-6);

    let jde = JulianEphemerisDay::new(jd.value());
    assert!((perturbation(jde).value() + 0.005_614_174_9).abs() < 1e-9);

    assert!((vernal_equinox(2021).unwrap().value() - 2_459_293.899_717_6).abs() < 1e-6);

    let k = reference_month_index(jde);
    assert!((true_new_moon(k).value() - 2_298_493.298_971_2).abs() < 1e-6);
}

#[test]
fn reference_pillars_through_facade() {
    let dt = CivilDateTime::new(2021, 5, 6, 23, 50, 0).unwrap();
    let pairs = |cal: &ChineseCalendar| {
        let p = cal.sexagenary_cycle(&dt).unwrap();
        [p.year, p.month, p.day].map(|gz| (gz.stem_index(), gz.branch_index()))
    };

    let plain = ChineseCalendar::new(CalendarConfig::default().night_zi_hour(false));
    assert_eq!(pairs(&plain), [(7, 1), (9, 5), (1, 3)]);

    let night_zi = ChineseCalendar::new(CalendarConfig::default().night_zi_hour(true));
    assert_eq!(pairs(&night_zi), [(7, 1), (9, 5), (0, 2)]);
}

#[test]
fn civil_round_trip_sweep() {
    let mut jd = 1_000_000.3;
    while jd < 3_000_000.0 {
        let civil = calendar_from_julian_day(JulianDay::new(jd));
        let back = civil.to_julian_day().value();
        assert!((back - jd).abs() < 1e-8, "{jd} -> {civil} -> {back}");
        jd += 9_973.123_456;
    }
}

#[test]
fn gap_dates_do_not_exist() {
    assert_eq!(
        julian_day(1582, 10, 10, 0, 0, 0, 0),
        Err(CalendarError::NonexistentDate {
            year: 1582,
            month: 10,
            day: 10
        })
    );
    let last_julian = julian_day(1582, 10, 4, 0, 0, 0, 0).unwrap();
    let first_gregorian = julian_day(1582, 10, 15, 0, 0, 0, 0).unwrap();
    assert_eq!((first_gregorian - last_julian).value(), 1.0);
}

#[test]
fn lunar_new_years() {
    let cal = ChineseCalendar::default();
    for (year, expected) in [
        (1984, (1984, 2, 2)),
        (2000, (2000, 2, 5)),
        (2020, (2020, 1, 25)),
        (2021, (2021, 2, 12)),
        (2023, (2023, 1, 22)),
        (2024, (2024, 2, 10)),
    ] {
        let dt = cal.lunar_to_gregorian(year, 1, 1, false).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), expected, "{year}");
        assert_eq!((dt.hour(), dt.minute()), (0, 0));
    }
}

#[test]
fn known_leap_months() {
    let cal = ChineseCalendar::default();
    assert_eq!(cal.leap_month(2017), Ok(Some(6)));
    assert_eq!(cal.leap_month(2020), Ok(Some(4)));
    assert_eq!(cal.leap_month(2023), Ok(Some(2)));
    assert_eq!(cal.leap_month(2022), Ok(None));
}

#[test]
fn lunar_round_trip_over_every_year() {
    let cal = ChineseCalendar::default();
    for year in 1000..=2999 {
        let mut months: Vec<(u32, bool)> = (1..=12).map(|m| (m, false)).collect();
        if let Some(m) = cal.leap_month(year).unwrap() {
            months.push((m, true));
        }
        for (month, is_leap) in months {
            let len = cal.lunar_month_days(year, month, is_leap).unwrap();
            assert!(len == 29 || len == 30, "{year}-{month} has {len} days");
            for day in [1, 15, len] {
                let civil = cal.lunar_to_gregorian(year, month, day, is_leap).unwrap();
                let lunar = cal.gregorian_to_lunar(&civil).unwrap();
                assert_eq!(
                    (lunar.year, lunar.month, lunar.day, lunar.is_leap_month),
                    (year, month, day, is_leap),
                    "via {civil}"
                );
            }
        }
    }
}

#[test]
fn consecutive_lunar_years_meet_without_gap() {
    let cal = ChineseCalendar::default();
    for year in (1000..=2998).step_by(7) {
        let leap_twelfth = cal.leap_month(year).unwrap() == Some(12);
        let last = cal.lunar_month_days(year, 12, leap_twelfth).unwrap();
        let eve = cal.lunar_to_gregorian(year, 12, last, leap_twelfth).unwrap();
        let new_year = cal.lunar_to_gregorian(year + 1, 1, 1, false).unwrap();
        assert_eq!(
            (new_year.to_julian_day() - eve.to_julian_day()).value(),
            1.0,
            "{year}"
        );
    }
}

#[test]
fn leap_eleventh_month_of_2033() {
    let cal = ChineseCalendar::default();
    assert_eq!(cal.leap_month(2033), Ok(Some(11)));
    let start = cal.lunar_to_gregorian(2033, 11, 1, true).unwrap();
    assert_eq!((start.year(), start.month(), start.day()), (2033, 12, 22));
    let lunar = cal
        .gregorian_to_lunar(&CivilDateTime::date(2034, 1, 5).unwrap())
        .unwrap();
    assert_eq!(
        (lunar.year, lunar.month, lunar.is_leap_month),
        (2033, 11, true)
    );
    let new_year = cal.lunar_to_gregorian(2034, 1, 1, false).unwrap();
    assert_eq!((new_year.year(), new_year.month(), new_year.day()), (2034, 2, 19));
}

#[test]
fn at_most_one_leap_slot() {
    for year in (1200..=2800).step_by(11) {
        let table = LunarYearTable::new(year, china()).unwrap();
        let leaps = table.month_codes().iter().filter(|c| c.is_leap()).count();
        assert!(leaps <= 1, "{year} has {leaps} leap slots");
    }
}

#[test]
fn lunar_to_gregorian_validates_input() {
    let cal = ChineseCalendar::default();
    assert_eq!(
        cal.lunar_to_gregorian(2021, 4, 1, true),
        Err(CalendarError::NotALeapYear { year: 2021 })
    );
    assert!(matches!(
        cal.lunar_to_gregorian(2020, 5, 1, true),
        Err(CalendarError::NotTheLeapMonth { .. })
    ));
    assert!(matches!(
        cal.lunar_to_gregorian(2018, 12, 31, false),
        Err(CalendarError::DayOutOfRange { day: 31, max: 30 })
    ));
    assert!(matches!(
        cal.lunar_to_gregorian(2018, 13, 1, false),
        Err(CalendarError::InvalidLunarMonth { month: 13 })
    ));
}

#[test]
fn delta_t_rejects_years_outside_domain() {
    assert_eq!(
        delta_t_days(3001, 1),
        Err(CalendarError::DeltaTOutOfRange { year: 3001 })
    );
    let cal = ChineseCalendar::default();
    assert!(cal.gregorian_to_lunar(&CivilDateTime::date(3500, 1, 1).unwrap()).is_err());
}

#[test]
fn solar_term_listing_covers_a_year() {
    let cal = ChineseCalendar::default();
    let terms = cal.solar_terms(2021).unwrap();
    assert_eq!(terms.len(), 26);
    assert_eq!(terms[0].term, SolarTerm::Dongzhi);
    assert_eq!(terms[25].term, SolarTerm::Xiaohan);
    for pair in terms.windows(2) {
        let gap = (pair[1].instant - pair[0].instant).value();
        assert!(gap > 14.0 && gap < 16.5, "{} -> {}", pair[0], pair[1]);
    }
    let qingming = terms.iter().find(|t| t.term == SolarTerm::Qingming).unwrap();
    assert_eq!((qingming.local.month(), qingming.local.day()), (4, 4));
}

#[test]
fn sexagenary_bounds_are_stable() {
    let cal = ChineseCalendar::default();
    for (y, m, d, h) in [(1900, 3, 1, 0), (1949, 10, 1, 15), (2008, 8, 8, 20), (2100, 12, 31, 23)] {
        let dt = CivilDateTime::new(y, m, d, h, 0, 0).unwrap();
        let a = cal.sexagenary_cycle(&dt).unwrap();
        let b = cal.sexagenary_cycle(&dt).unwrap();
        assert_eq!(a, b);
        for gz in [a.year, a.month, a.day, a.hour] {
            assert!(gz.stem_index() < 10 && gz.branch_index() < 12);
            assert!(gz.cycle_index() < 60);
        }
    }
}

#[test]
fn shared_calendar_across_threads() {
    let cal = Arc::new(ChineseCalendar::default());
    let handles: Vec<_> = (0..6)
        .map(|i| {
            let cal = Arc::clone(&cal);
            std::thread::spawn(move || {
                let dt = CivilDateTime::date(2020 + i % 2, 5, 6).unwrap();
                cal.gregorian_to_lunar(&dt).unwrap()
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for pair in results.chunks(2) {
        assert_eq!(pair[0].to_string(), "2020-04-14");
        assert_eq!(pair[1].year, 2021);
    }
    let first = cal.year_table(2020).unwrap();
    assert!(Arc::ptr_eq(&first, &cal.year_table(2020).unwrap()));
}

#[test]
fn day_info_of_a_solar_term_day() {
    let cal = ChineseCalendar::default();
    let info = cal
        .day_info(&CivilDateTime::new(2021, 4, 4, 9, 30, 0).unwrap())
        .unwrap();
    assert_eq!(info.solar_term, Some(SolarTerm::Qingming));
    assert_eq!((info.lunar.year, info.lunar.month, info.lunar.day), (2021, 2, 23));
    assert_eq!(info.zodiac_name(), "牛");
}

#[cfg(feature = "serde")]
#[test]
fn serde_lunar_date_and_pillars() {
    let cal = ChineseCalendar::default();
    let info = cal
        .day_info(&CivilDateTime::date(2021, 2, 12).unwrap())
        .unwrap();
    let json = serde_json::to_string(&info).unwrap();
    assert!(json.contains("is_leap_month"));
    let back: lunisolar::DayInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back, info);
}

#[cfg(feature = "serde")]
#[test]
fn serde_rejects_values_the_constructors_refuse() {
    let gap = r#"{"year":1582,"month":10,"day":10,"hour":0,"minute":0,"second":0,"millisecond":0}"#;
    assert!(serde_json::from_str::<CivilDateTime>(gap).is_err());
    assert!(serde_json::from_str::<lunisolar::GanZhi>("200").is_err());
    assert!(serde_json::from_str::<lunisolar::MonthCode>(r#"{"ordinal":40,"leap":false}"#).is_err());

    let pillars = r#"{"year":37,"month":38,"day":99,"hour":0}"#;
    assert!(serde_json::from_str::<lunisolar::FourPillars>(pillars).is_err());
    let pillars = r#"{"year":37,"month":38,"day":9,"hour":0}"#;
    let p: lunisolar::FourPillars = serde_json::from_str(pillars).unwrap();
    assert_eq!(p.year.to_string(), "辛丑");
}
