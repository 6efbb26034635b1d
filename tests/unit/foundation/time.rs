use super::*;

#[test]
fn rational_parses_fraction_and_whole_seconds() {
    assert_eq!(
        RationalTime::parse("1001/30000s"),
        Some(RationalTime {
            num: 1001,
            den: 30000
        })
    );
    assert_eq!(RationalTime::parse("5s").unwrap().as_secs(), Some(5.0));
    assert_eq!(RationalTime::parse(" 2.5s ").unwrap().as_secs(), Some(2.5));
    assert_eq!(RationalTime::parse("0s"), Some(RationalTime::ZERO));
}

#[test]
fn rational_rejects_garbage_and_zero_denominator() {
    assert_eq!(RationalTime::parse(""), None);
    assert_eq!(RationalTime::parse("s"), None);
    assert_eq!(RationalTime::parse("1/0s"), None);
    assert_eq!(RationalTime::parse("abc"), None);
}

#[test]
fn ntsc_timebase_is_pulled_down() {
    let fr = FrameRate::from_timebase(30.0, true).unwrap();
    assert!((fr.fps() - 29.97002997).abs() < 1e-6);
    assert_eq!(FrameRate::from_timebase(24.0, false).unwrap().fps(), 24.0);
}

#[test]
fn frames_secs_conversion() {
    let fr = FrameRate::new(30.0).unwrap();
    assert_eq!(fr.frames_to_secs(30.0), 1.0);
    assert_eq!(fr.secs_to_frames(2.0), 60.0);
    assert!(FrameRate::new(0.0).is_none());
    assert!(FrameRate::new(f64::NAN).is_none());
}

#[test]
fn flags_and_numbers() {
    assert_eq!(parse_flag("TRUE"), Some(true));
    assert_eq!(parse_flag("0"), Some(false));
    assert_eq!(parse_flag("maybe"), None);
    assert_eq!(parse_number(" 12.5 "), Some(12.5));
    assert_eq!(parse_number("inf"), None);
}
