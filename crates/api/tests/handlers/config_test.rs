use carport_api::config::{parse_log_level, parse_operating_hours, parse_origins};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case(" warn ", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
#[case("", Level::INFO)]
fn test_parse_log_level(#[case] input: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(input), expected);
}

#[test]
fn test_parse_origins_skips_blanks() {
    let origins = parse_origins("http://localhost:5173, https://carport.example ,,");

    assert_eq!(
        origins,
        vec![
            "http://localhost:5173".to_string(),
            "https://carport.example".to_string()
        ]
    );
}

#[test]
fn test_parse_operating_hours() {
    let hours = parse_operating_hours("Asia/Jakarta", "8", "18").unwrap();

    assert_eq!(hours.timezone, chrono_tz::Asia::Jakarta);
    assert_eq!(hours.open_hour, 8);
    assert_eq!(hours.close_hour, 18);
}

#[rstest]
#[case::unknown_timezone("Mars/Olympus", "8", "18")]
#[case::not_a_number("Asia/Jakarta", "eight", "18")]
#[case::closes_before_opening("Asia/Jakarta", "18", "8")]
#[case::same_hour("Asia/Jakarta", "9", "9")]
fn test_parse_operating_hours_rejects(#[case] tz: &str, #[case] open: &str, #[case] close: &str) {
    assert!(parse_operating_hours(tz, open, close).is_err());
}
