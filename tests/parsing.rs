use std::fs;
use std::path::PathBuf;

use bet_terminal::api_football::{parse_day_fixtures_json, parse_team_fixtures_json};
use bet_terminal::error::FetchError;
use bet_terminal::form::goals_scored_by;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_day_listing_and_drops_malformed_items() {
    let raw = read_fixture("fixtures_day.json");
    let fixtures = parse_day_fixtures_json(&raw).expect("fixture should parse");
    // Five items, one without `teams`.
    assert_eq!(fixtures.len(), 4);
    assert_eq!(fixtures[0].league.name, "Premier League");
    assert_eq!(fixtures[0].league.country.as_deref(), Some("England"));
    assert_eq!(fixtures[0].teams.home.id, 42);
    assert_eq!(fixtures[0].teams.away.name, "Chelsea");
    assert_eq!(fixtures[0].goals.home, None);
    assert_eq!(fixtures[3].teams.home.name, "Paris Saint Germain");
}

#[test]
fn parses_team_history_and_sums_form() {
    let raw = read_fixture("team_last5_42.json");
    let history = parse_team_fixtures_json(&raw).expect("fixture should parse");
    assert_eq!(history.len(), 5);
    // 3 (home) + 2 (away) + 0 (away) + 4 (home) + null
    assert_eq!(goals_scored_by(42, &history).unwrap(), 9);
}

#[test]
fn team_history_is_strict() {
    let raw = r#"{"errors": [], "response": [{"league": {"name": "Serie A"}, "goals": {}}]}"#;
    assert!(matches!(
        parse_team_fixtures_json(raw),
        Err(FetchError::Json(_))
    ));
}

#[test]
fn api_errors_in_ok_body_are_failures() {
    let raw = read_fixture("api_error.json");
    match parse_day_fixtures_json(&raw) {
        Err(FetchError::Api(msg)) => assert!(msg.contains("Missing application key")),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[test]
fn null_and_empty_bodies_are_malformed() {
    for raw in ["null", "  ", ""] {
        assert!(matches!(
            parse_day_fixtures_json(raw),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            parse_team_fixtures_json(raw),
            Err(FetchError::Malformed(_))
        ));
    }
}

#[test]
fn body_without_response_list_is_malformed() {
    let raw = r#"{"message":"You are not subscribed to this API."}"#;
    match parse_team_fixtures_json(raw) {
        Err(FetchError::Malformed(msg)) => assert!(msg.contains("not subscribed")),
        other => panic!("expected malformed, got {other:?}"),
    }
    assert!(matches!(
        parse_day_fixtures_json("{}"),
        Err(FetchError::Malformed(_))
    ));
    assert!(matches!(
        parse_team_fixtures_json(r#"{"errors":[],"response":null}"#),
        Err(FetchError::Malformed(_))
    ));
}

#[test]
fn empty_response_list_is_a_real_answer() {
    let raw = r#"{"errors":[],"response":[]}"#;
    assert!(parse_day_fixtures_json(raw).unwrap().is_empty());
    assert!(parse_team_fixtures_json(raw).unwrap().is_empty());
}

#[test]
fn invalid_json_is_an_error() {
    assert!(matches!(
        parse_day_fixtures_json("<html>rate limited</html>"),
        Err(FetchError::Json(_))
    ));
}
