use std::path::PathBuf;

use scoreboard_lambda_rust::config::{FeedLocation, ScoreboardConfig};
use scoreboard_lambda_rust::error::ConfigError;
use scoreboard_lambda_rust::normalizer::DateOrder;

#[test]
fn defaults_are_valid() {
    let config = ScoreboardConfig::default();
    config.validate().expect("default config should validate");
    assert_eq!(config.date_order, DateOrder::DayFirst);
    assert_eq!(config.courts.len(), 5);
    assert_eq!(config.intervals.display_secs, 60);
    assert_eq!(config.tz().unwrap(), chrono_tz::Australia::Sydney);
}

#[test]
fn partial_json_fills_defaults() {
    let config = ScoreboardConfig::from_json(
        r#"{
            "feed": { "path": "tests/todays_matches.csv" },
            "date_order": "month_first",
            "intervals": { "feed_secs": 300 },
            "courts": [
                { "prefix": "Court-1", "id": "c1", "label": "Centre Court", "sponsor": "Acme" }
            ]
        }"#,
    )
    .expect("config should parse");

    assert_eq!(config.feed, FeedLocation::Path(PathBuf::from("tests/todays_matches.csv")));
    assert_eq!(config.date_order, DateOrder::MonthFirst);
    assert_eq!(config.intervals.feed_secs, 300);
    assert_eq!(config.intervals.clock_secs, 1);
    assert_eq!(config.columns.team1, "Team 1");
    assert_eq!(config.courts[0].sponsor.as_deref(), Some("Acme"));
    assert_eq!(config.courts[0].logo, None);
    assert_eq!(config.normalize_options().delimiter, b',');
}

#[test]
fn rejects_bad_values() {
    let zero = ScoreboardConfig::from_json(r#"{ "intervals": { "display_secs": 0 } }"#);
    assert!(matches!(zero, Err(ConfigError::Invalid(_))));

    let tz = ScoreboardConfig::from_json(r#"{ "timezone": "Mars/Olympus_Mons" }"#);
    assert!(matches!(tz, Err(ConfigError::Invalid(_))));

    let delimiter = ScoreboardConfig::from_json(r#"{ "delimiter": "→" }"#);
    assert!(matches!(delimiter, Err(ConfigError::Invalid(_))));

    let garbage = ScoreboardConfig::from_json("{ not json");
    assert!(matches!(garbage, Err(ConfigError::Parse(_))));
}
