use chrono::NaiveDate;

use scoreboard_lambda_rust::config::ScoreboardConfig;
use scoreboard_lambda_rust::error::FeedError;
use scoreboard_lambda_rust::handler::{Request, board_response};

#[test]
fn request_fields_default_to_none() {
    let req: Request = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(req.feed_url.is_none());
    assert!(req.now.is_none());

    let req: Request = serde_json::from_value(serde_json::json!({
        "feed_url": "https://example.invalid/todays_matches.csv",
        "now": "2024-03-10T15:05:00"
    }))
    .unwrap();
    assert_eq!(req.feed_url.as_deref(), Some("https://example.invalid/todays_matches.csv"));
    assert_eq!(req.now, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(15, 5, 0));
}

#[test]
fn response_summarizes_courts_and_serializes_status() {
    let now = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(15, 5, 0).unwrap();
    let response = board_response(
        &ScoreboardConfig::default(),
        Ok(include_str!("todays_matches.csv").to_string()),
        now,
    );
    assert!(response.message.starts_with("4 of 6 courts"), "message was: {}", response.message);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["board"]["state"], "ready");
    assert_eq!(json["board"]["courts"][0]["fixture"]["status"], "live");
    assert!(json["board"]["courts"][2]["fixture"].is_null());
}

#[test]
fn feed_failure_still_returns_a_board() {
    let now = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(15, 5, 0).unwrap();
    let err = FeedError::Request {
        url: "https://example.invalid/todays_matches.csv".to_string(),
        reason: "connection refused".to_string(),
    };
    let response = board_response(&ScoreboardConfig::default(), Err(err), now);
    assert!(response.message.contains("connection refused"), "message was: {}", response.message);
    assert_eq!(response.board.courts.len(), 5);
    assert!(!response.board.has_fixtures());
}
