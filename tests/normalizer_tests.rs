use chrono::{NaiveDate, NaiveTime};

use scoreboard_lambda_rust::normalizer::{DateOrder, NormalizeOptions, normalize};

fn sample() -> &'static str {
    include_str!("todays_matches.csv")
}

#[test]
fn normalizes_sample_feed_and_skips_blank_lines() {
    let fixtures = normalize(sample(), &NormalizeOptions::default());
    assert_eq!(fixtures.len(), 7, "fixtures were: {:?}", fixtures);

    let first = &fixtures[0];
    assert_eq!(first.court, "The Snakepit-1 (Indoor)");
    assert_eq!(first.team1, "Vipers");
    assert_eq!(first.team2, "Cobras");
    assert_eq!(first.match_id.as_deref(), Some("M-101"));
    assert_eq!(
        first.scheduled_instant(),
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(15, 0, 0)
    );
}

#[test]
fn quoted_field_with_delimiter_stays_whole() {
    let fixtures = normalize(sample(), &NormalizeOptions::default());
    assert_eq!(fixtures[1].team1, "Smith, Jones");
    assert_eq!(fixtures[1].team2, "Taipans");
    assert_eq!(fixtures[5].team1, "The \"Real\" Rattlers");
}

#[test]
fn sentinels_and_empty_values() {
    let fixtures = normalize(sample(), &NormalizeOptions::default());

    let no_team = &fixtures[3];
    assert_eq!(no_team.team1, "");
    assert_eq!(no_team.match_id, None);

    let unscheduled = &fixtures[4];
    assert_eq!(unscheduled.time, "N/A");
    assert_eq!(unscheduled.parsed_time, None);
    assert!(unscheduled.scheduled_instant().is_none());
    // Record is still kept.
    assert_eq!(unscheduled.team1, "Boas");
}

#[test]
fn columns_are_found_by_header_name() {
    let raw = "MatchID , team 2,Time,Team 1,Date,Court\nX1,Away,9:15 am,Home,2024-05-01,Beaton Park\n";
    let fixtures = normalize(raw, &NormalizeOptions::default());
    assert_eq!(fixtures.len(), 1);
    let f = &fixtures[0];
    assert_eq!(f.court, "Beaton Park");
    assert_eq!(f.team1, "Home");
    assert_eq!(f.team2, "Away");
    assert_eq!(f.match_id.as_deref(), Some("X1"));
    assert_eq!(f.parsed_time, NaiveTime::from_hms_opt(9, 15, 0));
    assert_eq!(f.parsed_date, NaiveDate::from_ymd_opt(2024, 5, 1));
}

#[test]
fn short_rows_fill_missing_trailing_fields() {
    let raw = "Court,Date,Time,Team 1,Team 2,MatchID\nBeaton Park,2024-05-01,10:00\n";
    let fixtures = normalize(raw, &NormalizeOptions::default());
    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].team1, "");
    assert_eq!(fixtures[0].team2, "");
    assert_eq!(fixtures[0].match_id, None);
    assert!(fixtures[0].scheduled_instant().is_some());
}

#[test]
fn malformed_date_only_drops_the_instant() {
    let raw = "Court,Date,Time,Team 1,Team 2\nBeaton Park,March 10,10:00,A,B\nBeaton Park,2024-03-10,11:00,C,D\n";
    let fixtures = normalize(raw, &NormalizeOptions::default());
    assert_eq!(fixtures.len(), 2);
    assert_eq!(fixtures[0].parsed_date, None);
    assert!(fixtures[0].scheduled_instant().is_none());
    assert!(fixtures[1].scheduled_instant().is_some());
}

#[test]
fn slash_dates_use_the_configured_order_for_every_row() {
    let raw = "Court,Date,Time,Team 1,Team 2\nA,10/03/2024,10:00,x,y\nB,4/5/2024,10:00,x,y\n";

    let day_first = normalize(raw, &NormalizeOptions { date_order: DateOrder::DayFirst, ..Default::default() });
    assert_eq!(day_first[0].parsed_date, NaiveDate::from_ymd_opt(2024, 3, 10));
    assert_eq!(day_first[1].parsed_date, NaiveDate::from_ymd_opt(2024, 5, 4));

    let month_first = normalize(raw, &NormalizeOptions { date_order: DateOrder::MonthFirst, ..Default::default() });
    assert_eq!(month_first[0].parsed_date, NaiveDate::from_ymd_opt(2024, 10, 3));
    assert_eq!(month_first[1].parsed_date, NaiveDate::from_ymd_opt(2024, 4, 5));
}

#[test]
fn custom_delimiter() {
    let raw = "Court;Date;Time;Team 1;Team 2\n\"Beaton; Park\";2024-03-10;18:00;A;B\n";
    let options = NormalizeOptions { delimiter: b';', ..Default::default() };
    let fixtures = normalize(raw, &options);
    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].court, "Beaton; Park");
}

#[test]
fn empty_input_yields_no_fixtures() {
    assert!(normalize("", &NormalizeOptions::default()).is_empty());
    assert!(normalize("Court,Date,Time,Team 1,Team 2\n\n   \n", &NormalizeOptions::default()).is_empty());
}
