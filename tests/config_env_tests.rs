// Kept in its own test binary: it mutates process environment variables.
use scoreboard_lambda_rust::config::{CONFIG_PATH_VAR, FEED_URL_VAR, FeedLocation, ScoreboardConfig};

#[test]
fn feed_url_env_var_overrides_default_location() {
    // SAFETY: the only test in this binary, so no other thread reads the environment.
    unsafe {
        std::env::remove_var(CONFIG_PATH_VAR);
        std::env::set_var(FEED_URL_VAR, "https://example.invalid/override.csv");
    }

    let config = ScoreboardConfig::load().expect("config should load");
    assert_eq!(config.feed, FeedLocation::Url("https://example.invalid/override.csv".to_string()));
    assert_eq!(config.courts.len(), 5);

    unsafe {
        std::env::remove_var(FEED_URL_VAR);
    }
}
