#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tally_server::config;

fn empty() -> std::iter::Empty<(&'static str, &'static str)> {
    std::iter::empty()
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = config::from_pairs(empty()).unwrap();
    assert_eq!(cfg.listen, "0.0.0.0:8000".parse().unwrap());
    assert_eq!(cfg.lock_filename.to_str(), Some("css_counter.lock"));
    assert_eq!(cfg.count_filename.to_str(), Some("count.dat"));
    assert_eq!(cfg.log_dirname.to_str(), Some("./log"));
    assert_eq!(cfg.timezone, chrono_tz::UTC);
    assert!(cfg.image_url.starts_with("data:image/gif;base64,"));
    assert_eq!(cfg.image_width, 150);
    assert_eq!(cfg.image_height, 20);
    assert_eq!(cfg.min_digits, 1);
}

#[test]
fn overrides_apply() {
    let cfg = config::from_pairs([
        ("LISTEN_ADDR", "127.0.0.1:9100"),
        ("LOCK_FILENAME", "/tmp/c.lock"),
        ("COUNT_FILENAME", "/tmp/c.dat"),
        ("LOG_DIRNAME", "/tmp/c-logs"),
        ("TZ", "Asia/Tokyo"),
        ("IMAGE_URL", "https://example.test/digits.png"),
        ("IMAGE_WIDTH", "200"),
        ("IMAGE_HEIGHT", "32"),
        ("MIN_DIGITS", "6"),
    ])
    .unwrap();

    assert_eq!(cfg.listen, "127.0.0.1:9100".parse().unwrap());
    assert_eq!(cfg.timezone, chrono_tz::Asia::Tokyo);
    assert_eq!(cfg.image_width, 200);
    assert_eq!(cfg.image_height, 32);
    assert_eq!(cfg.min_digits, 6);

    let sheet = cfg.sprite_sheet();
    assert_eq!(sheet.image_url, "https://example.test/digits.png");
    assert_eq!(sheet.min_digits, 6);
}

#[test]
fn unrelated_environment_keys_are_ignored() {
    let cfg = config::from_pairs([("PATH", "/usr/bin"), ("HOME", "/root"), ("SHELL", "sh")])
        .unwrap();
    assert_eq!(cfg.min_digits, 1);
}

#[test]
fn unknown_timezone_fails_startup() {
    let err = config::from_pairs([("TZ", "Mars/Olympus")]).unwrap_err();
    assert!(err.to_string().contains("Mars/Olympus"));
}

#[test]
fn non_numeric_dimension_fails_startup() {
    assert!(config::from_pairs([("IMAGE_WIDTH", "wide")]).is_err());
    assert!(config::from_pairs([("IMAGE_HEIGHT", "-2")]).is_err());
    assert!(config::from_pairs([("MIN_DIGITS", "three")]).is_err());
}

#[test]
fn out_of_range_values_fail_validation() {
    assert!(config::from_pairs([("IMAGE_WIDTH", "5")]).is_err());
    assert!(config::from_pairs([("MIN_DIGITS", "0")]).is_err());
    assert!(config::from_pairs([("MIN_DIGITS", "100")]).is_err());
    assert!(config::from_pairs([("IMAGE_URL", "")]).is_err());
    assert!(config::from_pairs([("COUNT_FILENAME", "")]).is_err());
}

#[test]
fn bad_listen_addr_fails_startup() {
    assert!(config::from_pairs([("LISTEN_ADDR", "not-an-addr")]).is_err());
}
