use std::net::SocketAddr;
use std::path::PathBuf;

use chrono_tz::Tz;

use tally_core::clock;
use tally_core::error::{CounterError, Result};
use tally_core::render::{self, SpriteSheet};

/// Environment-derived service configuration, parsed once at startup and
/// passed into the state explicitly (never read ad hoc).
#[derive(Debug, Clone)]
pub struct CounterConfig {
    /// `LISTEN_ADDR`: socket address to bind.
    pub listen: SocketAddr,
    /// `LOCK_FILENAME`: advisory lock file path.
    pub lock_filename: PathBuf,
    /// `COUNT_FILENAME`: persisted count path.
    pub count_filename: PathBuf,
    /// `LOG_DIRNAME`: directory for month-bucketed CSV logs.
    pub log_dirname: PathBuf,
    /// `TZ`: IANA timezone for timestamps and log naming.
    pub timezone: Tz,
    /// `IMAGE_URL`: sprite-sheet source (URL or data URI).
    pub image_url: String,
    /// `IMAGE_WIDTH`: total sheet width (ten glyphs).
    pub image_width: u32,
    /// `IMAGE_HEIGHT`: glyph height.
    pub image_height: u32,
    /// `MIN_DIGITS`: zero-pad width for rendered counts.
    pub min_digits: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            lock_filename: "css_counter.lock".into(),
            count_filename: "count.dat".into(),
            log_dirname: "./log".into(),
            timezone: chrono_tz::UTC,
            image_url: render::DEFAULT_IMAGE_URL.to_string(),
            image_width: render::DEFAULT_IMAGE_WIDTH,
            image_height: render::DEFAULT_IMAGE_HEIGHT,
            min_digits: render::DEFAULT_MIN_DIGITS,
        }
    }
}

impl CounterConfig {
    /// Apply one environment key. Unknown keys are ignored; recognized
    /// keys with unparsable values are startup errors.
    pub(crate) fn apply(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "LISTEN_ADDR" => {
                self.listen = value
                    .parse()
                    .map_err(|_| bad_value(key, &value, "a socket address"))?;
            }
            "LOCK_FILENAME" => self.lock_filename = value.into(),
            "COUNT_FILENAME" => self.count_filename = value.into(),
            "LOG_DIRNAME" => self.log_dirname = value.into(),
            "TZ" => self.timezone = clock::parse_timezone(Some(&value))?,
            "IMAGE_URL" => self.image_url = value,
            "IMAGE_WIDTH" => self.image_width = parse_number(key, &value)?,
            "IMAGE_HEIGHT" => self.image_height = parse_number(key, &value)?,
            "MIN_DIGITS" => self.min_digits = parse_number(key, &value)?,
            _ => {}
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(10..=10_000).contains(&self.image_width) {
            return Err(CounterError::Config(
                "IMAGE_WIDTH must be between 10 and 10000".into(),
            ));
        }
        if !(1..=1_000).contains(&self.image_height) {
            return Err(CounterError::Config(
                "IMAGE_HEIGHT must be between 1 and 1000".into(),
            ));
        }
        if !(1..=64).contains(&self.min_digits) {
            return Err(CounterError::Config(
                "MIN_DIGITS must be between 1 and 64".into(),
            ));
        }
        if self.image_url.is_empty() {
            return Err(CounterError::Config("IMAGE_URL must not be empty".into()));
        }
        for (key, path) in [
            ("LOCK_FILENAME", &self.lock_filename),
            ("COUNT_FILENAME", &self.count_filename),
            ("LOG_DIRNAME", &self.log_dirname),
        ] {
            if path.as_os_str().is_empty() {
                return Err(CounterError::Config(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// Sprite geometry for the HTML renderer.
    pub fn sprite_sheet(&self) -> SpriteSheet {
        SpriteSheet {
            image_url: self.image_url.clone(),
            image_width: self.image_width,
            image_height: self.image_height,
            min_digits: self.min_digits,
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn bad_value(key: &str, value: &str, want: &str) -> CounterError {
    CounterError::Config(format!("{key} must be {want}, got {value:?}"))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| bad_value(key, value, "a non-negative integer"))
}
