//! Count renderers: pure functions from a count (plus static sprite
//! configuration) to a response body.
//!
//! Both variants are side-effect free so they can be exercised without any
//! server in front of them.

use std::fmt::Write;

use serde::Serialize;

use crate::error::{CounterError, Result};

/// Glyphs per sprite sheet (digits 0-9, laid out left to right).
const GLYPHS_PER_SHEET: u32 = 10;

/// Default sprite sheet: the ten digits embedded as a GIF data URI, so the
/// counter renders with zero external assets.
pub const DEFAULT_IMAGE_URL: &str = concat!(
    "data:image/gif;base64,R0lGODlhlgAUAIAAAAAAAP//ACH+JjEwOjA6MTU6MzA6NDU6NjA6NzU",
    "6OTA6MTA1OjEyMDoxMzU6MTUwACwAAAAAlgAUAAAC/4SPqcvtD6OctNqLs978hA+GWEgGSSleKKiu",
    "5unCK2LOL3QbtkwCd674+VCnyc4zLPmQx2GS9YlEedEprWe1wjy13lai1Faxv64oq9WlF6xH2/F+c",
    "8tA9hosXsf16Lqc8WdXF9RHSIdzJ5XnVygzZ4g46OjWeHVIKRlpCanGeLmJqRnayZkkaiEXuOfJBZ",
    "h5ZQgFRIT2NNY6g+ulCBtWZtvVAUdElVKcZoZ1nKioFGus5sob7fx8W+w0R6Z79hrNLWudbTo5/In",
    "K/DhKDtqQyufNrppOWt8SH1g67/3Our5/Kh8efPTkwVvHTp05hQxdnasgsJ27Sg1LJbQ38ZevaTtO",
    "qokrOE7btY7bKPUqaSmcDmBVwDAhtmyJlJhCmsChwbIGzZQeKbiYFeMezE5DfQYVuUuY0qVMmzYoA",
    "AA7",
);

/// Default total sheet width in pixels (ten 15px glyphs).
pub const DEFAULT_IMAGE_WIDTH: u32 = 150;
/// Default glyph height in pixels.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 20;
/// Default zero-pad width.
pub const DEFAULT_MIN_DIGITS: usize = 1;

/// Sprite-sheet geometry for the HTML variant.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    /// Image source: URL or data URI.
    pub image_url: String,
    /// Total sheet width; one glyph is a tenth of this.
    pub image_width: u32,
    /// Glyph height.
    pub image_height: u32,
    /// Minimum digit count; shorter values are zero-padded.
    pub min_digits: usize,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            image_url: DEFAULT_IMAGE_URL.to_string(),
            image_width: DEFAULT_IMAGE_WIDTH,
            image_height: DEFAULT_IMAGE_HEIGHT,
            min_digits: DEFAULT_MIN_DIGITS,
        }
    }
}

#[derive(Serialize)]
struct CountBody {
    count: u64,
}

/// JSON body: `{"count": N}`.
pub fn render_json(count: u64) -> Result<String> {
    serde_json::to_string(&CountBody { count })
        .map_err(|e| CounterError::Internal(format!("json render: {e}")))
}

/// HTML body: one inline-block `<div>` per rendered digit, cropping the
/// shared sprite sheet via a negative `background-position` offset, inside
/// a minimal document with a responsive viewport.
pub fn render_html(count: u64, sheet: &SpriteSheet) -> String {
    let glyph_width = f64::from(sheet.image_width) / f64::from(GLYPHS_PER_SHEET);
    let digits = format!("{:0>width$}", count, width = sheet.min_digits);

    let mut sprites = String::new();
    for c in digits.chars() {
        // `digits` is the decimal rendering of a u64, so every char is 0-9.
        let d = f64::from(c.to_digit(10).unwrap_or(0));
        let _ = write!(
            sprites,
            "<div style=\"background:url({url});width:{w}px;height:{h}px;\
background-position:-{off}px 0;display:inline-block\"></div>",
            url = sheet.image_url,
            w = glyph_width,
            h = sheet.image_height,
            off = d * glyph_width,
        );
    }

    format!(
        "<!DOCTYPE html><html><head><meta name=\"viewport\" \
content=\"width=device-width, initial-scale=1\"></head><body>{sprites}</body></html>"
    )
}
