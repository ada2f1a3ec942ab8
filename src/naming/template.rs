//! Filename templates.
//!
//! | Marker        | Expands to                              |
//! |---------------|-----------------------------------------|
//! | `{timestamp}` | Unix seconds                            |
//! | `{datetime}`  | `YYYYMMDD_HHMMSS`                       |
//! | `{date}`      | `YYYYMMDD`                              |
//! | `{time}`      | `HHMMSS`                                |
//! | `{counter}`   | iteration number, at least three digits |
//! | `{random}`    | six characters from `[a-z0-9]`          |
//! | `{prefix}`    | the configured prefix                   |
//!
//! Anything else in braces is kept literally.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use rand::Rng;

use crate::output::has_image_extension;

const RANDOM_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const RANDOM_LEN: usize = 6;

/// Per-run template state. The scheduler owns it and sets the counter
/// explicitly before every capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateContext {
    counter: u32,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self { counter: 1 }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn set_counter(&mut self, counter: u32) {
        self.counter = counter;
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand `template` using the current local time and a fresh random token.
///
/// An empty template returns `default_output` untouched. Otherwise the result
/// always ends in an image extension; `format` is appended when it does not.
pub fn resolve(
    template: &str,
    context: &TemplateContext,
    default_output: &str,
    format: &str,
    prefix: &str,
) -> String {
    if template.is_empty() {
        return default_output.to_string();
    }
    render(
        template,
        context,
        format,
        prefix,
        &Local::now(),
        &mut rand::thread_rng(),
    )
}

/// [`resolve`] with the clock and random source supplied by the caller.
pub fn render<Tz, R>(
    template: &str,
    context: &TemplateContext,
    format: &str,
    prefix: &str,
    now: &DateTime<Tz>,
    rng: &mut R,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
    R: Rng + ?Sized,
{
    let mut result = template
        .replace("{timestamp}", &now.timestamp().to_string())
        .replace("{datetime}", &now.format("%Y%m%d_%H%M%S").to_string())
        .replace("{date}", &now.format("%Y%m%d").to_string())
        .replace("{time}", &now.format("%H%M%S").to_string())
        .replace("{counter}", &format!("{:03}", context.counter()));

    if result.contains("{random}") {
        result = result.replace("{random}", &random_token(rng));
    }
    result = result.replace("{prefix}", prefix);

    if !has_image_extension(&result) {
        result.push('.');
        result.push_str(format);
    }
    result
}

/// Six lowercase alphanumeric characters.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..RANDOM_LEN)
        .map(|_| RANDOM_CHARSET[rng.gen_range(0..RANDOM_CHARSET.len())] as char)
        .collect()
}
