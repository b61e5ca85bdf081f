//! Magnitude-suffixed values such as `w=3.2u` or `r=1.5k`.
//!
//! Suffixes follow SPICE: `f p n u m k g`, with `meg` (or just `me`) for
//! 1e6. Matching is case-insensitive, so `M` is milli, not mega.

use crate::error::{Error, Result};
use combine::parser::char::char as cmb_char;
use combine::parser::range::{recognize, take_while, take_while1};
use combine::{attempt, one_of, optional, Parser};
use log::error;

fn mantissa<'a>() -> impl Parser<Input = &'a str, Output = &'a str> {
    let digits = || take_while(|c: char| c.is_ascii_digit());
    let sign = || optional(one_of("+-".chars()));
    let exponent = attempt((
        one_of("eE".chars()),
        sign(),
        take_while1(|c: char| c.is_ascii_digit()),
    ));

    recognize((
        sign(),
        digits(),
        optional((cmb_char('.'), digits())),
        optional(exponent),
    ))
}

fn magnitude(suffix: &str) -> f64 {
    let suffix = suffix.to_ascii_lowercase();
    match suffix.chars().next() {
        Some('f') => 1e-15,
        Some('p') => 1e-12,
        Some('n') => 1e-9,
        Some('u') => 1e-6,
        Some('m') if suffix.starts_with("me") => 1e6,
        Some('m') => 1e-3,
        Some('k') => 1e3,
        Some('g') => 1e9,
        _ => 1.0,
    }
}

/// Reads the number after the first `=` in `text`, scaled by its suffix.
pub fn try_parse_value(text: &str) -> Result<f64> {
    let bad = || Error::BadValue(text.to_string());

    let eq = text.find('=').ok_or_else(bad)?;
    let rest = text[eq + 1..].trim_start();
    let (number, suffix) = mantissa().parse(rest).map_err(|_| bad())?;
    let number = number.parse::<f64>().map_err(|_| bad())?;

    Ok(number * magnitude(suffix))
}

/// Like [`try_parse_value`], but logs the problem and returns `f64::MAX`
/// for text it cannot read.
pub fn parse_value(text: &str) -> f64 {
    match try_parse_value(text) {
        Ok(v) => v,
        Err(e) => {
            error!("{}", e);
            f64::MAX
        }
    }
}
