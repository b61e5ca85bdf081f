//! Signal name helpers.
//!
//! bdnet writes bus bits either as `a<3>` or `a[3]`, quotes most names, and
//! marks tool-generated nets with `$`. Everything here works on owned or
//! borrowed strings and never mutates its input.

use crate::error::{Error, Result};

/// Normalizes a raw bdnet token.
///
/// A quoted token loses its quotes along with anything after the closing
/// quote, and a bracket pair found inside the dequoted text is collapsed the
/// same way (`"d[2]"` becomes `d2`). Angle brackets are then rewritten to
/// square brackets, so `a<3>` and `a[3]` clean to the same name.
pub fn cleanup(raw: &str) -> String {
    let mut name = match raw.find('"') {
        Some(open) => {
            let mut s = raw[..open].to_string();
            s.push_str(until(&raw[open + 1..], '"'));
            if let Some(bracket) = s.find('[') {
                let inner = until(&s[bracket + 1..], ']').to_string();
                s.truncate(bracket);
                s.push_str(&inner);
            }
            s
        }
        None => raw.to_string(),
    };

    if name.contains('<') || name.contains('>') {
        name = name.replace('<', "[").replace('>', "]");
    }
    name
}

fn until(s: &str, end: char) -> &str {
    match s.find(end) {
        Some(i) => &s[..i],
        None => s,
    }
}

/// Drops the `;` statement terminator from the end of a value token.
pub fn strip_terminator(s: &str) -> &str {
    s.trim_end_matches(';')
}

/// Splits `base[idx]` into `("base", idx)`.
///
/// Returns `Ok(None)` for a scalar name. `line` is only used to label errors.
pub fn split_index(name: &str, line: usize) -> Result<Option<(&str, u32)>> {
    let open = match name.find('[') {
        Some(i) => i,
        None => return Ok(None),
    };
    let rest = &name[open + 1..];
    let close = rest.find(']').ok_or_else(|| Error::UnmatchedBracket {
        line,
        text: name.to_string(),
    })?;
    let index = rest[..close]
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::BadIndex {
            line,
            text: name.to_string(),
        })?;
    Ok(Some((&name[..open], index)))
}

/// Keeps a bit-select but drops whatever follows it: `a[3]x` -> `a[3]`.
pub fn cut_after_select(name: &str) -> &str {
    match name.find(']') {
        Some(i) => &name[..=i],
        None => name,
    }
}

/// Turns an internal bdnet net name into a plain Verilog identifier.
///
/// Only the first bracket pair is rewritten; every `$` becomes `_`.
pub fn sanitize_internal(wire: &str) -> String {
    let mut s = wire.to_string();
    if let Some(open) = s.find('[') {
        s.replace_range(open..=open, "_");
        if let Some(close) = s.find(']') {
            s.replace_range(close..=close, "_");
        }
    }
    s.replace('$', "_")
}

/// Verilog identifiers cannot start with a digit.
pub fn prefix_digit(wire: String) -> String {
    if wire.starts_with(|c: char| c.is_ascii_digit()) {
        format!("N_{}", wire)
    } else {
        wire
    }
}
