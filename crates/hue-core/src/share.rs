//! Shareable combination encoding — a flat `key=value` query string.
//!
//! A combination round-trips through a URL as
//! `bg=%23000000&borderColor=%23757575&color=%23ffffff&parentBg=%232c7cb0`
//! (keys in alphabetical order, `#` percent-encoded). Decoding is strict:
//! all four role keys must be present with valid colors, otherwise the
//! error names exactly what was wrong and the caller falls back to
//! generating a fresh combination. Nothing is ever silently coerced.

use hue_color::Color;
use thiserror::Error;

use crate::combination::{Combination, Role};

/// Keys in the order the encoded string emits them.
const ENCODE_ORDER: [Role; 4] = [Role::Bg, Role::BorderColor, Role::Color, Role::ParentBg];

/// A shared query string could not be decoded into a combination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A required role key was absent from the mapping.
    #[error("missing key {0:?} in shared combination")]
    MissingKey(&'static str),
    /// A role key carried a value that is not a valid color.
    #[error("invalid color {value:?} for key {key:?}")]
    InvalidColor {
        key: &'static str,
        value: String,
    },
}

/// Encode a combination as a query string (no leading `?`).
#[must_use]
pub fn encode(combination: &Combination) -> String {
    let mut out = String::new();
    for role in ENCODE_ORDER {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(role.key());
        out.push('=');
        out.push_str(&percent_encode(&combination.role(role).to_hex()));
    }
    out
}

/// Decode a query string (with or without a leading `?`) into a
/// combination.
///
/// Unrecognized keys are ignored; duplicated keys take the last value.
///
/// # Errors
///
/// [`DecodeError`] when any of the four role keys is missing or carries a
/// malformed color.
pub fn decode(query: &str) -> Result<Combination, DecodeError> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut found: [Option<Color>; 4] = [None; 4];
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let Some(role) = Role::from_key(key) else {
            continue;
        };
        let raw = percent_decode(value);
        let color = Color::parse(&raw).map_err(|_| DecodeError::InvalidColor {
            key: role.key(),
            value: raw,
        })?;
        found[role_slot(role)] = Some(color);
    }

    let get = |role: Role| found[role_slot(role)].ok_or(DecodeError::MissingKey(role.key()));
    Ok(Combination {
        parent_bg: get(Role::ParentBg)?,
        bg: get(Role::Bg)?,
        color: get(Role::Color)?,
        border_color: get(Role::BorderColor)?,
    })
}

const fn role_slot(role: Role) -> usize {
    match role {
        Role::ParentBg => 0,
        Role::Bg => 1,
        Role::Color => 2,
        Role::BorderColor => 3,
    }
}

// ---------------------------------------------------------------------------
// Percent encoding
// ---------------------------------------------------------------------------

// Only `#` needs escaping in the values we emit, but the decoder accepts
// any %XX sequence so externally built URLs still parse.

fn percent_encode(value: &str) -> String {
    value.replace('#', "%23")
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn combo() -> Combination {
        Combination {
            parent_bg: Color::rgb(0x2c, 0x7c, 0xb0),
            bg: Color::BLACK,
            color: Color::WHITE,
            border_color: Color::rgb(0x75, 0x75, 0x75),
        }
    }

    #[test]
    fn encode_is_alphabetical_and_escaped() {
        assert_eq!(
            encode(&combo()),
            "bg=%23000000&borderColor=%23757575&color=%23ffffff&parentBg=%232c7cb0"
        );
    }

    #[test]
    fn round_trip() {
        let encoded = encode(&combo());
        assert_eq!(decode(&encoded).unwrap(), combo());
    }

    #[test]
    fn decode_accepts_leading_question_mark() {
        let encoded = format!("?{}", encode(&combo()));
        assert_eq!(decode(&encoded).unwrap(), combo());
    }

    #[test]
    fn decode_accepts_unescaped_hash() {
        let query = "bg=#000000&borderColor=#757575&color=#ffffff&parentBg=#2c7cb0";
        assert_eq!(decode(query).unwrap(), combo());
    }

    #[test]
    fn decode_ignores_key_order() {
        let query = "parentBg=%232c7cb0&color=%23ffffff&bg=%23000000&borderColor=%23757575";
        assert_eq!(decode(query).unwrap(), combo());
    }

    #[test]
    fn decode_missing_key_is_an_error() {
        let query = "bg=%23000000&color=%23ffffff&parentBg=%232c7cb0";
        assert_eq!(
            decode(query).unwrap_err(),
            DecodeError::MissingKey("borderColor")
        );
    }

    #[test]
    fn decode_malformed_color_is_an_error() {
        let query = "bg=notacolor&borderColor=%23757575&color=%23ffffff&parentBg=%232c7cb0";
        assert_eq!(
            decode(query).unwrap_err(),
            DecodeError::InvalidColor {
                key: "bg",
                value: "notacolor".to_string(),
            }
        );
    }

    #[test]
    fn decode_empty_query_reports_missing_key() {
        assert!(matches!(decode(""), Err(DecodeError::MissingKey(_))));
    }

    #[test]
    fn decode_ignores_unknown_keys() {
        let query = format!("{}&utm_source=twitter", encode(&combo()));
        assert_eq!(decode(&query).unwrap(), combo());
    }
}
