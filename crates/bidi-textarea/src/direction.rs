//! Paragraph direction detection.
//!
//! A paragraph is right-to-left as soon as it contains one character from a right-to-left
//! script block (Hebrew, Arabic, Syriac, Thaana, NKo and the Hebrew/Arabic presentation forms).
//! Everything else is left-to-right.
//!
//! The empty string carries no evidence either way, so [`detect`] returns `None` for it and
//! [`classify`] resolves the ambiguity with a caller-provided fallback (the widget's
//! configured default direction).
//!
//! # Example
//!
//! ```rust
//! use bidi_textarea::{Direction, classify, detect};
//!
//! assert_eq!(detect("hello"), Some(Direction::Ltr));
//! assert_eq!(detect("שלום"), Some(Direction::Rtl));
//! assert_eq!(detect(""), None);
//! assert_eq!(classify("", Direction::Rtl), Direction::Rtl);
//! ```

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Right-to-left script ranges: U+0591–U+07FF, U+FB1D–U+FDFD, U+FE70–U+FEFC.
static RTL_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{0591}-\x{07FF}\x{FB1D}-\x{FDFD}\x{FE70}-\x{FEFC}]")
        .expect("valid RTL character class")
});

/// Writing direction of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl Direction {
    /// The attribute spelling of this direction (`"ltr"` / `"rtl"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// Returns `true` for [`Direction::Rtl`].
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Lenient parse for configuration values.
    ///
    /// Surrounding whitespace and ASCII case are ignored. Anything that is not `ltr` or `rtl`
    /// yields `fallback` instead of an error.
    pub fn normalize(value: &str, fallback: Direction) -> Direction {
        value.parse().unwrap_or(fallback)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the strict [`Direction`] parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized direction '{0}' (expected 'ltr' or 'rtl')")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("ltr") {
            Ok(Self::Ltr)
        } else if trimmed.eq_ignore_ascii_case("rtl") {
            Ok(Self::Rtl)
        } else {
            Err(ParseDirectionError(s.to_string()))
        }
    }
}

// Configuration files never fail on a bad direction; they fall back to the default.
impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Direction::normalize(&raw, Direction::default()))
    }
}

/// Detect the direction of `text`, or `None` when `text` is empty.
///
/// Callers are expected to pass already-trimmed paragraph content.
pub fn detect(text: &str) -> Option<Direction> {
    if text.is_empty() {
        return None;
    }

    if RTL_CHAR.is_match(text) {
        Some(Direction::Rtl)
    } else {
        Some(Direction::Ltr)
    }
}

/// Detect the direction of `text`, using `fallback` for the empty string.
pub fn classify(text: &str, fallback: Direction) -> Direction {
    detect(text).unwrap_or(fallback)
}
