//! Widget configuration.

use crate::direction::Direction;
use crate::error::OptionsError;
use serde::{Deserialize, Serialize};

/// Host-provided configuration for a [`BidiTextArea`](crate::BidiTextArea).
///
/// Every field has a default, so a partial JSON object is accepted. An unrecognized direction
/// falls back to [`Direction::Ltr`] instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAreaOptions {
    /// Text shown while the widget is empty. Display only.
    pub placeholder: String,
    /// Direction for paragraphs with no directional content.
    pub default_direction: Direction,
    /// Initial value, applied on connection after any value assigned earlier.
    pub value: Option<String>,
}

impl TextAreaOptions {
    /// Parse options from a JSON object such as
    /// `{"placeholder": "Type here", "defaultDirection": "rtl"}`.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the default direction.
    pub fn with_default_direction(mut self, direction: Direction) -> Self {
        self.default_direction = direction;
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}
