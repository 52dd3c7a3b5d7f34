//! Linear ↔ structured offset mapping.
//!
//! A linear offset counts characters in the document's linear form, where every paragraph
//! boundary is one synthetic `'\n'`. A [`StructuredPosition`] addresses the same location as
//! (paragraph index, character offset inside that paragraph).
//!
//! Both conversions walk the paragraph list by index and are total: inputs past the end clamp
//! to the end of the last paragraph. For every offset `o` in `0..=linear_len`,
//! `to_linear(doc, to_structured(doc, o)) == o`.
//!
//! # Example
//!
//! ```rust
//! use bidi_textarea::{Direction, Document, StructuredPosition, to_linear, to_structured};
//!
//! let doc = Document::from_value("a\nb\nc", Direction::Ltr);
//! assert_eq!(to_structured(&doc, 3), StructuredPosition::new(1, 1));
//! assert_eq!(to_linear(&doc, StructuredPosition::new(2, 0)), 4);
//! ```

use crate::paragraph::Document;
use crate::surface::{Anchor, Caret};
use std::cmp::Ordering;

/// A location inside the paragraph sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StructuredPosition {
    /// Zero-based paragraph index.
    pub paragraph: usize,
    /// Character offset inside the paragraph.
    pub offset: usize,
}

impl StructuredPosition {
    /// Create a new position.
    pub fn new(paragraph: usize, offset: usize) -> Self {
        Self { paragraph, offset }
    }

    /// The surface anchor for this position, once the surface mirrors the document
    /// (root child `i` is paragraph `i`).
    pub fn to_anchor(self) -> Anchor {
        Anchor::new(self.paragraph, self.offset)
    }
}

impl Ord for StructuredPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.paragraph
            .cmp(&other.paragraph)
            .then_with(|| self.offset.cmp(&other.offset))
    }
}

impl PartialOrd for StructuredPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A selection in linear offsets, always ordered (`start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LinearSelection {
    start: usize,
    end: usize,
}

impl LinearSelection {
    /// Create a selection from two endpoints in any order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A caret with no extent.
    pub fn collapsed(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Start offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of selected characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if `start == end`.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Clamp both endpoints to `0..=max`.
    pub fn clamp(self, max: usize) -> Self {
        Self::new(self.start.min(max), self.end.min(max))
    }
}

/// A selection in structured positions, always ordered (`start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StructuredSelection {
    /// Start position.
    pub start: StructuredPosition,
    /// End position.
    pub end: StructuredPosition,
}

impl StructuredSelection {
    /// Create a selection from two positions in any order.
    pub fn new(a: StructuredPosition, b: StructuredPosition) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A caret with no extent.
    pub fn collapsed(position: StructuredPosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Returns `true` if `start == end`.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// The surface caret for this selection, once the surface mirrors the document.
    pub fn to_caret(self) -> Caret {
        Caret::new(self.start.to_anchor(), self.end.to_anchor())
    }
}

/// Map a linear offset to a structured position.
///
/// An offset that falls exactly on a boundary belongs to the end of the preceding paragraph.
pub fn to_structured(document: &Document, linear: usize) -> StructuredPosition {
    let mut consumed = 0;
    for (index, paragraph) in document.paragraphs().iter().enumerate() {
        let len = paragraph.char_len();
        if consumed + len + 1 > linear {
            return StructuredPosition::new(index, linear - consumed);
        }
        consumed += len + 1;
    }

    tracing::trace!(linear, "linear offset past document end, clamping");
    document.end_position()
}

/// Map a structured position to a linear offset.
///
/// The position is clamped first (see [`Document::clamp_position`]).
pub fn to_linear(document: &Document, position: StructuredPosition) -> usize {
    let position = document.clamp_position(position);
    let preceding: usize = document.paragraphs()[..position.paragraph]
        .iter()
        .map(|p| p.char_len() + 1)
        .sum();
    preceding + position.offset
}

/// Map a linear selection to structured positions.
pub fn selection_to_structured(
    document: &Document,
    selection: LinearSelection,
) -> StructuredSelection {
    StructuredSelection {
        start: to_structured(document, selection.start()),
        end: to_structured(document, selection.end()),
    }
}

/// Map a structured selection to linear offsets.
pub fn selection_to_linear(document: &Document, selection: StructuredSelection) -> LinearSelection {
    LinearSelection::new(
        to_linear(document, selection.start),
        to_linear(document, selection.end),
    )
}

/// Interpret a host anchor against a document the surface mirrors, clamping anchors that point
/// outside the managed structure.
pub fn anchor_to_position(document: &Document, anchor: Anchor) -> StructuredPosition {
    let position = StructuredPosition::new(anchor.node, anchor.offset);
    let clamped = document.clamp_position(position);
    if clamped != position {
        tracing::warn!(
            node = anchor.node,
            offset = anchor.offset,
            paragraph = clamped.paragraph,
            clamped_offset = clamped.offset,
            "caret anchor outside the document, clamped"
        );
    }
    clamped
}
