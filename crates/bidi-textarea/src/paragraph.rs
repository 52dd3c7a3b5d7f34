//! Paragraph model.
//!
//! A [`Document`] is an ordered, non-empty list of [`Paragraph`]s. Its linear form is the
//! paragraphs' content joined with `'\n'`; a paragraph never contains a newline itself, so each
//! boundary costs exactly one character in linear offsets.
//!
//! Direction is derived, not stored independently: every constructor and every content
//! mutation re-classifies the affected paragraphs from their trimmed content.
//!
//! # Example
//!
//! ```rust
//! use bidi_textarea::{Direction, Document};
//!
//! let doc = Document::from_value("  hello \nשלום\n", Direction::Ltr);
//! assert_eq!(doc.paragraph_count(), 3);
//! assert_eq!(doc.value(), "hello\nשלום\n");
//! assert_eq!(doc.paragraphs()[1].direction(), Direction::Rtl);
//! ```

use crate::direction::{Direction, classify};
use crate::offset::StructuredPosition;
use crate::surface::{Anchor, SurfaceNode};
use crate::text::{byte_index, char_len};

/// One line of the document with its direction tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    content: String,
    direction: Direction,
}

impl Paragraph {
    fn new(content: String, fallback: Direction) -> Self {
        let direction = classify(content.trim(), fallback);
        Self { content, direction }
    }

    /// Raw content (never contains `'\n'`).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content with leading/trailing whitespace removed, as exposed through `value`.
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }

    /// Direction tag.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Content length in characters.
    pub fn char_len(&self) -> usize {
        char_len(&self.content)
    }

    /// Returns `true` if the content is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    fn retag(&mut self, fallback: Direction) {
        self.direction = classify(self.content.trim(), fallback);
    }
}

/// Ordered, never-empty sequence of paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    /// The canonical empty document: one empty paragraph tagged `fallback`.
    pub fn empty(fallback: Direction) -> Self {
        Self {
            paragraphs: vec![Paragraph::new(String::new(), fallback)],
        }
    }

    /// Build a document from raw paragraph contents, without trimming.
    ///
    /// Lines that contain `'\n'` are split into several paragraphs. An empty iterator yields
    /// the canonical empty document.
    pub fn from_lines<I, S>(lines: I, fallback: Direction) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut paragraphs = Vec::new();
        for line in lines {
            for piece in line.as_ref().split('\n') {
                paragraphs.push(Paragraph::new(piece.to_string(), fallback));
            }
        }
        Self::from_paragraphs(paragraphs, fallback)
    }

    /// Build a document from a linear value: one trimmed paragraph per line.
    ///
    /// Only `'\n'` breaks lines. A `'\r'` before it is whitespace and trimmed away; anywhere
    /// else it stays in the paragraph.
    pub fn from_value(text: &str, fallback: Direction) -> Self {
        let paragraphs = text
            .split('\n')
            .map(|line| Paragraph::new(line.trim().to_string(), fallback))
            .collect();
        Self::from_paragraphs(paragraphs, fallback)
    }

    fn from_paragraphs(paragraphs: Vec<Paragraph>, fallback: Direction) -> Self {
        if paragraphs.is_empty() {
            Self::empty(fallback)
        } else {
            Self { paragraphs }
        }
    }

    /// All paragraphs in order.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Paragraph at `index`.
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    /// Number of paragraphs (always at least 1).
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Length of the linear form: content lengths plus one per paragraph boundary.
    pub fn linear_len(&self) -> usize {
        let content: usize = self.paragraphs.iter().map(Paragraph::char_len).sum();
        content + self.paragraphs.len() - 1
    }

    /// Raw linear form: contents joined with `'\n'`. Offsets address this string.
    pub fn linearize(&self) -> String {
        self.join(Paragraph::content)
    }

    /// Public value: trimmed contents joined with `'\n'`.
    pub fn value(&self) -> String {
        self.join(Paragraph::trimmed)
    }

    fn join<'a>(&'a self, part: impl Fn(&'a Paragraph) -> &'a str) -> String {
        self.paragraphs.iter().map(part).collect::<Vec<_>>().join("\n")
    }

    /// Returns `true` if every paragraph is blank, i.e. the trimmed value is empty.
    pub fn is_blank(&self) -> bool {
        self.paragraphs.iter().all(Paragraph::is_blank)
    }

    /// Structured tree for the host surface.
    pub fn to_nodes(&self) -> Vec<SurfaceNode> {
        self.paragraphs
            .iter()
            .map(|p| SurfaceNode::paragraph(p.content.clone(), p.direction))
            .collect()
    }

    /// Overwrite one paragraph's tag. Ignored for out-of-range indices.
    ///
    /// The tag only lasts until the next content change or [`Document::retag`].
    pub fn set_direction(&mut self, index: usize, direction: Direction) {
        if let Some(paragraph) = self.paragraphs.get_mut(index) {
            paragraph.direction = direction;
        }
    }

    /// Re-derive every paragraph's direction from its content.
    pub fn retag(&mut self, fallback: Direction) {
        for paragraph in &mut self.paragraphs {
            paragraph.retag(fallback);
        }
    }

    /// Position just after the last character.
    pub fn end_position(&self) -> StructuredPosition {
        let last = self.paragraphs.len() - 1;
        StructuredPosition::new(last, self.paragraphs[last].char_len())
    }

    /// Clamp `position` to an addressable location.
    ///
    /// A paragraph index past the end maps to [`Document::end_position`]; an offset past the
    /// paragraph maps to its end.
    pub fn clamp_position(&self, position: StructuredPosition) -> StructuredPosition {
        match self.paragraphs.get(position.paragraph) {
            Some(paragraph) => {
                StructuredPosition::new(position.paragraph, position.offset.min(paragraph.char_len()))
            }
            None => self.end_position(),
        }
    }

    /// Delete the characters between two positions, merging paragraphs when the range crosses
    /// boundaries. Returns the collapsed position where the range started.
    pub fn delete_range(
        &mut self,
        start: StructuredPosition,
        end: StructuredPosition,
        fallback: Direction,
    ) -> StructuredPosition {
        let a = self.clamp_position(start);
        let b = self.clamp_position(end);
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        if start == end {
            return start;
        }

        let tail = {
            let last = &self.paragraphs[end.paragraph].content;
            last[byte_index(last, end.offset)..].to_string()
        };

        let first = &mut self.paragraphs[start.paragraph];
        let cut = byte_index(&first.content, start.offset);
        first.content.truncate(cut);
        first.content.push_str(&tail);
        first.retag(fallback);

        self.paragraphs.drain(start.paragraph + 1..=end.paragraph);
        start
    }

    /// Split the paragraph at `position` into two. Returns the start of the new paragraph.
    pub fn split_at(
        &mut self,
        position: StructuredPosition,
        fallback: Direction,
    ) -> StructuredPosition {
        let position = self.clamp_position(position);
        let paragraph = &mut self.paragraphs[position.paragraph];
        let cut = byte_index(&paragraph.content, position.offset);
        let tail = paragraph.content.split_off(cut);
        paragraph.retag(fallback);

        self.paragraphs
            .insert(position.paragraph + 1, Paragraph::new(tail, fallback));
        StructuredPosition::new(position.paragraph + 1, 0)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty(Direction::default())
    }
}

/// Which paragraphs a raw node turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeOrigin {
    first: usize,
    count: usize,
}

/// Result of [`normalize`]: the document plus what is needed to translate host anchors.
#[derive(Debug, Clone)]
pub struct Normalized {
    document: Document,
    origins: Vec<NodeOrigin>,
    wrapped: usize,
}

impl Normalized {
    /// The normalized document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume into the normalized document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Number of orphan runs that were wrapped into new paragraphs.
    pub fn wrapped(&self) -> usize {
        self.wrapped
    }

    /// Translate an anchor expressed against the raw nodes into a document position.
    ///
    /// The character offset inside the node is preserved; a node that was split continues
    /// into the following paragraphs. Anchors outside the raw tree clamp to the end.
    pub fn resolve(&self, anchor: Anchor) -> StructuredPosition {
        let Some(origin) = self.origins.get(anchor.node).copied() else {
            return self.document.end_position();
        };

        // Dropped node: sits right before whatever paragraph came next.
        if origin.count == 0 {
            if origin.first < self.document.paragraph_count() {
                return StructuredPosition::new(origin.first, 0);
            }
            return self.document.end_position();
        }

        let mut remaining = anchor.offset;
        let mut index = origin.first;
        loop {
            let len = self.document.paragraphs[index].char_len();
            if remaining <= len || index + 1 == origin.first + origin.count {
                return StructuredPosition::new(index, remaining.min(len));
            }
            remaining -= len + 1;
            index += 1;
        }
    }
}

/// Normalize a raw surface tree into a [`Document`].
///
/// - every orphan text run becomes its own paragraph at the position it occupies;
/// - empty orphan runs carry no content and are dropped;
/// - a node containing `'\n'` line-break markers becomes one paragraph per line;
/// - a tree with no content becomes the canonical empty document;
/// - every paragraph is tagged from its trimmed content.
pub fn normalize(nodes: &[SurfaceNode], fallback: Direction) -> Normalized {
    let mut paragraphs = Vec::with_capacity(nodes.len());
    let mut origins = Vec::with_capacity(nodes.len());
    let mut wrapped = 0;

    for node in nodes {
        let first = paragraphs.len();
        if node.is_orphan() {
            if node.content().is_empty() {
                origins.push(NodeOrigin { first, count: 0 });
                continue;
            }
            wrapped += 1;
        }

        for line in node.content().split('\n') {
            paragraphs.push(Paragraph::new(line.to_string(), fallback));
        }
        origins.push(NodeOrigin {
            first,
            count: paragraphs.len() - first,
        });
    }

    Normalized {
        document: Document::from_paragraphs(paragraphs, fallback),
        origins,
        wrapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn contents(doc: &Document) -> Vec<&str> {
        doc.paragraphs().iter().map(Paragraph::content).collect()
    }

    fn directions(doc: &Document) -> Vec<Direction> {
        doc.paragraphs().iter().map(Paragraph::direction).collect()
    }

    #[test]
    fn test_empty_document_has_one_paragraph() {
        let doc = Document::empty(Direction::Rtl);
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(doc.linear_len(), 0);
        assert_eq!(doc.value(), "");
        assert!(doc.is_blank());
        assert_eq!(directions(&doc), vec![Direction::Rtl]);
    }

    #[test]
    fn test_from_value_trims_and_tags() {
        let doc = Document::from_value(" hello \n  שלום\n\nمرحبا world ", Direction::Ltr);

        assert_eq!(contents(&doc), vec!["hello", "שלום", "", "مرحبا world"]);
        assert_eq!(
            directions(&doc),
            vec![Direction::Ltr, Direction::Rtl, Direction::Ltr, Direction::Rtl]
        );
        assert_eq!(doc.value(), "hello\nשלום\n\nمرحبا world");
    }

    #[test]
    fn test_from_value_breaks_only_on_line_feed() {
        let doc = Document::from_value("a\r\nb\rc", Direction::Ltr);
        assert_eq!(contents(&doc), vec!["a", "b\rc"]);
        assert_eq!(doc.value(), "a\nb\rc");

        let doc = Document::from_value("a\n", Direction::Ltr);
        assert_eq!(contents(&doc), vec!["a", ""]);
    }

    #[test]
    fn test_from_lines_keeps_whitespace_and_splits() {
        let doc = Document::from_lines(["  a ", "b\nc"], Direction::Ltr);
        assert_eq!(contents(&doc), vec!["  a ", "b", "c"]);
        assert_eq!(doc.linearize(), "  a \nb\nc");
        assert_eq!(doc.value(), "a\nb\nc");

        let doc = Document::from_lines(Vec::<String>::new(), Direction::Rtl);
        assert_eq!(doc, Document::empty(Direction::Rtl));
    }

    #[test]
    fn test_linear_len_counts_boundaries() {
        let doc = Document::from_lines(["ab", "", "cde"], Direction::Ltr);
        assert_eq!(doc.linear_len(), 2 + 0 + 3 + 2);
        assert_eq!(doc.linear_len(), doc.linearize().chars().count());
    }

    #[test]
    fn test_whitespace_only_paragraph_uses_fallback() {
        let doc = Document::from_lines(["   "], Direction::Rtl);
        assert_eq!(directions(&doc), vec![Direction::Rtl]);
        assert!(doc.is_blank());
    }

    #[test]
    fn test_set_direction_is_overwritten_by_retag() {
        let mut doc = Document::from_lines(["hello"], Direction::Ltr);
        doc.set_direction(0, Direction::Rtl);
        assert_eq!(directions(&doc), vec![Direction::Rtl]);

        doc.set_direction(5, Direction::Rtl);
        doc.retag(Direction::Ltr);
        assert_eq!(directions(&doc), vec![Direction::Ltr]);
    }

    #[test]
    fn test_retag_applies_new_fallback_to_blank_paragraphs() {
        let mut doc = Document::from_lines(["", "abc"], Direction::Ltr);
        doc.retag(Direction::Rtl);
        assert_eq!(directions(&doc), vec![Direction::Rtl, Direction::Ltr]);
    }

    #[test]
    fn test_normalize_wraps_orphans_in_place() {
        let nodes = vec![
            SurfaceNode::paragraph("one", Direction::Ltr),
            SurfaceNode::text("שתיים"),
            SurfaceNode::paragraph("three", Direction::Rtl),
        ];
        let normalized = normalize(&nodes, Direction::Ltr);

        assert_eq!(normalized.wrapped(), 1);
        assert_eq!(contents(normalized.document()), vec!["one", "שתיים", "three"]);
        assert_eq!(
            directions(normalized.document()),
            vec![Direction::Ltr, Direction::Rtl, Direction::Ltr]
        );
    }

    #[test]
    fn test_normalize_splits_line_breaks() {
        let nodes = vec![SurfaceNode::paragraph("a\nb", Direction::Ltr)];
        let normalized = normalize(&nodes, Direction::Ltr);
        assert_eq!(contents(normalized.document()), vec!["a", "b"]);
        assert_eq!(normalized.wrapped(), 0);
    }

    #[test]
    fn test_normalize_empty_tree() {
        let normalized = normalize(&[], Direction::Rtl);
        assert_eq!(normalized.document(), &Document::empty(Direction::Rtl));

        let normalized = normalize(&[SurfaceNode::text("")], Direction::Rtl);
        assert_eq!(normalized.document(), &Document::empty(Direction::Rtl));
        assert_eq!(normalized.wrapped(), 0);
    }

    #[test]
    fn test_normalize_keeps_blank_paragraph_nodes() {
        let nodes = vec![
            SurfaceNode::paragraph("", Direction::Ltr),
            SurfaceNode::paragraph("", Direction::Ltr),
        ];
        let normalized = normalize(&nodes, Direction::Ltr);
        assert_eq!(normalized.document().paragraph_count(), 2);
        assert_eq!(normalized.document().value(), "\n");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let nodes = vec![
            SurfaceNode::text("loose"),
            SurfaceNode::paragraph(" x\nשלום ", Direction::Ltr),
            SurfaceNode::text(""),
            SurfaceNode::paragraph("", Direction::Rtl),
        ];
        let once = normalize(&nodes, Direction::Rtl).into_document();
        let twice = normalize(&once.to_nodes(), Direction::Rtl).into_document();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resolve_preserves_offset_in_wrapped_run() {
        let nodes = vec![
            SurfaceNode::paragraph("first", Direction::Ltr),
            SurfaceNode::text("typed"),
        ];
        let normalized = normalize(&nodes, Direction::Ltr);
        assert_eq!(
            normalized.resolve(Anchor::new(1, 3)),
            StructuredPosition::new(1, 3)
        );
    }

    #[test]
    fn test_resolve_follows_split_lines() {
        let nodes = vec![SurfaceNode::paragraph("ab\ncd", Direction::Ltr)];
        let normalized = normalize(&nodes, Direction::Ltr);

        assert_eq!(normalized.resolve(Anchor::new(0, 2)), StructuredPosition::new(0, 2));
        assert_eq!(normalized.resolve(Anchor::new(0, 3)), StructuredPosition::new(1, 0));
        assert_eq!(normalized.resolve(Anchor::new(0, 5)), StructuredPosition::new(1, 2));
        assert_eq!(normalized.resolve(Anchor::new(0, 50)), StructuredPosition::new(1, 2));
    }

    #[test]
    fn test_resolve_clamps_foreign_anchors() {
        let nodes = vec![
            SurfaceNode::paragraph("ab", Direction::Ltr),
            SurfaceNode::text(""),
            SurfaceNode::paragraph("cd", Direction::Ltr),
        ];
        let normalized = normalize(&nodes, Direction::Ltr);

        // Dropped empty run: lands at the start of the next paragraph.
        assert_eq!(normalized.resolve(Anchor::new(1, 0)), StructuredPosition::new(1, 0));
        // Outside the tree: end of document.
        assert_eq!(normalized.resolve(Anchor::new(9, 0)), StructuredPosition::new(1, 2));
        // Past the node's text: end of that paragraph.
        assert_eq!(normalized.resolve(Anchor::new(0, 7)), StructuredPosition::new(0, 2));
    }

    #[test]
    fn test_delete_range_within_paragraph() {
        let mut doc = Document::from_lines(["hello"], Direction::Ltr);
        let at = doc.delete_range(
            StructuredPosition::new(0, 1),
            StructuredPosition::new(0, 4),
            Direction::Ltr,
        );
        assert_eq!(at, StructuredPosition::new(0, 1));
        assert_eq!(contents(&doc), vec!["ho"]);
    }

    #[test]
    fn test_delete_range_merges_paragraphs_and_retags() {
        let mut doc = Document::from_lines(["abc", "שלום", "xyz"], Direction::Ltr);
        let at = doc.delete_range(
            StructuredPosition::new(2, 1),
            StructuredPosition::new(0, 1),
            Direction::Ltr,
        );
        assert_eq!(at, StructuredPosition::new(0, 1));
        assert_eq!(contents(&doc), vec!["ayz"]);
        assert_eq!(directions(&doc), vec![Direction::Ltr]);
    }

    #[test]
    fn test_split_at_middle_and_edges() {
        let mut doc = Document::from_lines(["abשל"], Direction::Ltr);
        let at = doc.split_at(StructuredPosition::new(0, 2), Direction::Ltr);
        assert_eq!(at, StructuredPosition::new(1, 0));
        assert_eq!(contents(&doc), vec!["ab", "של"]);
        assert_eq!(directions(&doc), vec![Direction::Ltr, Direction::Rtl]);

        let at = doc.split_at(StructuredPosition::new(1, 99), Direction::Rtl);
        assert_eq!(at, StructuredPosition::new(2, 0));
        assert_eq!(contents(&doc), vec!["ab", "של", ""]);
        assert_eq!(doc.paragraph(2).map(Paragraph::direction), Some(Direction::Rtl));
    }
}
