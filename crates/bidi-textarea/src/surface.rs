//! Host surface capability.
//!
//! The widget never talks to a rendering API directly. Whatever renders the editable region
//! (a browser `contenteditable`, a terminal, a test double) implements [`EditableSurface`]:
//! read/write the structured tree, read/write the caret, focus handling and placeholder state.
//! Notifications travel the other way: the host forwards its "content changed", "selection
//! changed" and key notifications to
//! [`BidiTextArea::handle_event`](crate::BidiTextArea::handle_event).
//!
//! [`HeadlessSurface`] is an in-memory implementation used by tests and by hosts that keep
//! their own rendering elsewhere.

use crate::direction::Direction;
use crate::error::SurfaceError;
use crate::text::{byte_index, char_len};

/// A direct child of the surface root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceNode {
    /// A block holding one line of text.
    ///
    /// Hosts may leave line-break markers (`'\n'`) inside; normalization splits them.
    Paragraph {
        /// Text content.
        text: String,
        /// Direction tag as rendered by the host.
        direction: Direction,
    },
    /// A text run placed directly under the root, outside any paragraph.
    Text(String),
}

impl SurfaceNode {
    /// Create a paragraph node.
    pub fn paragraph(text: impl Into<String>, direction: Direction) -> Self {
        Self::Paragraph {
            text: text.into(),
            direction,
        }
    }

    /// Create an orphan text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Text content of this node.
    pub fn content(&self) -> &str {
        match self {
            Self::Paragraph { text, .. } => text,
            Self::Text(text) => text,
        }
    }

    /// Returns `true` for [`SurfaceNode::Text`].
    pub fn is_orphan(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    fn content_mut(&mut self) -> &mut String {
        match self {
            Self::Paragraph { text, .. } => text,
            Self::Text(text) => text,
        }
    }
}

/// One caret endpoint as the host reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Index of the root child holding the endpoint.
    pub node: usize,
    /// Character offset inside that child's text.
    pub offset: usize,
}

impl Anchor {
    /// Create an anchor.
    pub fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// The live caret: a start and an end anchor, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    /// Start of the selected range.
    pub start: Anchor,
    /// End of the selected range.
    pub end: Anchor,
}

impl Caret {
    /// Create a caret spanning `start..end`.
    pub fn new(start: Anchor, end: Anchor) -> Self {
        Self { start, end }
    }

    /// Create a collapsed caret.
    pub fn collapsed(anchor: Anchor) -> Self {
        Self {
            start: anchor,
            end: anchor,
        }
    }

    /// Returns `true` if start and end coincide.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Keys the widget may intercept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Line-break request.
    Enter,
    /// A printable character.
    Character(char),
    /// Any other named key (`"Backspace"`, `"ArrowLeft"`, ...).
    Named(String),
}

/// Notification forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The host changed the tree (typing, paste, deletion).
    ContentChanged,
    /// The caret moved without a content change.
    SelectionChanged,
    /// A key is about to be processed by the host.
    Key(Key),
}

/// What the host should do with the event after the widget saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The widget handled it; the host must suppress its native behavior.
    Handled,
    /// The host proceeds with its native behavior.
    Default,
}

/// Capability the widget needs from its rendering host.
pub trait EditableSurface {
    /// Read the root's children in order.
    fn read_nodes(&self) -> Result<Vec<SurfaceNode>, SurfaceError>;

    /// Replace the root's children.
    fn write_nodes(&mut self, nodes: Vec<SurfaceNode>) -> Result<(), SurfaceError>;

    /// The live caret, or `None` when the surface holds no selection.
    fn caret(&self) -> Option<Caret>;

    /// Move the live caret.
    fn set_caret(&mut self, caret: Caret) -> Result<(), SurfaceError>;

    /// Give the surface input focus.
    fn focus(&mut self);

    /// Remove input focus from the surface.
    fn blur(&mut self);

    /// Update the placeholder text shown while the widget is empty.
    fn set_placeholder(&mut self, text: &str);

    /// Toggle placeholder visibility.
    fn set_empty(&mut self, empty: bool);
}

/// In-memory [`EditableSurface`].
///
/// Besides the trait, it offers a few helpers that mimic what a native editable region does on
/// its own (insert typed text at the caret, wipe the root on select-all + delete) so host
/// behavior can be replayed without a renderer.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    nodes: Vec<SurfaceNode>,
    caret: Option<Caret>,
    focused: bool,
    placeholder: String,
    empty: bool,
    detached: bool,
    write_count: usize,
}

impl HeadlessSurface {
    /// Create an empty, attached surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current root children.
    pub fn nodes(&self) -> &[SurfaceNode] {
        &self.nodes
    }

    /// Whether the surface has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Placeholder text last pushed by the widget.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether the placeholder is currently shown.
    pub fn shows_placeholder(&self) -> bool {
        self.empty
    }

    /// How many times the tree was replaced through [`EditableSurface::write_nodes`].
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Make every tree/caret operation fail with [`SurfaceError::Detached`].
    pub fn detach(&mut self) {
        self.detached = true;
    }

    /// Replace the tree without going through the widget (a native edit).
    pub fn replace_nodes(&mut self, nodes: Vec<SurfaceNode>) {
        self.nodes = nodes;
    }

    /// Place the caret without going through the widget (a pointer click).
    pub fn place_caret(&mut self, caret: Caret) {
        self.caret = Some(caret);
    }

    /// Drop the caret entirely.
    pub fn clear_caret(&mut self) {
        self.caret = None;
    }

    /// Native select-all + delete: the root ends up with no children at all.
    pub fn delete_all(&mut self) {
        self.nodes.clear();
        self.caret = None;
    }

    /// Native typing at the caret.
    ///
    /// A selection within one node is replaced; a selection spanning nodes collapses to its
    /// start. With an empty root or no caret, the text lands in a new orphan run at the end of
    /// the root, which is what a native editable region does when typing into a bare root.
    pub fn type_text(&mut self, text: &str) {
        let target = self
            .caret
            .filter(|caret| caret.start.node < self.nodes.len());

        let Some(caret) = target else {
            self.nodes.push(SurfaceNode::text(text));
            let anchor = Anchor::new(self.nodes.len() - 1, char_len(text));
            self.caret = Some(Caret::collapsed(anchor));
            return;
        };

        let content = self.nodes[caret.start.node].content_mut();
        let len = char_len(content);
        let start = caret.start.offset.min(len);
        let end = if caret.end.node == caret.start.node {
            caret.end.offset.clamp(start, len)
        } else {
            start
        };

        let start_byte = byte_index(content, start);
        let end_byte = byte_index(content, end);
        content.replace_range(start_byte..end_byte, text);

        let anchor = Anchor::new(caret.start.node, start + char_len(text));
        self.caret = Some(Caret::collapsed(anchor));
    }
}

impl EditableSurface for HeadlessSurface {
    fn read_nodes(&self) -> Result<Vec<SurfaceNode>, SurfaceError> {
        if self.detached {
            return Err(SurfaceError::Detached);
        }
        Ok(self.nodes.clone())
    }

    fn write_nodes(&mut self, nodes: Vec<SurfaceNode>) -> Result<(), SurfaceError> {
        if self.detached {
            return Err(SurfaceError::Detached);
        }
        self.nodes = nodes;
        self.write_count += 1;
        Ok(())
    }

    fn caret(&self) -> Option<Caret> {
        self.caret
    }

    fn set_caret(&mut self, caret: Caret) -> Result<(), SurfaceError> {
        if self.detached {
            return Err(SurfaceError::Detached);
        }
        self.caret = Some(caret);
        Ok(())
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn set_placeholder(&mut self, text: &str) {
        self.placeholder = text.to_string();
    }

    fn set_empty(&mut self, empty: bool) {
        self.empty = empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_into_bare_root_creates_orphan() {
        let mut surface = HeadlessSurface::new();
        surface.type_text("hi");

        assert_eq!(surface.nodes(), &[SurfaceNode::text("hi")]);
        assert_eq!(surface.caret(), Some(Caret::collapsed(Anchor::new(0, 2))));
    }

    #[test]
    fn test_type_at_caret_inside_paragraph() {
        let mut surface = HeadlessSurface::new();
        surface.replace_nodes(vec![SurfaceNode::paragraph("heo", Direction::Ltr)]);
        surface.place_caret(Caret::collapsed(Anchor::new(0, 2)));

        surface.type_text("ll");

        assert_eq!(surface.nodes()[0].content(), "hello");
        assert_eq!(surface.caret(), Some(Caret::collapsed(Anchor::new(0, 4))));
    }

    #[test]
    fn test_type_replaces_selection_in_one_node() {
        let mut surface = HeadlessSurface::new();
        surface.replace_nodes(vec![SurfaceNode::paragraph("שלום", Direction::Rtl)]);
        surface.place_caret(Caret::new(Anchor::new(0, 1), Anchor::new(0, 3)));

        surface.type_text("x");

        assert_eq!(surface.nodes()[0].content(), "שxם");
        assert_eq!(surface.caret(), Some(Caret::collapsed(Anchor::new(0, 2))));
    }

    #[test]
    fn test_detached_surface_rejects_writes() {
        let mut surface = HeadlessSurface::new();
        surface.detach();

        assert_eq!(surface.read_nodes(), Err(SurfaceError::Detached));
        assert_eq!(surface.write_nodes(Vec::new()), Err(SurfaceError::Detached));
        assert_eq!(surface.write_count(), 0);
    }
}
