//! Edit reconciliation.
//!
//! After the host applies a native edit, its tree may no longer match the paragraph model:
//! typing into a bare root leaves a text run outside any paragraph, and pasted content can carry
//! line-break markers. [`reconcile`] rebuilds the document from whatever the host holds and
//! translates the live caret so it stays on the same character.
//!
//! Line-break requests never reach the host: [`split_paragraph`] turns them into a paragraph
//! boundary.

use crate::direction::Direction;
use crate::offset::{StructuredPosition, StructuredSelection};
use crate::paragraph::{Document, normalize};
use crate::surface::{Caret, SurfaceNode};

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The rebuilt document, fully re-tagged.
    pub document: Document,
    /// The host caret translated into the rebuilt document.
    pub caret: Option<StructuredSelection>,
    /// How many orphan runs were wrapped into new paragraphs.
    pub wrapped: usize,
    /// Whether the host tree differs from the rebuilt document and must be rewritten.
    pub structure_changed: bool,
}

/// Rebuild the document from the host tree after a native edit.
///
/// Each orphan run is wrapped in a paragraph at the position it occupies, and a caret anchored
/// in that run ends up at the same character offset inside the new paragraph.
pub fn reconcile(nodes: &[SurfaceNode], caret: Option<Caret>, fallback: Direction) -> Reconciled {
    let normalized = normalize(nodes, fallback);
    let caret = caret.map(|caret| {
        StructuredSelection::new(
            normalized.resolve(caret.start),
            normalized.resolve(caret.end),
        )
    });
    let wrapped = normalized.wrapped();
    let document = normalized.into_document();
    let structure_changed = document.to_nodes() != nodes;

    if wrapped > 0 {
        tracing::debug!(
            wrapped,
            paragraphs = document.paragraph_count(),
            "wrapped orphan text runs into paragraphs"
        );
    }

    Reconciled {
        document,
        caret,
        wrapped,
        structure_changed,
    }
}

/// Apply a line-break request at `selection`.
///
/// A non-collapsed selection is deleted first. The paragraph holding the caret is split in two
/// and the returned caret sits at the start of the new paragraph.
pub fn split_paragraph(
    document: &mut Document,
    selection: StructuredSelection,
    fallback: Direction,
) -> StructuredPosition {
    let at = document.delete_range(selection.start, selection.end, fallback);
    let caret = document.split_at(at, fallback);
    tracing::debug!(
        paragraph = caret.paragraph,
        paragraphs = document.paragraph_count(),
        "line break split paragraph"
    );
    caret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Anchor;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_orphan_typing_is_wrapped_with_caret() {
        let nodes = vec![SurfaceNode::text("שלום")];
        let caret = Caret::collapsed(Anchor::new(0, 3));

        let result = reconcile(&nodes, Some(caret), Direction::Ltr);

        assert_eq!(result.wrapped, 1);
        assert!(result.structure_changed);
        assert_eq!(result.document.paragraph_count(), 1);
        assert_eq!(result.document.value(), "שלום");
        assert_eq!(
            result.caret,
            Some(StructuredSelection::collapsed(StructuredPosition::new(0, 3)))
        );
        assert_eq!(
            result.document.paragraphs()[0].direction(),
            Direction::Rtl
        );
    }

    #[test]
    fn test_clean_tree_only_retags() {
        let nodes = vec![
            SurfaceNode::paragraph("abc", Direction::Ltr),
            SurfaceNode::paragraph("def", Direction::Ltr),
        ];
        let result = reconcile(&nodes, None, Direction::Ltr);

        assert_eq!(result.wrapped, 0);
        assert!(!result.structure_changed);
        assert_eq!(result.caret, None);
    }

    #[test]
    fn test_stale_direction_counts_as_change() {
        // The user replaced Latin text with Hebrew; the host still shows the old tag.
        let nodes = vec![SurfaceNode::paragraph("שלום", Direction::Ltr)];
        let result = reconcile(&nodes, None, Direction::Ltr);

        assert!(result.structure_changed);
        assert_eq!(result.document.to_nodes()[0], SurfaceNode::paragraph("שלום", Direction::Rtl));
    }

    #[test]
    fn test_caret_after_wrapped_run_shifts_paragraph() {
        let nodes = vec![
            SurfaceNode::text("x"),
            SurfaceNode::paragraph("abc", Direction::Ltr),
        ];
        let caret = Caret::new(Anchor::new(0, 1), Anchor::new(1, 2));

        let result = reconcile(&nodes, Some(caret), Direction::Ltr);

        assert_eq!(
            result.caret,
            Some(StructuredSelection::new(
                StructuredPosition::new(0, 1),
                StructuredPosition::new(1, 2)
            ))
        );
    }

    #[test]
    fn test_split_paragraph_collapsed() {
        let mut doc = Document::from_lines(["hello"], Direction::Ltr);
        let caret = split_paragraph(
            &mut doc,
            StructuredSelection::collapsed(StructuredPosition::new(0, 2)),
            Direction::Ltr,
        );

        assert_eq!(caret, StructuredPosition::new(1, 0));
        assert_eq!(doc.linearize(), "he\nllo");
    }

    #[test]
    fn test_split_paragraph_replaces_selection() {
        let mut doc = Document::from_lines(["abc", "def"], Direction::Ltr);
        let caret = split_paragraph(
            &mut doc,
            StructuredSelection::new(StructuredPosition::new(0, 1), StructuredPosition::new(1, 2)),
            Direction::Ltr,
        );

        assert_eq!(caret, StructuredPosition::new(1, 0));
        assert_eq!(doc.linearize(), "a\nf");
    }

    #[test]
    fn test_split_at_end_creates_blank_paragraph_with_fallback() {
        let mut doc = Document::from_lines(["שלום"], Direction::Ltr);
        let caret = split_paragraph(
            &mut doc,
            StructuredSelection::collapsed(StructuredPosition::new(0, 4)),
            Direction::Rtl,
        );

        assert_eq!(caret, StructuredPosition::new(1, 0));
        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.paragraphs()[1].content(), "");
        assert_eq!(doc.paragraphs()[1].direction(), Direction::Rtl);
    }
}
