//! The text area widget.
//!
//! [`BidiTextArea`] behaves like a multi-line text input whose value is plain text, while the
//! host renders it as one direction-tagged paragraph per line. It owns the [`Document`] and
//! talks to the host only through an [`EditableSurface`].
//!
//! # Lifecycle
//!
//! 1. [`BidiTextArea::new`] creates a detached widget. `value` assignments are parked in a
//!    pending slot.
//! 2. [`BidiTextArea::connect`] builds the document, pushes it to the surface and applies the
//!    pending value (then the configured initial value). Further calls are no-ops.
//! 3. The host forwards notifications through [`BidiTextArea::handle_event`].
//!
//! All work happens synchronously inside these calls. A value assigned from outside is applied
//! immediately rather than deferred; the latest assignment wins.
//!
//! # Example
//!
//! ```rust
//! use bidi_textarea::{BidiTextArea, HeadlessSurface, TextAreaOptions};
//!
//! let mut area = BidiTextArea::new(HeadlessSurface::new(), TextAreaOptions::default());
//! area.set_value("a\nb\nc");
//! area.connect();
//!
//! area.set_selection_range(3, 3);
//! assert_eq!(area.selection_start(), 3);
//! assert_eq!(area.value(), "a\nb\nc");
//! ```

use crate::direction::Direction;
use crate::offset::{
    LinearSelection, StructuredSelection, anchor_to_position, selection_to_linear,
    selection_to_structured,
};
use crate::options::TextAreaOptions;
use crate::paragraph::Document;
use crate::reconcile::{reconcile, split_paragraph};
use crate::state::{ChangeTracker, ValueChange};
use crate::surface::{Caret, EditableSurface, Key, KeyDisposition, SurfaceEvent};

/// Multi-line text input with per-paragraph direction.
pub struct BidiTextArea<S> {
    surface: S,
    options: TextAreaOptions,
    /// Present once connected.
    document: Option<Document>,
    /// Value assigned before the document existed.
    pending_value: Option<String>,
    connected: bool,
    tracker: ChangeTracker,
}

impl<S: EditableSurface> BidiTextArea<S> {
    /// Create a detached widget over `surface`.
    pub fn new(surface: S, options: TextAreaOptions) -> Self {
        Self {
            surface,
            options,
            document: None,
            pending_value: None,
            connected: false,
            tracker: ChangeTracker::default(),
        }
    }

    /// Attach to the surface and build the document.
    ///
    /// Safe to call repeatedly; only the first call does anything.
    pub fn connect(&mut self) {
        if self.connected {
            tracing::debug!("connect called on an already connected text area, ignoring");
            return;
        }
        self.connected = true;

        let fallback = self.options.default_direction;
        self.document = Some(Document::empty(fallback));
        self.push_document();
        self.surface.set_placeholder(&self.options.placeholder);
        self.refresh_empty_state();
        tracing::debug!(direction = %fallback, "text area connected");

        if let Some(pending) = self.pending_value.take() {
            self.set_value(&pending);
        }
        if let Some(initial) = self.options.value.clone() {
            self.set_value(&initial);
        }
    }

    /// Whether [`BidiTextArea::connect`] has run.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The document, once connected.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The host surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the host surface, for replaying native edits.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current configuration.
    pub fn options(&self) -> &TextAreaOptions {
        &self.options
    }

    /// Document version; bumped by every mutation.
    pub fn version(&self) -> u64 {
        self.tracker.version()
    }

    /// Register a listener for value changes caused by user edits.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ValueChange) + Send + 'static,
    {
        self.tracker.subscribe(Box::new(callback));
    }

    /// The plain-text value: one trimmed line per paragraph.
    ///
    /// Before connection this is the pending value, normalized the same way.
    pub fn value(&self) -> String {
        match (&self.document, &self.pending_value) {
            (Some(document), _) => document.value(),
            (None, Some(pending)) => {
                Document::from_value(pending, self.options.default_direction).value()
            }
            (None, None) => String::new(),
        }
    }

    /// Replace the whole content.
    ///
    /// Before connection the text is parked and applied once on [`BidiTextArea::connect`].
    /// The caret collapses at the end of the new content. Does not emit a change notification.
    pub fn set_value(&mut self, text: &str) {
        if !self.connected {
            tracing::debug!("text area not connected yet, value kept pending");
            self.pending_value = Some(text.to_string());
            return;
        }

        let document = Document::from_value(text, self.options.default_direction);
        let value = document.value();
        self.document = Some(document);
        self.push_document();
        self.reset_caret();
        self.refresh_empty_state();
        self.tracker.sync(value);
    }

    /// Whether the trimmed value is empty; drives the placeholder.
    pub fn is_empty(&self) -> bool {
        match &self.document {
            Some(document) => document.is_blank(),
            None => self.value().trim().is_empty(),
        }
    }

    /// Reset to a single empty paragraph. Also drops a pending value.
    pub fn clear(&mut self) {
        self.pending_value = None;
        if !self.connected {
            return;
        }

        self.document = Some(Document::empty(self.options.default_direction));
        self.push_document();
        self.reset_caret();
        self.refresh_empty_state();
        self.tracker.sync(String::new());
    }

    /// Placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.options.placeholder
    }

    /// Change the placeholder text. Has no effect on the content.
    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.options.placeholder = placeholder.to_string();
        if self.connected {
            self.surface.set_placeholder(placeholder);
        }
    }

    /// Direction for paragraphs with no directional content.
    pub fn default_direction(&self) -> Direction {
        self.options.default_direction
    }

    /// Change the default direction and re-tag the document.
    pub fn set_default_direction(&mut self, direction: Direction) {
        self.options.default_direction = direction;
        if let Some(document) = self.document.as_mut() {
            document.retag(direction);
            let value = document.value();
            self.push_document();
            self.tracker.sync(value);
        }
    }

    /// Attribute-style configuration (`placeholder`, `value`, `default-direction`).
    ///
    /// `None` means the attribute was removed. Unknown attributes are ignored.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        let value = value.unwrap_or_default();
        match name {
            "placeholder" => self.set_placeholder(value),
            "value" => self.set_value(value),
            "default-direction" => {
                self.set_default_direction(Direction::normalize(value, Direction::default()))
            }
            _ => tracing::debug!(name, "ignoring unknown attribute"),
        }
    }

    /// Current selection in linear offsets; `0..0` before connection or without a caret.
    ///
    /// Each endpoint is measured from its own anchor.
    pub fn selection(&self) -> LinearSelection {
        let (Some(document), Some(caret)) = (&self.document, self.surface.caret()) else {
            return LinearSelection::default();
        };

        let selection = StructuredSelection::new(
            anchor_to_position(document, caret.start),
            anchor_to_position(document, caret.end),
        );
        selection_to_linear(document, selection)
    }

    /// Start of the selection in linear offsets.
    pub fn selection_start(&self) -> usize {
        self.selection().start()
    }

    /// End of the selection in linear offsets.
    pub fn selection_end(&self) -> usize {
        self.selection().end()
    }

    /// Select `start..end` in linear offsets.
    ///
    /// If `end < start`, the caret collapses at `end`. Both ends clamp to the content.
    pub fn set_selection_range(&mut self, start: usize, end: usize) {
        let Some(document) = &self.document else {
            return;
        };

        let start = start.min(end);
        let selection = LinearSelection::new(start, end).clamp(document.linear_len());
        let caret = selection_to_structured(document, selection).to_caret();
        self.apply_caret(caret);
    }

    /// Select everything.
    pub fn select(&mut self) {
        let Some(len) = self.document.as_ref().map(Document::linear_len) else {
            return;
        };
        self.set_selection_range(0, len);
    }

    /// Give the surface focus.
    pub fn focus(&mut self) {
        if self.connected {
            self.surface.focus();
        }
    }

    /// Remove focus from the surface.
    pub fn blur(&mut self) {
        if self.connected {
            self.surface.blur();
        }
    }

    /// Process a host notification.
    ///
    /// Returns [`KeyDisposition::Handled`] when the host must suppress its native behavior,
    /// which is always the case for [`Key::Enter`].
    pub fn handle_event(&mut self, event: SurfaceEvent) -> KeyDisposition {
        if !self.connected {
            return KeyDisposition::Default;
        }

        match event {
            SurfaceEvent::ContentChanged => {
                self.reconcile_surface();
                KeyDisposition::Default
            }
            SurfaceEvent::SelectionChanged => {
                tracing::trace!(selection = ?self.selection(), "selection changed");
                KeyDisposition::Default
            }
            SurfaceEvent::Key(Key::Enter) => {
                self.insert_paragraph_break();
                KeyDisposition::Handled
            }
            SurfaceEvent::Key(_) => KeyDisposition::Default,
        }
    }

    fn reconcile_surface(&mut self) {
        let nodes = match self.surface.read_nodes() {
            Ok(nodes) => nodes,
            Err(err) => {
                tracing::warn!(%err, "could not read surface tree, keeping previous document");
                return;
            }
        };

        let result = reconcile(&nodes, self.surface.caret(), self.options.default_direction);
        self.document = Some(result.document);

        if result.structure_changed {
            self.push_document();
            if let Some(caret) = result.caret {
                self.apply_caret(caret.to_caret());
            }
        }

        self.refresh_empty_state();
        self.observe_user_edit();
    }

    fn insert_paragraph_break(&mut self) {
        let fallback = self.options.default_direction;
        let caret = self.surface.caret();
        let Some(document) = self.document.as_mut() else {
            return;
        };

        let selection = match caret {
            Some(caret) => StructuredSelection::new(
                anchor_to_position(document, caret.start),
                anchor_to_position(document, caret.end),
            ),
            None => StructuredSelection::collapsed(document.end_position()),
        };
        let at = split_paragraph(document, selection, fallback);

        self.push_document();
        self.apply_caret(StructuredSelection::collapsed(at).to_caret());
        self.refresh_empty_state();
        self.observe_user_edit();
    }

    fn observe_user_edit(&mut self) {
        if let Some(document) = &self.document {
            self.tracker.observe(document.value());
        }
    }

    fn push_document(&mut self) {
        let Some(document) = &self.document else {
            return;
        };
        if let Err(err) = self.surface.write_nodes(document.to_nodes()) {
            tracing::warn!(%err, "could not write paragraphs to surface");
        }
    }

    /// The old anchors point into replaced content; park the caret at the end.
    fn reset_caret(&mut self) {
        let Some(end) = self.document.as_ref().map(Document::end_position) else {
            return;
        };
        self.apply_caret(StructuredSelection::collapsed(end).to_caret());
    }

    fn apply_caret(&mut self, caret: Caret) {
        if let Err(err) = self.surface.set_caret(caret) {
            tracing::warn!(%err, "could not move surface caret");
        }
    }

    fn refresh_empty_state(&mut self) {
        let empty = self.is_empty();
        self.surface.set_empty(empty);
    }
}
