#![warn(missing_docs)]
//! Bidi Textarea - Headless Multi-line Input With Per-paragraph Direction
//!
//! # Overview
//!
//! `bidi-textarea` is the model behind a plain-text input that renders each line as its own
//! paragraph, tagged left-to-right or right-to-left from its content. It does not render
//! anything: the host provides an [`EditableSurface`] and forwards its notifications.
//!
//! The same content lives in three shapes, kept in sync by this crate:
//!
//! - the linear **value**, lines joined with `'\n'`;
//! - the structured [`Document`], a never-empty list of [`Paragraph`]s with direction tags;
//! - the **caret**, as linear offsets for callers and as (node, offset) anchors for the host.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  BidiTextArea (value facade, events)        │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Edit Reconciler                            │  ← Host edits → model
//! ├─────────────────────────────────────────────┤
//! │  Offset Mapper                              │  ← Linear ↔ structured
//! ├─────────────────────────────────────────────┤
//! │  Paragraph Model                            │  ← Document invariants
//! ├─────────────────────────────────────────────┤
//! │  Direction Classifier                       │  ← Text → ltr/rtl
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use bidi_textarea::{
//!     BidiTextArea, Direction, HeadlessSurface, StructuredPosition, SurfaceEvent,
//!     TextAreaOptions, to_structured,
//! };
//!
//! let options = TextAreaOptions::default().with_placeholder("Write something");
//! let mut area = BidiTextArea::new(HeadlessSurface::new(), options);
//! area.connect();
//!
//! area.set_value("hello\nשלום");
//! let doc = area.document().unwrap();
//! assert_eq!(doc.paragraphs()[1].direction(), Direction::Rtl);
//! assert_eq!(to_structured(doc, 6), StructuredPosition::new(1, 0));
//!
//! // The host typed into the surface; let the widget reconcile.
//! area.surface_mut().type_text("!");
//! area.handle_event(SurfaceEvent::ContentChanged);
//! ```
//!
//! # Module Description
//!
//! - [`direction`] - direction detection
//! - [`paragraph`] - paragraph model and normalization
//! - [`offset`] - linear/structured offset mapping
//! - [`reconcile`] - edit reconciliation and line-break handling
//! - [`surface`] - host surface capability and the in-memory surface
//! - [`options`] - configuration
//! - [`state`] - version tracking and change notifications
//! - [`widget`] - the widget facade
//!
//! # Logging
//!
//! The crate emits `tracing` events (reconciliation and lifecycle at `debug`, recovered host
//! failures and clamped anchors at `warn`). Install a subscriber in the host to see them.

pub mod direction;
mod error;
pub mod offset;
pub mod options;
pub mod paragraph;
pub mod reconcile;
pub mod state;
pub mod surface;
mod text;
pub mod widget;

pub use direction::{Direction, ParseDirectionError, classify, detect};
pub use error::{OptionsError, SurfaceError};
pub use offset::{
    LinearSelection, StructuredPosition, StructuredSelection, anchor_to_position,
    selection_to_linear, selection_to_structured, to_linear, to_structured,
};
pub use options::TextAreaOptions;
pub use paragraph::{Document, Normalized, Paragraph, normalize};
pub use reconcile::{Reconciled, reconcile, split_paragraph};
pub use state::{ChangeCallback, ValueChange};
pub use surface::{
    Anchor, Caret, EditableSurface, HeadlessSurface, Key, KeyDisposition, SurfaceEvent,
    SurfaceNode,
};
pub use widget::BidiTextArea;
