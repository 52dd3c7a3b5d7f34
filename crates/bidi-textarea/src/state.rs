//! Version tracking and change notifications.
//!
//! Every mutation of the widget's document bumps a version number. Subscribers are told when
//! the public value changes because of a user edit; programmatic assignments only refresh the
//! baseline they are compared against.
//!
//! # Example
//!
//! ```rust
//! use bidi_textarea::{BidiTextArea, HeadlessSurface, SurfaceEvent, TextAreaOptions};
//! use std::sync::{Arc, Mutex};
//!
//! let mut area = BidiTextArea::new(HeadlessSurface::new(), TextAreaOptions::default());
//! area.connect();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! area.subscribe(move |change| sink.lock().unwrap().push(change.new_value.clone()));
//!
//! area.set_value("programmatic");
//! area.surface_mut().type_text("!");
//! area.handle_event(SurfaceEvent::ContentChanged);
//!
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

/// A user-driven change of the public value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    /// Value before the edit.
    pub old_value: String,
    /// Value after the edit.
    pub new_value: String,
    /// Document version after the edit.
    pub version: u64,
}

/// Change callback function type
pub type ChangeCallback = Box<dyn FnMut(&ValueChange) + Send>;

/// Tracks the last observed value and notifies subscribers.
#[derive(Default)]
pub(crate) struct ChangeTracker {
    version: u64,
    last_value: String,
    callbacks: Vec<ChangeCallback>,
}

impl ChangeTracker {
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn subscribe(&mut self, callback: ChangeCallback) {
        self.callbacks.push(callback);
    }

    /// Record a programmatic mutation: bump the version, move the baseline, stay silent.
    pub(crate) fn sync(&mut self, value: String) {
        self.version += 1;
        self.last_value = value;
    }

    /// Record a user edit: bump the version and notify if the value moved.
    pub(crate) fn observe(&mut self, value: String) {
        self.version += 1;
        if value == self.last_value {
            return;
        }

        let change = ValueChange {
            old_value: std::mem::replace(&mut self.last_value, value.clone()),
            new_value: value,
            version: self.version,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
