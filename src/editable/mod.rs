//! Selection-addressable text editing primitives.
//!
//! # Architecture
//!
//! - [`TextBuffer`]: the document, with strict character-offset reads and splices
//! - [`Splice`]: the record of one replacement, and the shift-or-drop rule
//! - [`Selection`] / [`SelectionTracker`]: the captured span and its owner
//! - [`Reconcile`]: implemented by every piece of state that must follow a splice
//!
//! # Example
//!
//! ```
//! use quill::editable::{Reconcile, SelectionTracker, TextBuffer};
//!
//! let mut buffer = TextBuffer::from_text("The wrok is done.");
//! let mut selection = SelectionTracker::new();
//! selection.capture(4, 8, "wrok");
//!
//! let splice = buffer.splice(0, 0, ">> ").unwrap();
//! selection.reconcile(&splice, &buffer);
//!
//! assert_eq!(selection.get().map(|s| s.start), Some(7));
//! assert!(selection.is_still_valid(&buffer));
//! ```

mod buffer;
mod selection;
mod span;

pub use buffer::TextBuffer;
pub use selection::{Selection, SelectionTracker};
pub use span::{Reconcile, Splice};
