//! Quill - a writing assistant core
//!
//! This crate provides selection-addressable text splicing, suggestion
//! reconciliation, and a generative gateway seam, driven by the Elm
//! Architecture pattern: messages go through `update`, side effects come
//! back out as commands that the runtime executes on worker threads.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod error;
pub mod gateway;
pub mod messages;
pub mod model;
pub mod repl;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::AssistConfig;
pub use editable::{Reconcile, Selection, Splice, TextBuffer};
pub use error::EditError;
pub use gateway::{Gateway, GatewayError, OfflineGateway};
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::Runtime;
