//! Runtime accessibility-preference engine for the RubyRoo site.
//!
//! Maintains a small persisted preference set (font size, contrast, motion,
//! link highlighting, bionic reading) and applies it to a rendered content
//! tree. The bionic reading transform is reversible and idempotent: applying
//! wraps eligible text in marker containers that bold the leading half of
//! each word, restoring collapses every marker back to plain text,
//! byte-identical to the original.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, Settings)
//! - `services/` - Business operations (bionic reading transform)
//! - `infrastructure/` - External integrations (storage backends, errors)
//! - `state.rs` - Main coordinator driven by the trigger UI

pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use domain::{AccessibilitySettings, Document, FontSize, NodeId, STORAGE_KEY};
pub use infrastructure::{A11yError, FileStore, KeyValueStore, MemoryStore, Result};
pub use state::{AccessibilityState, SettingChange};
