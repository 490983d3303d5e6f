//! Content definition storage.
//!
//! Two access modes share one scope-local copy of the document:
//! - [`DefinitionStore::get_for_read`] returns the scope's copy when present,
//!   otherwise a fresh load that is *not* retained by the scope
//! - [`DefinitionStore::load_for_mutation`] always returns the scope's copy,
//!   loading and retaining it on first use
//!
//! # Storage Layout
//!
//! ```text
//! {app_data}/{container}/{tenant}/
//! ├── ContentDefinition.json       # DefinitionRecord, pretty-printed
//! └── ContentDefinition.json.tmp   # only while a save is in flight
//! ```

mod cache;
mod file;
mod registry;
mod types;

pub use cache::ScopedCache;
pub use file::FileDefinitionStore;
pub use registry::TenantStores;
pub use types::*;
