//! Command implementations.
//!
//! Every command runs as a single scope: it creates one `ScopedCache`, so the
//! document is loaded at most once per invocation.

mod parts;
mod path;
mod show;
mod types;

pub use parts::{FieldSpec, cmd_add_part, cmd_remove_part};
pub use path::cmd_path;
pub use show::cmd_show;
pub use types::{cmd_add_type, cmd_remove_type};
