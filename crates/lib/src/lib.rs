//! defstore-lib: per-tenant content definition storage
//!
//! This crate provides:
//! - `DefinitionRecord`: the content type and part schema document of a tenant
//! - `FileDefinitionStore`: loads and saves that document as JSON on disk
//! - `ScopedCache`: memoizes the loaded document for one unit of work
//! - `TenantStores`: hands out one store per tenant within the process

pub mod consts;
pub mod platform;
pub mod record;
pub mod store;
