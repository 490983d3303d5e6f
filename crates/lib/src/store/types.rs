use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;

use crate::record::DefinitionRecord;

use super::cache::ScopedCache;

/// A record shared by reference within one scope.
///
/// Mutations made through one handle are visible through every other handle
/// obtained in the same scope.
pub type SharedRecord = Rc<RefCell<DefinitionRecord>>;

/// Broad classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The file exists but is not a valid definition document.
  MalformedDocument,
  /// Reading, writing or creating directories failed.
  Persistence,
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("malformed content definition document at {}: {source}", .path.display())]
  Malformed {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to read content definitions from {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to create directory {}: {source}", .path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write content definitions to {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to serialize content definitions: {0}")]
  Serialize(#[source] serde_json::Error),
}

impl StoreError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      StoreError::Malformed { .. } => ErrorKind::MalformedDocument,
      StoreError::Read { .. } | StoreError::CreateDir { .. } | StoreError::Write { .. } | StoreError::Serialize(_) => {
        ErrorKind::Persistence
      }
    }
  }
}

/// Source of a tenant's content definition document.
pub trait DefinitionStore {
  /// Returns the scope's record for in-place mutation, loading it into the
  /// scope on first use.
  fn load_for_mutation(&self, cache: &mut ScopedCache) -> Result<SharedRecord, StoreError>;

  /// Returns a record for reading and whether an outer cache may keep it.
  ///
  /// The flag is `false` when the record is the scope's copy: it may still be
  /// handed to a mutator and must not leak into longer-lived caches. It is
  /// `true` for a fresh load that no scope holds.
  fn get_for_read(&self, cache: &ScopedCache) -> Result<(bool, SharedRecord), StoreError>;

  /// Persists the record, replacing the stored document.
  fn save(&self, record: &DefinitionRecord) -> Result<(), StoreError>;
}
