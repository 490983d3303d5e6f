use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::consts::DEFINITION_FILENAME;
use crate::platform::paths::{PathResolver, TenantName};
use crate::record::DefinitionRecord;

use super::cache::ScopedCache;
use super::types::{DefinitionStore, SharedRecord, StoreError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Stores a tenant's content definitions as a JSON file.
///
/// Reads and writes of the file go through one mutex per instance, so a
/// reader never sees a half-written document and writers never interleave.
/// The guarantee only holds between callers sharing this instance; use
/// [`TenantStores`](super::TenantStores) to get one instance per tenant.
#[derive(Debug)]
pub struct FileDefinitionStore {
  path: PathBuf,
  lock: Mutex<()>,
}

impl FileDefinitionStore {
  /// Create a store backed by the document at `path`.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      lock: Mutex::new(()),
    }
  }

  /// Create the store for a tenant's `ContentDefinition.json`.
  pub fn for_tenant(resolver: &impl PathResolver, tenant: &TenantName) -> Self {
    Self::new(resolver.resolve(tenant, DEFINITION_FILENAME))
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Whether the backing document has been saved at least once.
  pub fn exists(&self) -> bool {
    self.path.is_file()
  }

  fn temp_path(&self) -> PathBuf {
    let mut name = self.path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    self.path.with_file_name(name)
  }

  fn lock(&self) -> MutexGuard<'_, ()> {
    self.lock.lock().unwrap_or_else(|poisoned| {
      warn!(path = ?self.path, "recovering poisoned definition store lock");
      poisoned.into_inner()
    })
  }

  /// Read the document from disk, or a default one if there is none.
  fn read_document(&self) -> Result<DefinitionRecord, StoreError> {
    let _guard = self.lock();

    let content = match fs::read(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = ?self.path, "no content definition document, using empty default");
        return Ok(DefinitionRecord::new());
      }
      Err(source) => {
        return Err(StoreError::Read {
          path: self.path.clone(),
          source,
        });
      }
    };

    let bytes = content.strip_prefix(UTF8_BOM).unwrap_or(content.as_slice());
    let record = serde_json::from_slice(bytes).map_err(|source| StoreError::Malformed {
      path: self.path.clone(),
      source,
    })?;

    debug!(path = ?self.path, bytes = content.len(), "loaded content definition document");
    Ok(record)
  }

  /// Write the document to a sibling temp file, then rename it over the
  /// target. Must be called with the lock held.
  fn write_document(&self, record: &DefinitionRecord) -> Result<(), StoreError> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
        path: parent.to_path_buf(),
        source,
      })?;
    }

    let content = serde_json::to_string_pretty(record).map_err(StoreError::Serialize)?;
    let temp_path = self.temp_path();

    let written = fs::write(&temp_path, &content).and_then(|()| fs::rename(&temp_path, &self.path));
    if let Err(source) = written {
      // The temp file is ours alone while the lock is held.
      let _ = fs::remove_file(&temp_path);
      return Err(StoreError::Write {
        path: self.path.clone(),
        source,
      });
    }

    info!(
      path = ?self.path,
      types = record.content_type_definition_records.len(),
      parts = record.content_part_definition_records.len(),
      "saved content definition document"
    );
    Ok(())
  }
}

impl DefinitionStore for FileDefinitionStore {
  fn load_for_mutation(&self, cache: &mut ScopedCache) -> Result<SharedRecord, StoreError> {
    if let Some(record) = cache.get() {
      debug!(path = ?self.path, "using scoped content definitions for mutation");
      return Ok(record);
    }

    let (_, record) = self.get_for_read(cache)?;
    cache.set(Rc::clone(&record));
    Ok(record)
  }

  fn get_for_read(&self, cache: &ScopedCache) -> Result<(bool, SharedRecord), StoreError> {
    if let Some(record) = cache.get() {
      debug!(path = ?self.path, "using scoped content definitions, not cacheable");
      return Ok((false, record));
    }

    let record = self.read_document()?;
    Ok((true, Rc::new(RefCell::new(record))))
  }

  fn save(&self, record: &DefinitionRecord) -> Result<(), StoreError> {
    let _guard = self.lock();
    self.write_document(record)
  }
}
