use std::rc::Rc;

use super::types::SharedRecord;

/// Holds the definition record of one unit of work (e.g. one request).
///
/// Create one per scope and drop it when the scope ends. Never share it
/// between scopes; it is not `Send`.
#[derive(Debug, Default)]
pub struct ScopedCache {
  record: Option<SharedRecord>,
}

impl ScopedCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// The record held by this scope, if any store has loaded one.
  pub fn get(&self) -> Option<SharedRecord> {
    self.record.as_ref().map(Rc::clone)
  }

  pub fn is_populated(&self) -> bool {
    self.record.is_some()
  }

  pub(crate) fn set(&mut self, record: SharedRecord) {
    self.record = Some(record);
  }
}
