use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::platform::paths::{ShellOptions, TenantName};

use super::file::FileDefinitionStore;

/// One [`FileDefinitionStore`] per tenant for the lifetime of the process.
///
/// The store's lock only serializes callers that share the instance, so every
/// caller touching a tenant's document should get its store from here.
#[derive(Debug)]
pub struct TenantStores {
  options: ShellOptions,
  stores: Mutex<HashMap<TenantName, Arc<FileDefinitionStore>>>,
}

impl TenantStores {
  pub fn new(options: ShellOptions) -> Self {
    Self {
      options,
      stores: Mutex::new(HashMap::new()),
    }
  }

  pub fn options(&self) -> &ShellOptions {
    &self.options
  }

  /// The store for `tenant`, created on first request.
  pub fn get_or_create(&self, tenant: &TenantName) -> Arc<FileDefinitionStore> {
    let mut stores = self.stores.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let store = stores.entry(tenant.clone()).or_insert_with(|| {
      let store = FileDefinitionStore::for_tenant(&self.options, tenant);
      debug!(tenant = %tenant, path = ?store.path(), "created definition store");
      Arc::new(store)
    });

    Arc::clone(store)
  }

  pub fn len(&self) -> usize {
    self.stores.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
